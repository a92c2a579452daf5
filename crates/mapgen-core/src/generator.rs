//! Region generators and the registry that hosts them.
//!
//! A generator fills a rectangular region of a fixed set of named layers.
//! The driver picks a generator by name, feeds it parameters and calls it
//! over whatever tiling of the canvas it likes.

use crate::config::{GeneratorParameters, ParameterFile};
use crate::error::{ConfigError, GenerateError};
use crate::layers::{LayerSet, LayerSetMut};
use crate::region::{Canvas, Region};
use crate::terrain::{TerrainParameters, TerrainSynthesizer};

/// A synthesis algorithm that can fill any sub-rectangle of a canvas.
///
/// `generate` must be a pure function of the region's pixel coordinates,
/// the canvas and the loaded parameters, so that any tiling of the canvas
/// produces the same output. Writes stay inside `region`.
pub trait RegionGenerator: Send + Sync {
    fn name(&self) -> &str;

    /// Names of the layers this generator writes, in index order.
    fn layer_names(&self) -> &[&'static str];

    /// Replace the generator's parameters. On error the previous parameters
    /// stay in effect.
    fn load_parameters(&mut self, params: &GeneratorParameters) -> Result<(), ConfigError>;

    /// Fill `region` of `outputs`. The canvas height for position-dependent
    /// terms comes from `outputs.canvas()`.
    fn generate(&self, region: Region, outputs: &mut LayerSetMut<'_>) -> Result<(), GenerateError>;

    /// Allocate an output set with this generator's layers.
    fn allocate(&self, canvas: Canvas) -> LayerSet {
        LayerSet::new(canvas, self.layer_names())
    }
}

/// Generators keyed by name, in registration order.
#[derive(Default)]
pub struct GeneratorRegistry {
    generators: Vec<Box<dyn RegionGenerator>>,
}

impl GeneratorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in generator with default parameters.
    pub fn with_defaults() -> Result<Self, ConfigError> {
        let mut registry = Self::new();
        registry.register(Box::new(TerrainSynthesizer::new(TerrainParameters::default())?));
        Ok(registry)
    }

    /// Add a generator, replacing any existing one with the same name.
    pub fn register(&mut self, generator: Box<dyn RegionGenerator>) {
        let name = generator.name().to_owned();
        if let Some(slot) = self.generators.iter_mut().find(|g| g.name() == name) {
            log::debug!("replacing generator `{name}`");
            *slot = generator;
        } else {
            log::debug!("registered generator `{name}`");
            self.generators.push(generator);
        }
    }

    pub fn get(&self, name: &str) -> Option<&dyn RegionGenerator> {
        self.generators.iter().find(|g| g.name() == name).map(|g| g.as_ref())
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn RegionGenerator + 'static)> {
        self.generators.iter_mut().find(|g| g.name() == name).map(|g| g.as_mut())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.generators.iter().map(|g| g.name())
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Load each registered generator's section of `file`.
    ///
    /// Generators without a section keep their parameters. Stops at the first
    /// generator whose section is invalid.
    pub fn load(&mut self, file: &ParameterFile) -> Result<(), ConfigError> {
        for generator in &mut self.generators {
            match file.generator(generator.name()) {
                Some(params) => generator.load_parameters(params)?,
                None => log::warn!("no parameters for generator `{}`, keeping current ones", generator.name()),
            }
        }
        for name in file.generator_names() {
            if !self.generators.iter().any(|g| g.name() == name) {
                log::warn!("parameter file has a section for unknown generator `{name}`");
            }
        }
        Ok(())
    }

    /// Load one generator's parameters.
    pub fn load_into(&mut self, name: &str, params: &GeneratorParameters) -> Result<(), ConfigError> {
        self.get_mut(name)
            .ok_or_else(|| ConfigError::UnknownGenerator(name.to_owned()))?
            .load_parameters(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    /// Writes each pixel's x coordinate as a grey level into one layer.
    struct Gradient {
        scale: f32,
    }

    impl RegionGenerator for Gradient {
        fn name(&self) -> &str {
            "Gradient"
        }

        fn layer_names(&self) -> &[&'static str] {
            &["Ramp"]
        }

        fn load_parameters(&mut self, params: &GeneratorParameters) -> Result<(), ConfigError> {
            self.scale = params.float("scale")?;
            Ok(())
        }

        fn generate(&self, region: Region, outputs: &mut LayerSetMut<'_>) -> Result<(), GenerateError> {
            outputs.check(&region, 1)?;
            for y in region.rows() {
                for x in region.columns() {
                    let v = x as f32 * self.scale;
                    outputs.write(0, x, y, Color::rgb(v, v, v));
                }
            }
            Ok(())
        }
    }

    #[test]
    fn defaults_host_the_terrain_generator() {
        let registry = GeneratorRegistry::with_defaults().unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Terrain"]);
        let terrain = registry.get("Terrain").unwrap();
        assert_eq!(terrain.layer_names().len(), 6);
        assert!(registry.get("Rivers").is_none());
    }

    #[test]
    fn generators_are_interchangeable_behind_the_trait() {
        let mut registry = GeneratorRegistry::with_defaults().unwrap();
        registry.register(Box::new(Gradient { scale: 0.25 }));
        assert_eq!(registry.len(), 2);

        let gradient = registry.get("Gradient").unwrap();
        let mut layers = gradient.allocate(Canvas::new(4, 2));
        gradient.generate(Region::new(0, 0, 4, 2), &mut layers.view_mut()).unwrap();
        let ramp = layers.layer_by_name("Ramp").unwrap();
        assert_eq!(ramp.get(3, 1), Color::rgb(0.75, 0.75, 0.75));
    }

    #[test]
    fn register_replaces_same_name() {
        let mut registry = GeneratorRegistry::new();
        registry.register(Box::new(Gradient { scale: 0.1 }));
        registry.register(Box::new(Gradient { scale: 0.2 }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn load_routes_sections_by_name() {
        let mut registry = GeneratorRegistry::with_defaults().unwrap();
        registry.register(Box::new(Gradient { scale: 0.1 }));

        let mut file = ParameterFile::default();
        let mut gradient = GeneratorParameters::new();
        gradient.set_float("scale", 0.25);
        file.insert("Gradient", gradient);
        file.insert("Unused", GeneratorParameters::new());

        // Terrain has no section and keeps its defaults.
        registry.load(&file).unwrap();

        let g = registry.get("Gradient").unwrap();
        let mut layers = g.allocate(Canvas::new(4, 1));
        g.generate(Region::new(0, 0, 4, 1), &mut layers.view_mut()).unwrap();
        assert_eq!(layers.layer(0).unwrap().get(2, 0), Color::rgb(0.5, 0.5, 0.5));
    }

    #[test]
    fn invalid_section_is_reported() {
        let mut registry = GeneratorRegistry::with_defaults().unwrap();
        let mut file = ParameterFile::default();
        file.insert("Terrain", GeneratorParameters::new());
        assert!(matches!(registry.load(&file), Err(ConfigError::MissingParameter(_))));
        assert!(matches!(
            registry.load_into("Rivers", &GeneratorParameters::new()),
            Err(ConfigError::UnknownGenerator(_))
        ));
    }
}
