//! Parameter files: one section per generator, each a name-keyed map of
//! scalars, RGB8 colours and nested noise configurations.
//!
//! ```json
//! { "Terrain": { "sea_level": 0.0, "land_light": [120, 170, 90],
//!                "land_mask": { "noise_type": "PerlinFractal", ... } } }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::color::{Color, Rgb8};
use crate::error::ConfigError;
use crate::noise::NoiseFieldConfig;

/// Parameters for a single generator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratorParameters(BTreeMap<String, Value>);

impl GeneratorParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    fn get(&self, name: &str) -> Result<&Value, ConfigError> {
        self.0.get(name).ok_or_else(|| ConfigError::MissingParameter(name.to_owned()))
    }

    pub fn float(&self, name: &str) -> Result<f32, ConfigError> {
        self.get(name)?
            .as_f64()
            .map(|v| v as f32)
            .ok_or_else(|| ConfigError::WrongType { name: name.to_owned(), expected: "number" })
    }

    /// Like [`Self::float`] but falls back to `default` when absent.
    pub fn float_or(&self, name: &str, default: f32) -> Result<f32, ConfigError> {
        if self.contains(name) {
            self.float(name)
        } else {
            Ok(default)
        }
    }

    /// A whole number that fits in an `i32`, read without passing through a
    /// float so large seeds survive intact.
    pub fn int(&self, name: &str) -> Result<i32, ConfigError> {
        self.get(name)?
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| ConfigError::WrongType { name: name.to_owned(), expected: "32-bit integer" })
    }

    pub fn int_or(&self, name: &str, default: i32) -> Result<i32, ConfigError> {
        if self.contains(name) {
            self.int(name)
        } else {
            Ok(default)
        }
    }

    /// An `[r, g, b]` byte triple, normalised.
    pub fn color(&self, name: &str) -> Result<Color, ConfigError> {
        Rgb8::deserialize(self.get(name)?)
            .map(Color::from_rgb8)
            .map_err(|_| ConfigError::WrongType { name: name.to_owned(), expected: "[r, g, b] colour" })
    }

    pub fn noise(&self, name: &str) -> Result<NoiseFieldConfig, ConfigError> {
        let value = self.get(name)?;
        if !value.is_object() {
            return Err(ConfigError::WrongType { name: name.to_owned(), expected: "noise configuration" });
        }
        NoiseFieldConfig::deserialize(value).map_err(|e| ConfigError::InvalidParameter {
            name: name.to_owned(),
            reason: e.to_string(),
        })
    }

    pub fn set_float(&mut self, name: &str, value: f32) {
        self.0.insert(name.to_owned(), Value::from(f64::from(value)));
    }

    pub fn set_int(&mut self, name: &str, value: i32) {
        self.0.insert(name.to_owned(), Value::from(value));
    }

    pub fn set_color(&mut self, name: &str, color: Color) {
        let Rgb8(rgb) = color.to_rgb8();
        self.0.insert(name.to_owned(), Value::from(rgb.to_vec()));
    }

    pub fn set_noise(&mut self, name: &str, config: &NoiseFieldConfig) -> Result<(), ConfigError> {
        let value = serde_json::to_value(config)?;
        self.0.insert(name.to_owned(), value);
        Ok(())
    }
}

/// Every generator's parameters, keyed by generator name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterFile(BTreeMap<String, GeneratorParameters>);

impl ParameterFile {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let file = Self::from_json_str(&contents)?;
        log::info!("loaded {} generator section(s) from {}", file.0.len(), path.display());
        Ok(file)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn generator(&self, name: &str) -> Option<&GeneratorParameters> {
        self.0.get(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, params: GeneratorParameters) {
        self.0.insert(name.into(), params);
    }

    pub fn generator_names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseKind;

    const JSON: &str = r#"{
        "Terrain": {
            "sea_level": -0.1,
            "octave_bias": 3,
            "land_light": [255, 128, 0],
            "land_mask": {
                "noise_type": "SimplexFractal", "interp_type": "Quintic", "fractal_type": "FBM",
                "seed": 7, "octaves": 4, "frequency": 0.5, "gain": 0.5, "lacunarity": 2.0
            },
            "broken_noise": {
                "noise_type": "Voronoi", "interp_type": "Quintic", "fractal_type": "FBM",
                "seed": 7, "octaves": 4, "frequency": 0.5, "gain": 0.5, "lacunarity": 2.0
            }
        },
        "Other": {}
    }"#;

    fn terrain() -> GeneratorParameters {
        ParameterFile::from_json_str(JSON).unwrap().generator("Terrain").unwrap().clone()
    }

    #[test]
    fn typed_accessors() {
        let p = terrain();
        assert_eq!(p.float("sea_level").unwrap(), -0.1);
        assert_eq!(p.float("octave_bias").unwrap(), 3.0);
        assert_eq!(p.float_or("tree_seed", 1337.0).unwrap(), 1337.0);
        let c = p.color("land_light").unwrap();
        assert_eq!(c.to_rgb8(), Rgb8([255, 128, 0]));
        let n = p.noise("land_mask").unwrap();
        assert_eq!(n.noise_kind, NoiseKind::SimplexFractal);
        assert_eq!(n.seed, 7);
    }

    #[test]
    fn missing_and_mistyped_parameters() {
        let p = terrain();
        assert!(matches!(p.float("scale"), Err(ConfigError::MissingParameter(n)) if n == "scale"));
        assert!(matches!(p.float("land_light"), Err(ConfigError::WrongType { expected: "number", .. })));
        assert!(matches!(p.color("sea_level"), Err(ConfigError::WrongType { .. })));
        assert!(matches!(p.noise("sea_level"), Err(ConfigError::WrongType { .. })));
    }

    #[test]
    fn unknown_noise_tag_names_the_parameter() {
        let err = terrain().noise("broken_noise").unwrap_err();
        match err {
            ConfigError::InvalidParameter { name, reason } => {
                assert_eq!(name, "broken_noise");
                assert!(reason.contains("Voronoi"), "{reason}");
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn written_parameters_read_back() {
        let mut p = GeneratorParameters::new();
        p.set_float("scale", 64.0);
        p.set_color("tree", Color::from_rgb8(Rgb8([10, 20, 30])));
        p.set_int("tree_seed", 2_000_000_011);
        p.set_noise("moisture", &NoiseFieldConfig::default()).unwrap();
        let mut file = ParameterFile::default();
        file.insert("Terrain", p);

        let again = ParameterFile::from_json_str(&file.to_json_string().unwrap()).unwrap();
        assert_eq!(again, file);
        let t = again.generator("Terrain").unwrap();
        assert_eq!(t.float("scale").unwrap(), 64.0);
        assert_eq!(t.color("tree").unwrap().to_rgb8(), Rgb8([10, 20, 30]));
        assert_eq!(t.noise("moisture").unwrap(), NoiseFieldConfig::default());
        assert_eq!(t.int("tree_seed").unwrap(), 2_000_000_011);
    }

    #[test]
    fn integers_are_read_exactly() {
        let p: GeneratorParameters = serde_json::from_str(
            r#"{ "odd": 16777217, "neg": -5, "frac": 1.5, "huge": 4294967296, "text": "7" }"#,
        )
        .unwrap();
        assert_eq!(p.int("odd").unwrap(), 16_777_217);
        assert_eq!(p.int("neg").unwrap(), -5);
        assert_eq!(p.int_or("absent", 1337).unwrap(), 1337);
        for name in ["frac", "huge", "text"] {
            assert!(
                matches!(p.int(name), Err(ConfigError::WrongType { expected: "32-bit integer", .. })),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(ParameterFile::from_json_str("{ not json"), Err(ConfigError::Json(_))));
    }
}
