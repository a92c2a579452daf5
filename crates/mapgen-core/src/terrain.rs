//! Terrain synthesis: land mask, elevation, moisture, temperature, biomes and
//! a composited final layer, computed independently for every pixel.
//!
//! Per land pixel:
//!   1. Sample the land mask at `(x, y) / scale`; at or below `sea_level` the
//!      pixel is water and only the Land and Final layers get a water colour.
//!   2. Elevation and moisture come from their own fields, remapped to [0, 1].
//!   3. Temperature = `(1 - elevation) + lat^lat_falloff`, where `lat` is 1 on
//!      the canvas's middle row and 0 on its top and bottom rows.
//!   4. Temperature and moisture pick the biome.
//!   5. Final colour: biome shaded by elevation, overridden by stone above
//!      `mountain_height`, or by the tree colour on forest pixels whose
//!      white-noise draw is at most `tree_percent`.

use crate::biome::{classify, Biome, BiomePalette, Thresholds};
use crate::color::Color;
use crate::config::GeneratorParameters;
use crate::error::{ConfigError, GenerateError};
use crate::generator::RegionGenerator;
use crate::layers::LayerSetMut;
use crate::noise::{FractalKind, NoiseField, NoiseFieldConfig, NoiseKind};
use crate::region::Region;
use crate::remap::unit;

/// Output layers in write order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerrainLayer {
    Land,
    Elevation,
    Moisture,
    Temperature,
    BiomeMap,
    Final,
}

impl TerrainLayer {
    pub const ALL: [TerrainLayer; 6] = [
        TerrainLayer::Land,
        TerrainLayer::Elevation,
        TerrainLayer::Moisture,
        TerrainLayer::Temperature,
        TerrainLayer::BiomeMap,
        TerrainLayer::Final,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        LAYER_NAMES[self.index()]
    }
}

/// Display names, indexed by [`TerrainLayer::index`].
pub const LAYER_NAMES: [&str; 6] = ["Land", "Elevation", "Moisture", "Temperature", "Biomes", "Final"];

/// Colours for every non-biome surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceColors {
    pub land_light: Color,
    pub land_dark: Color,
    pub water_light: Color,
    pub water_dark: Color,
    pub hot: Color,
    pub cold: Color,
    pub tree: Color,
    pub stone_light: Color,
    pub stone_dark: Color,
}

impl Default for SurfaceColors {
    fn default() -> Self {
        Self {
            land_light: Color::rgb(0.600, 0.706, 0.443),
            land_dark: Color::rgb(0.231, 0.302, 0.165),
            water_light: Color::rgb(0.376, 0.604, 0.839),
            water_dark: Color::rgb(0.059, 0.149, 0.380),
            hot: Color::rgb(0.890, 0.231, 0.133),
            cold: Color::rgb(0.196, 0.408, 0.894),
            tree: Color::rgb(0.082, 0.275, 0.110),
            stone_light: Color::rgb(0.863, 0.863, 0.847),
            stone_dark: Color::rgb(0.420, 0.400, 0.384),
        }
    }
}

/// Complete terrain configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainParameters {
    pub land_mask: NoiseFieldConfig,
    pub elevation: NoiseFieldConfig,
    pub moisture: NoiseFieldConfig,
    /// Land-mask values strictly above this are land.
    pub sea_level: f32,
    /// Canvas pixels per unit of noise space. Must be positive.
    pub scale: f32,
    /// Fraction of forest pixels drawn as trees, 0–1.
    pub tree_percent: f32,
    /// Elevation (0–1) above which land is drawn as bare stone.
    pub mountain_height: f32,
    /// Exponent shaping the equator-to-pole temperature falloff.
    pub lat_falloff: f32,
    /// Seed of the tree-placement white noise.
    pub tree_seed: i32,
    pub thresholds: Thresholds,
    pub colors: SurfaceColors,
    pub biomes: BiomePalette,
}

impl Default for TerrainParameters {
    fn default() -> Self {
        let fractal = |seed, octaves, frequency| NoiseFieldConfig {
            noise_kind: NoiseKind::PerlinFractal,
            fractal_kind: FractalKind::Fbm,
            seed,
            octaves,
            frequency,
            ..NoiseFieldConfig::default()
        };
        Self {
            land_mask: fractal(1337, 5, 1.0),
            elevation: fractal(2024, 6, 2.0),
            moisture: NoiseFieldConfig {
                noise_kind: NoiseKind::SimplexFractal,
                ..fractal(7331, 4, 1.5)
            },
            sea_level: 0.0,
            scale: 100.0,
            tree_percent: 0.25,
            mountain_height: 0.75,
            lat_falloff: 1.5,
            tree_seed: 1337,
            thresholds: Thresholds::default(),
            colors: SurfaceColors::default(),
            biomes: BiomePalette::default(),
        }
    }
}

impl TerrainParameters {
    /// Check everything generation relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(ConfigError::NonPositiveScale(self.scale));
        }
        self.thresholds.validate()?;
        for noise in [&self.land_mask, &self.elevation, &self.moisture] {
            noise.validate()?;
        }
        Ok(())
    }

    /// Read a `Terrain` parameter-file section. `tree_seed` is optional;
    /// every other parameter is required.
    pub fn from_bundle(p: &GeneratorParameters) -> Result<Self, ConfigError> {
        let params = Self {
            land_mask: p.noise("land_mask")?,
            elevation: p.noise("elevation")?,
            moisture: p.noise("moisture")?,
            sea_level: p.float("sea_level")?,
            scale: p.float("scale")?,
            tree_percent: p.float("tree_percent")?,
            mountain_height: p.float("mountain_height")?,
            lat_falloff: p.float("lat_falloff")?,
            tree_seed: p.int_or("tree_seed", 1337)?,
            thresholds: Thresholds {
                t1: p.float("t1")?,
                t2: p.float("t2")?,
                t3: p.float("t3")?,
                m1: p.float("m1")?,
                m2: p.float("m2")?,
                m3: p.float("m3")?,
            },
            colors: SurfaceColors {
                land_light: p.color("land_light")?,
                land_dark: p.color("land_dark")?,
                water_light: p.color("water_light")?,
                water_dark: p.color("water_dark")?,
                hot: p.color("hot")?,
                cold: p.color("cold")?,
                tree: p.color("tree")?,
                stone_light: p.color("stone_light")?,
                stone_dark: p.color("stone_dark")?,
            },
            biomes: BiomePalette {
                tundra: p.color("tundra")?,
                boreal: p.color("boreal")?,
                boreal_barren: p.color("boreal_barren")?,
                temperate: p.color("temperate")?,
                savanna: p.color("savanna")?,
                grassland: p.color("grassland")?,
                desert: p.color("desert")?,
                rainforest: p.color("rainforest")?,
            },
        };
        params.validate()?;
        Ok(params)
    }

    /// Inverse of [`Self::from_bundle`]. Colours are rounded to 8 bits.
    pub fn to_bundle(&self) -> Result<GeneratorParameters, ConfigError> {
        let mut p = GeneratorParameters::new();
        p.set_noise("land_mask", &self.land_mask)?;
        p.set_noise("elevation", &self.elevation)?;
        p.set_noise("moisture", &self.moisture)?;
        p.set_int("tree_seed", self.tree_seed);
        for (name, v) in [
            ("sea_level", self.sea_level),
            ("scale", self.scale),
            ("tree_percent", self.tree_percent),
            ("mountain_height", self.mountain_height),
            ("lat_falloff", self.lat_falloff),
            ("t1", self.thresholds.t1),
            ("t2", self.thresholds.t2),
            ("t3", self.thresholds.t3),
            ("m1", self.thresholds.m1),
            ("m2", self.thresholds.m2),
            ("m3", self.thresholds.m3),
        ] {
            p.set_float(name, v);
        }
        let c = &self.colors;
        let b = &self.biomes;
        for (name, color) in [
            ("land_light", c.land_light),
            ("land_dark", c.land_dark),
            ("water_light", c.water_light),
            ("water_dark", c.water_dark),
            ("hot", c.hot),
            ("cold", c.cold),
            ("tree", c.tree),
            ("stone_light", c.stone_light),
            ("stone_dark", c.stone_dark),
            ("tundra", b.tundra),
            ("boreal", b.boreal),
            ("boreal_barren", b.boreal_barren),
            ("temperate", b.temperate),
            ("savanna", b.savanna),
            ("grassland", b.grassland),
            ("desert", b.desert),
            ("rainforest", b.rainforest),
        ] {
            p.set_color(name, color);
        }
        Ok(p)
    }
}

/// Everything computed for one pixel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainPixel {
    /// Layer colours indexed by [`TerrainLayer::index`].
    pub colors: [Color; 6],
    /// `None` over water.
    pub biome: Option<Biome>,
}

impl TerrainPixel {
    #[inline]
    pub fn color(&self, layer: TerrainLayer) -> Color {
        self.colors[layer.index()]
    }
}

/// The terrain [`RegionGenerator`].
#[derive(Debug)]
pub struct TerrainSynthesizer {
    params: TerrainParameters,
    land_mask: NoiseField,
    elevation: NoiseField,
    moisture: NoiseField,
    trees: NoiseField,
}

impl TerrainSynthesizer {
    pub const NAME: &'static str = "Terrain";

    pub fn new(params: TerrainParameters) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            land_mask: NoiseField::new(params.land_mask)?,
            elevation: NoiseField::new(params.elevation)?,
            moisture: NoiseField::new(params.moisture)?,
            trees: NoiseField::white(params.tree_seed),
            params,
        })
    }

    /// Use caller-supplied fields instead of building them from the configs
    /// in `params`. Trees still come from `params.tree_seed`.
    pub fn with_fields(
        params: TerrainParameters,
        land_mask: NoiseField,
        elevation: NoiseField,
        moisture: NoiseField,
    ) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self { trees: NoiseField::white(params.tree_seed), params, land_mask, elevation, moisture })
    }

    pub fn parameters(&self) -> &TerrainParameters {
        &self.params
    }

    /// Replace the parameters and rebuild every field. On error the previous
    /// state is kept.
    pub fn set_parameters(&mut self, params: TerrainParameters) -> Result<(), ConfigError> {
        *self = Self::new(params)?;
        Ok(())
    }

    /// Compute all six layer colours for canvas pixel `(x, y)` on a canvas
    /// `canvas_height` rows tall.
    pub fn sample_pixel(&self, x: usize, y: usize, canvas_height: usize) -> TerrainPixel {
        let p = &self.params;
        let c = &p.colors;
        let sx = x as f64 / f64::from(p.scale);
        let sy = y as f64 / f64::from(p.scale);

        let land_mask = self.land_mask.sample(sx, sy) as f32;
        let is_land = land_mask > p.sea_level;
        if !is_land {
            let water = Color::blend(c.water_light, c.water_dark, 1.0 - land_mask);
            let mut colors = [Color::default(); 6];
            colors[TerrainLayer::Land.index()] = water;
            colors[TerrainLayer::Final.index()] = water;
            return TerrainPixel { colors, biome: None };
        }

        let land = Color::blend(c.land_dark, c.land_light, land_mask);

        let elevation = unit(self.elevation.sample(sx, sy) as f32);
        let elevation_color = Color::blend(Color::BLACK, Color::WHITE, elevation);

        let moisture = unit(self.moisture.sample(sx, sy) as f32);
        let moisture_color = Color::blend(c.water_light, c.water_dark, moisture);

        let temperature = (1.0 - elevation) + latitude(y, canvas_height).powf(p.lat_falloff);
        let temperature_color = Color::blend(c.cold, c.hot, temperature / 2.0);

        let biome = classify(temperature, moisture, &p.thresholds);
        let biome_color = p.biomes.color_of(biome);

        let mut final_color = Color::blend(biome_color, c.land_dark, elevation);
        if elevation > p.mountain_height {
            final_color = Color::blend(c.stone_dark, c.stone_light, elevation);
        } else if biome.has_trees() {
            let draw = unit(self.trees.sample(sx, sy) as f32);
            if draw <= p.tree_percent {
                final_color = c.tree;
            }
        }

        TerrainPixel {
            colors: [land, elevation_color, moisture_color, temperature_color, biome_color, final_color],
            biome: Some(biome),
        }
    }

    /// Fill `region` of every terrain layer in `outputs`, using
    /// `canvas_height` for latitude. Nothing is written if the region is not
    /// fully covered by `outputs`.
    pub fn generate_region(
        &self,
        region: Region,
        canvas_height: usize,
        outputs: &mut LayerSetMut<'_>,
    ) -> Result<(), GenerateError> {
        outputs.check(&region, LAYER_NAMES.len())?;
        for y in region.rows() {
            for x in region.columns() {
                let pixel = self.sample_pixel(x, y, canvas_height);
                for (layer, color) in pixel.colors.into_iter().enumerate() {
                    outputs.write(layer, x, y, color);
                }
            }
        }
        Ok(())
    }
}

/// 1 on the canvas's middle row, falling linearly to 0 at the top and bottom.
#[inline]
fn latitude(y: usize, canvas_height: usize) -> f32 {
    let half = canvas_height as f32 / 2.0;
    1.0 - (y as f32 - half).abs() / half
}

impl RegionGenerator for TerrainSynthesizer {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn layer_names(&self) -> &[&'static str] {
        &LAYER_NAMES
    }

    fn load_parameters(&mut self, params: &GeneratorParameters) -> Result<(), ConfigError> {
        let params = TerrainParameters::from_bundle(params)?;
        self.set_parameters(params)?;
        log::debug!(
            "terrain parameters loaded: scale={} sea_level={} mountain_height={}",
            self.params.scale,
            self.params.sea_level,
            self.params.mountain_height
        );
        Ok(())
    }

    fn generate(&self, region: Region, outputs: &mut LayerSetMut<'_>) -> Result<(), GenerateError> {
        let canvas_height = outputs.canvas().height;
        self.generate_region(region, canvas_height, outputs)
    }
}
