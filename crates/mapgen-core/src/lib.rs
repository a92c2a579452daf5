//! Procedural 2D map synthesis.
//!
//! A [`RegionGenerator`] fills any rectangle of a canvas with a fixed set of
//! colour layers. The built-in [`TerrainSynthesizer`] derives land, elevation,
//! moisture, temperature, biome and composited layers from coherent noise.

pub mod biome;
pub mod color;
pub mod config;
pub mod error;
pub mod generator;
pub mod layers;
pub mod noise;
pub mod region;
pub mod remap;
pub mod terrain;
pub mod tiling;

pub use crate::biome::{Biome, BiomePalette, Thresholds};
pub use crate::color::{Color, Rgb8};
pub use crate::config::{GeneratorParameters, ParameterFile};
pub use crate::error::{ConfigError, GenerateError};
pub use crate::generator::{GeneratorRegistry, RegionGenerator};
pub use crate::layers::{LayerSet, LayerSetMut, Raster};
pub use crate::noise::{NoiseField, NoiseFieldConfig};
pub use crate::region::{Canvas, Region};
pub use crate::terrain::{TerrainLayer, TerrainParameters, TerrainSynthesizer};
pub use crate::tiling::{generate_full, generate_tiled, TileSize};
