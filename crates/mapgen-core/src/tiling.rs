//! Tiled generation over a whole canvas.
//!
//! The canvas is cut into bands of `tile.height` rows; each band is filled
//! tile by tile from left to right. With the `threading` feature bands run on
//! the rayon pool. Bands never overlap, so workers write without locking, and
//! the result does not depend on scheduling.

#[cfg(feature = "threading")]
use rayon::prelude::*;

use serde::{Deserialize, Serialize};

use crate::error::GenerateError;
use crate::generator::RegionGenerator;
use crate::layers::{LayerSet, LayerSetMut};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileSize {
    pub width: usize,
    pub height: usize,
}

impl TileSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn square(side: usize) -> Self {
        Self::new(side, side)
    }
}

impl Default for TileSize {
    fn default() -> Self {
        Self::square(64)
    }
}

/// Fill every pixel of `layers` with `generator`, tile by tile.
pub fn generate_tiled(
    generator: &dyn RegionGenerator,
    layers: &mut LayerSet,
    tile: TileSize,
) -> Result<(), GenerateError> {
    let canvas = layers.canvas();
    let bands = layers.bands_mut(tile.height);
    log::debug!(
        "generating `{}` over {}×{} in {} band(s) of {}×{} tiles",
        generator.name(),
        canvas.width,
        canvas.height,
        bands.len(),
        tile.width.max(1),
        tile.height.max(1),
    );

    #[cfg(feature = "threading")]
    {
        bands
            .into_par_iter()
            .try_for_each(|mut band| fill_band(generator, &mut band, tile.width))
    }

    #[cfg(not(feature = "threading"))]
    {
        bands
            .into_iter()
            .try_for_each(|mut band| fill_band(generator, &mut band, tile.width))
    }
}

/// Fill the whole canvas with a single `generate` call.
pub fn generate_full(generator: &dyn RegionGenerator, layers: &mut LayerSet) -> Result<(), GenerateError> {
    let region = layers.canvas().full_region();
    generator.generate(region, &mut layers.view_mut())
}

fn fill_band(
    generator: &dyn RegionGenerator,
    band: &mut LayerSetMut<'_>,
    tile_width: usize,
) -> Result<(), GenerateError> {
    let region = band.region();
    for tile in region.tiles(tile_width, region.height()) {
        generator.generate(tile, band)?;
    }
    Ok(())
}
