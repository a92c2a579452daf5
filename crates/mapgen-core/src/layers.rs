//! Output rasters: one named, row-major colour buffer per layer.
//!
//! The driver owns a [`LayerSet`] sized to the full canvas. Generators write
//! through a [`LayerSetMut`], a view of a contiguous band of rows across all
//! layers. Disjoint bands can be written concurrently without locking.

use std::ops::Range;

use crate::color::Color;
use crate::error::GenerateError;
use crate::region::{Canvas, Region};

/// A single full-canvas layer.
#[derive(Debug, Clone, PartialEq)]
pub struct Raster {
    pub data: Vec<Color>,
    pub width: usize,
    pub height: usize,
}

impl Raster {
    pub fn new(width: usize, height: usize, fill: Color) -> Self {
        Self { data: vec![fill; width * height], width, height }
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Color {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Color) {
        self.data[y * self.width + x] = color;
    }

    /// Packed RGBA bytes, row-major, for handing to a display.
    pub fn to_rgba8(&self) -> Vec<u8> {
        self.data.iter().flat_map(|c| c.to_rgba8()).collect()
    }

    /// Per-channel mean over every pixel.
    pub fn mean_color(&self) -> Color {
        if self.data.is_empty() {
            return Color::default();
        }
        let n = self.data.len() as f64;
        let mut sum = [0.0f64; 4];
        for c in &self.data {
            sum[0] += f64::from(c.r);
            sum[1] += f64::from(c.g);
            sum[2] += f64::from(c.b);
            sum[3] += f64::from(c.a);
        }
        Color {
            r: (sum[0] / n) as f32,
            g: (sum[1] / n) as f32,
            b: (sum[2] / n) as f32,
            a: (sum[3] / n) as f32,
        }
    }
}

/// Ordered, named layers covering one canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerSet {
    canvas: Canvas,
    names: Vec<String>,
    rasters: Vec<Raster>,
}

impl LayerSet {
    /// Allocate one raster per name, filled with the default colour.
    pub fn new<S: AsRef<str>>(canvas: Canvas, names: &[S]) -> Self {
        Self {
            canvas,
            names: names.iter().map(|n| n.as_ref().to_owned()).collect(),
            rasters: names
                .iter()
                .map(|_| Raster::new(canvas.width, canvas.height, Color::default()))
                .collect(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.rasters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rasters.is_empty()
    }

    pub fn layer(&self, index: usize) -> Option<&Raster> {
        self.rasters.get(index)
    }

    pub fn layer_by_name(&self, name: &str) -> Option<&Raster> {
        self.names.iter().position(|n| n == name).and_then(|i| self.rasters.get(i))
    }

    /// `(name, raster)` pairs in layer order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Raster)> {
        self.names.iter().map(String::as_str).zip(self.rasters.iter())
    }

    /// Reset every pixel of every layer.
    pub fn fill(&mut self, color: Color) {
        for raster in &mut self.rasters {
            raster.data.fill(color);
        }
    }

    /// Writable view of the whole canvas.
    pub fn view_mut(&mut self) -> LayerSetMut<'_> {
        LayerSetMut {
            canvas: self.canvas,
            rows: 0..self.canvas.height,
            layers: self.rasters.iter_mut().map(|r| r.data.as_mut_slice()).collect(),
        }
    }

    /// Split into disjoint views of `band_height` full-width rows (the last
    /// band may be shorter). Zero is treated as 1.
    pub fn bands_mut(&mut self, band_height: usize) -> Vec<LayerSetMut<'_>> {
        let canvas = self.canvas;
        let band_height = band_height.max(1);
        if canvas.area() == 0 {
            return Vec::new();
        }
        let mut chunks: Vec<_> = self
            .rasters
            .iter_mut()
            .map(|r| r.data.chunks_mut(band_height * canvas.width))
            .collect();
        (0..canvas.height)
            .step_by(band_height)
            .map(|start| LayerSetMut {
                canvas,
                rows: start..(start + band_height).min(canvas.height),
                layers: chunks.iter_mut().filter_map(Iterator::next).collect(),
            })
            .collect()
    }
}

/// Mutable view over rows `rows` of every layer in a [`LayerSet`].
#[derive(Debug)]
pub struct LayerSetMut<'a> {
    canvas: Canvas,
    rows: Range<usize>,
    layers: Vec<&'a mut [Color]>,
}

impl LayerSetMut<'_> {
    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Canvas rows covered by this view.
    pub fn rows(&self) -> Range<usize> {
        self.rows.clone()
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Region spanning every pixel this view can write.
    pub fn region(&self) -> Region {
        Region::new(0, self.rows.start, self.canvas.width, self.rows.end)
    }

    /// Check that `region` can be written with `layers` layers.
    pub fn check(&self, region: &Region, layers: usize) -> Result<(), GenerateError> {
        if !self.canvas.contains(region) {
            return Err(GenerateError::RegionOutOfBounds { region: *region, canvas: self.canvas });
        }
        if !region.is_empty() && (region.start_y < self.rows.start || region.end_y > self.rows.end) {
            return Err(GenerateError::RegionOutsideView {
                region: *region,
                rows_start: self.rows.start,
                rows_end: self.rows.end,
            });
        }
        if self.layers.len() < layers {
            return Err(GenerateError::LayerCount { expected: layers, found: self.layers.len() });
        }
        Ok(())
    }

    /// Write one pixel of one layer, in canvas coordinates.
    ///
    /// # Panics
    /// If `(x, y)` is outside the view or `layer` does not exist; call
    /// [`Self::check`] on the region first.
    #[inline]
    pub fn write(&mut self, layer: usize, x: usize, y: usize, color: Color) {
        debug_assert!(x < self.canvas.width && self.rows.contains(&y));
        let idx = (y - self.rows.start) * self.canvas.width + x;
        self.layers[layer][idx] = color;
    }
}
