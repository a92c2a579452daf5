//! Canvas and region addressing.
//! All coordinates are integer pixel positions on the full logical canvas.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Dimensions of the full logical raster. The height also drives latitude,
/// so it is needed even when only a sub-rectangle is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Canvas {
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn area(&self) -> usize {
        self.width * self.height
    }

    /// The region covering the whole canvas.
    pub fn full_region(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// True if `region` lies entirely inside the canvas.
    pub fn contains(&self, region: &Region) -> bool {
        region.start_x <= region.end_x
            && region.start_y <= region.end_y
            && region.end_x <= self.width
            && region.end_y <= self.height
    }
}

/// Half-open rectangle `[start_x, end_x) × [start_y, end_y)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub start_x: usize,
    pub start_y: usize,
    pub end_x: usize,
    pub end_y: usize,
}

impl Region {
    pub fn new(start_x: usize, start_y: usize, end_x: usize, end_y: usize) -> Self {
        Self { start_x, start_y, end_x, end_y }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.end_x.saturating_sub(self.start_x)
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.end_y.saturating_sub(self.start_y)
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    pub fn columns(&self) -> Range<usize> {
        self.start_x..self.end_x
    }

    pub fn rows(&self) -> Range<usize> {
        self.start_y..self.end_y
    }

    /// Partition the region into non-overlapping tiles of at most
    /// `tile_width × tile_height`, row by row. Zero tile sizes are treated as 1.
    pub fn tiles(&self, tile_width: usize, tile_height: usize) -> impl Iterator<Item = Region> + '_ {
        let tw = tile_width.max(1);
        let th = tile_height.max(1);
        self.rows().step_by(th).flat_map(move |y0| {
            let y1 = (y0 + th).min(self.end_y);
            self.columns()
                .step_by(tw)
                .map(move |x0| Region::new(x0, y0, (x0 + tw).min(self.end_x), y1))
        })
    }
}
