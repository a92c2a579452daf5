use serde::{Deserialize, Serialize};

/// Normalised RGBA colour; every channel lies in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    /// Opaque colour from three channel intensities.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Convert an 8-bit configuration colour into normalised channels.
    pub fn from_rgb8(rgb: Rgb8) -> Self {
        let [r, g, b] = rgb.0;
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Nearest 8-bit colour, alpha dropped.
    pub fn to_rgb8(self) -> Rgb8 {
        Rgb8([to_byte(self.r), to_byte(self.g), to_byte(self.b)])
    }

    pub fn to_rgba8(self) -> [u8; 4] {
        [to_byte(self.r), to_byte(self.g), to_byte(self.b), to_byte(self.a)]
    }

    /// Linear interpolation from `low` (t = 0) to `high` (t = 1).
    ///
    /// `t` is clamped to [0, 1] first (NaN counts as 0), so noise values that
    /// stray marginally outside their nominal range never push a channel out
    /// of [0, 1].
    pub fn blend(low: Color, high: Color, t: f32) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let lerp = |a: f32, b: f32| a + (b - a) * t;
        Color {
            r: lerp(low.r, high.r),
            g: lerp(low.g, high.g),
            b: lerp(low.b, high.b),
            a: lerp(low.a, high.a),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Rgb8> for Color {
    fn from(rgb: Rgb8) -> Self {
        Self::from_rgb8(rgb)
    }
}

/// Integer-channel colour as it appears in parameter files: `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgb8(pub [u8; 3]);

fn to_byte(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}
