//! Noise field configuration as it appears in parameter files.
//!
//! Enum tags are accepted either by name (`"PerlinFractal"`) or by their
//! position in the declaration order (`3`), which is how older parameter
//! files store them. Names are matched case-insensitively, ignoring spaces
//! and underscores.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Largest octave count the fractal backends accept.
pub const MAX_OCTAVES: u32 = 32;

/// Raw enum tag from a parameter file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tag {
    Index(i64),
    Name(String),
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tag::Index(i) => write!(f, "{i}"),
            Tag::Name(s) => f.write_str(s),
        }
    }
}

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

macro_rules! config_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal {
            $($variant:ident => $tag:literal $(| $alias:literal)*),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "Tag", into = "Tag")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every variant in declaration (index) order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Canonical name used when writing parameter files.
            pub fn tag(self) -> &'static str {
                match self {
                    $($name::$variant => $tag),+
                }
            }

            fn matches(self, name: &str) -> bool {
                match self {
                    $($name::$variant => [$tag $(, $alias)*]
                        .iter()
                        .any(|t| normalize(t) == name)),+
                }
            }
        }

        impl TryFrom<Tag> for $name {
            type Error = ConfigError;

            fn try_from(tag: Tag) -> Result<Self, ConfigError> {
                let found = match &tag {
                    Tag::Index(i) => usize::try_from(*i)
                        .ok()
                        .and_then(|i| Self::ALL.get(i).copied()),
                    Tag::Name(s) => {
                        let wanted = normalize(s);
                        Self::ALL.iter().copied().find(|v| v.matches(&wanted))
                    }
                };
                found.ok_or_else(|| ConfigError::UnknownTag { kind: $label, tag: tag.to_string() })
            }
        }

        impl From<$name> for Tag {
            fn from(v: $name) -> Tag {
                Tag::Name(v.tag().to_owned())
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.tag())
            }
        }
    };
}

config_enum! {
    /// Base sampling algorithm.
    NoiseKind, "noise kind" {
        Value => "Value",
        ValueFractal => "ValueFractal",
        Perlin => "Perlin",
        PerlinFractal => "PerlinFractal",
        Simplex => "Simplex",
        SimplexFractal => "SimplexFractal",
        Cellular => "Cellular" | "Worley",
        White => "White" | "WhiteNoise",
        Cubic => "Cubic",
        CubicFractal => "CubicFractal",
    }
}

config_enum! {
    /// Value smoothing between lattice points.
    InterpolationKind, "interpolation kind" {
        Linear => "Linear",
        Hermite => "Hermite",
        Quintic => "Quintic",
    }
}

config_enum! {
    /// How octaves are combined for the `*Fractal` noise kinds.
    FractalKind, "fractal kind" {
        Fbm => "FBM",
        Billow => "Billow",
        RigidMulti => "RigidMulti" | "RidgedMulti",
    }
}

impl NoiseKind {
    /// True for the kinds that layer octaves of a base sampler.
    pub fn is_fractal(self) -> bool {
        matches!(
            self,
            NoiseKind::ValueFractal
                | NoiseKind::PerlinFractal
                | NoiseKind::SimplexFractal
                | NoiseKind::CubicFractal
        )
    }
}

/// Everything needed to build a [`super::NoiseField`]. Two fields built from
/// equal configs return identical values at every coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseFieldConfig {
    #[serde(rename = "noise_type")]
    pub noise_kind: NoiseKind,
    /// Round-tripped through parameter files but not used for sampling: the
    /// `noise` crate backends apply their own fixed smoothing.
    #[serde(rename = "interp_type")]
    pub interpolation: InterpolationKind,
    #[serde(rename = "fractal_type")]
    pub fractal_kind: FractalKind,
    pub seed: i32,
    /// Octave count for fractal kinds; ignored otherwise.
    pub octaves: u32,
    /// Multiplier applied to sample coordinates.
    pub frequency: f32,
    /// Per-octave amplitude decay (persistence).
    pub gain: f32,
    /// Per-octave frequency growth.
    pub lacunarity: f32,
}

impl Default for NoiseFieldConfig {
    fn default() -> Self {
        Self {
            noise_kind: NoiseKind::Simplex,
            interpolation: InterpolationKind::Quintic,
            fractal_kind: FractalKind::Fbm,
            seed: 1337,
            octaves: 3,
            frequency: 1.0,
            gain: 0.5,
            lacunarity: 2.0,
        }
    }
}

impl NoiseFieldConfig {
    /// Reject values no sampler can honour.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, v) in [
            ("frequency", self.frequency),
            ("gain", self.gain),
            ("lacunarity", self.lacunarity),
        ] {
            if !v.is_finite() {
                return Err(ConfigError::InvalidNoise(format!("{name} must be finite, got {v}")));
            }
        }
        if self.noise_kind.is_fractal() && self.octaves > MAX_OCTAVES {
            return Err(ConfigError::InvalidNoise(format!(
                "octaves must be at most {MAX_OCTAVES}, got {}",
                self.octaves
            )));
        }
        Ok(())
    }
}
