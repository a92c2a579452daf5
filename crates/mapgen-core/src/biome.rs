//! Temperature/moisture → biome classification and biome colours.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Biome {
    Tundra,
    BorealForest,
    BorealBarren,
    TemperateForest,
    /// Has a colour but no rule in [`classify`] selects it.
    Savanna,
    GrassLand,
    Desert,
    Rainforest,
}

impl Biome {
    pub const ALL: [Biome; 8] = [
        Biome::Tundra,
        Biome::BorealForest,
        Biome::BorealBarren,
        Biome::TemperateForest,
        Biome::Savanna,
        Biome::GrassLand,
        Biome::Desert,
        Biome::Rainforest,
    ];

    /// Forested biomes get the tree overlay.
    pub fn has_trees(self) -> bool {
        matches!(self, Biome::BorealForest | Biome::TemperateForest)
    }
}

/// Band boundaries, all compared with `>=`.
///
/// `t1`/`t2`/`t3` open the tropical, temperate and subarctic bands (below
/// `t3` is arctic); `m1 >= m2 >= m3` split each band by moisture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub t1: f32,
    pub t2: f32,
    pub t3: f32,
    pub m1: f32,
    pub m2: f32,
    pub m3: f32,
}

impl Thresholds {
    /// Both triples must be non-increasing and free of NaN.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ordered = |v: [f32; 3]| v[0] >= v[1] && v[1] >= v[2];
        let temperature = [self.t1, self.t2, self.t3];
        if !ordered(temperature) {
            return Err(ConfigError::ThresholdOrder { name: "temperature", values: temperature });
        }
        let moisture = [self.m1, self.m2, self.m3];
        if !ordered(moisture) {
            return Err(ConfigError::ThresholdOrder { name: "moisture", values: moisture });
        }
        Ok(())
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self { t1: 1.45, t2: 1.05, t3: 0.7, m1: 0.6, m2: 0.45, m3: 0.3 }
    }
}

/// Classify a land pixel. Total: every input pair, NaN included, maps to
/// exactly one biome.
pub fn classify(temperature: f32, moisture: f32, t: &Thresholds) -> Biome {
    if temperature >= t.t1 {
        // tropical
        if moisture >= t.m1 {
            Biome::Rainforest
        } else if moisture >= t.m2 {
            Biome::TemperateForest
        } else if moisture >= t.m3 {
            Biome::GrassLand
        } else {
            Biome::Desert
        }
    } else if temperature >= t.t2 {
        // temperate
        if moisture >= t.m1 {
            Biome::TemperateForest
        } else if moisture >= t.m3 {
            Biome::GrassLand
        } else {
            Biome::Desert
        }
    } else if temperature >= t.t3 {
        // subarctic
        if moisture >= t.m2 {
            Biome::BorealForest
        } else {
            Biome::BorealBarren
        }
    } else {
        Biome::Tundra
    }
}

/// One representative colour per biome.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomePalette {
    pub tundra: Color,
    pub boreal: Color,
    pub boreal_barren: Color,
    pub temperate: Color,
    pub savanna: Color,
    pub grassland: Color,
    pub desert: Color,
    pub rainforest: Color,
}

impl BiomePalette {
    pub fn color_of(&self, biome: Biome) -> Color {
        match biome {
            Biome::Tundra => self.tundra,
            Biome::BorealForest => self.boreal,
            Biome::BorealBarren => self.boreal_barren,
            Biome::TemperateForest => self.temperate,
            Biome::Savanna => self.savanna,
            Biome::GrassLand => self.grassland,
            Biome::Desert => self.desert,
            Biome::Rainforest => self.rainforest,
        }
    }
}

impl Default for BiomePalette {
    fn default() -> Self {
        Self {
            tundra: Color::rgb(0.867, 0.867, 0.894),
            boreal: Color::rgb(0.204, 0.349, 0.251),
            boreal_barren: Color::rgb(0.549, 0.588, 0.486),
            temperate: Color::rgb(0.263, 0.510, 0.243),
            savanna: Color::rgb(0.663, 0.643, 0.318),
            grassland: Color::rgb(0.455, 0.659, 0.314),
            desert: Color::rgb(0.867, 0.788, 0.557),
            rainforest: Color::rgb(0.086, 0.420, 0.180),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn thresholds() -> Thresholds {
        Thresholds { t1: 0.6, t2: 0.3, t3: 0.0, m1: 0.6, m2: 0.3, m3: 0.0 }
    }

    #[test]
    fn decision_table() {
        let t = thresholds();
        let cases = [
            // tropical
            (0.6, 0.6, Biome::Rainforest),
            (1.9, 0.59, Biome::TemperateForest),
            (0.7, 0.3, Biome::TemperateForest),
            (0.7, 0.1, Biome::GrassLand),
            (0.7, -0.1, Biome::Desert),
            // temperate
            (0.3, 0.9, Biome::TemperateForest),
            (0.5, 0.4, Biome::GrassLand),
            (0.5, 0.0, Biome::GrassLand),
            (0.5, -0.01, Biome::Desert),
            // subarctic
            (0.0, 0.3, Biome::BorealForest),
            (0.2, 0.29, Biome::BorealBarren),
            (0.2, -5.0, Biome::BorealBarren),
            // arctic
            (-0.01, 1.0, Biome::Tundra),
            (-3.0, -3.0, Biome::Tundra),
        ];
        for (temperature, moisture, expected) in cases {
            assert_eq!(classify(temperature, moisture, &t), expected, "t={temperature} m={moisture}");
        }
    }

    #[test]
    fn classification_is_total_and_never_savanna() {
        let t = thresholds();
        let mut seen = std::collections::HashSet::new();
        for ti in -20..=60 {
            for mi in -20..=40 {
                let b = classify(ti as f32 * 0.05, mi as f32 * 0.05, &t);
                assert!(Biome::ALL.contains(&b));
                seen.insert(b);
            }
        }
        for b in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            assert!(Biome::ALL.contains(&classify(b, 0.5, &t)));
            assert!(Biome::ALL.contains(&classify(0.5, b, &t)));
        }
        assert!(!seen.contains(&Biome::Savanna));
        assert_eq!(seen.len(), 7);
    }

    #[test]
    fn only_forests_have_trees() {
        for b in Biome::ALL {
            let expected = b == Biome::BorealForest || b == Biome::TemperateForest;
            assert_eq!(b.has_trees(), expected, "{b:?}");
        }
    }

    #[test]
    fn palette_lookup_is_distinct_per_biome() {
        let p = BiomePalette::default();
        for (i, a) in Biome::ALL.iter().enumerate() {
            for b in &Biome::ALL[i + 1..] {
                assert_ne!(p.color_of(*a), p.color_of(*b), "{a:?} and {b:?} share a colour");
            }
        }
        assert_eq!(p.color_of(Biome::Desert), p.desert);
    }

    #[test]
    fn threshold_ordering_is_validated() {
        assert!(thresholds().validate().is_ok());
        assert!(Thresholds { t1: 0.3, t2: 0.3, t3: 0.3, ..thresholds() }.validate().is_ok());
        let err = Thresholds { t2: 0.7, ..thresholds() }.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOrder { name: "temperature", .. }));
        let err = Thresholds { m3: 0.31, ..thresholds() }.validate().unwrap_err();
        assert!(matches!(err, ConfigError::ThresholdOrder { name: "moisture", .. }));
        assert!(Thresholds { m2: f32::NAN, ..thresholds() }.validate().is_err());
    }
}
