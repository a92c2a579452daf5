//! Coordinate-hash white noise.
//!
//! Every distinct coordinate maps to an independent value in [-1, 1); nearby
//! coordinates are uncorrelated. Used for per-pixel scatter decisions.

use ::noise::NoiseFn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WhiteNoise {
    seed: u32,
}

impl WhiteNoise {
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

#[inline]
fn mix(mut h: u64) -> u64 {
    h ^= h >> 33;
    h = h.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    h ^= h >> 33;
    h = h.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    h ^ (h >> 33)
}

impl NoiseFn<f64, 2> for WhiteNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        let mut h = u64::from(self.seed).wrapping_mul(0x9E37_79B9_7F4A_7C15);
        for c in point {
            // +0.0 folds -0.0 onto 0.0 so both hash alike.
            h = mix(h ^ (c + 0.0).to_bits());
        }
        // Top 53 bits → [0, 1) → [-1, 1).
        (h >> 11) as f64 / (1u64 << 53) as f64 * 2.0 - 1.0
    }
}
