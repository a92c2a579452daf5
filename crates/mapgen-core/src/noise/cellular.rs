//! Cellular (Worley) noise that can be shared between worker threads.
//!
//! `noise::Worley` keeps its distance function behind an `Rc`, so it cannot
//! live in a `Send + Sync` sampler. This holds only the permutation table and
//! calls the same 2D kernel with a plain function pointer.

use std::fmt;

use ::noise::core::worley::{distance_functions, worley_2d, ReturnType};
use ::noise::permutationtable::PermutationTable;
use ::noise::NoiseFn;

/// Value of the nearest feature point's cell, Euclidean distance.
#[derive(Clone)]
pub struct CellularNoise {
    seed: u32,
    perm_table: PermutationTable,
}

impl CellularNoise {
    pub fn new(seed: u32) -> Self {
        Self { seed, perm_table: PermutationTable::new(seed) }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl fmt::Debug for CellularNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CellularNoise").field("seed", &self.seed).finish_non_exhaustive()
    }
}

impl NoiseFn<f64, 2> for CellularNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        worley_2d(&self.perm_table, distance_functions::euclidean, ReturnType::Value, point.into())
    }
}
