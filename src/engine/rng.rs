//! Deterministic random number generation.
//!
//! Datasets are drawn from a PCG stream so a seed fully determines every
//! array a session will show. Unseeded sessions pick a seed from the OS
//! and report it, so any run can be replayed.

use rand::prelude::*;
use rand_pcg::Pcg64;

/// Seeded generator for bar heights.
#[derive(Debug, Clone)]
pub struct SortRng {
    /// Seed the stream was created from.
    seed: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl SortRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg64::seed_from_u64(seed),
        }
    }

    /// Create an RNG from an optional seed, falling back to OS entropy.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        Self::new(seed.unwrap_or_else(rand::random))
    }

    /// Get the seed.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a value in the half-open range `[min, max)`.
    ///
    /// Returns `min` when the range is empty.
    pub fn gen_range_u32(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.rng.gen_range(min..max)
    }
}
