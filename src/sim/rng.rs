//! Injectable randomness for spawn decisions
//!
//! The world generator only needs three kinds of draws. Any `rand::Rng`
//! provides them, and tests can substitute a scripted stream.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Source of the random draws used by world generation
pub trait RandomSource {
    /// Uniform value in [0, 1)
    fn unit(&mut self) -> f32;

    /// Uniform integer in [lo, hi] (inclusive). Returns `lo` when `hi < lo`.
    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32;

    /// Bernoulli trial: true with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.unit() < p
    }

    /// Uniform pick from a non-empty slice
    fn pick(&mut self, options: &[i32]) -> i32 {
        match options.len() {
            0 => 0,
            n => options[self.range_inclusive(0, n as i32 - 1) as usize],
        }
    }
}

impl<R: Rng> RandomSource for R {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }

    fn range_inclusive(&mut self, lo: i32, hi: i32) -> i32 {
        if hi < lo {
            return lo;
        }
        self.random_range(lo..=hi)
    }
}

/// Seeded generator used by the game
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}
