//! Injectable random source.
//!
//! Everything random in the crate draws through [`RandomSource`] so tests can
//! script exact sequences and production runs can be replayed from a seed.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Uniform draws over closed real ranges and finite index sets
pub trait RandomSource {
    /// Uniform real in `[lo, hi]`. Returns `lo` when the range is empty.
    fn uniform(&mut self, lo: f32, hi: f32) -> f32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn choose_index(&mut self, len: usize) -> usize;

    /// Uniform pick from a slice, `None` when empty
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            None
        } else {
            items.get(self.choose_index(items.len()))
        }
    }
}

/// Seedable xoshiro256++ source. One instance per generation run.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: Xoshiro256PlusPlus,
}

impl SeededRandom {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededRandom {
    fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
        if hi <= lo {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    fn choose_index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len.max(1))
    }
}
