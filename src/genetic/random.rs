//! Random draws used by the genetic optimizer.

use rand::Rng;

/// Source of the integer draws the optimizer needs.
///
/// Every [`rand::Rng`] is a `RandomSource`, so a seeded `StdRng` gives
/// reproducible runs. Tests can implement the trait directly to script exact
/// sequences.
pub trait RandomSource {
    /// Uniform integer in `low..=high`.
    fn uniform_inclusive(&mut self, low: i32, high: i32) -> i32;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform_inclusive(&mut self, low: i32, high: i32) -> i32 {
        self.gen_range(low..=high)
    }

    fn index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}
