//! Randomness sources
//!
//! The generator and the propagator never touch a global RNG. Every run is
//! handed a `RandomSource`, which keeps runs independent and lets tests
//! replay a fixed sequence of draws.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The three draws the engine needs
pub trait RandomSource {
    /// Uniform integer in the closed interval `[lower, upper]`
    fn int_in_range(&mut self, lower: i64, upper: i64) -> i64;

    /// `amount` distinct indices in `0..len`, sampled without replacement.
    /// `amount` is clamped to `len`.
    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize>;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn choose_index(&mut self, len: usize) -> usize;
}

/// Sample `amount` distinct items from `items` without replacement
pub fn sample_from<T, R>(rng: &mut R, items: &[T], amount: usize) -> Vec<T>
where
    T: Copy,
    R: RandomSource + ?Sized,
{
    rng.sample_indices(items.len(), amount)
        .into_iter()
        .map(|i| items[i])
        .collect()
}

/// Pick one item uniformly, or `None` when `items` is empty
pub fn choose_from<T, R>(rng: &mut R, items: &[T]) -> Option<T>
where
    T: Copy,
    R: RandomSource + ?Sized,
{
    if items.is_empty() {
        return None;
    }
    Some(items[rng.choose_index(items.len())])
}

/// `RandomSource` backed by the standard rand generator
#[derive(Debug, Clone)]
pub struct EntropySource {
    rng: StdRng,
}

impl EntropySource {
    /// Seeded from OS entropy; every run differs
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    /// Reproducible source, same seed gives the same draws
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl RandomSource for EntropySource {
    fn int_in_range(&mut self, lower: i64, upper: i64) -> i64 {
        debug_assert!(lower <= upper, "reversed range [{}, {}]", lower, upper);
        if lower >= upper {
            return lower;
        }
        self.rng.gen_range(lower..=upper)
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut self.rng, len, amount.min(len)).into_vec()
    }

    fn choose_index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0, "choose_index on empty set");
        self.rng.gen_range(0..len.max(1))
    }
}

/// Always takes the lowest option: range minimum, first `k` items in
/// input order, first choice. Produces a fixed graph for a given request.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalSource;

impl RandomSource for MinimalSource {
    fn int_in_range(&mut self, lower: i64, upper: i64) -> i64 {
        debug_assert!(lower <= upper, "reversed range [{}, {}]", lower, upper);
        lower
    }

    fn sample_indices(&mut self, len: usize, amount: usize) -> Vec<usize> {
        (0..amount.min(len)).collect()
    }

    fn choose_index(&mut self, _len: usize) -> usize {
        0
    }
}
