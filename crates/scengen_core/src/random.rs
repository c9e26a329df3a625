//! Randomness sources and discrete sampling helpers.
//!
//! Every random draw made while generating a scenario goes through a single
//! [`RandomSource`] owned by the call. Supplying the same seeded source twice
//! replays the exact same sequence of decisions, including the nested OpFor
//! generation.
//!
//! All helpers here consume a fixed number of draws per call, which keeps the
//! draw sequence stable when callers add or remove candidates.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// A source of uniformly distributed floats in `[0, 1)`.
pub trait RandomSource {
    /// Draw the next value in `[0, 1)`.
    fn next_f64(&mut self) -> f64;
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for Box<T> {
    fn next_f64(&mut self) -> f64 {
        (**self).next_f64()
    }
}

/// Seeded ChaCha8 stream.
///
/// Reproducible across platforms for a given seed.
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// Create a source from an explicit seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded from the thread-local entropy generator.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// The seed this stream was created from.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_f64(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
///
/// Useful for replaying recorded decisions and for pinning individual
/// branches in tests. Values are clamped into `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceRandom {
    /// Create a source that yields `values` in order. An empty list yields `0.0`.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Number of draws taken so far.
    #[must_use]
    pub const fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn next_f64(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

/// Build the per-call source: seeded when `seed` is given, entropy otherwise.
#[must_use]
pub fn random_source(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(SeededRandom::from_entropy()),
    }
}

/// Uniform index into a collection of `len` items. One draw.
///
/// Returns `None` (without drawing) when `len` is zero.
pub fn pick_index(rng: &mut dyn RandomSource, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let idx = (rng.next_f64() * len as f64).floor() as usize;
    Some(idx.min(len - 1))
}

/// Uniform choice from a slice. One draw.
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    pick_index(rng, items.len()).map(|idx| &items[idx])
}

/// Uniform integer in the inclusive range `[min, max]`. One draw.
///
/// Bounds given in the wrong order are swapped.
pub fn int_in_range(rng: &mut dyn RandomSource, min: i32, max: i32) -> i32 {
    let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
    let span = i64::from(hi) - i64::from(lo) + 1;
    let offset = (rng.next_f64() * span as f64).floor() as i64;
    (i64::from(lo) + offset.min(span - 1)) as i32
}

/// Cumulative-weight walk over `weights`. One draw.
///
/// `roll = next × total`, then each positive weight is subtracted in order
/// until `roll ≤ 0`. Non-positive and non-finite weights are never selected.
/// If floating-point rounding leaves the roll above zero after the walk, the
/// last positive weight wins. Returns `None` (without drawing) when no weight
/// is positive.
pub fn sample_weighted(rng: &mut dyn RandomSource, weights: &[f64]) -> Option<usize> {
    let usable = |w: f64| w.is_finite() && w > 0.0;
    let total: f64 = weights.iter().copied().filter(|w| usable(*w)).sum();
    if total <= 0.0 {
        return None;
    }

    let mut roll = rng.next_f64() * total;
    let mut last = None;
    for (idx, &weight) in weights.iter().enumerate() {
        if !usable(weight) {
            continue;
        }
        last = Some(idx);
        roll -= weight;
        if roll <= 0.0 {
            return Some(idx);
        }
    }
    last
}
