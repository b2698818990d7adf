//! Injectable randomness for the nondeterministic parts of scoring.
//!
//! Reason padding and profile statistics draw from a [`RandomSource`] passed
//! in by the caller. Production code uses [`ThreadSource`] or
//! [`SeededSource`]; tests replay exact values with [`SequenceSource`].

use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Supplier of uniform randomness.
pub trait RandomSource {
    /// Next value, uniform in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform index in `0..len`. `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        let idx = (self.next_unit() * len as f64) as usize;
        idx.min(len.saturating_sub(1))
    }

    /// Uniform integer in `low..=high`.
    fn range_inclusive(&mut self, low: u64, high: u64) -> u64 {
        if high <= low {
            return low;
        }
        let span = high - low + 1;
        let offset = (self.next_unit() * span as f64) as u64;
        low + offset.min(span - 1)
    }
}

/// Thread-local generator, the CLI default.
pub struct ThreadSource(ThreadRng);

impl ThreadSource {
    pub fn new() -> Self {
        Self(rand::thread_rng())
    }
}

impl Default for ThreadSource {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for ThreadSource {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Reproducible generator seeded from a `u64`.
pub struct SeededSource(StdRng);

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededSource {
    fn next_unit(&mut self) -> f64 {
        self.0.gen::<f64>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Values are clamped into `[0, 1)`. An empty list always yields `0.0`.
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f64>>) -> Self {
        Self {
            values: values.into(),
            cursor: 0,
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            self.cursor += 1;
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 0.999_999_999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_replays_and_cycles() {
        let mut src = SequenceSource::new(vec![0.1, 0.9]);
        assert_eq!(src.next_unit(), 0.1);
        assert_eq!(src.next_unit(), 0.9);
        assert_eq!(src.next_unit(), 0.1);
        assert_eq!(src.draws(), 3);
    }

    #[test]
    fn pick_index_stays_in_bounds() {
        let mut src = SequenceSource::new(vec![0.0, 0.5, 1.0]);
        assert_eq!(src.pick_index(4), 0);
        assert_eq!(src.pick_index(4), 2);
        assert_eq!(src.pick_index(4), 3);
    }

    #[test]
    fn range_inclusive_covers_both_ends() {
        let mut src = SequenceSource::new(vec![0.0, 1.0]);
        assert_eq!(src.range_inclusive(10, 20), 10);
        assert_eq!(src.range_inclusive(10, 20), 20);
        assert_eq!(src.range_inclusive(5, 5), 5);
    }

    #[test]
    fn seeded_source_is_reproducible() {
        let mut a = SeededSource::new(42);
        let mut b = SeededSource::new(42);
        for _ in 0..8 {
            assert_eq!(a.next_unit(), b.next_unit());
        }
    }

    #[test]
    fn thread_source_in_unit_interval() {
        let mut src = ThreadSource::new();
        for _ in 0..100 {
            let v = src.next_unit();
            assert!((0.0..1.0).contains(&v));
        }
    }
}
