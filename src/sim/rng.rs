//! Injectable randomness
//!
//! Pattern/theme choice, mission shuffles and baseline gate heights all draw
//! from a `RandomSource` so tests can script the sequence.

use rand::rngs::ThreadRng;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform random source
pub trait RandomSource {
    /// Next value in `[0, 1)`
    fn unit(&mut self) -> f32;

    /// Uniform value in `[lo, hi)`
    fn range(&mut self, lo: f32, hi: f32) -> f32 {
        lo + self.unit() * (hi - lo)
    }

    /// Uniform index in `0..len` (`len` must be non-zero)
    fn index(&mut self, len: usize) -> usize {
        debug_assert!(len > 0);
        ((self.unit() * len as f32) as usize).min(len.saturating_sub(1))
    }
}

impl RandomSource for ThreadRng {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

impl RandomSource for Pcg32 {
    fn unit(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Process-wide generator (not reproducible)
pub fn system_random() -> Box<dyn RandomSource> {
    Box::new(rand::rng())
}

/// Seeded generator for reproducible runs
pub fn seeded_random(seed: u64) -> Box<dyn RandomSource> {
    Box::new(Pcg32::seed_from_u64(seed))
}

/// Uniform value in `[lo, hi)` drawn from `rng`
#[inline]
pub fn range_random(rng: &mut dyn RandomSource, lo: f32, hi: f32) -> f32 {
    rng.range(lo, hi)
}

/// Pick a uniformly random element, `None` for an empty slice
pub fn choose<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(rng.index(items.len()))
}

/// In-place Fisher-Yates shuffle
pub fn shuffle<T>(rng: &mut dyn RandomSource, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.index(i + 1);
        items.swap(i, j);
    }
}

/// Replays a fixed list of unit values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v.clamp(0.0, 0.999_999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_bounds() {
        let mut rng = ScriptedRandom::new(vec![0.0, 0.5, 0.999_999]);
        assert_eq!(range_random(&mut rng, 70.0, 380.0), 70.0);
        assert_eq!(range_random(&mut rng, 70.0, 380.0), 225.0);
        assert!(range_random(&mut rng, 70.0, 380.0) < 380.0);
    }

    #[test]
    fn test_index_stays_in_bounds() {
        let mut rng = ScriptedRandom::new(vec![0.999_999]);
        assert_eq!(rng.index(4), 3);
        assert_eq!(rng.index(1), 0);
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = seeded_random(7);
        let mut items = vec![1, 2, 3, 4];
        shuffle(rng.as_mut(), &mut items);
        let mut sorted = items.clone();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_seeded_is_reproducible() {
        let mut a = seeded_random(99);
        let mut b = seeded_random(99);
        for _ in 0..16 {
            assert_eq!(a.unit(), b.unit());
        }
    }

    #[test]
    fn test_choose_empty() {
        let mut rng = ScriptedRandom::new(vec![0.3]);
        let empty: [u8; 0] = [];
        assert!(choose(&mut rng, &empty).is_none());
        assert_eq!(choose(&mut rng, &[10, 20, 30]), Some(&10));
    }
}
