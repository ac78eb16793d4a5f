//! Deterministic random number generation for round setup.
//!
//! Round generation (targets, decoys, shuffles) draws from an injectable
//! RNG so tests can pin a seed and assert exact rounds. Production callers
//! use [`SessionRng::from_entropy`].
//!
//! Uses ChaCha8 for speed while keeping a high-quality uniform stream, and
//! a proper Fisher-Yates shuffle via `rand::seq::SliceRandom` rather than
//! comparator tricks, which are not uniform.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG owned by one engine instance.
///
/// Sessions never share an RNG; [`SessionRng::fork`] derives an
/// independent deterministic stream when a controller runs several
/// games from one master seed.
#[derive(Clone, Debug)]
pub struct SessionRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl SessionRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Create an RNG seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence, so one
    /// master seed can drive several game sessions reproducibly.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// Generate a random usize in the given range.
    pub fn gen_range(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place (Fisher-Yates).
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Draw `count` distinct elements without replacement, in random order.
    ///
    /// Returns `None` if the slice has fewer than `count` elements.
    /// Duplicates in the input are treated as distinct positions, so
    /// callers wanting distinct *values* must pass a deduplicated slice.
    #[must_use]
    pub fn sample_distinct<T: Clone>(&mut self, slice: &[T], count: usize) -> Option<Vec<T>> {
        if slice.len() < count {
            return None;
        }
        let mut pool: Vec<T> = slice.to_vec();
        pool.shuffle(&mut self.inner);
        pool.truncate(count);
        Some(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = SessionRng::new(42);
        let mut rng2 = SessionRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen_range(0..1000), rng2.gen_range(0..1000));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = SessionRng::new(1);
        let mut rng2 = SessionRng::new(2);

        let seq1: Vec<_> = (0..10).map(|_| rng1.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| rng2.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_produces_different_sequence() {
        let mut rng = SessionRng::new(42);
        let mut forked = rng.fork();

        let seq1: Vec<_> = (0..10).map(|_| rng.gen_range(0..1000)).collect();
        let seq2: Vec<_> = (0..10).map(|_| forked.gen_range(0..1000)).collect();

        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_fork_is_deterministic() {
        let mut rng1 = SessionRng::new(42);
        let mut rng2 = SessionRng::new(42);

        let forked1 = rng1.fork();
        let forked2 = rng2.fork();

        assert_eq!(forked1.seed, forked2.seed);
    }

    #[test]
    fn test_shuffle_permutes() {
        let mut rng = SessionRng::new(42);
        let mut data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
        let original = data.clone();

        rng.shuffle(&mut data);

        assert_eq!(data.len(), original.len());
        assert_ne!(data, original);

        data.sort();
        assert_eq!(data, original);
    }

    #[test]
    fn test_choose() {
        let mut rng = SessionRng::new(42);
        let items = vec![1, 2, 3, 4, 5];

        let chosen = rng.choose(&items);
        assert!(chosen.is_some());
        assert!(items.contains(chosen.unwrap()));

        let empty: Vec<i32> = vec![];
        assert!(rng.choose(&empty).is_none());
    }

    #[test]
    fn test_sample_distinct() {
        let mut rng = SessionRng::new(42);
        let pool = vec![10, 20, 30, 40, 50];

        let sample = rng.sample_distinct(&pool, 3).unwrap();
        assert_eq!(sample.len(), 3);
        for value in &sample {
            assert!(pool.contains(value));
        }
        let mut sorted = sample.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(sorted.len(), 3);
    }

    #[test]
    fn test_sample_distinct_too_few() {
        let mut rng = SessionRng::new(42);
        assert!(rng.sample_distinct(&[1, 2], 3).is_none());
        assert!(rng.sample_distinct::<i32>(&[], 1).is_none());
        assert_eq!(rng.sample_distinct::<i32>(&[], 0), Some(vec![]));
    }
}
