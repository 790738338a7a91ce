//! Random number generation and shuffling for trial sampling.
//!
//! Every trial owns its own generator. Trial `i` of a run with base seed
//! `s` is seeded with `s + i` (wrapping), so a seeded run produces the
//! same thresholds whether its trials execute serially or in parallel.
//!
//! # Reproducibility
//!
//! The underlying algorithm (SmallRng) is deterministic for a given seed
//! on the same platform only; results need not match across platforms.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Creates a fast, seeded random number generator.
///
/// # Examples
/// ```
/// use u_percolation::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(42);
/// let x: f64 = rng.random();
/// assert!(x >= 0.0 && x < 1.0);
/// ```
pub fn create_rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Creates the generator for trial `index` of a run seeded with `base`.
pub fn trial_rng(base: u64, index: usize) -> SmallRng {
    create_rng(base.wrapping_add(index as u64))
}

/// Draws a fresh base seed from the thread-local entropy source.
pub fn entropy_seed() -> u64 {
    rand::rng().random()
}

/// Fisher-Yates (Durstenfeld) in-place shuffle.
///
/// Produces a uniformly random permutation: each of the n! permutations
/// is equally likely.
///
/// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.2, Algorithm P.
///
/// # Complexity
/// Time: O(n), Space: O(1) (in-place)
///
/// # Examples
/// ```
/// use u_percolation::random::{create_rng, shuffle};
/// let mut v = vec![1, 2, 3, 4, 5];
/// let mut rng = create_rng(42);
/// shuffle(&mut v, &mut rng);
/// v.sort();
/// assert_eq!(v, vec![1, 2, 3, 4, 5]);
/// ```
pub fn shuffle<T, R: Rng>(slice: &mut [T], rng: &mut R) {
    let n = slice.len();
    if n <= 1 {
        return;
    }
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        slice.swap(i, j);
    }
}
