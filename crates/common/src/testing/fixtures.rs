//! Test fixture generators
//!
//! All generators are seeded so randomized suites are reproducible: a
//! failing seed can be replayed exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build a deterministic RNG from a seed
///
/// # Examples
///
/// ```
/// use rand::Rng;
/// use corebac_common::testing::fixtures::seeded_rng;
///
/// let a: u32 = seeded_rng(42).gen();
/// let b: u32 = seeded_rng(42).gen();
/// assert_eq!(a, b);
/// ```
#[must_use]
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Pick each element of `items` independently with probability `density`
///
/// `density` is clamped to `[0.0, 1.0]`. Order of `items` is preserved.
///
/// # Examples
///
/// ```
/// use corebac_common::testing::fixtures::{random_subset, seeded_rng};
///
/// let mut rng = seeded_rng(1);
/// assert!(random_subset(&mut rng, &[1, 2, 3], 0.0).is_empty());
/// assert_eq!(random_subset(&mut rng, &[1, 2, 3], 1.0), vec![1, 2, 3]);
/// ```
pub fn random_subset<T: Clone, R: Rng>(rng: &mut R, items: &[T], density: f64) -> Vec<T> {
    let density = density.clamp(0.0, 1.0);
    items.iter().filter(|_| rng.gen_bool(density)).cloned().collect()
}
