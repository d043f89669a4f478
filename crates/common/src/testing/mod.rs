//! Testing utilities and helpers
//!
//! This module provides testing utilities shared by the workspace's test
//! suites:
//! - **[`assertions`]**: Custom assertions for set-valued and error results
//! - **[`fixtures`]**: Deterministic seeded RNGs and random subsets
//!
//! ## Usage
//!
//! ```rust
//! use corebac_common::testing::fixtures::{seeded_rng, random_subset};
//!
//! let mut rng = seeded_rng(7);
//! let picked = random_subset(&mut rng, &["a", "b", "c"], 0.5);
//! assert!(picked.len() <= 3);
//! ```

pub mod assertions;
pub mod fixtures;

// Re-export commonly used items
// Note: Macros exported with #[macro_export] are available at crate root
pub use assertions::{assert_disjoint, assert_subset};
pub use fixtures::{random_subset, seeded_rng};
