//! Custom assertions for testing
//!
//! Provides assertion macros and functions for set-valued query results and
//! classified errors.

// Assertions are designed to panic on failure in test contexts
#![allow(clippy::missing_panics_doc)]

use std::collections::BTreeSet;
use std::fmt::Debug;

/// Assert that an error contains a specific substring
///
/// # Examples
///
/// ```
/// let result: Result<(), String> = Err("role not found: 'editor'".to_string());
/// corebac_common::assert_error_contains!(result, "not found");
/// ```
#[macro_export]
macro_rules! assert_error_contains {
    ($result:expr, $substring:expr) => {
        match &$result {
            Ok(_) => panic!("Expected error but got Ok"),
            Err(e) => {
                let error_msg = format!("{}", e);
                assert!(
                    error_msg.contains($substring),
                    "Error message '{}' does not contain '{}'",
                    error_msg,
                    $substring
                );
            }
        }
    };
}

/// Assert that an error is of a specific kind, using an accessor closure to
/// extract the kind.
///
/// Only the enum discriminant is compared, so payloads may differ.
///
/// # Examples
///
/// ```
/// #[derive(Debug)]
/// enum Kind {
///     Missing(&'static str),
///     Duplicate,
/// }
///
/// let result: Result<(), Kind> = Err(Kind::Missing("alice"));
/// corebac_common::assert_error_kind!(result, Kind::Missing(""), |err: &Kind| match err {
///     Kind::Missing(id) => Kind::Missing(*id),
///     Kind::Duplicate => Kind::Duplicate,
/// });
/// ```
#[macro_export]
macro_rules! assert_error_kind {
    ($result:expr, $expected_kind:expr, $kind_accessor:expr $(,)?) => {{
        match &$result {
            Ok(_) => panic!("Expected error but got Ok"),
            Err(e) => {
                let actual_kind = $kind_accessor(e);
                let expected_kind = $expected_kind;
                assert_eq!(
                    std::mem::discriminant(&actual_kind),
                    std::mem::discriminant(&expected_kind),
                    "Error kind mismatch: expected {:?}, got {:?}",
                    expected_kind,
                    actual_kind
                );
            }
        }
    }};
}

/// Assert that `subset` ⊆ `superset`, reporting the offending elements
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
///
/// use corebac_common::testing::assertions::assert_subset;
///
/// let active: BTreeSet<_> = ["editor"].into_iter().collect();
/// let assigned: BTreeSet<_> = ["editor", "viewer"].into_iter().collect();
/// assert_subset(&active, &assigned);
/// ```
pub fn assert_subset<T>(subset: &BTreeSet<T>, superset: &BTreeSet<T>)
where
    T: Ord + Debug,
{
    let extra: Vec<&T> = subset.difference(superset).collect();
    assert!(extra.is_empty(), "Elements {:?} are not contained in {:?}", extra, superset);
}

/// Assert that two sets share no element
///
/// # Examples
///
/// ```
/// use std::collections::BTreeSet;
///
/// use corebac_common::testing::assertions::assert_disjoint;
///
/// let left: BTreeSet<_> = [1, 2].into_iter().collect();
/// let right: BTreeSet<_> = [3].into_iter().collect();
/// assert_disjoint(&left, &right);
/// ```
pub fn assert_disjoint<T>(left: &BTreeSet<T>, right: &BTreeSet<T>)
where
    T: Ord + Debug,
{
    let shared: Vec<&T> = left.intersection(right).collect();
    assert!(shared.is_empty(), "Sets unexpectedly share {:?}", shared);
}
