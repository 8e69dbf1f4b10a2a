//! Ordering, uniqueness and breadcrumb verification.
//!
//! Everything here is pure: values go in, `Ok(())` or an
//! [`ProbeError::AssertionFailed`] with the offending values comes out.
//! Callers attach the page URL with [`ProbeError::at_url`].

use crate::model::{Breadcrumb, Direction};
use crate::result::{ProbeError, ProbeResult};
use std::collections::HashSet;
use std::fmt::Debug;

/// Check that `keys` is monotonic in `direction`.
///
/// Ties are allowed; only a strict inversion of an adjacent pair fails.
pub fn verify_order<K: Ord + Debug>(
    keys: &[K],
    direction: Direction,
    what: &str,
) -> ProbeResult<()> {
    for (i, pair) in keys.windows(2).enumerate() {
        let in_order = match direction {
            Direction::Ascending => pair[0] <= pair[1],
            Direction::Descending => pair[0] >= pair[1],
        };
        if !in_order {
            return Err(ProbeError::assertion(
                format!("{what} not {direction} at positions {i} and {}", i + 1),
                format!("{:?} then a value {} it", pair[0], bound(direction)),
                format!("{:?} then {:?}", pair[0], pair[1]),
                "",
            ));
        }
    }
    Ok(())
}

const fn bound(direction: Direction) -> &'static str {
    match direction {
        Direction::Ascending => ">=",
        Direction::Descending => "<=",
    }
}

/// Check that names are in case-folded ascending order
pub fn verify_names_ascending<S: AsRef<str>>(names: &[S]) -> ProbeResult<()> {
    let folded: Vec<String> = names.iter().map(|n| n.as_ref().to_lowercase()).collect();
    verify_order(&folded, Direction::Ascending, "names")
}

/// Check that no name appears twice on one listing page
pub fn verify_unique_names<S: AsRef<str>>(names: &[S]) -> ProbeResult<()> {
    let mut seen = HashSet::with_capacity(names.len());
    for name in names {
        if !seen.insert(name.as_ref()) {
            return Err(ProbeError::assertion(
                "duplicate names on listing page",
                format!("{} distinct names", names.len()),
                format!("{:?} listed more than once", name.as_ref()),
                "",
            ));
        }
    }
    Ok(())
}

/// Check a breadcrumb trail against the labels of its ancestors
pub fn verify_breadcrumbs(actual: &[Breadcrumb], expected: &[&str]) -> ProbeResult<()> {
    let labels: Vec<&str> = actual.iter().map(|c| c.label.as_str()).collect();
    if labels != expected {
        return Err(ProbeError::assertion(
            "breadcrumb trail",
            format!("{expected:?}"),
            format!("{labels:?}"),
            "",
        ));
    }
    Ok(())
}

/// Collects sort keys page by page and re-checks the whole run.
///
/// A sort that holds on every page but breaks across a page boundary fails
/// on the push that crosses it.
#[derive(Debug, Clone)]
pub struct OrderAccumulator<K> {
    direction: Direction,
    what: String,
    keys: Vec<K>,
    pages: usize,
}

impl<K: Ord + Debug + Clone> OrderAccumulator<K> {
    /// Start an empty run
    #[must_use]
    pub fn new(direction: Direction, what: impl Into<String>) -> Self {
        Self {
            direction,
            what: what.into(),
            keys: Vec::new(),
            pages: 0,
        }
    }

    /// Append one page worth of keys in navigation order and verify the run
    pub fn push_page(&mut self, page: impl IntoIterator<Item = K>) -> ProbeResult<()> {
        let start = self.keys.len().saturating_sub(1);
        self.keys.extend(page);
        self.pages += 1;
        // Everything before `start` was verified by earlier pushes.
        verify_order(&self.keys[start..], self.direction, &self.what).map_err(|e| match e {
            ProbeError::AssertionFailed {
                message,
                expected,
                actual,
                url,
            } => ProbeError::AssertionFailed {
                message: format!("{message} (offset {start}, page {})", self.pages),
                expected,
                actual,
                url,
            },
            other => other,
        })
    }

    /// Every key collected so far
    #[must_use]
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Number of pages pushed
    #[must_use]
    pub const fn pages(&self) -> usize {
        self.pages
    }
}

/// Result of a single check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionResult {
    /// Whether the assertion passed
    pub passed: bool,
    /// What was checked
    pub message: String,
    /// Expected value, rendered
    pub expected: String,
    /// Actual value, rendered
    pub actual: String,
}

impl AssertionResult {
    /// Create a passing assertion result
    #[must_use]
    pub const fn pass() -> Self {
        Self {
            passed: true,
            message: String::new(),
            expected: String::new(),
            actual: String::new(),
        }
    }

    /// Create a failing assertion result
    #[must_use]
    pub fn fail(
        message: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self {
            passed: false,
            message: message.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Turn a failure into an error raised at `url`
    pub fn check(self, url: &str) -> ProbeResult<()> {
        if self.passed {
            Ok(())
        } else {
            Err(ProbeError::assertion(
                self.message,
                self.expected,
                self.actual,
                url,
            ))
        }
    }
}

/// Assertion helpers for scenarios
#[derive(Debug)]
pub struct Assertion;

impl Assertion {
    /// Assert two values are equal
    #[must_use]
    pub fn equals<T: PartialEq + Debug + ?Sized>(
        what: &str,
        expected: &T,
        actual: &T,
    ) -> AssertionResult {
        if expected == actual {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(what, format!("{expected:?}"), format!("{actual:?}"))
        }
    }

    /// Assert two values differ
    #[must_use]
    pub fn not_equals<T: PartialEq + Debug + ?Sized>(
        what: &str,
        unexpected: &T,
        actual: &T,
    ) -> AssertionResult {
        if unexpected == actual {
            AssertionResult::fail(what, format!("anything but {unexpected:?}"), format!("{actual:?}"))
        } else {
            AssertionResult::pass()
        }
    }

    /// Assert a string contains a substring
    #[must_use]
    pub fn contains(what: &str, haystack: &str, needle: &str) -> AssertionResult {
        if haystack.contains(needle) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(what, format!("text containing {needle:?}"), haystack)
        }
    }

    /// Assert a string ends with a suffix
    #[must_use]
    pub fn ends_with(what: &str, haystack: &str, suffix: &str) -> AssertionResult {
        if haystack.ends_with(suffix) {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(what, format!("text ending with {suffix:?}"), haystack)
        }
    }

    /// Assert a condition holds
    #[must_use]
    pub fn is_true(what: &str, condition: bool) -> AssertionResult {
        Self::equals(what, &true, &condition)
    }

    /// Assert a condition does not hold
    #[must_use]
    pub fn is_false(what: &str, condition: bool) -> AssertionResult {
        Self::equals(what, &false, &condition)
    }

    /// Assert `actual >= min`
    #[must_use]
    pub fn at_least(what: &str, min: usize, actual: usize) -> AssertionResult {
        if actual >= min {
            AssertionResult::pass()
        } else {
            AssertionResult::fail(what, format!(">= {min}"), actual.to_string())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    mod order_tests {
        use super::*;

        #[test]
        fn test_descending_with_ties_passes() {
            verify_order(&[5, 5, 3, 3, 1], Direction::Descending, "users").unwrap();
        }

        #[test]
        fn test_descending_inversion_fails_with_values() {
            let err = verify_order(&[5, 3, 4], Direction::Descending, "users").unwrap_err();
            let text = err.to_string();
            assert!(text.contains("users not descending at positions 1 and 2"));
            assert!(text.contains("3 then 4"));
        }

        #[test]
        fn test_trivial_sequences_pass() {
            verify_order::<u32>(&[], Direction::Ascending, "x").unwrap();
            verify_order(&[1], Direction::Descending, "x").unwrap();
        }

        #[test]
        fn test_names_are_case_folded() {
            verify_names_ascending(&["adblock", "Beta", "cookie", "Dark"]).unwrap();
            assert!(verify_names_ascending(&["Beta", "adblock"]).is_err());
        }
    }

    mod unique_tests {
        use super::*;

        #[test]
        fn test_duplicate_name_fails() {
            let err = verify_unique_names(&["a", "b", "a"]).unwrap_err();
            assert!(err.to_string().contains("\"a\" listed more than once"));
        }

        #[test]
        fn test_distinct_names_pass() {
            verify_unique_names(&["a", "A", "b"]).unwrap();
        }
    }

    mod breadcrumb_tests {
        use super::*;

        fn crumbs(labels: &[&str]) -> Vec<Breadcrumb> {
            labels
                .iter()
                .map(|l| Breadcrumb {
                    label: (*l).to_string(),
                    href: None,
                })
                .collect()
        }

        #[test]
        fn test_matching_trail() {
            let trail = crumbs(&["Add-ons for Firefox", "Extensions"]);
            verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Extensions"]).unwrap();
        }

        #[test]
        fn test_depth_mismatch_fails() {
            let trail = crumbs(&["Add-ons for Firefox"]);
            assert!(verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Extensions"]).is_err());
        }

        #[test]
        fn test_label_mismatch_fails() {
            let trail = crumbs(&["Add-ons for Firefox", "Themes"]);
            assert!(verify_breadcrumbs(&trail, &["Add-ons for Firefox", "Extensions"]).is_err());
        }
    }

    mod accumulator_tests {
        use super::*;

        #[test]
        fn test_boundary_inversion_is_caught() {
            let mut acc = OrderAccumulator::new(Direction::Descending, "downloads");
            acc.push_page([9, 8, 7]).unwrap();
            // Page 2 is sorted on its own but starts above page 1's tail.
            let err = acc.push_page([8, 2, 1]).unwrap_err();
            assert!(err.to_string().contains("page 2"));
        }

        #[test]
        fn test_clean_run() {
            let mut acc = OrderAccumulator::new(Direction::Descending, "downloads");
            acc.push_page([9, 8, 7]).unwrap();
            acc.push_page([7, 2, 1]).unwrap();
            assert_eq!(acc.pages(), 2);
            assert_eq!(acc.keys(), &[9, 8, 7, 7, 2, 1]);
        }

        #[test]
        fn test_empty_page() {
            let mut acc = OrderAccumulator::<u32>::new(Direction::Ascending, "x");
            acc.push_page([]).unwrap();
            acc.push_page([1, 2]).unwrap();
        }
    }

    mod assertion_tests {
        use super::*;

        #[test]
        fn test_equals() {
            assert!(Assertion::equals("n", &1, &1).passed);
            let fail = Assertion::equals("label", "Newest", "Featured");
            assert!(!fail.passed);
            assert_eq!(fail.expected, "\"Newest\"");
        }

        #[test]
        fn test_check_carries_url() {
            let err = Assertion::contains("url", "/extensions/", "sort=users")
                .check("/extensions/")
                .unwrap_err();
            match err {
                ProbeError::AssertionFailed { url, .. } => assert_eq!(url, "/extensions/"),
                other => panic!("unexpected error: {other}"),
            }
        }

        #[test]
        fn test_helpers() {
            assert!(Assertion::ends_with("u", "/complete-themes/", "/complete-themes/").passed);
            assert!(Assertion::is_false("f", false).passed);
            assert!(!Assertion::at_least("count", 1, 0).passed);
            assert!(!Assertion::not_equals("n", &3, &3).passed);
        }
    }

    proptest! {
        #[test]
        fn prop_sorted_input_passes(mut v in proptest::collection::vec(0u64..1_000, 0..60)) {
            v.sort_unstable();
            prop_assert!(verify_order(&v, Direction::Ascending, "v").is_ok());
            v.reverse();
            prop_assert!(verify_order(&v, Direction::Descending, "v").is_ok());
        }

        #[test]
        fn prop_strict_inversion_fails(
            mut v in proptest::collection::vec(0u64..1_000, 2..60),
            pick in any::<prop::sample::Index>(),
        ) {
            v.sort_unstable_by(|a, b| b.cmp(a));
            v.dedup();
            prop_assume!(v.len() >= 2);
            let i = pick.index(v.len() - 1);
            v.swap(i, i + 1);
            prop_assert!(verify_order(&v, Direction::Descending, "v").is_err());
        }

        #[test]
        fn prop_accumulator_matches_whole_check(
            a in proptest::collection::vec(0u64..100, 0..25),
            b in proptest::collection::vec(0u64..100, 0..25),
        ) {
            let mut a = a;
            let mut b = b;
            a.sort_unstable_by(|x, y| y.cmp(x));
            b.sort_unstable_by(|x, y| y.cmp(x));
            let mut acc = OrderAccumulator::new(Direction::Descending, "v");
            let first = acc.push_page(a.clone());
            prop_assert!(first.is_ok());
            let joined: Vec<u64> = a.iter().chain(b.iter()).copied().collect();
            let whole = verify_order(&joined, Direction::Descending, "v").is_ok();
            prop_assert_eq!(acc.push_page(b).is_ok(), whole);
        }
    }
}
