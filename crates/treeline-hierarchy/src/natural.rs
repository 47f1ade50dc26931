//! Numeric-aware string ordering.
//!
//! Strings are compared run by run: a run of ASCII digits compares as a
//! number, any other run compares case-insensitively. Ties are broken so
//! that only identical strings compare equal, which keeps the order total
//! and sorts stable across runs.

use std::cmp::Ordering;

/// Compare two strings in natural order (`"B-2" < "B-10"`).
///
/// # Example
///
/// ```
/// use treeline_hierarchy::natural_cmp;
///
/// let mut names = vec!["B-10", "B-2", "B-1"];
/// names.sort_by(|a, b| natural_cmp(a, b));
/// assert_eq!(names, ["B-1", "B-2", "B-10"]);
/// ```
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Runs { rest: a };
    let mut right = Runs { rest: b };
    let mut tiebreak = Ordering::Equal;

    loop {
        match (left.next(), right.next()) {
            (None, None) => return tiebreak,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => {
                let (primary, secondary) = compare_runs(x, y);
                if primary != Ordering::Equal {
                    return primary;
                }
                if tiebreak == Ordering::Equal {
                    tiebreak = secondary;
                }
            }
        }
    }
}

/// A borrowed string ordered by [`natural_cmp`].
///
/// Handy as a `sort_by_key` key or a `BTreeMap` key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NaturalKey<'a>(pub &'a str);

impl Ord for NaturalKey<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        natural_cmp(self.0, other.0)
    }
}

impl PartialOrd for NaturalKey<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// Run splitting
// ============================================================================

#[derive(Clone, Copy, Debug)]
enum Run<'a> {
    Digits(&'a str),
    Text(&'a str),
}

struct Runs<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Runs<'a> {
    type Item = Run<'a>;

    fn next(&mut self) -> Option<Run<'a>> {
        let first = self.rest.chars().next()?;
        let digits = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != digits)
            .unwrap_or(self.rest.len());
        let (head, tail) = self.rest.split_at(end);
        self.rest = tail;
        Some(if digits {
            Run::Digits(head)
        } else {
            Run::Text(head)
        })
    }
}

/// Returns `(primary, tiebreak)` for one pair of runs.
fn compare_runs(x: Run<'_>, y: Run<'_>) -> (Ordering, Ordering) {
    match (x, y) {
        (Run::Digits(x), Run::Digits(y)) => {
            let xs = x.trim_start_matches('0');
            let ys = y.trim_start_matches('0');
            let primary = xs.len().cmp(&ys.len()).then_with(|| xs.cmp(ys));
            // "7" before "07"
            (primary, x.len().cmp(&y.len()))
        }
        (Run::Text(x), Run::Text(y)) => {
            let primary = x
                .chars()
                .flat_map(char::to_lowercase)
                .cmp(y.chars().flat_map(char::to_lowercase));
            (primary, x.cmp(y))
        }
        (Run::Digits(_), Run::Text(_)) => (Ordering::Less, Ordering::Equal),
        (Run::Text(_), Run::Digits(_)) => (Ordering::Greater, Ordering::Equal),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted(mut names: Vec<&str>) -> Vec<&str> {
        names.sort_by(|a, b| natural_cmp(a, b));
        names
    }

    #[test]
    fn test_numeric_suffixes() {
        assert_eq!(sorted(vec!["B-10", "B-2", "B-1"]), vec!["B-1", "B-2", "B-10"]);
    }

    #[test]
    fn test_plain_letters() {
        assert_eq!(sorted(vec!["D", "B", "C"]), vec!["B", "C", "D"]);
    }

    #[test]
    fn test_prefix_sorts_first() {
        assert_eq!(natural_cmp("B", "B-1"), Ordering::Less);
        assert_eq!(natural_cmp("item", "item2"), Ordering::Less);
    }

    #[test]
    fn test_case_insensitive_primary() {
        assert_eq!(sorted(vec!["beta", "Alpha", "alpha2"]), vec!["Alpha", "alpha2", "beta"]);
        // Case only breaks ties
        assert_eq!(natural_cmp("A", "a"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(natural_cmp("file007", "file7"), Ordering::Greater);
        assert_eq!(natural_cmp("file007", "file8"), Ordering::Less);
    }

    #[test]
    fn test_large_numbers() {
        assert_eq!(
            natural_cmp("n99999999999999999999", "n100000000000000000000"),
            Ordering::Less
        );
    }

    #[test]
    fn test_digits_before_text() {
        assert_eq!(natural_cmp("1", "a"), Ordering::Less);
    }

    #[test]
    fn test_equal_only_when_identical() {
        assert_eq!(natural_cmp("B-2", "B-2"), Ordering::Equal);
        assert_ne!(natural_cmp("B-02", "B-2"), Ordering::Equal);
        assert_eq!(natural_cmp("", ""), Ordering::Equal);
    }

    #[test]
    fn test_natural_key_ord() {
        let mut keys = vec![NaturalKey("x10"), NaturalKey("x9")];
        keys.sort();
        assert_eq!(keys, vec![NaturalKey("x9"), NaturalKey("x10")]);
    }

    proptest! {
        #[test]
        fn prop_antisymmetric(a in "[a-cA-C0-9-]{0,8}", b in "[a-cA-C0-9-]{0,8}") {
            prop_assert_eq!(natural_cmp(&a, &b), natural_cmp(&b, &a).reverse());
        }

        #[test]
        fn prop_equal_iff_identical(a in "[a-cA-C0-9-]{0,8}", b in "[a-cA-C0-9-]{0,8}") {
            prop_assert_eq!(natural_cmp(&a, &b) == Ordering::Equal, a == b);
        }

        #[test]
        fn prop_transitive(
            a in "[a-bA-B0-9]{0,6}",
            b in "[a-bA-B0-9]{0,6}",
            c in "[a-bA-B0-9]{0,6}",
        ) {
            if natural_cmp(&a, &b) != Ordering::Greater
                && natural_cmp(&b, &c) != Ordering::Greater
            {
                prop_assert_ne!(natural_cmp(&a, &c), Ordering::Greater);
            }
        }

        #[test]
        fn prop_numbers_order_numerically(x in 0u64..100_000, y in 0u64..100_000) {
            let a = format!("B-{x}");
            let b = format!("B-{y}");
            prop_assert_eq!(natural_cmp(&a, &b), x.cmp(&y));
        }
    }
}
