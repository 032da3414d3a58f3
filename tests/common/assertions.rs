//! Assertion helpers for ranked-id results.

use pretty_assertions::assert_eq;
use tome_core::types::BookId;

/// Assert an exact ranked result (order matters).
pub fn assert_ranked(actual: &[BookId], expected: &[BookId]) {
    assert_eq!(actual, expected, "ranked ids differ");
}

/// Assert the same id set regardless of rank.
pub fn assert_same_ids(actual: &[BookId], expected: &[BookId]) {
    let mut actual: Vec<BookId> = actual.to_vec();
    let mut expected: Vec<BookId> = expected.to_vec();
    actual.sort_unstable();
    expected.sort_unstable();
    assert_eq!(actual, expected, "id sets differ");
}

/// Assert every id in `smaller` also appears in `larger`.
pub fn assert_subset(smaller: &[BookId], larger: &[BookId]) {
    for id in smaller {
        assert!(
            larger.contains(id),
            "id {id} in {smaller:?} missing from {larger:?}"
        );
    }
}
