//! Locale-aware string comparison.
//!
//! Approximates the default collation order a user expects from a sorted
//! table: letters compare by their base form first, so `"émile"` sorts with
//! the `e`s and `"apple"` sorts before `"Banana"`. Accents break ties before
//! case does, and lowercase sorts before uppercase.

use std::cmp::Ordering;

use deunicode::deunicode;

/// Compares two strings in collation order.
///
/// The comparison is total: strings that are equal at every collation level
/// fall back to code-point order, so it is `Equal` only for identical input.
pub fn collate(a: &str, b: &str) -> Ordering {
    if a == b {
        return Ordering::Equal;
    }

    let a_lower = a.to_lowercase();
    let b_lower = b.to_lowercase();

    deunicode(&a_lower)
        .cmp(&deunicode(&b_lower))
        .then_with(|| a_lower.cmp(&b_lower))
        .then_with(|| case_order(a, b))
        .then_with(|| a.cmp(b))
}

// Lowercase first, position by position.
fn case_order(a: &str, b: &str) -> Ordering {
    a.chars().map(case_rank).cmp(b.chars().map(case_rank))
}

fn case_rank(c: char) -> u8 {
    if c.is_lowercase() {
        0
    } else if c.is_uppercase() {
        2
    } else {
        1
    }
}
