//! Sort direction and the record comparator.
//!
//! Provides [`Dir`], [`SortMode`], and [`compare_for_sort`], the comparator
//! the pipeline's sort stage uses.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::collate::collate;
use crate::value::Value;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dir {
    /// Ascending order (smallest first).
    #[default]
    Asc,
    /// Descending order (largest first).
    Desc,
}

impl Dir {
    /// Returns `true` if this is ascending order.
    pub fn is_asc(self) -> bool {
        matches!(self, Dir::Asc)
    }

    /// Returns `true` if this is descending order.
    pub fn is_desc(self) -> bool {
        matches!(self, Dir::Desc)
    }

    /// Returns the opposite direction.
    pub fn flip(self) -> Dir {
        match self {
            Dir::Asc => Dir::Desc,
            Dir::Desc => Dir::Asc,
        }
    }

    /// Applies this direction to an ordering.
    ///
    /// For `Asc`, returns the ordering unchanged.
    /// For `Desc`, reverses the ordering.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Dir::Asc => ordering,
            Dir::Desc => ordering.reverse(),
        }
    }

    /// Returns the display name of this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Dir::Asc => "asc",
            Dir::Desc => "desc",
        }
    }
}

impl std::fmt::Display for Dir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a column compares two defined values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    /// Compare string coercions in collation order, so `"100" < "20"`.
    #[default]
    Lexical,
    /// Group values by kind (numbers, NaN, booleans, strings), then compare
    /// numbers numerically, booleans as `false < true` and strings in
    /// collation order.
    Typed,
}

/// Compares two field values for sorting.
///
/// Missing values sort after every defined value no matter the direction;
/// the direction only reverses the comparison between two defined values.
///
/// ```
/// use std::cmp::Ordering;
/// use tabula::{compare_for_sort, Dir, SortMode, Value};
///
/// let bob = Value::from(30u32);
/// let ann = Value::None;
///
/// assert_eq!(compare_for_sort(&bob, &ann, Dir::Asc, SortMode::Lexical), Ordering::Less);
/// assert_eq!(compare_for_sort(&bob, &ann, Dir::Desc, SortMode::Lexical), Ordering::Less);
/// ```
pub fn compare_for_sort(a: &Value<'_>, b: &Value<'_>, dir: Dir, mode: SortMode) -> Ordering {
    match (a, b) {
        (Value::None, Value::None) => Ordering::Equal,
        (Value::None, _) => Ordering::Greater,
        (_, Value::None) => Ordering::Less,
        _ => dir.apply(compare_defined(a, b, mode)),
    }
}

fn compare_defined(a: &Value<'_>, b: &Value<'_>, mode: SortMode) -> Ordering {
    match mode {
        SortMode::Lexical => compare_lexical(a, b),
        SortMode::Typed => compare_typed(a, b),
    }
}

fn compare_lexical(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    match (a.coerce(), b.coerce()) {
        (Some(a), Some(b)) => collate(&a, &b),
        _ => Ordering::Equal,
    }
}

/// Kinds never interleave: numbers, then NaN, then booleans, then strings.
fn typed_rank(v: &Value<'_>) -> u8 {
    match v {
        Value::Number(n) if n.is_nan() => 1,
        Value::Number(_) => 0,
        Value::Bool(_) => 2,
        Value::String(_) | Value::Text(_) => 3,
        Value::None => 4,
    }
}

fn compare_typed(a: &Value<'_>, b: &Value<'_>) -> Ordering {
    typed_rank(a)
        .cmp(&typed_rank(b))
        .then_with(|| match (a, b) {
            (Value::Number(x), Value::Number(y)) if !x.is_nan() && !y.is_nan() => {
                x.total_cmp(*y)
            }
            (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
            (Value::Number(_), Value::Number(_)) => Ordering::Equal,
            _ => compare_lexical(a, b),
        })
}
