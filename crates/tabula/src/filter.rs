//! Attribute filter declarations.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Reserved filter value meaning "no constraint for this key".
pub const ALL: &str = "all";

/// One selectable value of a filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOption {
    pub label: String,
    pub value: String,
}

impl FilterOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        FilterOption {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A filter offered to the user: an exact-match constraint on one field.
///
/// ```
/// use tabula::FilterSpec;
///
/// let status = FilterSpec::new("status", "Status")
///     .option("Active", "active")
///     .option("On leave", "on_leave");
///
/// assert_eq!(status.options.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub key: String,
    pub label: String,
    #[serde(default)]
    pub options: Vec<FilterOption>,
}

impl FilterSpec {
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        FilterSpec {
            key: key.into(),
            label: label.into(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.push(FilterOption::new(label, value));
        self
    }
}

/// Returns `true` if `value` constrains anything.
pub fn is_active(value: &str) -> bool {
    !value.is_empty() && value != ALL
}

/// Exact, case-sensitive match of the field's string coercion.
///
/// Absent fields never match an active filter.
pub fn matches<T: Record + ?Sized>(record: &T, key: &str, value: &str) -> bool {
    record
        .field(key)
        .coerce()
        .is_some_and(|coerced| coerced == value)
}
