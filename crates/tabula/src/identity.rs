//! Record identity resolution.
//!
//! Every row needs a string identity for selection and row clicks. A caller
//! can supply a resolver; otherwise the record's own id is used, and records
//! without one get their position in the current data snapshot. Positional
//! ids are stable for as long as the snapshot is not replaced.

use std::fmt;
use std::sync::Arc;

use crate::record::Record;

/// Identity of the record at `index` when it has no id of its own.
pub fn fallback_id(index: usize) -> String {
    format!("row-{}", index)
}

/// Maps a record to its identity string.
///
/// ```
/// use serde_json::json;
/// use tabula::IdResolver;
///
/// let default = IdResolver::default();
/// assert_eq!(default.resolve(&json!({"id": 7}), 0), "7");
/// assert_eq!(default.resolve(&json!({"name": "Ann"}), 3), "row-3");
///
/// let by_email = IdResolver::custom(|r: &serde_json::Value| {
///     r["email"].as_str().unwrap_or_default().to_string()
/// });
/// assert_eq!(by_email.resolve(&json!({"email": "ann@corp"}), 0), "ann@corp");
/// ```
pub struct IdResolver<T> {
    custom: Option<Arc<dyn Fn(&T) -> String>>,
}

impl<T> Default for IdResolver<T> {
    fn default() -> Self {
        IdResolver { custom: None }
    }
}

impl<T> Clone for IdResolver<T> {
    fn clone(&self) -> Self {
        IdResolver {
            custom: self.custom.clone(),
        }
    }
}

impl<T> fmt::Debug for IdResolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IdResolver")
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

impl<T> IdResolver<T> {
    /// Uses `f` for every record.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&T) -> String + 'static,
    {
        IdResolver {
            custom: Some(Arc::new(f)),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.custom.is_some()
    }
}

impl<T: Record> IdResolver<T> {
    /// Identity of `record`, found at `index` in the data snapshot.
    pub fn resolve(&self, record: &T, index: usize) -> String {
        match &self.custom {
            Some(f) => f(record),
            None => record
                .record_id()
                .map(|id| id.into_owned())
                .unwrap_or_else(|| fallback_id(index)),
        }
    }

    /// Identities of a whole snapshot, in order.
    pub fn resolve_all(&self, records: &[T]) -> Vec<String> {
        records
            .iter()
            .enumerate()
            .map(|(i, r)| self.resolve(r, i))
            .collect()
    }
}
