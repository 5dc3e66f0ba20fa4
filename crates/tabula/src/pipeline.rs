//! The query pipeline: search, attribute filters, sort, paginate.
//!
//! Stages always run in that order. Each stage is a pure function over
//! record references, so the derived view borrows from the row store and
//! never clones a record. No stage can fail: unknown keys read as absent
//! values and absent values simply never match.
//!
//! ```
//! use serde_json::json;
//! use tabula::{pipeline, ColumnSpec, QueryState};
//!
//! let rows = vec![
//!     json!({"id": "1", "product": "MacBook Pro"}),
//!     json!({"id": "2", "product": "ThinkPad"}),
//! ];
//! let columns = vec![ColumnSpec::new("product", "Product")];
//!
//! let mut query = QueryState::new(10);
//! query.set_search("mac");
//!
//! let page = pipeline::compute_view(&rows, &columns, &query);
//! assert_eq!(page.len(), 1);
//! assert_eq!(page[0]["id"], "1");
//! ```

use crate::column::ColumnSpec;
use crate::filter;
use crate::ordering::{compare_for_sort, Dir, SortMode};
use crate::pagination::page_range;
use crate::query::QueryState;
use crate::record::Record;

/// Runs every stage and returns the current page slice.
///
/// The page is taken as-is from the query; a page past the end yields an
/// empty slice. [`DataTable`](crate::DataTable) clamps before calling this.
pub fn compute_view<'a, T: Record>(
    records: &'a [T],
    columns: &[ColumnSpec<T>],
    query: &QueryState,
) -> Vec<&'a T> {
    let derived = derive_view(records, columns, query);
    paginate(&derived, query.current_page(), query.page_size()).to_vec()
}

/// Search, filters and sort: the full ordered view before pagination.
pub fn derive_view<'a, T: Record>(
    records: &'a [T],
    columns: &[ColumnSpec<T>],
    query: &QueryState,
) -> Vec<&'a T> {
    derive_indices(records, columns, query)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

/// Same as [`derive_view`], but yields positions in `records`.
///
/// Positions are what positional identities are derived from, so the table
/// controller works on these.
pub fn derive_indices<T: Record>(
    records: &[T],
    columns: &[ColumnSpec<T>],
    query: &QueryState,
) -> Vec<usize> {
    let keys = searchable_keys(columns);
    let needle = query.search_text().to_lowercase();
    let filters: Vec<(&str, &str)> = query.constraining_filters().collect();

    let mut rows: Vec<usize> = (0..records.len())
        .filter(|&i| matches_search(&records[i], &keys, &needle))
        .filter(|&i| matches_filters(&records[i], &filters))
        .collect();

    if let Some(key) = query.sort_key() {
        let mode = sort_mode_for(columns, key);
        let dir = query.sort_direction();
        rows.sort_by(|&a, &b| {
            compare_for_sort(&records[a].field(key), &records[b].field(key), dir, mode)
        });
    }

    tracing::debug!(
        records = records.len(),
        derived = rows.len(),
        search = query.search_text(),
        sort_key = ?query.sort_key(),
        "derived view recomputed"
    );
    rows
}

/// Keeps records where any searchable column contains `text`,
/// case-insensitively. Empty text keeps everything.
pub fn search<'a, T: Record>(
    rows: Vec<&'a T>,
    columns: &[ColumnSpec<T>],
    text: &str,
) -> Vec<&'a T> {
    let keys = searchable_keys(columns);
    let needle = text.to_lowercase();
    rows.into_iter()
        .filter(|row| matches_search(*row, &keys, &needle))
        .collect()
}

/// Applies every constraining filter of `query` as an exact match.
pub fn apply_filters<'a, T: Record>(rows: Vec<&'a T>, query: &QueryState) -> Vec<&'a T> {
    let filters: Vec<(&str, &str)> = query.constraining_filters().collect();
    rows.into_iter()
        .filter(|row| matches_filters(*row, &filters))
        .collect()
}

/// Stable sort by the field at `key`. Absent values end up last.
pub fn sort<T: Record>(rows: &mut [&T], key: &str, dir: Dir, mode: SortMode) {
    rows.sort_by(|a, b| compare_for_sort(&a.field(key), &b.field(key), dir, mode));
}

/// The slice of `rows` shown on `page` (1-based).
pub fn paginate<'s, 'a, T>(rows: &'s [&'a T], page: usize, page_size: usize) -> &'s [&'a T] {
    &rows[page_range(page, page_size, rows.len())]
}

// Duplicate keys: the last declaration decides, as in the table.
fn searchable_keys<T>(columns: &[ColumnSpec<T>]) -> Vec<&str> {
    columns
        .iter()
        .enumerate()
        .filter(|&(i, c)| !columns[i + 1..].iter().any(|later| later.key() == c.key()))
        .filter(|(_, c)| c.def().searchable)
        .map(|(_, c)| c.key())
        .collect()
}

fn sort_mode_for<T>(columns: &[ColumnSpec<T>], key: &str) -> SortMode {
    columns
        .iter()
        .rfind(|c| c.key() == key)
        .map(|c| c.def().sort_mode)
        .unwrap_or_default()
}

// `needle` is already lower-cased; empty matches everything.
fn matches_search<T: Record>(record: &T, keys: &[&str], needle: &str) -> bool {
    needle.is_empty()
        || keys.iter().any(|key| {
            record
                .field(key)
                .coerce()
                .is_some_and(|value| value.to_lowercase().contains(needle))
        })
}

fn matches_filters<T: Record>(record: &T, filters: &[(&str, &str)]) -> bool {
    filters
        .iter()
        .all(|(key, value)| filter::matches(record, key, value))
}
