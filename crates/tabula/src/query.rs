//! Query state: what the user asked to see.
//!
//! [`QueryState`] carries the search text, active filters, sort and page.
//! Its mutators enforce the page-reset law: changing the search text, any
//! filter, or the page size moves back to page 1, while changing the sort
//! keeps the current page.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::filter;
use crate::ordering::Dir;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// The user-controlled inputs of the pipeline.
///
/// ```
/// use tabula::{Dir, QueryState};
///
/// let mut q = QueryState::new(10);
/// q.set_page(3);
/// q.set_sort("name", Dir::Desc);
/// assert_eq!(q.current_page(), 3);
///
/// q.set_search("mac");
/// assert_eq!(q.current_page(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    search_text: String,
    active_filters: BTreeMap<String, String>,
    sort_key: Option<String>,
    sort_direction: Dir,
    current_page: usize,
    page_size: usize,
}

impl Default for QueryState {
    fn default() -> Self {
        QueryState::new(DEFAULT_PAGE_SIZE)
    }
}

impl QueryState {
    /// Creates the initial state: no search, no filters, unsorted, page 1.
    ///
    /// A zero page size is treated as 1.
    pub fn new(page_size: usize) -> Self {
        QueryState {
            search_text: String::new(),
            active_filters: BTreeMap::new(),
            sort_key: None,
            sort_direction: Dir::Asc,
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn active_filters(&self) -> &BTreeMap<String, String> {
        &self.active_filters
    }

    /// Returns the filter value for `key`, if one was set.
    pub fn filter(&self, key: &str) -> Option<&str> {
        self.active_filters.get(key).map(String::as_str)
    }

    /// Filters that actually constrain: set, non-empty, and not `"all"`.
    pub fn constraining_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.active_filters
            .iter()
            .filter(|(_, v)| filter::is_active(v))
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn sort_key(&self) -> Option<&str> {
        self.sort_key.as_deref()
    }

    pub fn sort_direction(&self) -> Dir {
        self.sort_direction
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Sets the search text and returns to page 1.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.current_page = 1;
    }

    /// Sets a filter value and returns to page 1. Use [`filter::ALL`] to
    /// lift the constraint while keeping the key.
    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.active_filters.insert(key.into(), value.into());
        self.current_page = 1;
    }

    /// Removes a filter and returns to page 1.
    pub fn clear_filter(&mut self, key: &str) {
        self.active_filters.remove(key);
        self.current_page = 1;
    }

    /// Removes every filter and returns to page 1.
    pub fn clear_filters(&mut self) {
        self.active_filters.clear();
        self.current_page = 1;
    }

    /// Sorts by `key` in `dir`. Keeps the current page.
    pub fn set_sort(&mut self, key: impl Into<String>, dir: Dir) {
        self.sort_key = Some(key.into());
        self.sort_direction = dir;
    }

    /// Header-click semantics: a new key sorts ascending, the current key
    /// flips direction. Keeps the current page.
    pub fn toggle_sort(&mut self, key: &str) {
        if self.sort_key.as_deref() == Some(key) {
            self.sort_direction = self.sort_direction.flip();
        } else {
            self.sort_key = Some(key.to_string());
            self.sort_direction = Dir::Asc;
        }
    }

    /// Removes the sort. Keeps the current page.
    pub fn clear_sort(&mut self) {
        self.sort_key = None;
        self.sort_direction = Dir::Asc;
    }

    /// Sets the page size and returns to page 1. A zero size is treated as 1.
    pub fn set_page_size(&mut self, size: usize) {
        self.page_size = size.max(1);
        self.current_page = 1;
    }

    /// Moves to `page` without clamping against a view; values below 1
    /// become 1. See [`QueryState::clamp_page`].
    pub fn set_page(&mut self, page: usize) {
        self.current_page = page.max(1);
    }

    /// Pulls the current page back into `[1, total_pages]`.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.current_page = self.current_page.clamp(1, total_pages.max(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn on_page_three() -> QueryState {
        let mut q = QueryState::new(10);
        q.set_page(3);
        q
    }

    #[test]
    fn defaults() {
        let q = QueryState::default();
        assert_eq!(q.search_text(), "");
        assert!(q.active_filters().is_empty());
        assert_eq!(q.sort_key(), None);
        assert_eq!(q.sort_direction(), Dir::Asc);
        assert_eq!(q.current_page(), 1);
        assert_eq!(q.page_size(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn search_resets_page() {
        let mut q = on_page_three();
        q.set_search("ann");
        assert_eq!(q.current_page(), 1);
    }

    #[test]
    fn filter_mutations_reset_page() {
        let mut q = on_page_three();
        q.set_filter("status", "active");
        assert_eq!(q.current_page(), 1);

        q.set_page(2);
        q.clear_filter("status");
        assert_eq!(q.current_page(), 1);

        q.set_page(2);
        q.clear_filters();
        assert_eq!(q.current_page(), 1);
    }

    #[test]
    fn page_size_resets_page() {
        let mut q = on_page_three();
        q.set_page_size(25);
        assert_eq!(q.current_page(), 1);
        assert_eq!(q.page_size(), 25);
    }

    #[test]
    fn sort_keeps_page() {
        let mut q = on_page_three();
        q.set_sort("name", Dir::Desc);
        assert_eq!(q.current_page(), 3);
        q.toggle_sort("name");
        assert_eq!(q.current_page(), 3);
        q.clear_sort();
        assert_eq!(q.current_page(), 3);
    }

    #[test]
    fn toggle_sort_cycles() {
        let mut q = QueryState::default();
        q.toggle_sort("name");
        assert_eq!((q.sort_key(), q.sort_direction()), (Some("name"), Dir::Asc));
        q.toggle_sort("name");
        assert_eq!((q.sort_key(), q.sort_direction()), (Some("name"), Dir::Desc));
        q.toggle_sort("age");
        assert_eq!((q.sort_key(), q.sort_direction()), (Some("age"), Dir::Asc));
    }

    #[test]
    fn constraining_filters_skip_all_and_empty() {
        let mut q = QueryState::default();
        q.set_filter("status", "all");
        q.set_filter("dept", "");
        q.set_filter("role", "admin");
        let active: Vec<_> = q.constraining_filters().collect();
        assert_eq!(active, vec![("role", "admin")]);
    }

    #[test]
    fn zero_sizes_and_pages_are_lifted() {
        let mut q = QueryState::new(0);
        assert_eq!(q.page_size(), 1);
        q.set_page(0);
        assert_eq!(q.current_page(), 1);
    }

    #[test]
    fn clamp_page() {
        let mut q = QueryState::default();
        q.set_page(9);
        q.clamp_page(3);
        assert_eq!(q.current_page(), 3);
        q.clamp_page(0);
        assert_eq!(q.current_page(), 1);
    }
}
