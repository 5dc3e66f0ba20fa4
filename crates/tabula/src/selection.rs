//! Row selection keyed by record identity.
//!
//! Selection is a set of identity strings, never row positions, so it
//! survives sorting, filtering and paging. Entries for records that are no
//! longer in the data are kept until explicitly cleared.

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::identity::IdResolver;
use crate::record::Record;

/// State of the "select all on this page" header checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeaderState {
    Unchecked,
    Indeterminate,
    Checked,
}

impl HeaderState {
    pub fn is_checked(self) -> bool {
        matches!(self, HeaderState::Checked)
    }

    pub fn is_indeterminate(self) -> bool {
        matches!(self, HeaderState::Indeterminate)
    }
}

/// Set of selected record identities.
///
/// ```
/// use tabula::{HeaderState, Selection};
///
/// let mut sel = Selection::new();
/// sel.toggle("1");
/// assert!(sel.is_selected("1"));
///
/// let page = ["1", "2"];
/// assert_eq!(sel.header_state(page), HeaderState::Indeterminate);
///
/// sel.toggle_all(page, true);
/// assert_eq!(sel.header_state(page), HeaderState::Checked);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Selection::default()
    }

    /// Flips the selection of one identity.
    pub fn toggle(&mut self, id: &str) {
        if !self.ids.remove(id) {
            self.ids.insert(id.to_string());
        }
    }

    /// Selects or deselects exactly the given page ids.
    ///
    /// Ids not on the page are never touched. Returns `true` if anything
    /// changed.
    pub fn toggle_all<I, S>(&mut self, page_ids: I, checked: bool) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut changed = false;
        for id in page_ids {
            let id = id.as_ref();
            changed |= if checked {
                self.ids.insert(id.to_string())
            } else {
                self.ids.remove(id)
            };
        }
        changed
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Removes every selected id. Returns `true` if anything was selected.
    pub fn clear(&mut self) -> bool {
        let had_any = !self.ids.is_empty();
        self.ids.clear();
        had_any
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Selected identities in sorted order, including lingering ones.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Tri-state of the header checkbox for a page.
    ///
    /// Checked iff the page is non-empty and fully selected; indeterminate
    /// iff partially selected; unchecked otherwise.
    pub fn header_state<I, S>(&self, page_ids: I) -> HeaderState
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let (mut total, mut selected) = (0usize, 0usize);
        for id in page_ids {
            total += 1;
            if self.is_selected(id.as_ref()) {
                selected += 1;
            }
        }
        match (total, selected) {
            (0, _) | (_, 0) => HeaderState::Unchecked,
            (t, s) if t == s => HeaderState::Checked,
            _ => HeaderState::Indeterminate,
        }
    }

    /// Resolves the selected ids against `records`.
    ///
    /// Records come back in data order. When several records share an id,
    /// the last one wins. Lingering ids without a record are skipped.
    pub fn selected_records<'a, T: Record>(
        &self,
        records: &'a [T],
        resolver: &IdResolver<T>,
    ) -> Vec<&'a T> {
        if self.ids.is_empty() {
            return Vec::new();
        }
        let mut winners: HashMap<String, usize> = HashMap::new();
        for (index, record) in records.iter().enumerate() {
            let id = resolver.resolve(record, index);
            if self.ids.contains(id.as_str()) {
                winners.insert(id, index);
            }
        }
        let mut indices: Vec<usize> = winners.into_values().collect();
        indices.sort_unstable();
        indices.into_iter().map(|i| &records[i]).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};

    #[test]
    fn toggle_flips() {
        let mut sel = Selection::new();
        sel.toggle("a");
        assert!(sel.is_selected("a"));
        sel.toggle("a");
        assert!(!sel.is_selected("a"));
        assert!(sel.is_empty());
    }

    #[test]
    fn toggle_all_only_touches_page() {
        let mut sel = Selection::new();
        sel.toggle("p1-a");
        assert!(sel.toggle_all(["p2-a", "p2-b"], true));
        assert_eq!(sel.ids().collect::<Vec<_>>(), vec!["p1-a", "p2-a", "p2-b"]);

        assert!(sel.toggle_all(["p2-a", "p2-b"], false));
        assert_eq!(sel.ids().collect::<Vec<_>>(), vec!["p1-a"]);
    }

    #[test]
    fn toggle_all_reports_no_change() {
        let mut sel = Selection::new();
        assert!(!sel.toggle_all(["x"], false));
        assert!(!sel.toggle_all(Vec::<String>::new(), true));
    }

    #[test]
    fn header_state_tri_state() {
        let mut sel = Selection::new();
        assert_eq!(sel.header_state(["a", "b"]), HeaderState::Unchecked);
        sel.toggle("a");
        assert_eq!(sel.header_state(["a", "b"]), HeaderState::Indeterminate);
        sel.toggle("b");
        assert_eq!(sel.header_state(["a", "b"]), HeaderState::Checked);
    }

    #[test]
    fn header_state_empty_page_is_unchecked() {
        let mut sel = Selection::new();
        sel.toggle("a");
        assert_eq!(sel.header_state(Vec::<&str>::new()), HeaderState::Unchecked);
    }

    #[test]
    fn selected_records_in_data_order_skipping_lingering() {
        let data: Vec<Json> = vec![
            json!({"id": "1", "n": "a"}),
            json!({"id": "2", "n": "b"}),
            json!({"id": "3", "n": "c"}),
        ];
        let mut sel = Selection::new();
        sel.toggle("3");
        sel.toggle("1");
        sel.toggle("gone");
        let picked = sel.selected_records(&data, &IdResolver::default());
        let names: Vec<&str> = picked.iter().filter_map(|r| r["n"].as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(sel.is_selected("gone"));
    }

    #[test]
    fn selected_records_collision_last_wins() {
        let data: Vec<Json> = vec![
            json!({"id": "dup", "n": "first"}),
            json!({"id": "dup", "n": "second"}),
        ];
        let mut sel = Selection::new();
        sel.toggle("dup");
        let picked = sel.selected_records(&data, &IdResolver::default());
        assert_eq!(picked.len(), 1);
        assert_eq!(picked[0]["n"], "second");
    }

    #[test]
    fn clear_reports_change() {
        let mut sel = Selection::new();
        assert!(!sel.clear());
        sel.toggle("a");
        assert!(sel.clear());
        assert!(sel.is_empty());
    }
}
