//! Which declared columns are currently rendered.

use std::collections::BTreeSet;

use crate::column::ColumnSpec;

/// Set of visible column keys.
///
/// Hiding every column is allowed; the table then renders with no header
/// cells and no data cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnVisibility {
    visible: BTreeSet<String>,
}

impl ColumnVisibility {
    /// Initial state: columns declared visible and not hidden by default.
    pub fn from_columns<T>(columns: &[ColumnSpec<T>]) -> Self {
        ColumnVisibility {
            visible: columns
                .iter()
                .filter(|c| c.def().initially_visible())
                .map(|c| c.key().to_string())
                .collect(),
        }
    }

    /// Shows a hidden column or hides a visible one. Returns the new state.
    ///
    /// Keys are not checked against the declared columns; toggling an
    /// unknown key has no visible effect.
    pub fn toggle(&mut self, key: &str) -> bool {
        if self.visible.remove(key) {
            false
        } else {
            self.visible.insert(key.to_string());
            true
        }
    }

    pub fn set(&mut self, key: &str, visible: bool) {
        if visible {
            self.visible.insert(key.to_string());
        } else {
            self.visible.remove(key);
        }
    }

    pub fn is_visible(&self, key: &str) -> bool {
        self.visible.contains(key)
    }

    /// Visible columns, in declaration order.
    pub fn visible_columns<'c, T>(&self, columns: &'c [ColumnSpec<T>]) -> Vec<&'c ColumnSpec<T>> {
        columns
            .iter()
            .filter(|c| self.is_visible(c.key()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Json = serde_json::Value;

    fn columns() -> Vec<ColumnSpec<Json>> {
        vec![
            ColumnSpec::new("name", "Name"),
            ColumnSpec::new("email", "Email").default_hidden(true),
            ColumnSpec::new("internal", "Internal").visible(false),
            ColumnSpec::new("dept", "Dept"),
        ]
    }

    fn keys(cols: &[&ColumnSpec<Json>]) -> Vec<String> {
        cols.iter().map(|c| c.key().to_string()).collect()
    }

    #[test]
    fn initial_set() {
        let cols = columns();
        let vis = ColumnVisibility::from_columns(&cols);
        assert_eq!(keys(&vis.visible_columns(&cols)), vec!["name", "dept"]);
    }

    #[test]
    fn toggle_keeps_declaration_order() {
        let cols = columns();
        let mut vis = ColumnVisibility::from_columns(&cols);
        assert!(vis.toggle("email"));
        assert_eq!(
            keys(&vis.visible_columns(&cols)),
            vec!["name", "email", "dept"]
        );
        assert!(!vis.toggle("name"));
        assert_eq!(keys(&vis.visible_columns(&cols)), vec!["email", "dept"]);
    }

    #[test]
    fn hiding_everything_is_allowed() {
        let cols = columns();
        let mut vis = ColumnVisibility::from_columns(&cols);
        vis.set("name", false);
        vis.set("dept", false);
        assert!(vis.visible_columns(&cols).is_empty());
    }
}
