//! Column declarations and the per-cell [`Renderer`] capability.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::ordering::SortMode;
use crate::record::Record;

/// Renders one cell of a column for a record.
///
/// Any `Fn(&T) -> String` is a renderer.
pub trait Renderer<T> {
    fn render(&self, record: &T) -> String;
}

impl<T, F> Renderer<T> for F
where
    F: Fn(&T) -> String,
{
    fn render(&self, record: &T) -> String {
        self(record)
    }
}

/// Side a column sticks to when the table scrolls horizontally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sticky {
    Left,
    Right,
}

/// Serializable part of a column declaration.
///
/// This is what a table configuration file carries. A [`ColumnSpec`] adds the
/// optional renderer on top.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnDef {
    /// Field key, unique within the table.
    pub key: String,
    /// Header text.
    pub header: String,
    pub sortable: bool,
    pub searchable: bool,
    /// Declared visibility. `false` hides the column initially.
    pub visible: bool,
    /// Column starts hidden but can be toggled on.
    pub default_hidden: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sticky: Option<Sticky>,
    pub sort_mode: SortMode,
}

impl Default for ColumnDef {
    fn default() -> Self {
        ColumnDef {
            key: String::new(),
            header: String::new(),
            sortable: true,
            searchable: true,
            visible: true,
            default_hidden: false,
            sticky: None,
            sort_mode: SortMode::Lexical,
        }
    }
}

impl ColumnDef {
    /// Returns `true` if the column is shown before any visibility toggle.
    pub fn initially_visible(&self) -> bool {
        self.visible && !self.default_hidden
    }
}

/// A column declaration: key, header, behavior flags and optional renderer.
///
/// # Example
///
/// ```
/// use tabula::{ColumnSpec, Sticky};
/// use serde_json::Value as Json;
///
/// let name = ColumnSpec::<Json>::new("name", "Name").sticky(Sticky::Left);
/// let salary = ColumnSpec::<Json>::new("salary", "Salary")
///     .searchable(false)
///     .default_hidden(true)
///     .render(|row: &Json| format!("${}", row["salary"]));
///
/// assert!(name.def().initially_visible());
/// assert!(!salary.def().initially_visible());
/// ```
pub struct ColumnSpec<T> {
    def: ColumnDef,
    renderer: Option<Arc<dyn Renderer<T>>>,
}

impl<T> Clone for ColumnSpec<T> {
    fn clone(&self) -> Self {
        ColumnSpec {
            def: self.def.clone(),
            renderer: self.renderer.clone(),
        }
    }
}

impl<T> fmt::Debug for ColumnSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("def", &self.def)
            .field("renderer", &self.renderer.is_some())
            .finish()
    }
}

impl<T> From<ColumnDef> for ColumnSpec<T> {
    fn from(def: ColumnDef) -> Self {
        ColumnSpec {
            def,
            renderer: None,
        }
    }
}

impl<T> ColumnSpec<T> {
    /// Creates a column with every flag at its default.
    pub fn new(key: impl Into<String>, header: impl Into<String>) -> Self {
        ColumnDef {
            key: key.into(),
            header: header.into(),
            ..ColumnDef::default()
        }
        .into()
    }

    pub fn sortable(mut self, yes: bool) -> Self {
        self.def.sortable = yes;
        self
    }

    pub fn searchable(mut self, yes: bool) -> Self {
        self.def.searchable = yes;
        self
    }

    pub fn visible(mut self, yes: bool) -> Self {
        self.def.visible = yes;
        self
    }

    pub fn default_hidden(mut self, yes: bool) -> Self {
        self.def.default_hidden = yes;
        self
    }

    pub fn sticky(mut self, side: Sticky) -> Self {
        self.def.sticky = Some(side);
        self
    }

    pub fn sort_mode(mut self, mode: SortMode) -> Self {
        self.def.sort_mode = mode;
        self
    }

    /// Attaches a renderer for this column's cells.
    pub fn render<R>(mut self, renderer: R) -> Self
    where
        R: Renderer<T> + 'static,
    {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    pub fn key(&self) -> &str {
        &self.def.key
    }

    pub fn header(&self) -> &str {
        &self.def.header
    }

    pub fn def(&self) -> &ColumnDef {
        &self.def
    }

    pub fn has_renderer(&self) -> bool {
        self.renderer.is_some()
    }
}

impl<T: Record> ColumnSpec<T> {
    /// Renders this column's cell for `record`.
    ///
    /// Without a renderer the cell is the field's string coercion, or empty
    /// when the field is absent.
    pub fn render_cell(&self, record: &T) -> String {
        match &self.renderer {
            Some(renderer) => renderer.render(record),
            None => record
                .field(&self.def.key)
                .coerce()
                .map(|c| c.into_owned())
                .unwrap_or_default(),
        }
    }
}

/// Collapses duplicate keys, last declaration wins. Callers report the
/// duplicates; see [`TableOptions::issues`](crate::TableOptions::issues).
///
/// The surviving column keeps the position of the first declaration so the
/// header order stays as written.
pub(crate) fn dedupe_columns<T>(columns: Vec<ColumnSpec<T>>) -> Vec<ColumnSpec<T>> {
    let mut out: Vec<ColumnSpec<T>> = Vec::with_capacity(columns.len());
    for column in columns {
        match out.iter_mut().find(|c| c.key() == column.key()) {
            Some(existing) => *existing = column,
            None => out.push(column),
        }
    }
    out
}
