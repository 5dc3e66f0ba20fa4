//! The table controller.
//!
//! [`DataTable`] owns one table's data snapshot, declarations and state, and
//! recomputes the whole view synchronously whenever it is read. Every
//! mutation is an explicit user action: typing in the search box, picking a
//! filter, clicking a header, paging, selecting rows or toggling columns.
//!
//! # Example
//!
//! ```
//! use serde_json::{json, Value as Json};
//! use tabula::{ColumnSpec, DataTable, FilterSpec};
//!
//! let employees: Vec<Json> = (1..=23)
//!     .map(|i| json!({"id": i.to_string(), "name": format!("Employee {i}"), "status": "active"}))
//!     .collect();
//!
//! let mut table = DataTable::builder(employees)
//!     .column(ColumnSpec::new("name", "Name"))
//!     .column(ColumnSpec::new("status", "Status").searchable(false))
//!     .filter(FilterSpec::new("status", "Status").option("Active", "active"))
//!     .selectable(true)
//!     .page_size(10)
//!     .build();
//!
//! table.set_page(2);
//! let view = table.view();
//! assert_eq!(view.page.total_pages, 3);
//! assert_eq!(view.page.window, vec![1, 2, 3]);
//! assert_eq!(view.rows.len(), 10);
//! assert_eq!(view.column_span(), 3);
//! ```

use std::fmt;

use serde::Serialize;

use crate::column::{dedupe_columns, ColumnSpec, Sticky};
use crate::config::{
    TableOptions, DEFAULT_EMPTY_MESSAGE, DEFAULT_PAGE_SIZE_OPTIONS, DEFAULT_SEARCH_PLACEHOLDER,
};
use crate::filter::FilterSpec;
use crate::identity::IdResolver;
use crate::ordering::Dir;
use crate::pagination::{page_range, total_pages, PageInfo};
use crate::pipeline::derive_indices;
use crate::query::{QueryState, DEFAULT_PAGE_SIZE};
use crate::record::Record;
use crate::selection::{HeaderState, Selection};
use crate::visibility::ColumnVisibility;

/// Called with the clicked record.
pub type RowClickHandler<T> = Box<dyn FnMut(&T)>;

/// Called with every selected record after each selection change.
pub type SelectionChangeHandler<T> = Box<dyn FnMut(&[&T])>;

/// One header cell of the rendered table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeaderCell<'t> {
    pub key: &'t str,
    pub header: &'t str,
    pub sortable: bool,
    /// Direction if the table is currently sorted by this column.
    pub sorted: Option<Dir>,
    pub sticky: Option<Sticky>,
}

/// One body cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "value")]
pub enum Cell {
    /// Row selection checkbox, present only on selectable tables.
    Checkbox(bool),
    Text(String),
}

/// One row of the current page.
#[derive(Debug, Clone, Serialize)]
pub struct RowView<'t, T> {
    pub id: String,
    #[serde(skip)]
    pub record: &'t T,
    pub selected: bool,
    pub cells: Vec<Cell>,
}

/// Placeholder row shown when the page has no records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyRow<'t> {
    pub message: &'t str,
    /// Number of cells the placeholder spans; equals a full row's cell count.
    pub span: usize,
}

/// Everything a renderer needs to draw the table once.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableView<'t, T> {
    pub columns: Vec<HeaderCell<'t>>,
    pub rows: Vec<RowView<'t, T>>,
    pub page: PageInfo,
    /// Records in the data snapshot, before search and filters.
    pub total_records: usize,
    pub selectable: bool,
    /// Header checkbox state; `None` when the table is not selectable.
    pub header_state: Option<HeaderState>,
    pub selected_count: usize,
    pub empty: Option<EmptyRow<'t>>,
    pub search_placeholder: &'t str,
}

impl<T> TableView<'_, T> {
    /// Cells per row: visible columns plus the checkbox column.
    pub fn column_span(&self) -> usize {
        self.columns.len() + usize::from(self.selectable)
    }
}

/// Builder for [`DataTable`].
pub struct DataTableBuilder<T> {
    data: Vec<T>,
    columns: Vec<ColumnSpec<T>>,
    filters: Vec<FilterSpec>,
    page_size: usize,
    page_size_options: Vec<usize>,
    selectable: bool,
    search_placeholder: String,
    empty_message: String,
    resolver: IdResolver<T>,
    on_row_click: Option<RowClickHandler<T>>,
    on_selection_change: Option<SelectionChangeHandler<T>>,
}

impl<T: Record> DataTableBuilder<T> {
    fn new(data: Vec<T>) -> Self {
        DataTableBuilder {
            data,
            columns: Vec::new(),
            filters: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            selectable: false,
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            resolver: IdResolver::default(),
            on_row_click: None,
            on_selection_change: None,
        }
    }

    /// Applies file-backed options. Columns and filters are appended to any
    /// already declared.
    pub fn options(mut self, options: TableOptions) -> Self {
        self.page_size = options.page_size;
        self.page_size_options = options.page_size_options;
        self.selectable = options.selectable;
        self.search_placeholder = options.search_placeholder;
        self.empty_message = options.empty_message;
        self.columns
            .extend(options.columns.into_iter().map(ColumnSpec::from));
        self.filters.extend(options.filters);
        self
    }

    pub fn column(mut self, column: ColumnSpec<T>) -> Self {
        self.columns.push(column);
        self
    }

    pub fn columns(mut self, columns: impl IntoIterator<Item = ColumnSpec<T>>) -> Self {
        self.columns.extend(columns);
        self
    }

    pub fn filter(mut self, filter: FilterSpec) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filters(mut self, filters: impl IntoIterator<Item = FilterSpec>) -> Self {
        self.filters.extend(filters);
        self
    }

    pub fn selectable(mut self, yes: bool) -> Self {
        self.selectable = yes;
        self
    }

    /// Initial page size.
    pub fn page_size(mut self, size: usize) -> Self {
        self.page_size = size;
        self
    }

    pub fn page_size_options(mut self, options: impl Into<Vec<usize>>) -> Self {
        self.page_size_options = options.into();
        self
    }

    pub fn search_placeholder(mut self, text: impl Into<String>) -> Self {
        self.search_placeholder = text.into();
        self
    }

    pub fn empty_message(mut self, text: impl Into<String>) -> Self {
        self.empty_message = text.into();
        self
    }

    /// Identity resolver used for selection and row clicks.
    pub fn row_id<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> String + 'static,
    {
        self.resolver = IdResolver::custom(f);
        self
    }

    pub fn on_row_click<F>(mut self, f: F) -> Self
    where
        F: FnMut(&T) + 'static,
    {
        self.on_row_click = Some(Box::new(f));
        self
    }

    pub fn on_selection_change<F>(mut self, f: F) -> Self
    where
        F: FnMut(&[&T]) + 'static,
    {
        self.on_selection_change = Some(Box::new(f));
        self
    }

    /// Builds the table. Never fails: configuration issues are logged and
    /// degraded as described on [`TableOptions::issues`].
    pub fn build(self) -> DataTable<T> {
        let snapshot = TableOptions {
            page_size: self.page_size,
            page_size_options: self.page_size_options.clone(),
            columns: self.columns.iter().map(|c| c.def().clone()).collect(),
            filters: self.filters.clone(),
            ..TableOptions::default()
        };
        for issue in snapshot.issues() {
            tracing::warn!(%issue, "table configuration issue");
        }

        let columns = dedupe_columns(self.columns);
        let visibility = ColumnVisibility::from_columns(&columns);
        let ids = self.resolver.resolve_all(&self.data);

        DataTable {
            data: self.data,
            ids,
            columns,
            filters: self.filters,
            query: QueryState::new(self.page_size),
            page_size_options: self.page_size_options,
            selectable: self.selectable,
            selection: Selection::new(),
            visibility,
            resolver: self.resolver,
            search_placeholder: self.search_placeholder,
            empty_message: self.empty_message,
            on_row_click: self.on_row_click,
            on_selection_change: self.on_selection_change,
        }
    }
}

/// A searchable, filterable, sortable, paginated, selectable table over an
/// in-memory data snapshot.
pub struct DataTable<T> {
    data: Vec<T>,
    // Identity of `data[i]`, resolved once per snapshot.
    ids: Vec<String>,
    columns: Vec<ColumnSpec<T>>,
    filters: Vec<FilterSpec>,
    query: QueryState,
    page_size_options: Vec<usize>,
    selectable: bool,
    selection: Selection,
    visibility: ColumnVisibility,
    resolver: IdResolver<T>,
    search_placeholder: String,
    empty_message: String,
    on_row_click: Option<RowClickHandler<T>>,
    on_selection_change: Option<SelectionChangeHandler<T>>,
}

impl<T> fmt::Debug for DataTable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataTable")
            .field("records", &self.data.len())
            .field("columns", &self.columns)
            .field("query", &self.query)
            .field("selectable", &self.selectable)
            .field("selection", &self.selection)
            .finish_non_exhaustive()
    }
}

impl<T: Record> DataTable<T> {
    pub fn builder(data: Vec<T>) -> DataTableBuilder<T> {
        DataTableBuilder::new(data)
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn columns(&self) -> &[ColumnSpec<T>] {
        &self.columns
    }

    pub fn filters(&self) -> &[FilterSpec] {
        &self.filters
    }

    pub fn query(&self) -> &QueryState {
        &self.query
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn page_size_options(&self) -> &[usize] {
        &self.page_size_options
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn search_placeholder(&self) -> &str {
        &self.search_placeholder
    }

    pub fn empty_message(&self) -> &str {
        &self.empty_message
    }

    /// Identity of the record at `index` in the data snapshot.
    pub fn id_at(&self, index: usize) -> Option<&str> {
        self.ids.get(index).map(String::as_str)
    }

    // ------------------------------------------------------------------
    // Data
    // ------------------------------------------------------------------

    /// Replaces the data snapshot.
    ///
    /// The current page is pulled back into range. Selected ids are kept even
    /// if no record carries them any more.
    pub fn set_data(&mut self, data: Vec<T>) {
        self.ids = self.resolver.resolve_all(&data);
        self.data = data;
        let pages = self.total_pages();
        self.query.clamp_page(pages);
        tracing::trace!(records = self.data.len(), "data replaced");
    }

    // ------------------------------------------------------------------
    // Query mutations
    // ------------------------------------------------------------------

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.query.set_search(text);
        tracing::trace!(search = self.query.search_text(), "search changed");
    }

    pub fn set_filter(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.query.set_filter(key, value);
        tracing::trace!(filters = ?self.query.active_filters(), "filter changed");
    }

    pub fn clear_filter(&mut self, key: &str) {
        self.query.clear_filter(key);
    }

    pub fn clear_filters(&mut self) {
        self.query.clear_filters();
    }

    /// Header click. Unknown and non-sortable columns are ignored; returns
    /// whether the sort changed.
    pub fn toggle_sort(&mut self, key: &str) -> bool {
        let sortable = self
            .columns
            .iter()
            .any(|c| c.key() == key && c.def().sortable);
        if !sortable {
            return false;
        }
        self.query.toggle_sort(key);
        tracing::trace!(key, dir = %self.query.sort_direction(), "sort toggled");
        true
    }

    /// Sorts by any field key, declared or not.
    pub fn set_sort(&mut self, key: impl Into<String>, dir: Dir) {
        self.query.set_sort(key, dir);
    }

    pub fn clear_sort(&mut self) {
        self.query.clear_sort();
    }

    /// Moves to `page`, clamped into `[1, total_pages]`.
    pub fn set_page(&mut self, page: usize) {
        let pages = self.total_pages();
        self.query.set_page(page);
        self.query.clamp_page(pages);
    }

    pub fn next_page(&mut self) {
        self.set_page(self.query.current_page().saturating_add(1));
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.query.current_page().saturating_sub(1));
    }

    pub fn first_page(&mut self) {
        self.set_page(1);
    }

    pub fn last_page(&mut self) {
        self.set_page(self.total_pages());
    }

    /// Changes the page size and returns to page 1.
    ///
    /// Sizes not listed in the page size options are refused.
    pub fn set_page_size(&mut self, size: usize) -> bool {
        if !self.page_size_options.is_empty() && !self.page_size_options.contains(&size) {
            tracing::warn!(size, options = ?self.page_size_options, "page size not offered");
            return false;
        }
        self.query.set_page_size(size);
        true
    }

    // ------------------------------------------------------------------
    // Derived view
    // ------------------------------------------------------------------

    /// Search, filters and sort applied; no pagination.
    pub fn derived_view(&self) -> Vec<&T> {
        self.derived_indices()
            .into_iter()
            .map(|i| &self.data[i])
            .collect()
    }

    /// Records on the current page.
    pub fn page_records(&self) -> Vec<&T> {
        self.page_indices()
            .into_iter()
            .map(|i| &self.data[i])
            .collect()
    }

    /// Identities of the records on the current page.
    pub fn page_ids(&self) -> Vec<&str> {
        self.page_indices()
            .into_iter()
            .map(|i| self.ids[i].as_str())
            .collect()
    }

    pub fn total_filtered(&self) -> usize {
        self.derived_indices().len()
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_filtered(), self.query.page_size())
    }

    pub fn page_info(&self) -> PageInfo {
        PageInfo::new(
            self.query.current_page(),
            self.query.page_size(),
            self.total_filtered(),
        )
    }

    fn derived_indices(&self) -> Vec<usize> {
        derive_indices(&self.data, &self.columns, &self.query)
    }

    fn page_indices(&self) -> Vec<usize> {
        let derived = self.derived_indices();
        let page = PageInfo::new(
            self.query.current_page(),
            self.query.page_size(),
            derived.len(),
        );
        derived[page_range(page.current_page, page.page_size, derived.len())].to_vec()
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    pub fn is_selected(&self, id: &str) -> bool {
        self.selection.is_selected(id)
    }

    /// Flips one row's selection. No-op on non-selectable tables.
    pub fn toggle_row(&mut self, id: &str) {
        if !self.selectable {
            return;
        }
        self.selection.toggle(id);
        self.notify_selection();
    }

    /// Header checkbox: selects or deselects exactly the current page.
    pub fn toggle_all_on_page(&mut self, checked: bool) {
        if !self.selectable {
            return;
        }
        let page: Vec<usize> = self.page_indices();
        let changed = self
            .selection
            .toggle_all(page.iter().map(|&i| self.ids[i].as_str()), checked);
        if changed {
            self.notify_selection();
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selection.clear() {
            self.notify_selection();
        }
    }

    /// Selected records resolved against the current snapshot.
    pub fn selected_records(&self) -> Vec<&T> {
        self.selection.selected_records(&self.data, &self.resolver)
    }

    /// Header checkbox state for the current page.
    pub fn header_state(&self) -> HeaderState {
        self.selection.header_state(self.page_ids())
    }

    fn notify_selection(&mut self) {
        tracing::trace!(selected = self.selection.len(), "selection changed");
        if let Some(handler) = self.on_selection_change.as_mut() {
            let selected = self.selection.selected_records(&self.data, &self.resolver);
            handler(selected.as_slice());
        }
    }

    // ------------------------------------------------------------------
    // Row clicks
    // ------------------------------------------------------------------

    /// Invokes the row click handler for the record with `id`. When ids
    /// collide the last record wins. Returns whether a record was found.
    pub fn click_row(&mut self, id: &str) -> bool {
        let Some(index) = self.ids.iter().rposition(|candidate| candidate == id) else {
            return false;
        };
        if let Some(handler) = self.on_row_click.as_mut() {
            handler(&self.data[index]);
        }
        true
    }

    // ------------------------------------------------------------------
    // Column visibility
    // ------------------------------------------------------------------

    /// Shows or hides a column. Returns the new visibility.
    pub fn toggle_column(&mut self, key: &str) -> bool {
        self.visibility.toggle(key)
    }

    pub fn is_column_visible(&self, key: &str) -> bool {
        self.visibility.is_visible(key)
    }

    pub fn visible_columns(&self) -> Vec<&ColumnSpec<T>> {
        self.visibility.visible_columns(&self.columns)
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Computes the full view for the current state.
    pub fn view(&self) -> TableView<'_, T> {
        let derived = self.derived_indices();
        let page = PageInfo::new(
            self.query.current_page(),
            self.query.page_size(),
            derived.len(),
        );
        let visible = self.visible_columns();

        let columns: Vec<HeaderCell<'_>> = visible
            .iter()
            .map(|&c| HeaderCell {
                key: c.key(),
                header: c.header(),
                sortable: c.def().sortable,
                sorted: (self.query.sort_key() == Some(c.key()))
                    .then_some(self.query.sort_direction()),
                sticky: c.def().sticky,
            })
            .collect();

        let span = columns.len() + usize::from(self.selectable);
        let range = page_range(page.current_page, page.page_size, derived.len());
        let rows: Vec<RowView<'_, T>> = derived[range]
            .iter()
            .map(|&i| {
                let record = &self.data[i];
                let id = self.ids[i].clone();
                let selected = self.selection.is_selected(&id);
                let mut cells = Vec::with_capacity(span);
                if self.selectable {
                    cells.push(Cell::Checkbox(selected));
                }
                cells.extend(visible.iter().map(|c| Cell::Text(c.render_cell(record))));
                RowView {
                    id,
                    record,
                    selected,
                    cells,
                }
            })
            .collect();

        let header_state = self
            .selectable
            .then(|| self.selection.header_state(rows.iter().map(|r| r.id.as_str())));
        let empty = rows.is_empty().then(|| EmptyRow {
            message: &self.empty_message,
            span,
        });

        TableView {
            columns,
            rows,
            page,
            total_records: self.data.len(),
            selectable: self.selectable,
            header_state,
            selected_count: self.selection.len(),
            empty,
            search_placeholder: &self.search_placeholder,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value as Json};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn staff(n: usize) -> Vec<Json> {
        (1..=n)
            .map(|i| {
                json!({
                    "id": format!("e{i}"),
                    "name": format!("Person {i:02}"),
                    "status": if i % 2 == 0 { "active" } else { "inactive" },
                })
            })
            .collect()
    }

    fn table(n: usize) -> DataTable<Json> {
        DataTable::builder(staff(n))
            .column(ColumnSpec::new("name", "Name"))
            .column(ColumnSpec::new("status", "Status").sortable(false))
            .selectable(true)
            .page_size(10)
            .build()
    }

    #[test]
    fn set_page_clamps() {
        let mut t = table(23);
        t.set_page(99);
        assert_eq!(t.query().current_page(), 3);
        t.set_page(0);
        assert_eq!(t.query().current_page(), 1);
    }

    #[test]
    fn next_and_prev_stop_at_edges() {
        let mut t = table(23);
        t.prev_page();
        assert_eq!(t.query().current_page(), 1);
        t.last_page();
        t.next_page();
        assert_eq!(t.query().current_page(), 3);
        t.first_page();
        assert_eq!(t.query().current_page(), 1);
    }

    #[test]
    fn set_page_size_refuses_unknown_sizes() {
        let mut t = table(23);
        t.set_page(2);
        assert!(!t.set_page_size(7));
        assert_eq!(t.query().current_page(), 2);
        assert!(t.set_page_size(25));
        assert_eq!(t.query().current_page(), 1);
        assert_eq!(t.total_pages(), 1);
    }

    #[test]
    fn toggle_sort_ignores_unsortable_and_unknown() {
        let mut t = table(3);
        assert!(!t.toggle_sort("status"));
        assert!(!t.toggle_sort("nope"));
        assert_eq!(t.query().sort_key(), None);
        assert!(t.toggle_sort("name"));
        assert_eq!(t.query().sort_key(), Some("name"));
    }

    #[test]
    fn set_data_clamps_page_and_keeps_selection() {
        let mut t = table(23);
        t.toggle_row("e23");
        t.set_page(3);
        t.set_data(staff(5));
        assert_eq!(t.query().current_page(), 1);
        assert!(t.is_selected("e23"));
        assert!(t.selected_records().is_empty());
    }

    #[test]
    fn selection_is_noop_when_not_selectable() {
        let mut t = DataTable::builder(staff(3))
            .column(ColumnSpec::new("name", "Name"))
            .build();
        t.toggle_row("e1");
        t.toggle_all_on_page(true);
        assert!(t.selection().is_empty());
        assert_eq!(t.view().header_state, None);
    }

    #[test]
    fn selection_change_reports_materialized_records() {
        let seen: Rc<RefCell<Vec<Vec<String>>>> = Rc::default();
        let sink = Rc::clone(&seen);
        let mut t = DataTable::builder(staff(3))
            .column(ColumnSpec::new("name", "Name"))
            .selectable(true)
            .on_selection_change(move |rows: &[&Json]| {
                sink.borrow_mut().push(
                    rows.iter()
                        .map(|r| r["name"].as_str().unwrap_or_default().to_string())
                        .collect(),
                );
            })
            .build();

        t.toggle_row("e2");
        t.toggle_all_on_page(true);
        t.toggle_all_on_page(true);
        t.clear_selection();

        let seen = seen.borrow();
        assert_eq!(
            *seen,
            vec![
                vec!["Person 02".to_string()],
                vec![
                    "Person 01".to_string(),
                    "Person 02".to_string(),
                    "Person 03".to_string()
                ],
                vec![],
            ]
        );
    }

    #[test]
    fn click_row_resolves_last_colliding_record() {
        let clicked: Rc<RefCell<Vec<String>>> = Rc::default();
        let sink = Rc::clone(&clicked);
        let data = vec![
            json!({"id": "x", "name": "first"}),
            json!({"id": "x", "name": "second"}),
        ];
        let mut t = DataTable::builder(data)
            .column(ColumnSpec::new("name", "Name"))
            .on_row_click(move |r: &Json| {
                sink.borrow_mut()
                    .push(r["name"].as_str().unwrap_or_default().to_string())
            })
            .build();

        assert!(t.click_row("x"));
        assert!(!t.click_row("missing"));
        assert_eq!(*clicked.borrow(), vec!["second".to_string()]);
    }

    #[test]
    fn view_cells_match_column_span() {
        let mut t = table(12);
        t.toggle_row("e1");
        let view = t.view();
        assert_eq!(view.column_span(), 3);
        for row in &view.rows {
            assert_eq!(row.cells.len(), view.column_span());
        }
        assert_eq!(view.rows[0].cells[0], Cell::Checkbox(true));
        assert_eq!(view.rows[0].cells[1], Cell::Text("Person 01".into()));
        assert_eq!(view.header_state, Some(HeaderState::Indeterminate));
        assert!(view.empty.is_none());
    }

    #[test]
    fn view_marks_sorted_column() {
        let mut t = table(3);
        t.toggle_sort("name");
        t.toggle_sort("name");
        let view = t.view();
        assert_eq!(view.columns[0].sorted, Some(Dir::Desc));
        assert_eq!(view.columns[1].sorted, None);
        assert_eq!(view.rows[0].id, "e3");
    }

    #[test]
    fn empty_row_spans_all_cells() {
        let mut t = table(5);
        t.set_search("nobody matches this");
        let view = t.view();
        assert!(view.rows.is_empty());
        assert_eq!(
            view.empty,
            Some(EmptyRow {
                message: "No data found",
                span: 3
            })
        );
        assert_eq!(view.header_state, Some(HeaderState::Unchecked));
    }

    #[test]
    fn hiding_all_columns_leaves_only_checkbox() {
        let mut t = table(2);
        t.toggle_column("name");
        t.toggle_column("status");
        let view = t.view();
        assert!(view.columns.is_empty());
        assert_eq!(view.column_span(), 1);
        assert_eq!(view.rows[0].cells, vec![Cell::Checkbox(false)]);
    }

    #[test]
    fn positional_ids_without_record_id() {
        let data = vec![json!({"name": "b"}), json!({"name": "a"})];
        let mut t = DataTable::builder(data)
            .column(ColumnSpec::new("name", "Name"))
            .selectable(true)
            .build();
        t.toggle_sort("name");
        assert_eq!(t.page_ids(), vec!["row-1", "row-0"]);
        t.toggle_row("row-0");
        t.toggle_sort("name");
        assert_eq!(t.page_ids(), vec!["row-0", "row-1"]);
        assert!(t.view().rows[0].selected);
    }

    #[test]
    fn options_apply() {
        let opts = TableOptions::from_yaml_str(
            r#"
pageSize: 25
selectable: true
emptyMessage: Nothing
columns:
  - { key: name, header: Name }
  - { key: status, header: Status, defaultHidden: true }
"#,
        )
        .unwrap();
        let t = DataTable::builder(staff(30)).options(opts).build();
        assert!(t.is_selectable());
        assert_eq!(t.query().page_size(), 25);
        assert_eq!(t.total_pages(), 2);
        assert_eq!(t.empty_message(), "Nothing");
        assert_eq!(t.visible_columns().len(), 1);
    }

    /// Counts WARN events emitted while installed.
    struct WarnCounter(std::sync::Arc<std::sync::atomic::AtomicUsize>);

    impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for WarnCounter {
        fn on_event(
            &self,
            event: &tracing::Event<'_>,
            _ctx: tracing_subscriber::layer::Context<'_, S>,
        ) {
            if *event.metadata().level() == tracing::Level::WARN {
                self.0.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn duplicate_column_warns_once() {
        use tracing_subscriber::layer::SubscriberExt;

        let warnings = std::sync::Arc::new(std::sync::atomic::AtomicUsize::new(0));
        let subscriber =
            tracing_subscriber::registry().with(WarnCounter(std::sync::Arc::clone(&warnings)));
        let t = tracing::subscriber::with_default(subscriber, || {
            DataTable::builder(staff(1))
                .column(ColumnSpec::new("name", "Old"))
                .column(ColumnSpec::new("name", "New"))
                .build()
        });

        assert_eq!(t.columns().len(), 1);
        assert_eq!(warnings.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[test]
    fn duplicate_columns_last_wins() {
        let t = DataTable::builder(staff(1))
            .column(ColumnSpec::new("name", "Old"))
            .column(ColumnSpec::new("name", "New"))
            .build();
        assert_eq!(t.columns().len(), 1);
        assert_eq!(t.view().columns[0].header, "New");
    }
}
