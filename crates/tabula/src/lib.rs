//! Tabula - Generic tabular data engine for in-memory record collections.
//!
//! Tabula turns a collection of records and a column/filter declaration
//! into the view a list page shows:
//!
//! - Case-insensitive search across searchable columns
//! - Exact-match attribute filters, with `"all"` meaning "no constraint"
//! - Stable sorting with missing values always last
//! - Pagination with a sliding window of page buttons
//! - Selection keyed by record identity, with tri-state "select page"
//! - Column visibility toggles
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use tabula::{ColumnSpec, DataTable, Dir};
//!
//! let data = vec![
//!     json!({"id": "1", "name": "Bob", "age": 30}),
//!     json!({"id": "2", "name": "Ann"}),
//! ];
//!
//! let mut table = DataTable::builder(data)
//!     .column(ColumnSpec::new("name", "Name"))
//!     .column(ColumnSpec::new("age", "Age"))
//!     .selectable(true)
//!     .build();
//!
//! table.set_sort("age", Dir::Desc);
//! let names: Vec<_> = table.page_records().iter().map(|r| r["name"].clone()).collect();
//! assert_eq!(names, vec!["Bob", "Ann"]);
//!
//! table.toggle_all_on_page(true);
//! assert_eq!(table.selected_records().len(), 2);
//! ```
//!
//! # Pipeline
//!
//! Every read recomputes the view from scratch, in a fixed order:
//!
//! ```text
//! records ─▶ search ─▶ filters ─▶ sort ─▶ paginate ─▶ page slice
//! ```
//!
//! Nothing in the pipeline fails. Fields a record does not have read as
//! [`Value::None`]: they never match a search or a filter and always sort
//! last.
//!
//! # Records
//!
//! Anything implementing [`Record`] can be tabulated. JSON objects work out
//! of the box; plain structs can `#[derive(Record)]` with the default
//! `derive` feature.

mod collate;
mod column;
mod config;
mod error;
mod filter;
mod identity;
mod ordering;
pub mod pagination;
pub mod pipeline;
mod query;
mod record;
mod selection;
mod table;
mod value;
mod visibility;

// Re-export public API
pub use collate::collate;
pub use column::{ColumnDef, ColumnSpec, Renderer, Sticky};
pub use config::{
    TableOptions, DEFAULT_EMPTY_MESSAGE, DEFAULT_PAGE_SIZE_OPTIONS, DEFAULT_SEARCH_PLACEHOLDER,
};
pub use error::{ConfigError, ConfigIssue, Result};
pub use filter::{FilterOption, FilterSpec, ALL};
pub use identity::{fallback_id, IdResolver};
pub use ordering::{compare_for_sort, Dir, SortMode};
pub use pagination::PageInfo;
pub use query::{QueryState, DEFAULT_PAGE_SIZE};
pub use record::{Record, RecordLabel, ID_FIELD};
pub use selection::{HeaderState, Selection};
pub use table::{
    Cell, DataTable, DataTableBuilder, EmptyRow, HeaderCell, RowClickHandler, RowView,
    SelectionChangeHandler, TableView,
};
pub use value::{Number, Value};
pub use visibility::ColumnVisibility;

#[cfg(feature = "derive")]
pub use tabula_macros::Record;
