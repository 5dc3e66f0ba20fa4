//! Proc macros for Tabula.
//!
//! - [`Record`] - Generate a `tabula::Record` implementation from struct
//!   field annotations
//!
//! See `tabula/tests/record_derive.rs` for usage.

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Record` trait for plain structs.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `String` | Anything `AsRef<str>`, exposed borrowed |
/// | `Number` | Numeric primitive (`u8`..`u64`, `i8`..`i64`, `f32`, `f64`) |
/// | `Bool` | Boolean field |
/// | `Enum` | Enum field, tabulated by label - requires `RecordLabel` impl |
/// | `Text` | Anything `Display`, formatted on access |
/// | `id` | The field is the record identity (combine with a kind) |
/// | `skip` | Exclude this field |
/// | `rename = "..."` | Expose the field under a different column key |
///
/// Fields without a `#[record(...)]` attribute are not exposed.
/// `Option<_>` fields read as `Value::None` when empty, so they never match
/// a search or filter and always sort last.
///
/// # Generated Code
///
/// 1. Column key constants (e.g., `Employee::NAME`, `Employee::HIRE_DATE`)
/// 2. Implementation of `Record::field()`
/// 3. `Record::record_id()` when a field is marked `id`
///
/// # Example
///
/// ```ignore
/// use tabula::{ColumnSpec, DataTable, Record, RecordLabel};
///
/// enum Status { Active, OnLeave }
///
/// impl RecordLabel for Status {
///     fn record_label(&self) -> &str {
///         match self {
///             Status::Active => "active",
///             Status::OnLeave => "on_leave",
///         }
///     }
/// }
///
/// #[derive(Record)]
/// struct Employee {
///     #[record(String, id)]
///     email: String,
///
///     #[record(String)]
///     name: String,
///
///     #[record(Number)]
///     salary: Option<u32>,
///
///     #[record(Enum)]
///     status: Status,
///
///     #[record(skip)]
///     password_hash: String,
/// }
///
/// let table = DataTable::builder(employees)
///     .column(ColumnSpec::new(Employee::NAME, "Name"))
///     .column(ColumnSpec::new(Employee::SALARY, "Salary"))
///     .build();
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
