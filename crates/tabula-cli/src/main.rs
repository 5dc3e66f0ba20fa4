//! Tabula - query a JSON record file from the command line.
//!
//! ```text
//! tabula --data staff.json --config staff.yaml --search ann --sort age --desc
//! ```

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde_json::Value as Json;
use tabula::{Cell, ColumnSpec, DataTable, Dir, TableOptions, TableView};
use tracing::debug;

/// Search, filter, sort and paginate a JSON array of records
#[derive(Parser, Debug)]
#[command(name = "tabula")]
#[command(version)]
#[command(about = "Search, filter, sort and paginate a JSON array of records")]
pub struct Args {
    /// Path to a JSON file holding an array of objects
    #[arg(long)]
    pub data: PathBuf,

    /// Table configuration (.yaml/.yml or .json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Case-insensitive search across searchable columns
    #[arg(short, long)]
    pub search: Option<String>,

    /// Exact-match filter, as key=value (repeatable)
    #[arg(short, long, value_parser = parse_filter)]
    pub filter: Vec<(String, String)>,

    /// Column key to sort by
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long, requires = "sort")]
    pub desc: bool,

    /// Page to show (clamped into range)
    #[arg(short, long, default_value = "1")]
    pub page: usize,

    /// Page size; must be one of the configured options
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Toggle a column's visibility on (repeatable)
    #[arg(long)]
    pub show: Vec<String>,

    /// Toggle a column's visibility off (repeatable)
    #[arg(long)]
    pub hide: Vec<String>,

    /// Select a row by id (repeatable); makes the table selectable
    #[arg(long)]
    pub select: Vec<String>,
}

fn parse_filter(s: &str) -> std::result::Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got '{}'", s)),
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let table = build_table(&args)?;
    print!("{}", render(&table.view()));
    Ok(())
}

/// Logs go to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    // Only fails if a subscriber is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_records(path: &Path) -> Result<Vec<Json>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let parsed: Json = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;
    match parsed {
        Json::Array(records) => Ok(records),
        _ => bail!("{} must contain a JSON array of records", path.display()),
    }
}

/// One column per key of the first record, in key order.
fn inferred_columns(records: &[Json]) -> Vec<ColumnSpec<Json>> {
    records
        .first()
        .and_then(Json::as_object)
        .map(|obj| {
            obj.keys()
                .map(|key| ColumnSpec::new(key.as_str(), key.as_str()))
                .collect()
        })
        .unwrap_or_default()
}

pub fn build_table(args: &Args) -> Result<DataTable<Json>> {
    let records = load_records(&args.data)?;
    let options = match &args.config {
        Some(path) => TableOptions::from_path(path)?,
        None => TableOptions::default(),
    };
    let selectable = options.selectable || !args.select.is_empty();

    let inferred = if options.columns.is_empty() {
        inferred_columns(&records)
    } else {
        Vec::new()
    };
    let mut table = DataTable::builder(records)
        .columns(inferred)
        .options(options)
        .selectable(selectable)
        .build();
    debug!(records = table.data().len(), "table loaded");

    if let Some(search) = &args.search {
        table.set_search(search.as_str());
    }
    for (key, value) in &args.filter {
        table.set_filter(key.as_str(), value.as_str());
    }
    if let Some(key) = &args.sort {
        let dir = if args.desc { Dir::Desc } else { Dir::Asc };
        table.set_sort(key.as_str(), dir);
    }
    if let Some(size) = args.page_size {
        if !table.set_page_size(size) {
            bail!(
                "page size {} is not offered (choose from {:?})",
                size,
                table.page_size_options()
            );
        }
    }
    for key in &args.show {
        if !table.is_column_visible(key) {
            table.toggle_column(key);
        }
    }
    for key in &args.hide {
        if table.is_column_visible(key) {
            table.toggle_column(key);
        }
    }
    for id in &args.select {
        if !table.is_selected(id) {
            table.toggle_row(id);
        }
    }
    table.set_page(args.page);

    Ok(table)
}

/// Plain-text rendering: header, tab-separated rows, footer.
pub fn render<T>(view: &TableView<'_, T>) -> String {
    let mut out = String::new();

    let mut header: Vec<&str> = Vec::with_capacity(view.column_span());
    if view.selectable {
        header.push(match view.header_state {
            Some(tabula::HeaderState::Checked) => "[x]",
            Some(tabula::HeaderState::Indeterminate) => "[-]",
            _ => "[ ]",
        });
    }
    header.extend(view.columns.iter().map(|c| c.header));
    out.push_str(&header.join("\t"));
    out.push('\n');

    for row in &view.rows {
        let cells: Vec<&str> = row
            .cells
            .iter()
            .map(|cell| match cell {
                Cell::Checkbox(true) => "[x]",
                Cell::Checkbox(false) => "[ ]",
                Cell::Text(text) => text.as_str(),
            })
            .collect();
        out.push_str(&cells.join("\t"));
        out.push('\n');
    }

    if let Some(empty) = &view.empty {
        out.push_str(empty.message);
        out.push('\n');
    }

    let page = &view.page;
    let window: Vec<String> = page
        .window
        .iter()
        .map(|p| {
            if *p == page.current_page {
                format!("*{}", p)
            } else {
                p.to_string()
            }
        })
        .collect();
    out.push_str(&format!(
        "Showing {}-{} of {} | Page {}/{} | [{}]",
        page.first_item,
        page.last_item,
        page.total_filtered,
        page.current_page,
        page.total_pages,
        window.join(" ")
    ));
    if view.selectable {
        out.push_str(&format!(" | {} selected", view.selected_count));
    }
    out.push('\n');
    out
}
