//! Table configuration.
//!
//! [`TableOptions`] holds everything about a table that can live in a file:
//! column declarations (without renderers), filters, page sizes, whether
//! rows are selectable, and the presentation strings. Load it from YAML or
//! JSON and hand it to [`DataTableBuilder::options`](crate::DataTableBuilder::options).
//!
//! ```
//! use tabula::TableOptions;
//!
//! let opts = TableOptions::from_yaml_str(r#"
//! pageSize: 25
//! selectable: true
//! columns:
//!   - { key: name, header: Name, sticky: left }
//!   - { key: salary, header: Salary, searchable: false, defaultHidden: true }
//! filters:
//!   - key: status
//!     label: Status
//!     options:
//!       - { label: All, value: all }
//!       - { label: Active, value: active }
//! "#).unwrap();
//!
//! assert_eq!(opts.page_size, 25);
//! assert_eq!(opts.page_size_options, vec![10, 25, 50, 100]);
//! assert!(opts.validate().is_ok());
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::column::ColumnDef;
use crate::error::{ConfigError, ConfigIssue, Result};
use crate::filter::FilterSpec;
use crate::query::DEFAULT_PAGE_SIZE;

pub const DEFAULT_PAGE_SIZE_OPTIONS: [usize; 4] = [10, 25, 50, 100];
pub const DEFAULT_SEARCH_PLACEHOLDER: &str = "Search...";
pub const DEFAULT_EMPTY_MESSAGE: &str = "No data found";

/// File-backed table settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TableOptions {
    /// Initial page size.
    pub page_size: usize,
    /// Page sizes the user may pick from.
    pub page_size_options: Vec<usize>,
    /// Adds the checkbox column and enables selection.
    pub selectable: bool,
    pub search_placeholder: String,
    /// Shown in the placeholder row when the page is empty.
    pub empty_message: String,
    pub columns: Vec<ColumnDef>,
    pub filters: Vec<FilterSpec>,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions {
            page_size: DEFAULT_PAGE_SIZE,
            page_size_options: DEFAULT_PAGE_SIZE_OPTIONS.to_vec(),
            selectable: false,
            search_placeholder: DEFAULT_SEARCH_PLACEHOLDER.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
            columns: Vec::new(),
            filters: Vec::new(),
        }
    }
}

impl TableOptions {
    pub fn from_yaml_str(s: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Reads a configuration file. `.yaml` and `.yml` files are parsed as
    /// YAML, everything else as JSON.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_str(&content),
            _ => Self::from_json_str(&content),
        }
    }

    /// Lists every inconsistency. Tables accept invalid options anyway and
    /// degrade gracefully; this is for callers that want to be strict.
    pub fn issues(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        let mut seen = HashSet::new();
        for column in &self.columns {
            if !seen.insert(column.key.as_str()) {
                issues.push(ConfigIssue::DuplicateColumn(column.key.clone()));
            }
        }

        let mut seen = HashSet::new();
        for filter in &self.filters {
            if !seen.insert(filter.key.as_str()) {
                issues.push(ConfigIssue::DuplicateFilter(filter.key.clone()));
            }
        }

        if self.page_size == 0 {
            issues.push(ConfigIssue::ZeroPageSize);
        }
        if self.page_size_options.is_empty() {
            issues.push(ConfigIssue::EmptyPageSizeOptions);
        } else if self.page_size > 0 && !self.page_size_options.contains(&self.page_size) {
            issues.push(ConfigIssue::PageSizeNotOffered(self.page_size));
        }

        issues
    }

    /// Fails with every issue found, if any.
    pub fn validate(&self) -> Result<()> {
        let issues = self.issues();
        if issues.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults() {
        let opts = TableOptions::default();
        assert_eq!(opts.page_size, 10);
        assert_eq!(opts.page_size_options, vec![10, 25, 50, 100]);
        assert!(!opts.selectable);
        assert_eq!(opts.empty_message, "No data found");
        assert!(opts.validate().is_ok());
    }

    #[test]
    fn json_partial_config_fills_defaults() {
        let opts = TableOptions::from_json_str(r#"{"selectable": true, "emptyMessage": "Nobody here"}"#)
            .unwrap();
        assert!(opts.selectable);
        assert_eq!(opts.empty_message, "Nobody here");
        assert_eq!(opts.page_size, 10);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let err = TableOptions::from_yaml_str("pageSize: [oops").unwrap_err();
        assert!(matches!(err, ConfigError::Yaml(_)));
    }

    #[test]
    fn validate_collects_all_issues() {
        let opts = TableOptions::from_yaml_str(
            r#"
pageSize: 7
pageSizeOptions: [5, 10]
columns:
  - { key: name, header: Name }
  - { key: name, header: Again }
filters:
  - { key: status, label: Status }
  - { key: status, label: Status }
"#,
        )
        .unwrap();
        let issues = opts.issues();
        assert_eq!(
            issues,
            vec![
                ConfigIssue::DuplicateColumn("name".into()),
                ConfigIssue::DuplicateFilter("status".into()),
                ConfigIssue::PageSizeNotOffered(7),
            ]
        );
        let err = opts.validate().unwrap_err();
        assert!(err.to_string().contains("declared more than once"));
    }

    #[test]
    fn zero_and_empty_options() {
        let opts = TableOptions {
            page_size: 0,
            page_size_options: Vec::new(),
            ..TableOptions::default()
        };
        assert_eq!(
            opts.issues(),
            vec![ConfigIssue::ZeroPageSize, ConfigIssue::EmptyPageSizeOptions]
        );
    }

    #[test]
    fn from_path_picks_format_by_extension() {
        let dir = tempfile::tempdir().unwrap();

        let yaml = dir.path().join("table.yml");
        std::fs::File::create(&yaml)
            .unwrap()
            .write_all(b"pageSize: 50\n")
            .unwrap();
        assert_eq!(TableOptions::from_path(&yaml).unwrap().page_size, 50);

        let json = dir.path().join("table.json");
        std::fs::write(&json, r#"{"pageSize": 25}"#).unwrap();
        assert_eq!(TableOptions::from_path(&json).unwrap().page_size, 25);
    }

    #[test]
    fn from_path_missing_file() {
        let err = TableOptions::from_path("/definitely/not/here.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
