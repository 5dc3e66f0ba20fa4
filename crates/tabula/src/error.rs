//! Error types for the tabula crate.
//!
//! Table operations never fail. Errors only come from loading and
//! validating a configuration.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from loading or validating a [`TableOptions`](crate::TableOptions).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed YAML.
    #[error("invalid YAML table config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed JSON.
    #[error("invalid JSON table config: {0}")]
    Json(#[from] serde_json::Error),

    /// Well-formed but inconsistent configuration.
    #[error("invalid table config: {}", join_issues(.0))]
    Invalid(Vec<ConfigIssue>),
}

/// A single inconsistency found by [`TableOptions::validate`](crate::TableOptions::validate).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigIssue {
    #[error("column key '{0}' is declared more than once")]
    DuplicateColumn(String),

    #[error("filter key '{0}' is declared more than once")]
    DuplicateFilter(String),

    #[error("page size options are empty")]
    EmptyPageSizeOptions,

    #[error("page size must be at least 1")]
    ZeroPageSize,

    #[error("page size {0} is not one of the offered options")]
    PageSizeNotOffered(usize),
}

fn join_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result type for configuration loading.
pub type Result<T> = std::result::Result<T, ConfigError>;
