//! Error types for the catalog crate.
//!
//! Every variant here is fatal to a run: they only surface while opening
//! or saving the catalog, never while matching individual titles.

use thiserror::Error;

/// Errors that can occur while loading, parsing, or saving catalog sheets
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog directory or sheet file could not be found
    #[error("Failed to open catalog file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading or writing a sheet
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Sheet is structurally broken (e.g. no header line)
    #[error("Parse error at line {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// A header the run depends on is not present in the sheet
    #[error("Sheet {sheet} is missing required column '{column}'")]
    MissingColumn { sheet: String, column: String },

    /// A cell value cannot be stored in the sheet format
    #[error("Invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
