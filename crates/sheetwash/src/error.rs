//! Error types for the sheetwash library.

use std::path::PathBuf;
use thiserror::Error;

use crate::table::ColumnType;

/// Main error type for sheetwash operations.
#[derive(Debug, Error)]
pub enum SheetwashError {
    /// Error reading or writing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A column the pipeline depends on is absent from the table.
    #[error("Required column '{column}' not found")]
    MissingColumn { column: String },

    /// A column was expected to hold numbers.
    #[error("Column '{column}' is {found:?}, expected a numeric column")]
    NotNumeric { column: String, found: ColumnType },

    /// A column does not have the same number of cells as the table has rows.
    #[error("Column '{column}' has {found} cells, expected {expected}")]
    ColumnLength {
        column: String,
        expected: usize,
        found: usize,
    },

    /// Two columns share a name.
    #[error("Duplicate column: {0}")]
    DuplicateColumn(String),

    /// Empty sheet, empty file or a table with no rows.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network failure talking to the spreadsheet service.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The spreadsheet service answered with a non-success status.
    #[error("Spreadsheet API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Result type alias for sheetwash operations.
pub type Result<T> = std::result::Result<T, SheetwashError>;
