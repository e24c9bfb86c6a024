//! Table sources and sinks.
//!
//! A source supplies raw worksheet contents; a sink accepts a typed table and
//! persists it after sanitization. Any retry or timeout policy belongs to the
//! implementation, never to the cleaning code.
//!
//! # Implementations
//!
//! - [`CsvStore`] - a directory with one CSV file per worksheet
//! - [`SheetsClient`] - remote spreadsheet over HTTPS (requires an access token)
//! - [`MemoryStore`] - in-process worksheets for tests

mod csv;
mod memory;
mod sanitize;
mod sheets;

pub use self::csv::CsvStore;
pub use memory::MemoryStore;
pub use sanitize::{wire_rows, wire_text, wire_value};
pub use sheets::{SheetsClient, SheetsConfig, TOKEN_ENV};

use crate::error::Result;
use crate::input::RawTable;
use crate::table::Table;

/// Supplies raw worksheet contents.
pub trait TableSource {
    /// Read a worksheet: header row plus data rows.
    fn fetch(&self, worksheet: &str) -> Result<RawTable>;

    /// Short name of the backend (for logging and metadata).
    fn origin(&self) -> &str;
}

/// Accepts tables for persistence.
pub trait TableSink {
    /// Replace the contents of a worksheet with `table`.
    fn store(&self, worksheet: &str, table: &Table) -> Result<()>;

    /// Short name of the backend (for logging).
    fn target(&self) -> &str;
}
