//! Directory-backed store: one CSV file per worksheet.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SheetwashError};
use crate::input::{Parser, RawTable};
use crate::table::Table;

use super::sanitize::{wire_rows, wire_text};
use super::{TableSink, TableSource};

/// Reads and writes `<dir>/<worksheet>.csv`.
#[derive(Debug, Clone)]
pub struct CsvStore {
    dir: PathBuf,
    parser: Parser,
}

impl CsvStore {
    /// Create a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            parser: Parser::new(),
        }
    }

    /// Use a specific parser for reading.
    pub fn with_parser(mut self, parser: Parser) -> Self {
        self.parser = parser;
        self
    }

    /// Root directory of the store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing a worksheet.
    pub fn path_for(&self, worksheet: &str) -> PathBuf {
        self.dir.join(format!("{}.csv", worksheet))
    }

    /// Write raw rows as-is, e.g. generated data.
    pub fn store_raw(&self, worksheet: &str, raw: &RawTable) -> Result<PathBuf> {
        let path = self.path_for(worksheet);
        write_grid(&path, raw.to_grid())?;
        Ok(path)
    }
}

impl TableSource for CsvStore {
    fn fetch(&self, worksheet: &str) -> Result<RawTable> {
        self.parser.parse_file(self.path_for(worksheet))
    }

    fn origin(&self) -> &str {
        "csv"
    }
}

impl TableSink for CsvStore {
    fn store(&self, worksheet: &str, table: &Table) -> Result<()> {
        let grid = wire_rows(table)
            .iter()
            .map(|row| row.iter().map(wire_text).collect())
            .collect();
        let path = self.path_for(worksheet);
        write_grid(&path, grid)?;

        tracing::info!("Data saved to worksheet '{}' ({})", worksheet, path.display());
        Ok(())
    }

    fn target(&self) -> &str {
        "csv"
    }
}

/// Write rows to a CSV file, creating the parent directory if needed.
pub(crate) fn write_grid(path: &Path, grid: Vec<Vec<String>>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| SheetwashError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in grid {
        writer.write_record(&row)?;
    }
    writer.flush().map_err(|e| SheetwashError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
