//! Raw tabular data and source metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, SheetwashError};

/// Metadata about where a table came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Name of the source backend (e.g. "csv", "sheets").
    pub origin: String,
    /// Worksheet the data was read from.
    pub worksheet: String,
    /// SHA-256 hash of the raw header and cell contents.
    pub hash: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the data was fetched.
    pub fetched_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Describe a raw table fetched from `origin`.
    pub fn describe(origin: impl Into<String>, worksheet: impl Into<String>, raw: &RawTable) -> Self {
        Self {
            origin: origin.into(),
            worksheet: worksheet.into(),
            hash: raw.fingerprint(),
            row_count: raw.row_count(),
            column_count: raw.column_count(),
            fetched_at: Utc::now(),
        }
    }
}

/// Tabular data as it arrives from a source: a header and string cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Create a raw table, padding or truncating every row to the header width.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|mut row| {
                // Spreadsheet APIs drop trailing empty cells
                row.resize(width, String::new());
                row
            })
            .collect();

        Self { headers, rows }
    }

    /// Build from a grid whose first row is the header.
    pub fn from_grid(mut grid: Vec<Vec<String>>) -> Result<Self> {
        if grid.is_empty() {
            return Err(SheetwashError::EmptyData("No header row found".to_string()));
        }
        let headers = grid.remove(0);
        if headers.is_empty() {
            return Err(SheetwashError::EmptyData("No columns found".to_string()));
        }
        Ok(Self::new(headers, grid))
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Position of a header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Header row followed by data rows.
    pub fn to_grid(&self) -> Vec<Vec<String>> {
        std::iter::once(self.headers.clone())
            .chain(self.rows.iter().cloned())
            .collect()
    }

    /// SHA-256 over headers and cells, separated so that shifting content
    /// between cells changes the hash.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for row in std::iter::once(&self.headers).chain(self.rows.iter()) {
            for cell in row {
                hasher.update(cell.as_bytes());
                hasher.update([0x1f]);
            }
            hasher.update([0x1e]);
        }
        format!("sha256:{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_short_rows_are_padded() {
        let raw = RawTable::new(strings(&["a", "b", "c"]), vec![strings(&["1"])]);
        assert_eq!(raw.rows[0], strings(&["1", "", ""]));
    }

    #[test]
    fn test_long_rows_are_truncated() {
        let raw = RawTable::new(strings(&["a"]), vec![strings(&["1", "2"])]);
        assert_eq!(raw.rows[0], strings(&["1"]));
    }

    #[test]
    fn test_from_grid_empty() {
        assert!(matches!(
            RawTable::from_grid(Vec::new()),
            Err(SheetwashError::EmptyData(_))
        ));
    }

    #[test]
    fn test_fingerprint_depends_on_cell_boundaries() {
        let a = RawTable::new(strings(&["x", "y"]), vec![strings(&["ab", "c"])]);
        let b = RawTable::new(strings(&["x", "y"]), vec![strings(&["a", "bc"])]);
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert!(a.fingerprint().starts_with("sha256:"));
    }

    #[test]
    fn test_metadata_counts() {
        let raw = RawTable::new(strings(&["x", "y"]), vec![strings(&["1", "2"])]);
        let meta = SourceMetadata::describe("csv", "Arkusz1", &raw);
        assert_eq!(meta.row_count, 1);
        assert_eq!(meta.column_count, 2);
        assert_eq!(meta.worksheet, "Arkusz1");
    }
}
