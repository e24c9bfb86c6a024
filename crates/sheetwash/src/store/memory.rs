//! In-memory store for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, SheetwashError};
use crate::input::RawTable;
use crate::table::Table;

use super::sanitize::{wire_rows, wire_text};
use super::{TableSink, TableSource};

/// Keeps worksheets as raw string grids, the way a spreadsheet would.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sheets: Mutex<HashMap<String, RawTable>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding one worksheet.
    pub fn with_sheet(worksheet: impl Into<String>, raw: RawTable) -> Self {
        let store = Self::new();
        store.insert(worksheet, raw);
        store
    }

    /// Put a raw worksheet into the store.
    pub fn insert(&self, worksheet: impl Into<String>, raw: RawTable) {
        if let Ok(mut sheets) = self.sheets.lock() {
            sheets.insert(worksheet.into(), raw);
        }
    }

    /// Get a copy of a worksheet.
    pub fn sheet(&self, worksheet: &str) -> Option<RawTable> {
        self.sheets.lock().ok()?.get(worksheet).cloned()
    }
}

impl TableSource for MemoryStore {
    fn fetch(&self, worksheet: &str) -> Result<RawTable> {
        self.sheet(worksheet).ok_or_else(|| {
            SheetwashError::EmptyData(format!("Worksheet '{}' not found", worksheet))
        })
    }

    fn origin(&self) -> &str {
        "memory"
    }
}

impl TableSink for MemoryStore {
    fn store(&self, worksheet: &str, table: &Table) -> Result<()> {
        let grid: Vec<Vec<String>> = wire_rows(table)
            .iter()
            .map(|row| row.iter().map(wire_text).collect())
            .collect();
        self.insert(worksheet, RawTable::from_grid(grid)?);
        Ok(())
    }

    fn target(&self) -> &str {
        "memory"
    }
}
