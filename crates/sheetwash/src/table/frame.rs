//! Row-aligned table of named, typed columns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetwashError};

use super::column::{Column, ColumnProfile};
use super::types::{Cell, ColumnType};

/// An ordered set of named columns that all have the same number of rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    columns: IndexMap<String, Column>,
    row_count: usize,
}

impl Table {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, column)` pairs.
    pub fn from_columns<S: Into<String>>(
        columns: impl IntoIterator<Item = (S, Column)>,
    ) -> Result<Self> {
        let mut table = Self::new();
        for (name, column) in columns {
            table.push_column(name, column)?;
        }
        Ok(table)
    }

    /// Append a column.
    ///
    /// The first column fixes the row count; later columns must match it.
    /// Every cell must fit the column's type tag.
    pub fn push_column(&mut self, name: impl Into<String>, column: Column) -> Result<()> {
        let name = name.into();

        if self.columns.contains_key(&name) {
            return Err(SheetwashError::DuplicateColumn(name));
        }

        if !self.columns.is_empty() && column.len() != self.row_count {
            return Err(SheetwashError::ColumnLength {
                column: name,
                expected: self.row_count,
                found: column.len(),
            });
        }

        if let Some(cell) = column.cells().iter().find(|c| !c.fits(column.column_type)) {
            return Err(SheetwashError::Config(format!(
                "Cell '{}' does not fit {} column '{}'",
                cell, column.column_type, name
            )));
        }

        self.row_count = column.len();
        self.columns.insert(name, column);
        Ok(())
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(|k| k.as_str()).collect()
    }

    /// Iterate over `(name, column)` pairs in order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate mutably over `(name, column)` pairs in order.
    pub(crate) fn columns_mut(&mut self) -> impl Iterator<Item = (&str, &mut Column)> {
        self.columns.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// Get a column by name, failing if it is absent.
    pub fn require_column(&self, name: &str) -> Result<&Column> {
        self.columns
            .get(name)
            .ok_or_else(|| SheetwashError::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Get a column by name, failing if it is absent or not numeric.
    pub fn require_numeric(&self, name: &str) -> Result<&Column> {
        let column = self.require_column(name)?;
        if !column.column_type.is_numeric() {
            return Err(SheetwashError::NotNumeric {
                column: name.to_string(),
                found: column.column_type,
            });
        }
        Ok(column)
    }

    /// Names of columns with the given type predicate.
    pub fn names_where(&self, predicate: impl Fn(ColumnType) -> bool) -> Vec<String> {
        self.columns
            .iter()
            .filter(|(_, c)| predicate(c.column_type))
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Get a specific cell.
    pub fn get(&self, row: usize, column: &str) -> Option<&Cell> {
        self.columns.get(column).and_then(|c| c.get(row))
    }

    /// Cells of one row, in column order.
    pub fn row(&self, row: usize) -> Option<Vec<&Cell>> {
        if row >= self.row_count {
            return None;
        }
        Some(self.columns.values().filter_map(|c| c.get(row)).collect())
    }

    /// Total number of missing cells across the whole table.
    pub fn missing_count(&self) -> usize {
        self.columns.values().map(Column::missing_count).sum()
    }

    /// Number of non-missing cells in a row.
    pub fn row_present_count(&self, row: usize) -> usize {
        self.columns
            .values()
            .filter(|c| c.get(row).is_some_and(|cell| !cell.is_missing()))
            .count()
    }

    /// Keep the rows for which `keep` returns true; returns how many were removed.
    pub fn retain_rows(&mut self, mut keep: impl FnMut(&Self, usize) -> bool) -> usize {
        let view: &Self = self;
        let mask: Vec<bool> = (0..view.row_count).map(|row| keep(view, row)).collect();
        let kept = mask.iter().filter(|k| **k).count();

        for column in self.columns.values_mut() {
            column.retain_rows(&mask);
        }

        let removed = self.row_count - kept;
        self.row_count = kept;
        removed
    }

    /// Copy of the first `n` rows.
    pub fn head(&self, n: usize) -> Table {
        let mut head = self.clone();
        head.retain_rows(|_, row| row < n);
        head
    }

    /// Per-column profile in column order.
    pub fn profile(&self) -> IndexMap<String, ColumnProfile> {
        self.columns
            .iter()
            .map(|(name, column)| (name.clone(), column.profile()))
            .collect()
    }
}
