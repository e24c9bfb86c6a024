//! Column storage and per-column statistics.

use serde::{Deserialize, Serialize};

use super::types::{Cell, ColumnType};

/// Counts describing the contents of a single column.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Nominal type of the column.
    pub column_type: ColumnType,
    /// Total number of cells (including missing).
    pub count: usize,
    /// Number of missing cells.
    pub missing_count: usize,
    /// Number of empty-string cells (text columns only).
    pub empty_count: usize,
    /// Number of zero values (numeric columns only).
    pub zero_count: usize,
}

impl ColumnProfile {
    /// Get the missing percentage.
    pub fn missing_percentage(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            (self.missing_count as f64 / self.count as f64) * 100.0
        }
    }
}

/// A typed column of cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Type tag, maintained explicitly rather than re-inferred.
    pub column_type: ColumnType,
    cells: Vec<Cell>,
}

impl Column {
    /// Create a column. Callers are responsible for type consistency;
    /// [`Table::push_column`](super::Table::push_column) checks it.
    pub fn new(column_type: ColumnType, cells: Vec<Cell>) -> Self {
        Self { column_type, cells }
    }

    /// Create a text column from string values.
    pub fn text<S: Into<String>>(values: impl IntoIterator<Item = S>) -> Self {
        Self::new(
            ColumnType::Text,
            values.into_iter().map(|v| Cell::Text(v.into())).collect(),
        )
    }

    /// Create a numeric column; `None` becomes a missing cell.
    pub fn numeric(column_type: ColumnType, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self::new(
            column_type,
            values
                .into_iter()
                .map(|v| v.map(Cell::Number).unwrap_or(Cell::Missing))
                .collect(),
        )
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the column has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// All cells in row order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Mutable access to the cells. The number of cells must not change.
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// Get a single cell.
    pub fn get(&self, row: usize) -> Option<&Cell> {
        self.cells.get(row)
    }

    /// Count of missing cells.
    pub fn missing_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_missing()).count()
    }

    /// Non-missing numeric values in row order.
    pub fn numbers(&self) -> impl Iterator<Item = f64> + '_ {
        self.cells.iter().filter_map(Cell::as_number)
    }

    /// Median of the non-missing numeric values.
    ///
    /// Returns `None` when the column holds no numbers.
    pub fn median(&self) -> Option<f64> {
        let mut values: Vec<f64> = self.numbers().collect();
        if values.is_empty() {
            return None;
        }
        values.sort_by(|a, b| a.total_cmp(b));

        let mid = values.len() / 2;
        if values.len() % 2 == 1 {
            Some(values[mid])
        } else {
            Some((values[mid - 1] + values[mid]) / 2.0)
        }
    }

    /// Most frequent non-missing text value. Ties go to the value seen first.
    pub fn mode_text(&self) -> Option<&str> {
        let mut counts: indexmap::IndexMap<&str, usize> = indexmap::IndexMap::new();
        for value in self.cells.iter().filter_map(Cell::as_text) {
            *counts.entry(value).or_insert(0) += 1;
        }

        let mut best: Option<(&str, usize)> = None;
        for (value, count) in counts {
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((value, count));
            }
        }
        best.map(|(value, _)| value)
    }

    /// Whether every number in the column is a whole number.
    pub fn is_integral(&self) -> bool {
        self.numbers().all(|v| !v.is_finite() || v.fract() == 0.0)
    }

    /// Keep only the cells whose row is marked `true`.
    pub(crate) fn retain_rows(&mut self, keep: &[bool]) {
        let mut index = 0;
        self.cells.retain(|_| {
            let kept = keep.get(index).copied().unwrap_or(false);
            index += 1;
            kept
        });
    }

    /// Compute a profile of this column.
    pub fn profile(&self) -> ColumnProfile {
        let mut profile = ColumnProfile {
            column_type: self.column_type,
            count: self.cells.len(),
            ..ColumnProfile::default()
        };

        for cell in &self.cells {
            match cell {
                Cell::Missing => profile.missing_count += 1,
                Cell::Text(s) if s.is_empty() => profile.empty_count += 1,
                Cell::Number(v) if *v == 0.0 => profile.zero_count += 1,
                _ => {}
            }
        }

        profile
    }
}
