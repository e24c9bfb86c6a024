//! Z-score standardization of numeric columns.

use serde::{Deserialize, Serialize};

use crate::table::{Cell, ColumnType, Table};

/// Parameters fitted for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnScaling {
    /// Column name.
    pub column: String,
    /// Mean of the non-missing values.
    pub mean: f64,
    /// Population standard deviation of the non-missing values.
    pub std_dev: f64,
}

impl ColumnScaling {
    /// Scale a single value. A zero-variance column maps every value to 0.
    pub fn apply(&self, value: f64) -> f64 {
        let scale = if self.std_dev == 0.0 { 1.0 } else { self.std_dev };
        (value - self.mean) / scale
    }
}

/// Per-column scaling parameters fitted on a table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    /// Fitted parameters, in column order.
    pub scalings: Vec<ColumnScaling>,
}

impl StandardScaler {
    /// Fit mean and standard deviation for every numeric column.
    ///
    /// Columns without any value are skipped.
    pub fn fit(table: &Table) -> Self {
        let mut scalings = Vec::new();

        for (name, column) in table.columns() {
            if !column.column_type.is_numeric() {
                continue;
            }

            let values: Vec<f64> = column.numbers().collect();
            if values.is_empty() {
                continue;
            }

            let n = values.len() as f64;
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

            scalings.push(ColumnScaling {
                column: name.to_string(),
                mean,
                std_dev: variance.sqrt(),
            });
        }

        Self { scalings }
    }

    /// Apply the fitted parameters. Missing cells stay missing; scaled
    /// columns become float columns.
    pub fn transform(&self, table: &Table) -> Table {
        let mut scaled = table.clone();

        for (name, column) in scaled.columns_mut() {
            let Some(scaling) = self.scalings.iter().find(|s| s.column == name) else {
                continue;
            };

            for cell in column.cells_mut().iter_mut() {
                if let Cell::Number(v) = cell {
                    *v = scaling.apply(*v);
                }
            }
            column.column_type = ColumnType::Float;
        }

        scaled
    }
}

/// A standardized table with the parameters used to produce it.
#[derive(Debug, Clone)]
pub struct Standardized {
    /// The scaled table.
    pub table: Table,
    /// The fitted scaler.
    pub scaler: StandardScaler,
}

/// Rescale every numeric column to zero mean and unit variance.
///
/// Text columns pass through unchanged and no rows are removed.
pub fn standardize(table: &Table) -> Standardized {
    tracing::info!("Starting data standardization...");
    let scaler = StandardScaler::fit(table);
    let table = scaler.transform(table);
    for scaling in &scaler.scalings {
        tracing::debug!(
            column = %scaling.column,
            mean = scaling.mean,
            std_dev = scaling.std_dev,
            "standardized column"
        );
    }
    tracing::info!("Finished data standardization.");
    Standardized { table, scaler }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;

    fn mean_and_std(table: &Table, column: &str) -> (f64, f64) {
        let values: Vec<f64> = table.column(column).unwrap().numbers().collect();
        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        (mean, var.sqrt())
    }

    #[test]
    fn test_standardize_zero_mean_unit_variance() {
        let table = Table::from_columns(vec![
            ("name", Column::text(vec!["a", "b", "c", "d"])),
            (
                "x",
                Column::numeric(ColumnType::Integer, vec![Some(1.0), Some(2.0), Some(3.0), Some(10.0)]),
            ),
        ])
        .unwrap();

        let result = standardize(&table);
        let (mean, std) = mean_and_std(&result.table, "x");

        assert!(mean.abs() < 1e-9);
        assert!((std - 1.0).abs() < 1e-9);
        assert_eq!(result.table.column("x").unwrap().column_type, ColumnType::Float);
        assert_eq!(result.table.column("name"), table.column("name"));
        assert_eq!(result.table.row_count(), 4);
    }

    #[test]
    fn test_population_standard_deviation() {
        let table = Table::from_columns(vec![(
            "x",
            Column::numeric(ColumnType::Float, vec![Some(2.0), Some(4.0)]),
        )])
        .unwrap();

        let scaler = StandardScaler::fit(&table);
        assert_eq!(scaler.scalings[0].mean, 3.0);
        assert_eq!(scaler.scalings[0].std_dev, 1.0);
    }

    #[test]
    fn test_zero_variance_column_maps_to_zero() {
        let table = Table::from_columns(vec![(
            "x",
            Column::numeric(ColumnType::Float, vec![Some(5.0), Some(5.0), Some(5.0)]),
        )])
        .unwrap();

        let result = standardize(&table);
        for cell in result.table.column("x").unwrap().cells() {
            assert_eq!(cell, &Cell::Number(0.0));
        }
    }

    #[test]
    fn test_missing_cells_stay_missing() {
        let table = Table::from_columns(vec![(
            "x",
            Column::numeric(ColumnType::Float, vec![Some(1.0), None, Some(3.0)]),
        )])
        .unwrap();

        let result = standardize(&table);
        assert_eq!(result.table.get(1, "x"), Some(&Cell::Missing));
        assert_eq!(result.table.get(0, "x"), Some(&Cell::Number(-1.0)));
    }

    #[test]
    fn test_empty_table_passes_through() {
        let table = Table::from_columns(vec![(
            "x",
            Column::numeric(ColumnType::Float, Vec::new()),
        )])
        .unwrap();

        let result = standardize(&table);
        assert_eq!(result.table.row_count(), 0);
        assert!(result.scaler.scalings.is_empty());
    }
}
