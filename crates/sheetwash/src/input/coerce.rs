//! Type coercion from raw string cells into a typed [`Table`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetwashError};
use crate::table::{Cell, Column, ColumnType, Table};

use super::source::RawTable;

/// Header of the age column.
pub const AGE_COLUMN: &str = "Wiek";

/// Header of the average-salary column.
pub const SALARY_COLUMN: &str = "Średnie Zarobki";

/// How one named column is converted at ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnCoercion {
    /// Column header to convert.
    pub column: String,
    /// Target numeric type.
    pub target: ColumnType,
    /// Treat ',' as the decimal separator.
    #[serde(default)]
    pub decimal_comma: bool,
}

impl ColumnCoercion {
    /// Coerce a column to integers.
    pub fn integer(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            target: ColumnType::Integer,
            decimal_comma: false,
        }
    }

    /// Coerce a column to floats.
    pub fn float(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            target: ColumnType::Float,
            decimal_comma: false,
        }
    }

    /// Normalize a decimal comma to a decimal point before parsing.
    pub fn with_decimal_comma(mut self) -> Self {
        self.decimal_comma = true;
        self
    }
}

/// The two numeric columns every ingested table must carry.
pub fn default_coercions() -> Vec<ColumnCoercion> {
    vec![
        ColumnCoercion::integer(AGE_COLUMN),
        ColumnCoercion::float(SALARY_COLUMN).with_decimal_comma(),
    ]
}

/// Parse a numeric cell. Unparsable input and NaN become `None`.
pub fn parse_number(value: &str, decimal_comma: bool) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = if decimal_comma {
        trimmed.replace(',', ".").parse::<f64>()
    } else {
        trimmed.parse::<f64>()
    };

    parsed.ok().filter(|v| !v.is_nan())
}

impl RawTable {
    /// Convert into a typed table.
    ///
    /// Columns named in `coercions` become numeric; every other column is
    /// text and keeps empty strings as values. A coercion naming a column
    /// that is not in the header is a precondition failure. Repeated headers
    /// (typically blank trailing columns) are renamed `<name>_2`, `<name>_3`
    /// and so on; the first occurrence keeps its name.
    pub fn coerce(&self, coercions: &[ColumnCoercion]) -> Result<Table> {
        for coercion in coercions {
            if self.column_index(&coercion.column).is_none() {
                return Err(SheetwashError::MissingColumn {
                    column: coercion.column.clone(),
                });
            }
        }

        let mut table = Table::new();
        for (index, name) in unique_headers(&self.headers).into_iter().enumerate() {
            let column = match coercions.iter().find(|c| c.column == name) {
                Some(coercion) => self.numeric_column(index, coercion),
                None => Column::text(self.column_values(index)),
            };
            table.push_column(name, column)?;
        }

        Ok(table)
    }

    fn numeric_column(&self, index: usize, coercion: &ColumnCoercion) -> Column {
        let values: Vec<Option<f64>> = self
            .column_values(index)
            .map(|v| parse_number(v, coercion.decimal_comma))
            .collect();

        let failed = self
            .column_values(index)
            .zip(&values)
            .filter(|(raw, parsed)| parsed.is_none() && !raw.trim().is_empty())
            .count();
        if failed > 0 {
            tracing::debug!(
                column = %coercion.column,
                failed,
                "non-numeric values coerced to missing"
            );
        }

        let mut column = Column::numeric(coercion.target, values);
        if column.column_type == ColumnType::Integer && !column.is_integral() {
            tracing::debug!(column = %coercion.column, "fractional values, promoting to float");
            column.column_type = ColumnType::Float;
        }
        column
    }
}

/// Make header names unique, suffixing repeats with their occurrence number.
fn unique_headers(headers: &[String]) -> Vec<String> {
    let mut taken: HashSet<String> = HashSet::with_capacity(headers.len());
    headers
        .iter()
        .map(|header| {
            let mut name = header.clone();
            let mut occurrence = 1;
            while taken.contains(&name) {
                occurrence += 1;
                name = format!("{}_{}", header, occurrence);
            }
            taken.insert(name.clone());
            name
        })
        .collect()
}
