//! Conversion of tables into transmittable cell values.
//!
//! Remote sinks reject NaN and infinities, so every table passes through
//! here before it leaves the process: missing cells become empty strings and
//! non-finite numbers become 0.

use serde_json::Value;

use crate::table::{Cell, ColumnType, Table};

/// Convert one cell for transmission.
pub fn wire_value(cell: &Cell, column_type: ColumnType) -> Value {
    match cell {
        Cell::Missing => Value::String(String::new()),
        Cell::Text(s) => Value::String(s.clone()),
        Cell::Number(v) if !v.is_finite() => Value::from(0),
        Cell::Number(v) if column_type == ColumnType::Integer && v.fract() == 0.0 => {
            Value::from(*v as i64)
        }
        Cell::Number(v) => Value::from(*v),
    }
}

/// Header row followed by sanitized data rows.
pub fn wire_rows(table: &Table) -> Vec<Vec<Value>> {
    let header: Vec<Value> = table
        .column_names()
        .into_iter()
        .map(|name| Value::String(name.to_string()))
        .collect();

    let mut rows = Vec::with_capacity(table.row_count() + 1);
    rows.push(header);

    for row in 0..table.row_count() {
        rows.push(
            table
                .columns()
                .map(|(_, column)| {
                    column
                        .get(row)
                        .map(|cell| wire_value(cell, column.column_type))
                        .unwrap_or_else(|| Value::String(String::new()))
                })
                .collect(),
        );
    }

    rows
}

/// Render a sanitized value as plain text.
pub fn wire_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Column;
    use serde_json::json;

    #[test]
    fn test_wire_value() {
        assert_eq!(wire_value(&Cell::Missing, ColumnType::Float), json!(""));
        assert_eq!(wire_value(&Cell::Number(f64::INFINITY), ColumnType::Float), json!(0));
        assert_eq!(wire_value(&Cell::Number(f64::NEG_INFINITY), ColumnType::Float), json!(0));
        assert_eq!(wire_value(&Cell::Number(f64::NAN), ColumnType::Float), json!(0));
        assert_eq!(wire_value(&Cell::Number(30.0), ColumnType::Integer), json!(30));
        assert_eq!(wire_value(&Cell::Number(4500.5), ColumnType::Float), json!(4500.5));
        assert_eq!(wire_value(&Cell::text("Praca"), ColumnType::Text), json!("Praca"));
    }

    #[test]
    fn test_wire_rows_has_header() {
        let table = Table::from_columns(vec![
            ("a", Column::text(vec!["x"])),
            ("b", Column::numeric(ColumnType::Float, vec![None])),
        ])
        .unwrap();

        let rows = wire_rows(&table);
        assert_eq!(rows, vec![vec![json!("a"), json!("b")], vec![json!("x"), json!("")]]);
    }

    #[test]
    fn test_wire_text() {
        assert_eq!(wire_text(&json!("abc")), "abc");
        assert_eq!(wire_text(&json!(30)), "30");
        assert_eq!(wire_text(&json!(4500.5)), "4500.5");
    }
}
