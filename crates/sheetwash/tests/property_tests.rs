//! Property-based tests for the cleaning and standardization stages.
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p sheetwash --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p sheetwash --test property_tests
//! ```

use proptest::prelude::*;

use sheetwash::{
    AGE_COLUMN, Cell, Column, ColumnType, SALARY_COLUMN, SheetwashError, Table, clean, standardize,
};

// =============================================================================
// Test Strategies
// =============================================================================

/// Numeric cell: mostly values, sometimes zero, sometimes missing.
fn numeric_cell() -> impl Strategy<Value = Option<f64>> {
    prop_oneof![
        6 => (1u32..1000).prop_map(|v| Some(v as f64)),
        1 => Just(Some(0.0)),
        2 => Just(None),
    ]
}

/// Text cell: value, empty string, or missing.
fn text_cell() -> impl Strategy<Value = Cell> {
    prop_oneof![
        6 => "[a-z]{1,8}".prop_map(Cell::Text),
        1 => Just(Cell::text("")),
        1 => Just(Cell::Missing),
    ]
}

/// A table with one text column and the two required numeric columns.
fn table_strategy() -> impl Strategy<Value = Table> {
    (1usize..40).prop_flat_map(|rows| {
        (
            prop::collection::vec(text_cell(), rows),
            prop::collection::vec(numeric_cell(), rows),
            prop::collection::vec(numeric_cell(), rows),
            prop::collection::vec(numeric_cell(), rows),
        )
            .prop_map(|(text, age, salary, extra)| {
                Table::from_columns(vec![
                    ("text", Column::new(ColumnType::Text, text)),
                    (AGE_COLUMN, Column::numeric(ColumnType::Integer, age)),
                    (SALARY_COLUMN, Column::numeric(ColumnType::Float, salary)),
                    ("extra", Column::numeric(ColumnType::Float, extra)),
                ])
                .expect("columns have equal length")
            })
    })
}

// =============================================================================
// Cleaning Properties
// =============================================================================

proptest! {
    #[test]
    fn clean_never_adds_rows(table in table_strategy()) {
        let outcome = clean(&table).unwrap();
        prop_assert!(outcome.table.row_count() <= table.row_count());
        prop_assert!(outcome.removed_pct >= 0.0 && outcome.removed_pct <= 100.0);
        prop_assert!(outcome.changed_pct >= 0.0 && outcome.changed_pct <= 100.0);
    }

    #[test]
    fn clean_leaves_no_numeric_missing_unless_column_emptied(table in table_strategy()) {
        let outcome = clean(&table).unwrap();
        for (name, column) in outcome.table.columns() {
            if !column.column_type.is_numeric() {
                continue;
            }
            let had_values = column.numbers().next().is_some();
            if had_values {
                prop_assert_eq!(column.missing_count(), 0, "column {}", name);
            }
        }
    }

    #[test]
    fn clean_removes_all_zero_and_empty_text_rows(table in table_strategy()) {
        let outcome = clean(&table).unwrap();
        let cleaned = &outcome.table;
        let zero = Cell::Number(0.0);
        let empty = Cell::text("");
        for row in 0..cleaned.row_count() {
            prop_assert_ne!(cleaned.get(row, AGE_COLUMN), Some(&zero));
            prop_assert_ne!(cleaned.get(row, SALARY_COLUMN), Some(&zero));
            prop_assert_ne!(cleaned.get(row, "text"), Some(&empty));
        }
    }

    #[test]
    fn clean_without_missing_reports_zero_changed(
        ages in prop::collection::vec(1u32..100, 1..30),
    ) {
        let rows = ages.len();
        let table = Table::from_columns(vec![
            (AGE_COLUMN, Column::numeric(ColumnType::Integer, ages.iter().map(|a| Some(*a as f64)))),
            (SALARY_COLUMN, Column::numeric(ColumnType::Float, vec![Some(1000.0); rows])),
        ])
        .unwrap();

        let outcome = clean(&table).unwrap();
        prop_assert_eq!(outcome.changed_pct, 0.0);
        prop_assert_eq!(outcome.removed_pct, 0.0);
    }

    #[test]
    fn clean_is_deterministic(table in table_strategy()) {
        let a = clean(&table).unwrap();
        let b = clean(&table).unwrap();
        prop_assert_eq!(a.table, b.table);
        prop_assert_eq!(a.diagnostics, b.diagnostics);
    }

    #[test]
    fn columns_stay_aligned(table in table_strategy()) {
        let outcome = clean(&table).unwrap();
        let rows = outcome.table.row_count();
        for (_, column) in outcome.table.columns() {
            prop_assert_eq!(column.len(), rows);
        }
    }
}

// =============================================================================
// Standardization Properties
// =============================================================================

proptest! {
    #[test]
    fn standardized_columns_have_zero_mean_unit_std(
        values in prop::collection::vec(-1000.0f64..1000.0, 2..50),
    ) {
        let spread = values.iter().cloned().fold(f64::MIN, f64::max)
            - values.iter().cloned().fold(f64::MAX, f64::min);
        prop_assume!(spread > 1.0);

        let table = Table::from_columns(vec![(
            "x",
            Column::numeric(ColumnType::Float, values.iter().map(|v| Some(*v))),
        )])
        .unwrap();

        let result = standardize(&table);
        let scaled: Vec<f64> = result.table.column("x").unwrap().numbers().collect();
        let n = scaled.len() as f64;
        let mean = scaled.iter().sum::<f64>() / n;
        let std = (scaled.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();

        prop_assert!(mean.abs() < 1e-6);
        prop_assert!((std - 1.0).abs() < 1e-6);
    }
}

#[test]
fn empty_table_is_a_defined_error() {
    let table = Table::from_columns(vec![
        (AGE_COLUMN, Column::numeric(ColumnType::Integer, Vec::new())),
        (SALARY_COLUMN, Column::numeric(ColumnType::Float, Vec::new())),
    ])
    .unwrap();

    assert!(matches!(clean(&table), Err(SheetwashError::EmptyData(_))));
}
