//! Row filtering, imputation and percentage bookkeeping.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SheetwashError};
use crate::table::{Cell, ColumnType, Table};

use super::policy::{CleaningPolicy, TextMissingPolicy};

/// One column's imputation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Imputation {
    /// Column that was filled.
    pub column: String,
    /// Value written into missing cells.
    pub fill: Cell,
    /// Number of cells filled.
    pub cells: usize,
}

/// Counts recorded while cleaning, in pipeline order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleaningDiagnostics {
    /// Rows before any filtering.
    pub initial_rows: usize,
    /// Missing cells before any filtering.
    pub initial_missing: usize,
    /// Minimum non-missing cells a row needs to survive.
    pub present_threshold: usize,
    /// Rows dropped for having too few non-missing cells.
    pub dropped_sparse: usize,
    /// Rows dropped for a zero age or salary.
    pub dropped_zero: usize,
    /// Rows dropped for an empty string in a text column.
    pub dropped_empty_text: usize,
    /// Per-column fills, in column order.
    pub imputations: Vec<Imputation>,
    /// Numeric columns left with missing cells because no value survived.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub unimputed_columns: Vec<String>,
    /// Missing cells after imputation.
    pub final_missing: usize,
    /// Rows after filtering.
    pub final_rows: usize,
}

impl CleaningDiagnostics {
    /// Total rows removed by all filters.
    pub fn removed_rows(&self) -> usize {
        self.initial_rows - self.final_rows
    }

    /// Missing cells resolved, net of rows dropped.
    pub fn changed_values(&self) -> usize {
        self.initial_missing.saturating_sub(self.final_missing)
    }
}

/// Result of one cleaning pass.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    /// The cleaned table.
    pub table: Table,
    /// Percentage of original rows removed.
    pub removed_pct: f64,
    /// Percentage of originally missing cells that are no longer missing.
    pub changed_pct: f64,
    /// Counts behind the percentages.
    pub diagnostics: CleaningDiagnostics,
}

/// Cleans tables according to a [`CleaningPolicy`].
#[derive(Debug, Clone, Default)]
pub struct Cleaner {
    policy: CleaningPolicy,
}

impl Cleaner {
    /// Create a cleaner with the default policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cleaner with a custom policy.
    pub fn with_policy(policy: CleaningPolicy) -> Self {
        Self { policy }
    }

    /// Get the policy.
    pub fn policy(&self) -> &CleaningPolicy {
        &self.policy
    }

    /// Clean a table.
    ///
    /// Steps run in a fixed order: sparse rows, zero age/salary rows, rows
    /// with empty text, median imputation of numeric columns. The missing
    /// count used for the changed percentage is taken before any row is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Fails if either zero-check column is absent or not numeric, or if the
    /// table has no rows.
    pub fn clean(&self, table: &Table) -> Result<CleaningOutcome> {
        table.require_numeric(&self.policy.age_column)?;
        table.require_numeric(&self.policy.salary_column)?;

        if table.row_count() == 0 {
            return Err(SheetwashError::EmptyData(
                "Cannot clean a table with no rows".to_string(),
            ));
        }

        tracing::info!("Starting data cleaning...");

        let mut diagnostics = CleaningDiagnostics {
            initial_rows: table.row_count(),
            initial_missing: table.missing_count(),
            present_threshold: table.column_count() / 2,
            ..CleaningDiagnostics::default()
        };
        tracing::info!(
            missing = diagnostics.initial_missing,
            "Missing values before cleaning: {}",
            diagnostics.initial_missing
        );

        let mut cleaned = table.clone();

        let threshold = diagnostics.present_threshold;
        diagnostics.dropped_sparse =
            cleaned.retain_rows(|t, row| t.row_present_count(row) >= threshold);
        tracing::debug!(
            threshold,
            dropped = diagnostics.dropped_sparse,
            "dropped sparse rows"
        );

        diagnostics.dropped_zero = self.drop_zero_rows(&mut cleaned)?;
        tracing::debug!(dropped = diagnostics.dropped_zero, "dropped zero age/salary rows");

        if self.policy.reject_empty_text {
            diagnostics.dropped_empty_text = drop_empty_text_rows(&mut cleaned);
            tracing::debug!(
                dropped = diagnostics.dropped_empty_text,
                "dropped rows with empty text"
            );
        }

        let (imputations, unimputed) = impute_numeric(&mut cleaned);
        diagnostics.imputations = imputations;
        diagnostics.unimputed_columns = unimputed;
        for column in &diagnostics.unimputed_columns {
            tracing::warn!(column = %column, "no values left to compute a median, cells stay missing");
        }

        if let Some(fills) = fill_text(&mut cleaned, &self.policy.text_missing) {
            diagnostics.imputations.extend(fills);
        }

        diagnostics.final_missing = cleaned.missing_count();
        diagnostics.final_rows = cleaned.row_count();
        tracing::info!(
            missing = diagnostics.final_missing,
            "Missing values after cleaning: {}",
            diagnostics.final_missing
        );

        let changed_pct = percentage(diagnostics.changed_values(), diagnostics.initial_missing);
        let removed_pct = percentage(diagnostics.removed_rows(), diagnostics.initial_rows);
        tracing::info!("Changed data (filled missing values): {:.2}%", changed_pct);
        tracing::info!(
            removed = diagnostics.removed_rows(),
            "Removed rows: {}, which is {:.2}% of all data",
            diagnostics.removed_rows(),
            removed_pct
        );

        Ok(CleaningOutcome {
            table: cleaned,
            removed_pct,
            changed_pct,
            diagnostics,
        })
    }

    /// Drop rows where age or salary is exactly zero. Missing values pass.
    fn drop_zero_rows(&self, table: &mut Table) -> Result<usize> {
        table.require_numeric(&self.policy.age_column)?;
        table.require_numeric(&self.policy.salary_column)?;

        let age = self.policy.age_column.as_str();
        let salary = self.policy.salary_column.as_str();
        Ok(table.retain_rows(|t, row| {
            let nonzero = |column: &str| t.get(row, column).and_then(Cell::as_number) != Some(0.0);
            nonzero(age) && nonzero(salary)
        }))
    }
}

/// Clean a table with the default policy.
pub fn clean(table: &Table) -> Result<CleaningOutcome> {
    Cleaner::new().clean(table)
}

/// `part / whole * 100`, or 0 when `whole` is 0.
fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        (part as f64 / whole as f64) * 100.0
    }
}

/// Drop rows with an empty string in any text column, one column at a time.
fn drop_empty_text_rows(table: &mut Table) -> usize {
    let mut removed = 0;
    for name in table.names_where(|t| t == ColumnType::Text) {
        removed += table.retain_rows(|t, row| {
            t.get(row, &name).and_then(Cell::as_text) != Some("")
        });
    }
    removed
}

/// Fill missing numeric cells with the column median.
///
/// Returns the fills and the columns that had no value to take a median of.
fn impute_numeric(table: &mut Table) -> (Vec<Imputation>, Vec<String>) {
    let mut imputations = Vec::new();
    let mut unimputed = Vec::new();

    for (name, column) in table.columns_mut() {
        if !column.column_type.is_numeric() {
            continue;
        }

        let missing = column.missing_count();
        let Some(median) = column.median() else {
            if missing > 0 {
                unimputed.push(name.to_string());
            }
            continue;
        };

        if missing == 0 {
            continue;
        }

        for cell in column.cells_mut().iter_mut().filter(|c| c.is_missing()) {
            *cell = Cell::Number(median);
        }
        // An even count can yield a half; integer tags must stay truthful
        if column.column_type == ColumnType::Integer && median.fract() != 0.0 {
            column.column_type = ColumnType::Float;
        }

        imputations.push(Imputation {
            column: name.to_string(),
            fill: Cell::Number(median),
            cells: missing,
        });
    }

    (imputations, unimputed)
}

/// Apply the text missing-value policy. `None` when the policy is to preserve.
fn fill_text(table: &mut Table, policy: &TextMissingPolicy) -> Option<Vec<Imputation>> {
    if *policy == TextMissingPolicy::Preserve {
        return None;
    }

    let mut imputations = Vec::new();
    for (name, column) in table.columns_mut() {
        if column.column_type != ColumnType::Text {
            continue;
        }
        let missing = column.missing_count();
        if missing == 0 {
            continue;
        }

        let fill = match policy {
            TextMissingPolicy::Mode => match column.mode_text() {
                Some(mode) => mode.to_string(),
                None => continue,
            },
            TextMissingPolicy::Sentinel(value) => value.clone(),
            TextMissingPolicy::Preserve => continue,
        };

        for cell in column.cells_mut().iter_mut().filter(|c| c.is_missing()) {
            *cell = Cell::Text(fill.clone());
        }
        imputations.push(Imputation {
            column: name.to_string(),
            fill: Cell::Text(fill),
            cells: missing,
        });
    }

    Some(imputations)
}
