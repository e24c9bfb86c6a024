//! Pipeline configuration and orchestration.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cleaning::{Cleaner, CleaningDiagnostics, CleaningPolicy};
use crate::error::{Result, SheetwashError};
use crate::input::{ColumnCoercion, SourceMetadata, default_coercions};
use crate::report::{format_report, write_report};
use crate::standardize::{StandardScaler, standardize};
use crate::store::{TableSink, TableSource};
use crate::table::Table;

/// Configuration for a pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worksheet holding the raw data.
    pub source_worksheet: String,
    /// Worksheet receiving the cleaned table.
    pub cleaned_worksheet: String,
    /// Worksheet receiving the standardized table.
    pub standardized_worksheet: String,
    /// File receiving the text report.
    pub report_path: PathBuf,
    /// Columns converted to numbers at ingestion.
    pub coercions: Vec<ColumnCoercion>,
    /// Cleaning thresholds and column roles.
    pub cleaning: CleaningPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            source_worksheet: "Arkusz1".to_string(),
            cleaned_worksheet: "Arkusz2".to_string(),
            standardized_worksheet: "Arkusz3".to_string(),
            report_path: PathBuf::from("report.txt"),
            coercions: default_coercions(),
            cleaning: CleaningPolicy::default(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from a JSON file. Missing fields take defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| SheetwashError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: PipelineConfig = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("source_worksheet", &self.source_worksheet),
            ("cleaned_worksheet", &self.cleaned_worksheet),
            ("standardized_worksheet", &self.standardized_worksheet),
        ] {
            if value.trim().is_empty() {
                return Err(SheetwashError::Config(format!("{} must not be empty", field)));
            }
        }

        for column in [&self.cleaning.age_column, &self.cleaning.salary_column] {
            let coerced = self
                .coercions
                .iter()
                .any(|c| &c.column == column && c.target.is_numeric());
            if !coerced {
                return Err(SheetwashError::Config(format!(
                    "Column '{}' is checked for zeros but not coerced to a number",
                    column
                )));
            }
        }

        Ok(())
    }
}

/// Serializable summary of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineSummary {
    /// Where the raw data came from.
    pub source: SourceMetadata,
    /// Percentage of original rows removed.
    pub removed_pct: f64,
    /// Percentage of originally missing cells filled.
    pub changed_pct: f64,
    /// Counts behind the percentages.
    pub cleaning: CleaningDiagnostics,
    /// Standardization parameters.
    pub scaler: StandardScaler,
    /// Report text as written.
    pub report: String,
}

/// Everything produced by a run.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    /// Table after ingestion and coercion.
    pub ingested: Table,
    /// Table after cleaning.
    pub cleaned: Table,
    /// Table after standardization.
    pub standardized: Table,
    /// Summary of the run.
    pub summary: PipelineSummary,
}

/// Linear pipeline: fetch, clean, store, standardize, store, report.
pub struct Pipeline<'a> {
    config: PipelineConfig,
    source: &'a dyn TableSource,
    sink: &'a dyn TableSink,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline with default configuration.
    pub fn new(source: &'a dyn TableSource, sink: &'a dyn TableSink) -> Self {
        Self::with_config(PipelineConfig::default(), source, sink)
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(
        config: PipelineConfig,
        source: &'a dyn TableSource,
        sink: &'a dyn TableSink,
    ) -> Self {
        Self {
            config,
            source,
            sink,
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetch the source worksheet and coerce it into a typed table.
    pub fn ingest(&self) -> Result<(Table, SourceMetadata)> {
        let worksheet = &self.config.source_worksheet;
        let raw = self.source.fetch(worksheet)?;
        let metadata = SourceMetadata::describe(self.source.origin(), worksheet.as_str(), &raw);
        tracing::info!(
            origin = self.source.origin(),
            rows = metadata.row_count,
            columns = metadata.column_count,
            "Fetched worksheet '{}'",
            worksheet
        );

        let table = raw.coerce(&self.config.coercions)?;
        Ok((table, metadata))
    }

    /// Run every stage.
    pub fn run(&self) -> Result<PipelineRun> {
        self.config.validate()?;

        let (ingested, source) = self.ingest()?;

        let cleaner = Cleaner::with_policy(self.config.cleaning.clone());
        let outcome = cleaner.clean(&ingested)?;
        self.sink.store(&self.config.cleaned_worksheet, &outcome.table)?;

        let standardized = standardize(&outcome.table);
        self.sink
            .store(&self.config.standardized_worksheet, &standardized.table)?;

        let report = format_report(outcome.changed_pct, outcome.removed_pct);
        write_report(&self.config.report_path, &report)?;

        Ok(PipelineRun {
            ingested,
            cleaned: outcome.table,
            standardized: standardized.table,
            summary: PipelineSummary {
                source,
                removed_pct: outcome.removed_pct,
                changed_pct: outcome.changed_pct,
                cleaning: outcome.diagnostics,
                scaler: standardized.scaler,
                report,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cleaning::TextMissingPolicy;

    #[test]
    fn test_default_config_is_valid() {
        assert!(PipelineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_column_must_be_coerced() {
        let mut config = PipelineConfig::default();
        config.coercions.clear();
        assert!(matches!(config.validate(), Err(SheetwashError::Config(_))));
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.json");
        std::fs::write(
            &path,
            r#"{"cleaned_worksheet": "Clean", "cleaning": {"text_missing": {"strategy": "sentinel", "value": "Brak"}}}"#,
        )
        .unwrap();

        let config = PipelineConfig::load(&path).unwrap();
        assert_eq!(config.cleaned_worksheet, "Clean");
        assert_eq!(config.source_worksheet, "Arkusz1");
        assert_eq!(
            config.cleaning.text_missing,
            TextMissingPolicy::Sentinel("Brak".to_string())
        );
        assert_eq!(config.coercions, default_coercions());
    }
}
