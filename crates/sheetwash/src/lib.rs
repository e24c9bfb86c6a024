//! Sheetwash: batch data-quality pipeline for spreadsheet-backed datasets.
//!
//! Sheetwash pulls a worksheet, coerces the age and salary columns to numbers,
//! drops or repairs rows with missing and invalid values, standardizes the
//! numeric columns, writes both tables back and produces a short report.
//!
//! # Stages
//!
//! - **Ingestion**: raw string grid to a typed [`Table`]
//! - **Cleaning**: sparse, zero and empty-text rows removed, numeric gaps
//!   filled with the column median
//! - **Standardization**: z-score scaling of numeric columns
//! - **Report**: changed and removed percentages
//!
//! # Example
//!
//! ```no_run
//! use sheetwash::{CsvStore, Pipeline};
//!
//! let store = CsvStore::new("data");
//! let run = Pipeline::new(&store, &store).run().unwrap();
//!
//! println!("Removed: {:.2}%", run.summary.removed_pct);
//! println!("Changed: {:.2}%", run.summary.changed_pct);
//! ```

pub mod cleaning;
pub mod error;
pub mod input;
pub mod report;
pub mod standardize;
pub mod store;
pub mod synth;
pub mod table;

mod pipeline;

pub use crate::pipeline::{Pipeline, PipelineConfig, PipelineRun, PipelineSummary};
pub use cleaning::{Cleaner, CleaningDiagnostics, CleaningOutcome, CleaningPolicy, TextMissingPolicy, clean};
pub use error::{Result, SheetwashError};
pub use input::{AGE_COLUMN, ColumnCoercion, RawTable, SALARY_COLUMN, SourceMetadata};
pub use report::format_report;
pub use standardize::{ColumnScaling, StandardScaler, Standardized, standardize};
pub use store::{CsvStore, MemoryStore, SheetsClient, SheetsConfig, TableSink, TableSource};
pub use synth::{GeneratorConfig, generate};
pub use table::{Cell, Column, ColumnType, Table};
