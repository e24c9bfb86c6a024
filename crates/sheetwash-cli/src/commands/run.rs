//! Run command - ingest, clean, standardize, store, report.

use std::path::PathBuf;

use colored::Colorize;
use sheetwash::{Pipeline, PipelineConfig, PipelineRun, TextMissingPolicy};

use super::{Backend, print_preview};
use crate::cli::StoreArgs;

/// Options collected from the command line.
pub struct RunOptions {
    pub store: StoreArgs,
    pub config: Option<PathBuf>,
    pub token: Option<String>,
    pub source: Option<String>,
    pub cleaned: Option<String>,
    pub standardized: Option<String>,
    pub report: Option<PathBuf>,
    pub text_missing: Option<String>,
    pub preview: usize,
    pub json: bool,
}

impl RunOptions {
    /// Load the configuration file (if any) and apply command-line overrides.
    fn pipeline_config(&self) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::load(path)?,
            None => PipelineConfig::default(),
        };

        if let Some(source) = &self.source {
            config.source_worksheet = source.clone();
        }
        if let Some(cleaned) = &self.cleaned {
            config.cleaned_worksheet = cleaned.clone();
        }
        if let Some(standardized) = &self.standardized {
            config.standardized_worksheet = standardized.clone();
        }
        if let Some(report) = &self.report {
            config.report_path = report.clone();
        }
        if let Some(policy) = &self.text_missing {
            config.cleaning.text_missing = policy.parse::<TextMissingPolicy>()?;
        }

        config.validate()?;
        Ok(config)
    }
}

pub fn run(options: RunOptions) -> Result<(), Box<dyn std::error::Error>> {
    let config = options.pipeline_config()?;
    let backend = Backend::open(&options.store, options.token.clone())?;

    if !options.json {
        println!(
            "{} worksheet '{}' from {}",
            "Cleaning".cyan().bold(),
            config.source_worksheet.white(),
            backend.describe()
        );
        println!();
    }

    let pipeline = Pipeline::with_config(config, backend.source(), backend.sink());
    let run = pipeline.run()?;

    if options.json {
        println!("{}", serde_json::to_string_pretty(&run.summary)?);
        return Ok(());
    }

    print_run(&run, pipeline.config(), options.preview);
    Ok(())
}

fn print_run(run: &PipelineRun, config: &PipelineConfig, preview: usize) {
    if preview > 0 {
        print_preview("Raw data", &run.ingested, preview);
        print_preview("Cleaned data", &run.cleaned, preview);
        print_preview("Standardized data", &run.standardized, preview);
    }

    let diagnostics = &run.summary.cleaning;
    println!("{}", "Cleaning:".yellow().bold());
    println!(
        "  Rows:           {} -> {}",
        diagnostics.initial_rows,
        diagnostics.final_rows.to_string().white().bold()
    );
    println!("  Sparse rows:    {}", diagnostics.dropped_sparse);
    println!("  Zero values:    {}", diagnostics.dropped_zero);
    println!("  Empty text:     {}", diagnostics.dropped_empty_text);
    println!(
        "  Missing cells:  {} -> {}",
        diagnostics.initial_missing, diagnostics.final_missing
    );
    for imputation in &diagnostics.imputations {
        println!(
            "  Filled {} cell(s) of '{}' with {}",
            imputation.cells, imputation.column, imputation.fill
        );
    }
    for column in &diagnostics.unimputed_columns {
        println!(
            "  {} '{}' has no values left to compute a median",
            "Warning:".yellow(),
            column
        );
    }
    println!();

    if !run.summary.scaler.scalings.is_empty() {
        println!("{}", "Standardization:".yellow().bold());
        for scaling in &run.summary.scaler.scalings {
            println!(
                "  {:<24} mean {:>12.4}  std {:>12.4}",
                scaling.column, scaling.mean, scaling.std_dev
            );
        }
        println!();
    }

    println!("{}", "Stored:".yellow().bold());
    println!("  Cleaned:      {}", config.cleaned_worksheet);
    println!("  Standardized: {}", config.standardized_worksheet);
    println!("  Report:       {}", config.report_path.display());
    println!();

    print!("{}", run.summary.report.green());
}
