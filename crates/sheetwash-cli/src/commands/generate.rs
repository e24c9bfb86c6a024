//! Generate command - write a synthetic dataset with injected defects.

use std::path::PathBuf;

use colored::Colorize;
use sheetwash::{CsvStore, GeneratorConfig, generate};

use super::sheets_client;

pub fn run(
    student_number: u64,
    samples: usize,
    output_dir: Option<PathBuf>,
    spreadsheet_id: Option<String>,
    worksheet: String,
    token: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    if output_dir.is_none() && spreadsheet_id.is_none() {
        return Err("Nothing to do: pass --output-dir and/or --spreadsheet-id".into());
    }
    if samples == 0 {
        return Err("--samples must be at least 1".into());
    }

    let config = GeneratorConfig::new(student_number).with_samples(samples);
    let raw = generate(&config);
    tracing::info!(
        seed = student_number,
        rows = raw.row_count(),
        "Generated dataset"
    );

    println!(
        "{} {} rows (seed {})",
        "Generated".green().bold(),
        raw.row_count(),
        student_number
    );

    if let Some(dir) = output_dir {
        let path = CsvStore::new(dir).store_raw(&worksheet, &raw)?;
        println!("  {} {}", "Wrote".cyan(), path.display());
    }

    if let Some(id) = spreadsheet_id {
        let client = sheets_client(&id, token)?;
        client.store_raw(&worksheet, &raw)?;
        println!(
            "  {} worksheet '{}' of spreadsheet {}",
            "Uploaded".cyan(),
            worksheet,
            id
        );
    }

    Ok(())
}
