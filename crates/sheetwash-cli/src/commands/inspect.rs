//! Inspect command - per-column missing and empty counts of a worksheet.

use std::path::PathBuf;

use colored::Colorize;
use sheetwash::PipelineConfig;

use super::Backend;
use crate::cli::StoreArgs;

pub fn run(
    store: StoreArgs,
    config: Option<PathBuf>,
    worksheet: Option<String>,
    token: Option<String>,
    json_output: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = match config {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    let worksheet = worksheet.unwrap_or_else(|| config.source_worksheet.clone());

    let backend = Backend::open(&store, token)?;
    let raw = backend.source().fetch(&worksheet)?;
    let table = raw.coerce(&config.coercions)?;
    let profile = table.profile();

    if json_output {
        let status = serde_json::json!({
            "worksheet": worksheet,
            "location": backend.describe(),
            "rows": table.row_count(),
            "columns": profile,
            "missing_total": table.missing_count(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} '{}' in {}",
        "Worksheet".cyan().bold(),
        worksheet.white(),
        backend.describe()
    );
    println!(
        "Rows: {}  Columns: {}  Missing cells: {}",
        table.row_count().to_string().white().bold(),
        table.column_count(),
        table.missing_count().to_string().yellow()
    );
    println!();

    let width = profile.keys().map(|k| k.chars().count()).max().unwrap_or(0);
    let header = format!(
        "  {:<width$}  {:<8}  {:>8}  {:>8}  {:>8}",
        "Column",
        "Type",
        "Missing",
        "Empty",
        "Zero",
        width = width
    );
    println!("{}", header.bold());

    for (name, column) in &profile {
        let padding = width.saturating_sub(name.chars().count());
        let missing = format!("{:>8}", column.missing_count);
        let missing = if column.missing_count > 0 {
            missing.yellow()
        } else {
            missing.normal()
        };
        let empty = format!("{:>8}", column.empty_count);
        let empty = if column.empty_count > 0 {
            empty.yellow()
        } else {
            empty.normal()
        };
        println!(
            "  {}{}  {:<8}  {}  {}  {:>8}",
            name,
            " ".repeat(padding),
            column.column_type.to_string(),
            missing,
            empty,
            column.zero_count
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inspect_uses_configured_coercions() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Dane.csv"), "Age,Pay\n30,\"4500,50\"\n").unwrap();
        let config_path = dir.path().join("pipeline.json");
        std::fs::write(
            &config_path,
            r#"{
                "source_worksheet": "Dane",
                "coercions": [
                    {"column": "Age", "target": "integer"},
                    {"column": "Pay", "target": "float", "decimal_comma": true}
                ],
                "cleaning": {"age_column": "Age", "salary_column": "Pay"}
            }"#,
        )
        .unwrap();

        let store = StoreArgs {
            input_dir: Some(dir.path().to_path_buf()),
            spreadsheet_id: None,
        };
        assert!(run(store.clone(), Some(config_path), None, None, true).is_ok());

        // Default coercions expect Wiek / Średnie Zarobki, absent here
        assert!(run(store, None, Some("Dane".to_string()), None, true).is_err());
    }
}
