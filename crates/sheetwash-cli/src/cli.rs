//! CLI argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Sheetwash: batch data-quality pipeline for spreadsheet data
#[derive(Parser)]
#[command(name = "sheetwash")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Where worksheets are read from and written to.
#[derive(Args, Clone, Debug)]
#[group(required = true, multiple = false)]
pub struct StoreArgs {
    /// Directory holding one `<worksheet>.csv` file per worksheet
    #[arg(long, value_name = "DIR")]
    pub input_dir: Option<PathBuf>,

    /// Id of a remote spreadsheet
    #[arg(long, value_name = "ID")]
    pub spreadsheet_id: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a synthetic travel-survey dataset with injected defects
    Generate {
        /// Student number, used as the random seed
        #[arg(short, long)]
        student_number: u64,

        /// Number of rows to generate
        #[arg(long, default_value = "1000")]
        samples: usize,

        /// Write the dataset to `<DIR>/<worksheet>.csv`
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Upload the dataset to this spreadsheet
        #[arg(long, value_name = "ID")]
        spreadsheet_id: Option<String>,

        /// Worksheet (and CSV file name) receiving the dataset
        #[arg(long, default_value = "Arkusz1")]
        worksheet: String,

        /// Access token (default: $SHEETWASH_SHEETS_TOKEN)
        #[arg(long)]
        token: Option<String>,
    },

    /// Run the full pipeline: ingest, clean, standardize, store, report
    Run {
        #[command(flatten)]
        store: StoreArgs,

        /// Pipeline configuration file (JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Access token (default: $SHEETWASH_SHEETS_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Worksheet holding the raw data
        #[arg(long)]
        source: Option<String>,

        /// Worksheet receiving the cleaned table
        #[arg(long)]
        cleaned: Option<String>,

        /// Worksheet receiving the standardized table
        #[arg(long)]
        standardized: Option<String>,

        /// Path of the text report
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Missing text cells: preserve, mode, or sentinel:<value>
        #[arg(long)]
        text_missing: Option<String>,

        /// Number of rows shown before and after each stage
        #[arg(long, default_value = "5")]
        preview: usize,

        /// Output the run summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show per-column missing and empty counts of a worksheet
    Inspect {
        #[command(flatten)]
        store: StoreArgs,

        /// Pipeline configuration file (JSON), for column types
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Worksheet to inspect (default: the configured source worksheet)
        #[arg(short, long)]
        worksheet: Option<String>,

        /// Access token (default: $SHEETWASH_SHEETS_TOKEN)
        #[arg(long)]
        token: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_requires_one_store() {
        assert!(Cli::try_parse_from(["sheetwash", "run"]).is_err());
        assert!(
            Cli::try_parse_from([
                "sheetwash",
                "run",
                "--input-dir",
                "data",
                "--spreadsheet-id",
                "abc"
            ])
            .is_err()
        );
        assert!(Cli::try_parse_from(["sheetwash", "run", "--input-dir", "data"]).is_ok());
    }

    #[test]
    fn test_generate_requires_student_number() {
        assert!(Cli::try_parse_from(["sheetwash", "generate", "-o", "data"]).is_err());

        let cli = Cli::try_parse_from(["sheetwash", "generate", "-s", "25566", "-o", "data"]).unwrap();
        match cli.command {
            Commands::Generate {
                student_number,
                samples,
                worksheet,
                ..
            } => {
                assert_eq!(student_number, 25566);
                assert_eq!(samples, 1000);
                assert_eq!(worksheet, "Arkusz1");
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_inspect_accepts_config() {
        let cli = Cli::try_parse_from([
            "sheetwash",
            "inspect",
            "--input-dir",
            "data",
            "--config",
            "pipeline.json",
        ])
        .unwrap();
        match cli.command {
            Commands::Inspect {
                config, worksheet, ..
            } => {
                assert_eq!(config, Some(PathBuf::from("pipeline.json")));
                assert_eq!(worksheet, None);
            }
            _ => panic!("expected inspect"),
        }
    }
}
