//! Sheetwash CLI - batch data-quality pipeline for spreadsheet data.

mod cli;
mod commands;
mod logging;

use clap::Parser;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let result = match cli.command {
        Commands::Generate {
            student_number,
            samples,
            output_dir,
            spreadsheet_id,
            worksheet,
            token,
        } => commands::generate::run(
            student_number,
            samples,
            output_dir,
            spreadsheet_id,
            worksheet,
            token,
        ),

        Commands::Run {
            store,
            config,
            token,
            source,
            cleaned,
            standardized,
            report,
            text_missing,
            preview,
            json,
        } => commands::run::run(commands::run::RunOptions {
            store,
            config,
            token,
            source,
            cleaned,
            standardized,
            report,
            text_missing,
            preview,
            json,
        }),

        Commands::Inspect {
            store,
            config,
            worksheet,
            token,
            json,
        } => commands::inspect::run(store, config, worksheet, token, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
