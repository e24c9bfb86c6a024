//! CLI command implementations.

pub mod generate;
pub mod inspect;
pub mod run;

use colored::Colorize;
use sheetwash::store::TOKEN_ENV;
use sheetwash::{CsvStore, SheetsClient, Table, TableSink, TableSource};

use crate::cli::StoreArgs;

/// Either a local CSV directory or a remote spreadsheet.
pub enum Backend {
    Csv(CsvStore),
    Sheets(SheetsClient),
}

impl Backend {
    /// Open the backend selected on the command line.
    pub fn open(
        args: &StoreArgs,
        token: Option<String>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        if let Some(dir) = &args.input_dir {
            return Ok(Backend::Csv(CsvStore::new(dir)));
        }

        match &args.spreadsheet_id {
            Some(id) => Ok(Backend::Sheets(sheets_client(id, token)?)),
            None => Err("Either --input-dir or --spreadsheet-id is required".into()),
        }
    }

    pub fn source(&self) -> &dyn TableSource {
        match self {
            Backend::Csv(store) => store,
            Backend::Sheets(client) => client,
        }
    }

    pub fn sink(&self) -> &dyn TableSink {
        match self {
            Backend::Csv(store) => store,
            Backend::Sheets(client) => client,
        }
    }

    /// Human-readable location.
    pub fn describe(&self) -> String {
        match self {
            Backend::Csv(store) => store.dir().display().to_string(),
            Backend::Sheets(client) => format!("spreadsheet {}", client.config().spreadsheet_id),
        }
    }
}

/// Build a spreadsheet client from an explicit token or the environment.
pub fn sheets_client(
    spreadsheet_id: &str,
    token: Option<String>,
) -> Result<SheetsClient, Box<dyn std::error::Error>> {
    let client = match token {
        Some(token) => SheetsClient::new(spreadsheet_id, token)?,
        None => SheetsClient::from_env(spreadsheet_id).map_err(|e| {
            format!("{}\nPass --token or set {}.", e, TOKEN_ENV)
        })?,
    };
    Ok(client)
}

/// Print the first rows of a table as an aligned grid.
pub fn print_preview(title: &str, table: &Table, rows: usize) {
    println!(
        "{} {}",
        title.cyan().bold(),
        format!("({} rows x {} columns)", table.row_count(), table.column_count()).dimmed()
    );

    let head = table.head(rows);
    let names = head.column_names();
    let widths: Vec<usize> = names
        .iter()
        .map(|name| {
            let column = head.column(name);
            let longest = column
                .map(|c| c.cells().iter().map(|v| v.to_string().chars().count()).max().unwrap_or(0))
                .unwrap_or(0);
            longest.max(name.chars().count())
        })
        .collect();

    let header: Vec<String> = names
        .iter()
        .zip(&widths)
        .map(|(name, width)| pad(name, *width))
        .collect();
    println!("  {}", header.join("  ").bold());

    for row in 0..head.row_count() {
        let cells: Vec<String> = head
            .row(row)
            .unwrap_or_default()
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let text = pad(&cell.to_string(), *width);
                if cell.is_missing() {
                    text.red().to_string()
                } else {
                    text
                }
            })
            .collect();
        println!("  {}", cells.join("  "));
    }
    println!();
}

/// Left-align to a width measured in characters, not bytes.
fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}
