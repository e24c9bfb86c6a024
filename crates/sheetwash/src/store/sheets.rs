//! Remote spreadsheet client over the Sheets REST API.

use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{Result, SheetwashError};
use crate::input::RawTable;
use crate::table::Table;

use super::sanitize::{wire_rows, wire_text};
use super::{TableSink, TableSource};

/// Sheets API endpoint.
const API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";

/// Environment variable holding an OAuth access token.
pub const TOKEN_ENV: &str = "SHEETWASH_SHEETS_TOKEN";

/// Configuration for the spreadsheet client.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    /// Spreadsheet identifier (the long id in the document URL).
    pub spreadsheet_id: String,
    /// Base URL of the API.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Retries after the first attempt for transient failures.
    pub max_retries: u32,
    /// Delay before the first retry; doubled on each further retry.
    pub retry_backoff: Duration,
    /// Row count of a newly created worksheet.
    pub new_sheet_rows: usize,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            base_url: API_URL.to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
            retry_backoff: Duration::from_millis(500),
            new_sheet_rows: 1000,
        }
    }
}

impl SheetsConfig {
    /// Configuration for one spreadsheet with default transport settings.
    pub fn for_spreadsheet(spreadsheet_id: impl Into<String>) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            ..Self::default()
        }
    }
}

/// Client bound to a single spreadsheet.
pub struct SheetsClient {
    client: Client,
    token: String,
    config: SheetsConfig,
}

impl SheetsClient {
    /// Create a client for a spreadsheet with the given access token.
    pub fn new(spreadsheet_id: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::with_config(token, SheetsConfig::for_spreadsheet(spreadsheet_id))
    }

    /// Create a client with custom configuration.
    pub fn with_config(token: impl Into<String>, config: SheetsConfig) -> Result<Self> {
        if config.spreadsheet_id.trim().is_empty() {
            return Err(SheetwashError::Config(
                "Spreadsheet id must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SheetwashError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            token: token.into(),
            config,
        })
    }

    /// Create from the access token in the environment.
    pub fn from_env(spreadsheet_id: impl Into<String>) -> Result<Self> {
        let token = std::env::var(TOKEN_ENV).map_err(|_| {
            SheetwashError::Config(format!("{} environment variable not set", TOKEN_ENV))
        })?;
        Self::new(spreadsheet_id, token)
    }

    /// Get the configuration.
    pub fn config(&self) -> &SheetsConfig {
        &self.config
    }

    /// Build headers for API requests.
    fn build_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|e| SheetwashError::Config(format!("Invalid access token: {}", e)))?,
        );
        Ok(headers)
    }

    /// URL of the spreadsheet resource, optionally with a `:method` suffix.
    fn spreadsheet_url(&self, method: Option<&str>) -> Result<Url> {
        let segment = match method {
            Some(m) => format!("{}:{}", self.config.spreadsheet_id, m),
            None => self.config.spreadsheet_id.clone(),
        };
        self.url_with_segments(&[segment])
    }

    /// URL of a values range, optionally with a `:method` suffix.
    fn values_url(&self, range: &str, method: Option<&str>) -> Result<Url> {
        let range = match method {
            Some(m) => format!("{}:{}", range, m),
            None => range.to_string(),
        };
        self.url_with_segments(&[self.config.spreadsheet_id.clone(), "values".to_string(), range])
    }

    fn url_with_segments(&self, segments: &[String]) -> Result<Url> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| SheetwashError::Config(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| SheetwashError::Config("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Send a request, retrying transport failures, 429 and 5xx responses.
    fn send(&self, request: impl Fn() -> RequestBuilder) -> Result<Response> {
        let mut attempt = 0;
        loop {
            let outcome = request().headers(self.build_headers()?).send();

            let retryable = match &outcome {
                Ok(response) => {
                    response.status().as_u16() == 429 || response.status().is_server_error()
                }
                Err(e) => e.is_timeout() || e.is_connect(),
            };

            if !retryable || attempt >= self.config.max_retries {
                return into_result(outcome);
            }

            let delay = backoff_delay(self.config.retry_backoff, attempt);
            tracing::warn!(
                attempt = attempt + 1,
                delay_ms = delay.as_millis() as u64,
                "spreadsheet request failed, retrying"
            );
            std::thread::sleep(delay);
            attempt += 1;
        }
    }

    /// Titles of all worksheets in the spreadsheet.
    pub fn worksheet_titles(&self) -> Result<Vec<String>> {
        let mut url = self.spreadsheet_url(None)?;
        url.query_pairs_mut()
            .append_pair("fields", "sheets.properties.title");

        let response = self.send(|| self.client.get(url.clone()))?;
        let metadata: SpreadsheetMetadata = parse_json(response)?;

        Ok(metadata
            .sheets
            .into_iter()
            .map(|s| s.properties.title)
            .collect())
    }

    /// Create a worksheet sized for `columns` columns.
    pub fn add_worksheet(&self, title: &str, columns: usize) -> Result<()> {
        let url = self.spreadsheet_url(Some("batchUpdate"))?;
        let body = json!({
            "requests": [{
                "addSheet": {
                    "properties": {
                        "title": title,
                        "gridProperties": {
                            "rowCount": self.config.new_sheet_rows,
                            "columnCount": columns.max(1)
                        }
                    }
                }
            }]
        });

        self.send(|| self.client.post(url.clone()).json(&body))?;
        tracing::debug!(worksheet = title, "created worksheet");
        Ok(())
    }

    /// Remove all values from a worksheet.
    pub fn clear_worksheet(&self, title: &str) -> Result<()> {
        let url = self.values_url(&sheet_range(title, None), Some("clear"))?;
        self.send(|| self.client.post(url.clone()).json(&json!({})))?;
        Ok(())
    }

    /// Read all values of a worksheet as displayed strings.
    pub fn read_values(&self, title: &str) -> Result<Vec<Vec<String>>> {
        let url = self.values_url(&sheet_range(title, None), None)?;
        let response = self.send(|| self.client.get(url.clone()))?;
        let range: ValueRange = parse_json(response)?;
        Ok(range.into_grid())
    }

    /// Write rows starting at cell A1, values taken as-is.
    pub fn write_values(&self, title: &str, rows: Vec<Vec<Value>>) -> Result<()> {
        let mut url = self.values_url(&sheet_range(title, Some("A1")), None)?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");
        let body = json!({ "values": rows });

        self.send(|| self.client.put(url.clone()).json(&body))?;
        Ok(())
    }

    /// Replace a worksheet's contents, creating the worksheet if needed.
    fn replace_worksheet(&self, title: &str, columns: usize, rows: Vec<Vec<Value>>) -> Result<()> {
        let exists = self.worksheet_titles()?.iter().any(|t| t == title);
        if exists {
            self.clear_worksheet(title)?;
        } else {
            self.add_worksheet(title, columns)?;
        }
        self.write_values(title, rows)
    }

    /// Upload raw rows as strings, e.g. generated data.
    pub fn store_raw(&self, worksheet: &str, raw: &RawTable) -> Result<()> {
        let rows = raw
            .to_grid()
            .into_iter()
            .map(|row| row.into_iter().map(Value::String).collect())
            .collect();
        self.replace_worksheet(worksheet, raw.column_count(), rows)?;
        tracing::info!("Data uploaded to spreadsheet worksheet: {}", worksheet);
        Ok(())
    }
}

impl TableSource for SheetsClient {
    fn fetch(&self, worksheet: &str) -> Result<RawTable> {
        let grid = self.read_values(worksheet)?;
        RawTable::from_grid(grid)
    }

    fn origin(&self) -> &str {
        "sheets"
    }
}

impl TableSink for SheetsClient {
    fn store(&self, worksheet: &str, table: &Table) -> Result<()> {
        self.replace_worksheet(worksheet, table.column_count(), wire_rows(table))?;
        tracing::info!("Data saved to spreadsheet worksheet: {}", worksheet);
        Ok(())
    }

    fn target(&self) -> &str {
        "sheets"
    }
}

/// A1-notation range for a worksheet, quoting the title.
fn sheet_range(title: &str, cell: Option<&str>) -> String {
    let quoted = format!("'{}'", title.replace('\'', "''"));
    match cell {
        Some(cell) => format!("{}!{}", quoted, cell),
        None => quoted,
    }
}

/// Exponential backoff with up to 50% jitter.
fn backoff_delay(base: Duration, attempt: u32) -> Duration {
    let exp = base.saturating_mul(2u32.saturating_pow(attempt));
    let jitter_ms = (exp.as_millis() as u64) / 2;
    exp + Duration::from_millis(fastrand::u64(0..=jitter_ms))
}

fn into_result(outcome: reqwest::Result<Response>) -> Result<Response> {
    let response =
        outcome.map_err(|e| SheetwashError::Transport(format!("API request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status().as_u16();
        let message = response.text().unwrap_or_default();
        return Err(SheetwashError::Api { status, message });
    }

    Ok(response)
}

fn parse_json<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T> {
    response
        .json()
        .map_err(|e| SheetwashError::Transport(format!("Failed to parse API response: {}", e)))
}

/// Spreadsheet metadata, reduced to worksheet titles.
#[derive(Debug, Deserialize)]
struct SpreadsheetMetadata {
    #[serde(default)]
    sheets: Vec<SheetEntry>,
}

#[derive(Debug, Deserialize)]
struct SheetEntry {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

/// Values of a range. The API omits `values` for an empty range.
#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl ValueRange {
    fn into_grid(self) -> Vec<Vec<String>> {
        self.values
            .iter()
            .map(|row| row.iter().map(wire_text).collect())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SheetsClient {
        SheetsClient::new("abc123", "token").unwrap()
    }

    #[test]
    fn test_empty_spreadsheet_id_rejected() {
        assert!(matches!(
            SheetsClient::new("  ", "token"),
            Err(SheetwashError::Config(_))
        ));
    }

    #[test]
    fn test_sheet_range_quoting() {
        assert_eq!(sheet_range("Arkusz1", None), "'Arkusz1'");
        assert_eq!(sheet_range("Bob's", Some("A1")), "'Bob''s'!A1");
    }

    #[test]
    fn test_values_url() {
        let url = client().values_url("'Arkusz 2'!A1", None).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123/values/'Arkusz%202'!A1"
        );

        let clear = client().values_url("'Arkusz2'", Some("clear")).unwrap();
        assert!(clear.as_str().ends_with("/values/'Arkusz2':clear"));
    }

    #[test]
    fn test_write_values_reports_unreachable_host() {
        let config = SheetsConfig {
            base_url: "http://127.0.0.1:1/v4/spreadsheets".to_string(),
            timeout: Duration::from_secs(2),
            max_retries: 0,
            ..SheetsConfig::for_spreadsheet("abc123")
        };
        let client = SheetsClient::with_config("token", config).unwrap();

        let result = client.write_values("Arkusz2", vec![vec![json!("Wiek")], vec![json!(30)]]);
        assert!(matches!(result, Err(SheetwashError::Transport(_))));
    }

    #[test]
    fn test_spreadsheet_url() {
        let url = client().spreadsheet_url(Some("batchUpdate")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/abc123:batchUpdate"
        );
    }

    #[test]
    fn test_value_range_into_grid() {
        let range: ValueRange = serde_json::from_str(
            r#"{"range": "Arkusz1!A1:C2", "majorDimension": "ROWS",
                "values": [["Płeć", "Wiek"], ["Kobieta", 30]]}"#,
        )
        .unwrap();
        assert_eq!(
            range.into_grid(),
            vec![vec!["Płeć", "Wiek"], vec!["Kobieta", "30"]]
        );

        let empty: ValueRange = serde_json::from_str(r#"{"range": "Arkusz1"}"#).unwrap();
        assert!(empty.into_grid().is_empty());
    }

    #[test]
    fn test_backoff_delay_bounds() {
        let base = Duration::from_millis(100);
        for attempt in 0..4 {
            let delay = backoff_delay(base, attempt);
            let floor = base * 2u32.pow(attempt);
            assert!(delay >= floor);
            assert!(delay <= floor + floor / 2);
        }
    }
}
