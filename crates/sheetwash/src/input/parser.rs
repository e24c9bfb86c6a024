//! CSV parser with delimiter detection.

use std::fs;
use std::path::Path;

use crate::error::{Result, SheetwashError};

use super::source::RawTable;

/// Delimiters to try when auto-detecting, in order of preference.
const DELIMITERS: &[u8] = &[b',', b';', b'\t', b'|'];

/// Non-blank lines inspected when auto-detecting.
const SAMPLE_LINES: usize = 10;

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            quote: b'"',
        }
    }
}

/// Parses delimited text into a [`RawTable`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file. The first record is the header.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<RawTable> {
        let path = path.as_ref();
        let contents = fs::read(path).map_err(|e| SheetwashError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        self.parse_bytes(&contents)
    }

    /// Parse in-memory CSV text. The first record is the header.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<RawTable> {
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => self.detect_delimiter(bytes)?,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(SheetwashError::EmptyData("No columns found".to_string()));
        }

        let rows = reader
            .records()
            .map(|record| record.map(|r| r.iter().map(str::to_string).collect()))
            .collect::<std::result::Result<Vec<Vec<String>>, _>>()?;

        Ok(RawTable::new(headers, rows))
    }

    /// Pick the delimiter that splits the sampled lines most evenly.
    ///
    /// A candidate must appear in the header line. Candidates giving every
    /// sampled line the same field count win over ragged ones, then more
    /// fields win, then the earlier entry in [`DELIMITERS`].
    fn detect_delimiter(&self, bytes: &[u8]) -> Result<u8> {
        let text = String::from_utf8_lossy(bytes);
        let sample: Vec<&str> = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .take(SAMPLE_LINES)
            .collect();

        let Some(header) = sample.first() else {
            return Err(SheetwashError::EmptyData("No lines to analyze".to_string()));
        };

        let best = DELIMITERS
            .iter()
            .rev()
            .filter_map(|&delimiter| {
                let expected = self.separators(header, delimiter);
                if expected == 0 {
                    return None;
                }
                let steady = sample
                    .iter()
                    .all(|line| self.separators(line, delimiter) == expected);
                Some((delimiter, (steady, expected)))
            })
            .max_by_key(|(_, score)| *score)
            .map(|(delimiter, _)| delimiter);

        Ok(best.unwrap_or(b','))
    }

    /// Number of `delimiter` bytes outside quoted sections.
    fn separators(&self, line: &str, delimiter: u8) -> usize {
        line.bytes()
            .scan(false, |quoted, b| {
                if b == self.config.quote {
                    *quoted = !*quoted;
                }
                Some(!*quoted && b == delimiter)
            })
            .filter(|hit| *hit)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(Parser::new().detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_semicolon_with_decimal_commas() {
        let data = b"Wiek;Srednie Zarobki\n30;4500,50\n41;3200,00";
        assert_eq!(Parser::new().detect_delimiter(data).unwrap(), b';');
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let table = parser
            .parse_bytes(b"name,age,city\nAlice,30,NYC\nBob,25")
            .unwrap();

        assert_eq!(table.headers, vec!["name", "age", "city"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(0, 0), Some("Alice"));
        assert_eq!(table.get(1, 2), Some(""));
    }

    #[test]
    fn test_parse_quoted_decimal_comma() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"a,b\nx,\"4500,50\"\n").unwrap();
        assert_eq!(table.get(0, 1), Some("4500,50"));
    }

    #[test]
    fn test_parse_empty() {
        let parser = Parser::new();
        assert!(matches!(
            parser.parse_bytes(b""),
            Err(SheetwashError::EmptyData(_))
        ));
    }
}
