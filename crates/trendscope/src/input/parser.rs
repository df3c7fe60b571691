//! File parser for delimited text and JSON column descriptors.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::source::{DataTable, SourceMetadata};
use crate::error::{Result, TrendscopeError};
use crate::schema::DatasetInput;

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
        }
    }
}

/// Reads datasets from disk into typed columns.
#[derive(Debug)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the validated dataset and its metadata.
    ///
    /// `.json` files hold a [`DatasetInput`]; `.xlsx`/`.xls`/`.parquet`
    /// are rejected; anything else is treated as delimited text.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(DatasetInput, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| TrendscopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let size_bytes = file
            .metadata()
            .map_err(|e| TrendscopeError::Io {
                path: path.to_path_buf(),
                source: e,
            })?
            .len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| TrendscopeError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let (mut input, format) = match extension.as_str() {
            "json" => (self.parse_json(&contents)?, "json".to_string()),
            "xlsx" | "xls" | "parquet" => {
                return Err(TrendscopeError::UnsupportedFormat(format!(
                    "'{}' files must be exported to CSV or JSON first",
                    extension
                )));
            }
            _ => {
                let delimiter = match self.config.delimiter {
                    Some(d) => d,
                    None => detect_delimiter(&contents)?,
                };
                let table = self.parse_bytes(&contents, delimiter)?;
                (DatasetInput::new(table.to_columns()), delimiter_format(delimiter))
            }
        };

        if input.file_name.is_none() {
            input.file_name = path.file_name().map(|s| s.to_string_lossy().into_owned());
        }
        input.validate()?;

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            input.row_count(),
            input.columns.len(),
        );
        info!(
            file = %source.file,
            format = %source.format,
            rows = source.row_count,
            columns = source.column_count,
            "parsed input file"
        );

        Ok((input, source))
    }

    /// Parse a JSON dataset description.
    pub fn parse_json(&self, bytes: &[u8]) -> Result<DatasetInput> {
        let input: DatasetInput = serde_json::from_slice(bytes)?;
        if input.columns.is_empty() {
            return Err(TrendscopeError::EmptyData("No columns found".to_string()));
        }
        Ok(input)
    }

    /// Parse delimited bytes into a string table.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<DataTable> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(self.config.has_header)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = if self.config.has_header {
            reader.headers()?.iter().map(|s| s.trim().to_string()).collect()
        } else {
            Vec::new()
        };

        let mut rows = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            if let Some(max) = self.config.max_rows {
                if row_idx >= max {
                    break;
                }
            }
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
        }

        // Without a header, name columns after the widest row.
        let headers = if self.config.has_header {
            headers
        } else {
            let width = rows.iter().map(Vec::len).max().unwrap_or(0);
            (0..width).map(|i| format!("column_{}", i + 1)).collect()
        };

        if headers.is_empty() {
            return Err(TrendscopeError::EmptyData("No columns found".to_string()));
        }
        if rows.is_empty() {
            return Err(TrendscopeError::EmptyData("No data rows found".to_string()));
        }

        let expected_cols = headers.len();
        for row in &mut rows {
            row.resize(expected_cols, String::new());
        }

        debug!(rows = rows.len(), columns = expected_cols, "parsed delimited data");
        Ok(DataTable::new(headers, rows, delimiter))
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

fn delimiter_format(delimiter: u8) -> String {
    match delimiter {
        b'\t' => "tsv",
        b',' => "csv",
        b';' => "csv-semicolon",
        b'|' => "psv",
        _ => "delimited",
    }
    .to_string()
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(TrendscopeError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Consistent counts dominate; tab gets a small bonus since it rarely
        // appears inside values.
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnKind;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_quoted_delimiters_ignored() {
        assert_eq!(count_delimiter_in_line("\"a,b\",c", b','), 1);
    }

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let data = b"month,revenue\n2024-01,100\n2024-02,110";
        let table = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(table.headers, vec!["month", "revenue"]);
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.get(1, 1), Some("110"));
    }

    #[test]
    fn test_parse_pads_short_rows() {
        let parser = Parser::new();
        let table = parser.parse_bytes(b"a,b,c\n1,2\n", b',').unwrap();
        assert_eq!(table.rows[0], vec!["1", "2", ""]);
    }

    #[test]
    fn test_parse_without_header() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..ParserConfig::default()
        });
        let table = parser.parse_bytes(b"1,2\n3,4\n", b',').unwrap();
        assert_eq!(table.headers, vec!["column_1", "column_2"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_header_only_is_empty() {
        let parser = Parser::new();
        assert!(matches!(
            parser.parse_bytes(b"a,b\n", b','),
            Err(TrendscopeError::EmptyData(_))
        ));
    }

    #[test]
    fn test_parse_json() {
        let parser = Parser::new();
        let input = parser
            .parse_json(br#"{"columns": [{"name": "users", "type": "numeric", "values": [1, 2, 3]}]}"#)
            .unwrap();
        assert_eq!(input.columns[0].kind, ColumnKind::Numeric);

        assert!(parser.parse_json(br#"{"columns": []}"#).is_err());
    }
}
