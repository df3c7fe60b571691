//! Data source metadata and the raw delimited table.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::schema::{CellValue, Column, ColumnKind, is_null_token};

use super::dates::looks_like_date;

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, json, ...).
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the analysis was performed.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been read.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// Parsed delimited data, still as strings.
#[derive(Debug, Clone)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Convert into typed columns, inferring each column's kind.
    ///
    /// Numeric columns get their parseable cells stored as numbers; the
    /// rest keep their text.
    pub fn to_columns(&self) -> Vec<Column> {
        (0..self.column_count())
            .map(|idx| {
                let raw: Vec<&str> = self.column_values(idx).collect();
                let kind = infer_kind(&raw);
                let values = raw.iter().map(|v| to_cell(v, kind)).collect();
                debug!(column = %self.headers[idx], %kind, "inferred column kind");
                Column::new(self.headers[idx].clone(), kind, values)
            })
            .collect()
    }
}

/// Infer a column's kind from its non-null values.
///
/// The most common value shape wins; ties prefer numeric, then date.
pub fn infer_kind(values: &[&str]) -> ColumnKind {
    let mut numeric = 0usize;
    let mut date = 0usize;
    let mut text = 0usize;

    for value in values.iter().filter(|v| !is_null_token(v)) {
        if CellValue::from(*value).as_number().is_some() {
            numeric += 1;
        } else if looks_like_date(value) {
            date += 1;
        } else {
            text += 1;
        }
    }

    if numeric == 0 && date == 0 {
        ColumnKind::Text
    } else if numeric >= date && numeric >= text {
        ColumnKind::Numeric
    } else if date >= text {
        ColumnKind::Date
    } else {
        ColumnKind::Text
    }
}

fn to_cell(value: &str, kind: ColumnKind) -> CellValue {
    let cell = CellValue::from(value);
    if kind == ColumnKind::Numeric {
        if let Some(n) = cell.as_number() {
            return CellValue::Number(n);
        }
    }
    cell
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_table(headers: Vec<&str>, rows: Vec<Vec<&str>>) -> DataTable {
        DataTable::new(
            headers.into_iter().map(String::from).collect(),
            rows.into_iter()
                .map(|r| r.into_iter().map(String::from).collect())
                .collect(),
            b',',
        )
    }

    #[test]
    fn test_infer_kind() {
        assert_eq!(infer_kind(&["1", "2.5", "NA"]), ColumnKind::Numeric);
        assert_eq!(infer_kind(&["2024-01-01", "2024-02-01"]), ColumnKind::Date);
        assert_eq!(infer_kind(&["north", "south", "3"]), ColumnKind::Text);
        assert_eq!(infer_kind(&["", "NA"]), ColumnKind::Text);
    }

    #[test]
    fn test_to_columns() {
        let table = make_table(
            vec!["month", "revenue", "region"],
            vec![
                vec!["2024-01", "100", "north"],
                vec!["2024-02", "NA", "south"],
                vec!["2024-03", "$1,200", "east"],
            ],
        );
        let columns = table.to_columns();

        assert_eq!(columns[0].kind, ColumnKind::Date);
        assert_eq!(columns[1].kind, ColumnKind::Numeric);
        assert_eq!(
            columns[1].values,
            vec![CellValue::Number(100.0), CellValue::Null, CellValue::Number(1200.0)]
        );
        assert_eq!(columns[2].kind, ColumnKind::Text);
    }

    #[test]
    fn test_get_cell() {
        let table = make_table(vec!["a"], vec![vec!["x"]]);
        assert_eq!(table.get(0, 0), Some("x"));
        assert_eq!(table.get(1, 0), None);
    }
}
