//! Core type definitions for column input.

use serde::{Deserialize, Serialize};

/// Declared semantic type of a column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnKind {
    /// Numeric measurements; the only kind that gets trend analysis.
    Numeric,
    /// Date or date-time values.
    Date,
    /// Free text or categorical values.
    #[default]
    #[serde(alias = "categorical", alias = "string")]
    Text,
}

impl ColumnKind {
    /// Returns true if this kind is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnKind::Numeric)
    }

    /// Returns true if this kind is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, ColumnKind::Date)
    }
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Date => write!(f, "date"),
            ColumnKind::Text => write!(f, "text"),
        }
    }
}

/// A single raw cell.
///
/// Deserialized untagged so JSON `null`, numbers, booleans and strings all
/// map onto the matching variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    /// Missing value.
    Null,
    /// Numeric value (may be non-finite if the caller supplied one).
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Any other value, kept verbatim.
    Text(String),
}

impl CellValue {
    /// Whether this cell counts as missing.
    ///
    /// Null, non-finite numbers and null-like tokens (`NA`, `null`, `-`, ...)
    /// are all missing.
    pub fn is_null(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Number(n) => !n.is_finite(),
            CellValue::Bool(_) => false,
            CellValue::Text(s) => is_null_token(s),
        }
    }

    /// Coerce this cell to a finite number.
    ///
    /// Strings are trimmed and may carry a leading currency sign, thousands
    /// separators and a trailing percent sign (`"$1,200"`, `"12.5%"`).
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) if n.is_finite() => Some(*n),
            CellValue::Text(s) => parse_number(s),
            _ => None,
        }
    }

    /// Borrow the text of a string cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Number)
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        if is_null_token(value) {
            CellValue::Null
        } else {
            CellValue::Text(value.to_string())
        }
    }
}

/// Check if a raw string represents a missing/null value.
pub fn is_null_token(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed.eq_ignore_ascii_case("undefined")
        || trimmed == "."
        || trimmed == "-"
}

fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if is_null_token(trimmed) {
        return None;
    }

    let unsigned = trimmed.trim_start_matches(['$', '€', '£']);
    let unsigned = unsigned.strip_suffix('%').unwrap_or(unsigned);
    let cleaned: String = unsigned.chars().filter(|&c| c != ',').collect();

    cleaned.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}
