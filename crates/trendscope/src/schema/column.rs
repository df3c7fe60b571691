//! Column descriptor handed to the analysis engine.

use serde::{Deserialize, Serialize};

use super::types::{CellValue, ColumnKind};

/// A named sequence of raw cells plus its declared kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Declared semantic type.
    #[serde(rename = "type", default)]
    pub kind: ColumnKind,
    /// Raw cell values in row order.
    #[serde(default)]
    pub values: Vec<CellValue>,
}

impl Column {
    /// Create a column from raw cells.
    pub fn new(name: impl Into<String>, kind: ColumnKind, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            kind,
            values,
        }
    }

    /// Create a numeric column where `None` marks a missing cell.
    pub fn numeric(name: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self::new(
            name,
            ColumnKind::Numeric,
            values.into_iter().map(CellValue::from).collect(),
        )
    }

    /// Create a numeric column with no missing cells.
    pub fn from_f64(name: impl Into<String>, values: &[f64]) -> Self {
        Self::numeric(name, values.iter().copied().map(Some))
    }

    /// Create a text column from string cells.
    pub fn text(name: impl Into<String>, values: &[&str]) -> Self {
        Self::new(
            name,
            ColumnKind::Text,
            values.iter().map(|v| CellValue::from(*v)).collect(),
        )
    }

    /// Total number of cells, including missing ones.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the column has no cells at all.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of non-missing cells.
    pub fn non_null_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_null()).count()
    }

    /// Cells coerced to numbers, keeping row positions.
    pub fn numeric_values(&self) -> Vec<Option<f64>> {
        self.values.iter().map(CellValue::as_number).collect()
    }

    /// Whether at least one cell coerces to a number.
    pub fn has_numeric_values(&self) -> bool {
        self.values.iter().any(|v| v.as_number().is_some())
    }
}
