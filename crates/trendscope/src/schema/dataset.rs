//! Dataset-level input and shape validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TrendscopeError};

use super::column::Column;

/// A full dataset as accepted at the JSON boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInput {
    /// Original file name, used only for domain detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    /// Columns in their original order.
    #[serde(default)]
    pub columns: Vec<Column>,
}

impl DatasetInput {
    /// Create a dataset from columns.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            file_name: None,
            columns,
        }
    }

    /// Set the file name.
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Parse and validate a JSON dataset description.
    pub fn from_json(json: &str) -> Result<Self> {
        let input: DatasetInput = serde_json::from_str(json)?;
        input.validate()?;
        Ok(input)
    }

    /// Number of rows (length of the longest column).
    pub fn row_count(&self) -> usize {
        self.columns.iter().map(Column::len).max().unwrap_or(0)
    }

    /// Column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Check the dataset shape.
    pub fn validate(&self) -> Result<()> {
        validate_columns(&self.columns)
    }
}

/// Reject column sets the analysis core cannot interpret.
///
/// Names must be non-empty and unique, and all columns must have the same
/// number of cells so rows line up for correlation.
pub fn validate_columns(columns: &[Column]) -> Result<()> {
    let mut seen = HashSet::new();
    for column in columns {
        if column.name.trim().is_empty() {
            return Err(TrendscopeError::InvalidInput(
                "column name must not be empty".to_string(),
            ));
        }
        if !seen.insert(column.name.as_str()) {
            return Err(TrendscopeError::InvalidInput(format!(
                "duplicate column name '{}'",
                column.name
            )));
        }
    }

    if let Some(first) = columns.first() {
        let expected = first.len();
        if let Some(ragged) = columns.iter().find(|c| c.len() != expected) {
            return Err(TrendscopeError::InvalidInput(format!(
                "column '{}' has {} values, expected {} (from '{}')",
                ragged.name,
                ragged.len(),
                expected,
                first.name
            )));
        }
    }

    Ok(())
}
