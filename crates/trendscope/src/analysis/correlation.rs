//! Pairwise correlation across numeric columns.

use serde::{Deserialize, Serialize};

use crate::insight::CorrelationMatrix;
use crate::schema::Column;
use crate::stats::pearson_correlation;

/// Configuration for the correlation matrix builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Rows where both columns are numeric needed before a pair gets a
    /// non-zero coefficient.
    pub min_overlap: usize,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self { min_overlap: 2 }
    }
}

/// Builds the symmetric Pearson matrix over all columns carrying numbers.
#[derive(Debug, Clone, Default)]
pub struct CorrelationBuilder {
    config: CorrelationConfig,
}

impl CorrelationBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder with custom settings.
    pub fn with_config(config: CorrelationConfig) -> Self {
        Self { config }
    }

    /// Build the matrix.
    ///
    /// A column participates if at least one of its cells coerces to a
    /// number. Each unordered pair is computed once on the rows where both
    /// cells are numeric and mirrored, so `m[a][b] == m[b][a]` holds exactly.
    pub fn build(&self, columns: &[Column]) -> CorrelationMatrix {
        let numeric: Vec<(&str, Vec<Option<f64>>)> = columns
            .iter()
            .filter(|c| c.has_numeric_values())
            .map(|c| (c.name.as_str(), c.numeric_values()))
            .collect();

        let n = numeric.len();
        let mut square = vec![vec![0.0; n]; n];
        for i in 0..n {
            square[i][i] = 1.0;
            for j in (i + 1)..n {
                let r = self.pairwise(&numeric[i].1, &numeric[j].1);
                square[i][j] = r;
                square[j][i] = r;
            }
        }

        let names: Vec<&str> = numeric.iter().map(|(name, _)| *name).collect();
        CorrelationMatrix::from_square(&names, &square)
    }

    fn pairwise(&self, a: &[Option<f64>], b: &[Option<f64>]) -> f64 {
        let (xs, ys): (Vec<f64>, Vec<f64>) = a
            .iter()
            .zip(b)
            .filter_map(|(x, y)| Some(((*x)?, (*y)?)))
            .unzip();

        if xs.len() < self.config.min_overlap.max(1) {
            return 0.0;
        }
        pearson_correlation(&xs, &ys)
    }
}

/// Build a correlation matrix with default settings.
pub fn build_correlation_matrix(columns: &[Column]) -> CorrelationMatrix {
    CorrelationBuilder::new().build(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_and_symmetry() {
        let columns = vec![
            Column::from_f64("a", &[1.0, 2.0, 3.0, 4.0]),
            Column::from_f64("b", &[2.0, 4.1, 5.9, 8.2]),
            Column::from_f64("c", &[9.0, 3.0, 7.0, 1.0]),
        ];
        let matrix = build_correlation_matrix(&columns);

        for name in ["a", "b", "c"] {
            assert_eq!(matrix.get(name, name), Some(1.0));
        }
        assert_eq!(matrix.get("a", "c"), matrix.get("c", "a"));
        assert!(matrix.get("a", "b").unwrap() > 0.99);
    }

    #[test]
    fn test_text_columns_excluded() {
        let columns = vec![
            Column::from_f64("a", &[1.0, 2.0, 3.0]),
            Column::text("region", &["n", "s", "e"]),
        ];
        let matrix = build_correlation_matrix(&columns);
        assert_eq!(matrix.len(), 1);
        assert_eq!(matrix.get("a", "region"), None);
    }

    #[test]
    fn test_pairwise_complete_rows() {
        let columns = vec![
            Column::numeric("a", [Some(1.0), None, Some(3.0), Some(4.0)]),
            Column::numeric("b", [Some(2.0), Some(100.0), Some(6.0), Some(8.0)]),
        ];
        let matrix = build_correlation_matrix(&columns);
        assert!((matrix.get("a", "b").unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_single_overlap_is_zero() {
        let columns = vec![
            Column::numeric("a", [Some(1.0), None]),
            Column::numeric("b", [Some(2.0), Some(3.0)]),
        ];
        let matrix = build_correlation_matrix(&columns);
        assert_eq!(matrix.get("a", "b"), Some(0.0));
        assert_eq!(matrix.get("a", "a"), Some(1.0));
    }

    #[test]
    fn test_empty_input() {
        assert!(build_correlation_matrix(&[]).is_empty());
    }
}
