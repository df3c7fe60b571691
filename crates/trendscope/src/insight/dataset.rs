//! Dataset-wide insight types.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::column::ColumnStatistics;
use super::trend::TrendAnalysis;

/// Business context inferred from column and file names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Sales,
    Financial,
    Marketing,
    Operations,
    #[default]
    Customer,
    Scientific,
}

impl Domain {
    /// All domains in tie-break priority order.
    pub const ALL: [Domain; 6] = [
        Domain::Sales,
        Domain::Financial,
        Domain::Marketing,
        Domain::Operations,
        Domain::Customer,
        Domain::Scientific,
    ];

    /// Phrase used when framing generated text for this domain.
    pub fn focus(&self) -> &'static str {
        match self {
            Domain::Sales => "sales performance",
            Domain::Financial => "financial position",
            Domain::Marketing => "campaign effectiveness",
            Domain::Operations => "operational efficiency",
            Domain::Customer => "customer experience",
            Domain::Scientific => "experimental results",
        }
    }
}

impl std::fmt::Display for Domain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Domain::Sales => write!(f, "sales"),
            Domain::Financial => write!(f, "financial"),
            Domain::Marketing => write!(f, "marketing"),
            Domain::Operations => write!(f, "operations"),
            Domain::Customer => write!(f, "customer"),
            Domain::Scientific => write!(f, "scientific"),
        }
    }
}

impl std::str::FromStr for Domain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sales" => Ok(Domain::Sales),
            "financial" | "finance" => Ok(Domain::Financial),
            "marketing" => Ok(Domain::Marketing),
            "operations" | "ops" => Ok(Domain::Operations),
            "customer" => Ok(Domain::Customer),
            "scientific" | "science" => Ok(Domain::Scientific),
            _ => Err(format!(
                "Unknown domain: {}. Use: sales, financial, marketing, operations, customer, or scientific.",
                s
            )),
        }
    }
}

/// Symmetric pairwise Pearson correlations, keyed by column name.
///
/// Serializes as a nested JSON object in column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationMatrix {
    cells: IndexMap<String, IndexMap<String, f64>>,
}

impl CorrelationMatrix {
    /// Create an empty matrix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from column names and a square coefficient table.
    ///
    /// `values[i][j]` is the coefficient between `names[i]` and `names[j]`.
    /// Rows keep the order of `names`.
    pub fn from_square(names: &[&str], values: &[Vec<f64>]) -> Self {
        let cells = names
            .iter()
            .zip(values)
            .map(|(row_name, row)| {
                let row = names
                    .iter()
                    .zip(row)
                    .map(|(col_name, r)| (col_name.to_string(), *r))
                    .collect();
                (row_name.to_string(), row)
            })
            .collect();
        Self { cells }
    }

    /// Correlation between two columns, if both participate.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.cells.get(a).and_then(|row| row.get(b)).copied()
    }

    /// The row for one column.
    pub fn row(&self, name: &str) -> Option<&IndexMap<String, f64>> {
        self.cells.get(name)
    }

    /// Correlations of `name` with every other column.
    pub fn correlations_for(&self, name: &str) -> Vec<f64> {
        self.cells
            .get(name)
            .map(|row| {
                row.iter()
                    .filter(|(other, _)| other.as_str() != name)
                    .map(|(_, r)| *r)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Participating column names in order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.keys().map(String::as_str)
    }

    /// Off-diagonal pairs with `|r| > threshold`, each reported once.
    pub fn strong_pairs(&self, threshold: f64) -> Vec<(String, String, f64)> {
        let names: Vec<&String> = self.cells.keys().collect();
        let mut pairs = Vec::new();
        for (i, a) in names.iter().enumerate() {
            for b in names.iter().skip(i + 1) {
                if let Some(r) = self.get(a, b) {
                    if r.abs() > threshold {
                        pairs.push(((*a).clone(), (*b).clone(), r));
                    }
                }
            }
        }
        pairs
    }

    /// Number of participating columns.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether no column participates.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Dataset-wide business health.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessHealth {
    /// Mean column health score (0.0-1.0).
    pub score: f64,
    pub critical_issues: Vec<String>,
    pub opportunities: Vec<String>,
    pub recommendations: Vec<String>,
}

/// Data quality proxies.
///
/// Only completeness is measured; consistency and accuracy are fixed
/// fractions of it and timeliness comes from date parseability.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    pub completeness: f64,
    pub consistency: f64,
    pub accuracy: f64,
    pub timeliness: f64,
}

impl DataQuality {
    /// Mean of completeness, consistency and accuracy.
    pub fn core_score(&self) -> f64 {
        (self.completeness + self.consistency + self.accuracy) / 3.0
    }
}

/// Top-level result of analyzing a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetInsights {
    /// Vote-aggregated trend across numeric columns.
    pub overall_trend: TrendAnalysis,
    /// Per-column results for numeric columns.
    pub key_columns: Vec<ColumnStatistics>,
    pub correlation_matrix: CorrelationMatrix,
    pub business_health: BusinessHealth,
    pub data_quality: DataQuality,
    /// Overall confidence (0.0-1.0).
    pub confidence_level: f64,
    pub domain_type: Domain,
    /// Plain-language summary sentences.
    #[serde(default)]
    pub summary: Vec<String>,
    pub row_count: usize,
    pub column_count: usize,
}

impl DatasetInsights {
    /// Insights for a dataset with no columns.
    pub fn empty() -> Self {
        Self {
            overall_trend: TrendAnalysis::insufficient(),
            key_columns: Vec::new(),
            correlation_matrix: CorrelationMatrix::new(),
            business_health: BusinessHealth::default(),
            data_quality: DataQuality::default(),
            confidence_level: 0.0,
            domain_type: Domain::default(),
            summary: Vec::new(),
            row_count: 0,
            column_count: 0,
        }
    }

    /// Look up a key column by name.
    pub fn column(&self, name: &str) -> Option<&ColumnStatistics> {
        self.key_columns.iter().find(|c| c.name == name)
    }
}
