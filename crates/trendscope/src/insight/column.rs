//! Per-column health result.

use serde::{Deserialize, Serialize};

use super::trend::TrendAnalysis;

/// Business importance of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    High,
    Medium,
    Low,
}

impl std::fmt::Display for Criticality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Criticality::High => write!(f, "high"),
            Criticality::Medium => write!(f, "medium"),
            Criticality::Low => write!(f, "low"),
        }
    }
}

/// Severity of a column's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Critical,
    Warning,
    Good,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Critical => write!(f, "critical"),
            RiskLevel::Warning => write!(f, "warning"),
            RiskLevel::Good => write!(f, "good"),
        }
    }
}

/// Health verdict for one column, as produced by the health scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnHealth {
    pub criticality: Criticality,
    /// Health score (0.0-1.0).
    pub health_score: f64,
    pub risk_level: RiskLevel,
    /// Business areas the column affects.
    pub impact_area: Vec<String>,
}

/// Everything computed for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStatistics {
    /// Column name.
    pub name: String,
    pub trend: TrendAnalysis,
    pub criticality: Criticality,
    /// Health score (0.0-1.0).
    pub health_score: f64,
    pub risk_level: RiskLevel,
    pub impact_area: Vec<String>,
    /// Number of cells that coerced to a finite number.
    pub valid_count: usize,
    /// Total number of cells.
    pub total_count: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl ColumnStatistics {
    /// Share of cells that carry a usable number.
    pub fn completeness(&self) -> f64 {
        if self.total_count == 0 {
            0.0
        } else {
            self.valid_count as f64 / self.total_count as f64
        }
    }
}
