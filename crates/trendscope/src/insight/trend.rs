//! Per-column trend result.

use serde::{Deserialize, Serialize};

/// Overall movement of a numeric sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
    /// Weak linear fit with large step-to-step swings.
    Volatile,
    /// Fewer than three valid values.
    InsufficientData,
}

impl TrendDirection {
    /// Lowercase label used in generated text.
    pub fn label(&self) -> &'static str {
        match self {
            TrendDirection::Increasing => "increasing",
            TrendDirection::Decreasing => "decreasing",
            TrendDirection::Stable => "stable",
            TrendDirection::Volatile => "volatile",
            TrendDirection::InsufficientData => "insufficient data",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Shape of the movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendPattern {
    Linear,
    Exponential,
    Cyclical,
    Irregular,
}

impl std::fmt::Display for TrendPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrendPattern::Linear => write!(f, "linear"),
            TrendPattern::Exponential => write!(f, "exponential"),
            TrendPattern::Cyclical => write!(f, "cyclical"),
            TrendPattern::Irregular => write!(f, "irregular"),
        }
    }
}

/// Trend analysis of one ordered numeric sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    /// Direction verdict.
    pub direction: TrendDirection,
    /// Least-squares slope per position.
    pub slope: f64,
    /// Blended confidence (0.0-1.0).
    pub confidence: f64,
    /// Magnitude of the index/value Pearson correlation (0.0-1.0).
    pub correlation: f64,
    /// Whether a canonical lag shows strong autocorrelation.
    pub seasonality: bool,
    /// Percentage change from the first to the last valid value.
    pub change_rate: f64,
    /// Mean absolute step between consecutive valid values.
    pub volatility: f64,
    /// Row indices of IQR outliers.
    pub outliers: Vec<usize>,
    /// Movement shape.
    pub pattern: TrendPattern,
}

impl TrendAnalysis {
    /// The zeroed result for sequences with fewer than three valid values.
    pub fn insufficient() -> Self {
        Self {
            direction: TrendDirection::InsufficientData,
            slope: 0.0,
            confidence: 0.0,
            correlation: 0.0,
            seasonality: false,
            change_rate: 0.0,
            volatility: 0.0,
            outliers: Vec::new(),
            pattern: TrendPattern::Irregular,
        }
    }

    /// Whether this trend carries real measurements.
    pub fn is_valid(&self) -> bool {
        self.direction != TrendDirection::InsufficientData
    }
}

impl Default for TrendAnalysis {
    fn default() -> Self {
        Self::insufficient()
    }
}
