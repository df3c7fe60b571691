//! Trend analysis for a single ordered numeric sequence.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{Result, TrendscopeError};
use crate::insight::{TrendAnalysis, TrendDirection, TrendPattern};
use crate::schema::Column;
use crate::stats;

/// Thresholds used by the trend analyzer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendConfig {
    /// Minimum number of valid values for a real analysis.
    pub min_points: usize,
    /// Below this correlation the series has no linear direction.
    pub weak_correlation: f64,
    /// Volatility above `ratio * mean` marks a directionless series volatile.
    pub volatility_ratio: f64,
    /// Below this correlation the pattern is irregular.
    pub irregular_correlation: f64,
    /// `|slope|` above `ratio * mean` marks the pattern exponential.
    pub exponential_slope_ratio: f64,
    /// Candidate seasonal lags.
    pub seasonal_lags: Vec<usize>,
    /// Autocorrelation above this marks the series seasonal.
    pub seasonality_threshold: f64,
    /// IQR fence multiplier for outliers.
    pub iqr_multiplier: f64,
    /// Sample size at which the sample-size score saturates.
    pub full_sample_size: usize,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            min_points: 3,
            weak_correlation: 0.3,
            volatility_ratio: 0.2,
            irregular_correlation: 0.5,
            exponential_slope_ratio: 0.1,
            seasonal_lags: vec![7, 12, 24, 30],
            seasonality_threshold: 0.6,
            iqr_multiplier: 1.5,
            full_sample_size: 50,
        }
    }
}

impl TrendConfig {
    /// Check thresholds for values the analyzer cannot work with.
    pub fn validate(&self) -> Result<()> {
        let unit_interval = [
            ("weak_correlation", self.weak_correlation),
            ("irregular_correlation", self.irregular_correlation),
            ("seasonality_threshold", self.seasonality_threshold),
        ];
        for (name, value) in unit_interval {
            if !(0.0..=1.0).contains(&value) {
                return Err(TrendscopeError::Config(format!(
                    "trend.{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        let non_negative = [
            ("volatility_ratio", self.volatility_ratio),
            ("exponential_slope_ratio", self.exponential_slope_ratio),
            ("iqr_multiplier", self.iqr_multiplier),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(TrendscopeError::Config(format!(
                    "trend.{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.min_points < 2 {
            return Err(TrendscopeError::Config(
                "trend.min_points must be at least 2".to_string(),
            ));
        }
        if self.full_sample_size == 0 {
            return Err(TrendscopeError::Config(
                "trend.full_sample_size must be positive".to_string(),
            ));
        }
        if self.seasonal_lags.contains(&0) {
            return Err(TrendscopeError::Config(
                "trend.seasonal_lags must not contain 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Residual share of the signal below which a line fits exactly.
const EXACT_FIT_TOLERANCE: f64 = 1e-20;

/// Computes direction, confidence, volatility, outliers and seasonality for
/// ordered numeric sequences.
#[derive(Debug, Clone, Default)]
pub struct TrendAnalyzer {
    config: TrendConfig,
}

impl TrendAnalyzer {
    /// Create an analyzer with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom thresholds.
    pub fn with_config(config: TrendConfig) -> Self {
        Self { config }
    }

    /// Thresholds in use.
    pub fn config(&self) -> &TrendConfig {
        &self.config
    }

    /// Analyze a column's cells, coercing them to numbers first.
    #[instrument(skip_all, fields(column = %column.name))]
    pub fn analyze_column(&self, column: &Column) -> TrendAnalysis {
        let trend = self.analyze(&column.numeric_values());
        debug!(
            direction = %trend.direction,
            slope = trend.slope,
            confidence = trend.confidence,
            outliers = trend.outliers.len(),
            "analyzed column trend"
        );
        trend
    }

    /// Analyze a sequence where `None` (or a non-finite number) marks a
    /// missing value.
    pub fn analyze(&self, values: &[Option<f64>]) -> TrendAnalysis {
        let raw_count = values.len();

        // Keep row positions so outliers can be reported against the input.
        let valid: Vec<(usize, f64)> = values
            .iter()
            .enumerate()
            .filter_map(|(idx, v)| v.filter(|n| n.is_finite()).map(|n| (idx, n)))
            .collect();

        // Below two points there is no slope to fit, whatever the config says.
        if valid.len() < self.config.min_points.max(2) {
            return TrendAnalysis::insufficient();
        }

        let ys: Vec<f64> = valid.iter().map(|&(_, v)| v).collect();
        let n = ys.len();
        let mean = stats::mean(&ys);

        let (slope, intercept) = stats::linear_regression(&ys);
        let xs: Vec<f64> = (0..n).map(|i| i as f64).collect();
        let correlation = stats::pearson_correlation(&xs, &ys).abs();

        let volatility = stats::mean_absolute_change(&ys);
        let change_rate = change_rate(ys[0], ys[n - 1]);
        let outliers = self.detect_outliers(&valid);

        let direction = self.classify_direction(slope, correlation, volatility, mean);
        let seasonality = self.detect_seasonality(&ys, slope, intercept);
        let pattern = self.classify_pattern(slope, correlation, seasonality, mean);

        let sample_score = (n as f64 / self.config.full_sample_size as f64).min(1.0);
        let completeness = n as f64 / raw_count as f64;
        let confidence = (sample_score.clamp(0.0, 1.0)
            + correlation.clamp(0.0, 1.0)
            + completeness.clamp(0.0, 1.0))
            / 3.0;

        TrendAnalysis {
            direction,
            slope: finite_or_zero(slope),
            confidence,
            correlation,
            seasonality,
            change_rate,
            volatility: finite_or_zero(volatility),
            outliers,
            pattern,
        }
    }

    /// Direction verdict: weak fits are stable or volatile, otherwise the
    /// slope sign decides.
    fn classify_direction(
        &self,
        slope: f64,
        correlation: f64,
        volatility: f64,
        mean: f64,
    ) -> TrendDirection {
        if correlation < self.config.weak_correlation {
            if volatility > self.config.volatility_ratio * mean {
                TrendDirection::Volatile
            } else {
                TrendDirection::Stable
            }
        } else if slope > 0.0 {
            TrendDirection::Increasing
        } else if slope < 0.0 {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }

    fn classify_pattern(
        &self,
        slope: f64,
        correlation: f64,
        seasonality: bool,
        mean: f64,
    ) -> TrendPattern {
        if seasonality {
            TrendPattern::Cyclical
        } else if correlation < self.config.irregular_correlation {
            TrendPattern::Irregular
        } else if slope.abs() > self.config.exponential_slope_ratio * mean {
            TrendPattern::Exponential
        } else {
            TrendPattern::Linear
        }
    }

    /// Autocorrelation of the residuals around the fitted line, so a steady
    /// trend alone never reads as a cycle. A lag is only tested when the
    /// series covers at least two periods.
    fn detect_seasonality(&self, values: &[f64], slope: f64, intercept: f64) -> bool {
        let residuals: Vec<f64> = values
            .iter()
            .enumerate()
            .map(|(i, &y)| y - (intercept + slope * i as f64))
            .collect();

        // An exact fit leaves only rounding noise, which has no period.
        let residual_ss: f64 = residuals.iter().map(|r| r * r).sum();
        let total_ss: f64 = values.iter().map(|v| v * v).sum();
        if !residual_ss.is_finite() || residual_ss <= EXACT_FIT_TOLERANCE * total_ss {
            return false;
        }

        self.config
            .seasonal_lags
            .iter()
            .filter(|&&lag| values.len() / 2 >= lag)
            .any(|&lag| stats::autocorrelation(&residuals, lag) > self.config.seasonality_threshold)
    }

    /// IQR fences with index-based quartiles; returns row indices.
    fn detect_outliers(&self, valid: &[(usize, f64)]) -> Vec<usize> {
        let mut sorted: Vec<f64> = valid.iter().map(|&(_, v)| v).collect();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let (q1, q3) = stats::quartiles(&sorted);
        let iqr = q3 - q1;
        let lower = q1 - self.config.iqr_multiplier * iqr;
        let upper = q3 + self.config.iqr_multiplier * iqr;

        valid
            .iter()
            .filter(|&&(_, v)| v < lower || v > upper)
            .map(|&(idx, _)| idx)
            .collect()
    }
}

/// Percentage change from `first` to `last`; 0 when `first` is 0.
fn change_rate(first: f64, last: f64) -> f64 {
    if first == 0.0 {
        return 0.0;
    }
    finite_or_zero((last - first).abs() / first * 100.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
