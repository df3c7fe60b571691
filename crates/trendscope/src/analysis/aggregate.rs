//! Dataset-wide aggregation of per-column analyses.

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::input::parse_date;
use crate::insight::{
    BusinessHealth, ColumnStatistics, CorrelationMatrix, Criticality, DataQuality,
    DatasetInsights, RiskLevel, TrendAnalysis, TrendDirection, TrendPattern,
};
use crate::recommendation::RecommendationEngine;
use crate::schema::{CellValue, Column, ColumnKind};
use crate::stats;

use super::correlation::CorrelationBuilder;
use super::domain::DomainClassifier;
use super::health::HealthScorer;
use super::trend::TrendAnalyzer;

/// Column count at which the coverage component of confidence saturates.
const FULL_COLUMN_COVERAGE: f64 = 10.0;

/// Combines trend, health, correlation and domain analysis into
/// [`DatasetInsights`].
#[derive(Debug, Default)]
pub struct InsightAggregator {
    trend: TrendAnalyzer,
    health: HealthScorer,
    correlation: CorrelationBuilder,
    domain: DomainClassifier,
    recommendations: RecommendationEngine,
}

impl InsightAggregator {
    /// Create an aggregator with default components.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble an aggregator from configured components.
    pub fn with_components(
        trend: TrendAnalyzer,
        health: HealthScorer,
        correlation: CorrelationBuilder,
        domain: DomainClassifier,
        recommendations: RecommendationEngine,
    ) -> Self {
        Self {
            trend,
            health,
            correlation,
            domain,
            recommendations,
        }
    }

    /// Replace the domain classifier, e.g. to register extra scorers.
    pub fn with_domain_classifier(mut self, domain: DomainClassifier) -> Self {
        self.domain = domain;
        self
    }

    /// The domain classifier in use.
    pub fn domain_classifier(&self) -> &DomainClassifier {
        &self.domain
    }

    /// The trend analyzer in use.
    pub fn trend_analyzer(&self) -> &TrendAnalyzer {
        &self.trend
    }

    /// Analyze a set of columns.
    ///
    /// Only numeric columns become key columns, but every column counts
    /// toward data quality, correlation (if it carries numbers) and domain
    /// detection. An empty column set yields zeroed insights.
    pub fn aggregate(&self, columns: &[Column], file_name: Option<&str>) -> DatasetInsights {
        let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
        let domain_type = self.domain.detect(&names, file_name);

        if columns.is_empty() {
            let mut insights = DatasetInsights::empty();
            insights.domain_type = domain_type;
            insights.summary = self.recommendations.summary(&insights);
            return insights;
        }

        let correlation_matrix = self.correlation.build(columns);

        let key_columns: Vec<ColumnStatistics> = columns
            .iter()
            .filter(|c| c.kind.is_numeric())
            .map(|c| self.analyze_column(c, &correlation_matrix))
            .collect();

        let overall_trend = overall_trend(&key_columns);
        let business_health = business_health(&key_columns);
        let data_quality = data_quality(columns);
        let confidence_level = confidence_level(&key_columns, &data_quality, columns.len());

        let mut insights = DatasetInsights {
            overall_trend,
            key_columns,
            correlation_matrix,
            business_health,
            data_quality,
            confidence_level,
            domain_type,
            summary: Vec::new(),
            row_count: columns.iter().map(Column::len).max().unwrap_or(0),
            column_count: columns.len(),
        };

        insights.business_health.recommendations = self.recommendations.recommendations(&insights);
        insights.summary = self.recommendations.summary(&insights);

        info!(
            columns = insights.column_count,
            key_columns = insights.key_columns.len(),
            domain = %insights.domain_type,
            health = insights.business_health.score,
            confidence = insights.confidence_level,
            "aggregated dataset insights"
        );

        insights
    }

    fn analyze_column(&self, column: &Column, matrix: &CorrelationMatrix) -> ColumnStatistics {
        let numbers = column.numeric_values();

        let dropped = column
            .values
            .iter()
            .zip(&numbers)
            .filter(|(cell, n)| n.is_none() && !cell.is_null())
            .count();
        if dropped > 0 {
            warn!(
                column = %column.name,
                dropped,
                "ignoring non-numeric cells in numeric column"
            );
        }

        let trend = self.trend.analyze_column(column);
        let health = self
            .health
            .score(&column.name, &trend, &matrix.correlations_for(&column.name));

        let valid: Vec<f64> = numbers.iter().flatten().copied().collect();
        let (min, max) = stats::min_max(&valid);

        ColumnStatistics {
            name: column.name.clone(),
            trend,
            criticality: health.criticality,
            health_score: health.health_score,
            risk_level: health.risk_level,
            impact_area: health.impact_area,
            valid_count: valid.len(),
            total_count: column.len(),
            mean: finite_or_zero(stats::mean(&valid)),
            std_dev: finite_or_zero(stats::standard_deviation(&valid)),
            min,
            max,
        }
    }
}

/// Average the valid column trends; direction and pattern by vote.
pub fn overall_trend(columns: &[ColumnStatistics]) -> TrendAnalysis {
    let trends: Vec<&TrendAnalysis> = columns
        .iter()
        .map(|c| &c.trend)
        .filter(|t| t.is_valid())
        .collect();

    if trends.is_empty() {
        return TrendAnalysis::insufficient();
    }

    let avg = |f: fn(&TrendAnalysis) -> f64| -> f64 {
        finite_or_zero(trends.iter().map(|t| f(t)).sum::<f64>() / trends.len() as f64)
    };

    TrendAnalysis {
        direction: mode(trends.iter().map(|t| t.direction))
            .unwrap_or(TrendDirection::InsufficientData),
        slope: avg(|t| t.slope),
        confidence: avg(|t| t.confidence),
        correlation: avg(|t| t.correlation),
        seasonality: trends.iter().any(|t| t.seasonality),
        change_rate: avg(|t| t.change_rate),
        volatility: avg(|t| t.volatility),
        outliers: Vec::new(),
        pattern: mode(trends.iter().map(|t| t.pattern)).unwrap_or(TrendPattern::Irregular),
    }
}

/// Most frequent item; ties go to the item seen first.
fn mode<T: std::hash::Hash + Eq + Copy>(items: impl Iterator<Item = T>) -> Option<T> {
    let mut counts: IndexMap<T, usize> = IndexMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }

    let mut best: Option<(T, usize)> = None;
    for (item, count) in counts {
        if best.is_none_or(|(_, c)| count > c) {
            best = Some((item, count));
        }
    }
    best.map(|(item, _)| item)
}

/// Health score, critical issues and opportunities.
///
/// Recommendations are filled in afterwards from the finished insights.
pub fn business_health(columns: &[ColumnStatistics]) -> BusinessHealth {
    let score = if columns.is_empty() {
        0.0
    } else {
        columns.iter().map(|c| c.health_score).sum::<f64>() / columns.len() as f64
    };

    let critical_issues = columns
        .iter()
        .filter(|c| c.risk_level == RiskLevel::Critical)
        .map(|c| {
            format!(
                "{}: {} trend with health score {:.0}%",
                c.name,
                c.trend.direction,
                c.health_score * 100.0
            )
        })
        .collect();

    let opportunities = columns
        .iter()
        .filter(|c| {
            c.trend.direction == TrendDirection::Increasing && c.criticality == Criticality::High
        })
        .map(|c| {
            format!(
                "{}: increasing trend ({:+.1}%) in a high-criticality metric",
                c.name, c.trend.change_rate
            )
        })
        .collect();

    BusinessHealth {
        score,
        critical_issues,
        opportunities,
        recommendations: Vec::new(),
    }
}

/// Completeness across all cells plus the derived proxies.
///
/// Timeliness is the share of non-null date cells that parse as dates;
/// without date columns it mirrors completeness.
pub fn data_quality(columns: &[Column]) -> DataQuality {
    let total: usize = columns.iter().map(Column::len).sum();
    if total == 0 {
        return DataQuality::default();
    }

    let filled: usize = columns.iter().map(Column::non_null_count).sum();
    let completeness = filled as f64 / total as f64;

    let mut date_cells = 0usize;
    let mut parsed_dates = 0usize;
    for column in columns.iter().filter(|c| c.kind == ColumnKind::Date) {
        for cell in column.values.iter().filter(|v| !v.is_null()) {
            date_cells += 1;
            let parsed = match cell {
                CellValue::Text(s) => parse_date(s).is_some(),
                // Epoch or spreadsheet serial numbers.
                CellValue::Number(_) => true,
                _ => false,
            };
            if parsed {
                parsed_dates += 1;
            }
        }
    }
    let timeliness = if date_cells == 0 {
        completeness
    } else {
        parsed_dates as f64 / date_cells as f64
    };

    DataQuality {
        completeness,
        consistency: completeness * 0.9,
        accuracy: completeness * 0.95,
        timeliness,
    }
}

/// Mean of trend confidence, core data quality and column coverage.
pub fn confidence_level(
    columns: &[ColumnStatistics],
    quality: &DataQuality,
    column_count: usize,
) -> f64 {
    if column_count == 0 {
        return 0.0;
    }
    let trend_confidence = if columns.is_empty() {
        0.0
    } else {
        columns.iter().map(|c| c.trend.confidence).sum::<f64>() / columns.len() as f64
    };
    let coverage = (column_count as f64 / FULL_COLUMN_COVERAGE).min(1.0);

    finite_or_zero((trend_confidence + quality.core_score() + coverage) / 3.0).clamp(0.0, 1.0)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}
