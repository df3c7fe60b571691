//! Rule-based recommendation and summary generation.
//!
//! Every rule looks at one kind of finding in the computed insights and
//! emits a prioritized sentence framed for the detected domain. No LLM is
//! involved; narrative collaborators can use the output as-is or as seed
//! material.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::insight::{Criticality, DatasetInsights, RiskLevel, TrendDirection};

/// Thresholds for recommendation rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Maximum number of recommendations returned.
    pub max_recommendations: usize,
    /// |r| above this is a relationship worth calling out.
    pub strong_correlation: f64,
    /// Completeness below this triggers a data-collection recommendation.
    pub low_completeness: f64,
    /// Outlier share of valid values above this triggers a review.
    pub outlier_share: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            max_recommendations: 8,
            strong_correlation: 0.7,
            low_completeness: 0.9,
            outlier_share: 0.1,
        }
    }
}

/// A recommendation before it is flattened to text.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Lower is more urgent.
    pub priority: u8,
    /// Column the recommendation is about, if any.
    pub column: Option<String>,
    pub text: String,
}

impl Recommendation {
    fn new(priority: u8, column: Option<&str>, text: String) -> Self {
        Self {
            priority,
            column: column.map(str::to_string),
            text,
        }
    }
}

/// Generates recommendations and summary sentences from insights.
#[derive(Debug, Clone, Default)]
pub struct RecommendationEngine {
    config: RecommendationConfig,
}

impl RecommendationEngine {
    /// Create an engine with default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine with custom thresholds.
    pub fn with_config(config: RecommendationConfig) -> Self {
        Self { config }
    }

    /// All triggered recommendations, most urgent first.
    pub fn generate(&self, insights: &DatasetInsights) -> Vec<Recommendation> {
        let focus = insights.domain_type.focus();
        let mut recommendations = Vec::new();

        for column in &insights.key_columns {
            let trend = &column.trend;

            if column.risk_level == RiskLevel::Critical {
                let text = if trend.direction == TrendDirection::Decreasing {
                    format!(
                        "Investigate the decline in '{}' ({:.1}% change) to protect {}.",
                        column.name, trend.change_rate, focus
                    )
                } else {
                    format!(
                        "Review '{}': a health score of {:.0}% signals risk to {}.",
                        column.name,
                        column.health_score * 100.0,
                        focus
                    )
                };
                recommendations.push(Recommendation::new(1, Some(&column.name), text));
            }

            if trend.direction == TrendDirection::Volatile {
                recommendations.push(Recommendation::new(
                    2,
                    Some(&column.name),
                    format!(
                        "Stabilize '{}': average swings of {:.2} between periods make it hard to forecast.",
                        column.name, trend.volatility
                    ),
                ));
            }

            if column.valid_count > 0
                && trend.outliers.len() as f64 > self.config.outlier_share * column.valid_count as f64
            {
                recommendations.push(Recommendation::new(
                    3,
                    Some(&column.name),
                    format!(
                        "Review {} anomalous value(s) in '{}' before relying on its trend.",
                        trend.outliers.len(),
                        column.name
                    ),
                ));
            }

            if trend.direction == TrendDirection::Increasing
                && column.criticality == Criticality::High
            {
                recommendations.push(Recommendation::new(
                    4,
                    Some(&column.name),
                    format!(
                        "Build on the growth in '{}' ({:+.1}%) to strengthen {}.",
                        column.name, trend.change_rate, focus
                    ),
                ));
            }

            if trend.seasonality {
                recommendations.push(Recommendation::new(
                    5,
                    Some(&column.name),
                    format!(
                        "Plan for seasonal cycles in '{}' when setting targets.",
                        column.name
                    ),
                ));
            }
        }

        for (a, b, r) in insights
            .correlation_matrix
            .strong_pairs(self.config.strong_correlation)
        {
            let kind = if r > 0.0 { "positive" } else { "inverse" };
            recommendations.push(Recommendation::new(
                4,
                None,
                format!(
                    "Use the strong {} relationship between '{}' and '{}' (r = {:.2}) when planning {}.",
                    kind, a, b, r, focus
                ),
            ));
        }

        let completeness = insights.data_quality.completeness;
        if insights.column_count > 0 && completeness < self.config.low_completeness {
            recommendations.push(Recommendation::new(
                2,
                None,
                format!(
                    "Improve data collection: only {:.0}% of cells are filled.",
                    completeness * 100.0
                ),
            ));
        }

        if recommendations.is_empty() {
            recommendations.push(Recommendation::new(
                9,
                None,
                format!(
                    "Continue monitoring {}; no significant risks detected.",
                    focus
                ),
            ));
        }

        // Stable sort keeps column order within a priority.
        recommendations.sort_by_key(|r| r.priority);
        recommendations
    }

    /// Recommendation sentences, deduplicated and capped.
    pub fn recommendations(&self, insights: &DatasetInsights) -> Vec<String> {
        let unique: IndexSet<String> = self
            .generate(insights)
            .into_iter()
            .map(|r| r.text)
            .collect();
        unique
            .into_iter()
            .take(self.config.max_recommendations)
            .collect()
    }

    /// Plain-language summary of the insights.
    pub fn summary(&self, insights: &DatasetInsights) -> Vec<String> {
        let mut lines = Vec::new();

        lines.push(format!(
            "Analyzed {} numeric column(s) out of {} across {} row(s); the data looks like a {} dataset.",
            insights.key_columns.len(),
            insights.column_count,
            insights.row_count,
            insights.domain_type
        ));

        let overall = &insights.overall_trend;
        if overall.is_valid() {
            lines.push(format!(
                "The overall trend is {} ({}) with {:.0}% confidence.",
                overall.direction,
                overall.pattern,
                overall.confidence * 100.0
            ));
        } else {
            lines.push("There is not enough numeric data to establish an overall trend.".to_string());
        }

        let health = &insights.business_health;
        lines.push(format!(
            "Business health is {:.0}% with {} critical issue(s) and {} opportunity(ies).",
            health.score * 100.0,
            health.critical_issues.len(),
            health.opportunities.len()
        ));

        lines.push(format!(
            "Data completeness is {:.0}%.",
            insights.data_quality.completeness * 100.0
        ));

        let strongest = insights
            .correlation_matrix
            .strong_pairs(self.config.strong_correlation)
            .into_iter()
            .max_by(|x, y| x.2.abs().total_cmp(&y.2.abs()));
        if let Some((a, b, r)) = strongest {
            lines.push(format!(
                "The strongest relationship is between '{}' and '{}' (r = {:.2}).",
                a, b, r
            ));
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::{
        ColumnStatistics, CorrelationMatrix, DataQuality, Domain, TrendAnalysis, TrendPattern,
    };

    fn column(name: &str, direction: TrendDirection, risk: RiskLevel) -> ColumnStatistics {
        ColumnStatistics {
            name: name.to_string(),
            trend: TrendAnalysis {
                direction,
                slope: 1.0,
                confidence: 0.8,
                correlation: 0.9,
                seasonality: false,
                change_rate: 25.0,
                volatility: 1.0,
                outliers: Vec::new(),
                pattern: TrendPattern::Linear,
            },
            criticality: Criticality::High,
            health_score: 0.8,
            risk_level: risk,
            impact_area: vec!["Revenue".to_string()],
            valid_count: 12,
            total_count: 12,
            mean: 10.0,
            std_dev: 1.0,
            min: 1.0,
            max: 20.0,
        }
    }

    fn insights(columns: Vec<ColumnStatistics>) -> DatasetInsights {
        let mut insights = DatasetInsights::empty();
        insights.column_count = columns.len();
        insights.row_count = 12;
        insights.key_columns = columns;
        insights.domain_type = Domain::Sales;
        insights.data_quality = DataQuality {
            completeness: 1.0,
            consistency: 0.9,
            accuracy: 0.95,
            timeliness: 1.0,
        };
        insights
    }

    #[test]
    fn test_critical_first() {
        let data = insights(vec![
            column("revenue", TrendDirection::Increasing, RiskLevel::Good),
            column("profit", TrendDirection::Decreasing, RiskLevel::Critical),
        ]);
        let recs = RecommendationEngine::new().generate(&data);

        assert_eq!(recs[0].column.as_deref(), Some("profit"));
        assert!(recs[0].text.contains("decline"));
        assert!(recs[0].text.contains("sales performance"));
        assert!(recs.iter().any(|r| r.text.contains("growth in 'revenue'")));
    }

    #[test]
    fn test_outlier_share() {
        let mut units = column("units", TrendDirection::Stable, RiskLevel::Good);
        units.trend.outliers = vec![2, 7];
        let recs = RecommendationEngine::new().generate(&insights(vec![units.clone()]));
        let rec = recs
            .iter()
            .find(|r| r.text.contains("anomalous"))
            .expect("outlier recommendation");
        assert_eq!(rec.priority, 3);
        assert!(rec.text.starts_with("Review 2 anomalous value(s) in 'units'"));

        // One outlier in twelve values stays under the 10% share.
        units.trend.outliers = vec![2];
        let recs = RecommendationEngine::new().generate(&insights(vec![units]));
        assert!(!recs.iter().any(|r| r.text.contains("anomalous")));
    }

    #[test]
    fn test_seasonal_column() {
        let mut units = column("units", TrendDirection::Stable, RiskLevel::Good);
        units.trend.seasonality = true;
        units.trend.pattern = TrendPattern::Cyclical;
        let recs = RecommendationEngine::new().generate(&insights(vec![units]));

        let rec = recs
            .iter()
            .find(|r| r.text.contains("seasonal cycles"))
            .expect("seasonality recommendation");
        assert_eq!(rec.priority, 5);
        assert_eq!(rec.column.as_deref(), Some("units"));
    }

    #[test]
    fn test_growth_text_keeps_sign() {
        let mut revenue = column("revenue", TrendDirection::Increasing, RiskLevel::Good);
        revenue.trend.change_rate = -12.0;
        let recs = RecommendationEngine::new().recommendations(&insights(vec![revenue]));
        assert!(recs.iter().any(|r| r.contains("'revenue' (-12.0%)")));
    }

    #[test]
    fn test_low_completeness() {
        let mut data = insights(vec![column("units", TrendDirection::Stable, RiskLevel::Good)]);
        data.data_quality.completeness = 0.5;
        let recs = RecommendationEngine::new().recommendations(&data);
        assert!(recs.iter().any(|r| r.contains("50% of cells")));
    }

    #[test]
    fn test_strong_pairs() {
        let mut data = insights(vec![]);
        data.correlation_matrix =
            CorrelationMatrix::from_square(&["a", "b"], &[vec![1.0, -0.9], vec![-0.9, 1.0]]);
        let recs = RecommendationEngine::new().recommendations(&data);
        assert!(recs.iter().any(|r| r.contains("inverse relationship between 'a' and 'b'")));
    }

    #[test]
    fn test_fallback_recommendation() {
        let data = insights(vec![column("units", TrendDirection::Stable, RiskLevel::Good)]);
        let recs = RecommendationEngine::new().recommendations(&data);
        assert_eq!(recs.len(), 1);
        assert!(recs[0].starts_with("Continue monitoring"));
    }

    #[test]
    fn test_cap() {
        let columns = (0..20)
            .map(|i| column(&format!("c{}", i), TrendDirection::Decreasing, RiskLevel::Critical))
            .collect();
        let engine = RecommendationEngine::with_config(RecommendationConfig {
            max_recommendations: 3,
            ..RecommendationConfig::default()
        });
        assert_eq!(engine.recommendations(&insights(columns)).len(), 3);
    }

    #[test]
    fn test_summary_empty_dataset() {
        let lines = RecommendationEngine::new().summary(&DatasetInsights::empty());
        assert!(lines.iter().any(|l| l.contains("not enough numeric data")));
    }
}
