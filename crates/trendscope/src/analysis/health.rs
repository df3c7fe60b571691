//! Column health scoring from trend results and name heuristics.

use serde::{Deserialize, Serialize};

use crate::insight::{ColumnHealth, Criticality, RiskLevel, TrendAnalysis, TrendDirection};

/// Name keywords that tag a column with a business area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactRule {
    /// Tag reported in `impact_area`.
    pub area: String,
    /// Lowercase substrings that trigger the tag.
    pub keywords: Vec<String>,
}

impl ImpactRule {
    fn new(area: &str, keywords: &[&str]) -> Self {
        Self {
            area: area.to_string(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Thresholds and keyword sets for the health scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Name substrings that make a column high criticality outright.
    pub critical_keywords: Vec<String>,
    /// Max |r| with another column above this is high criticality.
    pub high_correlation: f64,
    /// Max |r| above this is medium criticality.
    pub medium_correlation: f64,
    /// Impact-area tagging rules, applied in order.
    pub impact_rules: Vec<ImpactRule>,
    /// Tag used when no rule matches.
    pub default_impact_area: String,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            critical_keywords: ["revenue", "profit", "sales", "cost", "customer", "user"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            high_correlation: 0.7,
            medium_correlation: 0.4,
            impact_rules: vec![
                ImpactRule::new("Revenue", &["revenue", "sales", "income", "price", "order"]),
                ImpactRule::new("Cost Management", &["cost", "expense", "spend", "budget"]),
                ImpactRule::new(
                    "Customer Success",
                    &["customer", "user", "client", "satisfaction", "churn", "retention"],
                ),
                ImpactRule::new(
                    "Operations",
                    &["inventory", "production", "supply", "shipment", "operation", "efficiency"],
                ),
                ImpactRule::new(
                    "Human Resources",
                    &["employee", "staff", "salary", "headcount", "hire"],
                ),
            ],
            default_impact_area: "General Performance".to_string(),
        }
    }
}

/// Maps a column's trend and name onto criticality, health and risk.
#[derive(Debug, Clone, Default)]
pub struct HealthScorer {
    config: HealthConfig,
}

impl HealthScorer {
    /// Create a scorer with default keyword sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scorer with custom configuration.
    pub fn with_config(config: HealthConfig) -> Self {
        Self { config }
    }

    /// Score one column.
    ///
    /// `correlations` are the column's Pearson coefficients with every
    /// other column (self excluded).
    pub fn score(&self, name: &str, trend: &TrendAnalysis, correlations: &[f64]) -> ColumnHealth {
        let criticality = self.criticality(name, correlations);
        let health_score = health_score(trend);
        let risk_level = risk_level(health_score, trend.direction);
        let impact_area = self.impact_area(name);

        ColumnHealth {
            criticality,
            health_score,
            risk_level,
            impact_area,
        }
    }

    /// Criticality from name keywords, then from correlation strength.
    pub fn criticality(&self, name: &str, correlations: &[f64]) -> Criticality {
        let lower = name.to_lowercase();
        if self
            .config
            .critical_keywords
            .iter()
            .any(|k| lower.contains(k.as_str()))
        {
            return Criticality::High;
        }

        let max_abs = correlations
            .iter()
            .filter(|r| r.is_finite())
            .fold(0.0_f64, |acc, r| acc.max(r.abs()));

        if max_abs > self.config.high_correlation {
            Criticality::High
        } else if max_abs > self.config.medium_correlation {
            Criticality::Medium
        } else {
            Criticality::Low
        }
    }

    /// Business-area tags for a column name.
    pub fn impact_area(&self, name: &str) -> Vec<String> {
        let lower = name.to_lowercase();
        let areas: Vec<String> = self
            .config
            .impact_rules
            .iter()
            .filter(|rule| rule.keywords.iter().any(|k| lower.contains(k.as_str())))
            .map(|rule| rule.area.clone())
            .collect();

        if areas.is_empty() {
            vec![self.config.default_impact_area.clone()]
        } else {
            areas
        }
    }
}

/// Health score in `[0, 1]`.
///
/// Starts at 0.5, moves with the direction, rewards confidence and
/// penalizes volatility (capped at 0.2).
pub fn health_score(trend: &TrendAnalysis) -> f64 {
    let mut score = 0.5;
    score += match trend.direction {
        TrendDirection::Increasing => 0.3,
        TrendDirection::Stable => 0.1,
        TrendDirection::Decreasing => -0.3,
        TrendDirection::Volatile => -0.2,
        TrendDirection::InsufficientData => 0.0,
    };
    score += trend.confidence * 0.2;
    score -= (trend.volatility / 100.0).min(0.2);

    if score.is_finite() { score.clamp(0.0, 1.0) } else { 0.0 }
}

/// Risk level from health score and direction.
pub fn risk_level(health_score: f64, direction: TrendDirection) -> RiskLevel {
    if health_score < 0.3 || direction == TrendDirection::Decreasing {
        RiskLevel::Critical
    } else if health_score < 0.6 || direction == TrendDirection::Volatile {
        RiskLevel::Warning
    } else {
        RiskLevel::Good
    }
}
