//! Analysis components.
//!
//! Each component handles one concern: trends per column, column health,
//! pairwise correlation, domain detection and the dataset-wide rollup that
//! ties them together.

mod aggregate;
mod correlation;
mod domain;
mod health;
mod trend;

pub use aggregate::{
    InsightAggregator, business_health, confidence_level, data_quality, overall_trend,
};
pub use correlation::{CorrelationBuilder, CorrelationConfig, build_correlation_matrix};
pub use domain::{
    COLUMN_NAME_WEIGHT, DomainClassifier, DomainScorer, FILE_NAME_WEIGHT, KeywordScorer,
    detect_domain,
};
pub use health::{HealthConfig, HealthScorer, ImpactRule, health_score, risk_level};
pub use trend::{TrendAnalyzer, TrendConfig};
