//! Trendscope: statistical trend analysis and business-health scoring for
//! tabular datasets.
//!
//! Trendscope looks at each numeric column of a dataset as an ordered
//! series and reports how it is moving, how healthy it looks and how it
//! relates to the other columns, then rolls everything up into one
//! dataset-level verdict.
//!
//! # Core Principles
//!
//! - **Deterministic**: Same input, same insights. No sampling, no clocks
//!   inside the analysis.
//! - **Infallible core**: Degenerate data yields sentinels and zeros, never
//!   NaN or a panic. Errors only come from the input boundary.
//! - **Rule-based**: Recommendations are derived from the computed
//!   numbers, framed for the detected business domain.
//!
//! # Example
//!
//! ```no_run
//! use trendscope::Trendscope;
//!
//! let engine = Trendscope::new();
//! let report = engine.analyze_file("monthly_sales.csv").unwrap();
//!
//! println!("Domain: {}", report.insights.domain_type);
//! println!("Health: {:.0}%", report.insights.business_health.score * 100.0);
//! ```

pub mod analysis;
pub mod error;
pub mod input;
pub mod insight;
pub mod recommendation;
pub mod schema;
pub mod stats;

mod engine;

pub use analysis::{DomainClassifier, DomainScorer, InsightAggregator, TrendAnalyzer, detect_domain};
pub use engine::{AnalysisReport, EngineConfig, Trendscope};
pub use error::{Result, TrendscopeError};
pub use input::{Parser, SourceMetadata};
pub use insight::{
    ColumnStatistics, CorrelationMatrix, DatasetInsights, Domain, RiskLevel, TrendAnalysis,
    TrendDirection, TrendPattern,
};
pub use schema::{CellValue, Column, ColumnKind, DatasetInput};
