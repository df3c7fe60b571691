//! Main Trendscope struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{
    CorrelationBuilder, CorrelationConfig, DomainClassifier, HealthConfig, HealthScorer,
    InsightAggregator, TrendAnalyzer, TrendConfig,
};
use crate::error::{Result, TrendscopeError};
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::insight::{DatasetInsights, Domain, TrendAnalysis};
use crate::recommendation::{RecommendationConfig, RecommendationEngine};
use crate::schema::{Column, DatasetInput, validate_columns};

/// Thresholds for every analysis component.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub trend: TrendConfig,
    pub health: HealthConfig,
    pub correlation: CorrelationConfig,
    pub recommendation: RecommendationConfig,
}

impl EngineConfig {
    /// Load a configuration from a JSON file. Missing fields keep defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| TrendscopeError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: EngineConfig = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds the analyzers cannot work with.
    pub fn validate(&self) -> Result<()> {
        self.trend.validate()?;

        let health = &self.health;
        if !(0.0..=1.0).contains(&health.medium_correlation)
            || !(0.0..=1.0).contains(&health.high_correlation)
            || health.medium_correlation > health.high_correlation
        {
            return Err(TrendscopeError::Config(
                "health correlation thresholds must satisfy 0 <= medium <= high <= 1".to_string(),
            ));
        }

        if self.correlation.min_overlap < 2 {
            return Err(TrendscopeError::Config(
                "correlation.min_overlap must be at least 2".to_string(),
            ));
        }

        if self.recommendation.max_recommendations == 0 {
            return Err(TrendscopeError::Config(
                "recommendation.max_recommendations must be positive".to_string(),
            ));
        }

        Ok(())
    }
}

/// Insights for a file on disk together with where they came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Computed insights.
    pub insights: DatasetInsights,
}

/// The main Trendscope analysis engine.
///
/// Holds no mutable state; one instance can serve any number of analyses,
/// including from several threads at once.
#[derive(Debug)]
pub struct Trendscope {
    config: EngineConfig,
    parser: Parser,
    aggregator: InsightAggregator,
}

impl Trendscope {
    /// Create an engine with default thresholds.
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create an engine with custom thresholds.
    pub fn with_config(config: EngineConfig) -> Self {
        let aggregator = InsightAggregator::with_components(
            TrendAnalyzer::with_config(config.trend.clone()),
            HealthScorer::with_config(config.health.clone()),
            CorrelationBuilder::with_config(config.correlation.clone()),
            DomainClassifier::new(),
            RecommendationEngine::with_config(config.recommendation.clone()),
        );

        Self {
            config,
            parser: Parser::new(),
            aggregator,
        }
    }

    /// Use a custom parser configuration for file input.
    pub fn with_parser(mut self, config: ParserConfig) -> Self {
        self.parser = Parser::with_config(config);
        self
    }

    /// Use a custom domain classifier, e.g. with extra scorers registered.
    pub fn with_domain_classifier(mut self, classifier: DomainClassifier) -> Self {
        self.aggregator = self.aggregator.with_domain_classifier(classifier);
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Analyze columns without shape validation.
    pub fn analyze_columns(&self, columns: &[Column], file_name: Option<&str>) -> DatasetInsights {
        self.aggregator.aggregate(columns, file_name)
    }

    /// Validate and analyze a dataset description.
    pub fn analyze_input(&self, input: &DatasetInput) -> Result<DatasetInsights> {
        validate_columns(&input.columns)?;
        Ok(self.analyze_columns(&input.columns, input.file_name.as_deref()))
    }

    /// Parse a file and analyze it.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisReport> {
        let path = path.as_ref();
        let (input, source) = self.parser.parse_file(path)?;
        debug!(file = %source.file, hash = %source.hash, "analyzing parsed file");
        let insights = self.analyze_input(&input)?;
        Ok(AnalysisReport { source, insights })
    }

    /// Trend of a single column.
    pub fn analyze_trend(&self, column: &Column) -> TrendAnalysis {
        self.aggregator.trend_analyzer().analyze_column(column)
    }

    /// Domain of a set of column names and an optional file name.
    pub fn detect_domain(&self, column_names: &[&str], file_name: Option<&str>) -> Domain {
        self.aggregator
            .domain_classifier()
            .detect(column_names, file_name)
    }

    /// Per-domain keyword scores, in priority order.
    pub fn domain_scores(&self, column_names: &[&str], file_name: Option<&str>) -> Vec<(Domain, u32)> {
        self.aggregator
            .domain_classifier()
            .scores(column_names, file_name)
    }
}

impl Default for Trendscope {
    fn default() -> Self {
        Self::new()
    }
}
