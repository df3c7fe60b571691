//! Recommendations and summary text derived from computed insights.

mod generator;

pub use generator::{Recommendation, RecommendationConfig, RecommendationEngine};
