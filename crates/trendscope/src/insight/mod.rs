//! Analysis output types, serializable for dashboards and narrative
//! generation.

mod column;
mod dataset;
mod trend;

pub use column::{ColumnHealth, ColumnStatistics, Criticality, RiskLevel};
pub use dataset::{BusinessHealth, CorrelationMatrix, DataQuality, DatasetInsights, Domain};
pub use trend::{TrendAnalysis, TrendDirection, TrendPattern};
