pub mod analytics;
pub mod compatibility;

pub use analytics::{build_timeline, compute_culture_stats, AnalyticsAggregator};
pub use compatibility::{CompatibilityEngine, RuleTable};
