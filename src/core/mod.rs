pub mod errors;
pub mod numeric;
pub mod types;

pub use errors::{Error, Result, ResultExt};
pub use types::{
    ContributionBreakdown, LawmakerId, LawmakerMetrics, LawmakerPerformance, MetricSpread,
    PartyPerformance, ScoreContributions, INDEPENDENT_PARTY,
};
