//! Performance scoring and ranking for National Assembly lawmakers and parties.
//!
//! A recompute run pulls one snapshot of upstream facts, extracts per-lawmaker
//! metrics, scores and normalizes every lawmaker, aggregates serving members
//! per party, and upserts the results into a [`store::PerformanceStore`].
//! Rankings and comparisons are computed on read by [`query::Queries`].

pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod extraction;
pub mod formatting;
pub mod observability;
pub mod pipeline;
pub mod query;
pub mod ranking;
pub mod scoring;
pub mod store;

pub use crate::config::{WeightConfiguration, WeightOverrides};
pub use crate::core::{
    ContributionBreakdown, Error, LawmakerId, LawmakerMetrics, LawmakerPerformance, MetricSpread,
    PartyPerformance, Result, ScoreContributions,
};
pub use crate::extraction::{FactSet, FactSource, JsonFactSource, MetricExtractor, Population};
pub use crate::pipeline::{compute, ComputedScores, Recompute, RunSummary};
pub use crate::query::{Comparison, Leader, Queries};
pub use crate::ranking::{rank_by, LawmakerField, PartyField, RankDirection, Ranked};
pub use crate::scoring::{aggregate_parties, contribution_percentages, normalize_scores, score_lawmakers};
pub use crate::store::{JsonFileStore, MemoryStore, PerformanceStore};
