//! Common type definitions used across the codebase

use serde::{Deserialize, Serialize};
use std::fmt;

/// Party label recorded for lawmakers that are not on the current roster
pub const INDEPENDENT_PARTY: &str = "무소속";

/// Stable identifier of a lawmaker, assigned upstream (member code).
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LawmakerId(String);

impl LawmakerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LawmakerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LawmakerId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Snapshot of one lawmaker's activity, as read from the upstream facts.
///
/// Absent upstream records produce zeros, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LawmakerMetrics {
    /// Plenary attendance rate (0-100)
    pub attendance_rate: f64,
    /// Share of votes cast as abstain or invalid (0-100)
    pub invalid_or_abstain_ratio: f64,
    /// Share of agree/oppose votes that matched the final outcome (0-100)
    pub vote_match_ratio: f64,
    /// Votes of any kind on record
    pub total_votes: u32,
    /// Agree plus oppose votes
    pub decisive_votes: u32,
    pub bill_pass_count: u32,
    pub petition_proposed_count: u32,
    pub petition_passed_count: u32,
    pub committee_leader_count: u32,
    pub committee_secretary_count: u32,
}

impl LawmakerMetrics {
    pub fn has_votes(&self) -> bool {
        self.total_votes > 0
    }

    /// Complement of the match ratio. Zero when no agree/oppose vote exists.
    pub fn vote_mismatch_ratio(&self) -> f64 {
        if self.decisive_votes == 0 {
            0.0
        } else {
            100.0 - self.vote_match_ratio
        }
    }
}

/// The weighted terms that make up a lawmaker's raw score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreContributions {
    pub attendance: f64,
    pub bill_pass: f64,
    pub petition: f64,
    pub petition_result: f64,
    pub committee: f64,
    pub invalid_vote: f64,
    pub vote_match: f64,
}

impl ScoreContributions {
    pub fn total(&self) -> f64 {
        self.attendance
            + self.bill_pass
            + self.petition
            + self.petition_result
            + self.committee
            + self.invalid_vote
            + self.vote_match
    }
}

/// One scored lawmaker. Keyed by `lawmaker_id` in the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LawmakerPerformance {
    pub lawmaker_id: LawmakerId,
    pub name: String,
    pub party: String,
    pub currently_serving: bool,

    /// Pre-normalization weighted sum
    pub raw_score: f64,
    /// Raw score rescaled against the population maximum (0-100)
    pub total_score: f64,

    pub attendance_score: f64,
    pub bill_pass_count: u32,
    pub bill_pass_ratio: f64,
    pub petition_count: u32,
    pub petition_ratio: f64,
    pub petition_pass_count: u32,
    pub petition_pass_ratio: f64,
    pub committee_leader_count: u32,
    pub committee_secretary_count: u32,
    pub committee_leader_score: f64,
    pub committee_secretary_score: f64,
    pub committee_score: f64,
    pub invalid_vote_ratio: f64,
    pub adjusted_invalid_score: f64,
    pub vote_match_ratio: f64,
    pub vote_mismatch_ratio: f64,

    pub contributions: ScoreContributions,
}

/// Mean, extremes and sample standard deviation of one metric within a party.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSpread {
    pub mean: f64,
    pub max: f64,
    pub min: f64,
    pub std_dev: f64,
}

impl MetricSpread {
    /// Spread over `values`. An empty slice yields all zeros; a single value has no deviation.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }

        let n = values.len() as f64;
        let mean = values.iter().sum::<f64>() / n;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let std_dev = if values.len() > 1 {
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
            variance.sqrt()
        } else {
            0.0
        };

        Self {
            mean,
            max,
            min,
            std_dev,
        }
    }
}

/// Percentage share of each log-dampened metric in a party's weighted score.
///
/// The stored set always sums to exactly 100.00; `invalid_vote_pct` absorbs rounding residue.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionBreakdown {
    pub attendance_pct: f64,
    pub bill_pass_pct: f64,
    pub petition_pct: f64,
    pub petition_result_pct: f64,
    pub committee_leader_pct: f64,
    pub committee_secretary_pct: f64,
    pub vote_match_pct: f64,
    pub vote_mismatch_pct: f64,
    pub invalid_vote_pct: f64,
}

impl ContributionBreakdown {
    pub fn from_array(pct: [f64; 9]) -> Self {
        Self {
            attendance_pct: pct[0],
            bill_pass_pct: pct[1],
            petition_pct: pct[2],
            petition_result_pct: pct[3],
            committee_leader_pct: pct[4],
            committee_secretary_pct: pct[5],
            vote_match_pct: pct[6],
            vote_mismatch_pct: pct[7],
            invalid_vote_pct: pct[8],
        }
    }

    pub fn as_array(&self) -> [f64; 9] {
        [
            self.attendance_pct,
            self.bill_pass_pct,
            self.petition_pct,
            self.petition_result_pct,
            self.committee_leader_pct,
            self.committee_secretary_pct,
            self.vote_match_pct,
            self.vote_mismatch_pct,
            self.invalid_vote_pct,
        ]
    }

    pub fn total(&self) -> f64 {
        self.as_array().iter().sum()
    }
}

/// One scored party. Keyed by `party` in the store; only parties with members exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyPerformance {
    pub party: String,
    pub member_count: usize,

    pub attendance: MetricSpread,
    pub invalid_vote_ratio: MetricSpread,
    pub vote_match_ratio: MetricSpread,
    pub vote_mismatch_ratio: MetricSpread,

    pub bill_pass_sum: u32,
    pub petition_sum: u32,
    pub petition_pass_sum: u32,
    pub committee_leader_count: u32,
    pub committee_secretary_count: u32,

    /// 1.0, or the configured penalty ratio for small caucuses
    pub penalty_factor: f64,
    /// Log-dampened, penalty-adjusted party score
    pub weighted_score: f64,
    /// Mean of the members' normalized total scores
    pub avg_total_score: f64,

    pub contributions: ContributionBreakdown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_spread_single_value_has_no_deviation() {
        let spread = MetricSpread::from_values(&[72.5]);
        assert_eq!(spread.mean, 72.5);
        assert_eq!(spread.max, 72.5);
        assert_eq!(spread.min, 72.5);
        assert_eq!(spread.std_dev, 0.0);
    }

    #[test]
    fn test_metric_spread_uses_sample_deviation() {
        let spread = MetricSpread::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert_eq!(spread.mean, 5.0);
        assert_eq!(spread.max, 9.0);
        assert_eq!(spread.min, 2.0);
        assert!((spread.std_dev - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_metric_spread_empty() {
        assert_eq!(MetricSpread::from_values(&[]), MetricSpread::default());
    }

    #[test]
    fn test_mismatch_is_zero_without_decisive_votes() {
        let metrics = LawmakerMetrics {
            total_votes: 4,
            decisive_votes: 0,
            ..Default::default()
        };
        assert_eq!(metrics.vote_mismatch_ratio(), 0.0);
    }

    #[test]
    fn test_mismatch_complements_match_ratio() {
        let metrics = LawmakerMetrics {
            vote_match_ratio: 62.5,
            total_votes: 10,
            decisive_votes: 8,
            ..Default::default()
        };
        assert_eq!(metrics.vote_mismatch_ratio(), 37.5);
    }

    #[test]
    fn test_lawmaker_id_serializes_transparently() {
        let id = LawmakerId::new("M0042");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"M0042\"");
    }
}
