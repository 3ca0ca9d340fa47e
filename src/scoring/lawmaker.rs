//! Lawmaker score calculation.
//!
//! A raw score is a weighted linear combination of the extracted metrics.
//! Normalization then rescales every raw score against the population
//! maximum, so the best lawmaker lands on exactly 100.

use crate::config::WeightConfiguration;
use crate::core::numeric::{ratio_or_zero, round2};
use crate::core::{LawmakerMetrics, LawmakerPerformance, ScoreContributions};
use crate::extraction::{CommitteeRole, Population, PopulationMember, PopulationTotals};
use crate::observability::{set_phase, RunPhase};

/// Scores individual lawmakers against one population's totals.
pub struct LawmakerScorer<'a> {
    weights: &'a WeightConfiguration,
    totals: PopulationTotals,
}

impl<'a> LawmakerScorer<'a> {
    pub fn new(weights: &'a WeightConfiguration, totals: PopulationTotals) -> Self {
        Self { weights, totals }
    }

    /// Score one lawmaker. `total_score` stays 0.0 until the population is normalized.
    pub fn score(&self, member: &PopulationMember) -> LawmakerPerformance {
        let metrics = &member.metrics;
        let w = self.weights;

        let bill_pass_ratio = ratio_or_zero(
            metrics.bill_pass_count as f64,
            self.totals.total_bills as f64,
        );
        let petition_ratio = ratio_or_zero(
            metrics.petition_proposed_count as f64,
            self.totals.total_petitions as f64,
        );
        let petition_pass_ratio = ratio_or_zero(
            metrics.petition_passed_count as f64,
            self.totals.total_passed_petitions as f64,
        );

        let leader_points = metrics.committee_leader_count * CommitteeRole::Leader.points();
        let secretary_points =
            metrics.committee_secretary_count * CommitteeRole::Secretary.points();
        let committee_score = (leader_points + secretary_points) as f64;
        let adjusted_invalid = adjusted_invalid_score(metrics, w.max_invalid_vote_score);

        let contributions = ScoreContributions {
            attendance: metrics.attendance_rate * (w.attendance_weight / 100.0),
            bill_pass: bill_pass_ratio * w.bill_passed_weight,
            petition: petition_ratio * w.petition_proposed_weight,
            petition_result: petition_pass_ratio * w.petition_result_weight,
            committee: committee_score * (w.committee_weight / 100.0),
            invalid_vote: adjusted_invalid * (w.adjusted_invalid_vote_weight / 100.0),
            vote_match: metrics.vote_match_ratio * (w.vote_match_weight / 100.0),
        };

        LawmakerPerformance {
            lawmaker_id: member.lawmaker_id.clone(),
            name: member.name.clone(),
            party: member.party.clone(),
            currently_serving: member.currently_serving,
            raw_score: contributions.total(),
            total_score: 0.0,
            attendance_score: metrics.attendance_rate,
            bill_pass_count: metrics.bill_pass_count,
            bill_pass_ratio,
            petition_count: metrics.petition_proposed_count,
            petition_ratio,
            petition_pass_count: metrics.petition_passed_count,
            petition_pass_ratio,
            committee_leader_count: metrics.committee_leader_count,
            committee_secretary_count: metrics.committee_secretary_count,
            committee_leader_score: leader_points as f64,
            committee_secretary_score: secretary_points as f64,
            committee_score,
            invalid_vote_ratio: metrics.invalid_or_abstain_ratio,
            adjusted_invalid_score: adjusted_invalid,
            vote_match_ratio: metrics.vote_match_ratio,
            vote_mismatch_ratio: metrics.vote_mismatch_ratio(),
            contributions,
        }
    }
}

/// Abstention-adjusted vote score: `max × (1 − invalid_ratio/100)`, rounded to 2 decimals.
///
/// Lawmakers with no votes on record get 0.0 rather than the full ceiling.
pub fn adjusted_invalid_score(metrics: &LawmakerMetrics, max_score: f64) -> f64 {
    if !metrics.has_votes() {
        return 0.0;
    }
    round2(max_score * (1.0 - metrics.invalid_or_abstain_ratio / 100.0))
}

/// Rescale raw scores to 0-100 against the population maximum.
///
/// Empty input is a no-op. When no raw score is positive every total is 0.0;
/// negative raw scores (possible with negative weights) clamp to 0.0.
pub fn normalize_scores(records: &mut [LawmakerPerformance]) {
    if records.is_empty() {
        return;
    }

    let max_raw = records
        .iter()
        .map(|r| r.raw_score)
        .fold(f64::NEG_INFINITY, f64::max);

    for record in records.iter_mut() {
        record.total_score = if max_raw > 0.0 && max_raw.is_finite() {
            round2(record.raw_score / max_raw * 100.0).clamp(0.0, 100.0)
        } else {
            0.0
        };
    }
}

/// Score and normalize a whole population in one pure pass.
pub fn score_lawmakers(
    population: &Population,
    weights: &WeightConfiguration,
) -> Vec<LawmakerPerformance> {
    let scorer = LawmakerScorer::new(weights, population.totals);
    let mut records: Vec<LawmakerPerformance> =
        population.members.iter().map(|m| scorer.score(m)).collect();

    let _phase = set_phase(RunPhase::Normalization);
    normalize_scores(&mut records);
    records
}
