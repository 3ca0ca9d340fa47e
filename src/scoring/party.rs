//! Party aggregation.
//!
//! Member records are summed per party, each summed metric is compressed
//! with `ln(sum + 1)` and weighted, and the weighted total is halved (by
//! default) for caucuses below the small-caucus threshold. Only currently
//! serving lawmakers count towards a party; parties without members produce
//! no record at all.

use super::contribution::contribution_percentages;
use crate::config::WeightConfiguration;
use crate::core::numeric::{ratio_or_zero, round2};
use crate::core::{ContributionBreakdown, LawmakerPerformance, MetricSpread, PartyPerformance};
use crate::extraction::CommitteeHeadcount;
use std::collections::BTreeMap;

/// Per-party sums of member sub-scores.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PartySums {
    pub attendance: f64,
    pub bill_pass: f64,
    pub petition: f64,
    pub petition_result: f64,
    pub committee_leader: f64,
    pub committee_secretary: f64,
    pub vote_match: f64,
    pub vote_mismatch: f64,
    pub invalid_ratio: f64,
    pub max_invalid_ratio: f64,
}

impl PartySums {
    pub fn from_members(members: &[&LawmakerPerformance]) -> Self {
        members.iter().fold(Self::default(), |mut acc, m| {
            acc.attendance += m.attendance_score;
            acc.bill_pass += m.bill_pass_count as f64;
            acc.petition += m.petition_count as f64;
            acc.petition_result += m.petition_pass_count as f64;
            acc.committee_leader += m.committee_leader_score;
            acc.committee_secretary += m.committee_secretary_score;
            acc.vote_match += m.vote_match_ratio;
            acc.vote_mismatch += m.vote_mismatch_ratio;
            acc.invalid_ratio += m.invalid_vote_ratio;
            acc.max_invalid_ratio = acc.max_invalid_ratio.max(m.invalid_vote_ratio);
            acc
        })
    }
}

/// `max(0, 1 − Σ invalid / (members × max invalid))`; a zero maximum is treated as 1.0.
pub fn normalized_invalid(sum_invalid: f64, member_count: usize, max_invalid: f64) -> f64 {
    let max_invalid = if max_invalid == 0.0 { 1.0 } else { max_invalid };
    (1.0 - ratio_or_zero(sum_invalid, member_count as f64 * max_invalid)).max(0.0)
}

/// `ln(value + 1) × weight/100`
pub fn dampen(value: f64, weight: f64) -> f64 {
    (value + 1.0).ln() * (weight / 100.0)
}

/// The nine log-dampened party scores, in contribution order.
pub fn dampened_scores(
    sums: &PartySums,
    member_count: usize,
    weights: &WeightConfiguration,
) -> [f64; 9] {
    let invalid = normalized_invalid(sums.invalid_ratio, member_count, sums.max_invalid_ratio);
    [
        dampen(sums.attendance, weights.attendance_weight),
        dampen(sums.bill_pass, weights.bill_passed_weight),
        dampen(sums.petition, weights.petition_proposed_weight),
        dampen(sums.petition_result, weights.petition_result_weight),
        dampen(sums.committee_leader, weights.committee_weight),
        dampen(sums.committee_secretary, weights.committee_weight),
        dampen(sums.vote_match, weights.vote_match_weight),
        dampen(sums.vote_mismatch, weights.vote_mismatch_weight),
        dampen(invalid, weights.adjusted_invalid_vote_weight),
    ]
}

fn rounded_spread(values: &[f64]) -> MetricSpread {
    let spread = MetricSpread::from_values(values);
    MetricSpread {
        mean: round2(spread.mean),
        max: round2(spread.max),
        min: round2(spread.min),
        std_dev: round2(spread.std_dev),
    }
}

/// Aggregate one party. Returns `None` for an empty member list.
///
/// Contribution shares divide by the pre-penalty score, not by the penalized
/// `weighted_score`, so a penalized party still sums to exactly 100.00.
pub fn aggregate_party(
    party: &str,
    members: &[&LawmakerPerformance],
    headcount: CommitteeHeadcount,
    weights: &WeightConfiguration,
) -> Option<PartyPerformance> {
    let member_count = members.len();
    if member_count == 0 {
        return None;
    }

    let sums = PartySums::from_members(members);
    let scores = dampened_scores(&sums, member_count, weights);

    let unpenalized = round2(scores.iter().sum::<f64>());
    let penalty_factor = weights.penalty_factor(member_count);
    let weighted_score = round2(unpenalized * penalty_factor);

    // Shares are taken before the penalty; the penalty scales every term alike
    let contributions = ContributionBreakdown::from_array(contribution_percentages(
        scores,
        unpenalized,
    ));

    let collect = |f: fn(&LawmakerPerformance) -> f64| -> Vec<f64> {
        members.iter().map(|m| f(m)).collect()
    };
    let avg_total_score = round2(
        members.iter().map(|m| m.total_score).sum::<f64>() / member_count as f64,
    );

    Some(PartyPerformance {
        party: party.to_string(),
        member_count,
        attendance: rounded_spread(&collect(|m| m.attendance_score)),
        invalid_vote_ratio: rounded_spread(&collect(|m| m.invalid_vote_ratio)),
        vote_match_ratio: rounded_spread(&collect(|m| m.vote_match_ratio)),
        vote_mismatch_ratio: rounded_spread(&collect(|m| m.vote_mismatch_ratio)),
        bill_pass_sum: members.iter().map(|m| m.bill_pass_count).sum(),
        petition_sum: members.iter().map(|m| m.petition_count).sum(),
        petition_pass_sum: members.iter().map(|m| m.petition_pass_count).sum(),
        committee_leader_count: headcount.leaders,
        committee_secretary_count: headcount.secretaries,
        penalty_factor,
        weighted_score,
        avg_total_score,
        contributions,
    })
}

/// Aggregate every party that has at least one currently serving member.
///
/// Output is ordered by party name.
pub fn aggregate_parties(
    records: &[LawmakerPerformance],
    headcounts: &BTreeMap<String, CommitteeHeadcount>,
    weights: &WeightConfiguration,
) -> Vec<PartyPerformance> {
    let mut by_party: BTreeMap<&str, Vec<&LawmakerPerformance>> = BTreeMap::new();
    for record in records.iter().filter(|r| r.currently_serving) {
        by_party.entry(record.party.as_str()).or_default().push(record);
    }

    by_party
        .into_iter()
        .filter_map(|(party, members)| {
            let headcount = headcounts.get(party).copied().unwrap_or_default();
            aggregate_party(party, &members, headcount, weights)
        })
        .collect()
}
