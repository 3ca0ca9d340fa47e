//! Per-lawmaker metric extraction.
//!
//! `MetricExtractor` indexes a validated `FactSet` once and then answers
//! `metrics_for` lookups as pure reads. Missing records resolve to zero:
//! a lawmaker with no attendance row has an attendance rate of 0.0, no vote
//! summary means both vote ratios are 0.0, and so on.
//!
//! # Usage
//!
//! ```rust
//! use assemblyscore::extraction::{FactSet, LawmakerRecord, MetricExtractor};
//! use assemblyscore::core::LawmakerId;
//!
//! let facts = FactSet {
//!     lawmakers: vec![LawmakerRecord { id: LawmakerId::new("M1"), name: "Kim".into() }],
//!     ..Default::default()
//! };
//! let extractor = MetricExtractor::new(&facts);
//! let metrics = extractor.metrics_for(&LawmakerId::new("M1"));
//! assert_eq!(metrics.attendance_rate, 0.0);
//! ```

use super::facts::{is_passed, CommitteeRole, FactSet, VoteSummary};
use crate::core::numeric::{ratio_or_zero, round2};
use crate::core::{LawmakerId, LawmakerMetrics, INDEPENDENT_PARTY};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Population-wide denominators for the share-based metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationTotals {
    /// Distinct bills on record
    pub total_bills: u32,
    /// Distinct petitions with at least one introducing lawmaker
    pub total_petitions: u32,
    /// Distinct petitions with a passed result
    pub total_passed_petitions: u32,
}

/// One lawmaker of the population, with affiliation and extracted metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationMember {
    pub lawmaker_id: LawmakerId,
    pub name: String,
    /// Roster party, or the independent label when not serving
    pub party: String,
    pub currently_serving: bool,
    pub metrics: LawmakerMetrics,
}

/// The immutable input of one scoring run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Population {
    /// Sorted by lawmaker id
    pub members: Vec<PopulationMember>,
    pub totals: PopulationTotals,
}

impl Population {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Chair and secretary seats held by one party, counted from committee rosters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeHeadcount {
    pub leaders: u32,
    pub secretaries: u32,
}

#[derive(Debug, Clone, Copy, Default)]
struct CommitteeTally {
    leaders: u32,
    secretaries: u32,
}

pub struct MetricExtractor<'a> {
    facts: &'a FactSet,
    attendance: HashMap<&'a LawmakerId, f64>,
    votes: HashMap<&'a LawmakerId, &'a VoteSummary>,
    bills_passed: HashMap<&'a LawmakerId, u32>,
    petitions_introduced: HashMap<&'a LawmakerId, u32>,
    petitions_passed: HashMap<&'a LawmakerId, u32>,
    committee: HashMap<&'a LawmakerId, CommitteeTally>,
    roster: HashMap<&'a LawmakerId, &'a str>,
    totals: PopulationTotals,
}

impl<'a> MetricExtractor<'a> {
    /// Index `facts` for lookups. The fact set is expected to be validated.
    pub fn new(facts: &'a FactSet) -> Self {
        let attendance = facts
            .attendance
            .iter()
            .map(|a| (&a.lawmaker_id, a.attendance_rate))
            .collect();

        let votes = facts
            .vote_summaries
            .iter()
            .map(|v| (&v.lawmaker_id, v))
            .collect();

        let mut bills_passed: HashMap<&LawmakerId, u32> = HashMap::new();
        for bill in &facts.bills {
            if let Some(proposer) = &bill.main_proposer {
                if is_passed(&bill.result) {
                    *bills_passed.entry(proposer).or_default() += 1;
                }
            }
        }

        let passed_petitions: HashSet<&str> = facts
            .petitions
            .iter()
            .filter(|p| is_passed(&p.result))
            .map(|p| p.petition_id.as_str())
            .collect();

        let mut petitions_introduced: HashMap<&LawmakerId, u32> = HashMap::new();
        let mut petitions_passed: HashMap<&LawmakerId, u32> = HashMap::new();
        for introducer in &facts.petition_introducers {
            *petitions_introduced
                .entry(&introducer.lawmaker_id)
                .or_default() += 1;
            if passed_petitions.contains(introducer.petition_id.as_str()) {
                *petitions_passed.entry(&introducer.lawmaker_id).or_default() += 1;
            }
        }

        let mut committee: HashMap<&LawmakerId, CommitteeTally> = HashMap::new();
        for seat in &facts.committee_seats {
            let tally = committee.entry(&seat.lawmaker_id).or_default();
            match seat.role {
                CommitteeRole::Leader => tally.leaders += 1,
                CommitteeRole::Secretary => tally.secretaries += 1,
                CommitteeRole::Member => {}
            }
        }

        let roster = facts
            .roster
            .iter()
            .map(|r| (&r.lawmaker_id, r.party.as_str()))
            .collect();

        let totals = PopulationTotals {
            total_bills: count_distinct(facts.bills.iter().map(|b| b.bill_id.as_str())),
            total_petitions: count_distinct(
                facts
                    .petition_introducers
                    .iter()
                    .map(|i| i.petition_id.as_str()),
            ),
            total_passed_petitions: passed_petitions.len() as u32,
        };

        Self {
            facts,
            attendance,
            votes,
            bills_passed,
            petitions_introduced,
            petitions_passed,
            committee,
            roster,
            totals,
        }
    }

    pub fn totals(&self) -> PopulationTotals {
        self.totals
    }

    /// Metrics snapshot for one lawmaker. Unknown or inactive lawmakers get all zeros.
    pub fn metrics_for(&self, id: &LawmakerId) -> LawmakerMetrics {
        let attendance_rate = self.attendance.get(id).map(|r| round2(*r)).unwrap_or(0.0);
        let committee = self.committee.get(id).copied().unwrap_or_default();

        let mut metrics = LawmakerMetrics {
            attendance_rate,
            bill_pass_count: self.bills_passed.get(id).copied().unwrap_or(0),
            petition_proposed_count: self.petitions_introduced.get(id).copied().unwrap_or(0),
            petition_passed_count: self.petitions_passed.get(id).copied().unwrap_or(0),
            committee_leader_count: committee.leaders,
            committee_secretary_count: committee.secretaries,
            ..Default::default()
        };

        if let Some(summary) = self.votes.get(id) {
            let decisive = u64::from(summary.agree_count) + u64::from(summary.oppose_count);
            let matched =
                u64::from(summary.agree_and_passed) + u64::from(summary.oppose_and_failed);
            metrics.total_votes = summary.total_votes;
            metrics.decisive_votes = u32::try_from(decisive).unwrap_or(u32::MAX);
            metrics.invalid_or_abstain_ratio = round2(
                ratio_or_zero(
                    summary.invalid_or_abstain_count as f64,
                    summary.total_votes as f64,
                ) * 100.0,
            );
            metrics.vote_match_ratio = round2(
                ratio_or_zero(
                    matched as f64,
                    decisive as f64,
                ) * 100.0,
            );
        }

        metrics
    }

    /// Roster party for a serving lawmaker, `None` otherwise.
    pub fn current_party(&self, id: &LawmakerId) -> Option<&'a str> {
        self.roster.get(id).copied()
    }

    /// Extract every tracked lawmaker. Output is sorted by id for deterministic runs.
    pub fn extract_population(&self) -> Population {
        let mut members: Vec<PopulationMember> = self
            .facts
            .lawmakers
            .par_iter()
            .map(|lawmaker| {
                let party = self.current_party(&lawmaker.id);
                PopulationMember {
                    lawmaker_id: lawmaker.id.clone(),
                    name: lawmaker.name.clone(),
                    party: party.unwrap_or(INDEPENDENT_PARTY).to_string(),
                    currently_serving: party.is_some(),
                    metrics: self.metrics_for(&lawmaker.id),
                }
            })
            .collect();
        members.sort_by(|a, b| a.lawmaker_id.cmp(&b.lawmaker_id));

        Population {
            members,
            totals: self.totals,
        }
    }

    /// Chair/secretary seat counts per party, straight from the committee rosters.
    pub fn committee_headcounts(&self) -> BTreeMap<String, CommitteeHeadcount> {
        let mut headcounts: BTreeMap<String, CommitteeHeadcount> = BTreeMap::new();
        for seat in &self.facts.committee_seats {
            let entry = headcounts.entry(seat.party.clone()).or_default();
            match seat.role {
                CommitteeRole::Leader => entry.leaders += 1,
                CommitteeRole::Secretary => entry.secretaries += 1,
                CommitteeRole::Member => {}
            }
        }
        headcounts
    }
}

/// Metrics for a single lawmaker. Prefer one `MetricExtractor` when looking up many.
pub fn extract_metrics(facts: &FactSet, id: &LawmakerId) -> LawmakerMetrics {
    MetricExtractor::new(facts).metrics_for(id)
}

pub fn extract_population(facts: &FactSet) -> Population {
    MetricExtractor::new(facts).extract_population()
}

fn count_distinct<'s>(ids: impl Iterator<Item = &'s str>) -> u32 {
    ids.collect::<HashSet<_>>().len() as u32
}
