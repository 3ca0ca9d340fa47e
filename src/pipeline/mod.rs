//! Full recomputation of lawmaker and party performance.
//!
//! A run resolves and validates weights, pulls one fact snapshot, scores the
//! whole population in memory, then upserts every row and prunes the rest.
//! Nothing is written when weights or facts are rejected. Row failures are
//! logged, the remaining rows still commit, and the run reports one
//! aggregate persistence error at the end.

pub mod persist;

pub use persist::{aggregate_failures, write_rows, RowFailure};

use crate::config::{WeightConfiguration, WeightOverrides};
use crate::core::{Error, LawmakerId, LawmakerPerformance, PartyPerformance, Result};
use crate::extraction::{FactSet, FactSource, MetricExtractor};
use crate::observability::{set_phase, set_progress, RunPhase};
use crate::scoring::{aggregate_parties, score_lawmakers};
use crate::store::PerformanceStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{debug, info, info_span};

/// Everything one run computes, before it touches storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputedScores {
    pub lawmakers: Vec<LawmakerPerformance>,
    pub parties: Vec<PartyPerformance>,
}

impl ComputedScores {
    pub fn serving_lawmakers(&self) -> usize {
        self.lawmakers.iter().filter(|r| r.currently_serving).count()
    }
}

/// Score a validated fact snapshot. Pure; the same inputs always give the same output.
pub fn compute(facts: &FactSet, weights: &WeightConfiguration) -> ComputedScores {
    let extractor = MetricExtractor::new(facts);

    let population = {
        let _phase = set_phase(RunPhase::Extraction);
        let _span = info_span!("extraction").entered();
        let population = extractor.extract_population();
        debug!(
            lawmakers = population.len(),
            total_bills = population.totals.total_bills,
            total_petitions = population.totals.total_petitions,
            "Population extracted"
        );
        population
    };

    let lawmakers = {
        let _phase = set_phase(RunPhase::LawmakerScoring);
        let _span = info_span!("lawmaker_scoring").entered();
        score_lawmakers(&population, weights)
    };

    let parties = {
        let _phase = set_phase(RunPhase::PartyAggregation);
        let _span = info_span!("party_aggregation").entered();
        let parties = aggregate_parties(&lawmakers, &extractor.committee_headcounts(), weights);
        debug!(parties = parties.len(), "Parties aggregated");
        parties
    };

    ComputedScores { lawmakers, parties }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub weights: WeightConfiguration,
    pub lawmakers_written: usize,
    pub serving_lawmakers: usize,
    pub parties_written: usize,
    pub pruned_lawmakers: usize,
    pub pruned_parties: usize,
}

/// Recomputation trigger bound to one store.
///
/// Callers serialize runs against the same store; overlapping runs resolve
/// per row, last writer wins.
pub struct Recompute<'a, S: PerformanceStore + ?Sized> {
    store: &'a S,
    project_weights: WeightOverrides,
}

impl<'a, S: PerformanceStore + ?Sized> Recompute<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            project_weights: WeightOverrides::default(),
        }
    }

    /// Layer project-level weights (from `.assemblyscore.toml`) under each run's overrides.
    pub fn with_project_weights(mut self, weights: WeightOverrides) -> Self {
        self.project_weights = weights;
        self
    }

    /// Resolve the weights a run with `overrides` would use.
    pub fn resolve_weights(&self, overrides: &WeightOverrides) -> Result<WeightConfiguration> {
        self.project_weights
            .merge(*overrides)
            .apply(&WeightConfiguration::default())
    }

    pub fn run(&self, facts: &dyn FactSource, overrides: &WeightOverrides) -> Result<RunSummary> {
        let started_at = Utc::now();
        let span = info_span!("recompute", overrides = !overrides.is_empty());
        let _guard = span.enter();

        let (weights, facts) = {
            let _phase = set_phase(RunPhase::Loading);
            let weights = self.resolve_weights(overrides)?;
            let facts = facts.snapshot()?;
            (weights, facts)
        };
        info!(
            lawmakers = facts.lawmakers.len(),
            serving = facts.roster.len(),
            "Starting recompute"
        );

        let computed = compute(&facts, &weights);
        let (pruned_lawmakers, pruned_parties) = self.persist(&computed)?;

        let summary = RunSummary {
            started_at,
            finished_at: Utc::now(),
            weights,
            lawmakers_written: computed.lawmakers.len(),
            serving_lawmakers: computed.serving_lawmakers(),
            parties_written: computed.parties.len(),
            pruned_lawmakers,
            pruned_parties,
        };
        info!(
            lawmakers = summary.lawmakers_written,
            parties = summary.parties_written,
            pruned = pruned_lawmakers + pruned_parties,
            "Recompute complete"
        );
        Ok(summary)
    }

    /// Upsert every computed row, prune rows this run did not produce, then flush.
    fn persist(&self, computed: &ComputedScores) -> Result<(usize, usize)> {
        let _phase = set_phase(RunPhase::Persistence);
        let _span = info_span!("persistence").entered();
        set_progress(0, computed.lawmakers.len() + computed.parties.len());

        let mut failures = write_rows(
            "lawmaker",
            &computed.lawmakers,
            |r| r.lawmaker_id.to_string(),
            |r| self.store.upsert_lawmaker(r),
        );
        failures.extend(write_rows(
            "party",
            &computed.parties,
            |p| p.party.clone(),
            |p| self.store.upsert_party(p),
        ));

        let keep_lawmakers: HashSet<LawmakerId> = computed
            .lawmakers
            .iter()
            .map(|r| r.lawmaker_id.clone())
            .collect();
        let keep_parties: HashSet<String> =
            computed.parties.iter().map(|p| p.party.clone()).collect();

        let pruned_lawmakers = self.store.retain_lawmakers(&keep_lawmakers)?;
        let pruned_parties = self.store.retain_parties(&keep_parties)?;
        if pruned_lawmakers + pruned_parties > 0 {
            debug!(pruned_lawmakers, pruned_parties, "Pruned stale rows");
        }

        self.store.flush().map_err(|e| match e {
            Error::Persistence { .. } => e,
            other => Error::persistence(other.to_string()),
        })?;

        match aggregate_failures(&failures) {
            Some(error) => Err(error),
            None => Ok((pruned_lawmakers, pruned_parties)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::{
        AttendanceRecord, BillRecord, CommitteeRole, CommitteeSeat, LawmakerRecord, RosterEntry,
        VoteSummary,
    };
    use crate::store::{JsonFileStore, MemoryStore};
    use std::fs;

    fn id(s: &str) -> LawmakerId {
        LawmakerId::new(s)
    }

    fn facts() -> FactSet {
        let ids = ["M1", "M2", "M3"];
        FactSet {
            lawmakers: ids
                .iter()
                .map(|i| LawmakerRecord {
                    id: id(i),
                    name: format!("Name {}", i),
                })
                .collect(),
            roster: vec![
                RosterEntry {
                    lawmaker_id: id("M1"),
                    party: "Blue".into(),
                },
                RosterEntry {
                    lawmaker_id: id("M2"),
                    party: "Red".into(),
                },
            ],
            attendance: ids
                .iter()
                .zip([90.0, 80.0, 70.0])
                .map(|(i, rate)| AttendanceRecord {
                    lawmaker_id: id(i),
                    attendance_rate: rate,
                })
                .collect(),
            vote_summaries: vec![VoteSummary {
                lawmaker_id: id("M1"),
                total_votes: 10,
                agree_count: 8,
                oppose_count: 1,
                invalid_or_abstain_count: 1,
                agree_and_passed: 7,
                oppose_and_failed: 1,
            }],
            bills: vec![BillRecord {
                bill_id: "B1".into(),
                main_proposer: Some(id("M2")),
                result: "원안가결".into(),
            }],
            petitions: vec![],
            petition_introducers: vec![],
            committee_seats: vec![CommitteeSeat {
                lawmaker_id: id("M1"),
                party: "Blue".into(),
                committee: "법제사법위원회".into(),
                role: CommitteeRole::Leader,
            }],
        }
    }

    /// Fails writes for one lawmaker id.
    struct FlakyStore {
        inner: MemoryStore,
        fail_on: LawmakerId,
    }

    impl PerformanceStore for FlakyStore {
        fn upsert_lawmaker(&self, record: &LawmakerPerformance) -> Result<()> {
            if record.lawmaker_id == self.fail_on {
                return Err(Error::persistence("connection reset"));
            }
            self.inner.upsert_lawmaker(record)
        }
        fn upsert_party(&self, record: &PartyPerformance) -> Result<()> {
            self.inner.upsert_party(record)
        }
        fn lawmaker(&self, id: &LawmakerId) -> Result<Option<LawmakerPerformance>> {
            self.inner.lawmaker(id)
        }
        fn party(&self, name: &str) -> Result<Option<PartyPerformance>> {
            self.inner.party(name)
        }
        fn lawmakers(&self) -> Result<Vec<LawmakerPerformance>> {
            self.inner.lawmakers()
        }
        fn parties(&self) -> Result<Vec<PartyPerformance>> {
            self.inner.parties()
        }
        fn retain_lawmakers(&self, keep: &HashSet<LawmakerId>) -> Result<usize> {
            self.inner.retain_lawmakers(keep)
        }
        fn retain_parties(&self, keep: &HashSet<String>) -> Result<usize> {
            self.inner.retain_parties(keep)
        }
    }

    #[test]
    fn test_run_writes_every_row() {
        let store = MemoryStore::new();
        let summary = Recompute::new(&store)
            .run(&facts(), &WeightOverrides::default())
            .unwrap();

        assert_eq!(summary.lawmakers_written, 3);
        assert_eq!(summary.serving_lawmakers, 2);
        assert_eq!(summary.parties_written, 2);
        assert_eq!(store.lawmaker_count(), 3);
        assert_eq!(store.party_count(), 2);

        let max = store
            .lawmakers()
            .unwrap()
            .iter()
            .map(|r| r.total_score)
            .fold(0.0, f64::max);
        assert_eq!(max, 100.0);

        let independent = store.lawmaker(&id("M3")).unwrap().unwrap();
        assert!(!independent.currently_serving);
        assert_eq!(independent.party, crate::core::INDEPENDENT_PARTY);
    }

    #[test]
    fn test_invalid_weights_abort_before_writes() {
        let store = MemoryStore::new();
        let overrides = WeightOverrides {
            penalty_ratio: Some(2.0),
            ..Default::default()
        };

        let err = Recompute::new(&store).run(&facts(), &overrides).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(store.lawmaker_count(), 0);
    }

    #[test]
    fn test_oversized_weights_abort_before_writes() {
        let store = MemoryStore::new();
        let overrides = WeightOverrides {
            attendance_weight: Some(1e308),
            bill_passed_weight: Some(1e308),
            ..Default::default()
        };

        let err = Recompute::new(&store).run(&facts(), &overrides).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert_eq!(store.lawmaker_count(), 0);
    }

    #[test]
    fn test_rejected_facts_abort_before_writes() {
        let store = MemoryStore::new();
        let mut bad = facts();
        bad.roster.push(RosterEntry {
            lawmaker_id: id("M404"),
            party: "Blue".into(),
        });

        let err = Recompute::new(&store)
            .run(&bad, &WeightOverrides::default())
            .unwrap_err();
        assert!(matches!(err, Error::Ingestion(_)));
        assert_eq!(store.lawmaker_count(), 0);
    }

    #[test]
    fn test_row_failure_is_reported_after_other_rows_commit() {
        let store = FlakyStore {
            inner: MemoryStore::new(),
            fail_on: id("M2"),
        };

        let err = Recompute::new(&store)
            .run(&facts(), &WeightOverrides::default())
            .unwrap_err();

        match err {
            Error::Persistence { failed_rows, .. } => assert_eq!(failed_rows, 1),
            other => panic!("unexpected error {:?}", other),
        }
        assert!(store.inner.lawmaker(&id("M1")).unwrap().is_some());
        assert!(store.inner.lawmaker(&id("M3")).unwrap().is_some());
        assert_eq!(store.inner.party_count(), 2);
    }

    #[test]
    fn test_rerun_prunes_departed_lawmakers() {
        let store = MemoryStore::new();
        let recompute = Recompute::new(&store);
        recompute.run(&facts(), &WeightOverrides::default()).unwrap();

        let mut smaller = facts();
        smaller.lawmakers.retain(|l| l.id != id("M2"));
        smaller.roster.retain(|r| r.lawmaker_id != id("M2"));
        smaller.attendance.retain(|a| a.lawmaker_id != id("M2"));
        smaller.bills.clear();

        let summary = recompute.run(&smaller, &WeightOverrides::default()).unwrap();
        assert_eq!(summary.pruned_lawmakers, 1);
        assert_eq!(summary.pruned_parties, 1);
        assert!(store.party("Red").unwrap().is_none());
    }

    #[test]
    fn test_recompute_is_byte_identical() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("scores.json");

        let store = JsonFileStore::open(&path).unwrap();
        Recompute::new(&store)
            .run(&facts(), &WeightOverrides::default())
            .unwrap();
        let first = fs::read(&path).unwrap();

        let reopened = JsonFileStore::open(&path).unwrap();
        Recompute::new(&reopened)
            .run(&facts(), &WeightOverrides::default())
            .unwrap();
        assert_eq!(first, fs::read(&path).unwrap());
    }

    #[test]
    fn test_project_weights_sit_under_run_overrides() {
        let store = MemoryStore::new();
        let recompute = Recompute::new(&store).with_project_weights(WeightOverrides {
            attendance_weight: Some(20.0),
            committee_weight: Some(10.0),
            ..Default::default()
        });

        let weights = recompute
            .resolve_weights(&WeightOverrides {
                attendance_weight: Some(30.0),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(weights.attendance_weight, 30.0);
        assert_eq!(weights.committee_weight, 10.0);
        assert_eq!(weights.bill_passed_weight, 40.0);
    }
}
