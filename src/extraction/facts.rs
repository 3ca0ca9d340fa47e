//! Upstream fact records consumed by the metric extractors.
//!
//! A `FactSet` is the read-only snapshot a recomputation run pulls at start.
//! Every record refers to lawmakers by `LawmakerId`; `validate` rejects
//! references to unknown identifiers so that no downstream step has to match
//! lawmakers by name.

use crate::core::{Error, LawmakerId, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Processing results that count as "passed" for bills and petitions
pub const PASSED_RESULT_CODES: [&str; 4] = ["원안가결", "수정가결", "대안반영가결", "임시가결"];

/// Maximum number of individual problems listed in an ingestion error
const MAX_REPORTED_PROBLEMS: usize = 10;

pub fn is_passed(result: &str) -> bool {
    PASSED_RESULT_CODES.contains(&result.trim())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawmakerRecord {
    pub id: LawmakerId,
    pub name: String,
}

/// Current membership: a lawmaker on the roster is currently serving.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterEntry {
    pub lawmaker_id: LawmakerId,
    pub party: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub lawmaker_id: LawmakerId,
    /// Attendance rate in percent (0-100)
    pub attendance_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoteSummary {
    pub lawmaker_id: LawmakerId,
    pub total_votes: u32,
    pub agree_count: u32,
    pub oppose_count: u32,
    pub invalid_or_abstain_count: u32,
    /// Agree votes on bills that passed
    pub agree_and_passed: u32,
    /// Oppose votes on bills that failed
    pub oppose_and_failed: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillRecord {
    pub bill_id: String,
    #[serde(default)]
    pub main_proposer: Option<LawmakerId>,
    #[serde(default)]
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetitionRecord {
    pub petition_id: String,
    #[serde(default)]
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PetitionIntroducer {
    pub petition_id: String,
    pub lawmaker_id: LawmakerId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitteeRole {
    #[serde(alias = "위원장")]
    Leader,
    #[serde(alias = "간사")]
    Secretary,
    #[serde(other)]
    Member,
}

impl CommitteeRole {
    /// Fixed leadership points: 5 per chair, 3 per secretary.
    pub fn points(&self) -> u32 {
        match self {
            CommitteeRole::Leader => 5,
            CommitteeRole::Secretary => 3,
            CommitteeRole::Member => 0,
        }
    }
}

/// A seat on a committee. `party` is the affiliation recorded by the committee roster itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitteeSeat {
    pub lawmaker_id: LawmakerId,
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub committee: String,
    pub role: CommitteeRole,
}

/// Snapshot of every upstream fact table the engine reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactSet {
    pub lawmakers: Vec<LawmakerRecord>,
    pub roster: Vec<RosterEntry>,
    pub attendance: Vec<AttendanceRecord>,
    pub vote_summaries: Vec<VoteSummary>,
    pub bills: Vec<BillRecord>,
    pub petitions: Vec<PetitionRecord>,
    pub petition_introducers: Vec<PetitionIntroducer>,
    pub committee_seats: Vec<CommitteeSeat>,
}

impl FactSet {
    /// Parse and validate a JSON fact snapshot.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        let facts: FactSet = serde_json::from_str(contents)
            .map_err(|e| Error::ingestion(format!("Malformed fact snapshot: {}", e)))?;
        facts.validate()?;
        Ok(facts)
    }

    /// Check identifier relationships and value ranges, reporting every problem found.
    pub fn validate(&self) -> Result<()> {
        let problems = self.collect_problems();
        if problems.is_empty() {
            return Ok(());
        }

        let shown: Vec<&str> = problems
            .iter()
            .take(MAX_REPORTED_PROBLEMS)
            .map(String::as_str)
            .collect();
        let mut message = shown.join("; ");
        if problems.len() > MAX_REPORTED_PROBLEMS {
            message.push_str(&format!(
                "; and {} more",
                problems.len() - MAX_REPORTED_PROBLEMS
            ));
        }
        Err(Error::ingestion(message))
    }

    fn collect_problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        let mut known: HashSet<&LawmakerId> = HashSet::new();
        for lawmaker in &self.lawmakers {
            if !known.insert(&lawmaker.id) {
                problems.push(format!("duplicate lawmaker id {}", lawmaker.id));
            }
        }

        let check_ref = |table: &str, id: &LawmakerId, problems: &mut Vec<String>| {
            if !known.contains(id) {
                problems.push(format!("{} references unknown lawmaker {}", table, id));
            }
        };

        let mut on_roster = HashSet::new();
        for entry in &self.roster {
            check_ref("roster", &entry.lawmaker_id, &mut problems);
            if !on_roster.insert(&entry.lawmaker_id) {
                problems.push(format!("lawmaker {} appears twice on roster", entry.lawmaker_id));
            }
            if entry.party.trim().is_empty() {
                problems.push(format!("roster entry {} has no party", entry.lawmaker_id));
            }
        }

        let mut attended = HashSet::new();
        for record in &self.attendance {
            check_ref("attendance", &record.lawmaker_id, &mut problems);
            if !attended.insert(&record.lawmaker_id) {
                problems.push(format!("duplicate attendance for {}", record.lawmaker_id));
            }
            if !(0.0..=100.0).contains(&record.attendance_rate) {
                problems.push(format!(
                    "attendance rate {} for {} is outside 0-100",
                    record.attendance_rate, record.lawmaker_id
                ));
            }
        }

        let mut summarized = HashSet::new();
        for summary in &self.vote_summaries {
            check_ref("vote summary", &summary.lawmaker_id, &mut problems);
            if !summarized.insert(&summary.lawmaker_id) {
                problems.push(format!("duplicate vote summary for {}", summary.lawmaker_id));
            }
            if summary.agree_and_passed > summary.agree_count
                || summary.oppose_and_failed > summary.oppose_count
            {
                problems.push(format!(
                    "vote summary for {} has more outcome matches than votes",
                    summary.lawmaker_id
                ));
            }
            let cast = u64::from(summary.agree_count) + u64::from(summary.oppose_count);
            if cast > u64::from(summary.total_votes) {
                problems.push(format!(
                    "vote summary for {} has {} agree/oppose votes out of {} total",
                    summary.lawmaker_id, cast, summary.total_votes
                ));
            }
            if summary.invalid_or_abstain_count > summary.total_votes {
                problems.push(format!(
                    "vote summary for {} has {} invalid or abstain votes out of {} total",
                    summary.lawmaker_id, summary.invalid_or_abstain_count, summary.total_votes
                ));
            }
        }

        for bill in &self.bills {
            if let Some(proposer) = &bill.main_proposer {
                check_ref("bill", proposer, &mut problems);
            }
        }

        let petitions: HashSet<&str> = self
            .petitions
            .iter()
            .map(|p| p.petition_id.as_str())
            .collect();
        for introducer in &self.petition_introducers {
            check_ref("petition introducer", &introducer.lawmaker_id, &mut problems);
            if !petitions.contains(introducer.petition_id.as_str()) {
                problems.push(format!(
                    "petition introducer references unknown petition {}",
                    introducer.petition_id
                ));
            }
        }

        for seat in &self.committee_seats {
            check_ref("committee seat", &seat.lawmaker_id, &mut problems);
        }

        problems
    }
}

/// Where a recomputation run pulls its fact snapshot from.
pub trait FactSource {
    fn snapshot(&self) -> Result<FactSet>;
}

impl FactSource for FactSet {
    fn snapshot(&self) -> Result<FactSet> {
        self.validate()?;
        Ok(self.clone())
    }
}

/// Fact snapshot exported by the ingestion jobs as a JSON file.
#[derive(Debug, Clone)]
pub struct JsonFactSource {
    path: PathBuf,
}

impl JsonFactSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl FactSource for JsonFactSource {
    fn snapshot(&self) -> Result<FactSet> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            Error::ingestion(format!("Cannot read {}: {}", self.path.display(), e))
        })?;
        FactSet::from_json_str(&contents)
    }
}
