// Shared fixtures for assemblyscore integration tests
#![allow(dead_code)]

use assemblyscore::core::LawmakerId;
use assemblyscore::extraction::{
    AttendanceRecord, BillRecord, CommitteeRole, CommitteeSeat, FactSet, LawmakerRecord,
    PetitionIntroducer, PetitionRecord, RosterEntry, VoteSummary,
};
use std::path::{Path, PathBuf};

pub fn lawmaker_id(n: usize) -> LawmakerId {
    LawmakerId::new(format!("M{:03}", n))
}

/// Builds fact snapshots one lawmaker at a time.
#[derive(Default)]
pub struct FactsBuilder {
    facts: FactSet,
    next: usize,
}

impl FactsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a serving member of `party` with activity derived from their index.
    pub fn member(mut self, party: &str) -> Self {
        let n = self.next;
        let id = self.push_lawmaker();
        self.facts.roster.push(RosterEntry {
            lawmaker_id: id.clone(),
            party: party.to_string(),
        });
        self.add_activity(&id, n);

        if n % 7 == 0 {
            self.facts.committee_seats.push(CommitteeSeat {
                lawmaker_id: id.clone(),
                party: party.to_string(),
                committee: format!("Committee {}", n / 7),
                role: CommitteeRole::Leader,
            });
        } else if n % 5 == 0 {
            self.facts.committee_seats.push(CommitteeSeat {
                lawmaker_id: id,
                party: party.to_string(),
                committee: format!("Committee {}", n / 5),
                role: CommitteeRole::Secretary,
            });
        }
        self
    }

    pub fn members(self, party: &str, count: usize) -> Self {
        (0..count).fold(self, |builder, _| builder.member(party))
    }

    /// Add a lawmaker who is no longer on the roster.
    pub fn former(mut self) -> Self {
        let n = self.next;
        let id = self.push_lawmaker();
        self.add_activity(&id, n);
        self
    }

    /// Add a serving member with no activity records at all.
    pub fn idle_member(mut self, party: &str) -> Self {
        let id = self.push_lawmaker();
        self.facts.roster.push(RosterEntry {
            lawmaker_id: id,
            party: party.to_string(),
        });
        self
    }

    pub fn build(self) -> FactSet {
        self.facts
    }

    fn push_lawmaker(&mut self) -> LawmakerId {
        self.next += 1;
        let id = lawmaker_id(self.next);
        self.facts.lawmakers.push(LawmakerRecord {
            id: id.clone(),
            name: format!("Lawmaker {}", self.next),
        });
        id
    }

    fn add_activity(&mut self, id: &LawmakerId, n: usize) {
        self.facts.attendance.push(AttendanceRecord {
            lawmaker_id: id.clone(),
            attendance_rate: 60.0 + (n % 40) as f64,
        });

        let total = 100 + (n % 17) as u32;
        let invalid = (n % 9) as u32;
        let agree = (total - invalid) * 3 / 4;
        let oppose = total - invalid - agree;
        self.facts.vote_summaries.push(VoteSummary {
            lawmaker_id: id.clone(),
            total_votes: total,
            agree_count: agree,
            oppose_count: oppose,
            invalid_or_abstain_count: invalid,
            agree_and_passed: agree - (n % 11) as u32,
            oppose_and_failed: oppose / 2,
        });

        for b in 0..(n % 4) {
            self.facts.bills.push(BillRecord {
                bill_id: format!("B{}-{}", n, b),
                main_proposer: Some(id.clone()),
                result: if b % 2 == 0 { "원안가결" } else { "폐기" }.to_string(),
            });
        }

        if n % 3 == 0 {
            let petition_id = format!("P{}", n);
            self.facts.petitions.push(PetitionRecord {
                petition_id: petition_id.clone(),
                result: if n % 2 == 0 { "수정가결" } else { "" }.to_string(),
            });
            self.facts.petition_introducers.push(PetitionIntroducer {
                petition_id,
                lawmaker_id: id.clone(),
            });
        }
    }
}

/// Three parties around the small-caucus threshold plus two former lawmakers.
pub fn sample_facts() -> FactSet {
    FactsBuilder::new()
        .members("Blue", 12)
        .members("Red", 10)
        .members("Green", 5)
        .former()
        .former()
        .build()
}

pub fn write_facts(dir: &Path, facts: &FactSet) -> PathBuf {
    let path = dir.join("facts.json");
    std::fs::write(&path, serde_json::to_string_pretty(facts).unwrap()).unwrap();
    path
}
