//! Metric extraction from upstream National Assembly fact tables.

pub mod extractor;
pub mod facts;

pub use extractor::{
    extract_metrics, extract_population, CommitteeHeadcount, MetricExtractor, Population,
    PopulationMember, PopulationTotals,
};
pub use facts::{
    is_passed, AttendanceRecord, BillRecord, CommitteeRole, CommitteeSeat, FactSet, FactSource,
    JsonFactSource, LawmakerRecord, PetitionIntroducer, PetitionRecord, RosterEntry, VoteSummary,
    PASSED_RESULT_CODES,
};
