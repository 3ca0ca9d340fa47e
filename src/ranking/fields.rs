//! Rankable numeric columns of the performance records.

use crate::core::{LawmakerPerformance, PartyPerformance};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum LawmakerField {
    #[default]
    TotalScore,
    RawScore,
    AttendanceScore,
    BillPassCount,
    BillPassRatio,
    PetitionCount,
    PetitionRatio,
    PetitionPassCount,
    PetitionPassRatio,
    CommitteeLeaderCount,
    CommitteeSecretaryCount,
    CommitteeScore,
    InvalidVoteRatio,
    AdjustedInvalidScore,
    VoteMatchRatio,
    VoteMismatchRatio,
}

impl LawmakerField {
    pub const ALL: [LawmakerField; 16] = [
        Self::TotalScore,
        Self::RawScore,
        Self::AttendanceScore,
        Self::BillPassCount,
        Self::BillPassRatio,
        Self::PetitionCount,
        Self::PetitionRatio,
        Self::PetitionPassCount,
        Self::PetitionPassRatio,
        Self::CommitteeLeaderCount,
        Self::CommitteeSecretaryCount,
        Self::CommitteeScore,
        Self::InvalidVoteRatio,
        Self::AdjustedInvalidScore,
        Self::VoteMatchRatio,
        Self::VoteMismatchRatio,
    ];

    pub fn value(self, record: &LawmakerPerformance) -> f64 {
        match self {
            Self::TotalScore => record.total_score,
            Self::RawScore => record.raw_score,
            Self::AttendanceScore => record.attendance_score,
            Self::BillPassCount => record.bill_pass_count as f64,
            Self::BillPassRatio => record.bill_pass_ratio,
            Self::PetitionCount => record.petition_count as f64,
            Self::PetitionRatio => record.petition_ratio,
            Self::PetitionPassCount => record.petition_pass_count as f64,
            Self::PetitionPassRatio => record.petition_pass_ratio,
            Self::CommitteeLeaderCount => record.committee_leader_count as f64,
            Self::CommitteeSecretaryCount => record.committee_secretary_count as f64,
            Self::CommitteeScore => record.committee_score,
            Self::InvalidVoteRatio => record.invalid_vote_ratio,
            Self::AdjustedInvalidScore => record.adjusted_invalid_score,
            Self::VoteMatchRatio => record.vote_match_ratio,
            Self::VoteMismatchRatio => record.vote_mismatch_ratio,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::TotalScore => "total_score",
            Self::RawScore => "raw_score",
            Self::AttendanceScore => "attendance_score",
            Self::BillPassCount => "bill_pass_count",
            Self::BillPassRatio => "bill_pass_ratio",
            Self::PetitionCount => "petition_count",
            Self::PetitionRatio => "petition_ratio",
            Self::PetitionPassCount => "petition_pass_count",
            Self::PetitionPassRatio => "petition_pass_ratio",
            Self::CommitteeLeaderCount => "committee_leader_count",
            Self::CommitteeSecretaryCount => "committee_secretary_count",
            Self::CommitteeScore => "committee_score",
            Self::InvalidVoteRatio => "invalid_vote_ratio",
            Self::AdjustedInvalidScore => "adjusted_invalid_score",
            Self::VoteMatchRatio => "vote_match_ratio",
            Self::VoteMismatchRatio => "vote_mismatch_ratio",
        }
    }

    /// Whether a lower value is the better outcome
    pub fn lower_is_better(self) -> bool {
        matches!(self, Self::InvalidVoteRatio | Self::VoteMismatchRatio)
    }
}

impl fmt::Display for LawmakerField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Party columns. Spread metrics rank by their mean.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum PartyField {
    #[default]
    WeightedScore,
    MemberCount,
    AvgTotalScore,
    PenaltyFactor,
    Attendance,
    InvalidVoteRatio,
    VoteMatchRatio,
    VoteMismatchRatio,
    BillPassSum,
    PetitionSum,
    PetitionPassSum,
    CommitteeLeaderCount,
    CommitteeSecretaryCount,
}

impl PartyField {
    pub const ALL: [PartyField; 13] = [
        Self::WeightedScore,
        Self::MemberCount,
        Self::AvgTotalScore,
        Self::PenaltyFactor,
        Self::Attendance,
        Self::InvalidVoteRatio,
        Self::VoteMatchRatio,
        Self::VoteMismatchRatio,
        Self::BillPassSum,
        Self::PetitionSum,
        Self::PetitionPassSum,
        Self::CommitteeLeaderCount,
        Self::CommitteeSecretaryCount,
    ];

    pub fn value(self, record: &PartyPerformance) -> f64 {
        match self {
            Self::WeightedScore => record.weighted_score,
            Self::MemberCount => record.member_count as f64,
            Self::AvgTotalScore => record.avg_total_score,
            Self::PenaltyFactor => record.penalty_factor,
            Self::Attendance => record.attendance.mean,
            Self::InvalidVoteRatio => record.invalid_vote_ratio.mean,
            Self::VoteMatchRatio => record.vote_match_ratio.mean,
            Self::VoteMismatchRatio => record.vote_mismatch_ratio.mean,
            Self::BillPassSum => record.bill_pass_sum as f64,
            Self::PetitionSum => record.petition_sum as f64,
            Self::PetitionPassSum => record.petition_pass_sum as f64,
            Self::CommitteeLeaderCount => record.committee_leader_count as f64,
            Self::CommitteeSecretaryCount => record.committee_secretary_count as f64,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::WeightedScore => "weighted_score",
            Self::MemberCount => "member_count",
            Self::AvgTotalScore => "avg_total_score",
            Self::PenaltyFactor => "penalty_factor",
            Self::Attendance => "attendance",
            Self::InvalidVoteRatio => "invalid_vote_ratio",
            Self::VoteMatchRatio => "vote_match_ratio",
            Self::VoteMismatchRatio => "vote_mismatch_ratio",
            Self::BillPassSum => "bill_pass_sum",
            Self::PetitionSum => "petition_sum",
            Self::PetitionPassSum => "petition_pass_sum",
            Self::CommitteeLeaderCount => "committee_leader_count",
            Self::CommitteeSecretaryCount => "committee_secretary_count",
        }
    }

    pub fn lower_is_better(self) -> bool {
        matches!(self, Self::InvalidVoteRatio | Self::VoteMismatchRatio)
    }
}

impl fmt::Display for PartyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
