//! Lawmaker and party scoring.
//!
//! Inputs are extracted populations and weight configurations, outputs are
//! performance records ready for persistence. Nothing here touches the store.

pub mod contribution;
pub mod lawmaker;
pub mod party;

pub use contribution::{contribution_percentages, RESIDUE_SLOT};
pub use lawmaker::{adjusted_invalid_score, normalize_scores, score_lawmakers, LawmakerScorer};
pub use party::{aggregate_parties, aggregate_party, dampened_scores, normalized_invalid, PartySums};
