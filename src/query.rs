//! Read-side queries over stored performance records.
//!
//! Rankings are recomputed on every call from whatever the store holds, so a
//! reader racing a recompute may see a partly updated population.

use crate::core::{Error, LawmakerId, LawmakerPerformance, PartyPerformance, Result};
use crate::ranking::{rank_by, LawmakerField, PartyField, RankDirection, Ranked};
use crate::store::PerformanceStore;
use serde::Serialize;
use std::cmp::Ordering;

/// Which side of a comparison comes out ahead on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Leader {
    Left,
    Right,
    Tie,
}

impl Leader {
    /// Smaller rank number leads.
    pub fn decide_rank(left: usize, right: usize) -> Self {
        Self::decide(left as f64, right as f64, true)
    }

    /// Lower-is-better fields flip the winner.
    pub fn decide(left: f64, right: f64, lower_is_better: bool) -> Self {
        let ordering = left.total_cmp(&right);
        let ordering = if lower_is_better {
            ordering.reverse()
        } else {
            ordering
        };
        match ordering {
            Ordering::Greater => Self::Left,
            Ordering::Less => Self::Right,
            Ordering::Equal => Self::Tie,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldComparison {
    pub field: &'static str,
    pub left: f64,
    pub right: f64,
    pub leader: Leader,
}

/// Side-by-side comparison of two records with their overall ranks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison<T> {
    pub left: T,
    pub right: T,
    pub left_rank: usize,
    pub right_rank: usize,
    pub population: usize,
    pub fields: Vec<FieldComparison>,
}

impl<T> Comparison<T> {
    /// Fields won by (left, right)
    pub fn tally(&self) -> (usize, usize) {
        self.fields.iter().fold((0, 0), |(l, r), f| match f.leader {
            Leader::Left => (l + 1, r),
            Leader::Right => (l, r + 1),
            Leader::Tie => (l, r),
        })
    }
}

/// Queries bound to one store.
pub struct Queries<'a, S: PerformanceStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: PerformanceStore + ?Sized> Queries<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn lawmaker(&self, id: &LawmakerId) -> Result<LawmakerPerformance> {
        self.store
            .lawmaker(id)?
            .ok_or_else(|| Error::NotFound(format!("lawmaker {}", id)))
    }

    pub fn party(&self, name: &str) -> Result<PartyPerformance> {
        self.store
            .party(name)?
            .ok_or_else(|| Error::NotFound(format!("party {}", name)))
    }

    /// Rank lawmakers by `field`. Ranks are taken over the filtered population,
    /// and `limit` truncates only after ranking.
    pub fn lawmaker_ranking(
        &self,
        field: LawmakerField,
        direction: RankDirection,
        serving_only: bool,
        limit: Option<usize>,
    ) -> Result<Vec<Ranked<LawmakerPerformance>>> {
        let rows = self
            .store
            .lawmakers()?
            .into_iter()
            .filter(|r| !serving_only || r.currently_serving);
        let ranked = rank_by(
            rows,
            |r| r.lawmaker_id.clone(),
            |r| field.value(r),
            direction,
        );
        Ok(truncate(ranked, limit))
    }

    pub fn party_ranking(
        &self,
        field: PartyField,
        direction: RankDirection,
        limit: Option<usize>,
    ) -> Result<Vec<Ranked<PartyPerformance>>> {
        let ranked = rank_by(
            self.store.parties()?,
            |p| p.party.clone(),
            |p| field.value(p),
            direction,
        );
        Ok(truncate(ranked, limit))
    }

    /// Currently serving members of `party`, ranked by total score.
    pub fn lawmakers_by_party(
        &self,
        party: &str,
        direction: RankDirection,
        limit: Option<usize>,
    ) -> Result<Vec<Ranked<LawmakerPerformance>>> {
        let members: Vec<LawmakerPerformance> = self
            .store
            .lawmakers()?
            .into_iter()
            .filter(|r| r.currently_serving && r.party == party)
            .collect();
        if members.is_empty() {
            return Err(Error::NotFound(format!(
                "party {} has no serving members",
                party
            )));
        }

        let ranked = rank_by(
            members,
            |r| r.lawmaker_id.clone(),
            |r| r.total_score,
            direction,
        );
        Ok(truncate(ranked, limit))
    }

    /// Compare two lawmakers field by field. Overall rank is by total score
    /// among every stored lawmaker.
    pub fn compare_lawmakers(
        &self,
        left: &LawmakerId,
        right: &LawmakerId,
    ) -> Result<Comparison<LawmakerPerformance>> {
        let left = self.lawmaker(left)?;
        let right = self.lawmaker(right)?;
        let ranking = self.lawmaker_ranking(
            LawmakerField::TotalScore,
            RankDirection::Desc,
            false,
            None,
        )?;
        let rank_of = |id: &LawmakerId| {
            ranking
                .iter()
                .find(|r| &r.item.lawmaker_id == id)
                .map(|r| r.rank)
                .unwrap_or(0)
        };

        let fields = LawmakerField::ALL
            .iter()
            .map(|f| FieldComparison {
                field: f.name(),
                left: f.value(&left),
                right: f.value(&right),
                leader: Leader::decide(f.value(&left), f.value(&right), f.lower_is_better()),
            })
            .collect();

        Ok(Comparison {
            left_rank: rank_of(&left.lawmaker_id),
            right_rank: rank_of(&right.lawmaker_id),
            population: ranking.len(),
            left,
            right,
            fields,
        })
    }

    /// Compare two parties field by field. Overall rank is by weighted score.
    pub fn compare_parties(&self, left: &str, right: &str) -> Result<Comparison<PartyPerformance>> {
        let left = self.party(left)?;
        let right = self.party(right)?;
        let ranking = self.party_ranking(PartyField::WeightedScore, RankDirection::Desc, None)?;
        let rank_of = |name: &str| {
            ranking
                .iter()
                .find(|r| r.item.party == name)
                .map(|r| r.rank)
                .unwrap_or(0)
        };

        let fields = PartyField::ALL
            .iter()
            .map(|f| FieldComparison {
                field: f.name(),
                left: f.value(&left),
                right: f.value(&right),
                leader: Leader::decide(f.value(&left), f.value(&right), f.lower_is_better()),
            })
            .collect();

        Ok(Comparison {
            left_rank: rank_of(&left.party),
            right_rank: rank_of(&right.party),
            population: ranking.len(),
            left,
            right,
            fields,
        })
    }
}

fn truncate<T>(mut rows: Vec<T>, limit: Option<usize>) -> Vec<T> {
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    rows
}
