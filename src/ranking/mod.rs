//! Min ranking over any numeric field.
//!
//! Ties share the best rank among themselves and the next distinct value
//! resumes at `rank + tied`. Rows with equal values are ordered by entity key
//! so identical inputs always produce identical output.

pub mod fields;

pub use fields::{LawmakerField, PartyField};

use crate::core::numeric::round2;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum RankDirection {
    /// Lowest value ranks first
    #[value(name = "asc", alias = "ascending")]
    #[serde(alias = "ascending")]
    Asc,
    /// Highest value ranks first
    #[default]
    #[value(name = "desc", alias = "descending")]
    #[serde(alias = "descending")]
    Desc,
}

impl RankDirection {
    fn compare(self, a: f64, b: f64) -> Ordering {
        match self {
            Self::Asc => a.total_cmp(&b),
            Self::Desc => b.total_cmp(&a),
        }
    }
}

impl fmt::Display for RankDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asc => write!(f, "asc"),
            Self::Desc => write!(f, "desc"),
        }
    }
}

/// One ranked row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ranked<T> {
    pub rank: usize,
    /// Share of the population ranked strictly below this row, 0-100
    pub percentile: f64,
    pub value: f64,
    pub item: T,
}

/// `100 × (n − rank) / (n − 1)`, rounded; a single row is the 100th percentile.
pub fn percentile(rank: usize, population: usize) -> f64 {
    if population <= 1 {
        return 100.0;
    }
    round2(100.0 * population.saturating_sub(rank) as f64 / (population - 1) as f64)
}

/// Rank `items` by `value` in `direction`, breaking ties by `key`.
///
/// `-0.0` is folded into `0.0` first, so the two always tie.
pub fn rank_by<T, K, KF, VF>(
    items: impl IntoIterator<Item = T>,
    key: KF,
    value: VF,
    direction: RankDirection,
) -> Vec<Ranked<T>>
where
    K: Ord,
    KF: Fn(&T) -> K,
    VF: Fn(&T) -> f64,
{
    let mut rows: Vec<(f64, K, T)> = items
        .into_iter()
        .map(|item| (value(&item) + 0.0, key(&item), item))
        .collect();

    rows.sort_by(|a, b| direction.compare(a.0, b.0).then_with(|| a.1.cmp(&b.1)));

    let n = rows.len();
    let mut ranked = Vec::with_capacity(n);
    let mut current_rank = 0;
    let mut previous: Option<f64> = None;

    for (position, (row_value, _, item)) in rows.into_iter().enumerate() {
        let tied = previous.is_some_and(|p| p.total_cmp(&row_value) == Ordering::Equal);
        if !tied {
            current_rank = position + 1;
        }
        previous = Some(row_value);

        ranked.push(Ranked {
            rank: current_rank,
            percentile: percentile(current_rank, n),
            value: row_value,
            item,
        });
    }

    ranked
}
