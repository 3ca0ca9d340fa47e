//! Persistence for computed performance records.
//!
//! Rows are upserted one at a time, keyed by lawmaker id or party name. A
//! recompute finishes by pruning every row it did not write, so each run is a
//! total replace of the population.

mod json_file;
mod memory;

pub use json_file::{JsonFileStore, StoreSnapshot};
pub use memory::MemoryStore;

use crate::core::{LawmakerId, LawmakerPerformance, PartyPerformance, Result};
use std::collections::HashSet;

pub trait PerformanceStore: Send + Sync {
    fn upsert_lawmaker(&self, record: &LawmakerPerformance) -> Result<()>;

    fn upsert_party(&self, record: &PartyPerformance) -> Result<()>;

    fn lawmaker(&self, id: &LawmakerId) -> Result<Option<LawmakerPerformance>>;

    fn party(&self, name: &str) -> Result<Option<PartyPerformance>>;

    /// All lawmaker rows, ordered by id.
    fn lawmakers(&self) -> Result<Vec<LawmakerPerformance>>;

    /// All party rows, ordered by name.
    fn parties(&self) -> Result<Vec<PartyPerformance>>;

    /// Drop lawmaker rows not in `keep`. Returns the number removed.
    fn retain_lawmakers(&self, keep: &HashSet<LawmakerId>) -> Result<usize>;

    /// Drop party rows not in `keep`. Returns the number removed.
    fn retain_parties(&self, keep: &HashSet<String>) -> Result<usize>;

    /// Make every committed row durable.
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}
