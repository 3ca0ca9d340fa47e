use super::PerformanceStore;
use crate::core::{LawmakerId, LawmakerPerformance, PartyPerformance, Result};
use dashmap::DashMap;
use std::collections::HashSet;

/// Concurrent in-memory store. Readers may run alongside a recompute and see
/// a mix of old and new rows until it finishes.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lawmakers: DashMap<LawmakerId, LawmakerPerformance>,
    parties: DashMap<String, PartyPerformance>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(lawmakers: Vec<LawmakerPerformance>, parties: Vec<PartyPerformance>) -> Self {
        let store = Self::new();
        for record in lawmakers {
            store.lawmakers.insert(record.lawmaker_id.clone(), record);
        }
        for record in parties {
            store.parties.insert(record.party.clone(), record);
        }
        store
    }

    pub fn lawmaker_count(&self) -> usize {
        self.lawmakers.len()
    }

    pub fn party_count(&self) -> usize {
        self.parties.len()
    }
}

impl PerformanceStore for MemoryStore {
    fn upsert_lawmaker(&self, record: &LawmakerPerformance) -> Result<()> {
        self.lawmakers
            .insert(record.lawmaker_id.clone(), record.clone());
        Ok(())
    }

    fn upsert_party(&self, record: &PartyPerformance) -> Result<()> {
        self.parties.insert(record.party.clone(), record.clone());
        Ok(())
    }

    fn lawmaker(&self, id: &LawmakerId) -> Result<Option<LawmakerPerformance>> {
        Ok(self.lawmakers.get(id).map(|entry| entry.value().clone()))
    }

    fn party(&self, name: &str) -> Result<Option<PartyPerformance>> {
        Ok(self.parties.get(name).map(|entry| entry.value().clone()))
    }

    fn lawmakers(&self) -> Result<Vec<LawmakerPerformance>> {
        let mut rows: Vec<LawmakerPerformance> =
            self.lawmakers.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| a.lawmaker_id.cmp(&b.lawmaker_id));
        Ok(rows)
    }

    fn parties(&self) -> Result<Vec<PartyPerformance>> {
        let mut rows: Vec<PartyPerformance> =
            self.parties.iter().map(|e| e.value().clone()).collect();
        rows.sort_by(|a, b| a.party.cmp(&b.party));
        Ok(rows)
    }

    fn retain_lawmakers(&self, keep: &HashSet<LawmakerId>) -> Result<usize> {
        let before = self.lawmakers.len();
        self.lawmakers.retain(|id, _| keep.contains(id));
        Ok(before.saturating_sub(self.lawmakers.len()))
    }

    fn retain_parties(&self, keep: &HashSet<String>) -> Result<usize> {
        let before = self.parties.len();
        self.parties.retain(|name, _| keep.contains(name));
        Ok(before.saturating_sub(self.parties.len()))
    }
}
