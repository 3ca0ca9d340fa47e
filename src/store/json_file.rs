use super::{MemoryStore, PerformanceStore};
use crate::core::{Error, LawmakerId, LawmakerPerformance, PartyPerformance, Result, ResultExt};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk layout of a JSON store. Rows are written sorted by key so two runs
/// over the same inputs produce identical files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    #[serde(default)]
    pub lawmakers: Vec<LawmakerPerformance>,
    #[serde(default)]
    pub parties: Vec<PartyPerformance>,
}

/// A [`MemoryStore`] backed by a single JSON file, rewritten on `flush`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    rows: MemoryStore,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file starts an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let rows = match fs::read_to_string(&path) {
            Ok(contents) => {
                let snapshot: StoreSnapshot = serde_json::from_str(&contents)
                    .map_err(Error::from)
                    .context(format!("Failed to parse store {}", path.display()))?;
                log::debug!(
                    "Opened store {} ({} lawmakers, {} parties)",
                    path.display(),
                    snapshot.lawmakers.len(),
                    snapshot.parties.len()
                );
                MemoryStore::with_records(snapshot.lawmakers, snapshot.parties)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => MemoryStore::new(),
            Err(e) => {
                let context = format!("Failed to read store {}", path.display());
                return Err(Error::from(e).with_context(context));
            }
        };
        Ok(Self { path, rows })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> Result<StoreSnapshot> {
        Ok(StoreSnapshot {
            lawmakers: self.rows.lawmakers()?,
            parties: self.rows.parties()?,
        })
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "store.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn ensure_parent_directory(path: &Path) -> Result<()> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir)
                .map_err(Error::from)
                .context(format!("Failed to create directory {}", dir.display())),
            _ => Ok(()),
        }
    }

    /// Write to a sibling temp file, then rename over the target.
    fn write_atomically(&self, data: &[u8]) -> Result<()> {
        let temp_path = self.temp_path();
        Self::ensure_parent_directory(&self.path)?;

        fs::write(&temp_path, data)
            .map_err(|e| Error::persistence(format!("write {}: {}", temp_path.display(), e)))?;

        fs::rename(&temp_path, &self.path).map_err(|e| {
            Error::persistence(format!(
                "rename {} -> {}: {}",
                temp_path.display(),
                self.path.display(),
                e
            ))
        })
    }
}

impl PerformanceStore for JsonFileStore {
    fn upsert_lawmaker(&self, record: &LawmakerPerformance) -> Result<()> {
        self.rows.upsert_lawmaker(record)
    }

    fn upsert_party(&self, record: &PartyPerformance) -> Result<()> {
        self.rows.upsert_party(record)
    }

    fn lawmaker(&self, id: &LawmakerId) -> Result<Option<LawmakerPerformance>> {
        self.rows.lawmaker(id)
    }

    fn party(&self, name: &str) -> Result<Option<PartyPerformance>> {
        self.rows.party(name)
    }

    fn lawmakers(&self) -> Result<Vec<LawmakerPerformance>> {
        self.rows.lawmakers()
    }

    fn parties(&self) -> Result<Vec<PartyPerformance>> {
        self.rows.parties()
    }

    fn retain_lawmakers(&self, keep: &HashSet<LawmakerId>) -> Result<usize> {
        self.rows.retain_lawmakers(keep)
    }

    fn retain_parties(&self, keep: &HashSet<String>) -> Result<usize> {
        self.rows.retain_parties(keep)
    }

    fn flush(&self) -> Result<()> {
        let snapshot = self.snapshot()?;
        let data = serde_json::to_vec_pretty(&snapshot)?;
        self.write_atomically(&data)?;
        log::debug!("Flushed store to {}", self.path.display());
        Ok(())
    }
}
