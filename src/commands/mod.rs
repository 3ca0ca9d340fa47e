//! CLI command implementations.
//!
//! - **recompute**: score every lawmaker and party from a fact snapshot
//! - **rank**: rank stored lawmakers or parties by any numeric field
//! - **party-members**: rank the serving members of one party
//! - **compare**: compare two lawmakers or two parties
//! - **init**: write a default configuration file

pub mod compare;
pub mod init;
pub mod rank;
pub mod recompute;

pub use compare::{compare_lawmakers, compare_parties};
pub use init::init_config;
pub use rank::{party_members, rank_lawmakers, rank_parties};
pub use recompute::{load_weight_overrides, recompute};

use crate::config::{load_config, load_config_from, AssemblyConfig};
use crate::formatting::{FormattingConfig, OutputFormatter};
use crate::store::JsonFileStore;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Settings shared by every command.
pub struct CommandContext {
    pub config: AssemblyConfig,
    pub store_path: PathBuf,
    pub formatting: FormattingConfig,
}

impl CommandContext {
    /// Load the explicit config file if given, otherwise discover one.
    /// A `--store` flag wins over the configured store path.
    pub fn load(
        config_path: Option<&Path>,
        store_override: Option<PathBuf>,
        plain: bool,
    ) -> Result<Self> {
        let config = match config_path {
            Some(path) => load_config_from(path)?,
            None => load_config(),
        };
        let store_path = store_override.unwrap_or_else(|| config.store_path());

        let mut formatting = if plain {
            FormattingConfig::plain()
        } else {
            FormattingConfig::from_env()
        };
        if let Some(false) = config.output.as_ref().and_then(|o| o.use_color) {
            formatting.color = crate::formatting::ColorMode::Never;
        }

        Ok(Self {
            config,
            store_path,
            formatting,
        })
    }

    pub fn open_store(&self) -> Result<JsonFileStore> {
        JsonFileStore::open(&self.store_path)
            .with_context(|| format!("Failed to open store {}", self.store_path.display()))
    }

    pub fn formatter(&self) -> Box<dyn OutputFormatter> {
        self.formatting.formatter()
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
