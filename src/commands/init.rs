use crate::config::CONFIG_FILE_NAME;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG: &str = r#"# assemblyscore configuration

# Project-level weights. Any key left out keeps its built-in default.
# Weights may be negative to penalize a metric.
[weights]
attendance_weight = 8.0
bill_passed_weight = 40.0
petition_proposed_weight = 8.0
petition_result_weight = 23.0
committee_weight = 5.0
adjusted_invalid_vote_weight = 2.0
vote_match_weight = 7.0
vote_mismatch_weight = 4.0

# Parties with fewer serving members than this get penalty_ratio applied
small_caucus_threshold = 10
penalty_ratio = 0.5

# Ceiling of the abstention-adjusted vote score
max_invalid_vote_score = 4.0

[store]
path = "performance.json"

[output]
default_format = "terminal"
"#;

/// Write the default config into `dir`.
pub fn write_default_config(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE_NAME);

    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(config_path)
}

pub fn init_config(force: bool) -> Result<()> {
    write_default_config(Path::new("."), force)?;
    println!("Created {} configuration file", CONFIG_FILE_NAME);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_and_validate_config, WeightConfiguration, WeightOverrides};
    use tempfile::TempDir;

    #[test]
    fn test_default_config_matches_built_in_weights() {
        let config = parse_and_validate_config(DEFAULT_CONFIG).unwrap();
        let resolved = config
            .resolve_weights(&WeightOverrides::default())
            .unwrap();
        assert_eq!(resolved, WeightConfiguration::default());
    }

    #[test]
    fn test_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        write_default_config(dir.path(), false).unwrap();

        let err = write_default_config(dir.path(), false).unwrap_err();
        assert!(err.to_string().contains("--force"));

        write_default_config(dir.path(), true).unwrap();
    }
}
