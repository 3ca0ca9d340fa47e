use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::AssemblyConfig;
use super::weights::WeightConfiguration;
use crate::core::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".assemblyscore.toml";

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<AssemblyConfig> {
    let config = toml::from_str::<AssemblyConfig>(contents).map_err(|e| {
        Error::configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
    })?;

    // Project weights must resolve on their own before any run uses them
    if let Some(weights) = &config.weights {
        weights.apply(&WeightConfiguration::default())?;
    }

    Ok(config)
}

/// Load a config file the user pointed at explicitly. Any problem is an error.
pub fn load_config_from(path: &Path) -> Result<AssemblyConfig> {
    let contents = read_config_file(path)
        .map_err(|e| Error::configuration(format!("Cannot read {}: {}", path.display(), e)))?;
    let config = parse_and_validate_config(&contents)?;
    log::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Pure function to try loading config from a discovered path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<AssemblyConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

/// Handle file read errors with appropriate logging
pub(crate) fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // Only log actual errors, not "file not found"
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Discover `.assemblyscore.toml` from `start` upwards, falling back to defaults.
pub fn discover_config(start: PathBuf) -> AssemblyConfig {
    const MAX_TRAVERSAL_DEPTH: usize = 10;

    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            AssemblyConfig::default()
        })
}

pub fn load_config() -> AssemblyConfig {
    match std::env::current_dir() {
        Ok(dir) => discover_config(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            AssemblyConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    #[test]
    fn test_parse_weights_and_store() {
        let config = parse_and_validate_config(indoc! {r#"
            [weights]
            attendance_weight = 10.0
            small_caucus_threshold = 5

            [store]
            path = "out/scores.json"
        "#})
        .unwrap();

        let weights = config.weights.unwrap();
        assert_eq!(weights.attendance_weight, Some(10.0));
        assert_eq!(weights.small_caucus_threshold, Some(5));
        assert_eq!(config.store_path(), PathBuf::from("out/scores.json"));
    }

    #[test]
    fn test_non_numeric_weight_rejected() {
        let err = parse_and_validate_config(indoc! {r#"
            [weights]
            committee_weight = "high"
        "#})
        .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_out_of_range_weight_rejected() {
        let err = parse_and_validate_config(indoc! {r#"
            [weights]
            penalty_ratio = 2.0
        "#})
        .unwrap_err();
        assert!(err.to_string().contains("penalty_ratio"));
    }

    #[test]
    fn test_discover_config_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            temp.path().join(CONFIG_FILE_NAME),
            "[weights]\nvote_match_weight = 3.0\n",
        )
        .unwrap();

        let config = discover_config(nested);
        assert_eq!(config.weights.unwrap().vote_match_weight, Some(3.0));
    }

    #[test]
    fn test_invalid_discovered_config_falls_back_to_default() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "[weights\n").unwrap();

        let config = discover_config(temp.path().to_path_buf());
        assert!(config.weights.is_none());
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let temp = TempDir::new().unwrap();
        let err = load_config_from(&temp.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_directory_ancestors_respects_depth() {
        let dirs: Vec<_> = directory_ancestors(PathBuf::from("/a/b/c/d"), 2).collect();
        assert_eq!(dirs, vec![PathBuf::from("/a/b/c/d"), PathBuf::from("/a/b/c")]);
    }
}
