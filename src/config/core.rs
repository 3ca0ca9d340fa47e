use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::weights::{WeightConfiguration, WeightOverrides};
use crate::core::Result;

/// Root configuration structure read from `.assemblyscore.toml`
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AssemblyConfig {
    /// Project-level weight overrides layered on top of the defaults
    #[serde(default)]
    pub weights: Option<WeightOverrides>,

    /// Where computed performance records are kept
    #[serde(default)]
    pub store: Option<StoreConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

impl AssemblyConfig {
    /// Resolve the project weights, then the per-run `request` overrides on top.
    ///
    /// # Examples
    ///
    /// ```
    /// use assemblyscore::config::{AssemblyConfig, WeightOverrides};
    /// let config = AssemblyConfig::default();
    /// let weights = config.resolve_weights(&WeightOverrides::default()).unwrap();
    /// assert_eq!(weights.bill_passed_weight, 40.0);
    /// ```
    pub fn resolve_weights(&self, request: &WeightOverrides) -> Result<WeightConfiguration> {
        self.weights
            .unwrap_or_default()
            .merge(*request)
            .apply(&WeightConfiguration::default())
    }

    /// Store file path, falling back to the default location
    pub fn store_path(&self) -> PathBuf {
        self.store
            .as_ref()
            .map(|s| s.path.clone())
            .unwrap_or_else(default_store_path)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

pub fn default_store_path() -> PathBuf {
    PathBuf::from("performance.json")
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    pub default_format: Option<String>,
    /// Enable colored output (default: auto-detect based on TTY)
    #[serde(default)]
    pub use_color: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_overrides_win_over_project_weights() {
        let config = AssemblyConfig {
            weights: Some(WeightOverrides {
                attendance_weight: Some(10.0),
                committee_weight: Some(6.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let request = WeightOverrides {
            attendance_weight: Some(12.0),
            ..Default::default()
        };

        let weights = config.resolve_weights(&request).unwrap();
        assert_eq!(weights.attendance_weight, 12.0);
        assert_eq!(weights.committee_weight, 6.0);
        assert_eq!(weights.vote_match_weight, 7.0);
    }

    #[test]
    fn test_store_path_default() {
        assert_eq!(
            AssemblyConfig::default().store_path(),
            PathBuf::from("performance.json")
        );
    }
}
