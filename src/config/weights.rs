//! Weight configuration for lawmaker and party scoring
//!
//! This module contains:
//! - `WeightConfiguration`: the immutable, fully-resolved weights passed into every calculation
//! - `WeightOverrides`: a partial, caller-supplied set of named weights
//! - Default values for every weight and party-penalty parameter

use crate::core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Resolved scoring weights for one computation run.
///
/// Weights may be negative to penalize a metric; they are never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfiguration {
    /// Weight for plenary attendance rate (applied as weight/100)
    #[serde(default = "default_attendance_weight")]
    pub attendance_weight: f64,

    /// Weight for the share of passed bills (applied as-is)
    #[serde(default = "default_bill_passed_weight")]
    pub bill_passed_weight: f64,

    /// Weight for the share of introduced petitions (applied as-is)
    #[serde(default = "default_petition_proposed_weight")]
    pub petition_proposed_weight: f64,

    /// Weight for the share of passed petitions (applied as-is)
    #[serde(default = "default_petition_result_weight")]
    pub petition_result_weight: f64,

    /// Weight for committee leadership points (applied as weight/100)
    #[serde(default = "default_committee_weight")]
    pub committee_weight: f64,

    /// Weight for the abstention-adjusted vote score (applied as weight/100)
    #[serde(default = "default_adjusted_invalid_vote_weight")]
    pub adjusted_invalid_vote_weight: f64,

    /// Weight for vote/outcome agreement (applied as weight/100)
    #[serde(default = "default_vote_match_weight")]
    pub vote_match_weight: f64,

    /// Weight for vote/outcome disagreement, party level only (applied as weight/100)
    #[serde(default = "default_vote_mismatch_weight")]
    pub vote_mismatch_weight: f64,

    /// Parties with fewer members than this receive the penalty ratio
    #[serde(default = "default_small_caucus_threshold")]
    pub small_caucus_threshold: usize,

    /// Multiplier applied to small-caucus party scores (0.0-1.0)
    #[serde(default = "default_penalty_ratio")]
    pub penalty_ratio: f64,

    /// Ceiling of the abstention-adjusted vote score
    #[serde(default = "default_max_invalid_vote_score")]
    pub max_invalid_vote_score: f64,
}

impl Default for WeightConfiguration {
    fn default() -> Self {
        Self {
            attendance_weight: default_attendance_weight(),
            bill_passed_weight: default_bill_passed_weight(),
            petition_proposed_weight: default_petition_proposed_weight(),
            petition_result_weight: default_petition_result_weight(),
            committee_weight: default_committee_weight(),
            adjusted_invalid_vote_weight: default_adjusted_invalid_vote_weight(),
            vote_match_weight: default_vote_match_weight(),
            vote_mismatch_weight: default_vote_mismatch_weight(),
            small_caucus_threshold: default_small_caucus_threshold(),
            penalty_ratio: default_penalty_ratio(),
            max_invalid_vote_score: default_max_invalid_vote_score(),
        }
    }
}

/// Largest accepted absolute value for a metric weight or the invalid-vote ceiling.
/// Keeps every raw score finite so normalization always has a real maximum.
pub const MAX_WEIGHT_MAGNITUDE: f64 = 1.0e6;

impl WeightConfiguration {
    // Pure function: Validate a single metric weight with name
    pub fn validate_weight(weight: f64, name: &str) -> std::result::Result<(), String> {
        if !weight.is_finite() {
            Err(format!("{} must be a finite number, got {}", name, weight))
        } else if weight.abs() > MAX_WEIGHT_MAGNITUDE {
            Err(format!(
                "{} must be within ±{}, got {}",
                name, MAX_WEIGHT_MAGNITUDE, weight
            ))
        } else {
            Ok(())
        }
    }

    // Pure function: Collect all validations
    pub fn collect_validations(&self) -> Vec<std::result::Result<(), String>> {
        let mut checks: Vec<_> = self
            .named_weights()
            .into_iter()
            .map(|(name, weight)| Self::validate_weight(weight, name))
            .collect();

        checks.push(
            if (0.0..=MAX_WEIGHT_MAGNITUDE).contains(&self.max_invalid_vote_score) {
                Ok(())
            } else {
                Err(format!(
                    "max_invalid_vote_score must be between 0 and {}, got {}",
                    MAX_WEIGHT_MAGNITUDE, self.max_invalid_vote_score
                ))
            },
        );
        checks.push(if (0.0..=1.0).contains(&self.penalty_ratio) {
            Ok(())
        } else {
            Err(format!(
                "penalty_ratio must be between 0.0 and 1.0, got {}",
                self.penalty_ratio
            ))
        });

        checks
    }

    /// Validate every weight, reporting all problems at once.
    pub fn validate(&self) -> Result<()> {
        let problems: Vec<String> = self
            .collect_validations()
            .into_iter()
            .filter_map(|check| check.err())
            .collect();

        if problems.is_empty() {
            Ok(())
        } else {
            Err(Error::configuration(problems.join("; ")))
        }
    }

    /// The eight metric weights with their configuration key names.
    pub fn named_weights(&self) -> [(&'static str, f64); 8] {
        [
            ("attendance_weight", self.attendance_weight),
            ("bill_passed_weight", self.bill_passed_weight),
            ("petition_proposed_weight", self.petition_proposed_weight),
            ("petition_result_weight", self.petition_result_weight),
            ("committee_weight", self.committee_weight),
            (
                "adjusted_invalid_vote_weight",
                self.adjusted_invalid_vote_weight,
            ),
            ("vote_match_weight", self.vote_match_weight),
            ("vote_mismatch_weight", self.vote_mismatch_weight),
        ]
    }

    /// Penalty multiplier for a party of `member_count` members.
    pub fn penalty_factor(&self, member_count: usize) -> f64 {
        if member_count < self.small_caucus_threshold {
            self.penalty_ratio
        } else {
            1.0
        }
    }
}

/// Caller-supplied partial weights. Missing fields fall back to the base configuration.
///
/// Unrecognized keys are ignored; a non-numeric value fails to deserialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bill_passed_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petition_proposed_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub petition_result_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub committee_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adjusted_invalid_vote_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_match_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote_mismatch_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub small_caucus_threshold: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalty_ratio: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_invalid_vote_score: Option<f64>,
}

impl WeightOverrides {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Parse overrides from a JSON object such as a request body.
    pub fn from_json_str(contents: &str) -> Result<Self> {
        serde_json::from_str(contents)
            .map_err(|e| Error::configuration(format!("Invalid weight overrides: {}", e)))
    }

    /// Parse overrides from a TOML document of `key = value` pairs.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents)
            .map_err(|e| Error::configuration(format!("Invalid weight overrides: {}", e)))
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merge(self, other: WeightOverrides) -> Self {
        Self {
            attendance_weight: other.attendance_weight.or(self.attendance_weight),
            bill_passed_weight: other.bill_passed_weight.or(self.bill_passed_weight),
            petition_proposed_weight: other
                .petition_proposed_weight
                .or(self.petition_proposed_weight),
            petition_result_weight: other.petition_result_weight.or(self.petition_result_weight),
            committee_weight: other.committee_weight.or(self.committee_weight),
            adjusted_invalid_vote_weight: other
                .adjusted_invalid_vote_weight
                .or(self.adjusted_invalid_vote_weight),
            vote_match_weight: other.vote_match_weight.or(self.vote_match_weight),
            vote_mismatch_weight: other.vote_mismatch_weight.or(self.vote_mismatch_weight),
            small_caucus_threshold: other.small_caucus_threshold.or(self.small_caucus_threshold),
            penalty_ratio: other.penalty_ratio.or(self.penalty_ratio),
            max_invalid_vote_score: other.max_invalid_vote_score.or(self.max_invalid_vote_score),
        }
    }

    /// Resolve against `base` and validate the result.
    pub fn apply(&self, base: &WeightConfiguration) -> Result<WeightConfiguration> {
        let resolved = WeightConfiguration {
            attendance_weight: self.attendance_weight.unwrap_or(base.attendance_weight),
            bill_passed_weight: self.bill_passed_weight.unwrap_or(base.bill_passed_weight),
            petition_proposed_weight: self
                .petition_proposed_weight
                .unwrap_or(base.petition_proposed_weight),
            petition_result_weight: self
                .petition_result_weight
                .unwrap_or(base.petition_result_weight),
            committee_weight: self.committee_weight.unwrap_or(base.committee_weight),
            adjusted_invalid_vote_weight: self
                .adjusted_invalid_vote_weight
                .unwrap_or(base.adjusted_invalid_vote_weight),
            vote_match_weight: self.vote_match_weight.unwrap_or(base.vote_match_weight),
            vote_mismatch_weight: self
                .vote_mismatch_weight
                .unwrap_or(base.vote_mismatch_weight),
            small_caucus_threshold: self
                .small_caucus_threshold
                .unwrap_or(base.small_caucus_threshold),
            penalty_ratio: self.penalty_ratio.unwrap_or(base.penalty_ratio),
            max_invalid_vote_score: self
                .max_invalid_vote_score
                .unwrap_or(base.max_invalid_vote_score),
        };
        resolved.validate()?;
        Ok(resolved)
    }
}

pub fn default_attendance_weight() -> f64 {
    8.0
}
pub fn default_bill_passed_weight() -> f64 {
    40.0
}
pub fn default_petition_proposed_weight() -> f64 {
    8.0
}
pub fn default_petition_result_weight() -> f64 {
    23.0
}
pub fn default_committee_weight() -> f64 {
    5.0
}
pub fn default_adjusted_invalid_vote_weight() -> f64 {
    2.0
}
pub fn default_vote_match_weight() -> f64 {
    7.0
}
pub fn default_vote_mismatch_weight() -> f64 {
    4.0
}
pub fn default_small_caucus_threshold() -> usize {
    10
}
pub fn default_penalty_ratio() -> f64 {
    0.5
}
pub fn default_max_invalid_vote_score() -> f64 {
    4.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults_match_documented_values() {
        let weights = WeightConfiguration::default();
        assert_eq!(weights.attendance_weight, 8.0);
        assert_eq!(weights.bill_passed_weight, 40.0);
        assert_eq!(weights.petition_proposed_weight, 8.0);
        assert_eq!(weights.petition_result_weight, 23.0);
        assert_eq!(weights.committee_weight, 5.0);
        assert_eq!(weights.adjusted_invalid_vote_weight, 2.0);
        assert_eq!(weights.vote_match_weight, 7.0);
        assert_eq!(weights.vote_mismatch_weight, 4.0);
        assert_eq!(weights.small_caucus_threshold, 10);
        assert_eq!(weights.penalty_ratio, 0.5);
        assert_eq!(weights.max_invalid_vote_score, 4.0);
        assert!(weights.validate().is_ok());
    }

    #[test]
    fn test_negative_weight_is_accepted() {
        let overrides = WeightOverrides {
            attendance_weight: Some(-3.0),
            ..Default::default()
        };
        let weights = overrides.apply(&WeightConfiguration::default()).unwrap();
        assert_eq!(weights.attendance_weight, -3.0);
    }

    #[test]
    fn test_non_finite_weight_is_rejected() {
        let overrides = WeightOverrides {
            vote_match_weight: Some(f64::NAN),
            ..Default::default()
        };
        let err = overrides
            .apply(&WeightConfiguration::default())
            .unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(err.to_string().contains("vote_match_weight"));
    }

    #[test]
    fn test_oversized_weights_are_rejected() {
        let overrides = WeightOverrides {
            attendance_weight: Some(1e308),
            bill_passed_weight: Some(-1e308),
            max_invalid_vote_score: Some(1e300),
            ..Default::default()
        };
        let err = overrides
            .apply(&WeightConfiguration::default())
            .unwrap_err();
        let message = err.to_string();
        assert!(matches!(err, Error::Configuration(_)));
        assert!(message.contains("attendance_weight"));
        assert!(message.contains("bill_passed_weight"));
        assert!(message.contains("max_invalid_vote_score"));
    }

    #[test]
    fn test_weight_at_magnitude_limit_is_accepted() {
        let overrides = WeightOverrides {
            vote_match_weight: Some(-MAX_WEIGHT_MAGNITUDE),
            ..Default::default()
        };
        assert!(overrides.apply(&WeightConfiguration::default()).is_ok());
    }

    #[test]
    fn test_penalty_ratio_out_of_range_is_rejected() {
        let overrides = WeightOverrides {
            penalty_ratio: Some(1.5),
            ..Default::default()
        };
        assert!(overrides.apply(&WeightConfiguration::default()).is_err());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let overrides =
            WeightOverrides::from_json_str(r#"{"attendance_weight": 12.0, "bonus_weight": 3}"#)
                .unwrap();
        assert_eq!(overrides.attendance_weight, Some(12.0));
        assert_eq!(overrides.bill_passed_weight, None);
    }

    #[test]
    fn test_non_numeric_weight_is_configuration_error() {
        let err = WeightOverrides::from_json_str(r#"{"committee_weight": "five"}"#).unwrap_err();
        assert!(matches!(err, Error::Configuration(_)));
    }

    #[test]
    fn test_missing_keys_fall_back_to_base() {
        let overrides = WeightOverrides::from_toml_str("bill_passed_weight = 10.0").unwrap();
        let weights = overrides.apply(&WeightConfiguration::default()).unwrap();
        assert_eq!(weights.bill_passed_weight, 10.0);
        assert_eq!(weights.petition_result_weight, 23.0);
    }

    #[test]
    fn test_merge_prefers_later_layer() {
        let file = WeightOverrides {
            attendance_weight: Some(1.0),
            committee_weight: Some(2.0),
            ..Default::default()
        };
        let request = WeightOverrides {
            attendance_weight: Some(9.0),
            ..Default::default()
        };
        let merged = file.merge(request);
        assert_eq!(merged.attendance_weight, Some(9.0));
        assert_eq!(merged.committee_weight, Some(2.0));
    }

    #[test]
    fn test_penalty_factor_boundary() {
        let weights = WeightConfiguration::default();
        assert_eq!(weights.penalty_factor(9), 0.5);
        assert_eq!(weights.penalty_factor(10), 1.0);
        assert_eq!(weights.penalty_factor(250), 1.0);
    }
}
