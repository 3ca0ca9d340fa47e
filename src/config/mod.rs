// Core configuration types
mod core;
mod loader;
mod weights;

pub use self::core::{default_store_path, AssemblyConfig, OutputConfig, StoreConfig};
pub use loader::{
    directory_ancestors, discover_config, load_config, load_config_from,
    parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use weights::{
    default_adjusted_invalid_vote_weight, default_attendance_weight, default_bill_passed_weight,
    default_committee_weight, default_max_invalid_vote_score, default_penalty_ratio,
    default_petition_proposed_weight, default_petition_result_weight,
    default_small_caucus_threshold, default_vote_match_weight, default_vote_mismatch_weight,
    WeightConfiguration, WeightOverrides, MAX_WEIGHT_MAGNITUDE,
};
