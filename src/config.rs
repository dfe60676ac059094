//! Path configuration for pipeline runs.
//!
//! The original dataset lives under `data/`; every path can be overridden
//! from the CLI, with the defaults below matching the documented layout.

use std::path::PathBuf;

/// File paths used by the fix pipeline.
#[derive(Debug, Clone)]
pub struct PipelinePaths {
    /// Raw input dataset. May be absent, which triggers the fallback.
    pub input: PathBuf,
    /// Intermediate sanitized copy, deleted after a successful run.
    pub cleaned_temp: PathBuf,
    /// Output for brands whose devices carry specifications.
    pub valid_output: PathBuf,
    /// Output for brands with devices missing specifications.
    pub missing_output: PathBuf,
    /// Where the hard-coded safe dataset is written when needed.
    pub fallback: PathBuf,
}

impl Default for PipelinePaths {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/phone.json"),
            cleaned_temp: PathBuf::from("data/phones_cleaned_temp.json"),
            valid_output: PathBuf::from("data/phones_fixed.json"),
            missing_output: PathBuf::from("data/missedInfo.json"),
            fallback: PathBuf::from("safe_phones.json"),
        }
    }
}

/// File paths used by the common-feature extractor.
#[derive(Debug, Clone)]
pub struct FeaturePaths {
    /// Validated dataset, normally the fix pipeline's valid output.
    pub input: PathBuf,
    /// Output for the sorted list of common key paths.
    pub output: PathBuf,
}

impl Default for FeaturePaths {
    fn default() -> Self {
        Self {
            input: PathBuf::from("data/phones_fixed.json"),
            output: PathBuf::from("data/common_features.json"),
        }
    }
}
