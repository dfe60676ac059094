//! CLI command definitions for phonescrub.
//!
//! Two subcommands mirror the two pipeline stages: `fix` sanitizes and
//! splits the raw dataset, `common-features` intersects the specification
//! key paths of the validated output. All paths default to the documented
//! layout and can be overridden per run.

use std::path::PathBuf;

use clap::Parser;
use tracing::info;

use crate::config::{FeaturePaths, PipelinePaths};
use crate::pipeline;

/// Offline data-hygiene pipeline for phone-spec JSON datasets.
#[derive(Parser)]
#[command(name = "phonescrub")]
#[command(about = "Sanitize, split and analyze phone-spec JSON datasets")]
#[command(version)]
#[command(
    long_about = "phonescrub repairs malformed phone-spec JSON (unusual Unicode terminators, mixed line endings), splits devices into complete/incomplete buckets, and extracts the specification fields common to every device.\n\nExample usage:\n  phonescrub fix --input data/phone.json\n  phonescrub common-features"
)]
pub struct Cli {
    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,
}

/// Available CLI subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Sanitize the raw dataset and split devices by specification presence.
    Fix(FixArgs),

    /// Extract the specification key paths common to every device.
    #[command(name = "common-features", alias = "cf")]
    CommonFeatures(CommonFeaturesArgs),
}

/// Arguments for `phonescrub fix`.
#[derive(Parser, Debug)]
pub struct FixArgs {
    /// Raw input dataset. Falls back to the safe dataset when absent.
    #[arg(short = 'i', long, default_value = "data/phone.json")]
    pub input: PathBuf,

    /// Intermediate sanitized copy, deleted after a successful run.
    #[arg(long, default_value = "data/phones_cleaned_temp.json")]
    pub cleaned_temp: PathBuf,

    /// Output for brands whose devices carry specifications.
    #[arg(long, default_value = "data/phones_fixed.json")]
    pub valid_output: PathBuf,

    /// Output for brands with devices missing specifications.
    #[arg(long, default_value = "data/missedInfo.json")]
    pub missing_output: PathBuf,

    /// Where the hard-coded safe dataset is written when needed.
    #[arg(long, default_value = "safe_phones.json")]
    pub fallback: PathBuf,
}

/// Arguments for `phonescrub common-features`.
#[derive(Parser, Debug)]
pub struct CommonFeaturesArgs {
    /// Validated dataset, normally the fix stage's valid output.
    #[arg(short = 'i', long, default_value = "data/phones_fixed.json")]
    pub input: PathBuf,

    /// Output for the sorted list of common key paths.
    #[arg(short = 'o', long, default_value = "data/common_features.json")]
    pub output: PathBuf,
}

impl From<FixArgs> for PipelinePaths {
    fn from(args: FixArgs) -> Self {
        Self {
            input: args.input,
            cleaned_temp: args.cleaned_temp,
            valid_output: args.valid_output,
            missing_output: args.missing_output,
            fallback: args.fallback,
        }
    }
}

impl From<CommonFeaturesArgs> for FeaturePaths {
    fn from(args: CommonFeaturesArgs) -> Self {
        Self {
            input: args.input,
            output: args.output,
        }
    }
}

/// Parses CLI arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Parses CLI arguments and runs the selected command.
pub fn run() -> anyhow::Result<()> {
    run_with_cli(parse_cli())
}

/// Runs the selected command with already-parsed arguments.
pub fn run_with_cli(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Fix(args) => {
            let paths: PipelinePaths = args.into();
            let summary = pipeline::run_fix(&paths)?;
            info!(
                used_fallback = summary.used_fallback,
                unusual_terminators = summary.unusual_terminators,
                valid_devices = summary.stats.valid_devices,
                missing_devices = summary.stats.missing_devices,
                valid_output = %paths.valid_output.display(),
                missing_output = %paths.missing_output.display(),
                "fix complete"
            );
        }
        Commands::CommonFeatures(args) => {
            let paths: FeaturePaths = args.into();
            let summary = pipeline::run_common_features(&paths)?;
            info!(
                devices = summary.device_count,
                common_features = summary.features.len(),
                "analysis complete"
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_fix_defaults() {
        let cli = Cli::try_parse_from(["phonescrub", "fix"]).unwrap();
        match cli.command {
            Commands::Fix(args) => {
                assert_eq!(args.input, PathBuf::from("data/phone.json"));
                assert_eq!(args.valid_output, PathBuf::from("data/phones_fixed.json"));
                assert_eq!(args.missing_output, PathBuf::from("data/missedInfo.json"));
                assert_eq!(args.fallback, PathBuf::from("safe_phones.json"));
            }
            _ => panic!("expected fix subcommand"),
        }
    }

    #[test]
    fn test_cli_accepts_cf_alias_and_overrides() {
        let cli = Cli::try_parse_from(["phonescrub", "cf", "-i", "other.json"]).unwrap();
        match cli.command {
            Commands::CommonFeatures(args) => {
                assert_eq!(args.input, PathBuf::from("other.json"));
                assert_eq!(args.output, PathBuf::from("data/common_features.json"));
            }
            _ => panic!("expected common-features subcommand"),
        }
    }
}
