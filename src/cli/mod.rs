//! Command-line interface for phonescrub.
//!
//! Provides commands for sanitizing/splitting the raw dataset and for
//! extracting common specification features.

mod commands;

pub use commands::{parse_cli, run, run_with_cli, Cli};
