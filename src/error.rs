//! Error types for phonescrub operations.
//!
//! Defines error types for the major subsystems:
//! - Text sanitization and chunked file cleaning
//! - The fix pipeline (parse, split, output writing)
//! - Common-feature extraction

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur during text sanitization.
#[derive(Debug, Error)]
pub enum SanitizeError {
    #[error("Input file '{0}' not found")]
    InputNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during the fix pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Sanitization failed: {0}")]
    Sanitize(#[from] SanitizeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur during common-feature extraction.
#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Input file '{0}' not found")]
    InputNotFound(PathBuf),

    #[error("Input is not a JSON array of brands: {0}")]
    UnexpectedShape(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
