//! phonescrub: Offline data-hygiene pipeline for phone-spec JSON datasets.
//!
//! This library provides tools for sanitizing malformed JSON text, splitting
//! device records into complete/incomplete buckets, and extracting the
//! specification fields common to every device.

// Core modules
pub mod cli;
pub mod config;
pub mod error;
pub mod fallback;
pub mod features;
pub mod model;
pub mod pipeline;
pub mod sanitize;
pub mod split;

// Re-export commonly used error types
pub use error::{FeatureError, PipelineError, SanitizeError};
