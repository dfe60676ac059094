//! Run orchestration for the two pipeline stages.
//!
//! `run_fix` sanitizes and parses the raw dataset, falls back to the safe
//! dataset when the input is absent or unrecoverably malformed, splits
//! devices into valid/missing buckets and writes both outputs. The
//! intermediate cleaned file is deleted once the run succeeds.
//!
//! `run_common_features` reads the validated output and writes the sorted
//! list of specification key paths present in every device.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::config::{FeaturePaths, PipelinePaths};
use crate::error::{FeatureError, PipelineError};
use crate::fallback;
use crate::features::common_features;
use crate::sanitize::{self, DEFAULT_CHUNK_SIZE};
use crate::split::{self, SplitStats};

/// Summary of one fix run, for CLI reporting.
#[derive(Debug, Clone, Copy)]
pub struct FixSummary {
    /// Whether the safe dataset replaced the primary input.
    pub used_fallback: bool,
    /// Parser-breaking terminators found during sanitization.
    pub unusual_terminators: u64,
    pub stats: SplitStats,
}

/// Summary of one common-features run.
#[derive(Debug, Clone)]
pub struct FeatureSummary {
    /// Devices found across all brands in the input.
    pub device_count: usize,
    /// The sorted common key paths.
    pub features: Vec<String>,
    /// False when the input held no devices and no output was written.
    pub wrote_output: bool,
}

/// Runs the full fix stage.
pub fn run_fix(paths: &PipelinePaths) -> Result<FixSummary, PipelineError> {
    if !paths.input.is_file() {
        warn!(input = %paths.input.display(), "input not found, generating safe dataset");
        let dataset = fallback::write_safe_dataset(&paths.fallback)?;

        let stats = SplitStats {
            valid_devices: dataset.iter().map(|b| b.devices.len() as u64).sum(),
            valid_brands: dataset.len(),
            ..SplitStats::default()
        };
        write_json(&paths.valid_output, &serde_json::to_value(&dataset)?)?;
        write_json(&paths.missing_output, &Value::Array(Vec::new()))?;

        return Ok(FixSummary {
            used_fallback: true,
            unusual_terminators: 0,
            stats,
        });
    }

    let report = sanitize::sanitize_file(&paths.input, &paths.cleaned_temp, DEFAULT_CHUNK_SIZE)?;
    if report.unusual_count > 0 {
        warn!(count = report.unusual_count, "unusual terminators cleaned");
    }

    let (entries, used_fallback) = match parse_brand_file(&paths.cleaned_temp)? {
        Some(value) => (as_entries(value), false),
        None => {
            warn!("cleaned file still fails to parse, using safe dataset");
            let dataset = fallback::write_safe_dataset(&paths.fallback)?;
            (as_entries(serde_json::to_value(&dataset)?), true)
        }
    };

    let outcome = split::split_brands(&entries);
    write_json(&paths.valid_output, &Value::Array(outcome.valid))?;
    write_json(&paths.missing_output, &Value::Array(outcome.missing))?;

    if paths.cleaned_temp.is_file() {
        fs::remove_file(&paths.cleaned_temp)?;
    }

    Ok(FixSummary {
        used_fallback,
        unusual_terminators: report.unusual_count,
        stats: outcome.stats,
    })
}

/// Attempts a full-document parse of a brand file.
///
/// Returns `Ok(None)` on malformed JSON (the recoverable case); I/O
/// failures propagate. No partial parsing, no repair, no retry.
fn parse_brand_file(path: &Path) -> Result<Option<Value>, PipelineError> {
    let text = fs::read_to_string(path)?;
    match serde_json::from_str::<Value>(&text) {
        Ok(value) => {
            if let Some(brands) = value.as_array() {
                let device_count: usize = brands
                    .iter()
                    .filter_map(|b| b.get("devices").and_then(Value::as_array))
                    .map(Vec::len)
                    .sum();
                info!(
                    brands = brands.len(),
                    devices = device_count,
                    "valid JSON"
                );
            }
            Ok(Some(value))
        }
        Err(err) => {
            warn!(%err, path = %path.display(), "JSON parse failed");
            Ok(None)
        }
    }
}

/// Unwraps the expected top-level array; any other shape yields zero
/// entries, which the splitter reports as empty outputs.
fn as_entries(value: Value) -> Vec<Value> {
    match value {
        Value::Array(entries) => entries,
        other => {
            warn!(
                "expected a top-level array of brands, got {}",
                json_type_name(&other)
            );
            Vec::new()
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Runs the common-features stage.
///
/// A missing input is an error here; an input with zero devices logs a
/// warning and writes nothing.
pub fn run_common_features(paths: &FeaturePaths) -> Result<FeatureSummary, FeatureError> {
    if !paths.input.is_file() {
        return Err(FeatureError::InputNotFound(paths.input.clone()));
    }

    info!(input = %paths.input.display(), "analyzing common features");
    let text = fs::read_to_string(&paths.input)?;
    let value: Value = serde_json::from_str(&text)?;
    let Some(brands) = value.as_array() else {
        return Err(FeatureError::UnexpectedShape(
            json_type_name(&value).to_string(),
        ));
    };

    let empty = Map::new();
    let mut specs: Vec<&Map<String, Value>> = Vec::new();
    for brand in brands {
        let Some(devices) = brand.get("devices").and_then(Value::as_array) else {
            continue;
        };
        for device in devices {
            specs.push(
                device
                    .get("specifications")
                    .and_then(Value::as_object)
                    .unwrap_or(&empty),
            );
        }
    }

    if specs.is_empty() {
        warn!("no devices found");
        return Ok(FeatureSummary {
            device_count: 0,
            features: Vec::new(),
            wrote_output: false,
        });
    }
    info!(devices = specs.len(), "devices collected");

    let features = common_features(&specs);
    info!(common = features.len(), "common features found");
    for path in &features {
        info!(feature = %path);
    }

    write_json_feature(&paths.output, &serde_json::to_value(&features)?)?;
    info!(output = %paths.output.display(), "common features saved");

    Ok(FeatureSummary {
        device_count: specs.len(),
        features,
        wrote_output: true,
    })
}

fn write_json(path: &Path, value: &Value) -> Result<(), PipelineError> {
    create_parent(path)?;
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn write_json_feature(path: &Path, value: &Value) -> Result<(), FeatureError> {
    create_parent(path)?;
    fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}

fn create_parent(path: &Path) -> Result<(), std::io::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
