//! Valid/missing splitter for brand records.
//!
//! Partitions each brand's devices by whether they carry a non-empty
//! specifications mapping. Entries that do not match the expected brand
//! shape produce an explicit `Skipped` outcome instead of an error, so
//! callers can count or log drops; the pipeline's default is to ignore
//! them.

use std::collections::HashMap;

use serde_json::{json, Value};
use tracing::{debug, info};

use crate::model::device_has_specs;

/// Why a top-level entry was skipped instead of split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The entry is not a JSON object.
    NotAnObject,
    /// `brand_name` is absent, not a string, or empty.
    MissingBrandName,
    /// `devices` is present but not an array.
    DevicesNotAList,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SkipReason::NotAnObject => "NotAnObject",
            SkipReason::MissingBrandName => "MissingBrandName",
            SkipReason::DevicesNotAList => "DevicesNotAList",
        };
        write!(f, "{}", name)
    }
}

/// Classification result for one top-level entry.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    /// A well-formed brand, devices partitioned by specification presence.
    Brand {
        brand_name: String,
        valid: Vec<Value>,
        missing: Vec<Value>,
    },
    /// A malformed entry; not counted toward device totals.
    Skipped(SkipReason),
}

/// Aggregate counters for one split pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitStats {
    pub valid_devices: u64,
    pub missing_devices: u64,
    pub valid_brands: usize,
    pub missing_brands: usize,
    pub skipped_entries: u64,
}

/// The two output brand lists plus counters.
#[derive(Debug, Clone)]
pub struct SplitOutcome {
    /// Brands holding only their specification-bearing devices.
    pub valid: Vec<Value>,
    /// Brands holding only their specification-less devices.
    pub missing: Vec<Value>,
    pub stats: SplitStats,
}

/// Classifies a single top-level entry.
pub fn classify_brand(entry: &Value) -> RecordOutcome {
    let Some(obj) = entry.as_object() else {
        return RecordOutcome::Skipped(SkipReason::NotAnObject);
    };

    let brand_name = match obj.get("brand_name").and_then(Value::as_str) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => return RecordOutcome::Skipped(SkipReason::MissingBrandName),
    };

    // Absent devices means an empty list; a present non-array is malformed.
    let devices: &[Value] = match obj.get("devices") {
        None => &[],
        Some(Value::Array(list)) => list,
        Some(_) => return RecordOutcome::Skipped(SkipReason::DevicesNotAList),
    };

    let mut valid = Vec::new();
    let mut missing = Vec::new();
    for device in devices {
        if device_has_specs(device) {
            valid.push(device.clone());
        } else {
            missing.push(device.clone());
        }
    }

    RecordOutcome::Brand {
        brand_name,
        valid,
        missing,
    }
}

/// Splits a list of brand entries into valid and missing brand lists.
///
/// Brand names are unique per output; a duplicate brand name replaces the
/// earlier entry's devices while keeping its original position. Encounter
/// order of brands and relative device order are preserved.
pub fn split_brands(entries: &[Value]) -> SplitOutcome {
    let mut valid_brands: Vec<(String, Vec<Value>)> = Vec::new();
    let mut missing_brands: Vec<(String, Vec<Value>)> = Vec::new();
    let mut valid_index: HashMap<String, usize> = HashMap::new();
    let mut missing_index: HashMap<String, usize> = HashMap::new();
    let mut stats = SplitStats::default();

    for entry in entries {
        match classify_brand(entry) {
            RecordOutcome::Brand {
                brand_name,
                valid,
                missing,
            } => {
                stats.valid_devices += valid.len() as u64;
                stats.missing_devices += missing.len() as u64;
                if !valid.is_empty() {
                    upsert(&mut valid_brands, &mut valid_index, &brand_name, valid);
                }
                if !missing.is_empty() {
                    upsert(&mut missing_brands, &mut missing_index, &brand_name, missing);
                }
            }
            RecordOutcome::Skipped(reason) => {
                stats.skipped_entries += 1;
                debug!(%reason, "skipping malformed brand entry");
            }
        }
    }

    stats.valid_brands = valid_brands.len();
    stats.missing_brands = missing_brands.len();

    info!(
        valid_devices = stats.valid_devices,
        missing_devices = stats.missing_devices,
        valid_brands = stats.valid_brands,
        missing_brands = stats.missing_brands,
        skipped_entries = stats.skipped_entries,
        "split complete"
    );

    SplitOutcome {
        valid: to_brand_values(valid_brands),
        missing: to_brand_values(missing_brands),
        stats,
    }
}

fn upsert(
    brands: &mut Vec<(String, Vec<Value>)>,
    index: &mut HashMap<String, usize>,
    name: &str,
    devices: Vec<Value>,
) {
    if let Some(&pos) = index.get(name) {
        brands[pos].1 = devices;
    } else {
        index.insert(name.to_string(), brands.len());
        brands.push((name.to_string(), devices));
    }
}

fn to_brand_values(brands: Vec<(String, Vec<Value>)>) -> Vec<Value> {
    brands
        .into_iter()
        .map(|(brand_name, devices)| json!({"brand_name": brand_name, "devices": devices}))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn brand(name: &str, devices: Vec<Value>) -> Value {
        json!({"brand_name": name, "devices": devices})
    }

    fn device(model: &str, specs: Value) -> Value {
        json!({"model_name": model, "imageUrl": "", "specifications": specs})
    }

    #[test]
    fn test_classify_routes_by_spec_presence() {
        let entry = brand(
            "Acme",
            vec![
                device("one", json!({"Network": {"Technology": "5G"}})),
                device("two", json!({})),
            ],
        );

        match classify_brand(&entry) {
            RecordOutcome::Brand { valid, missing, .. } => {
                assert_eq!(valid.len(), 1);
                assert_eq!(missing.len(), 1);
                assert_eq!(valid[0]["model_name"], "one");
                assert_eq!(missing[0]["model_name"], "two");
            }
            other => panic!("expected brand outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_skips_malformed_entries() {
        assert_eq!(
            classify_brand(&json!("not an object")),
            RecordOutcome::Skipped(SkipReason::NotAnObject)
        );
        assert_eq!(
            classify_brand(&json!({"devices": []})),
            RecordOutcome::Skipped(SkipReason::MissingBrandName)
        );
        assert_eq!(
            classify_brand(&json!({"brand_name": "", "devices": []})),
            RecordOutcome::Skipped(SkipReason::MissingBrandName)
        );
        assert_eq!(
            classify_brand(&json!({"brand_name": "Acme", "devices": "oops"})),
            RecordOutcome::Skipped(SkipReason::DevicesNotAList)
        );
    }

    #[test]
    fn test_classify_absent_devices_is_empty_brand() {
        match classify_brand(&json!({"brand_name": "Acme"})) {
            RecordOutcome::Brand { valid, missing, .. } => {
                assert!(valid.is_empty());
                assert!(missing.is_empty());
            }
            other => panic!("expected brand outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_split_conserves_device_counts() {
        let entries = vec![
            brand(
                "A",
                vec![
                    device("a1", json!({"Memory": {"Internal": "128GB"}})),
                    device("a2", json!(null)),
                ],
            ),
            brand("B", vec![device("b1", json!({"Battery": "4000 mAh"}))]),
            json!(42), // malformed, contributes zero
        ];

        let outcome = split_brands(&entries);
        assert_eq!(outcome.stats.valid_devices + outcome.stats.missing_devices, 3);
        assert_eq!(outcome.stats.skipped_entries, 1);
    }

    #[test]
    fn test_brand_with_mixed_devices_appears_in_both_outputs() {
        let entries = vec![brand(
            "Mixed",
            vec![
                device("ok", json!({"Network": {"Technology": "5G"}})),
                device("empty", json!({})),
            ],
        )];

        let outcome = split_brands(&entries);
        assert_eq!(outcome.valid.len(), 1);
        assert_eq!(outcome.missing.len(), 1);
        assert_eq!(outcome.valid[0]["brand_name"], "Mixed");
        assert_eq!(outcome.missing[0]["brand_name"], "Mixed");
        assert_eq!(outcome.stats.valid_brands, 1);
        assert_eq!(outcome.stats.missing_brands, 1);
    }

    #[test]
    fn test_split_preserves_encounter_and_device_order() {
        let entries = vec![
            brand("Z", vec![device("z1", json!({"a": 1}))]),
            brand(
                "A",
                vec![
                    device("a1", json!({"a": 1})),
                    device("a2", json!({"b": 2})),
                ],
            ),
        ];

        let outcome = split_brands(&entries);
        assert_eq!(outcome.valid[0]["brand_name"], "Z");
        assert_eq!(outcome.valid[1]["brand_name"], "A");
        let devices = outcome.valid[1]["devices"].as_array().unwrap();
        assert_eq!(devices[0]["model_name"], "a1");
        assert_eq!(devices[1]["model_name"], "a2");
    }

    #[test]
    fn test_brand_with_no_devices_appears_in_neither_output() {
        let outcome = split_brands(&[brand("Empty", vec![])]);
        assert!(outcome.valid.is_empty());
        assert!(outcome.missing.is_empty());
        assert_eq!(outcome.stats.skipped_entries, 0);
    }
}
