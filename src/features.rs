//! Key-path flattening and common-feature extraction.
//!
//! A specification mapping flattens to dotted key paths, one per key at
//! every depth; the common-feature set is the intersection of those path
//! sets across all devices.

use std::collections::BTreeSet;

use serde_json::{Map, Value};

/// Flattens a nested mapping into its set of dotted key paths.
///
/// Root-level keys emit their bare name; nested keys emit `parent.key`.
/// Mapping-valued keys are emitted and then descended into; arrays and
/// scalars emit their own path but are not walked.
pub fn flatten_keys(mapping: &Map<String, Value>) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    collect_paths(mapping, "", &mut paths);
    paths
}

fn collect_paths(mapping: &Map<String, Value>, prefix: &str, paths: &mut BTreeSet<String>) {
    for (key, value) in mapping {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{}.{}", prefix, key)
        };
        if let Value::Object(nested) = value {
            collect_paths(nested, &path, paths);
        }
        paths.insert(path);
    }
}

/// Computes the key paths present in every device's specifications,
/// lexicographically sorted.
///
/// An empty device list yields an empty result; the intersection over zero
/// sets is taken as empty here rather than universal.
pub fn common_features(specs: &[&Map<String, Value>]) -> Vec<String> {
    let mut iter = specs.iter();
    let Some(first) = iter.next() else {
        return Vec::new();
    };

    let mut common = flatten_keys(first);
    for mapping in iter {
        if common.is_empty() {
            break;
        }
        let paths = flatten_keys(mapping);
        common.retain(|path| paths.contains(path));
    }

    common.into_iter().collect()
}
