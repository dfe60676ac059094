//! Hard-coded safe dataset used when the primary input is absent or
//! unrecoverably malformed.

use std::fs;
use std::path::Path;

use serde_json::{json, Map, Value};
use tracing::info;

use crate::error::PipelineError;
use crate::model::{Brand, Device};

/// Builds the minimal guaranteed-valid dataset: one brand, one device,
/// non-empty specifications.
pub fn safe_dataset() -> Vec<Brand> {
    let specs = json!({
        "Network": {"Technology": "5G"},
        "Platform": {"OS": "Android 14"},
        "Memory": {"Internal": "256GB 8GB RAM"},
        "Battery": {"Type": "4000 mAh"},
        "Misc": {"Price": "$999", "Colors": "Black, Gray"}
    });
    let specifications = match specs {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    vec![Brand {
        brand_name: "Samsung".to_string(),
        devices: vec![Device {
            model_name: "Galaxy S24".to_string(),
            image_url: "https://fdn2.gsmarena.com/vv/bigpic/samsung-galaxy-s24.jpg".to_string(),
            specifications,
        }],
    }]
}

/// Writes the safe dataset to `path` pretty-printed and returns it, so the
/// caller can continue without re-reading the file.
pub fn write_safe_dataset(path: &Path) -> Result<Vec<Brand>, PipelineError> {
    let dataset = safe_dataset();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, serde_json::to_string_pretty(&dataset)?)?;
    info!(path = %path.display(), "safe dataset written");
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_dataset_satisfies_schema() {
        let dataset = safe_dataset();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset[0].brand_name, "Samsung");
        assert_eq!(dataset[0].devices.len(), 1);
        assert!(!dataset[0].devices[0].specifications.is_empty());
    }

    #[test]
    fn test_write_safe_dataset_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("safe_phones.json");

        let written = write_safe_dataset(&path).unwrap();
        let read: Vec<Brand> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(read, written);
    }

    #[test]
    fn test_write_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("safe_phones.json");

        write_safe_dataset(&path).unwrap();
        assert!(path.is_file());
    }
}
