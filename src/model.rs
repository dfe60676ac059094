//! Data model for phone-brand/device records.
//!
//! Raw input is handled as loose `serde_json::Value`s so that malformed
//! entries can be classified instead of aborting the parse; the typed
//! structs here describe the well-formed wire shape and back the
//! hard-coded fallback dataset.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A top-level brand entry: a unique name and its devices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Brand {
    pub brand_name: String,
    pub devices: Vec<Device>,
}

/// A single phone model record with nested specification data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    pub model_name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    /// Arbitrarily nested mapping; leaf values are scalars. Depth and shape
    /// vary by device, so the mapping stays untyped.
    pub specifications: Map<String, Value>,
}

/// Returns true iff the device value carries a non-empty specifications
/// mapping. Anything else (absent key, null, non-object, empty object)
/// counts as missing.
pub fn device_has_specs(device: &Value) -> bool {
    matches!(device.get("specifications"), Some(Value::Object(map)) if !map.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_device_with_nested_specs_is_valid() {
        let device = json!({
            "model_name": "Galaxy S24",
            "imageUrl": "https://example.com/s24.jpg",
            "specifications": {"Network": {"Technology": "5G"}}
        });
        assert!(device_has_specs(&device));
    }

    #[test]
    fn test_empty_specs_is_missing() {
        let device = json!({"model_name": "X", "specifications": {}});
        assert!(!device_has_specs(&device));
    }

    #[test]
    fn test_absent_null_or_non_object_specs_is_missing() {
        assert!(!device_has_specs(&json!({"model_name": "X"})));
        assert!(!device_has_specs(&json!({"specifications": null})));
        assert!(!device_has_specs(&json!({"specifications": "5G"})));
        assert!(!device_has_specs(&json!({"specifications": [1, 2]})));
    }

    #[test]
    fn test_device_round_trips_wire_names() {
        let device: Device = serde_json::from_value(json!({
            "model_name": "Galaxy S24",
            "imageUrl": "https://example.com/s24.jpg",
            "specifications": {"Battery": {"Type": "4000 mAh"}}
        }))
        .unwrap();
        assert_eq!(device.image_url, "https://example.com/s24.jpg");

        let value = serde_json::to_value(&device).unwrap();
        assert!(value.get("imageUrl").is_some());
        assert!(value.get("image_url").is_none());
    }
}
