//! Settings loading from TOML files.
//!
//! The file is parsed into a generic value, merged over the serialized
//! [`Settings::default`], and only then deserialized. Keys missing from the
//! file therefore keep their defaults, while unknown keys are rejected.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use quark_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file("quark.toml").unwrap();
//! println!("binding {}", settings.bind_address);
//! ```

use std::path::Path;

use crate::error::QuarkError;
use crate::settings::Settings;

/// Loads settings from a TOML string.
///
/// # Errors
///
/// Returns [`QuarkError::ConfigurationError`] if the TOML is malformed or a
/// value has the wrong type.
pub fn from_toml_str(toml_str: &str) -> Result<Settings, QuarkError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| QuarkError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    let json_value = toml_to_json(toml_value);
    let default_json = serde_json::to_value(Settings::default()).map_err(|e| {
        QuarkError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    if let (Some(defaults), Some(overrides)) = (default_json.as_object(), json_value.as_object()) {
        if let Some(unknown) = overrides.keys().find(|k| !defaults.contains_key(*k)) {
            return Err(QuarkError::ConfigurationError(format!(
                "Unknown setting '{unknown}'"
            )));
        }
    }

    let merged = merge_json(default_json, json_value);
    serde_json::from_value(merged).map_err(|e| {
        QuarkError::ConfigurationError(format!("Failed to deserialize settings from TOML: {e}"))
    })
}

/// Loads settings from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the TOML is malformed.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Settings, QuarkError> {
    let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
        QuarkError::ConfigurationError(format!(
            "Failed to read TOML file '{}': {e}",
            path.as_ref().display()
        ))
    })?;
    from_toml_str(&content)
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => {
            let map: serde_json::Map<String, serde_json::Value> = table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect();
            serde_json::Value::Object(map)
        }
    }
}

/// Deep-merges two JSON values. The `override_val` takes precedence.
fn merge_json(base: serde_json::Value, override_val: serde_json::Value) -> serde_json::Value {
    match (base, override_val) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(override_map)) => {
            for (key, override_v) in override_map {
                let merged = if let Some(base_v) = base_map.remove(&key) {
                    merge_json(base_v, override_v)
                } else {
                    override_v
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, override_val) => override_val,
    }
}
