//! Shape checks for the two stored documents

use serde_json::Value;

use crate::types::{AppConfig, WireEvent};

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `events.json` must be an array of event objects
pub fn decode_events(value: Value) -> Result<Vec<WireEvent>, String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                serde_json::from_value(item).map_err(|e| format!("invalid event at index {}: {}", i, e))
            })
            .collect(),
        other => Err(format!("expected a JSON array, found {}", json_type_name(&other))),
    }
}

/// `appConfig.json` must be an object; unknown keys are ignored
pub fn decode_config(value: Value) -> Result<AppConfig, String> {
    match value {
        Value::Object(_) => serde_json::from_value(value).map_err(|e| format!("invalid config: {}", e)),
        other => Err(format!("expected a JSON object, found {}", json_type_name(&other))),
    }
}
