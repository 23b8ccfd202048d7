//! Argument extraction helpers shared by every tool module.
//!
//! Tool arguments arrive as a `serde_json::Map`. Identifier parameters accept
//! either a JSON string or a number and are normalized to path-segment
//! strings, matching what callers actually send.

use serde_json::{Map, Value as JsonValue};

use crate::error::{McpError, Result};

/// Helper to get a required string argument from JSON arguments.
pub fn get_string_arg(args: &Map<String, JsonValue>, name: &str) -> Result<String> {
    args.get(name)
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
        .ok_or_else(|| McpError::MissingArg(name.to_string()))
}

/// Helper to get an optional string argument from JSON arguments.
pub fn get_optional_string(args: &Map<String, JsonValue>, name: &str) -> Option<String> {
    args.get(name).and_then(|v| v.as_str()).map(|s| s.to_string())
}

/// Normalize an id value to a path-segment string.
///
/// Accepts strings (stray quote characters stripped) and numbers.
pub fn format_id(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.trim().trim_matches('"').trim_matches('\'').to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Helper to get a required id argument, accepting string or number.
pub fn get_id_arg(args: &Map<String, JsonValue>, name: &str) -> Result<String> {
    let value = args
        .get(name)
        .ok_or_else(|| McpError::MissingArg(name.to_string()))?;
    format_id(value).ok_or_else(|| McpError::InvalidArg {
        name: name.to_string(),
        reason: "expected a string or number id".to_string(),
    })
}

/// Helper to get an optional u64 argument from JSON arguments.
pub fn get_optional_u64(args: &Map<String, JsonValue>, name: &str) -> Option<u64> {
    args.get(name).and_then(|v| v.as_u64())
}

/// Helper to get an optional boolean argument.
pub fn get_optional_bool(args: &Map<String, JsonValue>, name: &str) -> Option<bool> {
    args.get(name).and_then(|v| v.as_bool())
}

/// Helper to get a required raw JSON value argument.
pub fn get_value_arg(args: &Map<String, JsonValue>, name: &str) -> Result<JsonValue> {
    args.get(name)
        .cloned()
        .ok_or_else(|| McpError::MissingArg(name.to_string()))
}

/// Helper to get a required array argument.
pub fn get_array_arg(args: &Map<String, JsonValue>, name: &str) -> Result<Vec<JsonValue>> {
    args.get(name)
        .and_then(|v| v.as_array())
        .cloned()
        .ok_or_else(|| McpError::MissingArg(name.to_string()))
}
