//! Display-name text handling.
//!
//! Display names in the file are small JSON text objects
//! (`{"text":"Nether Enter"}`). The editor works with the plain text.

use serde_json::Value;

/// Unwrap a JSON text object to its plain-text field.
///
/// Accepts both the object form and a bare JSON string; anything that
/// fails to parse yields `None` so callers can fall back to the raw value.
pub fn unwrap_text(raw: &str) -> Option<String> {
    match serde_json::from_str::<Value>(raw).ok()? {
        Value::Object(map) => map.get("text")?.as_str().map(str::to_owned),
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Unwrap a display-name field, falling back to the raw string when it is
/// not valid JSON text.
pub fn display_name(raw: &str) -> String {
    unwrap_text(raw).unwrap_or_else(|| raw.to_owned())
}

/// Wrap plain text back into the JSON text object form.
pub fn wrap_text(plain: &str) -> String {
    serde_json::json!({ "text": plain }).to_string()
}
