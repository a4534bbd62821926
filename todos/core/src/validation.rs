//! Validation of raw todo request bodies.
//!
//! Bodies are checked as untyped JSON so that a wrong type on a field is
//! reported as a readable message instead of a deserialization failure.

use serde_json::Value;

pub const TEXT_REQUIRED: &str = "Todo text is required and must be a non-empty string";
pub const COLOR_NOT_STRING: &str = "Todo color must be a string";
pub const IS_MARKED_NOT_BOOLEAN: &str = "isMarked must be a boolean";

/// Checks a create or update body and returns every rule it breaks.
///
/// An empty list means the body is valid. Unknown fields are ignored, and a
/// `null` color is treated as absent.
pub fn validate_todo_input(input: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let text_is_valid = input
        .get("text")
        .and_then(Value::as_str)
        .is_some_and(|text| !text.trim().is_empty());
    if !text_is_valid {
        errors.push(TEXT_REQUIRED.to_string());
    }

    if let Some(color) = input.get("color") {
        if !color.is_null() && !color.is_string() {
            errors.push(COLOR_NOT_STRING.to_string());
        }
    }

    if let Some(is_marked) = input.get("isMarked") {
        if !is_marked.is_boolean() {
            errors.push(IS_MARKED_NOT_BOOLEAN.to_string());
        }
    }

    errors
}
