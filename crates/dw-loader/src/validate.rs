//! Structural validation of the raw document, before shape parsing.
//!
//! Catches the cheap, high-signal authoring mistakes (missing name, no
//! rooms, misspelled top-level keys) with stable error messages before serde
//! gets a chance to produce its own.

use serde_json::Value;

use crate::error::LoaderError;

const REQUIRED_FIELDS: &[&str] = &["name"];

const ALLOWED_FIELDS: &[&str] = &[
    "name",
    "intro_narrative",
    "outro_narrative",
    "system_prompt_theme",
    "win_condition",
    "floors",
    "rooms",
    "doors",
    "enemies",
    "combo_items",
];

/// Validate the top-level structure of a raw level document.
pub fn validate_structure(value: &Value) -> Result<(), LoaderError> {
    let Some(map) = value.as_object() else {
        return Err(LoaderError::InvalidDocument(
            "JSON",
            "expected a top-level object".to_string(),
        ));
    };

    for field in REQUIRED_FIELDS {
        if !map.contains_key(*field) {
            return Err(LoaderError::MissingField((*field).to_string()));
        }
    }

    // Either the nested floors form or the legacy flat rooms form must exist.
    if !map.contains_key("floors") && !map.contains_key("rooms") {
        return Err(LoaderError::MissingField(
            "either 'floors' or 'rooms'".to_string(),
        ));
    }

    for field in map.keys() {
        if !ALLOWED_FIELDS.contains(&field.as_str()) {
            return Err(LoaderError::UnexpectedField(field.clone()));
        }
    }

    match map.get("name") {
        Some(Value::String(name)) if !name.is_empty() => {}
        _ => {
            return Err(LoaderError::EmptyField {
                field: "name".to_string(),
                expected: "string",
            });
        }
    }

    for field in ["floors", "rooms"] {
        if let Some(value) = map.get(field) {
            match value {
                Value::Array(entries) if !entries.is_empty() => {}
                _ => {
                    return Err(LoaderError::EmptyField {
                        field: field.to_string(),
                        expected: "array",
                    });
                }
            }
        }
    }

    Ok(())
}
