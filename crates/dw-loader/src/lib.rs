//! Level document loader for Darkwell.
//!
//! Parses a declarative level document (JSON or YAML) into the `dw-world`
//! model, validating structure, per-item capability combinations,
//! container/concealer nesting, and global room reachability along the way.
//! YAML input is converted to a JSON value and loaded through the same path,
//! so both formats share one set of rules and error messages.

pub mod build;
pub mod error;
pub mod reachability;
mod schema;
pub mod validate;

use std::fs;
use std::path::Path;

use dw_world::Level;

pub use error::LoaderError;
use schema::LevelDoc;

/// Load a level from a JSON document string.
pub fn load_json(input: &str) -> Result<Level, LoaderError> {
    let value: serde_json::Value = serde_json::from_str(input)
        .map_err(|err| LoaderError::InvalidDocument("JSON", err.to_string()))?;
    load_value(value)
}

/// Load a level from a YAML document string.
pub fn load_yaml(input: &str) -> Result<Level, LoaderError> {
    let value: serde_json::Value = serde_yaml::from_str(input)
        .map_err(|err| LoaderError::InvalidDocument("YAML", err.to_string()))?;
    load_value(value)
}

/// Load a level from an already-parsed JSON value.
pub fn load_value(value: serde_json::Value) -> Result<Level, LoaderError> {
    validate::validate_structure(&value)?;
    let doc: LevelDoc = serde_json::from_value(value)
        .map_err(|err| LoaderError::InvalidDocument("JSON", err.to_string()))?;
    let level = build::build_level(doc)?;
    reachability::validate(&level)?;
    Ok(level)
}

/// Load a level from a file, dispatching on the extension: `.yaml`/`.yml`
/// are parsed as YAML, everything else as JSON.
pub fn load_file(path: impl AsRef<Path>) -> Result<Level, LoaderError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    if is_yaml {
        load_yaml(&contents)
    } else {
        load_json(&contents)
    }
}
