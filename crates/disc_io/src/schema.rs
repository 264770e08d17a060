//! JSON Schema validation of the scoring configuration asset (draft-07).
//!
//! The schema ships inside the crate and is compiled once per process.

use std::sync::OnceLock;

use jsonschema::{Draft, JSONSchema};
use serde_json::Value;

use crate::IoError;

/// Embedded schema text.
pub const SCORING_CONFIG_SCHEMA: &str = include_str!("../schemas/scoring_config.schema.json");

fn compiled() -> Result<&'static JSONSchema, IoError> {
    static SCHEMA: OnceLock<Result<JSONSchema, String>> = OnceLock::new();
    SCHEMA
        .get_or_init(|| {
            let raw: Value = serde_json::from_str(SCORING_CONFIG_SCHEMA).map_err(|e| e.to_string())?;
            JSONSchema::options()
                .with_draft(Draft::Draft7)
                .compile(&raw)
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map_err(|msg| IoError::Schema(format!("embedded schema failed to compile: {msg}")))
}

/// Validate `v` against the scoring configuration schema. Reports the first
/// violation with its instance pointer.
pub fn validate_value(v: &Value) -> Result<(), IoError> {
    let schema = compiled()?;
    if let Err(mut errors) = schema.validate(v) {
        if let Some(first) = errors.next() {
            let pointer = first.instance_path.to_string();
            let pointer = if pointer.is_empty() { "/".to_string() } else { pointer };
            return Err(IoError::Schema(format!("{pointer}: {first}")));
        }
        return Err(IoError::Schema("validation failed".into()));
    }
    Ok(())
}
