//! JSON Schema validation for holo configuration

use crate::error::HoloError;
use jsonschema::{Draft, Validator};
use serde_json::Value;

/// Get the embedded JSON schema for holo configuration
///
/// # Errors
///
/// Returns an error if the embedded schema cannot be parsed or compiled
pub fn get_schema() -> Result<Validator, HoloError> {
    let schema_str = include_str!("../../docs/schema.json");
    let schema: Value = serde_json::from_str(schema_str).map_err(|e| {
        HoloError::configuration(format!("Failed to parse embedded JSON schema: {e}"))
    })?;

    jsonschema::options()
        .with_draft(Draft::Draft7)
        .build(&schema)
        .map_err(|e| HoloError::configuration(format!("Failed to compile JSON schema: {e}")))
}

/// Validate a configuration value against the schema
///
/// # Errors
///
/// Returns an error listing every schema violation
pub fn validate_against_schema(config: &Value) -> Result<(), HoloError> {
    let schema = get_schema()?;

    let error_messages: Vec<String> = schema
        .iter_errors(config)
        .map(|e| format!("  - {e}"))
        .collect();

    if error_messages.is_empty() {
        return Ok(());
    }

    Err(HoloError::configuration(format!(
        "Configuration validation failed:\n{}",
        error_messages.join("\n")
    )))
}
