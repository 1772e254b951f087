//! YAML configuration loading and parsing

use crate::config::HoloConfig;
use crate::error::HoloError;
use crate::system::System;
use serde_json::Value;
use std::path::Path;

/// Load and parse YAML configuration from file
///
/// # Errors
///
/// Returns an error if the file is missing or unreadable, is not valid YAML,
/// or fails schema or logic validation
pub fn load_config(system: &dyn System, path: &Path) -> Result<HoloConfig, HoloError> {
    if !system.exists(path) {
        return Err(HoloError::configuration(format!(
            "Configuration file not found: {}\n\
            Create the file or specify a different path with --config",
            path.display()
        )));
    }

    let content = system.read_to_string(path).map_err(|e| {
        HoloError::configuration(format!(
            "Failed to read configuration file {}: {e}",
            path.display()
        ))
    })?;

    parse_config(&content).map_err(|e| match e {
        HoloError::Configuration { message } => {
            HoloError::configuration(format!("{message} (in {})", path.display()))
        }
        other => other,
    })
}

/// Parse configuration from YAML text
///
/// The raw document is checked against the schema before it is bound to
/// [`HoloConfig`], so unknown keys are reported rather than dropped.
///
/// # Errors
///
/// Returns an error if the text is not valid YAML or fails validation
pub fn parse_config(content: &str) -> Result<HoloConfig, HoloError> {
    if content.trim().is_empty() {
        return Ok(HoloConfig::default());
    }

    let document: Value = serde_yaml::from_str(content)
        .map_err(|e| HoloError::configuration(format!("Failed to parse YAML: {e}")))?;

    crate::config::schema::validate_against_schema(&document)?;

    let config: HoloConfig = serde_json::from_value(document)
        .map_err(|e| HoloError::configuration(format!("Invalid configuration: {e}")))?;

    crate::config::validation::validate_config(&config)?;

    Ok(config)
}
