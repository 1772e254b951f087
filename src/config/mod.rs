//! Configuration management module
//!
//! Handles YAML configuration parsing, JSON schema validation, and the
//! environment overrides layered on top of the file.

pub mod schema;
pub mod validation;
pub mod yaml;

use crate::error::HoloError;
use crate::system::System;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Environment variable naming an explicit configuration file
pub const CONFIG_ENV: &str = "HOLO_CONFIG";

/// Environment variable overriding the configured user
pub const USER_ENV: &str = "HOLO_USER";

/// Location of the per-user configuration file, relative to the config dir
pub const DEFAULT_CONFIG_FILE: &str = "holo/config.yaml";

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoloConfig {
    /// Email recorded as submitter of new submissions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

impl HoloConfig {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or is invalid
    pub fn load_from_file(system: &dyn System, path: &Path) -> Result<Self, HoloError> {
        yaml::load_config(system, path)
    }

    /// Resolve and load the configuration for this invocation
    ///
    /// An explicit path (from `--config`, then `HOLO_CONFIG`) must exist; the
    /// per-user default file is optional. `HOLO_USER` overrides `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing, any file is invalid,
    /// or `HOLO_USER` is not an email address
    pub fn resolve(system: &dyn System, explicit: Option<&Path>) -> Result<Self, HoloError> {
        let from_env = system.env_var(CONFIG_ENV).ok().map(PathBuf::from);

        let mut config = match explicit.map(Path::to_path_buf).or(from_env) {
            Some(path) => {
                debug!("Loading configuration from {}", path.display());
                Self::load_from_file(system, &path)?
            }
            None => match default_config_path(system) {
                Some(path) if system.exists(&path) => {
                    debug!("Loading configuration from {}", path.display());
                    Self::load_from_file(system, &path)?
                }
                _ => {
                    debug!("No configuration file, using defaults");
                    Self::default()
                }
            },
        };

        if let Ok(user) = system.env_var(USER_ENV) {
            validation::validate_email(&user)
                .map_err(|e| HoloError::configuration(format!("{USER_ENV}: {e}")))?;
            config.user = Some(user);
        }

        Ok(config)
    }
}

/// Per-user configuration file path, if the platform has a config dir
#[must_use]
pub fn default_config_path(system: &dyn System) -> Option<PathBuf> {
    system
        .config_dir()
        .map(|dir| dir.join(DEFAULT_CONFIG_FILE))
}
