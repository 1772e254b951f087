//! Configuration and name validation logic

use crate::config::HoloConfig;
use crate::error::HoloError;
use regex::Regex;
use std::sync::LazyLock;

#[expect(clippy::expect_used, reason = "pattern is a literal")]
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._+\-]*$").expect("valid name pattern"));

#[expect(clippy::expect_used, reason = "pattern is a literal")]
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email pattern"));

/// Validate a loaded configuration
///
/// # Errors
///
/// Returns an error if the configured user is not an email address
#[inline]
pub fn validate_config(config: &HoloConfig) -> Result<(), HoloError> {
    if let Some(user) = config.user.as_ref() {
        validate_email(user).map_err(|e| HoloError::configuration(format!("user: {e}")))?;
    }
    Ok(())
}

/// Validate a component or train name
///
/// # Errors
///
/// Returns an error if the name is empty or contains characters other than
/// letters, digits, `.`, `_`, `+` and `-`
#[inline]
pub fn validate_name(kind: &str, name: &str) -> Result<(), HoloError> {
    if NAME_PATTERN.is_match(name) {
        return Ok(());
    }
    Err(HoloError::invalid_argument(format!(
        "invalid {kind} name '{name}': use letters, digits, '.', '_', '+' or '-'"
    )))
}

/// Validate an owner or submitter email address
///
/// # Errors
///
/// Returns an error if the value is not shaped like `user@host.domain`
#[inline]
pub fn validate_email(email: &str) -> Result<(), HoloError> {
    if EMAIL_PATTERN.is_match(email) {
        return Ok(());
    }
    Err(HoloError::invalid_argument(format!(
        "invalid email address '{email}'"
    )))
}
