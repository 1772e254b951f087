//! Configuration parsing and validation tests

use holo::config::yaml::parse_config;
use holo::config::{CONFIG_ENV, HoloConfig, USER_ENV};
use holo::error::HoloError;
use holo::system::{MockSystem, RealSystem};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

#[test]
fn test_valid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, "user: steve@example.com\n").unwrap();

    let system = RealSystem::new();
    let config = HoloConfig::load_from_file(&system, &config_path).unwrap();
    assert_eq!(config.user.as_deref(), Some("steve@example.com"));
}

#[test]
fn test_empty_config_is_default() {
    assert_eq!(parse_config("").unwrap(), HoloConfig::default());
    assert_eq!(parse_config("user: null\n").unwrap(), HoloConfig::default());
}

#[test]
fn test_schema_rejects_unknown_keys() {
    let err = parse_config("user: steve@example.com\nowner: dana@example.com\n").unwrap_err();
    assert!(matches!(err, HoloError::Configuration { .. }));
    assert_eq!(err.exit_code(), 3);
}

#[test]
fn test_schema_rejects_wrong_types() {
    let err = parse_config("user: 42\n").unwrap_err();
    assert!(matches!(err, HoloError::Configuration { .. }));
}

#[test]
fn test_invalid_yaml() {
    let err = parse_config("user: [steve\n").unwrap_err();
    assert!(err.to_string().contains("Failed to parse YAML"));
}

#[test]
fn test_user_must_be_an_email() {
    let err = parse_config("user: steve\n").unwrap_err();
    assert!(matches!(err, HoloError::Configuration { .. }));
    assert!(err.to_string().contains("invalid email address 'steve'"));
}

#[test]
fn test_resolve_prefers_explicit_path() {
    let system = MockSystem::new()
        .with_file("/etc/holo.yaml", b"user: explicit@example.com\n")
        .unwrap()
        .with_file("/env/holo.yaml", b"user: env@example.com\n")
        .unwrap()
        .with_env(CONFIG_ENV, "/env/holo.yaml")
        .unwrap();

    let config = HoloConfig::resolve(&system, Some(Path::new("/etc/holo.yaml"))).unwrap();
    assert_eq!(config.user.as_deref(), Some("explicit@example.com"));

    let config = HoloConfig::resolve(&system, None).unwrap();
    assert_eq!(config.user.as_deref(), Some("env@example.com"));
}

#[test]
fn test_resolve_uses_default_location() {
    let system = MockSystem::new()
        .with_config_dir("/home/steve/.config")
        .unwrap()
        .with_file(
            "/home/steve/.config/holo/config.yaml",
            b"user: steve@example.com\n",
        )
        .unwrap();

    let config = HoloConfig::resolve(&system, None).unwrap();
    assert_eq!(config.user.as_deref(), Some("steve@example.com"));
}

#[test]
fn test_missing_default_file_is_not_an_error() {
    let system = MockSystem::new().with_config_dir("/home/steve/.config").unwrap();
    let config = HoloConfig::resolve(&system, None).unwrap();
    assert_eq!(config, HoloConfig::default());
}

#[test]
fn test_missing_explicit_file_is_an_error() {
    let system = MockSystem::new();
    let err = HoloConfig::resolve(&system, Some(Path::new("/nope.yaml"))).unwrap_err();
    assert!(err.to_string().contains("Configuration file not found: /nope.yaml"));

    let system = MockSystem::new().with_env(CONFIG_ENV, "/nope.yaml").unwrap();
    assert!(HoloConfig::resolve(&system, None).is_err());
}

#[test]
fn test_user_env_overrides_file() {
    let system = MockSystem::new()
        .with_file("/etc/holo.yaml", b"user: steve@example.com\n")
        .unwrap()
        .with_env(USER_ENV, "dana@example.com")
        .unwrap();
    let config = HoloConfig::resolve(&system, Some(Path::new("/etc/holo.yaml"))).unwrap();
    assert_eq!(config.user.as_deref(), Some("dana@example.com"));

    let system = MockSystem::new().with_env(USER_ENV, "dana").unwrap();
    let err = HoloConfig::resolve(&system, None).unwrap_err();
    assert!(matches!(err, HoloError::Configuration { .. }));
}
