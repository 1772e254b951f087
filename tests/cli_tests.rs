//! CLI interface tests

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// `holo` isolated from the developer's own configuration
fn holo(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("holo").unwrap();
    cmd.env("XDG_CONFIG_HOME", home.path())
        .env("HOME", home.path())
        .env_remove("HOLO_CONFIG")
        .env_remove("HOLO_USER")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version_flag() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("holo"));
}

#[test]
fn test_help_flag() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("a tool for managing device software builds"))
        .stdout(predicate::str::contains("artifacts"))
        .stdout(predicate::str::contains("submit"));
}

#[test]
fn test_bare_invocation_shows_help() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .assert()
        .success()
        .stdout(predicate::str::contains("COMMANDS:"));
}

#[test]
fn test_bare_group_shows_group_help() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .arg("artifacts")
        .assert()
        .success()
        .stdout(predicate::str::contains("upload artifacts for a release"))
        .stdout(predicate::str::contains("download artifacts for a release"));
}

#[test]
fn test_unknown_command() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .arg("frobnicate")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains(
            "Incorrect Usage: No matching command 'frobnicate'",
        ))
        .stdout(predicate::str::contains("COMMANDS:"))
        .stdout(predicate::str::contains("###").not());
}

#[test]
fn test_artifacts_get_preview() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["artifacts", "get", "foo.tar.gz", "/tmp/out", "--release", "R1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "### holo artifacts get FILENAME DESTINATION --release RELEASE ###",
        ))
        .stdout(predicate::str::contains("FILENAME: foo.tar.gz"))
        .stdout(predicate::str::contains("DESTINATION: /tmp/out"))
        .stdout(predicate::str::contains("release: R1"));
}

#[test]
fn test_missing_required_flag() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["artifacts", "put", "foo.tar.gz"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains(
            "Incorrect Usage: --release flag is required!",
        ))
        .stdout(predicate::str::contains("holo artifacts put FILENAME"));
}

#[test]
fn test_required_flag_followed_by_force() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["artifacts", "put", "foo.tar.gz", "--release", "-f"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("--release flag requires an argument"));
}

#[test]
fn test_required_flag_with_force_token_value() {
    let home = TempDir::new().unwrap();
    for value in ["--release=-f", "--release=--force", "--release=-force"] {
        holo(&home)
            .args(["artifacts", "put", "foo.tar.gz", value])
            .assert()
            .failure()
            .code(2)
            .stdout(predicate::str::contains("--release flag requires an argument"));
    }
}

#[test]
fn test_required_flag_given_last_without_value() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["which", "osd", "--release"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("--release flag requires an argument"));
}

#[test]
fn test_required_flag_followed_by_unknown_flag() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["which", "osd", "--release", "--bogus"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains(
            "Incorrect Usage: --release flag requires an argument!",
        ))
        .stdout(predicate::str::contains("holo which COMPONENT --release RELEASE"));

    holo(&home)
        .args(["artifacts", "put", "f", "--release", "-x"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains(
            "Incorrect Usage: --release flag requires an argument!",
        ))
        .stdout(predicate::str::contains("holo artifacts put FILENAME"));
}

#[test]
fn test_optional_flag_with_empty_value_is_ignored() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["releases", "cut", "Thundercat1A1", "--base", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("RELEASE: Thundercat1A1"))
        .stdout(predicate::str::contains("base: \n"));

    holo(&home)
        .args(["submit", "osd-38", ".", "--train", ""])
        .assert()
        .success()
        .stdout(predicate::str::contains("train: \n"));
}

#[test]
fn test_optional_flag_given_bare() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["releases", "cut", "Thundercat1A1", "--base"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains(
            "Incorrect Usage: --base flag requires an argument!",
        ));
}

#[test]
fn test_wrong_argument_count() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["artifacts", "get", "foo.tar.gz", "--release", "R1"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains(
            "incorrect number of arguments (expected 2, got 1)",
        ));

    holo(&home)
        .args(["trains", "ls", "extra"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("expected 0, got 1"));
}

#[test]
fn test_submit_notes_from_stdin() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["submit", "osd-38", ".", "--notes", "-"])
        .write_stdin("a\nb\n.\nignored\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("notes:\n  a\n  b\n"))
        .stdout(predicate::str::contains("ignored").not());
}

#[test]
fn test_submit_inline_notes() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["submit", "osd-38", ".", "--notes", "quick fix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("notes: quick fix"));
}

#[test]
fn test_single_dash_long_flags() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["revert", "osd-36", "-train", "Thundercat,ThundercatDeuce", "-force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("train: Thundercat,ThundercatDeuce"))
        .stdout(predicate::str::contains("force: true"));
}

#[test]
fn test_malformed_submission() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["notes", "osd"])
        .assert()
        .failure()
        .code(2)
        .stdout(predicate::str::contains("Incorrect Usage: invalid submission 'osd'"));
}

#[test]
fn test_submitter_comes_from_config() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("holo.yaml");
    fs::write(&config_path, "user: steve@example.com\n").unwrap();

    holo(&home)
        .arg("--config")
        .arg(&config_path)
        .args(["submit", "osd-38", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("submitter: steve@example.com"));

    holo(&home)
        .env("HOLO_CONFIG", &config_path)
        .env("HOLO_USER", "dana@example.com")
        .args(["submit", "osd-38", "."])
        .assert()
        .success()
        .stdout(predicate::str::contains("submitter: dana@example.com"));
}

#[test]
fn test_missing_config_error() {
    let home = TempDir::new().unwrap();
    holo(&home)
        .args(["--config", "nonexistent.yaml", "submit", "osd-38", "."])
        .assert()
        .failure()
        .code(3)
        .stdout(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_invalid_config_key() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("holo.yaml");
    fs::write(&config_path, "user: steve@example.com\ncolour: blue\n").unwrap();

    holo(&home)
        .arg("--config")
        .arg(&config_path)
        .args(["submit", "osd-38", "."])
        .assert()
        .failure()
        .code(3)
        .stdout(predicate::str::contains("Configuration error"));
}

#[test]
fn test_broken_config_only_affects_submit() {
    let home = TempDir::new().unwrap();
    let config_path = home.path().join("holo.yaml");
    fs::write(&config_path, "user: [steve\n").unwrap();

    holo(&home)
        .arg("--config")
        .arg(&config_path)
        .args(["trains", "ls"])
        .assert()
        .success()
        .stdout("### holo trains ls ###\n");

    holo(&home)
        .env("HOLO_CONFIG", &config_path)
        .args(["submit", "osd-38", "."])
        .assert()
        .failure()
        .code(3);
}
