//! Argument validation shared by every command
//!
//! Checks run after tokenizing and before any action: exact positional
//! arity, then each declared value flag in declaration order.

use crate::cli::invocation::Invocation;
use crate::cli::registry::{CommandSpec, FLAG_NOTES, Requirement};
use crate::error::HoloError;
use regex::Regex;
use std::io::BufRead;
use std::sync::LazyLock;

/// Notes value that asks for notes on standard input
pub const STDIN_MARKER: &str = "-";

/// Line that ends notes read from standard input
pub const NOTES_TERMINATOR: &str = ".";

// Covers the force spellings (-f, -force, --f, --force) and every other
// dash-prefixed token; a lone "-" does not match.
#[expect(clippy::expect_used, reason = "pattern is a literal")]
static FLAG_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-+.+$").expect("valid flag token pattern"));

/// Run every check the command declares
///
/// # Errors
///
/// Returns the first failing check's error
pub fn check_invocation(spec: &CommandSpec, invocation: &Invocation) -> Result<(), HoloError> {
    check_arity(invocation, spec.arity)?;
    for (flag, requirement) in spec.value_flags() {
        match requirement {
            Requirement::Required => check_required_flag(invocation, flag.long)?,
            Requirement::Optional => check_optional_flag(invocation, flag.long)?,
        }
    }
    Ok(())
}

/// Fail unless exactly `expected` positional arguments were given
///
/// # Errors
///
/// Returns [`HoloError::ArgumentCount`] on any other count
pub fn check_arity(invocation: &Invocation, expected: usize) -> Result<(), HoloError> {
    let actual = invocation.positionals().len();
    if actual != expected {
        return Err(HoloError::ArgumentCount { expected, actual });
    }
    Ok(())
}

/// Fail unless `flag` was given with a usable value
///
/// # Errors
///
/// Returns [`HoloError::MissingFlag`] when the flag is absent, bare, empty,
/// or its value is itself a flag token
pub fn check_required_flag(invocation: &Invocation, flag: &str) -> Result<(), HoloError> {
    if invocation.is_bare(flag) {
        return Err(HoloError::flag_needs_argument(flag));
    }
    let value = invocation
        .value(flag)
        .ok_or_else(|| HoloError::flag_required(flag))?;
    if value.trim().is_empty() {
        return Err(HoloError::flag_needs_argument(flag));
    }
    check_flag_argument(flag, value)
}

/// Like [`check_required_flag`] but accepts an absent or empty flag
///
/// # Errors
///
/// Returns [`HoloError::MissingFlag`] when the flag is bare or its value is
/// itself a flag token
pub fn check_optional_flag(invocation: &Invocation, flag: &str) -> Result<(), HoloError> {
    if invocation.is_bare(flag) {
        return Err(HoloError::flag_needs_argument(flag));
    }
    match invocation.non_blank_value(flag) {
        None => Ok(()),
        Some(value) => check_flag_argument(flag, value),
    }
}

fn check_flag_argument(flag: &str, value: &str) -> Result<(), HoloError> {
    if looks_like_flag(value) {
        return Err(HoloError::flag_needs_argument(flag));
    }
    Ok(())
}

/// Whether a value is shaped like a flag token rather than an argument
#[must_use]
pub fn looks_like_flag(value: &str) -> bool {
    FLAG_TOKEN.is_match(value)
}

/// Gather release notes for `submit`
///
/// `--notes -` reads lines from `input` until a line that is exactly `.` or
/// end of input. Any other value is the single note line; an absent or
/// empty flag means no notes.
///
/// # Errors
///
/// Returns an error if reading from `input` fails
pub fn collect_notes(
    invocation: &Invocation,
    input: &mut dyn BufRead,
) -> Result<Vec<String>, HoloError> {
    match invocation.non_blank_value(FLAG_NOTES) {
        None => Ok(Vec::new()),
        Some(STDIN_MARKER) => read_notes(input),
        Some(value) => Ok(vec![value.to_owned()]),
    }
}

fn read_notes(input: &mut dyn BufRead) -> Result<Vec<String>, HoloError> {
    let mut notes = Vec::new();
    for line in input.lines() {
        let line = line
            .map_err(|e| HoloError::filesystem(format!("Failed to read notes from stdin: {e}")))?;
        let line = match line.strip_suffix('\r') {
            Some(stripped) => stripped.to_owned(),
            None => line,
        };
        if line == NOTES_TERMINATOR {
            break;
        }
        notes.push(line);
    }
    Ok(notes)
}

/// Split a comma-separated flag value such as `--train A,B`
///
/// # Errors
///
/// Returns [`HoloError::MissingFlag`] when the value names nothing
pub fn split_list(flag: &str, value: Option<&str>) -> Result<Vec<String>, HoloError> {
    let Some(value) = value else {
        return Ok(Vec::new());
    };
    let items: Vec<String> = value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect();
    if items.is_empty() {
        return Err(HoloError::flag_needs_argument(flag));
    }
    Ok(items)
}
