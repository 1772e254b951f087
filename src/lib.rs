//! `holo` - a command-line tool for managing device software builds
//!
//! Commands coordinate software components, build trains, releases,
//! submissions and release artifacts. The binary validates every command
//! line and prints a preview of the request; [`catalog::Catalog`] is an
//! in-memory [`catalog::ReleaseManager`] that requests can run against.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod operations;
pub mod system;
pub mod utils;

use anyhow::{Context as _, Result};
use cli::{Cli, Run};
use config::HoloConfig;
use error::HoloError;
use operations::{Request, render_preview};
use std::io::{self, BufRead, Write};
use system::System;
use tracing::debug;

/// Validate and preview one parsed command
///
/// The user configuration is only loaded for commands that record a
/// submitter. Usage errors are reported on `out` together with the command's
/// help text before being returned.
///
/// # Errors
///
/// Returns the validation, configuration or output error that stopped the run
pub fn run(
    cli: &Cli,
    run: &Run,
    system: &dyn System,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> Result<()> {
    debug!("Running {}", run.invocation.command_name());

    let request = match Request::prepare(run.spec, &run.invocation, input) {
        Ok(request) => request,
        Err(err) => {
            report_error(cli, &err, run.invocation.path(), out)?;
            return Err(err.into());
        }
    };

    let config = if request.needs_submitter() {
        HoloConfig::resolve(system, run.globals.config.as_deref())?
    } else {
        HoloConfig::default()
    };
    write!(out, "{}", render_preview(&request, &config)).context("Failed to write preview")?;
    Ok(())
}

/// Print a command-line error the way the command line reports it
///
/// Parser messages are printed as rendered; other usage errors are followed
/// by help for the command at `path` (the app help for an unknown command).
/// Errors that are not about usage print nothing here.
///
/// # Errors
///
/// Returns an error if writing to `out` fails
pub fn report_error<S: AsRef<str>>(
    cli: &Cli,
    err: &HoloError,
    path: &[S],
    out: &mut dyn Write,
) -> io::Result<()> {
    match err {
        HoloError::Parse { message } => write!(out, "{message}"),
        HoloError::UnknownCommand { .. } => {
            write!(out, "Incorrect Usage: {err}\n\n{}", cli.help_for::<&str>(&[]))
        }
        _ if err.is_usage() => write!(out, "Incorrect Usage: {err}!\n\n{}", cli.help_for(path)),
        _ => Ok(()),
    }
}
