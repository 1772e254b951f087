//! # holo
//!
//! `holo` manages device software builds: components, build trains, releases,
//! submissions and release artifacts.
//!
//! ## Usage
//!
//! ```sh
//! holo submit osd-38 ./osd --train Thundercat --notes -
//! holo releases cut Thundercat1A177
//! holo artifacts get build.tar.gz /tmp/out --release Thundercat1A177
//! ```
//!
//! See `holo --help` for every command.

use holo::cli::{Cli, HelpTemplates, Parsed};
use holo::error::HoloError;
use holo::system::real::RealSystem;
use std::io::{self, Write as _};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

fn exit(out: &mut dyn io::Write, code: i32) -> ! {
    let _ = out.flush();
    std::process::exit(code);
}

fn main() {
    let cli = Cli::new(&HelpTemplates::default());
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let argv: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();
    let parsed = match cli.parse(argv.iter().cloned()) {
        Ok(parsed) => parsed,
        Err(err) => {
            let path = cli.command_path(argv);
            let _ = holo::report_error(&cli, &err, &path, &mut out);
            exit(&mut out, err.exit_code());
        }
    };

    let run = match parsed {
        Parsed::Help(text) => {
            let _ = write!(out, "{text}");
            exit(&mut out, 0);
        }
        Parsed::Run(run) => run,
    };

    // Initialize tracing subscriber based on verbose flag
    let log_level = if run.globals.verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt().with_target(false).with_env_filter(filter).init();

    let system = RealSystem::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    match holo::run(&cli, &run, &system, &mut input, &mut out) {
        Ok(()) => exit(&mut out, 0),
        Err(err) => {
            let holo_err = err.downcast_ref::<HoloError>();
            if !holo_err.is_some_and(HoloError::is_usage) {
                error!("{err:#}");
            }
            exit(&mut out, holo_err.map_or(1, HoloError::exit_code));
        }
    }
}
