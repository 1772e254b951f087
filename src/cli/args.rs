//! Raw argument handling ahead of and around the parser

use clap::ArgMatches;
use std::collections::BTreeSet;
use std::path::PathBuf;

pub const CONFIG_ID: &str = "config";
pub const VERBOSE_ID: &str = "verbose";

/// Long flags accepted everywhere, besides those the registry declares
pub const GLOBAL_LONG_FLAGS: &[&str] = &["help", "version", CONFIG_ID, VERBOSE_ID];

/// Options that apply to every command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Configuration file given with `--config`
    pub config: Option<PathBuf>,
    /// Enable verbose logging output
    pub verbose: bool,
}

impl GlobalArgs {
    /// Read the global options from parsed matches
    #[must_use]
    pub fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            config: matches.get_one::<String>(CONFIG_ID).map(PathBuf::from),
            verbose: matches.get_flag(VERBOSE_ID),
        }
    }
}

/// Rewrite single-dash long flags (`-train`, `-force`) to their `--` form
///
/// Only names in `long_names` or [`GLOBAL_LONG_FLAGS`] are rewritten, so short
/// flags such as `-f` and values such as `-` pass through. The program name
/// and everything after a `--` terminator are left alone.
#[must_use]
pub fn normalize_args<I>(argv: I, long_names: &BTreeSet<&str>) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;

    for (index, arg) in argv.into_iter().enumerate() {
        if index == 0 || passthrough {
            normalized.push(arg);
            continue;
        }
        if arg == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }
        match promote_single_dash(&arg, long_names) {
            Some(promoted) => normalized.push(promoted),
            None => normalized.push(arg),
        }
    }

    normalized
}

fn promote_single_dash(arg: &str, long_names: &BTreeSet<&str>) -> Option<String> {
    let rest = arg.strip_prefix('-')?;
    if rest.starts_with('-') {
        return None;
    }
    let name = rest.split_once('=').map_or(rest, |(name, _)| name);
    let known = long_names.contains(name) || GLOBAL_LONG_FLAGS.contains(&name);
    (name.len() > 1 && known).then(|| format!("-{arg}"))
}
