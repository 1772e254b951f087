//! Command tree construction and parsing
//!
//! The clap command tree is generated from the registry, so every token is
//! assigned to exactly one flag or positional slot before validation runs.
//! Arity and flag requirements are left to the validator so that failures
//! carry holo's own error kinds.

use crate::cli::args::{CONFIG_ID, GlobalArgs, VERBOSE_ID, normalize_args};
use crate::cli::help::HelpTemplates;
use crate::cli::invocation::Invocation;
use crate::cli::registry::{self, CommandSpec, FlagKind, FlagSpec};
use crate::error::HoloError;
use clap::error::{ContextKind, ErrorKind};
use clap::{Arg, ArgAction, ArgMatches, Command};

/// Program name
pub const BIN_NAME: &str = "holo";

/// One-line description of the program
pub const ABOUT: &str = "a tool for managing device software builds";

/// Id of the positional slot that collects every positional argument
pub const ARGS_ID: &str = "args";

/// Outcome of parsing a command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parsed {
    /// Help or version text was requested or implied
    Help(String),
    /// A leaf command to validate and run
    Run(Run),
}

/// A resolved leaf command with its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub spec: &'static CommandSpec,
    pub invocation: Invocation,
    pub globals: GlobalArgs,
}

/// The holo command-line front end
#[derive(Debug, Clone)]
pub struct Cli {
    command: Command,
}

impl Cli {
    /// Build the command tree, rendering help with `templates`
    #[must_use]
    pub fn new(templates: &HelpTemplates) -> Self {
        Self {
            command: build_root(templates),
        }
    }

    /// Parse `argv` (program name first)
    ///
    /// # Errors
    ///
    /// Returns [`HoloError::UnknownCommand`] for an unregistered command name,
    /// [`HoloError::MissingFlag`] when an unknown flag token follows a value
    /// flag, and [`HoloError::Parse`] for any other parser failure
    pub fn parse<I, T>(&self, argv: I) -> Result<Parsed, HoloError>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let argv = normalize_args(
            argv.into_iter().map(Into::into),
            &registry::long_flag_names(),
        );
        let matches = match self.command.clone().try_get_matches_from(&argv) {
            Ok(matches) => matches,
            Err(err) => return handle_parse_error(err, &argv),
        };

        let mut path = Vec::new();
        let mut specs = registry::COMMANDS;
        let mut resolved: Option<&'static CommandSpec> = None;
        let mut current: &ArgMatches = &matches;

        while let Some((name, sub_matches)) = current.subcommand() {
            let spec = specs
                .iter()
                .find(|spec| spec.name == name)
                .ok_or_else(|| HoloError::unknown_command(name))?;
            path.push(spec.name);
            specs = spec.subcommands;
            resolved = Some(spec);
            current = sub_matches;
        }

        let spec = match resolved {
            Some(spec) if !spec.is_group() => spec,
            _ => return Ok(Parsed::Help(self.help_for(&path))),
        };

        Ok(Parsed::Run(Run {
            spec,
            invocation: invocation_from_matches(&path, spec, current),
            globals: GlobalArgs::from_matches(current),
        }))
    }

    /// Names of the registered commands `argv` (program name first) selects
    ///
    /// Resolution stops at the first token that names no registered command,
    /// so the result is a usable [`Cli::help_for`] path even for a command
    /// line that fails to parse.
    #[must_use]
    pub fn command_path<I, T>(&self, argv: I) -> Vec<&'static str>
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let argv = normalize_args(
            argv.into_iter().map(Into::into),
            &registry::long_flag_names(),
        );
        locate_command(&argv).0
    }

    /// Rendered help for the command at `path`, the app help for an empty path
    #[must_use]
    pub fn help_for<S: AsRef<str>>(&self, path: &[S]) -> String {
        let mut current = self.command.clone();
        current.build();
        for name in path {
            let Some(sub) = current.find_subcommand(name.as_ref()).cloned() else {
                break;
            };
            current = sub;
        }
        current.render_help().to_string()
    }
}

fn handle_parse_error(err: clap::Error, argv: &[String]) -> Result<Parsed, HoloError> {
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
            Ok(Parsed::Help(err.render().to_string()))
        }
        ErrorKind::InvalidSubcommand => {
            let name = err
                .get(ContextKind::InvalidSubcommand)
                .map(ToString::to_string)
                .unwrap_or_default();
            Err(HoloError::unknown_command(name))
        }
        ErrorKind::UnknownArgument => {
            let flag = err
                .get(ContextKind::InvalidArg)
                .and_then(|token| flag_left_without_value(argv, &token.to_string()));
            match flag {
                Some(flag) => Err(HoloError::flag_needs_argument(flag)),
                None => Err(HoloError::Parse {
                    message: err.render().to_string(),
                }),
            }
        }
        _ => Err(HoloError::Parse {
            message: err.render().to_string(),
        }),
    }
}

/// Walk `argv` through the registry
///
/// Returns the command path and, once a leaf is reached, the leaf with the
/// index of the first token after its name.
fn locate_command(argv: &[String]) -> (Vec<&'static str>, Option<(&'static CommandSpec, usize)>) {
    let mut path = Vec::new();
    let mut specs = registry::COMMANDS;
    let mut tokens = argv.iter().enumerate().skip(1);

    while let Some((index, token)) = tokens.next() {
        if token == "--" {
            break;
        }
        if token.strip_prefix("--") == Some(CONFIG_ID) {
            tokens.next();
            continue;
        }
        if token.starts_with('-') {
            continue;
        }
        let Some(spec) = specs.iter().find(|spec| spec.name == token.as_str()) else {
            break;
        };
        path.push(spec.name);
        if !spec.is_group() {
            return (path, Some((spec, index + 1)));
        }
        specs = spec.subcommands;
    }
    (path, None)
}

/// The value flag directly before the unexpected flag token `invalid`
///
/// `which osd --release --bogus` leaves `--release` with nothing to take, the
/// same as a value flag given last.
fn flag_left_without_value(argv: &[String], invalid: &str) -> Option<&'static str> {
    let (_, Some((spec, start))) = locate_command(argv) else {
        return None;
    };
    let is_short = !invalid.starts_with("--");
    let position = argv.iter().skip(start).position(|token| {
        token == invalid
            || token.starts_with(&format!("{invalid}="))
            || (is_short && !token.starts_with("--") && token.starts_with(invalid))
    })?;
    let previous = argv.get((start + position).checked_sub(1)?)?.as_str();

    let flag = match previous.strip_prefix("--") {
        Some(long) => spec.flag(long),
        None => {
            let mut chars = previous.strip_prefix('-')?.chars();
            match (chars.next(), chars.next()) {
                (Some(short), None) => spec.flags.iter().find(|flag| flag.short == Some(short)),
                _ => None,
            }
        }
    }?;
    matches!(flag.kind, FlagKind::Value { .. }).then_some(flag.long)
}

fn invocation_from_matches(path: &[&str], spec: &CommandSpec, matches: &ArgMatches) -> Invocation {
    let mut invocation = Invocation::new(path.iter().copied());

    if let Some(args) = matches.get_many::<String>(ARGS_ID) {
        for arg in args {
            invocation = invocation.with_arg(arg.as_str());
        }
    }

    for flag in spec.flags {
        match flag.kind {
            FlagKind::Switch => {
                if matches.get_flag(flag.long) {
                    invocation = invocation.with_switch(flag.long);
                }
            }
            FlagKind::Value { .. } => {
                if let Some(value) = matches.get_one::<String>(flag.long) {
                    invocation = invocation.with_value(flag.long, value.as_str());
                } else if matches.contains_id(flag.long) {
                    invocation = invocation.with_bare_flag(flag.long);
                }
            }
        }
    }

    invocation
}

fn build_root(templates: &HelpTemplates) -> Command {
    let root = Command::new(BIN_NAME)
        .about(ABOUT)
        .version(env!("CARGO_PKG_VERSION"))
        .override_usage(format!("{BIN_NAME} command [arguments]"))
        .help_template(templates.app.clone())
        .arg_required_else_help(true)
        .arg(
            Arg::new(CONFIG_ID)
                .long(CONFIG_ID)
                .value_name("PATH")
                .global(true)
                .help("configuration file (default: $HOLO_CONFIG, then holo/config.yaml in the user config dir)"),
        )
        .arg(
            Arg::new(VERBOSE_ID)
                .short('v')
                .long(VERBOSE_ID)
                .global(true)
                .action(ArgAction::SetTrue)
                .help("enable verbose logging output"),
        );

    registry::COMMANDS.iter().fold(root, |root, spec| {
        root.subcommand(build_command(spec, templates, BIN_NAME))
    })
}

fn build_command(spec: &'static CommandSpec, templates: &HelpTemplates, parent: &str) -> Command {
    let path = format!("{parent} {}", spec.name);
    let usage = format!("{path} {}", spec.args_usage);
    let command = Command::new(spec.name)
        .about(spec.about)
        .override_usage(usage.trim_end().to_owned());

    if spec.is_group() {
        let command = command
            .help_template(templates.group.clone())
            .arg_required_else_help(true);
        return spec.subcommands.iter().fold(command, |command, sub| {
            command.subcommand(build_command(sub, templates, &path))
        });
    }

    let command = command.help_template(templates.command.clone()).arg(
        Arg::new(ARGS_ID)
            .value_name("ARGS")
            .num_args(1..)
            .action(ArgAction::Append)
            .hide(true),
    );
    spec.flags
        .iter()
        .fold(command, |command, flag| command.arg(flag_arg(flag)))
}

fn flag_arg(flag: &'static FlagSpec) -> Arg {
    let arg = Arg::new(flag.long).long(flag.long).help(flag.help);
    let arg = match flag.short {
        Some(short) => arg.short(short),
        None => arg,
    };
    match flag.kind {
        FlagKind::Switch => arg.action(ArgAction::SetTrue),
        // A value flag never takes a following `-` token as its value; given
        // bare it is present with no value for the validator to reject.
        FlagKind::Value { value_name, .. } => arg
            .value_name(value_name)
            .num_args(0..=1)
            .action(ArgAction::Set),
    }
}
