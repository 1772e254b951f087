//! Command registry and parser tests

use holo::cli::registry::{self, Action, FlagKind, Requirement};
use holo::cli::{Cli, HelpTemplates, Parsed};
use holo::error::HoloError;
use std::collections::BTreeSet;

fn cli() -> Cli {
    Cli::new(&HelpTemplates::default())
}

fn parse(args: &[&str]) -> Result<Parsed, HoloError> {
    cli().parse(std::iter::once("holo").chain(args.iter().copied()))
}

#[test]
fn test_every_leaf_has_an_action() {
    let leaves = registry::leaves();
    assert_eq!(leaves.len(), 19);
    let actions: BTreeSet<String> = leaves
        .iter()
        .map(|(_, spec)| format!("{:?}", spec.action.unwrap()))
        .collect();
    assert_eq!(actions.len(), 19);
}

#[test]
fn test_names_are_unique_per_level() {
    fn check(specs: &[registry::CommandSpec]) {
        let names: BTreeSet<&str> = specs.iter().map(|spec| spec.name).collect();
        assert_eq!(names.len(), specs.len());
        for spec in specs {
            check(spec.subcommands);
        }
    }
    check(registry::COMMANDS);
}

#[test]
fn test_lookup_is_exact_and_case_sensitive() {
    assert!(registry::find_command("submit").is_some());
    assert!(registry::find_command("Submit").is_none());
    assert!(registry::find_command("sub").is_none());

    let put = registry::resolve(&["artifacts", "put"]).unwrap();
    assert_eq!(put.action, Some(Action::PutArtifact));
    assert_eq!(put.arity, 1);
    assert!(registry::resolve(&["artifacts", "rm"]).is_none());
}

#[test]
fn test_flag_requirements() {
    let create = registry::resolve(&["components", "create"]).unwrap();
    let owner = create.flag("owner").unwrap();
    let repo = create.flag("repo").unwrap();
    assert_eq!(owner.requirement(), Some(Requirement::Required));
    assert_eq!(repo.requirement(), Some(Requirement::Optional));

    let unlink = registry::resolve(&["components", "unlink"]).unwrap();
    let force = unlink.flag("force").unwrap();
    assert_eq!(force.kind, FlagKind::Switch);
    assert_eq!(force.short, Some('f'));
}

#[test]
fn test_parse_resolves_leaf_and_arguments() {
    let Parsed::Run(run) = parse(&["artifacts", "get", "foo.tar.gz", "/tmp/out", "--release", "R1"])
        .unwrap()
    else {
        panic!("expected a runnable command");
    };
    assert_eq!(run.spec.action, Some(Action::GetArtifact));
    assert_eq!(run.invocation.path(), ["artifacts", "get"]);
    assert_eq!(run.invocation.positionals(), ["foo.tar.gz", "/tmp/out"]);
    assert_eq!(run.invocation.value("release"), Some("R1"));
    assert!(!run.globals.verbose);
}

#[test]
fn test_flag_without_value_is_bare() {
    let Parsed::Run(run) = parse(&["artifacts", "put", "foo.tar.gz", "--release", "-f"]).unwrap()
    else {
        panic!("expected a runnable command");
    };
    assert_eq!(run.invocation.value("release"), None);
    assert!(run.invocation.is_bare("release"));
    assert!(run.invocation.is_set("force"));
    assert_eq!(run.invocation.positionals(), ["foo.tar.gz"]);
}

#[test]
fn test_explicit_empty_value_is_not_bare() {
    let Parsed::Run(run) = parse(&["releases", "cut", "Thundercat1A1", "--base", ""]).unwrap()
    else {
        panic!("expected a runnable command");
    };
    assert_eq!(run.invocation.value("base"), Some(""));
    assert!(!run.invocation.is_bare("base"));
}

#[test]
fn test_unknown_flag_after_value_flag_leaves_it_without_argument() {
    let err = parse(&["which", "osd", "--release", "--bogus"]).unwrap_err();
    assert_eq!(err, HoloError::flag_needs_argument("release"));
    assert_eq!(err.exit_code(), 2);

    let err = parse(&["artifacts", "put", "foo.tar.gz", "--release", "-x"]).unwrap_err();
    assert_eq!(err, HoloError::flag_needs_argument("release"));

    let err = parse(&["components", "link", "osd", "-train", "--bogus=1"]).unwrap_err();
    assert_eq!(err, HoloError::flag_needs_argument("train"));
}

#[test]
fn test_unknown_flag_after_a_value_stays_a_parse_error() {
    let err = parse(&["which", "osd", "--release", "R1", "--bogus"]).unwrap_err();
    assert!(matches!(err, HoloError::Parse { .. }), "{err:?}");

    let err = parse(&["which", "osd", "--bogus"]).unwrap_err();
    assert!(matches!(err, HoloError::Parse { .. }), "{err:?}");
}

#[test]
fn test_command_path_of_unparsable_command_line() {
    let cli = cli();
    assert_eq!(
        cli.command_path(["holo", "-v", "artifacts", "put", "foo", "--release", "-x"]),
        ["artifacts", "put"]
    );
    assert_eq!(
        cli.command_path(["holo", "--config", "which", "which", "osd"]),
        ["which"]
    );
    assert!(cli.command_path(["holo", "frobnicate", "trains"]).is_empty());
}

#[test]
fn test_global_flags_anywhere() {
    let Parsed::Run(run) = parse(&["trains", "ls", "-v", "--config", "/etc/holo.yaml"]).unwrap()
    else {
        panic!("expected a runnable command");
    };
    assert!(run.globals.verbose);
    assert_eq!(
        run.globals.config.as_deref(),
        Some(std::path::Path::new("/etc/holo.yaml"))
    );
}

#[test]
fn test_unknown_command_is_reported() {
    let err = parse(&["frobnicate"]).unwrap_err();
    assert_eq!(err, HoloError::unknown_command("frobnicate"));
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_groups_without_subcommand_are_help() {
    for group in ["artifacts", "components", "releases", "trains"] {
        let parsed = parse(&[group]).unwrap();
        assert!(matches!(parsed, Parsed::Help(_)), "{group}");
    }
    assert!(matches!(parse(&[]).unwrap(), Parsed::Help(_)));
}

#[test]
fn test_help_for_command_path() {
    let help = cli().help_for(&["releases", "cut"]);
    assert!(help.contains("holo releases cut RELEASE [--base RELEASE] [-f/--force]"));
    assert!(help.contains("cut a new release by flushing pending submissions"));
}

#[test]
fn test_custom_help_templates() {
    let templates = HelpTemplates {
        app: "APP {about}\n".to_owned(),
        group: "GROUP {about}\n".to_owned(),
        command: "COMMAND {usage}\n".to_owned(),
    };
    let cli = Cli::new(&templates);
    assert_eq!(
        cli.help_for::<&str>(&[]).trim_end(),
        "APP a tool for managing device software builds"
    );
    assert_eq!(cli.help_for(&["trains"]).trim_end(), "GROUP manage a train");
    assert_eq!(
        cli.help_for(&["trains", "create"]).trim_end(),
        "COMMAND holo trains create TRAIN [--base TRAIN]"
    );
}
