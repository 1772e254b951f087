//! Declarative registry of every holo command
//!
//! Each leaf command declares its exact positional arity, its flags and the
//! action run once the invocation validates. Groups (`artifacts`,
//! `components`, `releases`, `trains`) only carry subcommands.

use std::collections::BTreeSet;

/// Whether a value flag must be supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Required,
    Optional,
}

/// Shape of a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    /// Flag taking one value
    Value {
        value_name: &'static str,
        requirement: Requirement,
    },
    /// Boolean flag
    Switch,
}

/// One flag accepted by a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagSpec {
    pub long: &'static str,
    pub short: Option<char>,
    pub help: &'static str,
    pub kind: FlagKind,
}

impl FlagSpec {
    #[must_use]
    pub const fn requirement(&self) -> Option<Requirement> {
        match self.kind {
            FlagKind::Value { requirement, .. } => Some(requirement),
            FlagKind::Switch => None,
        }
    }
}

/// Action invoked for a validated leaf command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Notes,
    Revert,
    Submit,
    Which,
    ListArtifacts,
    PutArtifact,
    GetArtifact,
    ListComponents,
    ShowComponent,
    CreateComponent,
    LinkComponent,
    UnlinkComponent,
    ListReleases,
    ShowRelease,
    CutRelease,
    CloneRelease,
    ListTrains,
    ShowTrain,
    CreateTrain,
}

/// One command or command group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: &'static str,
    /// One-line description shown in command lists
    pub about: &'static str,
    /// Positional and flag usage shown after the command path
    pub args_usage: &'static str,
    /// Exact number of positional arguments
    pub arity: usize,
    pub flags: &'static [FlagSpec],
    pub subcommands: &'static [CommandSpec],
    pub action: Option<Action>,
}

impl CommandSpec {
    /// Whether this command only groups subcommands
    #[must_use]
    pub const fn is_group(&self) -> bool {
        !self.subcommands.is_empty()
    }

    /// Find a direct subcommand by exact name
    #[must_use]
    pub fn subcommand(&self, name: &str) -> Option<&'static CommandSpec> {
        self.subcommands.iter().find(|spec| spec.name == name)
    }

    /// Find a declared flag by its long name
    #[must_use]
    pub fn flag(&self, long: &str) -> Option<&'static FlagSpec> {
        self.flags.iter().find(|flag| flag.long == long)
    }

    /// Value flags, in declaration order
    pub fn value_flags(&self) -> impl Iterator<Item = (&'static FlagSpec, Requirement)> {
        self.flags
            .iter()
            .filter_map(|flag| flag.requirement().map(|requirement| (flag, requirement)))
    }
}

pub const FLAG_FORCE: &str = "force";
pub const FLAG_TRAIN: &str = "train";
pub const FLAG_NOTES: &str = "notes";
pub const FLAG_RELEASE: &str = "release";
pub const FLAG_OWNER: &str = "owner";
pub const FLAG_REPO: &str = "repo";
pub const FLAG_BASE: &str = "base";

const FORCE: FlagSpec = FlagSpec {
    long: FLAG_FORCE,
    short: Some('f'),
    help: "suppress prompts",
    kind: FlagKind::Switch,
};

const TRAIN_LIST: FlagSpec = FlagSpec {
    long: FLAG_TRAIN,
    short: None,
    help: "comma-separated build trains to act on (default: every train of the component)",
    kind: FlagKind::Value {
        value_name: "TRAIN1,TRAIN2,...",
        requirement: Requirement::Optional,
    },
};

const TRAIN: FlagSpec = FlagSpec {
    long: FLAG_TRAIN,
    short: None,
    help: "name of a build train",
    kind: FlagKind::Value {
        value_name: "TRAIN",
        requirement: Requirement::Required,
    },
};

const NOTES: FlagSpec = FlagSpec {
    long: FLAG_NOTES,
    short: None,
    help: "notes for the submission, '-' reads lines from stdin until a lone '.'",
    kind: FlagKind::Value {
        value_name: "NOTES",
        requirement: Requirement::Optional,
    },
};

const RELEASE: FlagSpec = FlagSpec {
    long: FLAG_RELEASE,
    short: None,
    help: "the name of a release within a build train",
    kind: FlagKind::Value {
        value_name: "RELEASE",
        requirement: Requirement::Required,
    },
};

const OWNER: FlagSpec = FlagSpec {
    long: FLAG_OWNER,
    short: None,
    help: "email of the owner",
    kind: FlagKind::Value {
        value_name: "EMAIL",
        requirement: Requirement::Required,
    },
};

const REPO: FlagSpec = FlagSpec {
    long: FLAG_REPO,
    short: None,
    help: "URL of the source repository",
    kind: FlagKind::Value {
        value_name: "URL",
        requirement: Requirement::Optional,
    },
};

const BASE_RELEASE: FlagSpec = FlagSpec {
    long: FLAG_BASE,
    short: None,
    help: "base release",
    kind: FlagKind::Value {
        value_name: "RELEASE",
        requirement: Requirement::Optional,
    },
};

const BASE_TRAIN: FlagSpec = FlagSpec {
    long: FLAG_BASE,
    short: None,
    help: "existing build train to clone",
    kind: FlagKind::Value {
        value_name: "TRAIN",
        requirement: Requirement::Optional,
    },
};

const fn leaf(
    name: &'static str,
    about: &'static str,
    args_usage: &'static str,
    arity: usize,
    flags: &'static [FlagSpec],
    action: Action,
) -> CommandSpec {
    CommandSpec {
        name,
        about,
        args_usage,
        arity,
        flags,
        subcommands: &[],
        action: Some(action),
    }
}

const fn group(
    name: &'static str,
    about: &'static str,
    subcommands: &'static [CommandSpec],
) -> CommandSpec {
    CommandSpec {
        name,
        about,
        args_usage: "command [arguments]",
        arity: 0,
        flags: &[],
        subcommands,
        action: None,
    }
}

/// Every top-level command
pub const COMMANDS: &[CommandSpec] = &[
    leaf(
        "notes",
        "show the release notes for a submission",
        "SUBMISSION",
        1,
        &[],
        Action::Notes,
    ),
    leaf(
        "revert",
        "roll a submission back",
        "SUBMISSION [--train TRAIN1,TRAIN2,TRAIN3...] [-f/--force]",
        1,
        &[TRAIN_LIST, FORCE],
        Action::Revert,
    ),
    leaf(
        "submit",
        "submit a new version of a component",
        "SUBMISSION SRCROOT [--train TRAIN1,TRAIN2,TRAIN3...] [-f/--force] [--notes NOTES|-]",
        2,
        &[TRAIN_LIST, NOTES, FORCE],
        Action::Submit,
    ),
    leaf(
        "which",
        "show which version of a component appeared in a release",
        "COMPONENT --release RELEASE",
        1,
        &[RELEASE],
        Action::Which,
    ),
    group(
        "artifacts",
        "manage artifacts for a release",
        &[
            leaf(
                "ls",
                "list artifacts within a release",
                "RELEASE",
                1,
                &[],
                Action::ListArtifacts,
            ),
            leaf(
                "put",
                "upload artifacts for a release",
                "FILENAME --release RELEASE [-f/--force]",
                1,
                &[RELEASE, FORCE],
                Action::PutArtifact,
            ),
            leaf(
                "get",
                "download artifacts for a release",
                "FILENAME DESTINATION --release RELEASE",
                2,
                &[RELEASE],
                Action::GetArtifact,
            ),
        ],
    ),
    group(
        "components",
        "manage a component",
        &[
            leaf(
                "ls",
                "list all known components",
                "",
                0,
                &[],
                Action::ListComponents,
            ),
            leaf(
                "show",
                "describe a given component",
                "COMPONENT",
                1,
                &[],
                Action::ShowComponent,
            ),
            leaf(
                "create",
                "create a new component",
                "COMPONENT --owner EMAIL [--repo URL]",
                1,
                &[OWNER, REPO],
                Action::CreateComponent,
            ),
            leaf(
                "link",
                "make a component a member of a train",
                "COMPONENT --train TRAIN",
                1,
                &[TRAIN],
                Action::LinkComponent,
            ),
            leaf(
                "unlink",
                "remove a component from a train",
                "COMPONENT --train TRAIN [-f/--force]",
                1,
                &[TRAIN, FORCE],
                Action::UnlinkComponent,
            ),
        ],
    ),
    group(
        "releases",
        "manage a release",
        &[
            leaf(
                "ls",
                "list releases within a build train",
                "TRAIN",
                1,
                &[],
                Action::ListReleases,
            ),
            leaf(
                "show",
                "describe a given release",
                "RELEASE",
                1,
                &[],
                Action::ShowRelease,
            ),
            leaf(
                "cut",
                "cut a new release by flushing pending submissions",
                "RELEASE [--base RELEASE] [-f/--force]",
                1,
                &[BASE_RELEASE, FORCE],
                Action::CutRelease,
            ),
            leaf(
                "clone",
                "create a new release based on an existing release",
                "RELEASE [--base RELEASE]",
                1,
                &[BASE_RELEASE],
                Action::CloneRelease,
            ),
        ],
    ),
    group(
        "trains",
        "manage a train",
        &[
            leaf(
                "ls",
                "list all known build trains",
                "",
                0,
                &[],
                Action::ListTrains,
            ),
            leaf(
                "show",
                "describe a given build train",
                "TRAIN",
                1,
                &[],
                Action::ShowTrain,
            ),
            leaf(
                "create",
                "create a new build train, or clone an existing build train",
                "TRAIN [--base TRAIN]",
                1,
                &[BASE_TRAIN],
                Action::CreateTrain,
            ),
        ],
    ),
];

/// Find a top-level command by exact, case-sensitive name
#[must_use]
pub fn find_command(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Resolve a command path such as `["artifacts", "put"]`
#[must_use]
pub fn resolve(path: &[&str]) -> Option<&'static CommandSpec> {
    let (first, rest) = path.split_first()?;
    let mut spec = find_command(first)?;
    for name in rest {
        spec = spec.subcommand(name)?;
    }
    Some(spec)
}

/// Every leaf command with its full path
#[must_use]
pub fn leaves() -> Vec<(Vec<&'static str>, &'static CommandSpec)> {
    fn walk(
        prefix: &[&'static str],
        specs: &'static [CommandSpec],
        out: &mut Vec<(Vec<&'static str>, &'static CommandSpec)>,
    ) {
        for spec in specs {
            let mut path = prefix.to_vec();
            path.push(spec.name);
            if spec.is_group() {
                walk(&path, spec.subcommands, out);
            } else {
                out.push((path, spec));
            }
        }
    }

    let mut out = Vec::new();
    walk(&[], COMMANDS, &mut out);
    out
}

/// Long names of every flag any command accepts
#[must_use]
pub fn long_flag_names() -> BTreeSet<&'static str> {
    leaves()
        .into_iter()
        .flat_map(|(_, spec)| spec.flags.iter().map(|flag| flag.long))
        .collect()
}
