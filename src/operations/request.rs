//! Typed requests built from validated invocations

use crate::cli::invocation::Invocation;
use crate::cli::registry::{
    Action, CommandSpec, FLAG_BASE, FLAG_FORCE, FLAG_NOTES, FLAG_OWNER, FLAG_RELEASE, FLAG_REPO,
    FLAG_TRAIN,
};
use crate::cli::validate::{check_invocation, collect_notes, split_list};
use crate::config::validation::{validate_email, validate_name};
use crate::error::HoloError;
use crate::model::SubmissionId;
use std::io::BufRead;
use std::path::PathBuf;
use tracing::debug;

/// One leaf command with its arguments in typed form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Notes {
        submission: SubmissionId,
    },
    Revert {
        submission: SubmissionId,
        trains: Vec<String>,
        force: bool,
    },
    Submit {
        submission: SubmissionId,
        src_root: PathBuf,
        trains: Vec<String>,
        notes: Vec<String>,
        force: bool,
    },
    Which {
        component: String,
        release: String,
    },
    ListArtifacts {
        release: String,
    },
    PutArtifact {
        filename: PathBuf,
        release: String,
        force: bool,
    },
    GetArtifact {
        filename: String,
        destination: PathBuf,
        release: String,
    },
    ListComponents,
    ShowComponent {
        name: String,
    },
    CreateComponent {
        name: String,
        owner: String,
        repo: Option<String>,
    },
    LinkComponent {
        name: String,
        train: String,
    },
    UnlinkComponent {
        name: String,
        train: String,
        force: bool,
    },
    ListReleases {
        train: String,
    },
    ShowRelease {
        name: String,
    },
    CutRelease {
        name: String,
        base: Option<String>,
        force: bool,
    },
    CloneRelease {
        name: String,
        base: Option<String>,
    },
    ListTrains,
    ShowTrain {
        name: String,
    },
    CreateTrain {
        name: String,
        base: Option<String>,
    },
}

impl Request {
    /// Validate `invocation` against `spec` and build the request
    ///
    /// Arity and flag checks run before anything is read, so `input` is only
    /// consumed for `submit --notes -` once the command line is known good.
    ///
    /// # Errors
    ///
    /// Returns the first validation failure, or an error while reading notes
    pub fn prepare(
        spec: &CommandSpec,
        invocation: &Invocation,
        input: &mut dyn BufRead,
    ) -> Result<Self, HoloError> {
        check_invocation(spec, invocation)?;
        let action = spec
            .action
            .ok_or_else(|| HoloError::unknown_command(invocation.command_name()))?;
        debug!("Preparing {:?} for {}", action, invocation.command_name());

        let arg = |index: usize| invocation.positional(index).unwrap_or_default().to_owned();
        let value = |flag: &str| invocation.non_blank_value(flag).map(str::to_owned);
        let required = |flag: &str| value(flag).unwrap_or_default();
        let force = invocation.is_set(FLAG_FORCE);

        let request = match action {
            Action::Notes => Self::Notes {
                submission: arg(0).parse::<SubmissionId>()?,
            },
            Action::Revert => Self::Revert {
                submission: arg(0).parse::<SubmissionId>()?,
                trains: split_list(FLAG_TRAIN, invocation.non_blank_value(FLAG_TRAIN))?,
                force,
            },
            Action::Submit => {
                let submission = arg(0).parse::<SubmissionId>()?;
                let trains = split_list(FLAG_TRAIN, invocation.non_blank_value(FLAG_TRAIN))?;
                Self::Submit {
                    submission,
                    src_root: PathBuf::from(arg(1)),
                    trains,
                    notes: collect_notes(invocation, input)?,
                    force,
                }
            }
            Action::Which => Self::Which {
                component: arg(0),
                release: required(FLAG_RELEASE),
            },
            Action::ListArtifacts => Self::ListArtifacts { release: arg(0) },
            Action::PutArtifact => Self::PutArtifact {
                filename: PathBuf::from(arg(0)),
                release: required(FLAG_RELEASE),
                force,
            },
            Action::GetArtifact => Self::GetArtifact {
                filename: arg(0),
                destination: PathBuf::from(arg(1)),
                release: required(FLAG_RELEASE),
            },
            Action::ListComponents => Self::ListComponents,
            Action::ShowComponent => Self::ShowComponent { name: arg(0) },
            Action::CreateComponent => {
                let name = arg(0);
                let owner = required(FLAG_OWNER);
                validate_name("component", &name)?;
                validate_email(&owner)?;
                Self::CreateComponent {
                    name,
                    owner,
                    repo: value(FLAG_REPO),
                }
            }
            Action::LinkComponent => Self::LinkComponent {
                name: arg(0),
                train: required(FLAG_TRAIN),
            },
            Action::UnlinkComponent => Self::UnlinkComponent {
                name: arg(0),
                train: required(FLAG_TRAIN),
                force,
            },
            Action::ListReleases => Self::ListReleases { train: arg(0) },
            Action::ShowRelease => Self::ShowRelease { name: arg(0) },
            Action::CutRelease => Self::CutRelease {
                name: arg(0),
                base: value(FLAG_BASE),
                force,
            },
            Action::CloneRelease => Self::CloneRelease {
                name: arg(0),
                base: value(FLAG_BASE),
            },
            Action::ListTrains => Self::ListTrains,
            Action::ShowTrain => Self::ShowTrain { name: arg(0) },
            Action::CreateTrain => {
                let name = arg(0);
                validate_name("train", &name)?;
                Self::CreateTrain {
                    name,
                    base: value(FLAG_BASE),
                }
            }
        };
        Ok(request)
    }

    /// Whether the request records who made it, and so needs the user config
    #[must_use]
    pub const fn needs_submitter(&self) -> bool {
        matches!(self, Self::Submit { .. })
    }

    /// Command path of the request, e.g. `artifacts get`
    #[must_use]
    pub const fn command(&self) -> &'static str {
        match *self {
            Self::Notes { .. } => "notes",
            Self::Revert { .. } => "revert",
            Self::Submit { .. } => "submit",
            Self::Which { .. } => "which",
            Self::ListArtifacts { .. } => "artifacts ls",
            Self::PutArtifact { .. } => "artifacts put",
            Self::GetArtifact { .. } => "artifacts get",
            Self::ListComponents => "components ls",
            Self::ShowComponent { .. } => "components show",
            Self::CreateComponent { .. } => "components create",
            Self::LinkComponent { .. } => "components link",
            Self::UnlinkComponent { .. } => "components unlink",
            Self::ListReleases { .. } => "releases ls",
            Self::ShowRelease { .. } => "releases show",
            Self::CutRelease { .. } => "releases cut",
            Self::CloneRelease { .. } => "releases clone",
            Self::ListTrains => "trains ls",
            Self::ShowTrain { .. } => "trains show",
            Self::CreateTrain { .. } => "trains create",
        }
    }

    /// Labeled argument values, in usage order
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        let path = |path: &PathBuf| path.display().to_string();
        let list = |items: &[String]| items.join(",");
        let optional = |value: &Option<String>| value.clone().unwrap_or_default();

        match self {
            Self::Notes { submission } => vec![("SUBMISSION", submission.to_string())],
            Self::Revert {
                submission,
                trains,
                force,
            } => vec![
                ("SUBMISSION", submission.to_string()),
                (FLAG_TRAIN, list(trains)),
                (FLAG_FORCE, force.to_string()),
            ],
            Self::Submit {
                submission,
                src_root,
                trains,
                notes,
                force,
            } => vec![
                ("SUBMISSION", submission.to_string()),
                ("SRCROOT", path(src_root)),
                (FLAG_TRAIN, list(trains)),
                (FLAG_NOTES, notes.join("\n")),
                (FLAG_FORCE, force.to_string()),
            ],
            Self::Which { component, release } => vec![
                ("COMPONENT", component.clone()),
                (FLAG_RELEASE, release.clone()),
            ],
            Self::ListArtifacts { release } => vec![("RELEASE", release.clone())],
            Self::PutArtifact {
                filename,
                release,
                force,
            } => vec![
                ("FILENAME", path(filename)),
                (FLAG_RELEASE, release.clone()),
                (FLAG_FORCE, force.to_string()),
            ],
            Self::GetArtifact {
                filename,
                destination,
                release,
            } => vec![
                ("FILENAME", filename.clone()),
                ("DESTINATION", path(destination)),
                (FLAG_RELEASE, release.clone()),
            ],
            Self::ListComponents | Self::ListTrains => Vec::new(),
            Self::ShowComponent { name } => vec![("COMPONENT", name.clone())],
            Self::CreateComponent { name, owner, repo } => vec![
                ("COMPONENT", name.clone()),
                (FLAG_OWNER, owner.clone()),
                (FLAG_REPO, optional(repo)),
            ],
            Self::LinkComponent { name, train } => vec![
                ("COMPONENT", name.clone()),
                (FLAG_TRAIN, train.clone()),
            ],
            Self::UnlinkComponent { name, train, force } => vec![
                ("COMPONENT", name.clone()),
                (FLAG_TRAIN, train.clone()),
                (FLAG_FORCE, force.to_string()),
            ],
            Self::ListReleases { train } => vec![("TRAIN", train.clone())],
            Self::ShowRelease { name } => vec![("RELEASE", name.clone())],
            Self::CutRelease { name, base, force } => vec![
                ("RELEASE", name.clone()),
                (FLAG_BASE, optional(base)),
                (FLAG_FORCE, force.to_string()),
            ],
            Self::CloneRelease { name, base } => {
                vec![("RELEASE", name.clone()), (FLAG_BASE, optional(base))]
            }
            Self::ShowTrain { name } => vec![("TRAIN", name.clone())],
            Self::CreateTrain { name, base } => {
                vec![("TRAIN", name.clone()), (FLAG_BASE, optional(base))]
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use crate::cli::registry;
    use std::io::Cursor;

    fn prepare(path: &[&str], invocation: Invocation, stdin: &str) -> Result<Request, HoloError> {
        let spec = registry::resolve(path).unwrap();
        Request::prepare(spec, &invocation, &mut Cursor::new(stdin.as_bytes().to_vec()))
    }

    #[test]
    fn revert_splits_train_list() {
        let invocation = Invocation::new(["revert"])
            .with_arg("osd-36")
            .with_value(FLAG_TRAIN, "Thundercat,ThundercatDeuce")
            .with_switch(FLAG_FORCE);
        let request = prepare(&["revert"], invocation, "").unwrap();
        assert_eq!(
            request,
            Request::Revert {
                submission: "osd-36".parse().unwrap(),
                trains: vec!["Thundercat".to_owned(), "ThundercatDeuce".to_owned()],
                force: true,
            }
        );
    }

    #[test]
    fn notes_are_not_read_when_validation_fails() {
        let invocation = Invocation::new(["submit"])
            .with_arg("osd-38")
            .with_value(FLAG_NOTES, "-");
        let err = prepare(&["submit"], invocation, "a\n.\n").unwrap_err();
        assert_eq!(
            err,
            HoloError::ArgumentCount {
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn malformed_submission_is_invalid_argument() {
        let invocation = Invocation::new(["notes"]).with_arg("osd");
        let err = prepare(&["notes"], invocation, "").unwrap_err();
        assert!(matches!(err, HoloError::InvalidArgument { .. }));
    }

    #[test]
    fn create_component_checks_owner_email() {
        let invocation = Invocation::new(["components", "create"])
            .with_arg("osd")
            .with_value(FLAG_OWNER, "steve");
        let err = prepare(&["components", "create"], invocation, "").unwrap_err();
        assert!(matches!(err, HoloError::InvalidArgument { .. }));
    }

    #[test]
    fn command_matches_registry_path() {
        let request = Request::CutRelease {
            name: "Thundercat1A177".to_owned(),
            base: None,
            force: false,
        };
        assert_eq!(request.command(), "releases cut");
        assert_eq!(
            request.fields(),
            [
                ("RELEASE", "Thundercat1A177".to_owned()),
                (FLAG_BASE, String::new()),
                (FLAG_FORCE, "false".to_owned()),
            ]
        );
    }
}
