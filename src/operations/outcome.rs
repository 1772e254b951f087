//! Results of executed requests and how they are printed

use crate::model::{
    Artifact, Component, Notes, Release, Reversion, Submission, SubmissionId, TIMESTAMP_FORMAT,
    Train,
};
use std::fmt;
use std::path::PathBuf;

/// What an executed request produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Artifacts(Vec<Artifact>),
    Uploaded(Artifact),
    Downloaded { filename: String, path: PathBuf },
    Components(Vec<Component>),
    Component(Component),
    Trains(Vec<Train>),
    Train(Train),
    Releases(Vec<Release>),
    Release(Release),
    Notes(Notes),
    Reverted(Vec<Reversion>),
    Submitted(Submission),
    Which(SubmissionId),
    Done,
}

fn write_list<'a, I>(f: &mut fmt::Formatter<'_>, heading: &str, items: I) -> fmt::Result
where
    I: IntoIterator<Item = &'a str>,
{
    let items: Vec<&str> = items.into_iter().collect();
    if items.is_empty() {
        return writeln!(f, "{heading}: (none)");
    }
    writeln!(f, "{heading}:")?;
    for item in items {
        writeln!(f, "  {item}")?;
    }
    Ok(())
}

fn write_component(f: &mut fmt::Formatter<'_>, component: &Component) -> fmt::Result {
    writeln!(f, "Component: {}", component.name)?;
    writeln!(f, "Created: {}", component.created.format(TIMESTAMP_FORMAT))?;
    writeln!(f, "Owner: {}", component.owner)?;
    writeln!(f, "Repo: {}", component.repo.as_deref().unwrap_or("(none)"))?;
    write_list(
        f,
        "Train membership",
        component.trains.iter().map(String::as_str),
    )
}

fn write_train(f: &mut fmt::Formatter<'_>, train: &Train) -> fmt::Result {
    writeln!(f, "Train: {}", train.name)?;
    writeln!(f, "Created: {}", train.created.format(TIMESTAMP_FORMAT))?;
    if let Some(base) = &train.base {
        writeln!(f, "Base: {base}")?;
    }
    writeln!(
        f,
        "Latest release: {}",
        train.latest_release().unwrap_or("(none)")
    )?;
    write_list(
        f,
        "Component membership",
        train.members.iter().map(String::as_str),
    )
}

fn write_release(f: &mut fmt::Formatter<'_>, release: &Release) -> fmt::Result {
    writeln!(f, "Release: {}", release.name)?;
    writeln!(f, "Train: {}", release.train)?;
    writeln!(f, "Created: {}", release.created.format(TIMESTAMP_FORMAT))?;
    writeln!(f, "Base: {}", release.base.as_deref().unwrap_or("(none)"))?;
    let manifest: Vec<String> = release.manifest.values().map(ToString::to_string).collect();
    write_list(f, "Submissions", manifest.iter().map(String::as_str))
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Artifacts(artifacts) => {
                for artifact in artifacts {
                    writeln!(f, "{}\t{} bytes", artifact.filename, artifact.size)?;
                }
                Ok(())
            }
            Self::Uploaded(artifact) => writeln!(
                f,
                "Uploaded {} ({} bytes) to {}",
                artifact.filename, artifact.size, artifact.release
            ),
            Self::Downloaded { filename, path } => {
                writeln!(f, "Downloaded {filename} to {}", path.display())
            }
            Self::Components(components) => {
                for component in components {
                    writeln!(f, "{}", component.name)?;
                }
                Ok(())
            }
            Self::Component(component) => write_component(f, component),
            Self::Trains(trains) => {
                for train in trains {
                    writeln!(f, "{}", train.name)?;
                }
                Ok(())
            }
            Self::Train(train) => write_train(f, train),
            Self::Releases(releases) => {
                for release in releases {
                    writeln!(f, "{}", release.name)?;
                }
                Ok(())
            }
            Self::Release(release) => write_release(f, release),
            Self::Notes(notes) => write!(f, "{notes}"),
            Self::Reverted(reversions) => {
                for reversion in reversions {
                    writeln!(
                        f,
                        "{}: {} is now the head",
                        reversion.train, reversion.selected
                    )?;
                    for id in &reversion.superseded {
                        writeln!(f, "  reverted {id}")?;
                    }
                }
                Ok(())
            }
            Self::Submitted(submission) => {
                writeln!(f, "Submitted {} by {}", submission.id, submission.submitter)?;
                write_list(f, "Trains", submission.trains.iter().map(String::as_str))
            }
            Self::Which(id) => writeln!(f, "{id}"),
            Self::Done => writeln!(f, "Success!"),
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use chrono::{TimeZone as _, Utc};
    use std::collections::BTreeSet;

    #[test]
    fn component_description() {
        let component = Component {
            name: "osd".to_owned(),
            created: Utc.with_ymd_and_hms(2017, 3, 1, 14, 5, 0).unwrap(),
            owner: "steve@example.com".to_owned(),
            repo: None,
            trains: BTreeSet::from(["Thundercat".to_owned(), "ThundercatDeuce".to_owned()]),
        };
        assert_eq!(
            Outcome::Component(component).to_string(),
            "Component: osd\n\
             Created: 2017-03-01 02:05PM UTC\n\
             Owner: steve@example.com\n\
             Repo: (none)\n\
             Train membership:\n  Thundercat\n  ThundercatDeuce\n"
        );
    }

    #[test]
    fn done_prints_success() {
        assert_eq!(Outcome::Done.to_string(), "Success!\n");
    }
}
