//! Domain model
//!
//! Components, build trains, releases, submissions and artifacts as the
//! command surface refers to them.

pub mod submission;

pub use submission::{Sequence, SubmissionId};

use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// Timestamp format used when describing entities
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %I:%M%p %Z";

/// A named unit of source code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub created: DateTime<Utc>,
    /// Email of the owner
    pub owner: String,
    pub repo: Option<String>,
    /// Trains this component is a member of
    pub trains: BTreeSet<String>,
}

/// A named lineage of releases
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Train {
    pub name: String,
    pub created: DateTime<Utc>,
    /// Train this one was cloned from
    pub base: Option<String>,
    pub members: BTreeSet<String>,
    /// Release names, oldest first
    pub releases: Vec<String>,
}

impl Train {
    /// Most recently cut or cloned release
    #[must_use]
    pub fn latest_release(&self) -> Option<&str> {
        self.releases.last().map(String::as_str)
    }
}

/// An immutable snapshot cut from a train
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub name: String,
    pub train: String,
    pub created: DateTime<Utc>,
    pub base: Option<String>,
    /// Every submission the release carries, including those inherited from its base
    pub submissions: BTreeSet<SubmissionId>,
    /// The version of each component that appears in the release
    pub manifest: BTreeMap<String, SubmissionId>,
}

/// A specific version of a component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: SubmissionId,
    pub submitter: String,
    pub created: DateTime<Utc>,
    pub notes: Vec<String>,
    pub src_root: PathBuf,
    /// Trains the submission is linked to
    pub trains: BTreeSet<String>,
    /// Trains on which the submission has been superseded by a revert
    pub reverted: BTreeSet<String>,
}

impl Submission {
    /// Whether the submission is linked to `train` and not reverted there
    #[must_use]
    pub fn is_live_on(&self, train: &str) -> bool {
        self.trains.contains(train) && !self.reverted.contains(train)
    }
}

/// Release notes of a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notes {
    pub submission: SubmissionId,
    pub submitter: String,
    pub created: DateTime<Utc>,
    pub lines: Vec<String>,
}

impl fmt::Display for Notes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Submitted by: {}", self.submitter)?;
        writeln!(f, "Date: {}", self.created.format(TIMESTAMP_FORMAT))?;
        writeln!(f)?;
        for line in &self.lines {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

/// A build output file tied to a release
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub size: u64,
    pub release: String,
}

/// Result of reverting a component on one train
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reversion {
    pub train: String,
    /// Submission that is now the head on the train
    pub selected: SubmissionId,
    /// Newer submissions superseded on the train, oldest first
    pub superseded: Vec<SubmissionId>,
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "This is a test module")]
mod tests {
    use super::*;
    use chrono::TimeZone as _;

    #[test]
    fn live_only_on_linked_trains_not_reverted() {
        let mut submission = Submission {
            id: "osd-38".parse().unwrap(),
            submitter: "steve@example.com".to_owned(),
            created: Utc.with_ymd_and_hms(2017, 3, 1, 14, 5, 0).unwrap(),
            notes: Vec::new(),
            src_root: PathBuf::from("/work/osd"),
            trains: BTreeSet::from(["Thundercat".to_owned(), "Avalanche".to_owned()]),
            reverted: BTreeSet::new(),
        };
        assert!(submission.is_live_on("Thundercat"));
        assert!(!submission.is_live_on("Blizzard"));

        submission.reverted.insert("Thundercat".to_owned());
        assert!(!submission.is_live_on("Thundercat"));
        assert!(submission.is_live_on("Avalanche"));
    }
}
