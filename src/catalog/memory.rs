//! In-memory release catalog

use crate::catalog::ReleaseManager;
use crate::config::validation::{validate_email, validate_name};
use crate::error::HoloError;
use crate::model::{
    Artifact, Component, Notes, Release, Reversion, Submission, SubmissionId, Train,
};
use crate::system::System;
use crate::utils::path::{artifact_file_name, resolve_destination};
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

struct StoredArtifact {
    artifact: Artifact,
    contents: Vec<u8>,
}

/// Catalog of components, trains, releases and submissions held in memory
///
/// Artifact bytes are read from and written to files through the
/// [`System`] abstraction.
pub struct Catalog<'sys> {
    system: &'sys dyn System,
    user: String,
    components: BTreeMap<String, Component>,
    trains: BTreeMap<String, Train>,
    releases: BTreeMap<String, Release>,
    submissions: BTreeMap<SubmissionId, Submission>,
    artifacts: BTreeMap<String, BTreeMap<String, StoredArtifact>>,
}

impl<'sys> Catalog<'sys> {
    /// Empty catalog recording `user` as submitter
    #[must_use]
    pub fn new<S: Into<String>>(system: &'sys dyn System, user: S) -> Self {
        Self {
            system,
            user: user.into(),
            components: BTreeMap::new(),
            trains: BTreeMap::new(),
            releases: BTreeMap::new(),
            submissions: BTreeMap::new(),
            artifacts: BTreeMap::new(),
        }
    }

    /// Current head of `component` on `train`
    #[must_use]
    pub fn head(&self, component: &str, train: &str) -> Option<&SubmissionId> {
        self.history(component, train)
            .into_iter()
            .rev()
            .find(|submission| submission.is_live_on(train))
            .map(|submission| &submission.id)
    }

    /// Heads of `train` that its latest release does not carry yet
    ///
    /// # Errors
    ///
    /// Returns an error if the train does not exist
    pub fn pending(&self, train: &str) -> Result<Vec<SubmissionId>, HoloError> {
        let train = self.train(train)?;
        let base = self.latest_release_of(train)?;
        Ok(self.pending_against(train, base))
    }

    fn component(&self, name: &str) -> Result<&Component, HoloError> {
        self.components
            .get(name)
            .ok_or_else(|| HoloError::not_found(format!("component '{name}'")))
    }

    fn train(&self, name: &str) -> Result<&Train, HoloError> {
        self.trains
            .get(name)
            .ok_or_else(|| HoloError::not_found(format!("train '{name}'")))
    }

    fn release(&self, name: &str) -> Result<&Release, HoloError> {
        self.releases
            .get(name)
            .ok_or_else(|| HoloError::not_found(format!("release '{name}'")))
    }

    fn latest_release_of(&self, train: &Train) -> Result<Option<&Release>, HoloError> {
        train
            .latest_release()
            .map(|name| self.release(name))
            .transpose()
    }

    /// Train a new release belongs to: the longest train name it starts with
    fn train_for_release(&self, release: &str) -> Result<&Train, HoloError> {
        self.trains
            .values()
            .filter(|train| {
                release
                    .strip_prefix(train.name.as_str())
                    .is_some_and(|rest| !rest.is_empty())
            })
            .max_by_key(|train| train.name.len())
            .ok_or_else(|| HoloError::not_found(format!("train for release '{release}'")))
    }

    /// Submissions of `component` linked to `train`, oldest first
    fn history(&self, component: &str, train: &str) -> Vec<&Submission> {
        self.submissions
            .values()
            .filter(|submission| {
                submission.id.component() == component && submission.trains.contains(train)
            })
            .collect()
    }

    fn pending_against(&self, train: &Train, base: Option<&Release>) -> Vec<SubmissionId> {
        train
            .members
            .iter()
            .filter_map(|member| {
                let head = self.head(member, &train.name)?;
                let released = base.and_then(|release| release.manifest.get(member));
                (released != Some(head)).then(|| head.clone())
            })
            .collect()
    }

    fn write_artifact(&self, target: &Path, contents: &[u8]) -> Result<(), HoloError> {
        if let Some(parent) = target.parent()
            && !parent.as_os_str().is_empty()
        {
            self.system.create_dir_all(parent).map_err(|e| {
                HoloError::filesystem(format!(
                    "Failed to create directory {}: {e}",
                    parent.display()
                ))
            })?;
        }
        self.system.write(target, contents).map_err(|e| {
            HoloError::filesystem(format!("Failed to write {}: {e}", target.display()))
        })
    }
}

impl ReleaseManager for Catalog<'_> {
    fn list_artifacts(&self, release: &str) -> Result<Vec<Artifact>, HoloError> {
        self.release(release)?;
        Ok(self
            .artifacts
            .get(release)
            .map(|stored| stored.values().map(|s| s.artifact.clone()).collect())
            .unwrap_or_default())
    }

    fn put_artifact(
        &mut self,
        filename: &Path,
        release: &str,
        force: bool,
    ) -> Result<Artifact, HoloError> {
        self.release(release)?;
        if !self.system.is_file(filename) {
            return Err(HoloError::filesystem(format!(
                "Artifact file not found: {}",
                filename.display()
            )));
        }
        let name = artifact_file_name(filename)?;
        let contents = self.system.read(filename).map_err(|e| {
            HoloError::filesystem(format!("Failed to read {}: {e}", filename.display()))
        })?;

        let stored = self.artifacts.entry(release.to_owned()).or_default();
        if stored.contains_key(&name) && !force {
            return Err(HoloError::already_exists(format!(
                "artifact '{name}' in release '{release}'"
            )));
        }

        let artifact = Artifact {
            filename: name.clone(),
            size: u64::try_from(contents.len()).unwrap_or(u64::MAX),
            release: release.to_owned(),
        };
        stored.insert(
            name,
            StoredArtifact {
                artifact: artifact.clone(),
                contents,
            },
        );
        info!(
            "Uploaded {} ({} bytes) to {release}",
            artifact.filename, artifact.size
        );
        Ok(artifact)
    }

    fn get_artifact(
        &self,
        filename: &str,
        destination: &Path,
        release: &str,
    ) -> Result<PathBuf, HoloError> {
        self.release(release)?;
        let stored = self
            .artifacts
            .get(release)
            .and_then(|stored| stored.get(filename))
            .ok_or_else(|| {
                HoloError::not_found(format!("artifact '{filename}' in release '{release}'"))
            })?;

        let target = resolve_destination(self.system, destination, filename);
        self.write_artifact(&target, &stored.contents)?;
        info!("Downloaded {filename} from {release} to {}", target.display());
        Ok(target)
    }

    fn list_components(&self) -> Result<Vec<Component>, HoloError> {
        Ok(self.components.values().cloned().collect())
    }

    fn show_component(&self, name: &str) -> Result<Component, HoloError> {
        self.component(name).cloned()
    }

    fn create_component(
        &mut self,
        name: &str,
        owner: &str,
        repo: Option<&str>,
    ) -> Result<Component, HoloError> {
        validate_name("component", name)?;
        validate_email(owner)?;
        if self.components.contains_key(name) {
            return Err(HoloError::already_exists(format!("component '{name}'")));
        }

        let component = Component {
            name: name.to_owned(),
            created: Utc::now(),
            owner: owner.to_owned(),
            repo: repo.map(str::to_owned),
            trains: BTreeSet::new(),
        };
        self.components.insert(name.to_owned(), component.clone());
        info!("Created component {name}");
        Ok(component)
    }

    fn link_component(&mut self, name: &str, train: &str) -> Result<(), HoloError> {
        self.component(name)?;
        if self.train(train)?.members.contains(name) {
            return Err(HoloError::conflict(format!(
                "component '{name}' is already a member of train '{train}'"
            )));
        }

        if let Some(entry) = self.trains.get_mut(train) {
            entry.members.insert(name.to_owned());
        }
        if let Some(entry) = self.components.get_mut(name) {
            entry.trains.insert(train.to_owned());
        }
        info!("Linked {name} to {train}");
        Ok(())
    }

    fn unlink_component(&mut self, name: &str, train: &str, force: bool) -> Result<(), HoloError> {
        self.component(name)?;
        let entry = self.train(train)?;
        if !entry.members.contains(name) {
            return Err(HoloError::conflict(format!(
                "component '{name}' is not a member of train '{train}'"
            )));
        }
        if !force {
            let base = self.latest_release_of(entry)?;
            if let Some(pending) = self
                .pending_against(entry, base)
                .into_iter()
                .find(|id| id.component() == name)
            {
                return Err(HoloError::conflict(format!(
                    "{pending} is pending on train '{train}'; use --force to unlink anyway"
                )));
            }
        }

        if let Some(entry) = self.trains.get_mut(train) {
            entry.members.remove(name);
        }
        if let Some(entry) = self.components.get_mut(name) {
            entry.trains.remove(train);
        }
        info!("Unlinked {name} from {train}");
        Ok(())
    }

    fn list_trains(&self) -> Result<Vec<Train>, HoloError> {
        Ok(self.trains.values().cloned().collect())
    }

    fn show_train(&self, name: &str) -> Result<Train, HoloError> {
        self.train(name).cloned()
    }

    fn create_train(&mut self, name: &str, base: Option<&str>) -> Result<Train, HoloError> {
        validate_name("train", name)?;
        if self.trains.contains_key(name) {
            return Err(HoloError::already_exists(format!("train '{name}'")));
        }
        let members = match base {
            Some(base) => self.train(base)?.members.clone(),
            None => BTreeSet::new(),
        };

        for member in &members {
            if let Some(component) = self.components.get_mut(member) {
                component.trains.insert(name.to_owned());
            }
        }
        let train = Train {
            name: name.to_owned(),
            created: Utc::now(),
            base: base.map(str::to_owned),
            members,
            releases: Vec::new(),
        };
        self.trains.insert(name.to_owned(), train.clone());
        info!("Created train {name}");
        Ok(train)
    }

    fn list_releases(&self, train: &str) -> Result<Vec<Release>, HoloError> {
        self.train(train)?
            .releases
            .iter()
            .rev()
            .map(|name| self.release(name).cloned())
            .collect()
    }

    fn show_release(&self, name: &str) -> Result<Release, HoloError> {
        self.release(name).cloned()
    }

    fn cut_release(
        &mut self,
        name: &str,
        base: Option<&str>,
        force: bool,
    ) -> Result<Release, HoloError> {
        if self.releases.contains_key(name) {
            return Err(HoloError::already_exists(format!("release '{name}'")));
        }
        let train = self.train_for_release(name)?;
        let base_release = match base {
            Some(base) => {
                let release = self.release(base)?;
                if release.train != train.name {
                    return Err(HoloError::conflict(format!(
                        "base release '{base}' belongs to train '{}', not '{}'",
                        release.train, train.name
                    )));
                }
                Some(release)
            }
            None => self.latest_release_of(train)?,
        };

        let flushed = self.pending_against(train, base_release);
        if flushed.is_empty() && !force {
            return Err(HoloError::conflict(format!(
                "nothing is pending on train '{}'; use --force to cut anyway",
                train.name
            )));
        }

        let mut submissions = base_release
            .map(|release| release.submissions.clone())
            .unwrap_or_default();
        let mut manifest = base_release
            .map(|release| release.manifest.clone())
            .unwrap_or_default();
        for id in &flushed {
            submissions.insert(id.clone());
            manifest.insert(id.component().to_owned(), id.clone());
        }

        let release = Release {
            name: name.to_owned(),
            train: train.name.clone(),
            created: Utc::now(),
            base: base_release.map(|release| release.name.clone()),
            submissions,
            manifest,
        };
        if let Some(entry) = self.trains.get_mut(&release.train) {
            entry.releases.push(name.to_owned());
        }
        self.releases.insert(name.to_owned(), release.clone());
        info!("Cut {name} with {} new submissions", flushed.len());
        Ok(release)
    }

    fn clone_release(&mut self, name: &str, base: Option<&str>) -> Result<Release, HoloError> {
        if self.releases.contains_key(name) {
            return Err(HoloError::already_exists(format!("release '{name}'")));
        }
        let train = self.train_for_release(name)?;
        let base_name = match base {
            Some(base) => base,
            None => train
                .base
                .as_deref()
                .and_then(|parent| self.trains.get(parent))
                .and_then(Train::latest_release)
                .or_else(|| train.latest_release())
                .ok_or_else(|| {
                    HoloError::conflict(format!(
                        "no release to clone '{name}' from; use --base to name one"
                    ))
                })?,
        };
        let source = self.release(base_name)?;
        debug!("Cloning {name} from {base_name}");

        let release = Release {
            name: name.to_owned(),
            train: train.name.clone(),
            created: Utc::now(),
            base: Some(source.name.clone()),
            submissions: source.submissions.clone(),
            manifest: source.manifest.clone(),
        };
        if let Some(entry) = self.trains.get_mut(&release.train) {
            entry.releases.push(name.to_owned());
        }
        self.releases.insert(name.to_owned(), release.clone());
        info!("Cloned {name} from {}", release.base.as_deref().unwrap_or_default());
        Ok(release)
    }

    fn show_notes(&self, submission: &SubmissionId) -> Result<Notes, HoloError> {
        let entry = self
            .submissions
            .get(submission)
            .ok_or_else(|| HoloError::not_found(format!("submission '{submission}'")))?;
        Ok(Notes {
            submission: entry.id.clone(),
            submitter: entry.submitter.clone(),
            created: entry.created,
            lines: entry.notes.clone(),
        })
    }

    fn revert_submission(
        &mut self,
        submission: &SubmissionId,
        trains: &[String],
        force: bool,
    ) -> Result<Vec<Reversion>, HoloError> {
        let component = submission.component();
        let targets: Vec<String> = if trains.is_empty() {
            self.component(component)?.trains.iter().cloned().collect()
        } else {
            self.component(component)?;
            trains.to_vec()
        };
        if targets.is_empty() {
            return Err(HoloError::conflict(format!(
                "component '{component}' is not a member of any train"
            )));
        }

        let mut plan = Vec::with_capacity(targets.len());
        for train_name in &targets {
            let train = self.train(train_name)?;
            let history = self.history(component, train_name);
            let selected = history
                .iter()
                .rev()
                .find(|entry| entry.id.sequence() <= submission.sequence())
                .ok_or_else(|| {
                    HoloError::conflict(format!(
                        "train '{train_name}' has no submission of '{component}' at or before {submission}"
                    ))
                })?;
            let superseded: Vec<SubmissionId> = history
                .iter()
                .filter(|entry| {
                    entry.id.sequence() > submission.sequence() && entry.is_live_on(train_name)
                })
                .map(|entry| entry.id.clone())
                .collect();

            if !force && let Some(latest) = self.latest_release_of(train)? {
                let released = latest.manifest.get(component);
                if let Some(id) = superseded.iter().find(|id| Some(*id) == released) {
                    return Err(HoloError::conflict(format!(
                        "{id} is already in release '{}'; use --force to revert anyway",
                        latest.name
                    )));
                }
            }

            plan.push(Reversion {
                train: train_name.clone(),
                selected: selected.id.clone(),
                superseded,
            });
        }

        for reversion in &plan {
            if let Some(entry) = self.submissions.get_mut(&reversion.selected) {
                entry.reverted.remove(&reversion.train);
            }
            for id in &reversion.superseded {
                if let Some(entry) = self.submissions.get_mut(id) {
                    entry.reverted.insert(reversion.train.clone());
                }
            }
            info!(
                "{} is now the head of {component} on {}",
                reversion.selected, reversion.train
            );
        }
        Ok(plan)
    }

    fn submit(
        &mut self,
        submission: &SubmissionId,
        src_root: &Path,
        trains: &[String],
        notes: &[String],
        force: bool,
    ) -> Result<Submission, HoloError> {
        let component = self.component(submission.component())?;
        if self.submissions.contains_key(submission) {
            return Err(HoloError::already_exists(format!("submission '{submission}'")));
        }
        if !self.system.is_dir(src_root) {
            return Err(HoloError::filesystem(format!(
                "Source root is not a directory: {}",
                src_root.display()
            )));
        }

        let targets: BTreeSet<String> = if trains.is_empty() {
            component.trains.clone()
        } else {
            trains.iter().cloned().collect()
        };
        if targets.is_empty() {
            return Err(HoloError::conflict(format!(
                "component '{}' is not a member of any train",
                component.name
            )));
        }
        for train_name in &targets {
            if !self.train(train_name)?.members.contains(&component.name) {
                return Err(HoloError::conflict(format!(
                    "component '{}' is not a member of train '{train_name}'",
                    component.name
                )));
            }
            if !force
                && let Some(head) = self.head(&component.name, train_name)
                && head.sequence() >= submission.sequence()
            {
                return Err(HoloError::conflict(format!(
                    "{submission} is not newer than {head} on train '{train_name}'; use --force to submit anyway"
                )));
            }
        }

        let entry = Submission {
            id: submission.clone(),
            submitter: self.user.clone(),
            created: Utc::now(),
            notes: notes.to_vec(),
            src_root: src_root.to_path_buf(),
            trains: targets,
            reverted: BTreeSet::new(),
        };
        self.submissions.insert(submission.clone(), entry.clone());
        info!("Submitted {submission} by {}", entry.submitter);
        Ok(entry)
    }

    fn which(&self, component: &str, release: &str) -> Result<SubmissionId, HoloError> {
        self.release(release)?
            .manifest
            .get(component)
            .cloned()
            .ok_or_else(|| {
                HoloError::not_found(format!("component '{component}' in release '{release}'"))
            })
    }
}
