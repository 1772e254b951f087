//! Domain operations behind the holo commands
//!
//! [`ReleaseManager`] is the seam every command action calls into.
//! [`Catalog`] implements it in memory.

pub mod memory;

pub use memory::Catalog;

use crate::error::HoloError;
use crate::model::{
    Artifact, Component, Notes, Release, Reversion, Submission, SubmissionId, Train,
};
use std::path::{Path, PathBuf};

/// Operations on components, trains, releases, submissions and artifacts
pub trait ReleaseManager {
    // ==================== Artifacts ====================

    /// Artifacts of a release, ordered by file name
    fn list_artifacts(&self, release: &str) -> Result<Vec<Artifact>, HoloError>;

    /// Upload a file as an artifact of `release`; `force` replaces an existing one
    fn put_artifact(
        &mut self,
        filename: &Path,
        release: &str,
        force: bool,
    ) -> Result<Artifact, HoloError>;

    /// Download an artifact, returning the path written
    fn get_artifact(
        &self,
        filename: &str,
        destination: &Path,
        release: &str,
    ) -> Result<PathBuf, HoloError>;

    // ==================== Components ====================

    fn list_components(&self) -> Result<Vec<Component>, HoloError>;

    fn show_component(&self, name: &str) -> Result<Component, HoloError>;

    fn create_component(
        &mut self,
        name: &str,
        owner: &str,
        repo: Option<&str>,
    ) -> Result<Component, HoloError>;

    /// Make a component a member of a train
    fn link_component(&mut self, name: &str, train: &str) -> Result<(), HoloError>;

    /// Remove a component from a train; `force` allows it while submissions are pending
    fn unlink_component(&mut self, name: &str, train: &str, force: bool) -> Result<(), HoloError>;

    // ==================== Trains ====================

    fn list_trains(&self) -> Result<Vec<Train>, HoloError>;

    fn show_train(&self, name: &str) -> Result<Train, HoloError>;

    /// Create a train, cloning the membership of `base` when given
    fn create_train(&mut self, name: &str, base: Option<&str>) -> Result<Train, HoloError>;

    // ==================== Releases ====================

    /// Releases of a train, newest first
    fn list_releases(&self, train: &str) -> Result<Vec<Release>, HoloError>;

    fn show_release(&self, name: &str) -> Result<Release, HoloError>;

    /// Cut a release by flushing the train's pending submissions on top of `base`
    fn cut_release(
        &mut self,
        name: &str,
        base: Option<&str>,
        force: bool,
    ) -> Result<Release, HoloError>;

    /// Create a release as a copy of an existing one
    fn clone_release(&mut self, name: &str, base: Option<&str>) -> Result<Release, HoloError>;

    // ==================== Submissions ====================

    fn show_notes(&self, submission: &SubmissionId) -> Result<Notes, HoloError>;

    /// Roll a component back to `submission` on each of `trains`
    /// (every train of the component when empty)
    fn revert_submission(
        &mut self,
        submission: &SubmissionId,
        trains: &[String],
        force: bool,
    ) -> Result<Vec<Reversion>, HoloError>;

    /// Record a new version of a component on `trains`
    /// (every train of the component when empty)
    fn submit(
        &mut self,
        submission: &SubmissionId,
        src_root: &Path,
        trains: &[String],
        notes: &[String],
        force: bool,
    ) -> Result<Submission, HoloError>;

    /// Version of a component that appeared in a release
    fn which(&self, component: &str, release: &str) -> Result<SubmissionId, HoloError>;
}
