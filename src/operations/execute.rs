//! Applying requests to a release manager

use crate::catalog::ReleaseManager;
use crate::error::HoloError;
use crate::operations::outcome::Outcome;
use crate::operations::request::Request;
use tracing::debug;

impl Request {
    /// Run the request against `manager`
    ///
    /// # Errors
    ///
    /// Returns whatever error the manager reports for the operation
    pub fn execute(&self, manager: &mut dyn ReleaseManager) -> Result<Outcome, HoloError> {
        debug!("Executing {}", self.command());
        let outcome = match self {
            Self::Notes { submission } => Outcome::Notes(manager.show_notes(submission)?),
            Self::Revert {
                submission,
                trains,
                force,
            } => Outcome::Reverted(manager.revert_submission(submission, trains, *force)?),
            Self::Submit {
                submission,
                src_root,
                trains,
                notes,
                force,
            } => Outcome::Submitted(manager.submit(submission, src_root, trains, notes, *force)?),
            Self::Which { component, release } => {
                Outcome::Which(manager.which(component, release)?)
            }
            Self::ListArtifacts { release } => Outcome::Artifacts(manager.list_artifacts(release)?),
            Self::PutArtifact {
                filename,
                release,
                force,
            } => Outcome::Uploaded(manager.put_artifact(filename, release, *force)?),
            Self::GetArtifact {
                filename,
                destination,
                release,
            } => Outcome::Downloaded {
                filename: filename.clone(),
                path: manager.get_artifact(filename, destination, release)?,
            },
            Self::ListComponents => Outcome::Components(manager.list_components()?),
            Self::ShowComponent { name } => Outcome::Component(manager.show_component(name)?),
            Self::CreateComponent { name, owner, repo } => {
                Outcome::Component(manager.create_component(name, owner, repo.as_deref())?)
            }
            Self::LinkComponent { name, train } => {
                manager.link_component(name, train)?;
                Outcome::Done
            }
            Self::UnlinkComponent { name, train, force } => {
                manager.unlink_component(name, train, *force)?;
                Outcome::Done
            }
            Self::ListReleases { train } => Outcome::Releases(manager.list_releases(train)?),
            Self::ShowRelease { name } => Outcome::Release(manager.show_release(name)?),
            Self::CutRelease { name, base, force } => {
                Outcome::Release(manager.cut_release(name, base.as_deref(), *force)?)
            }
            Self::CloneRelease { name, base } => {
                Outcome::Release(manager.clone_release(name, base.as_deref())?)
            }
            Self::ListTrains => Outcome::Trains(manager.list_trains()?),
            Self::ShowTrain { name } => Outcome::Train(manager.show_train(name)?),
            Self::CreateTrain { name, base } => {
                Outcome::Train(manager.create_train(name, base.as_deref())?)
            }
        };
        Ok(outcome)
    }
}
