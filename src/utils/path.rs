//! Path helpers for artifact transfer

use crate::error::HoloError;
use crate::system::System;
use std::path::{Path, PathBuf};

/// Final component of `path` as an artifact file name
///
/// # Errors
///
/// Returns an error if the path has no file name or it is not valid UTF-8
pub fn artifact_file_name(path: &Path) -> Result<String, HoloError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(str::to_owned)
        .ok_or_else(|| {
            HoloError::filesystem(format!(
                "Cannot use '{}' as an artifact file name",
                path.display()
            ))
        })
}

/// Where a downloaded artifact lands
///
/// An existing directory receives the artifact under its own file name; any
/// other destination is taken as the target file path.
#[must_use]
pub fn resolve_destination(system: &dyn System, destination: &Path, filename: &str) -> PathBuf {
    if system.is_dir(destination) {
        return destination.join(filename);
    }
    destination.to_path_buf()
}
