use std::path::PathBuf;

use glam::DVec3;
use thiserror::Error;
use voxmerge_volume::VolumeError;

/// Errors that abort a merge. Nothing is retried.
#[derive(Debug, Error)]
pub enum MergeError {
    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error("work directory {} is not usable: {source}", path.display())]
    WorkDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid entity name {0:?}")]
    InvalidName(String),

    #[error("world origin {0} is outside the supported range")]
    OriginOutOfRange(DVec3),

    #[error("both sources refer to the same file {}", .0.display())]
    SameSource(PathBuf),
}
