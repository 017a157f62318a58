use std::path::PathBuf;

use glam::IVec3;
use thiserror::Error;
use voxmerge_persist::PersistError;

/// Errors raised by the voxel volume accessor.
#[derive(Debug, Error)]
pub enum VolumeError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid voxel file {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: PersistError,
    },

    #[error("invalid volume dimensions {0}")]
    InvalidDimensions(IVec3),
}
