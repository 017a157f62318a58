use std::path::PathBuf;

use thiserror::Error;
use voxmerge_core::CoreError;
use voxmerge_merge::MergeError;
use voxmerge_volume::VolumeError;

#[derive(Debug, Error)]
pub enum JobError {
    #[error("{0}")]
    Usage(String),

    #[error("failed to read job file {}: {source}", path.display())]
    ReadJob {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse job RON: {0}")]
    ParseJob(String),

    #[error("failed to remove original {}: {source}", path.display())]
    RemoveOriginal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report {}: {source}", path.display())]
    WriteReport {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Volume(#[from] VolumeError),

    #[error(transparent)]
    Merge(#[from] MergeError),
}
