use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use voxmerge_merge::MergeOperation;

use crate::error::JobError;

fn default_name() -> String {
    "merged".to_string()
}

/// A merge described in RON:
///
/// ```ron
/// MergeJob(
///     volume_a: "roid_a.vxv",
///     volume_b: "roid_b.vxv",
///     operation: union_volume_a_to_b,
///     output_dir: "out",
///     name: "merged_roid",
///     remove_originals: false,
/// )
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeJob {
    pub volume_a: PathBuf,
    pub volume_b: PathBuf,
    pub operation: MergeOperation,
    pub output_dir: PathBuf,
    #[serde(default = "default_name")]
    pub name: String,
    /// Delete both source files once the merged volume has been saved.
    #[serde(default)]
    pub remove_originals: bool,
}

impl MergeJob {
    /// Rebase relative paths onto `base` (the job file's directory).
    pub fn resolve_relative_to(mut self, base: &Path) -> Self {
        for path in [&mut self.volume_a, &mut self.volume_b, &mut self.output_dir] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

/// Parse a job from a RON string. Paths are returned as written.
pub fn parse_job(ron_str: &str) -> Result<MergeJob, JobError> {
    let options = ron::Options::default();
    options
        .from_str(ron_str)
        .map_err(|e| JobError::ParseJob(e.to_string()))
}

/// Read a job file and resolve its paths against the file's directory.
pub fn load_job(path: &Path) -> Result<MergeJob, JobError> {
    let text = std::fs::read_to_string(path).map_err(|source| JobError::ReadJob {
        path: path.to_path_buf(),
        source,
    })?;
    let job = parse_job(&text)?;
    let base = path.parent().unwrap_or_else(|| Path::new("."));
    Ok(job.resolve_relative_to(base))
}
