use std::path::PathBuf;

use glam::IVec3;
use voxmerge_core::types::Placement;
use voxmerge_volume::{VoxelStorage, VoxelVolume};

use crate::engine::WorldContext;
use crate::error::MergeError;
use crate::sizer::TargetSize;

/// A merged volume persisted to a temporary file, ready for the world model
/// to adopt as a new entity or as a replacement for an existing one.
#[derive(Debug, Clone)]
pub struct MergeResult {
    pub volume: VoxelVolume,
    pub placement: Placement,
    /// File holding the serialized volume. Not yet referenced by any world.
    pub source_file: PathBuf,
    pub name: String,
}

impl MergeResult {
    pub fn size(&self) -> IVec3 {
        self.volume.size()
    }
}

/// Place the destination volume, save it under the context's work directory
/// and describe where it belongs. The source volumes' files are not touched.
pub fn package<S: VoxelStorage + ?Sized>(
    storage: &S,
    mut volume: VoxelVolume,
    target: &TargetSize,
    ctx: &WorldContext,
) -> Result<MergeResult, MergeError> {
    validate_name(&ctx.entity_name)?;

    std::fs::create_dir_all(&ctx.work_dir).map_err(|source| MergeError::WorkDir {
        path: ctx.work_dir.clone(),
        source,
    })?;

    let position = target.world_min.as_dvec3() + target.placement_offset;
    volume.set_world_origin(position);

    let source_file = ctx
        .work_dir
        .join(format!("{}.{}", ctx.entity_name, storage.file_extension()));
    storage.save(&volume, &source_file)?;

    log::info!(
        "saved merged volume '{}' to {}",
        ctx.entity_name,
        source_file.display()
    );

    Ok(MergeResult {
        volume,
        placement: Placement::at(position),
        source_file,
        name: ctx.entity_name.clone(),
    })
}

fn validate_name(name: &str) -> Result<(), MergeError> {
    let bad = name.is_empty()
        || name == "."
        || name == ".."
        || name
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '\0'));
    if bad {
        return Err(MergeError::InvalidName(name.to_string()));
    }
    Ok(())
}
