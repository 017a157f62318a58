use glam::{DVec3, IVec3};
use voxmerge_core::constants::{CHUNK_SIZE, STORAGE_CHUNK};
use voxmerge_core::math::{is_allocatable, is_placeable};

use crate::error::PersistError;
use crate::format::{VolumeHeader, FORMAT_VERSION, MAGIC};

/// Validate a volume header and return any compatibility warnings.
///
/// Returns Ok(warnings) on success, Err on fatal errors.
/// A size that is not a multiple of the game's storage chunk produces a
/// warning, not an error.
pub fn validate_header(header: &VolumeHeader) -> Result<Vec<String>, PersistError> {
    if header.magic != MAGIC {
        return Err(PersistError::InvalidMagic);
    }

    if header.version != FORMAT_VERSION {
        return Err(PersistError::UnsupportedVersion(header.version));
    }

    if header.chunk_size as u32 != CHUNK_SIZE {
        return Err(PersistError::UnsupportedChunkSize(header.chunk_size));
    }

    // Axes above i32::MAX wrap negative and fail the extent check.
    if !is_allocatable(IVec3::from_array(header.size.map(|axis| axis as i32))) {
        return Err(PersistError::InvalidDimensions(header.size));
    }

    if !is_placeable(DVec3::from_array(header.world_origin)) {
        return Err(PersistError::InvalidOrigin(header.world_origin));
    }

    let mut warnings = Vec::new();

    if header
        .size
        .iter()
        .any(|&axis| axis % STORAGE_CHUNK as u32 != 0)
    {
        warnings.push(format!(
            "Volume size {:?} is not a multiple of {} cells; \
             the game may resize it on load and clip content.",
            header.size, STORAGE_CHUNK
        ));
    }

    Ok(warnings)
}
