use std::path::Path;

use glam::IVec3;
use voxmerge_core::constants::VOLUME_FILE_EXTENSION;
use voxmerge_core::types::MaterialId;

use crate::chunk;
use crate::error::VolumeError;
use crate::volume::VoxelVolume;

/// Loading, saving and allocating voxel volumes.
///
/// The merge engine only reaches storage through this trait.
pub trait VoxelStorage {
    fn load(&self, path: &Path) -> Result<VoxelVolume, VolumeError>;

    /// Persist `volume` at `path`. A failed save leaves no partial file at `path`.
    fn save(&self, volume: &VoxelVolume, path: &Path) -> Result<(), VolumeError>;

    fn create_empty(
        &self,
        size: IVec3,
        default_material: MaterialId,
    ) -> Result<VoxelVolume, VolumeError> {
        VoxelVolume::new(size, default_material)
    }

    /// Extension (without dot) of persisted volume files.
    fn file_extension(&self) -> &'static str;
}

/// Storage backed by `.vxv` files on the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStorage;

impl VoxelStorage for FileStorage {
    fn load(&self, path: &Path) -> Result<VoxelVolume, VolumeError> {
        let bytes = std::fs::read(path).map_err(|source| VolumeError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let data = voxmerge_persist::load(&bytes).map_err(|source| VolumeError::Format {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "loaded {} ({}x{}x{}, {} chunks)",
            path.display(),
            data.size.x,
            data.size.y,
            data.size.z,
            data.chunks.len()
        );
        chunk::from_chunks(data.size, data.world_origin, &data.chunks)
    }

    fn save(&self, volume: &VoxelVolume, path: &Path) -> Result<(), VolumeError> {
        let chunks = chunk::to_chunks(volume);
        let bytes = voxmerge_persist::save(volume.size(), volume.world_origin(), &chunks);
        voxmerge_persist::write_atomic(path, &bytes).map_err(|source| VolumeError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    fn file_extension(&self) -> &'static str {
        VOLUME_FILE_EXTENSION
    }
}
