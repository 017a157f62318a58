//! Conversion between dense volumes and the 32^3 chunk snapshots the
//! persisted format stores.

use glam::{DVec3, IVec3};
use voxmerge_core::constants::{BYTES_PER_CHUNK, CELL_BYTES, CHUNK_SIZE};
use voxmerge_core::math::{chunk_grid, local_index};
use voxmerge_core::types::{Cell, ContentBounds, MaterialId};
use voxmerge_persist::ChunkSnapshot;

use crate::error::VolumeError;
use crate::volume::VoxelVolume;

/// Split a volume into chunk snapshots covering the whole grid.
/// Cells of edge chunks beyond the volume's size are written as vacuum.
pub fn to_chunks(volume: &VoxelVolume) -> Vec<ChunkSnapshot> {
    let grid = chunk_grid(volume.size());
    let cs = CHUNK_SIZE as i32;
    let stride = CELL_BYTES as usize;
    let all = ContentBounds::new(IVec3::ZERO, grid - IVec3::ONE);

    all.iter()
        .map(|coord| {
            let mut cell_data = vec![0u8; BYTES_PER_CHUNK as usize];
            let base = coord * cs;
            for local in ContentBounds::new(IVec3::ZERO, IVec3::splat(cs - 1)).iter() {
                let cell_coord = base + local;
                if !volume.contains(cell_coord) {
                    continue;
                }
                let cell = volume.cell(cell_coord);
                let at = local_index(local) * stride;
                cell_data[at] = cell.material.0;
                cell_data[at + 1] = cell.fill;
                cell_data[at + 2] = cell.flags;
            }
            ChunkSnapshot { coord, cell_data }
        })
        .collect()
}

/// Rebuild a volume from decoded chunks. Cells not covered by any chunk stay vacuum.
pub fn from_chunks(
    size: IVec3,
    world_origin: DVec3,
    chunks: &[(IVec3, Vec<u8>)],
) -> Result<VoxelVolume, VolumeError> {
    let mut volume = VoxelVolume::new(size, MaterialId(0))?.with_world_origin(world_origin);
    let cs = CHUNK_SIZE as i32;
    let stride = CELL_BYTES as usize;

    for (coord, cell_data) in chunks {
        let base = *coord * cs;
        for local in ContentBounds::new(IVec3::ZERO, IVec3::splat(cs - 1)).iter() {
            let cell_coord = base + local;
            if !volume.contains(cell_coord) {
                continue;
            }
            let at = local_index(local) * stride;
            let Some(bytes) = cell_data.get(at..at + stride) else {
                continue;
            };
            volume.set_cell(
                cell_coord,
                Cell {
                    material: MaterialId(bytes[0]),
                    fill: bytes[1],
                    flags: bytes[2],
                },
            );
        }
    }

    Ok(volume)
}
