use std::collections::HashSet;

use glam::{DVec3, IVec3};
use voxmerge_core::math::chunk_grid;

use crate::compat;
use crate::compress;
use crate::error::PersistError;
use crate::format::*;

/// Parsed volume file data ready for volume reconstruction.
pub struct VolumeData {
    pub header: VolumeHeader,
    pub size: IVec3,
    pub world_origin: DVec3,
    /// Chunks as (coordinate, decompressed cell bytes).
    pub chunks: Vec<(IVec3, Vec<u8>)>,
    /// Compatibility warnings (e.g. unaligned size).
    pub warnings: Vec<String>,
}

/// Load and parse a volume file from raw bytes.
pub fn load(bytes: &[u8]) -> Result<VolumeData, PersistError> {
    if bytes.len() < HEADER_SIZE {
        return Err(PersistError::FileTooSmall(bytes.len(), HEADER_SIZE));
    }

    let header = VolumeHeader::read(bytes);
    let warnings = compat::validate_header(&header)?;

    let size = IVec3::new(
        header.size[0] as i32,
        header.size[1] as i32,
        header.size[2] as i32,
    );
    let grid = chunk_grid(size);
    let chunk_count = header.chunk_count as usize;

    let table_end = HEADER_SIZE + chunk_count * CHUNK_TABLE_ENTRY_SIZE;
    if bytes.len() < table_end {
        return Err(PersistError::TruncatedFile {
            expected: table_end,
            actual: bytes.len(),
        });
    }

    let mut seen = HashSet::with_capacity(chunk_count);
    let mut chunks = Vec::with_capacity(chunk_count);
    for i in 0..chunk_count {
        let entry_start = HEADER_SIZE + i * CHUNK_TABLE_ENTRY_SIZE;
        let entry = &bytes[entry_start..entry_start + CHUNK_TABLE_ENTRY_SIZE];

        let cx = i16::from_le_bytes([entry[0], entry[1]]) as i32;
        let cy = i16::from_le_bytes([entry[2], entry[3]]) as i32;
        let cz = i16::from_le_bytes([entry[4], entry[5]]) as i32;
        let mut offset_bytes = [0u8; 8];
        offset_bytes.copy_from_slice(&entry[6..14]);
        let mut size_bytes = [0u8; 4];
        size_bytes.copy_from_slice(&entry[14..18]);
        let offset = u64::from_le_bytes(offset_bytes) as usize;
        let block_size = u32::from_le_bytes(size_bytes) as usize;

        let coord = IVec3::new(cx, cy, cz);
        if coord.cmplt(IVec3::ZERO).any() || coord.cmpge(grid).any() {
            return Err(PersistError::ChunkOutOfRange(cx, cy, cz));
        }
        if !seen.insert(coord) {
            return Err(PersistError::DuplicateChunk(cx, cy, cz));
        }

        let end = offset
            .checked_add(block_size)
            .ok_or(PersistError::TruncatedFile {
                expected: usize::MAX,
                actual: bytes.len(),
            })?;
        if end > bytes.len() {
            return Err(PersistError::TruncatedFile {
                expected: end,
                actual: bytes.len(),
            });
        }

        let block = &bytes[offset..end];
        let cell_data = if compress::is_fill(block) {
            compress::expand_fill(block)?
        } else {
            compress::decompress_chunk(block)?
        };

        chunks.push((coord, cell_data));
    }

    for warning in &warnings {
        log::warn!("{warning}");
    }

    Ok(VolumeData {
        header,
        size,
        world_origin: DVec3::from_array(header.world_origin),
        chunks,
        warnings,
    })
}
