use glam::{DVec3, IVec3};
use voxmerge_core::constants::CHUNK_SIZE;

use crate::compress;
use crate::format::*;

/// A snapshot of one chunk's cell bytes for serialization.
pub struct ChunkSnapshot {
    /// Chunk coordinate (each unit = CHUNK_SIZE cells).
    pub coord: IVec3,
    /// CELLS_PER_CHUNK cells of (material, fill, flags), x fastest.
    pub cell_data: Vec<u8>,
}

/// Serialize a volume into the voxel volume binary format.
///
/// Layout: header (64B) + chunk table (18B × N) + data blocks.
pub fn save(size: IVec3, world_origin: DVec3, chunks: &[ChunkSnapshot]) -> Vec<u8> {
    let chunk_count = chunks.len() as u32;

    // Uniform chunks collapse to a fill marker, the rest go through LZ4
    let blocks: Vec<Vec<u8>> = chunks
        .iter()
        .map(|chunk| match compress::detect_fill(&chunk.cell_data) {
            Some(cell) => compress::encode_fill(cell).to_vec(),
            None => compress::compress_chunk(&chunk.cell_data),
        })
        .collect();

    let table_size = chunks.len() * CHUNK_TABLE_ENTRY_SIZE;
    let data_start = HEADER_SIZE + table_size;

    let header = VolumeHeader {
        magic: MAGIC,
        version: FORMAT_VERSION,
        chunk_size: CHUNK_SIZE as u16,
        size: [size.x as u32, size.y as u32, size.z as u32],
        chunk_count,
        world_origin: world_origin.to_array(),
        _pad: [0; 4],
    };

    let total_data_size: usize = blocks.iter().map(|b| b.len()).sum();
    let mut output = Vec::with_capacity(data_start + total_data_size);

    output.extend_from_slice(bytemuck::bytes_of(&header));

    let mut current_offset = data_start as u64;
    for (chunk, block) in chunks.iter().zip(&blocks) {
        let block_size = block.len() as u32;
        // ChunkTableEntry: cx:i16, cy:i16, cz:i16, offset:u64, size:u32 = 18 bytes
        output.extend_from_slice(&(chunk.coord.x as i16).to_le_bytes());
        output.extend_from_slice(&(chunk.coord.y as i16).to_le_bytes());
        output.extend_from_slice(&(chunk.coord.z as i16).to_le_bytes());
        output.extend_from_slice(&current_offset.to_le_bytes());
        output.extend_from_slice(&block_size.to_le_bytes());
        current_offset += block_size as u64;
    }

    for block in &blocks {
        output.extend_from_slice(block);
    }

    log::debug!(
        "encoded volume {}x{}x{}: {} chunks, {} bytes",
        size.x,
        size.y,
        size.z,
        chunk_count,
        output.len()
    );

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_header_fields_correct() {
        let data = save(IVec3::new(64, 32, 96), DVec3::new(1.5, -2.0, 0.25), &[]);
        assert_eq!(data.len(), HEADER_SIZE);

        let header = VolumeHeader::read(&data);
        assert_eq!(header.magic, MAGIC);
        assert_eq!(header.version, FORMAT_VERSION);
        assert_eq!(header.chunk_size, 32);
        assert_eq!(header.size, [64, 32, 96]);
        assert_eq!(header.chunk_count, 0);
        assert_eq!(header.world_origin, [1.5, -2.0, 0.25]);
    }

    #[test]
    fn test_save_fill_chunk_is_compact() {
        let chunks = vec![ChunkSnapshot {
            coord: IVec3::new(0, 0, 0),
            cell_data: vec![0u8; CHUNK_DATA_SIZE],
        }];
        let data = save(IVec3::splat(32), DVec3::ZERO, &chunks);
        assert_eq!(
            data.len(),
            HEADER_SIZE + CHUNK_TABLE_ENTRY_SIZE + FILL_BLOCK_SIZE
        );

        let entry = &data[HEADER_SIZE..HEADER_SIZE + CHUNK_TABLE_ENTRY_SIZE];
        let offset = u64::from_le_bytes(entry[6..14].try_into().expect("8-byte slice"));
        assert_eq!(offset as usize, HEADER_SIZE + CHUNK_TABLE_ENTRY_SIZE);
    }
}
