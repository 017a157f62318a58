use voxmerge_core::constants::CELL_BYTES;

use crate::error::PersistError;
use crate::format::{CHUNK_DATA_SIZE, FILL_BLOCK_SIZE, FILL_FLAG};

/// Compress a chunk's cell bytes using LZ4.
pub fn compress_chunk(data: &[u8]) -> Vec<u8> {
    lz4_flex::compress_prepend_size(data)
}

/// Decompress an LZ4-compressed chunk, validating the output size.
pub fn decompress_chunk(compressed: &[u8]) -> Result<Vec<u8>, PersistError> {
    let decompressed = lz4_flex::decompress_size_prepended(compressed)
        .map_err(|e| PersistError::DecompressError(e.to_string()))?;

    if decompressed.len() != CHUNK_DATA_SIZE {
        return Err(PersistError::InvalidChunkSize {
            expected: CHUNK_DATA_SIZE,
            actual: decompressed.len(),
        });
    }

    Ok(decompressed)
}

/// Check if all cells in a chunk are identical.
/// Returns the shared (material, fill, flags) triple if so.
pub fn detect_fill(data: &[u8]) -> Option<[u8; 3]> {
    if data.len() != CHUNK_DATA_SIZE {
        return None;
    }

    let stride = CELL_BYTES as usize;
    let first = &data[0..stride];
    if data.chunks_exact(stride).any(|cell| cell != first) {
        return None;
    }

    Some([first[0], first[1], first[2]])
}

/// Encode a fill marker: the shared cell followed by FILL_FLAG.
pub fn encode_fill(cell: [u8; 3]) -> [u8; FILL_BLOCK_SIZE] {
    let mut buf = [0u8; FILL_BLOCK_SIZE];
    buf[0..3].copy_from_slice(&cell);
    buf[3..5].copy_from_slice(&FILL_FLAG.to_le_bytes());
    buf
}

/// Check if a data block is a fill marker.
/// LZ4 output for a full chunk is always longer than a fill marker.
pub fn is_fill(data: &[u8]) -> bool {
    if data.len() != FILL_BLOCK_SIZE {
        return false;
    }
    u16::from_le_bytes([data[3], data[4]]) == FILL_FLAG
}

/// Expand a fill marker back to a full chunk.
pub fn expand_fill(data: &[u8]) -> Result<Vec<u8>, PersistError> {
    if !is_fill(data) {
        return Err(PersistError::InvalidFillChunk(FILL_BLOCK_SIZE));
    }

    let cell = &data[0..3];
    let mut chunk = Vec::with_capacity(CHUNK_DATA_SIZE);
    while chunk.len() < CHUNK_DATA_SIZE {
        chunk.extend_from_slice(cell);
    }

    Ok(chunk)
}
