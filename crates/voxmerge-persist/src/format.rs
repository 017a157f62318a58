use voxmerge_core::constants::BYTES_PER_CHUNK;

/// Magic bytes identifying a voxel volume file.
pub const MAGIC: [u8; 4] = *b"VXVL";

/// Current volume format version.
pub const FORMAT_VERSION: u16 = 1;

/// Size of the file header in bytes.
pub const HEADER_SIZE: usize = 64;

/// Size of each chunk table entry in bytes.
pub const CHUNK_TABLE_ENTRY_SIZE: usize = 18;

/// Trailing marker of a single-value fill chunk.
pub const FILL_FLAG: u16 = 0xFFFF;

/// Encoded size of a fill chunk: material, fill, flags, FILL_FLAG.
pub const FILL_BLOCK_SIZE: usize = 5;

/// Expected decompressed chunk size in bytes.
pub const CHUNK_DATA_SIZE: usize = BYTES_PER_CHUNK as usize;

/// Volume file header. Fixed 64 bytes, repr(C) for byte-level serialization.
#[repr(C)]
#[derive(Debug, Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VolumeHeader {
    pub magic: [u8; 4],
    pub version: u16,
    pub chunk_size: u16,
    /// Cell-space extents.
    pub size: [u32; 3],
    pub chunk_count: u32,
    /// World-space position of cell (0,0,0).
    pub world_origin: [f64; 3],
    pub _pad: [u32; 4],
}

impl VolumeHeader {
    /// Decode a header from the first HEADER_SIZE bytes, regardless of alignment.
    pub fn read(bytes: &[u8]) -> VolumeHeader {
        bytemuck::pod_read_unaligned(&bytes[..HEADER_SIZE])
    }
}
