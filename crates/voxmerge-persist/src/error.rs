/// Errors that can occur while encoding or decoding a voxel volume file.
#[derive(Debug, thiserror::Error)]
pub enum PersistError {
    #[error("invalid magic bytes (expected VXVL)")]
    InvalidMagic,

    #[error("unsupported volume format version {0}")]
    UnsupportedVersion(u16),

    #[error("unsupported chunk size {0}")]
    UnsupportedChunkSize(u16),

    #[error("invalid volume dimensions {0:?}")]
    InvalidDimensions([u32; 3]),

    #[error("world origin {0:?} is not finite or out of range")]
    InvalidOrigin([f64; 3]),

    #[error("file too small ({0} bytes, minimum {1})")]
    FileTooSmall(usize, usize),

    #[error("truncated file: expected {expected} bytes, got {actual}")]
    TruncatedFile { expected: usize, actual: usize },

    #[error("chunk ({0}, {1}, {2}) lies outside the volume")]
    ChunkOutOfRange(i32, i32, i32),

    #[error("chunk ({0}, {1}, {2}) appears more than once")]
    DuplicateChunk(i32, i32, i32),

    #[error("LZ4 decompression failed: {0}")]
    DecompressError(String),

    #[error("invalid chunk size: expected {expected}, got {actual}")]
    InvalidChunkSize { expected: usize, actual: usize },

    #[error("invalid fill chunk data (expected {0} bytes)")]
    InvalidFillChunk(usize),
}
