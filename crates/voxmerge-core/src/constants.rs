//! Single source of truth for shared constants.
//! Volume layout, persistence and merge sizing all read from here.

/// Side length of a persisted chunk in cells.
pub const CHUNK_SIZE: u32 = 32;

/// Bytes per persisted cell: material, fill, flags.
pub const CELL_BYTES: u32 = 3;

/// Total cells per persisted chunk (32^3).
pub const CELLS_PER_CHUNK: u32 = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;

/// Total bytes per persisted chunk.
pub const BYTES_PER_CHUNK: u32 = CELLS_PER_CHUNK * CELL_BYTES;

/// Fill amount of a vacuum cell.
pub const FILL_EMPTY: u8 = 0;

/// Fill amount of a completely solid cell.
pub const FILL_FULL: u8 = 255;

/// Cell flag bit: the cell cannot be mined in game.
pub const FLAG_INDESTRUCTIBLE: u8 = 0b0000_0001;

/// Empty cells left on each side of a union-merged volume for mesh smoothing.
pub const MERGE_PADDING: i32 = 3;

/// Granularity the game's voxel storage prefers for volume sizes.
/// Union results are rounded up to a multiple of this on every axis.
pub const STORAGE_CHUNK: i32 = 64;

/// File extension for persisted voxel volumes.
pub const VOLUME_FILE_EXTENSION: &str = "vxv";

/// Largest accepted volume extent per axis.
pub const MAX_VOLUME_EXTENT: i32 = 8192;

/// Largest accepted cell count of a whole volume (1024 x 512 x 512).
/// Dense storage of this many cells takes 768 MiB.
pub const MAX_VOLUME_CELLS: u64 = 1 << 28;

/// Largest accepted magnitude of a world-space origin component.
/// Keeps rounded corners, spans and destination offsets inside i32.
pub const MAX_WORLD_COORD: f64 = (1u64 << 29) as f64;
