pub mod chunk;
pub mod error;
pub mod storage;
pub mod volume;

pub use error::VolumeError;
pub use storage::{FileStorage, VoxelStorage};
pub use volume::VoxelVolume;
