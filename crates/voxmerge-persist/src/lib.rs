pub mod compat;
pub mod compress;
pub mod error;
pub mod file;
pub mod format;
pub mod load;
pub mod save;

pub use error::PersistError;
pub use file::{same_file, write_atomic};
pub use format::VolumeHeader;
pub use load::{load, VolumeData};
pub use save::{save, ChunkSnapshot};
