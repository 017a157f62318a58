pub mod constants;
pub mod error;
pub mod material;
pub mod math;
pub mod types;

pub use error::CoreError;
pub use material::{MaterialDef, MaterialTable};
pub use types::{Cell, ContentBounds, MaterialId, Placement};
