//! Voxel volume merge engine.
//!
//! Combines two independently positioned asteroid volumes into a new one:
//! alignment of the two cell lattices, sizing of the destination, cell-wise
//! compositing and persistence of the result.

pub mod alignment;
pub mod compositor;
pub mod engine;
pub mod error;
pub mod operation;
pub mod packager;
pub mod progress;
pub mod sizer;

pub use alignment::{reconcile, Alignment};
pub use engine::{MergeEngine, WorldContext};
pub use error::MergeError;
pub use operation::{MergeOperation, MergeRule, Source};
pub use packager::MergeResult;
pub use progress::{LogProgress, MergeStage, NoProgress, ProgressReporter, RecordingProgress};
pub use sizer::{size_target, SourceGeometry, TargetSize};
