pub mod args;
pub mod commands;
pub mod error;
pub mod job;
pub mod report;

pub use error::JobError;
