use thiserror::Error;

/// Errors raised by shared core data (material tables, coordinate parsing).
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to parse materials RON: {0}")]
    MaterialParse(String),

    #[error("duplicate material id {0}")]
    DuplicateMaterial(u8),

    #[error("unknown material '{0}'")]
    UnknownMaterial(String),

    #[error("invalid vector '{0}' (expected x,y,z)")]
    InvalidVector(String),
}
