//! Errors raised while generating a mushroom field.

use thiserror::Error;

/// Generation failures.
///
/// `InvalidConfiguration` aborts the whole pass before anything is placed.
/// `NoTerrainIntersection` is per-instance: the object is skipped and the
/// rest of the field is still generated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("no terrain under ({x:.2}, {z:.2})")]
    NoTerrainIntersection { x: f32, z: f32 },
}

pub type Result<T> = std::result::Result<T, GenError>;
