//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `nt-spatial`.
///
/// All variants are configuration errors raised at grid construction time.
/// Unreachable goals are not errors; see [`NavPath`](crate::NavPath).
#[derive(Debug, Error, PartialEq)]
pub enum SpatialError {
    #[error("invalid cell size {0}: must be positive and finite")]
    InvalidCellSize(f32),

    #[error("invalid grid bounds: {0}")]
    InvalidBounds(String),

    #[error("grid of {requested} cells exceeds the limit of {limit}")]
    TooManyCells { requested: u128, limit: usize },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
