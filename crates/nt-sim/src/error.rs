use nt_behavior::BehaviorError;
use nt_core::CoreError;
use nt_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

pub type SimResult<T> = Result<T, SimError>;
