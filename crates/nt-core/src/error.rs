//! Framework error type.
//!
//! Sub-crates define their own error enums (`SpatialError`, `BehaviorError`,
//! `SimError`); `CoreError` covers the validation done on the shared types in
//! this crate.

use thiserror::Error;

use crate::AgentId;

/// Errors produced while validating core configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for `nt-core`.
pub type CoreResult<T> = Result<T, CoreError>;
