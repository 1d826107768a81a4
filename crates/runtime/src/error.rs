//! Unified error type surfaced by the simulation runtime.
//!
//! Wraps engine, registration and sync failures with the agent they concern
//! so callers can bubble them up with consistent context.
use helper_core::{EntityId, RegistrationError, SyncError, TickError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("agent {id} failed to tick")]
    Tick {
        id: EntityId,
        #[source]
        source: TickError,
    },

    #[error(transparent)]
    Registration(#[from] RegistrationError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Content(#[from] anyhow::Error),

    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("no agent with id {0}")]
    UnknownAgent(EntityId),

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}
