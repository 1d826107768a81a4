//! Agent record validation errors.

use crate::error::{CoreError, ErrorSeverity};
use crate::state::AgentState;

/// Errors raised while restoring an agent from persisted or synced data.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum StateError {
    /// The persisted state integer does not name any [`AgentState`].
    #[error("unknown agent state {0}")]
    UnknownState(u8),

    /// A host slot that carries an integer held a fractional or negative value.
    #[error("slot value {0} is not a valid integer")]
    NonIntegralSlot(f32),

    /// A target-holding state arrived without a target position.
    #[error("state {0} requires a target position")]
    MissingTarget(AgentState),

    /// A target position arrived with a state that cannot hold one.
    #[error("state {0} cannot carry a target position")]
    UnexpectedTarget(AgentState),
}

impl CoreError for StateError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownState(_) => "STATE_UNKNOWN",
            Self::NonIntegralSlot(_) => "STATE_NON_INTEGRAL_SLOT",
            Self::MissingTarget(_) => "STATE_MISSING_TARGET",
            Self::UnexpectedTarget(_) => "STATE_UNEXPECTED_TARGET",
        }
    }
}
