use crate::env::OracleError;
use crate::error::{CoreError, ErrorSeverity};
use crate::state::StateError;

/// Errors surfaced while ticking an agent.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum TickError {
    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("agent record is inconsistent: {0}")]
    State(#[from] StateError),

    #[error("tick emitted more than {capacity} effects")]
    EffectOverflow { capacity: usize },
}

impl CoreError for TickError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Oracle(inner) => inner.severity(),
            Self::State(inner) => inner.severity(),
            Self::EffectOverflow { .. } => ErrorSeverity::Configuration,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Oracle(inner) => inner.error_code(),
            Self::State(inner) => inner.error_code(),
            Self::EffectOverflow { .. } => "TICK_EFFECT_OVERFLOW",
        }
    }
}
