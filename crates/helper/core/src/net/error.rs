use crate::error::{CoreError, ErrorSeverity};
use crate::state::StateError;

/// Received bytes that could not be turned back into a message.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SyncError {
    #[error("empty packet")]
    Empty,

    #[error("unexpected packet id {found}, expected {expected}")]
    UnexpectedPacket { expected: u8, found: u8 },

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error(transparent)]
    State(#[from] StateError),
}

impl CoreError for SyncError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::State(inner) => inner.severity(),
            _ => ErrorSeverity::Transport,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "SYNC_EMPTY",
            Self::UnexpectedPacket { .. } => "SYNC_UNEXPECTED_PACKET",
            Self::Malformed(_) => "SYNC_MALFORMED",
            Self::State(inner) => inner.error_code(),
        }
    }
}
