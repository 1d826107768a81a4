use crate::error::{CoreError, ErrorSeverity};

/// A registration call that could not be honored.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error("expected {expected} argument(s), got {found}")]
    ArgLength { expected: usize, found: usize },

    #[error("argument {index} must be an entity kind or a predicate, got {found}")]
    ArgType { index: usize, found: &'static str },

    #[error("predicate argument was null")]
    NullPredicate,

    #[error("unknown registration message '{0}'")]
    UnknownMessage(String),
}

impl CoreError for RegistrationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ArgLength { .. } => "REGISTRATION_ARG_LENGTH",
            Self::ArgType { .. } => "REGISTRATION_ARG_TYPE",
            Self::NullPredicate => "REGISTRATION_NULL_PREDICATE",
            Self::UnknownMessage(_) => "REGISTRATION_UNKNOWN_MESSAGE",
        }
    }
}
