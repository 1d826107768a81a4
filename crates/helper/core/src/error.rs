//! Common error infrastructure for helper-core.
//!
//! Domain-specific errors (`RegistrationError`, `StateError`, `OracleError`,
//! `SyncError`) live next to the code that raises them and share the
//! classification defined here.
//!
//! Nothing in the core is fatal to the host: the worst outcome of a logic
//! error is a misbehaving agent, so severities are used for logging and for
//! deciding whether a caller may retry.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    ///
    /// Examples: malformed registration call, unknown state integer
    Validation,

    /// A collaborator the caller was expected to provide is missing.
    ///
    /// Examples: tick context built without a world oracle
    Configuration,

    /// Bytes from the network could not be decoded.
    ///
    /// The message is dropped; the sender is not trusted to resend.
    Transport,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Configuration => "configuration",
            Self::Transport => "transport",
        }
    }

    /// Returns true if the caller misconfigured the core (a host bug).
    pub const fn is_host_bug(&self) -> bool {
        matches!(self, Self::Configuration)
    }
}

/// Common trait for all helper-core errors.
///
/// - All error enums should implement this trait
/// - Use `#[derive(thiserror::Error)]` for Display/Error impl
/// - Classify severity based on who has to act, not on impact
pub trait CoreError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    ///
    /// Default implementation uses the error type name.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}
