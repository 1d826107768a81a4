//! Oracle access errors.

use crate::error::{CoreError, ErrorSeverity};

/// A collaborator the tick needs was not supplied by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("WorldOracle not available")]
    WorldNotAvailable,

    #[error("EntityOracle not available")]
    EntitiesNotAvailable,

    #[error("PlayerOracle not available")]
    PlayersNotAvailable,

    #[error("FlightOracle not available")]
    FlightNotAvailable,

    #[error("RngOracle not available")]
    RngNotAvailable,
}

impl CoreError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Configuration
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            WorldNotAvailable => "ORACLE_WORLD_NOT_AVAILABLE",
            EntitiesNotAvailable => "ORACLE_ENTITIES_NOT_AVAILABLE",
            PlayersNotAvailable => "ORACLE_PLAYERS_NOT_AVAILABLE",
            FlightNotAvailable => "ORACLE_FLIGHT_NOT_AVAILABLE",
            RngNotAvailable => "ORACLE_RNG_NOT_AVAILABLE",
        }
    }
}
