//! Network synchronization contract.
//!
//! Only the authoritative participant (single player or server) searches for
//! targets, counts the despawn timer and removes completed agents. Everything
//! else reaches remote participants either through the agent's dirty flag
//! (full state resend by the host) or through [`TerminalEffectMessage`].

mod error;
#[cfg(feature = "serde")]
pub mod wire;

pub use error::SyncError;

use glam::Vec2;

/// Role of this participant in the session.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum NetMode {
    #[default]
    SinglePlayer,
    Server,
    Client,
}

impl NetMode {
    /// Single player and server own the simulation; clients only mirror it.
    #[inline]
    pub const fn is_authoritative(self) -> bool {
        !matches!(self, Self::Client)
    }
}

/// Tells every participant to play the completion effect at `position`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerminalEffectMessage {
    pub position: Vec2,
}

impl TerminalEffectMessage {
    /// Host packet id reserved for this message.
    pub const PACKET_ID: u8 = 1;

    /// Coordinates are floored before sending.
    pub fn new(position: Vec2) -> Self {
        Self {
            position: position.floor(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn only_clients_are_non_authoritative() {
        assert!(NetMode::SinglePlayer.is_authoritative());
        assert!(NetMode::Server.is_authoritative());
        assert!(!NetMode::Client.is_authoritative());
    }

    #[test]
    fn net_mode_parses_snake_case() {
        assert_eq!(NetMode::from_str("single_player"), Ok(NetMode::SinglePlayer));
        assert_eq!(NetMode::Server.to_string(), "server");
    }

    #[test]
    fn terminal_message_floors_position() {
        let message = TerminalEffectMessage::new(Vec2::new(10.8, -3.2));
        assert_eq!(message.position, Vec2::new(10.0, -4.0));
    }
}
