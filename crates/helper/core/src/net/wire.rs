//! Byte framing for the two messages the helper sends itself.
//!
//! Each frame is one packet id byte followed by a bincode payload. The agent
//! state frame carries only the four synced slots; local slots never leave
//! the participant that owns them.

use glam::Vec2;

use crate::net::{SyncError, TerminalEffectMessage};
use crate::state::{Agent, AgentRecord, EntityId, SyncSlots};

/// Host packet id reserved for agent state frames.
pub const AGENT_STATE_PACKET_ID: u8 = 2;

#[derive(serde::Serialize, serde::Deserialize)]
struct AgentStateFrame {
    id: EntityId,
    ai: [f32; 4],
}

fn frame<T: serde::Serialize>(packet_id: u8, payload: &T) -> Result<Vec<u8>, SyncError> {
    let mut bytes = vec![packet_id];
    bincode::serialize_into(&mut bytes, payload).map_err(|err| SyncError::Malformed(err.to_string()))?;
    Ok(bytes)
}

fn unframe<T: serde::de::DeserializeOwned>(expected: u8, bytes: &[u8]) -> Result<T, SyncError> {
    let (&found, payload) = bytes.split_first().ok_or(SyncError::Empty)?;
    if found != expected {
        return Err(SyncError::UnexpectedPacket { expected, found });
    }
    bincode::deserialize(payload).map_err(|err| SyncError::Malformed(err.to_string()))
}

/// Encodes the terminal effect as `[id, x, y]` with floored coordinates.
///
/// # Errors
///
/// Returns [`SyncError::Malformed`] if serialization fails.
pub fn encode_terminal_effect(message: &TerminalEffectMessage) -> Result<Vec<u8>, SyncError> {
    let position = message.position.floor();
    frame(TerminalEffectMessage::PACKET_ID, &(position.x, position.y))
}

/// # Errors
///
/// Fails on an empty frame, a foreign packet id, or a truncated payload.
pub fn decode_terminal_effect(bytes: &[u8]) -> Result<TerminalEffectMessage, SyncError> {
    let (x, y): (f32, f32) = unframe(TerminalEffectMessage::PACKET_ID, bytes)?;
    Ok(TerminalEffectMessage {
        position: Vec2::new(x, y),
    })
}

/// Encodes the synced slots of `agent`.
///
/// # Errors
///
/// Returns [`SyncError::Malformed`] if serialization fails.
pub fn encode_agent_state(agent: &Agent) -> Result<Vec<u8>, SyncError> {
    let slots = SyncSlots::from(&agent.record());
    frame(
        AGENT_STATE_PACKET_ID,
        &AgentStateFrame {
            id: agent.id,
            ai: slots.ai,
        },
    )
}

/// Applies a received agent state frame, keeping the local slots of `agent`.
///
/// Returns the id the frame was addressed to.
///
/// # Errors
///
/// Fails on framing problems, or when the slots name an unknown state or
/// break the target invariant. The agent is left untouched on failure.
pub fn apply_agent_state(agent: &mut Agent, bytes: &[u8]) -> Result<EntityId, SyncError> {
    let frame: AgentStateFrame = unframe(AGENT_STATE_PACKET_ID, bytes)?;
    let local = SyncSlots::from(&agent.record()).local_ai;
    let record = AgentRecord::try_from(SyncSlots {
        ai: frame.ai,
        local_ai: local,
    })?;
    agent.restore(record)?;
    Ok(frame.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{AgentState, Body, EntityKind, StateError};

    #[test]
    fn terminal_effect_frame_layout() {
        let bytes = encode_terminal_effect(&TerminalEffectMessage::new(Vec2::new(100.7, 64.2))).unwrap();
        assert_eq!(bytes.len(), 9);
        assert_eq!(bytes[0], TerminalEffectMessage::PACKET_ID);
        let decoded = decode_terminal_effect(&bytes).unwrap();
        assert_eq!(decoded.position, Vec2::new(100.0, 64.0));
    }

    #[test]
    fn rejects_foreign_and_truncated_frames() {
        assert_eq!(decode_terminal_effect(&[]), Err(SyncError::Empty));
        assert_eq!(
            decode_terminal_effect(&[9, 0, 0]),
            Err(SyncError::UnexpectedPacket { expected: 1, found: 9 })
        );
        assert!(matches!(
            decode_terminal_effect(&[TerminalEffectMessage::PACKET_ID, 0, 0]),
            Err(SyncError::Malformed(_))
        ));
    }

    #[test]
    fn agent_state_reaches_the_mirror() {
        let mut source = Agent::new(EntityId(4), EntityKind(700), Body::helper_at(Vec2::ZERO));
        source.enter_with_target(Vec2::new(480.0, 960.0));
        let bytes = encode_agent_state(&source).unwrap();

        let mut mirror = Agent::new(EntityId(4), EntityKind(700), Body::helper_at(Vec2::ZERO));
        assert_eq!(apply_agent_state(&mut mirror, &bytes), Ok(EntityId(4)));
        assert_eq!(mirror.state(), AgentState::CatchAttention);
        assert_eq!(mirror.target_position(), Some(Vec2::new(480.0, 960.0)));
    }

    #[test]
    fn unknown_state_slot_is_rejected() {
        let mut bytes = vec![AGENT_STATE_PACKET_ID];
        bincode::serialize_into(
            &mut bytes,
            &AgentStateFrame {
                id: EntityId(1),
                ai: [0.0, 0.0, 12.0, 0.0],
            },
        )
        .unwrap();
        let mut agent = Agent::new(EntityId(1), EntityKind(700), Body::helper_at(Vec2::ZERO));
        assert_eq!(
            apply_agent_state(&mut agent, &bytes),
            Err(SyncError::State(StateError::UnknownState(12)))
        );
    }
}
