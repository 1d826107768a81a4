//! Packing of [`AgentRecord`] into the host's generic per-entity slots.
//!
//! Hosts that only know how to sync a fixed array of floats per entity get
//! four synced slots and two local (never synced) slots:
//!
//! | slot          | contents                                        |
//! |---------------|-------------------------------------------------|
//! | `ai[0..2]`    | target position, or the hover anchor while waiting |
//! | `ai[2]`       | state discriminant                              |
//! | `ai[3]`       | general timer                                   |
//! | `local_ai[0]` | initialized (0 or 1)                            |
//! | `local_ai[1]` | despawn timer                                   |
//!
//! `(0, 0)` in the position slots means "no anchor yet".

use glam::Vec2;

use crate::state::error::StateError;
use crate::state::types::agent::{AgentRecord, AgentState};

#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncSlots {
    pub ai: [f32; 4],
    pub local_ai: [f32; 2],
}

impl From<&AgentRecord> for SyncSlots {
    fn from(record: &AgentRecord) -> Self {
        let position = record
            .target_position
            .or(record.anchor)
            .unwrap_or(Vec2::ZERO);
        Self {
            ai: [
                position.x,
                position.y,
                f32::from(u8::from(record.state)),
                record.general_timer as f32,
            ],
            local_ai: [
                if record.initialized { 1.0 } else { 0.0 },
                record.despawn_timer as f32,
            ],
        }
    }
}

impl TryFrom<SyncSlots> for AgentRecord {
    type Error = StateError;

    fn try_from(slots: SyncSlots) -> Result<Self, Self::Error> {
        let [x, y, raw_state, general_timer] = slots.ai;
        let [initialized, despawn_timer] = slots.local_ai;

        let state = AgentState::try_from(slot_to_u8(raw_state)?)?;
        let position = Vec2::new(x, y);

        let (target_position, anchor) = if state.holds_target() {
            (Some(position), None)
        } else if state == AgentState::WaitForPlayer && position != Vec2::ZERO {
            (None, Some(position))
        } else {
            (None, None)
        };

        Ok(Self {
            state,
            target_position,
            anchor,
            general_timer: slot_to_u32(general_timer)?,
            despawn_timer: slot_to_u32(despawn_timer)?,
            initialized: initialized != 0.0,
        })
    }
}

fn slot_to_u32(value: f32) -> Result<u32, StateError> {
    if value.fract() != 0.0 || !(0.0..=u32::MAX as f32).contains(&value) {
        return Err(StateError::NonIntegralSlot(value));
    }
    Ok(value as u32)
}

fn slot_to_u8(value: f32) -> Result<u8, StateError> {
    let wide = slot_to_u32(value)?;
    u8::try_from(wide).map_err(|_| StateError::UnknownState(u8::MAX))
}
