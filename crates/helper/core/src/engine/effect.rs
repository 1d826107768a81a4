use arrayvec::ArrayVec;
use glam::Vec2;

use crate::config::HelperConfig;
use crate::engine::TickError;
use crate::net::TerminalEffectMessage;
use crate::state::{AgentState, EntityId};

/// Side effects the host carries out on the agent's behalf.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AgentEffect {
    /// Short pixie chime used to get the player's attention.
    Chime { position: Vec2 },
    /// Local completion burst (particles plus sound).
    CompletionEffect { position: Vec2 },
    /// Server only: push the removal of `id` to every client.
    SyncRemoval { id: EntityId },
    /// Server only: broadcast the completion burst.
    Broadcast(TerminalEffectMessage),
    /// Ambient light at the agent's center.
    Glow { position: Vec2 },
    /// Trailing sparkle; `tint` mixes the two palette colors.
    Sparkle {
        position: Vec2,
        velocity: Vec2,
        tint: f32,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Transition {
    pub from: AgentState,
    pub to: AgentState,
}

/// Everything one agent tick produced besides the agent mutation itself.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutput {
    pub effects: ArrayVec<AgentEffect, { HelperConfig::MAX_EFFECTS_PER_TICK }>,
    /// Set when the state at the end of the tick differs from the start.
    pub transition: Option<Transition>,
    /// The despawn timer ran out this tick.
    pub forced_despawn: bool,
    /// The agent completed and was removed from the world.
    pub deactivated: bool,
}

impl TickOutput {
    pub(crate) fn push(&mut self, effect: AgentEffect) -> Result<(), TickError> {
        self.effects
            .try_push(effect)
            .map_err(|_| TickError::EffectOverflow {
                capacity: HelperConfig::MAX_EFFECTS_PER_TICK,
            })
    }

    pub fn chimed(&self) -> bool {
        self.effects
            .iter()
            .any(|effect| matches!(effect, AgentEffect::Chime { .. }))
    }
}
