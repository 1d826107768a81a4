//! Events observed while driving a simulation.
use glam::Vec2;
use helper_core::{AgentState, EntityId};
use serde::{Deserialize, Serialize};

/// Something a host would have to act on, stamped with the tick it happened in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SimEvent {
    Spawned {
        tick: u64,
        id: EntityId,
        state: AgentState,
    },
    Transition {
        tick: u64,
        id: EntityId,
        from: AgentState,
        to: AgentState,
    },
    /// The engaged-time limit sent the agent away.
    ForcedDespawn { tick: u64, id: EntityId },
    Chime {
        tick: u64,
        id: EntityId,
        position: Vec2,
    },
    /// Local completion burst (single player).
    Completed {
        tick: u64,
        id: EntityId,
        position: Vec2,
    },
    /// Server told clients to drop the agent.
    RemovalSynced { tick: u64, id: EntityId },
    /// Server broadcast the terminal effect; `packet` is the wire frame.
    EffectBroadcast {
        tick: u64,
        id: EntityId,
        packet: Vec<u8>,
    },
    /// Server re-sent the agent's synced state.
    StateSynced {
        tick: u64,
        id: EntityId,
        packet: Vec<u8>,
    },
    /// The host removed the agent (countdown ran out or it left the world).
    Despawned { tick: u64, id: EntityId },
}

impl SimEvent {
    pub fn tick(&self) -> u64 {
        match self {
            Self::Spawned { tick, .. }
            | Self::Transition { tick, .. }
            | Self::ForcedDespawn { tick, .. }
            | Self::Chime { tick, .. }
            | Self::Completed { tick, .. }
            | Self::RemovalSynced { tick, .. }
            | Self::EffectBroadcast { tick, .. }
            | Self::StateSynced { tick, .. }
            | Self::Despawned { tick, .. } => *tick,
        }
    }

    pub fn id(&self) -> EntityId {
        match self {
            Self::Spawned { id, .. }
            | Self::Transition { id, .. }
            | Self::ForcedDespawn { id, .. }
            | Self::Chime { id, .. }
            | Self::Completed { id, .. }
            | Self::RemovalSynced { id, .. }
            | Self::EffectBroadcast { id, .. }
            | Self::StateSynced { id, .. }
            | Self::Despawned { id, .. } => *id,
        }
    }

    /// Event name as it appears in serialized output.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Spawned { .. } => "spawned",
            Self::Transition { .. } => "transition",
            Self::ForcedDespawn { .. } => "forced_despawn",
            Self::Chime { .. } => "chime",
            Self::Completed { .. } => "completed",
            Self::RemovalSynced { .. } => "removal_synced",
            Self::EffectBroadcast { .. } => "effect_broadcast",
            Self::StateSynced { .. } => "state_synced",
            Self::Despawned { .. } => "despawned",
        }
    }
}
