//! Host integration queries.
//!
//! The host asks these at its own extension points: when rolling spawns,
//! when a net or projectile touches a creature, when deciding whether an idle
//! creature may despawn, and when stocking a shop.

use std::collections::BTreeSet;

use crate::config::HelperConfig;
use crate::env::PlayerView;
use crate::state::{Agent, AgentState, EntityKind};

/// Host facts the spawn roll depends on.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnInfo {
    /// Tile row of the candidate spawn position.
    pub spawn_tile_y: i32,
    /// Surface layer depth, in tiles.
    pub world_surface: f32,
    /// Cavern layer depth, in tiles.
    pub rock_layer: f32,
    /// First row of the underworld, in tiles.
    pub underworld_layer: i32,
    /// A fairy log has been placed in this world.
    pub fairy_log: bool,
    /// Anniversary seed worlds spawn fairies more often.
    pub tenth_anniversary: bool,
    /// Player luck roll in `0..=2`, where `1` is neutral.
    pub luck_roll: i32,
}

/// Probability weight for spawning a helper at the described position.
///
/// Zero unless a fairy log exists, no helpful agent is active, and the
/// position is between the upper caverns and the underworld.
pub fn spawn_chance(info: &SpawnInfo, any_helpful: bool, config: &HelperConfig) -> f32 {
    let upper_caverns = (info.world_surface + info.rock_layer) / 2.0;
    let in_band = info.spawn_tile_y as f32 >= upper_caverns && info.spawn_tile_y < info.underworld_layer;
    if !info.fairy_log || any_helpful || !in_band {
        return 0.0;
    }

    let base = if info.tenth_anniversary {
        config.anniversary_spawn_chance
    } else {
        config.base_spawn_chance
    };
    base + (info.luck_roll - 1) as f32 * config.luck_spawn_step
}

/// Nets only work on idle agents.
pub fn can_be_caught(agent: &Agent) -> bool {
    !agent.is_helpful()
}

pub fn can_be_hit_by_projectile(agent: &Agent) -> bool {
    !agent.is_helpful()
}

/// Whether the host must keep an idle agent alive instead of despawning it.
///
/// Agents waiting for a player at night stay put.
pub fn keeps_alive(agent: &Agent, is_day: bool) -> bool {
    !is_day && agent.state() == AgentState::WaitForPlayer
}

/// Any active agent currently helping a player.
///
/// Spawn authorization uses this to keep at most one helpful creature around.
pub fn any_helpful<'a, I>(agents: I) -> bool
where
    I: IntoIterator<Item = &'a Agent>,
{
    agents
        .into_iter()
        .any(|agent| agent.is_active() && agent.is_helpful())
}

/// Whether `player` is within `config.near_helper_range` of any active agent.
pub fn is_near_helper<'a, I>(player: &PlayerView, agents: I, config: &HelperConfig) -> bool
where
    I: IntoIterator<Item = &'a Agent>,
{
    agents
        .into_iter()
        .filter(|agent| agent.is_active())
        .any(|agent| player.within_range(agent.center(), config.near_helper_range))
}

/// Creature kinds whose discovery unlocks the guide light in the shop.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GuideLightUnlocks {
    kinds: BTreeSet<EntityKind>,
}

impl GuideLightUnlocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: EntityKind) {
        self.kinds.insert(kind);
    }

    pub fn unlocks(&self, kind: EntityKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// `true` once any registered kind has been discovered.
    pub fn is_unlocked<F>(&self, discovered: F) -> bool
    where
        F: Fn(EntityKind) -> bool,
    {
        self.kinds.iter().any(|&kind| discovered(kind))
    }
}
