mod agent;
mod common;
mod geometry;
mod slots;

pub use agent::{Agent, AgentFlags, AgentRecord, AgentState, Body, CollisionFlags};
pub use common::{EntityId, EntityKind, Facing, PlayerIndex, Tick};
pub(crate) use common::signum_of;
pub use geometry::{Rect, TILE_SIZE, to_tile};
pub use slots::SyncSlots;
