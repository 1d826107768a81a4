//! Agent state representation.
//!
//! This module owns the per-instance record the state machine mutates, the
//! shared identifier and geometry types, and the packed slot form used at the
//! host synchronization boundary.
pub mod error;
pub mod types;

pub use error::StateError;
pub(crate) use types::signum_of;
pub use types::{
    Agent, AgentFlags, AgentRecord, AgentState, Body, CollisionFlags, EntityId, EntityKind,
    Facing, PlayerIndex, Rect, SyncSlots, TILE_SIZE, Tick, to_tile,
};
