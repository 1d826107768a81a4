//! Behavioral core of the helper creature.
//!
//! `helper-core` owns the agent's finite-state controller and everything it
//! consults: the trackable-target registry, the bounded target search, the
//! pairwise flutter rule and the network sync contract. The host world is
//! reached only through the oracle traits in [`env`], so the same core runs
//! inside a game host, a headless simulation or a test.
//!
//! All per-tick mutation flows through [`engine::HelperEngine`]; host
//! extension points (spawn rolls, capture checks, despawn vetoes) live in
//! [`hooks`].
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod hooks;
pub mod interaction;
pub mod net;
pub mod registry;
pub mod search;
pub mod state;

pub use config::HelperConfig;
pub use engine::{AgentEffect, HelperEngine, TickContext, TickError, TickOutput, Transition};
pub use env::{
    EntityOracle, EntityView, Env, FlightAdvice, FlightOracle, HelperEnv, MovementStyle,
    OracleError, PcgRng, PlayerOracle, PlayerView, RngOracle, TileView, WorldDimensions,
    WorldOracle,
};
pub use error::{CoreError, ErrorSeverity};
pub use hooks::{GuideLightUnlocks, SpawnInfo};
pub use interaction::InteractionRule;
pub use net::{NetMode, SyncError, TerminalEffectMessage};
pub use registry::{EntityPredicate, RegistrationError, TrackableRegistry};
pub use state::{
    Agent, AgentFlags, AgentRecord, AgentState, Body, CollisionFlags, EntityId, EntityKind,
    Facing, PlayerIndex, Rect, StateError, SyncSlots, Tick,
};
