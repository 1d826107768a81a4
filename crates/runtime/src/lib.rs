//! Headless host for the helper creature.
//!
//! This crate plays the part a game host would: it owns terrain, creatures
//! and players, refreshes the trackable-target cache, ticks every helper
//! through [`helper_core::HelperEngine`], integrates bodies and carries out
//! the effects the engine requests.
//!
//! Modules are organized by responsibility:
//! - [`simulation`] hosts the tick driver
//! - [`oracle`] provides in-memory implementations of the core oracles
//! - [`hooks`] aggregates spawn-time queries across helper systems
//! - [`scenario`] builds worlds from presets or RON files
//! - [`events`] describes what happened during a run
pub mod config;
pub mod error;
pub mod events;
pub mod hooks;
pub mod oracle;
pub mod scenario;
pub mod simulation;

pub use config::RuntimeConfig;
pub use error::{Result, RuntimeError};
pub use events::SimEvent;
pub use hooks::{HelperHook, HookRegistry, RescueHelperHook};
pub use oracle::{EntityTable, OracleSet, PlayerScript, PlayerTable, TileWorld};
pub use scenario::{CreaturePlacement, HelperPlacement, PlayerPlacement, Scenario};
pub use simulation::{AgentSummary, SimSummary, Simulation};
