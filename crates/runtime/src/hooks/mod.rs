//! Spawn-time hook system shared by every registered helper system.
//!
//! A host may run several helper systems side by side (this crate's rescue
//! helper plus anything a third party adds). Spawn authorization must ask all
//! of them before rolling a new helper, so each system registers a
//! [`HelperHook`] and the [`HookRegistry`] aggregates their answers.
//!
//! # Queries
//!
//! - [`HookRegistry::any_helpful`]: some system already has a creature helping
//! - [`HookRegistry::is_near_helper`]: a player gets the reduced spawn rate
//! - [`HookRegistry::spawn_chance`]: the final probability for one position

mod registry;
mod rescue;

pub use registry::HookRegistry;
pub use rescue::RescueHelperHook;

use helper_core::{Agent, HelperConfig, PlayerView};

/// One helper system's answers to the host's spawn-time questions.
pub trait HelperHook: Send + Sync {
    /// Unique name used for lookup and logging.
    fn name(&self) -> &'static str;

    /// Lower values are asked first.
    fn priority(&self) -> i32 {
        0
    }

    /// Whether this system currently has a creature helping a player.
    fn any_helpful(&self, agents: &[Agent]) -> bool;

    /// Whether `player` is close enough to one of this system's creatures to
    /// lower the general spawn rate.
    fn is_near_helper(&self, _player: &PlayerView, _agents: &[Agent], _config: &HelperConfig) -> bool {
        false
    }
}
