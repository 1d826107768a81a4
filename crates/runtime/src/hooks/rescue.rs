use helper_core::{Agent, HelperConfig, PlayerView, hooks};

use super::HelperHook;

/// Hook for the helpers driven by this runtime.
#[derive(Debug, Clone, Copy, Default)]
pub struct RescueHelperHook;

impl HelperHook for RescueHelperHook {
    fn name(&self) -> &'static str {
        "rescue_helper"
    }

    fn any_helpful(&self, agents: &[Agent]) -> bool {
        hooks::any_helpful(agents)
    }

    fn is_near_helper(&self, player: &PlayerView, agents: &[Agent], config: &HelperConfig) -> bool {
        hooks::is_near_helper(player, agents, config)
    }
}
