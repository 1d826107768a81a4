//! Hook registry for aggregating helper systems.

use std::collections::HashMap;
use std::sync::Arc;

use helper_core::{Agent, HelperConfig, PlayerView, SpawnInfo, hooks};
use tracing::debug;

use super::{HelperHook, RescueHelperHook};

/// Registry of every helper system the host knows about.
///
/// Hooks are kept sorted by priority; queries short-circuit on the first
/// system that answers `true`.
#[derive(Clone)]
pub struct HookRegistry {
    hooks: Arc<[Arc<dyn HelperHook>]>,
    lookup_table: HashMap<&'static str, Arc<dyn HelperHook>>,
}

impl HookRegistry {
    /// Creates a registry from `hooks`, sorted by priority.
    pub fn new(mut hooks: Vec<Arc<dyn HelperHook>>) -> Self {
        hooks.sort_by_key(|h| h.priority());

        let lookup_table = hooks.iter().map(|h| (h.name(), Arc::clone(h))).collect();

        Self {
            hooks: hooks.into(),
            lookup_table,
        }
    }

    /// Creates a registry holding only [`RescueHelperHook`].
    pub fn default_hooks() -> Self {
        Self::new(vec![Arc::new(RescueHelperHook) as Arc<dyn HelperHook>])
    }

    /// Returns a registry with `hook` added.
    #[must_use]
    pub fn with_hook(&self, hook: Arc<dyn HelperHook>) -> Self {
        let mut hooks: Vec<_> = self.hooks.iter().cloned().collect();
        hooks.push(hook);
        Self::new(hooks)
    }

    /// Whether any registered system has a helpful creature active.
    pub fn any_helpful(&self, agents: &[Agent]) -> bool {
        self.hooks.iter().any(|hook| {
            let helpful = hook.any_helpful(agents);
            if helpful {
                debug!(target: "runtime::hooks", hook = hook.name(), "Helpful creature active");
            }
            helpful
        })
    }

    pub fn is_near_helper(&self, player: &PlayerView, agents: &[Agent], config: &HelperConfig) -> bool {
        self.hooks
            .iter()
            .any(|hook| hook.is_near_helper(player, agents, config))
    }

    /// Spawn probability for a helper at the position described by `info`.
    pub fn spawn_chance(&self, info: &SpawnInfo, agents: &[Agent], config: &HelperConfig) -> f32 {
        hooks::spawn_chance(info, self.any_helpful(agents), config)
    }

    pub fn find(&self, name: &str) -> Option<&Arc<dyn HelperHook>> {
        self.lookup_table.get(name)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Returns an iterator over hook names and priorities (for debugging).
    pub fn hooks(&self) -> impl Iterator<Item = (&'static str, i32)> + '_ {
        self.hooks.iter().map(|h| (h.name(), h.priority()))
    }
}

impl Default for HookRegistry {
    fn default() -> Self {
        Self::default_hooks()
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.hooks().collect::<Vec<_>>())
            .finish()
    }
}
