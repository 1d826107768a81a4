//! Which world entities a helper is allowed to lead players to.
//!
//! The registry keeps two ordered predicate lists. An entity is trackable when
//! no exclusion predicate matches and at least one inclusion predicate does.
//! Lists only grow; hosts register during startup and third-party content
//! registers through [`calls`].
//!
//! Evaluating every predicate against every entity for every agent would be
//! wasteful, so the host refreshes a candidate cache once per tick before any
//! agent runs. Agents only read the cache.

pub mod calls;
mod error;

use std::fmt;
use std::sync::Arc;

pub use error::RegistrationError;

use crate::env::{EntityView, MovementStyle};
use crate::net::NetMode;
use crate::state::{EntityId, EntityKind};

/// Shared predicate over a host entity.
pub type EntityPredicate = Arc<dyn Fn(&EntityView) -> bool + Send + Sync>;

#[derive(Clone, Default)]
pub struct TrackableRegistry {
    conditions: Vec<EntityPredicate>,
    blacklist: Vec<EntityPredicate>,
    cache: Vec<EntityId>,
}

impl TrackableRegistry {
    /// Registry with no predicates; nothing is trackable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry seeded with the built-in targets: bound captives, the
    /// skeleton merchant, the lost girl, and still-disguised mimics.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register_condition(|entity| entity.movement == MovementStyle::FaceClosestPlayer);
        registry.register_kind(EntityKind::SKELETON_MERCHANT);
        registry.register_kind(EntityKind::LOST_GIRL);
        registry.register_condition(|entity| {
            entity.movement == MovementStyle::Mimic && entity.discriminator == 0.0
        });
        registry.register_condition(|entity| {
            entity.movement == MovementStyle::BiomeMimic && entity.discriminator == 0.0
        });
        registry
    }

    pub fn register_condition<F>(&mut self, predicate: F)
    where
        F: Fn(&EntityView) -> bool + Send + Sync + 'static,
    {
        self.conditions.push(Arc::new(predicate));
    }

    pub fn register_blacklist<F>(&mut self, predicate: F)
    where
        F: Fn(&EntityView) -> bool + Send + Sync + 'static,
    {
        self.blacklist.push(Arc::new(predicate));
    }

    /// Makes every entity of `kind` trackable.
    pub fn register_kind(&mut self, kind: EntityKind) {
        self.register_condition(move |entity| entity.kind == kind);
    }

    /// Excludes every entity of `kind`, overriding any inclusion.
    pub fn blacklist_kind(&mut self, kind: EntityKind) {
        self.register_blacklist(move |entity| entity.kind == kind);
    }

    pub(crate) fn push_condition(&mut self, predicate: EntityPredicate) {
        self.conditions.push(predicate);
    }

    pub(crate) fn push_blacklist(&mut self, predicate: EntityPredicate) {
        self.blacklist.push(predicate);
    }

    /// Exclusion first, then inclusion, both in registration order.
    pub fn is_trackable(&self, entity: &EntityView) -> bool {
        if self.blacklist.iter().any(|excluded| excluded(entity)) {
            return false;
        }
        self.conditions.iter().any(|included| included(entity))
    }

    /// Rebuilds the candidate cache from the full entity table.
    ///
    /// Non-authoritative participants never search, so their cache is left
    /// empty.
    pub fn refresh_cache(&mut self, entities: &[EntityView], net_mode: NetMode) {
        self.cache.clear();
        if !net_mode.is_authoritative() {
            return;
        }
        let mut cache = std::mem::take(&mut self.cache);
        cache.extend(
            entities
                .iter()
                .filter(|entity| self.is_trackable(entity))
                .map(|entity| entity.id),
        );
        self.cache = cache;
    }

    /// Candidates from the last refresh, in entity-table order.
    pub fn cached_indices(&self) -> &[EntityId] {
        &self.cache
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    pub fn blacklist_count(&self) -> usize {
        self.blacklist.len()
    }
}

impl fmt::Debug for TrackableRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrackableRegistry")
            .field("conditions", &self.conditions.len())
            .field("blacklist", &self.blacklist.len())
            .field("cache", &self.cache)
            .finish()
    }
}
