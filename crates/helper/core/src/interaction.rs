//! Pairwise flutter rule between fairy-like creatures.
//!
//! Two creatures of recognized kinds that come close drift apart vertically:
//! the one higher up rises, the lower one sinks. Helpers apply the rule
//! against every entity each tick; built-in fairies already flutter among
//! themselves natively and only need [`InteractionRule::companion_drift`]
//! against helpers.

use std::collections::BTreeSet;

use crate::env::EntityView;
use crate::state::EntityKind;

/// Vertical velocity change per tick while two creatures flutter.
pub const FLUTTER_DRIFT: f32 = 0.05;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InteractionRule {
    kinds: BTreeSet<EntityKind>,
}

impl InteractionRule {
    /// Rule recognizing the built-in fairies plus `helper_kind`.
    pub fn new(helper_kind: EntityKind) -> Self {
        let mut kinds: BTreeSet<_> = EntityKind::BUILT_IN_FAIRIES.into_iter().collect();
        kinds.insert(helper_kind);
        Self { kinds }
    }

    pub fn register(&mut self, kind: EntityKind) {
        self.kinds.insert(kind);
    }

    pub fn recognizes(&self, kind: EntityKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Distinct, both live, both recognized, and closer than one and a half
    /// widths of `a` (Manhattan distance between top-left corners).
    pub fn can_interact(&self, a: &EntityView, b: &EntityView) -> bool {
        let offset = (a.position - b.position).abs();
        a.id != b.id
            && a.active
            && b.active
            && self.recognizes(a.kind)
            && self.recognizes(b.kind)
            && offset.x + offset.y < a.width * 1.5
    }

    /// Vertical velocity change for `a` caused by `b`, or `0.0`.
    pub fn drift_for(&self, a: &EntityView, b: &EntityView) -> f32 {
        if !self.can_interact(a, b) {
            return 0.0;
        }
        if a.position.y < b.position.y {
            -FLUTTER_DRIFT
        } else {
            FLUTTER_DRIFT
        }
    }

    /// Total drift for `entity` against every other entity.
    pub fn total_drift(&self, entity: &EntityView, others: &[EntityView]) -> f32 {
        others.iter().map(|other| self.drift_for(entity, other)).sum()
    }

    /// Drift for a built-in fairy, skipping other built-ins it already
    /// flutters with natively.
    pub fn companion_drift(&self, fairy: &EntityView, others: &[EntityView]) -> f32 {
        others
            .iter()
            .filter(|other| !EntityKind::BUILT_IN_FAIRIES.contains(&other.kind))
            .map(|other| self.drift_for(fairy, other))
            .sum()
    }
}
