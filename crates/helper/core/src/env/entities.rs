use glam::Vec2;

use crate::state::{EntityId, EntityKind, Rect};

/// Enumeration of the host's live entity table.
pub trait EntityOracle: Send + Sync {
    /// All entity slots, indexed by [`EntityId`]. Inactive slots are included.
    fn entities(&self) -> &[EntityView];

    fn entity(&self, id: EntityId) -> Option<&EntityView> {
        self.entities().get(id.index())
    }
}

/// Movement style the host assigned to an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MovementStyle {
    /// Stands still and turns toward the nearest player (bound captives).
    FaceClosestPlayer,
    /// Chest-shaped mimic.
    Mimic,
    /// Biome-specific mimic.
    BiomeMimic,
    /// Built-in fairy flight.
    Fairy,
    /// Anything the core has no opinion about.
    Other(i16),
}

/// What the core can see of one host entity.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityView {
    pub id: EntityId,
    pub kind: EntityKind,
    pub movement: MovementStyle,
    /// First behavior register of the entity. Mimics keep `0.0` here while
    /// still disguised.
    pub discriminator: f32,
    pub active: bool,
    /// Top-left corner in world units.
    pub position: Vec2,
    pub width: f32,
    pub height: f32,
}

impl EntityView {
    pub fn new(id: EntityId, kind: EntityKind, movement: MovementStyle, position: Vec2) -> Self {
        Self {
            id,
            kind,
            movement,
            discriminator: 0.0,
            active: true,
            position,
            width: 18.0,
            height: 40.0,
        }
    }

    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_discriminator(mut self, discriminator: f32) -> Self {
        self.discriminator = discriminator;
        self
    }

    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    pub fn center(&self) -> Vec2 {
        self.position + Vec2::new(self.width, self.height) / 2.0
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_body(self.position, self.width, self.height)
    }
}
