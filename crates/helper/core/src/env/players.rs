use glam::Vec2;

use crate::state::{PlayerIndex, Rect};

/// Read access to the host's player collection.
pub trait PlayerOracle: Send + Sync {
    fn players(&self) -> &[PlayerView];

    fn player(&self, index: PlayerIndex) -> Option<&PlayerView> {
        self.players().get(index.index())
    }

    /// Nearest connected, living player to `from`.
    ///
    /// Falls back to the nearest connected player when everyone is dead, so an
    /// agent keeps a pursuit target to notice the death with.
    fn closest_player(&self, from: Vec2) -> Option<PlayerIndex> {
        let nearest = |alive_only: bool| {
            self.players()
                .iter()
                .enumerate()
                .filter(|(_, p)| p.active && (!alive_only || !p.dead_or_ghost()))
                .min_by(|(_, a), (_, b)| {
                    a.center
                        .distance_squared(from)
                        .total_cmp(&b.center.distance_squared(from))
                })
                .map(|(index, _)| PlayerIndex(index as u16))
        };
        nearest(true).or_else(|| nearest(false))
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerView {
    pub center: Vec2,
    pub width: f32,
    pub height: f32,
    /// Slot holds a connected player.
    pub active: bool,
    pub dead: bool,
    /// Spectating; cannot be seen or helped.
    pub ghost: bool,
}

impl PlayerView {
    pub const WIDTH: f32 = 20.0;
    pub const HEIGHT: f32 = 42.0;

    pub fn alive_at(center: Vec2) -> Self {
        Self {
            center,
            width: Self::WIDTH,
            height: Self::HEIGHT,
            active: true,
            dead: false,
            ghost: false,
        }
    }

    pub fn dead_or_ghost(&self) -> bool {
        self.dead || self.ghost
    }

    pub fn within_range(&self, point: Vec2, range: f32) -> bool {
        self.center.distance_squared(point) <= range * range
    }

    pub fn hitbox(&self) -> Rect {
        Rect::centered(self.center, Vec2::new(self.width, self.height))
    }
}
