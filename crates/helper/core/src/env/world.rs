use glam::{IVec2, Vec2};

use crate::state::to_tile;

/// Read-only tile queries over the host world.
pub trait WorldOracle: Send + Sync {
    fn dimensions(&self) -> WorldDimensions;

    /// Returns the tile at `tile`, or `None` outside the world.
    fn tile(&self, tile: IVec2) -> Option<TileView>;

    /// Width of the off-limits band along every world edge, in tiles.
    fn border_tiles(&self) -> i32 {
        WorldDimensions::DEFAULT_BORDER_TILES
    }

    fn contains(&self, tile: IVec2) -> bool {
        self.dimensions().contains(tile)
    }

    /// Solid, unactuated tile at `tile`.
    fn is_solid(&self, tile: IVec2) -> bool {
        self.tile(tile).is_some_and(TileView::is_solid)
    }

    /// Any solid body overlapping the rectangle at `position` with the given size.
    fn solid_collision(&self, position: Vec2, width: f32, height: f32) -> bool {
        let first = to_tile(position);
        let last = to_tile(position + Vec2::new(width, height) - Vec2::splat(0.01));
        (first.x..=last.x).any(|x| (first.y..=last.y).any(|y| self.is_solid(IVec2::new(x, y))))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldDimensions {
    pub tiles_x: i32,
    pub tiles_y: i32,
}

impl WorldDimensions {
    pub const DEFAULT_BORDER_TILES: i32 = 40;

    pub const fn new(tiles_x: i32, tiles_y: i32) -> Self {
        Self { tiles_x, tiles_y }
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.tiles_x && tile.y < self.tiles_y
    }
}

/// Snapshot of one tile as far as flight is concerned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileView {
    /// A block occupies the tile and its type is solid.
    pub solid: bool,
    /// The block is switched off by an actuator and can be passed through.
    pub actuated: bool,
    /// Liquid fill, 0 (dry) to 255 (full).
    pub liquid: u8,
}

impl TileView {
    pub const AIR: Self = Self {
        solid: false,
        actuated: false,
        liquid: 0,
    };

    pub const SOLID: Self = Self {
        solid: true,
        actuated: false,
        liquid: 0,
    };

    pub const WATER: Self = Self {
        solid: false,
        actuated: false,
        liquid: 255,
    };

    pub fn is_solid(self) -> bool {
        self.solid && !self.actuated
    }

    /// Ground a hovering flier should keep clear of: a solid block or any liquid.
    pub fn is_hover_surface(self) -> bool {
        self.is_solid() || self.liquid > 0
    }
}
