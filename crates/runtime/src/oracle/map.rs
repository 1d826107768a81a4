//! Static terrain served through [`helper_core::WorldOracle`].
use std::collections::HashMap;

use glam::IVec2;
use helper_content::TileMapData;
use helper_core::{TileView, WorldDimensions, WorldOracle};

/// Sparse tile grid; tiles not stored are air.
#[derive(Clone, Debug)]
pub struct TileWorld {
    dimensions: WorldDimensions,
    tiles: HashMap<IVec2, TileView>,
    border_tiles: i32,
}

impl TileWorld {
    pub fn new(dimensions: WorldDimensions, tiles: HashMap<IVec2, TileView>) -> Self {
        Self {
            dimensions,
            tiles,
            border_tiles: WorldDimensions::DEFAULT_BORDER_TILES,
        }
    }

    /// Empty world of the given size.
    pub fn open(tiles_x: i32, tiles_y: i32) -> Self {
        Self::new(WorldDimensions::new(tiles_x, tiles_y), HashMap::new())
    }

    #[must_use]
    pub fn with_border(mut self, border_tiles: i32) -> Self {
        self.border_tiles = border_tiles.max(0);
        self
    }

    /// Fills the tile rectangle `[x, x + width) × [y, y + height)` with `tile`.
    pub fn fill(&mut self, x: i32, y: i32, width: i32, height: i32, tile: TileView) {
        for ty in y..y + height {
            for tx in x..x + width {
                let position = IVec2::new(tx, ty);
                if self.dimensions.contains(position) {
                    self.tiles.insert(position, tile);
                }
            }
        }
    }

    pub fn set(&mut self, tile: IVec2, view: TileView) {
        if self.dimensions.contains(tile) {
            self.tiles.insert(tile, view);
        }
    }
}

impl From<TileMapData> for TileWorld {
    fn from(data: TileMapData) -> Self {
        Self::new(data.dimensions, data.tiles)
    }
}

impl WorldOracle for TileWorld {
    fn dimensions(&self) -> WorldDimensions {
        self.dimensions
    }

    fn tile(&self, tile: IVec2) -> Option<TileView> {
        if !self.dimensions.contains(tile) {
            return None;
        }
        Some(self.tiles.get(&tile).copied().unwrap_or(TileView::AIR))
    }

    fn border_tiles(&self) -> i32 {
        self.border_tiles
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    #[test]
    fn unset_tiles_are_air_inside_and_none_outside() {
        let world = TileWorld::open(10, 10);
        assert_eq!(world.tile(IVec2::new(3, 3)), Some(TileView::AIR));
        assert_eq!(world.tile(IVec2::new(10, 3)), None);
    }

    #[test]
    fn fill_clips_to_world_and_collides() {
        let mut world = TileWorld::open(10, 10);
        world.fill(8, 8, 5, 5, TileView::SOLID);
        assert!(world.is_solid(IVec2::new(9, 9)));
        assert!(world.solid_collision(Vec2::new(140.0, 140.0), 18.0, 20.0));
        assert!(!world.solid_collision(Vec2::new(0.0, 0.0), 18.0, 20.0));
    }
}
