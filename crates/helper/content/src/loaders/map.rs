//! Tile map loader for headless runs.
//!
//! Maps list only the interesting tiles; everything else is air.
//!
//! ```ron
//! (
//!     dimensions: (400, 300),
//!     solid: [(10, 200), (11, 200)],
//!     liquid: [(12, 200, 255)],
//! )
//! ```

use std::collections::HashMap;
use std::path::Path;

use glam::IVec2;
use helper_core::{TileView, WorldDimensions};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct MapDataRon {
    dimensions: (i32, i32),
    #[serde(default)]
    solid: Vec<(i32, i32)>,
    #[serde(default)]
    liquid: Vec<(i32, i32, u8)>,
    /// Solid rectangles as `(x, y, width, height)`.
    #[serde(default)]
    blocks: Vec<(i32, i32, i32, i32)>,
}

/// Non-air tiles of a map.
#[derive(Debug, Clone, PartialEq)]
pub struct TileMapData {
    pub dimensions: WorldDimensions,
    pub tiles: HashMap<IVec2, TileView>,
}

pub struct MapLoader;

impl MapLoader {
    pub fn load(path: &Path) -> LoadResult<TileMapData> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<TileMapData> {
        let data: MapDataRon =
            ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse map RON: {}", e))?;
        let dimensions = WorldDimensions::new(data.dimensions.0, data.dimensions.1);

        let mut tiles = HashMap::new();
        let mut place = |tile: IVec2, view: TileView| -> LoadResult<()> {
            if !dimensions.contains(tile) {
                anyhow::bail!("tile ({}, {}) is outside the {}x{} map", tile.x, tile.y, dimensions.tiles_x, dimensions.tiles_y);
            }
            tiles.insert(tile, view);
            Ok(())
        };

        for (x, y, width, height) in data.blocks {
            for ty in y..y + height {
                for tx in x..x + width {
                    place(IVec2::new(tx, ty), TileView::SOLID)?;
                }
            }
        }
        for (x, y) in data.solid {
            place(IVec2::new(x, y), TileView::SOLID)?;
        }
        for (x, y, amount) in data.liquid {
            place(
                IVec2::new(x, y),
                TileView {
                    liquid: amount,
                    ..TileView::AIR
                },
            )?;
        }

        Ok(TileMapData { dimensions, tiles })
    }
}
