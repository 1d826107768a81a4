//! Content loaders for reading helper data from files.

pub mod config;
pub mod factory;
pub mod map;
pub mod tracking;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use map::{MapLoader, TileMapData};
pub use tracking::{TrackingList, TrackingListLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
