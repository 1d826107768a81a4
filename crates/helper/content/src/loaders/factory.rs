//! Content factory for loading a data directory in one place.

use std::path::{Path, PathBuf};

use helper_core::HelperConfig;

use crate::loaders::{ConfigLoader, LoadResult, MapLoader, TileMapData, TrackingList, TrackingListLoader};

/// Loads helper content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── helper.toml
/// ├── tracking.ron
/// └── maps/
///     └── caverns.ron
/// ```
///
/// `helper.toml` and `tracking.ron` are optional; defaults are used when
/// they are absent.
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn load_config(&self) -> LoadResult<HelperConfig> {
        let path = self.data_dir.join("helper.toml");
        if !path.exists() {
            return Ok(HelperConfig::default());
        }
        ConfigLoader::load(&path)
    }

    pub fn load_tracking(&self) -> LoadResult<TrackingList> {
        let path = self.data_dir.join("tracking.ron");
        if !path.exists() {
            return Ok(TrackingList::default());
        }
        TrackingListLoader::load(&path)
    }

    /// Load `maps/<name>.ron`.
    pub fn load_map(&self, name: &str) -> LoadResult<TileMapData> {
        let path = self.data_dir.join("maps").join(format!("{name}.ron"));
        MapLoader::load(&path)
    }
}
