//! Extra trackable kinds shipped as data.
//!
//! ```ron
//! (
//!     track: [369, 376],
//!     blacklist: [441],
//! )
//! ```

use std::path::Path;

use helper_core::{EntityKind, TrackableRegistry};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingList {
    pub track: Vec<u16>,
    pub blacklist: Vec<u16>,
}

impl TrackingList {
    /// Registers every listed kind, inclusions first.
    pub fn apply(&self, registry: &mut TrackableRegistry) {
        for &kind in &self.track {
            registry.register_kind(EntityKind(kind));
        }
        for &kind in &self.blacklist {
            registry.blacklist_kind(EntityKind(kind));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.track.is_empty() && self.blacklist.is_empty()
    }
}

pub struct TrackingListLoader;

impl TrackingListLoader {
    pub fn load(path: &Path) -> LoadResult<TrackingList> {
        let content = read_file(path)?;
        ron::from_str(&content).map_err(|e| anyhow::anyhow!("Failed to parse tracking RON: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use glam::Vec2;
    use helper_core::{EntityId, EntityView, MovementStyle};

    use super::*;

    #[test]
    fn loaded_list_extends_registry() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "(track: [369], blacklist: [453])").unwrap();
        let list = TrackingListLoader::load(file.path()).unwrap();
        assert_eq!(list.track, vec![369]);

        let mut registry = TrackableRegistry::with_defaults();
        list.apply(&mut registry);

        let view = |kind| EntityView::new(EntityId(0), EntityKind(kind), MovementStyle::Other(0), Vec2::ZERO);
        assert!(registry.is_trackable(&view(369)));
        assert!(!registry.is_trackable(&view(453)));
    }

    #[test]
    fn empty_struct_is_accepted() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "()").unwrap();
        assert!(TrackingListLoader::load(file.path()).unwrap().is_empty());
    }
}
