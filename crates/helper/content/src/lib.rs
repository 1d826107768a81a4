//! Data-driven helper content and loaders.
//!
//! This crate reads the data files a host or simulation ships alongside the
//! core:
//! - Helper tunables (TOML)
//! - Extra trackable and blacklisted entity kinds (RON)
//! - Tile maps for headless runs (RON)
//!
//! Content configures the runtime and never appears in agent state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, MapLoader, TileMapData, TrackingList, TrackingListLoader};
