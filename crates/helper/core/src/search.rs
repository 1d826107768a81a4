//! Bounded search for the nearest trackable entity.

use glam::Vec2;

use crate::config::HelperConfig;
use crate::env::{EntityOracle, WorldOracle};
use crate::registry::TrackableRegistry;
use crate::state::{Agent, Rect, to_tile};

/// Tile rectangle an agent may search from its current position.
///
/// Centered on the agent's feet, grown by the configured radii and clipped to
/// the world interior so no query ever touches the off-limits border.
pub fn search_window<W>(agent: &Agent, world: &W, config: &HelperConfig) -> Rect
where
    W: WorldOracle + ?Sized,
{
    let feet = to_tile(agent.body.bottom());
    let dimensions = world.dimensions();
    let border = world.border_tiles();
    let interior = Rect::new(0, 0, dimensions.tiles_x, dimensions.tiles_y).inflate(-border, -border);
    Rect::new(feet.x, feet.y, 1, 1)
        .inflate(config.search_radius_x, config.search_radius_y)
        .intersection(interior)
}

/// Center of the closest cached candidate inside the search window.
///
/// Distance is measured from the agent's center; ties keep the candidate that
/// appears first in the cache. Returns `None` when the cache is empty, which
/// is always the case on non-authoritative participants.
pub fn find_nearest_target<W, E>(
    agent: &Agent,
    registry: &TrackableRegistry,
    entities: &E,
    world: &W,
    config: &HelperConfig,
) -> Option<Vec2>
where
    W: WorldOracle + ?Sized,
    E: EntityOracle + ?Sized,
{
    let candidates = registry.cached_indices();
    if candidates.is_empty() {
        return None;
    }

    let window = search_window(agent, world, config);
    let origin = agent.center();
    let mut best: Option<(f32, Vec2)> = None;

    for &id in candidates {
        if id == agent.id {
            continue;
        }
        let Some(entity) = entities.entity(id) else {
            continue;
        };
        let center = entity.center();
        if !entity.active || !window.contains(to_tile(center)) {
            continue;
        }
        let distance = origin.distance_squared(center);
        if best.is_none_or(|(closest, _)| distance < closest) {
            best = Some((distance, center));
        }
    }

    best.map(|(_, center)| center)
}
