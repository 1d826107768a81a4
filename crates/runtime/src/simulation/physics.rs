//! Minimal stand-in for the host's physics step.
use glam::Vec2;
use helper_core::{Body, CollisionFlags, WorldOracle};

use crate::oracle::TileWorld;

/// Moves `body` by its velocity, one axis at a time.
///
/// With `collide` set, an axis whose move would overlap a solid tile is not
/// moved and is reported in [`Body::collision`]; the velocity is left for the
/// agent to react to. Bodies already embedded in terrain move freely.
pub(crate) fn integrate(body: &mut Body, collide: bool, world: &TileWorld) {
    body.old_velocity = body.velocity;
    body.collision = CollisionFlags::empty();

    let blocked = |position: Vec2| world.solid_collision(position, body.width, body.height);
    if !collide || blocked(body.position) {
        body.position += body.velocity;
        return;
    }

    let step_x = body.position + Vec2::new(body.velocity.x, 0.0);
    if blocked(step_x) {
        body.collision |= CollisionFlags::X;
    } else {
        body.position = step_x;
    }

    let step_y = body.position + Vec2::new(0.0, body.velocity.y);
    if blocked(step_y) {
        body.collision |= CollisionFlags::Y;
    } else {
        body.position = step_y;
    }
}

/// Whether the body's center has left the world grid.
pub(crate) fn out_of_world(body: &Body, world: &TileWorld) -> bool {
    !world.contains(helper_core::state::to_tile(body.center()))
}
