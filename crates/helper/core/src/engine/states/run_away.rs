use glam::IVec2;

use crate::engine::steer::{self, Steering};
use crate::engine::{TickContext, TickError};
use crate::env::{TileView, WorldOracle};
use crate::state::{Agent, AgentFlags, CollisionFlags, signum_of, to_tile};

const MAX_SPEED: f32 = 4.5;
/// Tiles scanned ahead of the feet (one more column is always included).
const SCAN_WIDTH: i32 = 20;
const SCAN_DEPTH: i32 = 8;
/// Ground within this many rows below the feet counts as too close.
const CLOSE_ROWS: i32 = 5;

pub(crate) fn tick(agent: &mut Agent, ctx: &TickContext<'_>) -> Result<Steering, TickError> {
    agent.flags.remove(AgentFlags::LAVA_IMMUNE);
    agent.flags.insert(AgentFlags::TILE_COLLIDE);

    if agent.body.collision.contains(CollisionFlags::X) {
        agent.direction = agent.direction.flipped();
        agent.body.velocity.x = agent.direction.sign() * 2.0;
    }
    if agent.body.collision.contains(CollisionFlags::Y) {
        agent.body.velocity.y = signum_of(agent.body.old_velocity.y > 0.0);
    }

    accelerate(agent);

    let (sink, too_close) = scan_ground(agent, ctx.env.world()?);
    let velocity = &mut agent.body.velocity;
    velocity.y += if sink { 0.05 } else { -0.2 };
    if too_close {
        velocity.y -= 0.3;
    }
    velocity.y = velocity.y.clamp(-5.0, 3.0);

    Ok(Steering::Automatic)
}

fn accelerate(agent: &mut Agent) {
    let dir = agent.direction.sign();
    let vx = &mut agent.body.velocity.x;
    if steer::sign_or_zero(*vx) == dir && vx.abs() >= MAX_SPEED {
        return;
    }

    *vx += dir * 0.04;
    if *vx * dir < 0.0 {
        *vx += dir * if vx.abs() > MAX_SPEED { 0.4 } else { 0.2 };
    } else if vx.abs() > MAX_SPEED {
        *vx = dir * MAX_SPEED;
    }
}

/// Scans the window ahead of and below the feet for ground or liquid.
///
/// Returns `(sink, too_close)`: `sink` when nothing was found.
fn scan_ground<W>(agent: &Agent, world: &W) -> (bool, bool)
where
    W: WorldOracle + ?Sized,
{
    let feet = to_tile(agent.body.bottom());
    let left = if agent.direction.sign() < 0.0 {
        feet.x - SCAN_WIDTH
    } else {
        feet.x
    };

    let mut sink = true;
    let mut too_close = false;
    for x in left..=left + SCAN_WIDTH {
        let hit = (feet.y..feet.y + SCAN_DEPTH).find(|&y| {
            world
                .tile(IVec2::new(x, y))
                .is_some_and(TileView::is_hover_surface)
        });
        if let Some(y) = hit {
            sink = false;
            if y < feet.y + CLOSE_ROWS {
                too_close = true;
            }
        }
    }
    (sink, too_close)
}
