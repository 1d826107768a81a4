use glam::Vec2;

use crate::engine::steer::{self, HoverProfile, Steering};
use crate::engine::{TickContext, TickError};
use crate::state::{Agent, AgentFlags, AgentState, Rect};

const HOVER: HoverProfile = HoverProfile {
    down_scan: 6,
    up_range: 3,
    sink: 0.05,
    climb: 0.02,
    min_vy: -4.0,
    max_vy: 2.0,
};

pub(crate) fn tick(agent: &mut Agent, ctx: &TickContext<'_>) -> Result<Steering, TickError> {
    agent.flags.remove(AgentFlags::TILE_COLLIDE);

    let players = ctx.env.players()?;
    let Some(player) = steer::living_player(agent, players).copied() else {
        steer::flee_from_tracked(agent, players);
        return Ok(Steering::Automatic);
    };

    let zone = capture_zone(player.center, player.width, player.height);
    if ctx.net_mode.is_authoritative() && agent.body.hitbox().intersects(&zone) {
        match ctx.find_target(agent)? {
            Some(target) => agent.enter_with_target(target),
            None => agent.enter(AgentState::HoverAroundPlayer),
        }
        return Ok(Steering::Automatic);
    }

    let point = zone.closest_point(agent.center());
    steer::steer_to_point(agent, point, 2.0, 2.0, 1.5);

    let tile = agent.center_tile();
    steer::hover(agent, ctx.env.flight()?, tile, &HOVER);
    steer::track_stuck(agent, ctx.env.world()?, tile);

    Ok(Steering::Automatic)
}

/// Area around the player that starts the search: wider than the player,
/// half as tall.
pub(crate) fn capture_zone(center: Vec2, width: f32, height: f32) -> Rect {
    Rect::centered(center, Vec2::new(width + 60.0, (height / 2.0).trunc()))
}
