use glam::Vec2;

use crate::engine::steer::{self, HoverProfile, Steering};
use crate::engine::{AgentEffect, TickContext, TickError, TickOutput};
use crate::env::{RngOracle, RollContext};
use crate::state::{Agent, AgentFlags, AgentState, Rect, StateError};

const HOVER: HoverProfile = HoverProfile {
    down_scan: 4,
    up_range: 2,
    sink: 0.05,
    climb: 0.05,
    min_vy: -1.0,
    max_vy: 1.0,
};

/// Edge length of the square around the target that counts as arrival.
const ARRIVAL_SIZE: f32 = 5.0;
const NUDGE_ACCEL: f32 = 0.1;

pub(crate) fn tick(
    agent: &mut Agent,
    ctx: &TickContext<'_>,
    out: &mut TickOutput,
) -> Result<Steering, TickError> {
    agent.flags.remove(AgentFlags::TILE_COLLIDE);

    let players = ctx.env.players()?;
    let Some(player) = steer::living_player(agent, players).copied() else {
        steer::flee_from_tracked(agent, players);
        return Ok(Steering::Automatic);
    };

    let target = agent
        .target_position()
        .ok_or(StateError::MissingTarget(agent.state()))?;
    let zone = Rect::centered(target, Vec2::splat(ARRIVAL_SIZE));
    if agent.body.hitbox().intersects(&zone) {
        agent.enter(AgentState::FoundTarget);
        return Ok(Steering::Automatic);
    }

    let center = agent.center();
    let distance = center.distance(player.center);
    let nudge = ctx.config.nudge_range;
    if distance > nudge {
        if distance < nudge + 100.0 {
            steer::bounce(agent, ctx.env.world()?);
        }
        agent.sprite_direction = steer::sprite_toward(player.center.x, center.x);

        if distance > nudge + 60.0 {
            agent.body.velocity += steer::direction_to(center, player.center) * NUDGE_ACCEL;
            let seed = ctx.seed_for(agent.id, RollContext::NudgeChime);
            if ctx.env.rng()?.one_in(seed, 30) {
                out.push(AgentEffect::Chime { position: center })?;
            }
        } else if distance < nudge + 30.0 {
            let point = zone.closest_point(center);
            agent.body.velocity += steer::direction_to(center, point) * NUDGE_ACCEL;
        }

        let speed = agent.body.velocity.length();
        if speed > 1.0 {
            agent.body.velocity /= speed;
        }
        return Ok(Steering::Manual);
    }

    let point = zone.closest_point(center);
    steer::steer_to_point(agent, point, 1.0, 3.0, 2.0);

    let tile = agent.center_tile();
    steer::hover(agent, ctx.env.flight()?, tile, &HOVER);
    steer::track_stuck(agent, ctx.env.world()?, tile);

    Ok(Steering::Automatic)
}
