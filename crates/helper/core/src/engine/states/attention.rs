use std::f32::consts::PI;

use crate::config::HelperConfig;
use crate::engine::steer::{self, Steering};
use crate::engine::{AgentEffect, TickContext, TickError, TickOutput};
use crate::state::{Agent, AgentFlags, AgentState};

/// Ticks per loop while circling for attention.
const LOOP_TICKS: f32 = 65.0;

pub(crate) fn tick(
    agent: &mut Agent,
    ctx: &TickContext<'_>,
    out: &mut TickOutput,
) -> Result<Steering, TickError> {
    agent.flags.remove(AgentFlags::TILE_COLLIDE);

    let timer = agent.general_timer();
    if timer == HelperConfig::SETTLE_TICKS {
        out.push(AgentEffect::Chime {
            position: agent.center(),
        })?;
    }

    let players = ctx.env.players()?;
    let steering = if timer <= HelperConfig::SETTLE_TICKS {
        agent.body.velocity *= 0.9;
        Steering::Automatic
    } else {
        if let Some(player) = steer::tracked_player(agent, players) {
            agent.sprite_direction = steer::sprite_toward(player.center.x, agent.center().x);
        }

        let progress = (timer - HelperConfig::SETTLE_TICKS) as f32;
        let (rotation, height) = if progress <= LOOP_TICKS {
            (PI / 8.0, 14.0)
        } else if progress <= LOOP_TICKS * 2.0 {
            (-PI / 8.0, 18.0)
        } else {
            (0.0, 22.0)
        };
        let rotation = rotation * agent.direction.sign();
        let start = progress / LOOP_TICKS;
        agent.body.velocity =
            steer::circle_velocity(ctx.env.flight()?, start, start + 0.005 * PI, rotation, height);
        Steering::Manual
    };

    if agent.advance_general_timer() >= HelperConfig::ATTENTION_TICKS {
        agent.enter(AgentState::LeadToTarget);
        steer::retarget(agent, players);
    }

    Ok(steering)
}
