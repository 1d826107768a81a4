use std::f32::consts::PI;

use crate::config::HelperConfig;
use crate::engine::steer::{self, Steering};
use crate::engine::{AgentEffect, TickContext, TickError, TickOutput};
use crate::net::{NetMode, TerminalEffectMessage};
use crate::state::{Agent, AgentFlags};

/// Ticks per celebration loop; each loop changes size and tilt.
const LOOP_TICKS: f32 = 50.0;

pub(crate) fn tick(
    agent: &mut Agent,
    ctx: &TickContext<'_>,
    out: &mut TickOutput,
) -> Result<Steering, TickError> {
    agent.reset_despawn_timer();
    agent.flags.remove(AgentFlags::TILE_COLLIDE);

    let timer = agent.general_timer();
    if timer == HelperConfig::SETTLE_TICKS {
        out.push(AgentEffect::Chime {
            position: agent.center(),
        })?;
    }

    let steering = if timer <= HelperConfig::SETTLE_TICKS {
        agent.body.velocity *= 0.9;
        Steering::Automatic
    } else {
        let progress = (timer - HelperConfig::SETTLE_TICKS) as f32;
        let loop_index = (progress / LOOP_TICKS).trunc();
        let height = (loop_index * 2.0).cos() * 10.0 + 8.0;
        let rotation = loop_index.cos() * PI / 8.0 * agent.direction.sign();
        let start = progress / LOOP_TICKS;
        agent.body.velocity =
            steer::circle_velocity(ctx.env.flight()?, start, start + 0.02, rotation, height);

        if let Some(player) = steer::tracked_player(agent, ctx.env.players()?) {
            agent.sprite_direction = steer::sprite_toward(player.center.x, agent.center().x);
        }
        Steering::Manual
    };

    let timer = agent.advance_general_timer();
    if ctx.net_mode.is_authoritative() && timer > HelperConfig::CELEBRATION_TICKS {
        complete(agent, ctx.net_mode, out)?;
    }

    Ok(steering)
}

/// Removes the agent and announces the completion burst.
fn complete(agent: &mut Agent, net_mode: NetMode, out: &mut TickOutput) -> Result<(), TickError> {
    let position = agent.center();
    agent.body.active = false;
    agent.mark_dirty();
    out.deactivated = true;

    match net_mode {
        NetMode::SinglePlayer => out.push(AgentEffect::CompletionEffect { position })?,
        NetMode::Server => {
            out.push(AgentEffect::SyncRemoval { id: agent.id })?;
            out.push(AgentEffect::Broadcast(TerminalEffectMessage::new(position)))?;
        }
        NetMode::Client => {}
    }
    Ok(())
}
