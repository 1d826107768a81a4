use glam::Vec2;

use crate::engine::steer::{self, Steering};
use crate::engine::{TickContext, TickError};
use crate::env::{RngOracle, RollContext};
use crate::state::{Agent, AgentFlags};

/// Fraction of the rolled launch speed actually applied.
const LAUNCH_DAMPING: f32 = 0.7;

pub(crate) fn tick(agent: &mut Agent, ctx: &TickContext<'_>) -> Result<Steering, TickError> {
    agent.flags.remove(AgentFlags::LAVA_IMMUNE);
    agent.flags.insert(AgentFlags::TILE_COLLIDE);

    let center = agent.center();
    let anchor = match agent.anchor() {
        Some(anchor) => anchor,
        None => {
            agent.set_anchor(center);
            center
        }
    };

    if !agent.initialized() {
        agent.mark_initialized();
        agent.body.velocity = launch_velocity(agent, ctx)? * LAUNCH_DAMPING;
        agent.mark_dirty();
    }

    steer::approach(&mut agent.body.velocity, anchor - center);

    let players = ctx.env.players()?;
    steer::retarget(agent, players);
    let spotted = steer::living_player(agent, players)
        .filter(|player| player.within_range(center, ctx.config.detection_range))
        .map(|player| player.center.x);
    if let Some(threat_x) = spotted {
        steer::flee(agent, threat_x);
    }

    Ok(Steering::Automatic)
}

fn launch_velocity(agent: &Agent, ctx: &TickContext<'_>) -> Result<Vec2, TickError> {
    let rng = ctx.env.rng()?;
    let roll = |context| ctx.seed_for(agent.id, context);
    let speed_x = 2.0 + 2.0 * rng.next_f32(roll(RollContext::LaunchSpeedX));
    let speed_y = 1.0 + rng.next_f32(roll(RollContext::LaunchSpeedY));
    Ok(Vec2::new(
        speed_x * rng.sign(roll(RollContext::LaunchSignX)),
        speed_y * rng.sign(roll(RollContext::LaunchSignY)),
    ))
}
