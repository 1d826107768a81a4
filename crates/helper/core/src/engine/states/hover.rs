use crate::engine::steer::{self, Steering};
use crate::engine::{TickContext, TickError};
use crate::state::{Agent, AgentFlags, AgentState};

/// Leash length before the agent chases the player again.
const LEASH: f32 = 100.0;

pub(crate) fn tick(agent: &mut Agent, ctx: &TickContext<'_>) -> Result<Steering, TickError> {
    agent.flags.remove(AgentFlags::TILE_COLLIDE);

    let players = ctx.env.players()?;
    let to_player = steer::tracked_player(agent, players)
        .map(|player| player.center - agent.center())
        .filter(|offset| offset.length_squared() <= LEASH * LEASH);
    let Some(to_player) = to_player else {
        agent.enter(AgentState::ChasePlayer);
        steer::retarget(agent, players);
        return Ok(Steering::Automatic);
    };

    steer::bounce(agent, ctx.env.world()?);
    steer::approach(&mut agent.body.velocity, to_player);

    if ctx.net_mode.is_authoritative()
        && let Some(target) = ctx.find_target(agent)?
    {
        agent.enter_with_target(target);
    }

    Ok(Steering::Automatic)
}
