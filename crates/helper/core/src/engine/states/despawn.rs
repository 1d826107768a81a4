use crate::config::HelperConfig;
use crate::engine::steer::Steering;
use crate::engine::TickError;
use crate::state::{Agent, AgentFlags};

pub(crate) fn tick(agent: &mut Agent) -> Result<Steering, TickError> {
    agent.flags.remove(AgentFlags::TILE_COLLIDE);

    let dir = agent.direction.sign();
    let velocity = &mut agent.body.velocity;
    velocity.x = (velocity.x + 0.05 * dir).clamp(-10.0, 10.0);
    velocity.y = (velocity.y - 0.025).clamp(-5.0, 5.0);

    let countdown = HelperConfig::DESPAWN_COUNTDOWN;
    agent.despawn_countdown = Some(agent.despawn_countdown.map_or(countdown, |left| left.min(countdown)));

    Ok(Steering::Automatic)
}
