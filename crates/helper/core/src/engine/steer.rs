//! Steering primitives shared by several states.

use glam::{IVec2, Vec2};

use crate::config::HelperConfig;
use crate::env::{FlightOracle, PlayerOracle, PlayerView, WorldOracle};
use crate::state::{Agent, AgentFlags, AgentState, CollisionFlags, Facing, signum_of};

/// Whether the state drove the facing itself this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Steering {
    Automatic,
    Manual,
}

/// Hover advice application for one state.
pub(crate) struct HoverProfile {
    pub down_scan: i32,
    pub up_range: i32,
    pub sink: f32,
    pub climb: f32,
    pub min_vy: f32,
    pub max_vy: f32,
}

/// Sign with a zero for zero, as the host's integer sign does.
#[inline]
pub(crate) fn sign_or_zero(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}

#[inline]
pub(crate) fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Sprite facing that looks at `player_x`; the sheet is drawn mirrored.
#[inline]
pub(crate) fn sprite_toward(player_x: f32, own_x: f32) -> Facing {
    Facing::from_bool(player_x <= own_x)
}

pub(crate) fn tracked_player<'p, P>(agent: &Agent, players: &'p P) -> Option<&'p PlayerView>
where
    P: PlayerOracle + ?Sized,
{
    agent
        .target_player
        .and_then(|index| players.player(index))
        .filter(|player| player.active)
}

/// The tracked player, or `None` when it is gone, dead or spectating.
pub(crate) fn living_player<'p, P>(agent: &Agent, players: &'p P) -> Option<&'p PlayerView>
where
    P: PlayerOracle + ?Sized,
{
    tracked_player(agent, players).filter(|player| !player.dead_or_ghost())
}

pub(crate) fn retarget<P>(agent: &mut Agent, players: &P)
where
    P: PlayerOracle + ?Sized,
{
    agent.target_player = players.closest_player(agent.center());
}

/// Enters RunAway facing away from `threat_x`, forcing at least a slow
/// start in that direction.
pub(crate) fn flee(agent: &mut Agent, threat_x: f32) {
    agent.direction = Facing::away_from(threat_x, agent.center().x);
    let sign = agent.direction.sign();
    if agent.body.velocity.x * sign < 0.0 {
        agent.body.velocity.x = sign * 2.0;
    }
    agent.enter(AgentState::RunAway);
}

/// Fallback when the tracked player died or left: wander off.
pub(crate) fn flee_from_tracked<P>(agent: &mut Agent, players: &P)
where
    P: PlayerOracle + ?Sized,
{
    let threat_x = tracked_player(agent, players).map_or(agent.center().x, |player| player.center.x);
    flee(agent, threat_x);
}

/// Per-axis nudge toward `offset` once farther than 20 units.
pub(crate) fn approach(velocity: &mut Vec2, offset: Vec2) {
    if offset.length_squared() <= 20.0 * 20.0 {
        return;
    }
    *velocity += Vec2::new(signum_of(offset.x > 0.0), signum_of(offset.y > 0.0)) * 0.04;
    if velocity.y.abs() > 2.0 {
        velocity.y *= 0.95;
    }
}

#[inline]
pub(crate) fn smooth_toward(velocity: &mut Vec2, desired: Vec2) {
    *velocity = velocity.lerp(desired, HelperConfig::STEERING_LERP);
}

/// Re-enables tile collision and reflects velocity on blocked axes, unless
/// the body is embedded in solid tiles.
pub(crate) fn bounce<W>(agent: &mut Agent, world: &W)
where
    W: WorldOracle + ?Sized,
{
    let body = &mut agent.body;
    if world.solid_collision(body.position, body.width, body.height) {
        return;
    }
    agent.flags.insert(AgentFlags::TILE_COLLIDE);
    if body.collision.contains(CollisionFlags::X) {
        body.velocity.x = -body.velocity.x;
    }
    if body.collision.contains(CollisionFlags::Y) {
        body.velocity.y = -body.velocity.y;
    }
}

/// Applies the host's hover advice while the agent is not stuck.
pub(crate) fn hover<F>(agent: &mut Agent, flight: &F, tile: IVec2, profile: &HoverProfile)
where
    F: FlightOracle + ?Sized,
{
    if agent.general_timer() >= HelperConfig::STUCK_THRESHOLD {
        return;
    }
    let advice = flight.bird_flight(profile.down_scan, profile.up_range, tile);
    let velocity = &mut agent.body.velocity;
    if advice.go_down {
        velocity.y += profile.sink;
    }
    if advice.go_up {
        velocity.y -= profile.climb;
    }
    velocity.y = velocity.y.clamp(profile.min_vy, profile.max_vy);
}

/// Stuck-timer bookkeeping for the center tile, skipped outside the world.
pub(crate) fn track_stuck<W>(agent: &mut Agent, world: &W, tile: IVec2)
where
    W: WorldOracle + ?Sized,
{
    if world.contains(tile) {
        agent.update_stuck_timer(world.is_solid(tile));
    }
}

/// Velocity that moves along the host's circle path from `from` to `to`.
pub(crate) fn circle_velocity<F>(flight: &F, from: f32, to: f32, rotation: f32, height: f32) -> Vec2
where
    F: FlightOracle + ?Sized,
{
    flight.circle_offset(to, rotation, height) - flight.circle_offset(from, rotation, height)
}

/// Lerp steering toward `point`, scaled up when far away.
pub(crate) fn steer_to_point(agent: &mut Agent, point: Vec2, base: f32, far: f32, near: f32) {
    let center = agent.center();
    let mut desired = direction_to(center, point) * base;
    let distance_sq = center.distance_squared(point);
    if distance_sq > 150.0 * 150.0 {
        desired *= far;
    } else if distance_sq > 80.0 * 80.0 {
        desired *= near;
    }
    smooth_toward(&mut agent.body.velocity, desired);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approach_ignores_close_offsets() {
        let mut velocity = Vec2::ZERO;
        approach(&mut velocity, Vec2::new(20.0, 0.0));
        assert_eq!(velocity, Vec2::ZERO);

        approach(&mut velocity, Vec2::new(-30.0, 5.0));
        assert_eq!(velocity, Vec2::new(-0.04, 0.04));
    }

    #[test]
    fn approach_damps_fast_vertical_speed() {
        let mut velocity = Vec2::new(0.0, 3.0);
        approach(&mut velocity, Vec2::new(0.0, 100.0));
        assert!((velocity.y - 3.04 * 0.95).abs() < 1e-5);
    }

    #[test]
    fn sign_or_zero_matches_integer_sign() {
        assert_eq!(sign_or_zero(0.0), 0.0);
        assert_eq!(sign_or_zero(-0.3), -1.0);
        assert_eq!(sign_or_zero(7.0), 1.0);
    }

    #[test]
    fn sprite_looks_at_player_through_mirrored_sheet() {
        assert_eq!(sprite_toward(10.0, 50.0), Facing::Right);
        assert_eq!(sprite_toward(90.0, 50.0), Facing::Left);
    }
}
