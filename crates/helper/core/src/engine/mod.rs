//! Per-tick agent controller.
//!
//! [`HelperEngine`] runs one tick of the state machine for one agent. The tick
//! follows a fixed order:
//!
//! 1. authoritative despawn timer (may force [`AgentState::Despawn`])
//! 2. the current state's behavior, which may transition
//! 3. damage immunity from the resulting state
//! 4. flutter drift against nearby fairy-like creatures
//! 5. facing from the horizontal velocity, unless the state steered the sprite
//! 6. ambient glow and sparkle effects
//!
//! The engine never talks to the host directly: requests such as sounds,
//! removal sync or the completion burst come back in [`TickOutput`].

mod effect;
mod error;
mod states;
mod steer;

pub use effect::{AgentEffect, TickOutput, Transition};
pub use error::TickError;

use glam::Vec2;

use crate::config::HelperConfig;
use crate::env::{EntityView, HelperEnv, MovementStyle, RngOracle, RollContext, compute_seed};
use crate::interaction::InteractionRule;
use crate::net::NetMode;
use crate::registry::TrackableRegistry;
use crate::search;
use crate::state::{Agent, AgentFlags, AgentState, EntityId, Facing, Tick};

use steer::Steering;

/// Stuck-timer head start given to agents locked onto a player at spawn.
const SPAWN_LOCK_TIMER: u32 = 3;

/// Shared, read-only inputs for every agent ticked in the same host tick.
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    pub env: HelperEnv<'a>,
    pub registry: &'a TrackableRegistry,
    pub interaction: &'a InteractionRule,
    pub config: &'a HelperConfig,
    pub net_mode: NetMode,
    pub tick: Tick,
    pub world_seed: u64,
}

impl<'a> TickContext<'a> {
    pub fn new(
        env: HelperEnv<'a>,
        registry: &'a TrackableRegistry,
        interaction: &'a InteractionRule,
        config: &'a HelperConfig,
    ) -> Self {
        Self {
            env,
            registry,
            interaction,
            config,
            net_mode: NetMode::SinglePlayer,
            tick: Tick::ZERO,
            world_seed: 0,
        }
    }

    #[must_use]
    pub fn with_net_mode(mut self, net_mode: NetMode) -> Self {
        self.net_mode = net_mode;
        self
    }

    #[must_use]
    pub fn at_tick(mut self, tick: Tick) -> Self {
        self.tick = tick;
        self
    }

    #[must_use]
    pub fn with_world_seed(mut self, world_seed: u64) -> Self {
        self.world_seed = world_seed;
        self
    }

    pub(crate) fn seed_for(&self, entity: EntityId, context: RollContext) -> u64 {
        compute_seed(self.world_seed, self.tick.0, entity.0, context)
    }

    /// Authoritative target search from the agent's current position.
    pub(crate) fn find_target(&self, agent: &Agent) -> Result<Option<Vec2>, TickError> {
        if !self.net_mode.is_authoritative() {
            return Ok(None);
        }
        Ok(search::find_nearest_target(
            agent,
            self.registry,
            self.env.entities()?,
            self.env.world()?,
            self.config,
        ))
    }
}

/// Drives one agent through its state machine.
pub struct HelperEngine<'a> {
    agent: &'a mut Agent,
}

impl<'a> HelperEngine<'a> {
    pub fn new(agent: &'a mut Agent) -> Self {
        Self { agent }
    }

    /// Skips the waiting phase for a freshly spawned agent: it immediately
    /// chases the closest player.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::Oracle`] when no player oracle is available.
    pub fn lock_on_spawn(&mut self, ctx: &TickContext<'_>) -> Result<(), TickError> {
        let players = ctx.env.players()?;
        self.agent.enter(AgentState::ChasePlayer);
        steer::retarget(self.agent, players);
        self.agent.set_general_timer(SPAWN_LOCK_TIMER);
        Ok(())
    }

    /// Runs one tick. Inactive agents are left untouched.
    ///
    /// # Errors
    ///
    /// Fails when a collaborator the current state needs is missing from the
    /// context, or when the agent's record violates the target invariant.
    pub fn tick(&mut self, ctx: &TickContext<'_>) -> Result<TickOutput, TickError> {
        let mut out = TickOutput::default();
        if !self.agent.is_active() {
            return Ok(out);
        }

        let from = self.agent.state();
        self.agent.flags.insert(AgentFlags::LAVA_IMMUNE);
        out.forced_despawn = self.advance_despawn_timer(ctx)?;

        let agent = &mut *self.agent;
        let steering = match agent.state() {
            AgentState::WaitForPlayer => states::wait::tick(agent, ctx)?,
            AgentState::RunAway => states::run_away::tick(agent, ctx)?,
            AgentState::ChasePlayer => states::chase::tick(agent, ctx)?,
            AgentState::CatchAttention => states::attention::tick(agent, ctx, &mut out)?,
            AgentState::LeadToTarget => states::lead::tick(agent, ctx, &mut out)?,
            AgentState::FoundTarget => states::found::tick(agent, ctx, &mut out)?,
            AgentState::HoverAroundPlayer => states::hover::tick(agent, ctx)?,
            AgentState::Despawn => states::despawn::tick(agent)?,
        };

        let helpful = self.agent.is_helpful();
        self.agent.flags.set(AgentFlags::IMMUNE, helpful);
        self.apply_flutter(ctx)?;

        if steering == Steering::Automatic {
            self.agent.direction = Facing::from_bool(self.agent.body.velocity.x >= 0.0);
            self.agent.sprite_direction = self.agent.direction.flipped();
        }

        self.emit_ambient(ctx, &mut out)?;

        let to = self.agent.state();
        if from != to {
            out.transition = Some(Transition { from, to });
        }
        Ok(out)
    }

    /// Counts engaged ticks and forces Despawn at the configured threshold.
    fn advance_despawn_timer(&mut self, ctx: &TickContext<'_>) -> Result<bool, TickError> {
        let agent = &mut *self.agent;
        if !ctx.net_mode.is_authoritative() || !agent.is_helpful() {
            return Ok(false);
        }
        if agent.advance_despawn_timer() < ctx.config.despawn_ticks
            || agent.state() == AgentState::Despawn
        {
            return Ok(false);
        }

        let players = ctx.env.players()?;
        if let Some(player) = steer::tracked_player(agent, players) {
            agent.direction = Facing::away_from(player.center.x, agent.center().x);
        }
        agent.enter(AgentState::Despawn);
        Ok(true)
    }

    fn apply_flutter(&mut self, ctx: &TickContext<'_>) -> Result<(), TickError> {
        let own = entity_view(self.agent);
        let drift = ctx
            .interaction
            .total_drift(&own, ctx.env.entities()?.entities());
        self.agent.body.velocity.y += drift;
        Ok(())
    }

    fn emit_ambient(&self, ctx: &TickContext<'_>, out: &mut TickOutput) -> Result<(), TickError> {
        let position = self.agent.center();
        out.push(AgentEffect::Glow { position })?;
        if ctx.tick.0 % 2 == 0 {
            let tint = ctx
                .env
                .rng()?
                .next_f32(ctx.seed_for(self.agent.id, RollContext::Sparkle));
            out.push(AgentEffect::Sparkle {
                position,
                velocity: self.agent.body.velocity * 0.3,
                tint,
            })?;
        }
        Ok(())
    }
}

/// How other creatures see the agent for pairwise rules.
pub fn entity_view(agent: &Agent) -> EntityView {
    EntityView {
        id: agent.id,
        kind: agent.kind,
        movement: MovementStyle::Fairy,
        discriminator: 0.0,
        active: agent.is_active(),
        position: agent.body.position,
        width: agent.body.width,
        height: agent.body.height,
    }
}

#[cfg(test)]
mod tests;
