//! Headless simulation driver.
//!
//! [`Simulation`] plays the host's part around the helper core. Each
//! [`Simulation::step`] runs one host tick:
//!
//! 1. scripted players move, die or leave
//! 2. the entity snapshot is rebuilt and the trackable cache refreshed
//! 3. every active agent is ticked by [`HelperEngine`]
//! 4. engine output becomes [`SimEvent`]s and sync packets
//! 5. bodies are integrated and idle-despawn countdowns advance
//!
//! The driver never decides behavior; it only carries out what the engine
//! asked for.
mod physics;

use glam::Vec2;
use helper_content::TrackingList;
use helper_core::engine::entity_view;
use helper_core::env::{RollContext, compute_seed};
use helper_core::hooks::{self, keeps_alive};
use helper_core::net::wire;
use helper_core::registry::calls::{CallArg, CallMessage, handle_call};
use helper_core::{
    Agent, AgentEffect, AgentFlags, AgentState, Body, EntityId, EntityKind, EntityOracle,
    EntityView, HelperEngine, InteractionRule, NetMode, PcgRng, PlayerIndex, PlayerOracle,
    PlayerView, RngOracle, SpawnInfo, Tick, TickContext, TickOutput, TrackableRegistry,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::events::SimEvent;
use crate::hooks::HookRegistry;
use crate::oracle::{EntityTable, OracleSet, PlayerScript, PlayerTable, TileWorld};

/// One host world with helper agents, creatures and scripted players.
pub struct Simulation {
    config: RuntimeConfig,
    world: TileWorld,
    creatures: Vec<EntityView>,
    players: PlayerTable,
    agents: Vec<Agent>,
    registry: TrackableRegistry,
    interaction: InteractionRule,
    hooks: HookRegistry,
    rng: PcgRng,
    tick: Tick,
    next_id: u32,
    events: Vec<SimEvent>,
}

impl Simulation {
    pub fn new(config: RuntimeConfig, world: TileWorld) -> Self {
        let interaction = InteractionRule::new(config.helper.helper_kind);
        Self {
            config,
            world,
            creatures: Vec::new(),
            players: PlayerTable::new(),
            agents: Vec::new(),
            registry: TrackableRegistry::with_defaults(),
            interaction,
            hooks: HookRegistry::default_hooks(),
            rng: PcgRng,
            tick: Tick::ZERO,
            next_id: 0,
            events: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: HookRegistry) -> Self {
        self.hooks = hooks;
        self
    }

    // ===== setup =====

    /// Registers every kind listed in a content tracking file.
    pub fn apply_tracking(&mut self, tracking: &TrackingList) {
        tracking.apply(&mut self.registry);
        debug!(
            target: "runtime::sim",
            conditions = self.registry.condition_count(),
            blacklist = self.registry.blacklist_count(),
            "Tracking list applied"
        );
    }

    /// Handles an external registration call.
    ///
    /// # Errors
    ///
    /// Rejected calls leave the registry untouched and are returned as
    /// [`RuntimeError::Registration`].
    pub fn call(&mut self, message: &str, args: Vec<CallArg>) -> Result<CallMessage> {
        handle_call(&mut self.registry, message, args).map_err(|error| {
            warn!(target: "runtime::sim", message, %error, "Registration call rejected");
            RuntimeError::from(error)
        })
    }

    /// Lets the pairwise flutter rule recognize another creature kind.
    pub fn register_interaction_kind(&mut self, kind: EntityKind) {
        self.interaction.register(kind);
    }

    pub fn add_player(&mut self, player: PlayerView, script: PlayerScript) -> PlayerIndex {
        let index = PlayerIndex(self.players.players().len() as u16);
        self.players.join(player, script);
        index
    }

    /// Adds a non-helper creature; its id is replaced with a fresh one.
    pub fn add_creature(&mut self, creature: EntityView) -> EntityId {
        let id = self.allocate_id();
        self.creatures.push(EntityView { id, ..creature });
        id
    }

    /// Removes a creature from the world, e.g. once it has been rescued.
    pub fn remove_creature(&mut self, id: EntityId) -> bool {
        let before = self.creatures.len();
        self.creatures.retain(|creature| creature.id != id);
        self.creatures.len() != before
    }

    /// Spawns a waiting helper centered on `center`.
    pub fn spawn_helper(&mut self, center: Vec2) -> EntityId {
        let id = self.allocate_id();
        let agent = Agent::new(id, self.config.helper.helper_kind, Body::helper_at(center));
        let state = agent.state();
        self.agents.push(agent);

        info!(target: "runtime::sim", tick = self.tick.0, %id, ?center, "Helper spawned");
        self.events.push(SimEvent::Spawned {
            tick: self.tick.0,
            id,
            state,
        });
        id
    }

    /// Spawns a helper that skips waiting and chases the closest player.
    pub fn spawn_locked_helper(&mut self, center: Vec2) -> Result<EntityId> {
        let id = self.spawn_helper(center);
        let table = self.snapshot();
        let oracles = OracleSet {
            world: &self.world,
            entities: &table,
            players: &self.players,
            rng: &self.rng,
        };
        let ctx = TickContext::new(
            oracles.as_helper_env(),
            &self.registry,
            &self.interaction,
            &self.config.helper,
        )
        .with_net_mode(self.config.net_mode)
        .at_tick(self.tick)
        .with_world_seed(self.config.world_seed);

        let agent = self
            .agents
            .iter_mut()
            .find(|agent| agent.id == id)
            .ok_or(RuntimeError::UnknownAgent(id))?;
        HelperEngine::new(agent)
            .lock_on_spawn(&ctx)
            .map_err(|source| RuntimeError::Tick { id, source })?;
        Ok(id)
    }

    /// Rolls the host's spawn check for a helper at `center`.
    ///
    /// Returns the new agent's id when the roll succeeds.
    pub fn try_spawn(&mut self, info: &SpawnInfo, center: Vec2) -> Option<EntityId> {
        let chance = self.hooks.spawn_chance(info, &self.agents, &self.config.helper);
        let seed = compute_seed(
            self.config.world_seed,
            self.tick.0,
            self.next_id,
            RollContext::SpawnRoll,
        );
        let roll = self.rng.next_f32(seed);
        debug!(target: "runtime::sim", chance, roll, "Spawn roll");
        (roll < chance).then(|| self.spawn_helper(center))
    }

    // ===== stepping =====

    /// Runs one host tick and returns the events it produced.
    ///
    /// # Errors
    ///
    /// Stops at the first agent whose tick fails; agents ticked before it
    /// keep their new state.
    pub fn step(&mut self) -> Result<Vec<SimEvent>> {
        let tick = self.tick;
        self.players.advance(tick);

        let table = self.snapshot();
        self.registry.refresh_cache(table.entities(), self.config.net_mode);
        debug!(
            target: "runtime::sim",
            tick = tick.0,
            candidates = self.registry.cached_indices().len(),
            "Trackable cache refreshed"
        );

        let oracles = OracleSet {
            world: &self.world,
            entities: &table,
            players: &self.players,
            rng: &self.rng,
        };
        let ctx = TickContext::new(
            oracles.as_helper_env(),
            &self.registry,
            &self.interaction,
            &self.config.helper,
        )
        .with_net_mode(self.config.net_mode)
        .at_tick(tick)
        .with_world_seed(self.config.world_seed);

        let mut events = Vec::new();
        for agent in self.agents.iter_mut().filter(|agent| agent.is_active()) {
            let id = agent.id;
            let output = HelperEngine::new(&mut *agent)
                .tick(&ctx)
                .map_err(|source| RuntimeError::Tick { id, source })?;
            record_output(tick, agent, &output, &mut events)?;
            sync_if_dirty(tick, agent, self.config.net_mode, &mut events)?;

            if agent.is_active() {
                let collide = agent.flags.contains(AgentFlags::TILE_COLLIDE);
                physics::integrate(&mut agent.body, collide, &self.world);
                host_despawn(tick, agent, &self.world, self.config.is_day, &mut events);
            }
        }

        self.tick = tick.next();
        self.events.extend(events.iter().cloned());
        Ok(events)
    }

    /// Runs `ticks` host ticks.
    pub fn run(&mut self, ticks: u64) -> Result<()> {
        for _ in 0..ticks {
            self.step()?;
        }
        Ok(())
    }

    /// Runs until `done` holds or `max_ticks` have passed; returns whether
    /// `done` was reached.
    pub fn run_until<F>(&mut self, max_ticks: u64, mut done: F) -> Result<bool>
    where
        F: FnMut(&Simulation) -> bool,
    {
        for _ in 0..max_ticks {
            if done(self) {
                return Ok(true);
            }
            self.step()?;
        }
        Ok(done(self))
    }

    // ===== queries =====

    pub fn tick(&self) -> Tick {
        self.tick
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn agent(&self, id: EntityId) -> Option<&Agent> {
        self.agents.iter().find(|agent| agent.id == id)
    }

    pub fn agent_mut(&mut self, id: EntityId) -> Option<&mut Agent> {
        self.agents.iter_mut().find(|agent| agent.id == id)
    }

    pub fn creatures(&self) -> &[EntityView] {
        &self.creatures
    }

    pub fn players(&self) -> &[PlayerView] {
        self.players.players()
    }

    pub fn player_mut(&mut self, index: PlayerIndex) -> Option<&mut PlayerView> {
        self.players.player_mut(index.index())
    }

    pub fn registry(&self) -> &TrackableRegistry {
        &self.registry
    }

    pub fn interaction(&self) -> &InteractionRule {
        &self.interaction
    }

    pub fn hooks(&self) -> &HookRegistry {
        &self.hooks
    }

    /// Every event since the simulation was created.
    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn any_helpful(&self) -> bool {
        self.hooks.any_helpful(&self.agents)
    }

    /// Whether the player at `index` gets the reduced spawn rate.
    pub fn is_near_helper(&self, index: PlayerIndex) -> bool {
        self.players
            .player(index)
            .is_some_and(|player| self.hooks.is_near_helper(player, &self.agents, &self.config.helper))
    }

    /// Whether a net swung at agent `id` would catch it.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::UnknownAgent`] for ids this simulation never spawned.
    pub fn can_be_caught(&self, id: EntityId) -> Result<bool> {
        self.agent(id)
            .map(hooks::can_be_caught)
            .ok_or(RuntimeError::UnknownAgent(id))
    }

    /// Whether a projectile touching agent `id` would hit it.
    pub fn can_be_hit_by_projectile(&self, id: EntityId) -> Result<bool> {
        self.agent(id)
            .map(hooks::can_be_hit_by_projectile)
            .ok_or(RuntimeError::UnknownAgent(id))
    }

    pub fn summary(&self) -> SimSummary {
        SimSummary {
            ticks: self.tick.0,
            net_mode: self.config.net_mode,
            agents: self.agents.iter().map(AgentSummary::from).collect(),
            events: self.events.len(),
            completions: self
                .events
                .iter()
                .filter(|event| matches!(event, SimEvent::Completed { .. } | SimEvent::EffectBroadcast { .. }))
                .count(),
        }
    }

    // ===== internals =====

    fn allocate_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Creatures plus the agents themselves, as other creatures see them.
    fn snapshot(&self) -> EntityTable {
        let creatures = self.creatures.iter().copied().filter(|creature| creature.active);
        let agents = self
            .agents
            .iter()
            .filter(|agent| agent.is_active())
            .map(entity_view);
        EntityTable::new(creatures.chain(agents).collect())
    }
}

/// Turns one agent's tick output into events.
fn record_output(
    tick: Tick,
    agent: &Agent,
    output: &TickOutput,
    events: &mut Vec<SimEvent>,
) -> Result<()> {
    let id = agent.id;
    let tick_no = tick.0;

    if output.forced_despawn {
        info!(target: "runtime::sim", tick = tick_no, %id, "Despawn timer expired");
        events.push(SimEvent::ForcedDespawn { tick: tick_no, id });
    }

    if let Some(transition) = output.transition {
        info!(
            target: "runtime::sim",
            tick = tick_no,
            %id,
            from = %transition.from,
            to = %transition.to,
            "State transition"
        );
        events.push(SimEvent::Transition {
            tick: tick_no,
            id,
            from: transition.from,
            to: transition.to,
        });
    }

    for effect in &output.effects {
        match *effect {
            AgentEffect::Chime { position } => events.push(SimEvent::Chime {
                tick: tick_no,
                id,
                position,
            }),
            AgentEffect::CompletionEffect { position } => {
                info!(target: "runtime::sim", tick = tick_no, %id, ?position, "Helper completed");
                events.push(SimEvent::Completed {
                    tick: tick_no,
                    id,
                    position,
                });
            }
            AgentEffect::SyncRemoval { id: removed } => {
                events.push(SimEvent::RemovalSynced {
                    tick: tick_no,
                    id: removed,
                });
            }
            AgentEffect::Broadcast(message) => {
                info!(target: "runtime::sim", tick = tick_no, %id, position = ?message.position, "Helper completed, broadcasting");
                events.push(SimEvent::EffectBroadcast {
                    tick: tick_no,
                    id,
                    packet: wire::encode_terminal_effect(&message)?,
                });
            }
            AgentEffect::Glow { .. } | AgentEffect::Sparkle { .. } => {}
        }
    }
    Ok(())
}

/// Sends the agent's synced state when it changed and this side is the server.
fn sync_if_dirty(
    tick: Tick,
    agent: &mut Agent,
    net_mode: NetMode,
    events: &mut Vec<SimEvent>,
) -> Result<()> {
    if !agent.take_dirty() || net_mode != NetMode::Server || !agent.is_active() {
        return Ok(());
    }
    events.push(SimEvent::StateSynced {
        tick: tick.0,
        id: agent.id,
        packet: wire::encode_agent_state(agent)?,
    });
    Ok(())
}

/// The host's own removal rules: requested countdowns and leaving the world.
fn host_despawn(
    tick: Tick,
    agent: &mut Agent,
    world: &TileWorld,
    is_day: bool,
    events: &mut Vec<SimEvent>,
) {
    let countdown = agent.despawn_countdown;
    let expired = match countdown {
        Some(_) if keeps_alive(agent, is_day) => {
            agent.despawn_countdown = None;
            false
        }
        Some(0) => true,
        Some(left) => {
            agent.despawn_countdown = Some(left - 1);
            false
        }
        None => false,
    };

    if expired || physics::out_of_world(&agent.body, world) {
        agent.body.active = false;
        info!(target: "runtime::sim", tick = tick.0, id = %agent.id, "Helper despawned");
        events.push(SimEvent::Despawned {
            tick: tick.0,
            id: agent.id,
        });
    }
}

/// Serializable end-of-run overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimSummary {
    pub ticks: u64,
    pub net_mode: NetMode,
    pub agents: Vec<AgentSummary>,
    pub events: usize,
    pub completions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentSummary {
    pub id: EntityId,
    pub state: AgentState,
    pub active: bool,
    pub center: Vec2,
    pub target_position: Option<Vec2>,
    pub despawn_timer: u32,
}

impl From<&Agent> for AgentSummary {
    fn from(agent: &Agent) -> Self {
        Self {
            id: agent.id,
            state: agent.state(),
            active: agent.is_active(),
            center: agent.center(),
            target_position: agent.target_position(),
            despawn_timer: agent.despawn_timer(),
        }
    }
}
