use std::collections::HashSet;
use std::f32::consts::TAU;

use glam::{IVec2, Vec2};

use super::*;
use crate::env::{
    Env, EntityOracle, FlightAdvice, FlightOracle, PcgRng, PlayerOracle, PlayerView, TileView,
    WorldDimensions, WorldOracle,
};
use crate::state::{AgentRecord, Body, EntityKind, PlayerIndex};

const HELPER: EntityKind = EntityKind(700);
const HOME: Vec2 = Vec2::new(8000.0, 8000.0);

#[derive(Default)]
struct Grid {
    solid: HashSet<IVec2>,
}

impl WorldOracle for Grid {
    fn dimensions(&self) -> WorldDimensions {
        WorldDimensions::new(1000, 1000)
    }

    fn tile(&self, tile: IVec2) -> Option<TileView> {
        if !self.contains(tile) {
            return None;
        }
        Some(if self.solid.contains(&tile) {
            TileView::SOLID
        } else {
            TileView::AIR
        })
    }
}

struct Table(Vec<EntityView>);

impl EntityOracle for Table {
    fn entities(&self) -> &[EntityView] {
        &self.0
    }
}

struct Players(Vec<PlayerView>);

impl PlayerOracle for Players {
    fn players(&self) -> &[PlayerView] {
        &self.0
    }
}

struct Calm;

impl FlightOracle for Calm {
    fn bird_flight(&self, _down_scan: i32, _up_range: i32, _origin: IVec2) -> FlightAdvice {
        FlightAdvice::default()
    }

    fn circle_offset(&self, elapsed: f32, rotation: f32, height: f32) -> Vec2 {
        let angle = elapsed * TAU;
        Vec2::from_angle(rotation).rotate(Vec2::new(angle.sin() * height, angle.cos() * height * 0.5))
    }
}

struct World {
    grid: Grid,
    table: Table,
    players: Players,
    registry: TrackableRegistry,
    interaction: InteractionRule,
    config: HelperConfig,
}

impl World {
    fn new(players: Vec<PlayerView>, entities: Vec<EntityView>) -> Self {
        let mut registry = TrackableRegistry::with_defaults();
        registry.refresh_cache(&entities, NetMode::SinglePlayer);
        Self {
            grid: Grid::default(),
            table: Table(entities),
            players: Players(players),
            registry,
            interaction: InteractionRule::new(HELPER),
            config: HelperConfig::with_helper_kind(HELPER),
        }
    }

    fn ctx(&self, net_mode: NetMode, tick: u64) -> TickContext<'_> {
        let env = Env::with_all(&self.grid, &self.table, &self.players, &Calm, &PcgRng);
        TickContext::new(env.as_helper_env(), &self.registry, &self.interaction, &self.config)
            .with_net_mode(net_mode)
            .at_tick(Tick::new(tick))
            .with_world_seed(99)
    }

    fn run(&self, agent: &mut Agent, net_mode: NetMode, ticks: u64) -> Vec<TickOutput> {
        (0..ticks)
            .map(|tick| {
                HelperEngine::new(&mut *agent)
                    .tick(&self.ctx(net_mode, tick))
                    .unwrap()
            })
            .collect()
    }
}

fn helper_at(center: Vec2) -> Agent {
    Agent::new(EntityId(0), HELPER, Body::helper_at(center))
}

fn helper_in(state: AgentState, target: Option<Vec2>) -> Agent {
    let mut agent = helper_at(HOME);
    agent
        .restore(AgentRecord {
            state,
            target_position: target,
            initialized: true,
            ..AgentRecord::default()
        })
        .unwrap();
    agent.target_player = Some(PlayerIndex(0));
    agent
}

fn captive_at(id: u32, center: Vec2) -> EntityView {
    EntityView::new(EntityId(id), EntityKind(50), MovementStyle::FaceClosestPlayer, center - Vec2::new(9.0, 20.0))
}

#[test]
fn waiting_agent_launches_once_around_its_anchor() {
    let world = World::new(vec![], vec![]);
    let mut agent = helper_at(HOME);

    world.run(&mut agent, NetMode::SinglePlayer, 1);

    assert!(agent.initialized());
    assert_eq!(agent.anchor(), Some(HOME));
    let velocity = agent.body.velocity;
    assert!((1.4..=2.8).contains(&velocity.x.abs()), "vx = {}", velocity.x);
    assert!((0.7..=1.4).contains(&velocity.y.abs()), "vy = {}", velocity.y);
    assert!(agent.take_dirty());

    world.run(&mut agent, NetMode::SinglePlayer, 1);
    assert_eq!(agent.body.velocity, velocity);
    assert!(!agent.take_dirty());
}

#[test]
fn waiting_agent_flees_from_a_close_player() {
    let world = World::new(vec![PlayerView::alive_at(HOME - Vec2::new(100.0, 0.0))], vec![]);
    let mut agent = helper_at(HOME);

    let out = world.run(&mut agent, NetMode::SinglePlayer, 1);

    assert_eq!(agent.state(), AgentState::RunAway);
    assert_eq!(agent.general_timer(), 0);
    assert!(agent.body.velocity.x > 0.0);
    assert_eq!(agent.direction, Facing::Right);
    assert_eq!(
        out[0].transition,
        Some(Transition {
            from: AgentState::WaitForPlayer,
            to: AgentState::RunAway,
        })
    );
}

#[test]
fn waiting_agent_ignores_dead_players() {
    let mut corpse = PlayerView::alive_at(HOME + Vec2::new(50.0, 0.0));
    corpse.dead = true;
    let world = World::new(vec![corpse], vec![]);
    let mut agent = helper_at(HOME);

    world.run(&mut agent, NetMode::SinglePlayer, 5);

    assert_eq!(agent.state(), AgentState::WaitForPlayer);
}

#[test]
fn run_away_keeps_accelerating_in_its_direction() {
    let world = World::new(vec![], vec![]);
    let mut agent = helper_in(AgentState::RunAway, None);
    agent.direction = Facing::Right;

    world.run(&mut agent, NetMode::SinglePlayer, 200);

    assert!((agent.body.velocity.x - 4.5).abs() < 0.05);
    assert!(agent.flags.contains(AgentFlags::TILE_COLLIDE));
    assert!(!agent.flags.contains(AgentFlags::LAVA_IMMUNE));
    assert!(!agent.flags.contains(AgentFlags::IMMUNE));
}

#[test]
fn run_away_climbs_when_ground_is_close() {
    let mut world = World::new(vec![], vec![]);
    let feet = crate::state::to_tile(helper_at(HOME).body.bottom());
    world.grid.solid.insert(feet + IVec2::new(3, 2));
    let mut agent = helper_in(AgentState::RunAway, None);
    agent.direction = Facing::Right;

    world.run(&mut agent, NetMode::SinglePlayer, 1);

    assert!((agent.body.velocity.y - (-0.5)).abs() < 1e-5);
}

#[test]
fn capture_without_target_hovers_around_player() {
    let world = World::new(vec![PlayerView::alive_at(HOME)], vec![]);
    let mut agent = helper_in(AgentState::ChasePlayer, None);

    world.run(&mut agent, NetMode::SinglePlayer, 1);

    assert_eq!(agent.state(), AgentState::HoverAroundPlayer);
    assert!(agent.is_dirty());
}

#[test]
fn capture_with_target_catches_attention() {
    let captive = HOME + Vec2::new(100.0, 0.0);
    let world = World::new(vec![PlayerView::alive_at(HOME)], vec![captive_at(1, captive)]);
    let mut agent = helper_in(AgentState::ChasePlayer, None);

    world.run(&mut agent, NetMode::Server, 1);

    assert_eq!(agent.state(), AgentState::CatchAttention);
    assert_eq!(agent.target_position(), Some(captive));
    assert!(agent.flags.contains(AgentFlags::IMMUNE));
}

#[test]
fn clients_never_capture() {
    let world = World::new(vec![PlayerView::alive_at(HOME)], vec![]);
    let mut agent = helper_in(AgentState::ChasePlayer, None);

    world.run(&mut agent, NetMode::Client, 3);

    assert_eq!(agent.state(), AgentState::ChasePlayer);
    assert_eq!(agent.despawn_timer(), 0);
}

#[test]
fn chasing_a_dead_player_runs_away_from_them() {
    let mut corpse = PlayerView::alive_at(HOME + Vec2::new(400.0, 0.0));
    corpse.dead = true;
    let world = World::new(vec![corpse], vec![]);
    let mut agent = helper_in(AgentState::ChasePlayer, None);
    agent.body.velocity = Vec2::new(1.0, 0.0);

    world.run(&mut agent, NetMode::SinglePlayer, 1);

    assert_eq!(agent.state(), AgentState::RunAway);
    assert_eq!(agent.body.velocity.x, -2.0);
    assert_eq!(agent.direction, Facing::Left);
}

#[test]
fn attention_chimes_once_then_leads() {
    let target = HOME + Vec2::new(300.0, 0.0);
    let world = World::new(vec![PlayerView::alive_at(HOME + Vec2::new(0.0, 40.0))], vec![]);
    let mut agent = helper_in(AgentState::CatchAttention, Some(target));

    let outputs = world.run(&mut agent, NetMode::SinglePlayer, 209);
    assert_eq!(agent.state(), AgentState::CatchAttention);
    assert_eq!(outputs.iter().filter(|out| out.chimed()).count(), 1);
    assert!(outputs[15].chimed());

    world.run(&mut agent, NetMode::SinglePlayer, 1);
    assert_eq!(agent.state(), AgentState::LeadToTarget);
    assert_eq!(agent.target_position(), Some(target));
    assert_eq!(agent.general_timer(), 0);
}

#[test]
fn leading_onto_the_target_finds_it() {
    let world = World::new(vec![PlayerView::alive_at(HOME + Vec2::new(50.0, 0.0))], vec![]);
    let mut agent = helper_in(AgentState::LeadToTarget, Some(HOME));

    world.run(&mut agent, NetMode::SinglePlayer, 1);

    assert_eq!(agent.state(), AgentState::FoundTarget);
    assert_eq!(agent.despawn_timer(), 0);
}

#[test]
fn leading_waits_for_a_distant_player() {
    let world = World::new(vec![PlayerView::alive_at(HOME - Vec2::new(500.0, 0.0))], vec![]);
    let mut agent = helper_in(AgentState::LeadToTarget, Some(HOME + Vec2::new(800.0, 0.0)));
    agent.body.velocity = Vec2::new(3.0, 0.0);

    world.run(&mut agent, NetMode::SinglePlayer, 40);

    assert_eq!(agent.state(), AgentState::LeadToTarget);
    assert!(agent.body.velocity.length() <= 1.0 + 1e-5);
    assert_eq!(agent.sprite_direction, Facing::Right);
}

#[test]
fn found_target_completes_locally_in_single_player() {
    let world = World::new(vec![], vec![]);
    let mut agent = helper_in(AgentState::FoundTarget, Some(HOME));

    let outputs = world.run(&mut agent, NetMode::SinglePlayer, 201);

    assert!(!agent.is_active());
    let last = outputs.last().unwrap();
    assert!(last.deactivated);
    assert!(last
        .effects
        .iter()
        .any(|effect| matches!(effect, AgentEffect::CompletionEffect { .. })));
    assert!(outputs[..200].iter().all(|out| !out.deactivated));
}

#[test]
fn found_target_broadcasts_from_the_server() {
    let world = World::new(vec![], vec![]);
    let mut agent = helper_in(AgentState::FoundTarget, Some(HOME));

    let outputs = world.run(&mut agent, NetMode::Server, 201);

    let effects = &outputs.last().unwrap().effects;
    assert!(effects.contains(&AgentEffect::SyncRemoval { id: EntityId(0) }));
    assert!(effects
        .iter()
        .any(|effect| matches!(effect, AgentEffect::Broadcast(_))));
    assert!(!effects
        .iter()
        .any(|effect| matches!(effect, AgentEffect::CompletionEffect { .. })));
}

#[test]
fn clients_never_complete() {
    let world = World::new(vec![], vec![]);
    let mut agent = helper_in(AgentState::FoundTarget, Some(HOME));

    world.run(&mut agent, NetMode::Client, 260);

    assert!(agent.is_active());
}

#[test]
fn despawn_timer_stays_zero_while_found() {
    let world = World::new(vec![], vec![]);
    let mut agent = helper_in(AgentState::FoundTarget, Some(HOME));
    for tick in 0..50 {
        HelperEngine::new(&mut agent)
            .tick(&world.ctx(NetMode::Server, tick))
            .unwrap();
        assert_eq!(agent.despawn_timer(), 0);
    }
}

#[test]
fn despawn_triggers_exactly_at_threshold() {
    let world = World::new(vec![PlayerView::alive_at(HOME - Vec2::new(30.0, 0.0))], vec![]);
    let mut agent = helper_at(HOME);
    agent
        .restore(AgentRecord {
            state: AgentState::HoverAroundPlayer,
            despawn_timer: 17_998,
            initialized: true,
            ..AgentRecord::default()
        })
        .unwrap();
    agent.target_player = Some(PlayerIndex(0));

    let first = world.run(&mut agent, NetMode::SinglePlayer, 1);
    assert!(!first[0].forced_despawn);
    assert_eq!(agent.state(), AgentState::HoverAroundPlayer);

    let second = world.run(&mut agent, NetMode::SinglePlayer, 1);
    assert!(second[0].forced_despawn);
    assert_eq!(agent.state(), AgentState::Despawn);
    assert_eq!(agent.despawn_countdown, Some(HelperConfig::DESPAWN_COUNTDOWN));
}

#[test]
fn chasing_counts_one_tick_at_a_time_then_leaves_away_from_the_player() {
    let player = HOME + Vec2::new(2000.0, 0.0);
    let world = World::new(vec![PlayerView::alive_at(player)], vec![]);
    let mut agent = helper_in(AgentState::ChasePlayer, None);
    let threshold = world.config.despawn_ticks;

    for tick in 1..threshold {
        let out = HelperEngine::new(&mut agent)
            .tick(&world.ctx(NetMode::Server, u64::from(tick)))
            .unwrap();
        assert!(!out.forced_despawn);
        assert_eq!(agent.state(), AgentState::ChasePlayer);
        assert_eq!(agent.despawn_timer(), tick);
    }

    let before = agent.body.velocity.x;
    assert!(before > 0.0);
    let out = HelperEngine::new(&mut agent)
        .tick(&world.ctx(NetMode::Server, u64::from(threshold)))
        .unwrap();
    assert!(out.forced_despawn);
    assert_eq!(agent.state(), AgentState::Despawn);
    // Despawn pushes along the facing chosen when the timer ran out.
    let away = Facing::away_from(player.x, HOME.x);
    assert_eq!(away, Facing::Left);
    assert!((agent.body.velocity.x - (before + 0.05 * away.sign())).abs() < 1e-4);
}

#[test]
fn forced_despawn_with_player_directly_above_faces_right() {
    let world = World::new(vec![PlayerView::alive_at(HOME - Vec2::new(0.0, 30.0))], vec![]);
    let mut agent = helper_at(HOME);
    agent
        .restore(AgentRecord {
            state: AgentState::HoverAroundPlayer,
            despawn_timer: world.config.despawn_ticks - 1,
            initialized: true,
            ..AgentRecord::default()
        })
        .unwrap();
    agent.target_player = Some(PlayerIndex(0));
    agent.body.velocity = Vec2::ZERO;

    let out = world.run(&mut agent, NetMode::SinglePlayer, 1);
    assert!(out[0].forced_despawn);
    assert!((agent.body.velocity.x - 0.05).abs() < 1e-4);
}

#[test]
fn idle_agents_do_not_count_toward_despawn() {
    let world = World::new(vec![], vec![]);
    let mut agent = helper_at(HOME);
    world.run(&mut agent, NetMode::SinglePlayer, 30);
    assert_eq!(agent.despawn_timer(), 0);
}

#[test]
fn despawn_keeps_the_shorter_countdown() {
    let world = World::new(vec![], vec![]);
    let mut agent = helper_in(AgentState::Despawn, None);
    agent.despawn_countdown = Some(4);

    world.run(&mut agent, NetMode::SinglePlayer, 1);

    assert_eq!(agent.despawn_countdown, Some(4));
    assert!(agent.body.velocity.y < 0.0);
}

#[test]
fn hover_chases_a_player_who_walks_away() {
    let world = World::new(vec![PlayerView::alive_at(HOME + Vec2::new(300.0, 0.0))], vec![]);
    let mut agent = helper_in(AgentState::HoverAroundPlayer, None);

    world.run(&mut agent, NetMode::SinglePlayer, 1);

    assert_eq!(agent.state(), AgentState::ChasePlayer);
    assert_eq!(agent.target_player, Some(PlayerIndex(0)));
}

#[test]
fn nearby_fairies_push_the_agent_vertically() {
    let fairy = EntityView::new(EntityId(3), EntityKind::FAIRY_BLUE, MovementStyle::Fairy, Body::helper_at(HOME).position + Vec2::new(4.0, 10.0))
        .with_size(18.0, 20.0);
    let world = World::new(vec![], vec![fairy]);
    let mut agent = helper_in(AgentState::Despawn, None);

    world.run(&mut agent, NetMode::SinglePlayer, 1);

    assert!((agent.body.velocity.y - (-0.025 - 0.05)).abs() < 1e-6);
}

#[test]
fn lock_on_spawn_chases_the_closest_player() {
    let world = World::new(
        vec![
            PlayerView::alive_at(HOME + Vec2::new(900.0, 0.0)),
            PlayerView::alive_at(HOME + Vec2::new(-200.0, 0.0)),
        ],
        vec![],
    );
    let mut agent = helper_at(HOME);

    HelperEngine::new(&mut agent)
        .lock_on_spawn(&world.ctx(NetMode::Server, 0))
        .unwrap();

    assert_eq!(agent.state(), AgentState::ChasePlayer);
    assert_eq!(agent.target_player, Some(PlayerIndex(1)));
    assert_eq!(agent.general_timer(), 3);
    assert!(agent.is_dirty());
}

#[test]
fn inactive_agents_are_skipped() {
    let world = World::new(vec![], vec![]);
    let mut agent = helper_at(HOME);
    agent.body.active = false;

    let out = world.run(&mut agent, NetMode::SinglePlayer, 1);

    assert!(out[0].effects.is_empty());
    assert!(!agent.initialized());
}

#[test]
fn missing_oracles_are_reported() {
    let registry = TrackableRegistry::new();
    let interaction = InteractionRule::new(HELPER);
    let config = HelperConfig::default();
    let ctx = TickContext::new(HelperEnv::empty(), &registry, &interaction, &config);
    let mut agent = helper_at(HOME);

    let err = HelperEngine::new(&mut agent).tick(&ctx).unwrap_err();

    assert_eq!(err, TickError::Oracle(crate::env::OracleError::RngNotAvailable));
}
