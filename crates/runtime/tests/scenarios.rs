//! End-to-end helper behavior driven through the headless simulation.

use glam::Vec2;
use helper_core::engine::entity_view;
use helper_core::net::wire;
use helper_core::registry::calls::CallArg;
use helper_core::{
    Agent, AgentRecord, AgentState, Body, EntityId, EntityKind, EntityView, Facing, HelperConfig,
    MovementStyle, NetMode, PlayerIndex, PlayerView, SpawnInfo,
};
use runtime::{PlayerScript, RuntimeConfig, RuntimeError, SimEvent, Simulation, TileWorld};

const HOME: Vec2 = Vec2::new(3200.0, 3000.0);

fn sim(net_mode: NetMode) -> Simulation {
    let config = RuntimeConfig {
        net_mode,
        world_seed: 7,
        ..RuntimeConfig::default()
    };
    let mut world = TileWorld::open(400, 300);
    world.fill(0, 200, 400, 1, helper_core::TileView::SOLID);
    Simulation::new(config, world)
}

fn merchant_at(center: Vec2) -> EntityView {
    EntityView::new(
        EntityId::default(),
        EntityKind::SKELETON_MERCHANT,
        MovementStyle::FaceClosestPlayer,
        center - Vec2::new(9.0, 20.0),
    )
}

fn restore(sim: &mut Simulation, id: EntityId, state: AgentState, target: Option<Vec2>) {
    let agent = sim.agent_mut(id).unwrap();
    agent
        .restore(AgentRecord {
            state,
            target_position: target,
            initialized: true,
            ..AgentRecord::default()
        })
        .unwrap();
    agent.target_player = Some(PlayerIndex(0));
}

fn count<F>(sim: &Simulation, predicate: F) -> usize
where
    F: Fn(&SimEvent) -> bool,
{
    sim.events().iter().filter(|event| predicate(event)).count()
}

#[test]
fn lonely_helper_keeps_waiting_near_its_anchor() {
    let mut sim = sim(NetMode::SinglePlayer);
    let id = sim.spawn_helper(HOME);

    sim.step().unwrap();
    let agent = sim.agent(id).unwrap();
    assert!(agent.initialized());
    assert_eq!(agent.anchor(), Some(HOME));
    let launch = agent.body.velocity;
    assert!((1.4..=2.8).contains(&launch.x.abs()));
    assert!((0.7..=1.4).contains(&launch.y.abs()));

    sim.run(99).unwrap();
    let agent = sim.agent(id).unwrap();
    assert_eq!(agent.state(), AgentState::WaitForPlayer);
    assert!(agent.is_active());
    assert!(agent.body.velocity.x.abs() < 4.0);
    assert!(agent.center().distance(HOME) < 400.0);
    assert_eq!(agent.despawn_timer(), 0);
}

#[test]
fn approaching_player_scares_the_helper_away() {
    let mut sim = sim(NetMode::SinglePlayer);
    let id = sim.spawn_helper(HOME);
    sim.add_player(
        PlayerView::alive_at(HOME - Vec2::new(600.0, 0.0)),
        PlayerScript {
            velocity: Vec2::new(3.0, 0.0),
            ..PlayerScript::default()
        },
    );

    let fled = sim
        .run_until(300, |sim| sim.agent(id).unwrap().state() == AgentState::RunAway)
        .unwrap();
    assert!(fled);

    let agent = sim.agent(id).unwrap();
    assert_eq!(agent.general_timer(), 0);
    assert_eq!(agent.direction, Facing::Right);
    assert!(sim.players()[0].center.distance(agent.center()) <= 260.0);
    assert_eq!(
        count(&sim, |event| matches!(
            event,
            SimEvent::Transition {
                from: AgentState::WaitForPlayer,
                to: AgentState::RunAway,
                ..
            }
        )),
        1
    );
}

#[test]
fn capture_finds_the_nearby_merchant() {
    let mut sim = sim(NetMode::Server);
    sim.add_player(PlayerView::alive_at(HOME), PlayerScript::default());
    let merchant = HOME + Vec2::new(160.0, 40.0);
    sim.add_creature(merchant_at(merchant));
    let id = sim.spawn_locked_helper(HOME).unwrap();
    assert_eq!(sim.agent(id).unwrap().state(), AgentState::ChasePlayer);

    let events = sim.step().unwrap();

    let agent = sim.agent(id).unwrap();
    assert_eq!(agent.state(), AgentState::CatchAttention);
    assert_eq!(agent.target_position(), Some(merchant));
    assert!(events.iter().any(|event| matches!(
        event,
        SimEvent::Transition {
            from: AgentState::ChasePlayer,
            to: AgentState::CatchAttention,
            ..
        }
    )));

    let packet = events
        .iter()
        .find_map(|event| match event {
            SimEvent::StateSynced { packet, .. } => Some(packet.clone()),
            _ => None,
        })
        .unwrap();
    let mut mirror = Agent::new(id, EntityKind(700), Body::helper_at(HOME));
    assert_eq!(wire::apply_agent_state(&mut mirror, &packet), Ok(id));
    assert_eq!(mirror.state(), AgentState::CatchAttention);
    assert_eq!(mirror.target_position(), Some(merchant));
}

#[test]
fn attention_hands_over_to_leading_after_210_ticks() {
    let mut sim = sim(NetMode::SinglePlayer);
    sim.add_player(PlayerView::alive_at(HOME), PlayerScript::default());
    let merchant = HOME + Vec2::new(160.0, 40.0);
    sim.add_creature(merchant_at(merchant));
    let id = sim.spawn_locked_helper(HOME).unwrap();
    sim.step().unwrap();
    assert_eq!(sim.agent(id).unwrap().state(), AgentState::CatchAttention);

    sim.run(209).unwrap();
    assert_eq!(sim.agent(id).unwrap().state(), AgentState::CatchAttention);
    assert_eq!(count(&sim, |event| matches!(event, SimEvent::Chime { .. })), 1);

    sim.step().unwrap();
    let agent = sim.agent(id).unwrap();
    assert_eq!(agent.state(), AgentState::LeadToTarget);
    assert_eq!(agent.general_timer(), 0);
    assert_eq!(agent.target_player, Some(PlayerIndex(0)));
    assert_eq!(agent.target_position(), Some(merchant));
}

#[test]
fn single_player_completion_is_local_and_happens_once() {
    let mut sim = sim(NetMode::SinglePlayer);
    let id = sim.spawn_helper(HOME);
    restore(&mut sim, id, AgentState::FoundTarget, Some(HOME));

    sim.run(200).unwrap();
    assert!(sim.agent(id).unwrap().is_active());

    sim.step().unwrap();
    assert!(!sim.agent(id).unwrap().is_active());

    sim.run(50).unwrap();
    assert_eq!(count(&sim, |event| matches!(event, SimEvent::Completed { .. })), 1);
    assert_eq!(
        count(&sim, |event| matches!(
            event,
            SimEvent::EffectBroadcast { .. } | SimEvent::RemovalSynced { .. } | SimEvent::StateSynced { .. }
        )),
        0
    );
    assert_eq!(sim.summary().completions, 1);
}

#[test]
fn server_completion_syncs_removal_and_broadcasts_position() {
    let mut sim = sim(NetMode::Server);
    let id = sim.spawn_helper(HOME);
    restore(&mut sim, id, AgentState::FoundTarget, Some(HOME));

    sim.run(201).unwrap();

    let agent = sim.agent(id).unwrap();
    assert!(!agent.is_active());
    assert_eq!(count(&sim, |event| matches!(event, SimEvent::Completed { .. })), 0);
    assert_eq!(
        count(&sim, |event| matches!(event, SimEvent::RemovalSynced { id: removed, .. } if *removed == id)),
        1
    );

    let packet = sim
        .events()
        .iter()
        .find_map(|event| match event {
            SimEvent::EffectBroadcast { packet, .. } => Some(packet.clone()),
            _ => None,
        })
        .unwrap();
    let message = wire::decode_terminal_effect(&packet).unwrap();
    assert_eq!(message.position, agent.center().floor());
}

#[test]
fn clients_mirror_but_never_complete() {
    let mut sim = sim(NetMode::Client);
    let id = sim.spawn_helper(HOME);
    restore(&mut sim, id, AgentState::FoundTarget, Some(HOME));

    sim.run(260).unwrap();

    assert!(sim.agent(id).unwrap().is_active());
    assert_eq!(sim.summary().completions, 0);
}

#[test]
fn nearby_helpers_interact_both_ways() {
    let mut sim = sim(NetMode::SinglePlayer);
    let a = sim.spawn_helper(HOME);
    let b = sim.spawn_helper(HOME + Vec2::new(10.0, 12.0));
    let far = sim.spawn_helper(HOME + Vec2::new(20.0, 8.0));

    let view = |id| entity_view(sim.agent(id).unwrap());
    let rule = sim.interaction();
    assert!(rule.can_interact(&view(a), &view(b)));
    assert!(rule.can_interact(&view(b), &view(a)));
    assert!(!rule.can_interact(&view(a), &view(far)));
}

#[test]
fn despawn_limit_sends_the_helper_away_and_the_host_removes_it() {
    let mut sim = sim(NetMode::SinglePlayer);
    sim.add_player(PlayerView::alive_at(HOME - Vec2::new(30.0, 0.0)), PlayerScript::default());
    let id = sim.spawn_helper(HOME);
    {
        let agent = sim.agent_mut(id).unwrap();
        agent
            .restore(AgentRecord {
                state: AgentState::HoverAroundPlayer,
                despawn_timer: 17_998,
                initialized: true,
                ..AgentRecord::default()
            })
            .unwrap();
        agent.target_player = Some(PlayerIndex(0));
    }

    sim.step().unwrap();
    assert_eq!(count(&sim, |event| matches!(event, SimEvent::ForcedDespawn { .. })), 0);

    sim.step().unwrap();
    assert_eq!(sim.agent(id).unwrap().state(), AgentState::Despawn);
    assert_eq!(count(&sim, |event| matches!(event, SimEvent::ForcedDespawn { .. })), 1);

    let removed = sim
        .run_until(HelperConfig::DESPAWN_COUNTDOWN as u64 + 5, |sim| !sim.agent(id).unwrap().is_active())
        .unwrap();
    assert!(removed);
    assert_eq!(count(&sim, |event| matches!(event, SimEvent::Despawned { .. })), 1);
}

#[test]
fn waiting_helpers_survive_the_idle_countdown_at_night() {
    let night = RuntimeConfig {
        is_day: false,
        ..RuntimeConfig::default()
    };
    let mut sim = Simulation::new(night, TileWorld::open(400, 300));
    let id = sim.spawn_helper(HOME);
    sim.agent_mut(id).unwrap().despawn_countdown = Some(3);
    sim.run(10).unwrap();
    assert!(sim.agent(id).unwrap().is_active());
    assert_eq!(sim.agent(id).unwrap().despawn_countdown, None);

    let mut sim = Simulation::new(RuntimeConfig::default(), TileWorld::open(400, 300));
    let id = sim.spawn_helper(HOME);
    sim.agent_mut(id).unwrap().despawn_countdown = Some(3);
    sim.run(10).unwrap();
    assert!(!sim.agent(id).unwrap().is_active());
}

#[test]
fn registration_calls_extend_tracking_or_fail_cleanly() {
    let mut sim = sim(NetMode::SinglePlayer);
    sim.call("AddTrackingCondition", vec![CallArg::Int(321)]).unwrap();
    assert_eq!(sim.registry().condition_count(), 6);

    let err = sim
        .call("AddBlacklist", vec![CallArg::Int(1), CallArg::Int(2)])
        .unwrap_err();
    assert!(matches!(err, RuntimeError::Registration(_)));
    assert_eq!(sim.registry().blacklist_count(), 0);
}

#[test]
fn spawning_is_exclusive_while_a_helper_is_helpful() {
    let config = RuntimeConfig {
        helper: HelperConfig {
            base_spawn_chance: 1.0,
            ..HelperConfig::default()
        },
        ..RuntimeConfig::default()
    };
    let mut sim = Simulation::new(config, TileWorld::open(400, 300));
    let info = SpawnInfo {
        spawn_tile_y: 150,
        world_surface: 60.0,
        rock_layer: 120.0,
        underworld_layer: 250,
        fairy_log: true,
        tenth_anniversary: false,
        luck_roll: 1,
    };

    let first = sim.try_spawn(&info, HOME).unwrap();
    assert!(!sim.any_helpful());
    assert!(sim.try_spawn(&info, HOME).is_some());

    restore(&mut sim, first, AgentState::HoverAroundPlayer, None);
    assert!(sim.any_helpful());
    assert!(sim.try_spawn(&info, HOME).is_none());
    assert!(sim.try_spawn(&SpawnInfo { fairy_log: false, ..info }, HOME).is_none());
}

#[test]
fn only_idle_helpers_can_be_caught_or_shot() {
    let mut sim = sim(NetMode::SinglePlayer);
    let idle = sim.spawn_helper(HOME);
    let busy = sim.spawn_helper(HOME + Vec2::new(400.0, 0.0));
    restore(&mut sim, busy, AgentState::LeadToTarget, Some(HOME));

    assert_eq!(sim.can_be_caught(idle).ok(), Some(true));
    assert_eq!(sim.can_be_hit_by_projectile(idle).ok(), Some(true));
    assert_eq!(sim.can_be_caught(busy).ok(), Some(false));
    assert_eq!(sim.can_be_hit_by_projectile(busy).ok(), Some(false));
    assert!(matches!(
        sim.can_be_caught(EntityId(99)),
        Err(RuntimeError::UnknownAgent(EntityId(99)))
    ));
}
