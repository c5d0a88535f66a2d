//! Tests for the simulation engine, wave timeline, obstacle waves and settling.

use glam::{Vec2, Vec3};
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use breach_core::commands::SimCommand;
use breach_core::components::{Body, Obstacle};
use breach_core::config::{EncounterConfig, ObstacleConfig};
use breach_core::enums::*;
use breach_core::events::SimEvent;
use breach_core::state::EncounterSnapshot;
use breach_core::types::horizontal_distance;

use crate::engine::SimulationEngine;
use crate::error::SimError;
use crate::ground::{agent_ground_height, FlatGround, GroundPatch, GroundProbe, NoGround, TerrainPatches};
use crate::obstacles::ObstacleField;
use crate::scenario::build_config;
use crate::world_setup::{planar_offset, OffsetShape};

fn flat_engine(config: EncounterConfig) -> SimulationEngine {
    SimulationEngine::new(config, Box::new(FlatGround::default()))
}

/// Start the encounter and run `ticks` ticks, tagging every event with the
/// tick that emitted it.
fn run_events(engine: &mut SimulationEngine, ticks: u64) -> Vec<(u64, SimEvent)> {
    engine.queue_command(SimCommand::StartEncounter);
    let mut out = Vec::new();
    for tick in 0..ticks {
        let snap = engine.tick();
        out.extend(snap.events.into_iter().map(|e| (tick, e)));
    }
    out
}

fn spawn_ticks(events: &[(u64, SimEvent)], wave: usize) -> Vec<u64> {
    events
        .iter()
        .filter_map(|(tick, e)| match e {
            SimEvent::EnemySpawned { wave: Some(w), .. } if *w == wave => Some(*tick),
            _ => None,
        })
        .collect()
}

fn has_settled(snap: &EncounterSnapshot) -> bool {
    snap.events
        .iter()
        .any(|e| matches!(e, SimEvent::AgentSettled { .. }))
}

/// Tick until the first `AgentSettled` event and return that snapshot.
fn tick_until_settled(engine: &mut SimulationEngine) -> EncounterSnapshot {
    for _ in 0..5_000 {
        let snap = engine.tick();
        if has_settled(&snap) {
            return snap;
        }
    }
    panic!("agent never settled");
}

/// Base plane at 0 with both final rooms raised by half a metre.
fn raised_rooms() -> TerrainPatches {
    TerrainPatches {
        base: Some(0.0),
        patches: vec![GroundPatch {
            min: Vec2::new(15.0, -5.0),
            max: Vec2::new(25.0, 15.0),
            height: 0.5,
        }],
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = flat_engine(EncounterConfig::default());
    let mut engine_b = flat_engine(EncounterConfig::default());

    engine_a.queue_command(SimCommand::StartEncounter);
    engine_b.queue_command(SimCommand::StartEncounter);

    for _ in 0..600 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut config_b = EncounterConfig::default();
    config_b.seed = 7;
    let mut engine_a = flat_engine(EncounterConfig::default());
    let mut engine_b = flat_engine(config_b);

    engine_a.queue_command(SimCommand::StartEncounter);
    engine_b.queue_command(SimCommand::StartEncounter);

    let mut diverged = false;
    for _ in 0..100 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent spawns");
}

// ---- Phase gating ----

#[test]
fn test_idle_engine_does_not_advance() {
    let mut engine = flat_engine(EncounterConfig::default());
    for _ in 0..10 {
        let snap = engine.tick();
        assert_eq!(snap.phase, EncounterPhase::Idle);
        assert!(snap.events.is_empty());
    }
    assert_eq!(engine.time().tick, 0);
    assert_eq!(engine.agent_count(), 0);
}

#[test]
fn test_tick_timing_fifty_ticks_one_second() {
    let mut engine = flat_engine(build_config(ScenarioId::Walkthrough));
    run_events(&mut engine, 50);
    assert_eq!(engine.time().tick, 50);
    assert!((engine.time().elapsed_secs - 1.0).abs() < 1e-4);
}

#[test]
fn test_pause_freezes_simulation() {
    let mut engine = flat_engine(build_config(ScenarioId::TwoWave));
    run_events(&mut engine, 120);

    engine.queue_command(SimCommand::Pause);
    let paused = engine.tick();
    assert_eq!(paused.phase, EncounterPhase::Paused);
    let frozen_tick = engine.time().tick;
    let frozen: Vec<Vec3> = paused.agents.iter().map(|a| a.position).collect();

    for _ in 0..30 {
        let snap = engine.tick();
        assert!(snap.events.is_empty());
        let positions: Vec<Vec3> = snap.agents.iter().map(|a| a.position).collect();
        assert_eq!(positions, frozen);
    }
    assert_eq!(engine.time().tick, frozen_tick);

    engine.queue_command(SimCommand::Resume);
    let resumed = engine.tick();
    assert_eq!(resumed.phase, EncounterPhase::Running);
    assert_eq!(engine.time().tick, frozen_tick + 1);
}

// ---- Wave timeline ----

#[test]
fn test_two_wave_spawn_counts_and_spacing() {
    let mut engine = flat_engine(build_config(ScenarioId::TwoWave));
    let events = run_events(&mut engine, 1_100);

    let first = spawn_ticks(&events, 0);
    let second = spawn_ticks(&events, 1);
    assert_eq!(first, vec![0, 50, 100]);
    assert_eq!(second.len(), 7);
    for pair in second.windows(2) {
        assert_eq!(pair[1] - pair[0], 50, "spawns should be one interval apart");
    }
    // Last spawn's interval, then the wave gap.
    assert_eq!(second[0] - first[2], 50 + 250);
    assert!(spawn_ticks(&events, 2).is_empty(), "there is no third wave");

    let kinds: Vec<EnemyKind> = events
        .iter()
        .filter_map(|(_, e)| match e {
            SimEvent::EnemySpawned {
                kind,
                wave: Some(1),
                ..
            } => Some(*kind),
            _ => None,
        })
        .collect();
    assert_eq!(kinds.iter().filter(|&&k| k == EnemyKind::Fast).count(), 5);
    assert_eq!(kinds.iter().filter(|&&k| k == EnemyKind::Buff).count(), 2);

    let started: Vec<usize> = events
        .iter()
        .filter_map(|(_, e)| match e {
            SimEvent::WaveStarted { wave, .. } => Some(*wave),
            _ => None,
        })
        .collect();
    assert_eq!(started, vec![0, 1]);

    let complete: Vec<u64> = events
        .iter()
        .filter(|(_, e)| *e == SimEvent::EncounterComplete)
        .map(|(tick, _)| *tick)
        .collect();
    assert_eq!(complete, vec![1_000], "complete once, after the final gap");
    assert_eq!(engine.phase(), EncounterPhase::Complete);
}

#[test]
fn test_spawns_land_near_a_spawn_point() {
    let config = build_config(ScenarioId::TwoWave);
    let points = config.enemy_spawn.spawn_points.clone();
    let radius = config.enemy_spawn.spawn_radius;
    let mut engine = flat_engine(config);
    let events = run_events(&mut engine, 200);

    for (_, event) in &events {
        if let SimEvent::EnemySpawned { position, .. } = event {
            let near = points.iter().any(|p| {
                (position.x - p.x).abs() <= radius + 1e-4 && (position.z - p.z).abs() <= radius + 1e-4
            });
            assert!(near, "spawn at {position} is outside every spawn area");
        }
    }
}

#[test]
fn test_missing_variant_skips_without_aborting() {
    let mut config = build_config(ScenarioId::TwoWave);
    config.enemy_spawn.buff_variant = None;
    let mut engine = flat_engine(config);
    let events = run_events(&mut engine, 1_100);

    let spawned = events
        .iter()
        .filter(|(_, e)| matches!(e, SimEvent::EnemySpawned { .. }))
        .count();
    let skipped: Vec<&SimEvent> = events
        .iter()
        .map(|(_, e)| e)
        .filter(|e| matches!(e, SimEvent::SpawnSkipped { .. }))
        .collect();
    assert_eq!(spawned, 8);
    assert_eq!(skipped.len(), 2);
    assert!(skipped.iter().all(|e| **e
        == SimEvent::SpawnSkipped {
            kind: EnemyKind::Buff,
            reason: SpawnSkipReason::MissingVariant,
        }));
    assert!(events.iter().any(|(_, e)| *e == SimEvent::EncounterComplete));
}

#[test]
fn test_no_spawn_points_skips_every_enemy() {
    let mut config = build_config(ScenarioId::TwoWave);
    config.enemy_spawn.spawn_points.clear();
    let mut engine = flat_engine(config);
    let events = run_events(&mut engine, 1_100);

    assert_eq!(engine.agent_count(), 0);
    let skipped = events
        .iter()
        .filter(|(_, e)| {
            matches!(
                e,
                SimEvent::SpawnSkipped {
                    reason: SpawnSkipReason::NoSpawnPoints,
                    ..
                }
            )
        })
        .count();
    assert_eq!(skipped, 10);
    assert!(events.iter().any(|(_, e)| *e == SimEvent::EncounterComplete));
}

#[test]
fn test_missing_obstacle_manager_still_spawns_enemies() {
    let config = build_config(ScenarioId::TwoWave);
    assert!(config.obstacles.is_none());
    let mut engine = flat_engine(config);
    let events = run_events(&mut engine, 1_100);

    assert!(!events
        .iter()
        .any(|(_, e)| matches!(e, SimEvent::ObstaclesSpawned { .. })));
    assert_eq!(engine.agent_count(), 10);
}

#[test]
fn test_obstacles_replaced_each_wave() {
    let mut engine = flat_engine(EncounterConfig::default());
    engine.queue_command(SimCommand::StartEncounter);

    let mut waves_seen = Vec::new();
    for _ in 0..3_500 {
        let snap = engine.tick();
        let Some((wave, total)) = snap.events.iter().find_map(|e| match e {
            SimEvent::ObstaclesSpawned { wave, total, .. } => Some((*wave, *total)),
            _ => None,
        }) else {
            continue;
        };

        assert_eq!(snap.obstacles.len(), total);
        let mut query = engine.world().query::<&Obstacle>();
        assert!(
            query.iter().all(|(_, o)| o.wave == wave),
            "obstacles from an earlier wave survived"
        );

        // Obstacles go in before the wave's first enemy.
        let obstacles_at = snap
            .events
            .iter()
            .position(|e| matches!(e, SimEvent::ObstaclesSpawned { .. }));
        let enemy_at = snap
            .events
            .iter()
            .position(|e| matches!(e, SimEvent::EnemySpawned { .. }));
        if let (Some(o), Some(e)) = (obstacles_at, enemy_at) {
            assert!(o < e);
        }
        waves_seen.push((wave, total));
    }

    assert_eq!(
        waves_seen,
        vec![(0, 6), (1, 9), (2, 9), (3, 12), (4, 12), (5, 15)]
    );
    assert_eq!(engine.phase(), EncounterPhase::Complete);
}

#[test]
fn test_obstacle_wave_index_is_clamped() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut field = ObstacleField::new(ObstacleConfig::default());

    let spawned = field.spawn_wave(&mut world, &mut rng, 99).unwrap();
    assert_eq!(spawned.wave, 5);
    assert_eq!(spawned.per_spawner, 5);
    assert_eq!(spawned.total, 15);
    assert_eq!(field.live_count(), 15);
    assert_eq!(world.query::<&Obstacle>().iter().count(), 15);
}

#[test]
fn test_obstacle_clear_is_noop_when_empty() {
    let mut world = World::new();
    let mut field = ObstacleField::new(ObstacleConfig::default());
    field.clear(&mut world);
    assert_eq!(field.live_count(), 0);
    assert_eq!(field.wave(), None);

    let mut rng = ChaCha8Rng::seed_from_u64(2);
    field.spawn_wave(&mut world, &mut rng, 0).unwrap();
    field.clear(&mut world);
    field.clear(&mut world);
    assert_eq!(field.live_count(), 0);
    assert_eq!(world.query::<&Obstacle>().iter().count(), 0);
}

#[test]
fn test_obstacle_empty_config_leaves_registry_untouched() {
    let mut world = World::new();
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut field = ObstacleField::new(ObstacleConfig::default());
    field.spawn_wave(&mut world, &mut rng, 1).unwrap();

    let mut broken = ObstacleField::new(ObstacleConfig {
        variants: Vec::new(),
        ..ObstacleConfig::default()
    });
    assert!(broken.spawn_wave(&mut world, &mut rng, 0).is_none());
    assert_eq!(broken.live_count(), 0);
    // The other field's obstacles are untouched.
    assert_eq!(world.query::<&Obstacle>().iter().count(), 9);
}

#[test]
fn test_clear_obstacles_via_engine() {
    let mut engine = flat_engine(EncounterConfig::default());
    run_events(&mut engine, 1);
    assert_eq!(engine.obstacles().map(|o| o.live_count()), Some(6));
    engine.clear_obstacles();
    assert_eq!(engine.obstacles().map(|o| o.live_count()), Some(0));
    assert!(engine.tick().obstacles.is_empty());
}

#[test]
fn test_burst_mode_single_flat_burst_around_origin() {
    let mut engine = flat_engine(build_config(ScenarioId::Burst));
    let events = run_events(&mut engine, 400);

    let spawns: Vec<(u64, Vec3, Option<usize>)> = events
        .iter()
        .filter_map(|(tick, e)| match e {
            SimEvent::EnemySpawned { position, wave, .. } => Some((*tick, *position, *wave)),
            _ => None,
        })
        .collect();
    assert_eq!(spawns.len(), 5);
    assert_eq!(
        spawns.iter().map(|s| s.0).collect::<Vec<_>>(),
        vec![0, 50, 100, 150, 200]
    );
    for (_, position, wave) in &spawns {
        assert_eq!(*wave, None);
        assert!(horizontal_distance(*position, Vec3::ZERO) <= 2.0 + 1e-4);
    }
    assert!(!events
        .iter()
        .any(|(_, e)| matches!(e, SimEvent::ObstaclesSpawned { .. })));
    assert!(
        !events.iter().any(|(_, e)| matches!(
            e,
            SimEvent::WaveStarted { .. } | SimEvent::WaveCompleted { .. }
        )),
        "a burst has no waves"
    );
    let complete = events
        .iter()
        .filter(|(_, e)| *e == SimEvent::EncounterComplete)
        .count();
    assert_eq!(complete, 1);
}

// ---- Agents ----

#[test]
fn test_walkthrough_agent_settles_in_final_room() {
    let mut engine = flat_engine(build_config(ScenarioId::Walkthrough));
    engine.queue_command(SimCommand::StartEncounter);
    let id = engine.spawn_agent(EnemyKind::Fast, Vec3::new(0.0, 0.0, -2.0));

    let events = engine.run_to_completion(5_000);
    let room = events
        .iter()
        .find_map(|e| match e {
            SimEvent::AgentSettled { agent, room } if *agent == id => Some(room.clone()),
            _ => None,
        })
        .expect("agent should settle");
    assert!(room == "Room2Trigger" || room == "Room3Trigger");

    let stop = SimEvent::Animation {
        agent: id,
        cue: AnimationCue::Stop,
    };
    assert!(events.contains(&stop));
    assert_eq!(AnimationCue::Stop.clip_name(), "Alien Stop");

    let snap = engine.tick();
    let view = &snap.agents[0];
    assert_eq!(view.stage, AgentStage::Settled);
    assert!(view.locked);
    assert_eq!(view.final_room.as_deref(), Some(room.as_str()));
    assert!((view.position.y - 0.05).abs() < 1e-5);
}

#[test]
fn test_settle_waits_one_tick_then_snaps_to_ground() {
    let mut engine = SimulationEngine::new(
        build_config(ScenarioId::Walkthrough),
        Box::new(raised_rooms()),
    );
    engine.queue_command(SimCommand::StartEncounter);
    engine.spawn_agent(EnemyKind::Fast, Vec3::new(0.0, 0.0, -2.0));

    let arrival = tick_until_settled(&mut engine);
    let view = &arrival.agents[0];
    assert_eq!(view.stage, AgentStage::Settled);
    assert!(!view.locked, "lock happens on the following tick");
    assert!((view.position.y - 0.05).abs() < 1e-5);

    let next = engine.tick();
    let view = &next.agents[0];
    assert!(view.locked);
    assert!((view.position.y - 0.55).abs() < 1e-5);
}

#[test]
fn test_settled_agent_height_stays_locked_under_pushes() {
    let mut engine = SimulationEngine::new(
        build_config(ScenarioId::Walkthrough),
        Box::new(raised_rooms()),
    );
    engine.queue_command(SimCommand::StartEncounter);
    let id = engine.spawn_agent(EnemyKind::Buff, Vec3::new(0.0, 0.0, -2.0));
    tick_until_settled(&mut engine);
    let locked = engine.tick().agents[0].position;

    engine.push_agent(id, Vec3::new(2.0, 10.0, 0.0)).unwrap();
    engine.queue_command(SimCommand::Push {
        agent: id,
        impulse: Vec3::new(0.0, -10.0, 1.0),
        yaw: 0.0,
    });

    let mut last = locked;
    for _ in 0..100 {
        last = engine.tick().agents[0].position;
        assert_eq!(last.y, locked.y, "settled height must never change");
    }
    assert!(last.x > locked.x + 0.1, "push should move the agent horizontally");
    assert!(last.z > locked.z + 0.1);
}

#[test]
fn test_settle_without_ground_keeps_height() {
    let mut engine = SimulationEngine::new(build_config(ScenarioId::Walkthrough), Box::new(NoGround));
    engine.queue_command(SimCommand::StartEncounter);
    engine.spawn_agent(EnemyKind::Fast, Vec3::new(0.0, 1.0, -2.0));

    tick_until_settled(&mut engine);
    let view = engine.tick().agents[0].clone();
    assert!(view.locked);
    assert!((view.position.y - 1.0).abs() < 1e-5);
}

#[test]
fn test_kill_during_settle_is_harmless() {
    let mut engine = flat_engine(build_config(ScenarioId::Walkthrough));
    engine.queue_command(SimCommand::StartEncounter);
    let id = engine.spawn_agent(EnemyKind::Fast, Vec3::new(0.0, 0.0, -2.0));
    tick_until_settled(&mut engine);

    engine.queue_command(SimCommand::Kill { agent: id });
    let snap = engine.tick();
    assert!(snap.agents.is_empty());
    assert!(snap.events.contains(&SimEvent::AgentKilled { agent: id }));
    for _ in 0..5 {
        assert!(engine.tick().agents.is_empty());
    }

    assert_eq!(engine.kill_agent(id), Err(SimError::UnknownAgent(id)));
    assert_eq!(
        engine.push_agent(id, Vec3::X),
        Err(SimError::UnknownAgent(id))
    );
}

#[test]
fn test_agent_without_route_halts_in_place() {
    let mut config = build_config(ScenarioId::Walkthrough);
    config.anchors.clear();
    let mut engine = flat_engine(config);
    engine.queue_command(SimCommand::StartEncounter);
    engine.spawn_agent(EnemyKind::Fast, Vec3::new(4.0, 0.0, 4.0));

    engine.run_to_completion(50);
    let view = engine.tick().agents[0].clone();
    assert_eq!(view.stage, AgentStage::SeekingEntrance);
    assert_eq!((view.position.x, view.position.z), (4.0, 4.0));
    assert!(engine.is_finished());
}

#[test]
fn test_spawn_emits_walk_cue() {
    let mut engine = flat_engine(build_config(ScenarioId::Walkthrough));
    let id = engine.spawn_agent(EnemyKind::Buff, Vec3::new(0.0, 0.0, -5.0));
    let snap = engine.tick();
    assert!(snap.events.contains(&SimEvent::Animation {
        agent: id,
        cue: AnimationCue::Walk,
    }));
    assert_eq!(snap.agents[0].kind, EnemyKind::Buff);
}

#[test]
fn test_pause_after_timeline_complete_freezes_walkers() {
    // No waves: the timeline completes on the first tick while the agent still walks.
    let mut engine = flat_engine(build_config(ScenarioId::Walkthrough));
    let id = engine.spawn_agent(EnemyKind::Fast, Vec3::new(0.0, 0.0, -2.0));
    run_events(&mut engine, 3);
    assert_eq!(engine.phase(), EncounterPhase::Complete);

    engine.queue_command(SimCommand::Pause);
    let paused = engine.tick();
    assert_eq!(paused.phase, EncounterPhase::Paused);
    let frozen = paused.agents[0].position;
    let frozen_tick = engine.time().tick;

    // Pushes queued while paused must not move anything either.
    engine.queue_command(SimCommand::Push {
        agent: id,
        impulse: Vec3::X,
        yaw: 0.0,
    });
    for _ in 0..10 {
        assert_eq!(engine.tick().agents[0].position, frozen, "paused agent moved");
    }
    assert_eq!(engine.time().tick, frozen_tick);

    engine.queue_command(SimCommand::Resume);
    let resumed = engine.tick();
    assert_eq!(resumed.phase, EncounterPhase::Complete);
    assert_ne!(resumed.agents[0].position, frozen);
}

#[test]
fn test_huge_spawn_radius_spawns_without_panicking() {
    let config =
        EncounterConfig::from_json_str(r#"{ "enemy_spawn": { "spawn_radius": 3.0e38 } }"#)
            .unwrap();
    let mut engine = flat_engine(config);
    let events = run_events(&mut engine, 2);

    let position = events
        .iter()
        .find_map(|(_, e)| match e {
            SimEvent::EnemySpawned { position, .. } => Some(*position),
            _ => None,
        })
        .expect("first enemy should spawn");
    assert!(position.is_finite());
    assert_eq!(engine.agent_count(), 1);
}

#[test]
fn test_unvalidated_nan_radius_spawns_on_the_point() {
    let mut config = build_config(ScenarioId::TwoWave);
    config.enemy_spawn.spawn_radius = f32::NAN;
    let points = config.enemy_spawn.spawn_points.clone();
    let mut engine = flat_engine(config);
    let events = run_events(&mut engine, 1);

    let position = events
        .iter()
        .find_map(|(_, e)| match e {
            SimEvent::EnemySpawned { position, .. } => Some(*position),
            _ => None,
        })
        .expect("first enemy should spawn");
    assert!(points.contains(&position), "NaN radius should mean no offset");
}

#[test]
fn test_planar_offset_stays_within_radius() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    for _ in 0..100 {
        let square = planar_offset(&mut rng, f32::MAX, OffsetShape::Square);
        assert!(square.is_finite());
        assert_eq!(square.y, 0.0);

        let disc = planar_offset(&mut rng, 2.0, OffsetShape::Disc);
        assert!(disc.length() <= 2.0 + 1e-5);
    }
    assert_eq!(planar_offset(&mut rng, f32::NAN, OffsetShape::Disc), Vec3::ZERO);
    assert_eq!(planar_offset(&mut rng, f32::INFINITY, OffsetShape::Square), Vec3::ZERO);
    assert_eq!(planar_offset(&mut rng, -1.0, OffsetShape::Square), Vec3::ZERO);
}

#[test]
fn test_vertical_push_keeps_walker_on_cached_ground() {
    let mut engine = flat_engine(build_config(ScenarioId::Walkthrough));
    let id = engine.spawn_agent(EnemyKind::Fast, Vec3::new(0.0, 0.0, -2.0));
    run_events(&mut engine, 1);

    engine.push_agent(id, Vec3::new(0.0, 5.0, 0.0)).unwrap();
    for _ in 0..5 {
        let view = engine.tick().agents[0].clone();
        assert!((view.position.y - 0.05).abs() < 1e-6, "walker left its ground height");
    }
}

#[test]
fn test_spin_turns_settled_agent_and_damps_out() {
    let mut engine = flat_engine(build_config(ScenarioId::Walkthrough));
    engine.queue_command(SimCommand::StartEncounter);
    let id = engine.spawn_agent(EnemyKind::Fast, Vec3::new(0.0, 0.0, -2.0));
    tick_until_settled(&mut engine);
    let locked = engine.tick().agents[0].clone();

    engine.queue_command(SimCommand::Push {
        agent: id,
        impulse: Vec3::ZERO,
        yaw: 2.0,
    });
    let turned = engine.tick().agents[0].clone();
    assert!((turned.forward - locked.forward).length() > 1e-3, "yaw push should turn the agent");
    assert!((turned.forward.length() - 1.0).abs() < 1e-4);
    assert_eq!(turned.position, locked.position);

    for _ in 0..300 {
        engine.tick();
    }
    let yaw_rate = {
        let mut query = engine.world().query::<&Body>();
        let rate = query.iter().map(|(_, body)| body.angular_velocity).next();
        rate.unwrap()
    };
    assert_eq!(yaw_rate, 0.0, "yaw rate should damp to rest");

    assert_eq!(
        engine.spin_agent(99, 1.0),
        Err(SimError::UnknownAgent(99))
    );
}

// ---- Ground probes ----

#[test]
fn test_flat_ground_probe_range() {
    let ground = FlatGround { height: 1.0 };
    assert_eq!(ground.probe_ground_height(Vec3::new(0.0, 2.0, 0.0), 5.0), Some(1.0));
    assert_eq!(ground.probe_ground_height(Vec3::new(0.0, 0.5, 0.0), 5.0), None);
    assert_eq!(ground.probe_ground_height(Vec3::new(0.0, 10.0, 0.0), 5.0), None);
}

#[test]
fn test_terrain_patches_pick_highest_surface_below() {
    let terrain = TerrainPatches {
        base: Some(0.0),
        patches: vec![GroundPatch {
            min: Vec2::ZERO,
            max: Vec2::ONE,
            height: 2.0,
        }],
    };
    assert_eq!(terrain.probe_ground_height(Vec3::new(0.5, 3.0, 0.5), 5.0), Some(2.0));
    // Patch above the probe origin is ignored.
    assert_eq!(terrain.probe_ground_height(Vec3::new(0.5, 1.0, 0.5), 5.0), Some(0.0));
    assert_eq!(terrain.probe_ground_height(Vec3::new(3.0, 3.0, 3.0), 5.0), Some(0.0));
}

#[test]
fn test_agent_ground_height_applies_probe_and_offset() {
    let config = EncounterConfig::default().agent;
    let probe = |origin: Vec3, max_distance: f32| {
        assert!((origin.y - 1.0).abs() < 1e-6, "probe starts one metre up");
        assert_eq!(max_distance, 5.0);
        Some(3.0_f32)
    };
    let height = agent_ground_height(&probe, Vec3::ZERO, &config).unwrap();
    assert!((height - 3.05).abs() < 1e-6);
    assert_eq!(agent_ground_height(&NoGround, Vec3::ZERO, &config), None);
}
