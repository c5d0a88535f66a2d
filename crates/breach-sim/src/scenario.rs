//! Scenario definitions — built-in encounter presets.
//!
//! Each scenario is a complete `EncounterConfig`; anything not overridden
//! here keeps the config defaults.

use glam::Vec3;

use breach_core::config::{BurstConfig, EncounterConfig, RouteNames, SpawnMode, WaveTable};
use breach_core::constants::*;
use breach_core::enums::ScenarioId;

/// Build the encounter config for a given scenario.
pub fn build_config(scenario: ScenarioId) -> EncounterConfig {
    match scenario {
        ScenarioId::Default => EncounterConfig::default(),
        ScenarioId::Walkthrough => build_walkthrough(),
        ScenarioId::TwoWave => build_two_wave(),
        ScenarioId::Burst => build_burst(),
    }
}

/// Straight route: entrance at the origin, first room 10 m along +X, then
/// one of two final rooms 10 m further on or 10 m off to the side.
/// No waves; agents are placed by hand.
fn build_walkthrough() -> EncounterConfig {
    let mut config = EncounterConfig {
        waves: WaveTable {
            fast_counts: Vec::new(),
            buff_counts: Vec::new(),
        },
        obstacles: None,
        route: RouteNames {
            entrance: ENTRANCE_ANCHOR.to_string(),
            first_room: FIRST_ROOM_ANCHOR.to_string(),
            final_rooms: FINAL_ROOM_ANCHORS[..2].iter().map(|s| s.to_string()).collect(),
        },
        ..EncounterConfig::default()
    };
    config.anchors.clear();
    config.anchors.extend([
        (ENTRANCE_ANCHOR.to_string(), Vec3::ZERO),
        (FIRST_ROOM_ANCHOR.to_string(), Vec3::new(10.0, 0.0, 0.0)),
        (FINAL_ROOM_ANCHORS[0].to_string(), Vec3::new(20.0, 0.0, 0.0)),
        (FINAL_ROOM_ANCHORS[1].to_string(), Vec3::new(20.0, 0.0, 10.0)),
    ]);
    config
}

/// Two short waves: 3 fast, then 5 fast + 2 buff. One second between spawns.
fn build_two_wave() -> EncounterConfig {
    let mut config = EncounterConfig {
        waves: WaveTable {
            fast_counts: vec![3, 5],
            buff_counts: vec![0, 2],
        },
        obstacles: None,
        ..EncounterConfig::default()
    };
    config.enemy_spawn.spawn_interval_secs = 1.0;
    config
}

/// Single burst of fast and buff enemies around one origin.
fn build_burst() -> EncounterConfig {
    EncounterConfig {
        mode: SpawnMode::Burst(BurstConfig::default()),
        ..EncounterConfig::default()
    }
}
