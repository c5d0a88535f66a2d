//! Events emitted by the simulation for animation, UI and logging consumers.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Everything observable that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A wave began (obstacles are spawned first, then enemies).
    WaveStarted { wave: usize, fast: u32, buff: u32 },
    /// All enemies of a wave have been spawned.
    WaveCompleted { wave: usize },
    /// One enemy instantiated.
    EnemySpawned {
        agent: u32,
        kind: EnemyKind,
        position: Vec3,
        wave: Option<usize>,
    },
    /// One enemy spawn attempt was skipped; the timeline continues.
    SpawnSkipped {
        kind: EnemyKind,
        reason: SpawnSkipReason,
    },
    /// The obstacle registry was replaced.
    ObstaclesSpawned {
        wave: usize,
        per_spawner: u32,
        total: usize,
    },
    /// Play an animation clip on an agent.
    Animation { agent: u32, cue: AnimationCue },
    /// Agent reached its final room.
    AgentSettled { agent: u32, room: String },
    /// Agent removed from the world.
    AgentKilled { agent: u32 },
    /// No further waves will be spawned.
    EncounterComplete,
}
