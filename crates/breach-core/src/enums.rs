//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::constants::{STOP_CLIP, WALK_CLIP};

/// Enemy type. Fast enemies are the type-A spawns, buff enemies type-B.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Fast,
    Buff,
}

/// Navigation stage of an alien agent. Stages only ever advance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgentStage {
    /// Walking to the shared entrance waypoint.
    #[default]
    SeekingEntrance,
    /// Walking to the shared first-room waypoint.
    SeekingFirstRoom,
    /// Walking to the randomly chosen final room.
    SeekingFinalRoom,
    /// Stopped for good; a static, horizontally pushable obstacle.
    Settled,
}

impl AgentStage {
    /// The stage that follows this one. `Settled` is terminal.
    pub fn next(self) -> Self {
        match self {
            AgentStage::SeekingEntrance => AgentStage::SeekingFirstRoom,
            AgentStage::SeekingFirstRoom => AgentStage::SeekingFinalRoom,
            AgentStage::SeekingFinalRoom | AgentStage::Settled => AgentStage::Settled,
        }
    }

    pub fn is_settled(self) -> bool {
        self == AgentStage::Settled
    }
}

/// Progress of the settle finalization that follows arrival at the final room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettlePhase {
    /// Agent is still navigating.
    #[default]
    NotStarted,
    /// Waiting for the transform to stabilize before the final ground probe.
    AwaitingTick { ticks_remaining: u32 },
    /// Final ground alignment done; vertical position is locked.
    Locked,
}

/// Animation cue sent to the (opaque) animation sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimationCue {
    Walk,
    Stop,
}

impl AnimationCue {
    /// Clip name understood by the animation sink.
    pub fn clip_name(self) -> &'static str {
        match self {
            AnimationCue::Walk => WALK_CLIP,
            AnimationCue::Stop => STOP_CLIP,
        }
    }
}

/// Top-level encounter state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterPhase {
    /// Configured but not started.
    #[default]
    Idle,
    Running,
    Paused,
    /// Timeline exhausted. Agents keep simulating.
    Complete,
}

/// Why a single enemy spawn was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpawnSkipReason {
    /// No enemy spawn points configured.
    NoSpawnPoints,
    /// No variant (prefab) assigned for this enemy kind.
    MissingVariant,
}

/// Built-in encounter presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Six waves of fast and buff enemies with rock waves.
    #[default]
    Default,
    /// Straight-line route with two final rooms and no waves.
    Walkthrough,
    /// Two short waves, no obstacles.
    TwoWave,
    /// Single burst around one origin.
    Burst,
}
