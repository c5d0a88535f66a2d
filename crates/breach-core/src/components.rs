//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// World placement of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    /// Unit facing direction.
    pub forward: Vec3,
}

impl Transform {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            forward: Vec3::Z,
        }
    }
}

/// Per-agent navigation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlienAgent {
    /// Stable agent id, unique within one engine.
    pub id: u32,
    pub kind: EnemyKind,
    pub stage: AgentStage,
    /// Ground height established by the spawn-time probe.
    pub ground_y: f32,
    /// Index into the final-room candidates, chosen once on leaving the first room.
    pub final_room: Option<usize>,
    pub settle: SettlePhase,
    /// Wave that spawned this agent (`None` for burst and manual spawns).
    pub wave: Option<usize>,
    /// Set once the agent's current stage turned out to have no target.
    pub halted: bool,
}

/// Rigid-body state the navigation code issues commands to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub velocity: Vec3,
    /// Yaw rate (rad/s). Tipping rotations are always frozen.
    pub angular_velocity: f32,
    /// When set, the vertical coordinate never changes again.
    pub lock_y: bool,
}

/// Environmental obstacle ("rock") spawned by the obstacle manager.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    /// Variant (prefab) name.
    pub variant: String,
    /// Wave index (after clamping) that produced it.
    pub wave: usize,
}
