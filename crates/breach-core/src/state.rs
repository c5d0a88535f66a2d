//! Encounter snapshot — the complete visible state produced after each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::SimTime;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub time: SimTime,
    pub phase: EncounterPhase,
    /// Wave currently spawning or waiting out its gap.
    pub current_wave: Option<usize>,
    pub waves_total: usize,
    pub agents: Vec<AgentView>,
    pub obstacles: Vec<ObstacleView>,
    /// Events emitted since the previous snapshot.
    pub events: Vec<SimEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentView {
    pub id: u32,
    pub kind: EnemyKind,
    pub stage: AgentStage,
    pub position: Vec3,
    pub forward: Vec3,
    /// Name of the chosen final room, once picked.
    pub final_room: Option<String>,
    pub locked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleView {
    pub variant: String,
    pub position: Vec3,
}

impl EncounterSnapshot {
    pub fn settled_count(&self) -> usize {
        self.agents.iter().filter(|a| a.stage.is_settled()).count()
    }
}
