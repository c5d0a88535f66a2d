//! Snapshot system — builds the `EncounterSnapshot` from the world.

use hecs::World;

use breach_core::components::{AlienAgent, Body, Obstacle, Transform};
use breach_core::enums::EncounterPhase;
use breach_core::events::SimEvent;
use breach_core::state::{AgentView, EncounterSnapshot, ObstacleView};
use breach_core::types::SimTime;

use breach_agent_ai::waypoints::WaypointChain;

use crate::systems::wave_orchestrator::WaveTimeline;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: EncounterPhase,
    timeline: &WaveTimeline,
    chain: &WaypointChain,
    events: Vec<SimEvent>,
) -> EncounterSnapshot {
    let mut agents: Vec<AgentView> = world
        .query::<(&AlienAgent, &Transform, &Body)>()
        .iter()
        .map(|(_, (agent, transform, body))| AgentView {
            id: agent.id,
            kind: agent.kind,
            stage: agent.stage,
            position: transform.position,
            forward: transform.forward,
            final_room: agent
                .final_room
                .and_then(|i| chain.final_room_name(i))
                .map(str::to_string),
            locked: body.lock_y,
        })
        .collect();
    agents.sort_by_key(|a| a.id);

    let obstacles = world
        .query::<(&Obstacle, &Transform)>()
        .iter()
        .map(|(_, (obstacle, transform))| ObstacleView {
            variant: obstacle.variant.clone(),
            position: transform.position,
        })
        .collect();

    EncounterSnapshot {
        time: *time,
        phase,
        current_wave: timeline.current_wave(),
        waves_total: timeline.plans().len(),
        agents,
        obstacles,
        events,
    }
}
