//! Entity spawn factories for the encounter world.
//!
//! Creates alien agents and obstacles with the appropriate component bundles.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use breach_core::components::*;
use breach_core::config::EncounterConfig;
use breach_core::enums::*;
use breach_core::events::SimEvent;

use crate::ground::{agent_ground_height, GroundProbe};

/// Everything a spawn needs from the engine, borrowed for the duration of one system run.
pub struct SpawnEnv<'a> {
    pub world: &'a mut World,
    pub rng: &'a mut ChaCha8Rng,
    pub ground: &'a dyn GroundProbe,
    pub config: &'a EncounterConfig,
    pub next_agent_id: &'a mut u32,
    pub events: &'a mut Vec<SimEvent>,
}

/// Shape of the random planar offset around a spawn point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OffsetShape {
    /// Independent uniform offsets on X and Z within ±radius.
    Square,
    /// Uniform over the disc of the given radius.
    Disc,
}

/// Random offset on the ground plane bounded by `radius`. A non-finite or
/// non-positive radius yields no offset.
pub fn planar_offset<R: Rng + ?Sized>(rng: &mut R, radius: f32, shape: OffsetShape) -> Vec3 {
    if !radius.is_finite() || radius <= 0.0 {
        return Vec3::ZERO;
    }
    match shape {
        // Sample the unit span and scale; `-radius..=radius` overflows near f32::MAX.
        OffsetShape::Square => Vec3::new(
            rng.gen_range(-1.0_f32..=1.0) * radius,
            0.0,
            rng.gen_range(-1.0_f32..=1.0) * radius,
        ),
        OffsetShape::Disc => {
            let angle: f32 = rng.gen_range(0.0..std::f32::consts::TAU);
            // sqrt keeps the density uniform over the disc area
            let r = radius * rng.gen::<f32>().sqrt();
            Vec3::new(r * angle.cos(), 0.0, r * angle.sin())
        }
    }
}

/// Spawn one alien agent at `position`. Probes the ground once to establish
/// the cached walking height and cues the walk animation.
pub fn spawn_alien(
    env: &mut SpawnEnv,
    kind: EnemyKind,
    position: Vec3,
    wave: Option<usize>,
) -> (Entity, u32) {
    let id = *env.next_agent_id;
    *env.next_agent_id += 1;

    let ground_y = match agent_ground_height(env.ground, position, &env.config.agent) {
        Some(y) => y,
        None => {
            log::debug!("No ground below agent {id} at {position}; keeping spawn height");
            position.y
        }
    };

    let agent = AlienAgent {
        id,
        kind,
        stage: AgentStage::SeekingEntrance,
        ground_y,
        final_room: None,
        settle: SettlePhase::NotStarted,
        wave,
        halted: false,
    };

    let entity = env
        .world
        .spawn((Transform::at(position), agent, Body::default()));

    env.events.push(SimEvent::EnemySpawned {
        agent: id,
        kind,
        position,
        wave,
    });
    env.events.push(SimEvent::Animation {
        agent: id,
        cue: AnimationCue::Walk,
    });
    log::debug!("Spawned {kind:?} agent {id} at {position}");

    (entity, id)
}

/// Spawn one obstacle of the given variant.
pub fn spawn_obstacle(world: &mut World, variant: &str, position: Vec3, wave: usize) -> Entity {
    world.spawn((
        Transform::at(position),
        Obstacle {
            variant: variant.to_string(),
            wave,
        },
    ))
}

/// Find the entity carrying the agent with `id`.
pub fn find_agent(world: &World, id: u32) -> Option<Entity> {
    world
        .query::<&AlienAgent>()
        .iter()
        .find(|(_, agent)| agent.id == id)
        .map(|(entity, _)| entity)
}
