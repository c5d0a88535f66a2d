//! Simulation engine — the core of the encounter.
//!
//! `SimulationEngine` owns the hecs ECS world, processes external commands,
//! runs all systems on a fixed tick, and produces `EncounterSnapshot`s.
//! Completely headless, enabling seeded, reproducible testing.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use breach_core::commands::SimCommand;
use breach_core::components::{AlienAgent, Body};
use breach_core::config::EncounterConfig;
use breach_core::enums::{EncounterPhase, EnemyKind, SettlePhase};
use breach_core::events::SimEvent;
use breach_core::state::EncounterSnapshot;
use breach_core::types::{flatten, SimTime};

use breach_agent_ai::waypoints::WaypointChain;

use crate::error::SimError;
use crate::ground::GroundProbe;
use crate::obstacles::ObstacleField;
use crate::systems;
use crate::systems::wave_orchestrator::WaveTimeline;
use crate::world_setup::{self, SpawnEnv};

/// The simulation engine. Owns the ECS world and all encounter state.
pub struct SimulationEngine {
    world: World,
    config: EncounterConfig,
    time: SimTime,
    phase: EncounterPhase,
    rng: ChaCha8Rng,
    ground: Box<dyn GroundProbe>,
    chain: WaypointChain,
    timeline: WaveTimeline,
    obstacles: Option<ObstacleField>,
    next_agent_id: u32,
    command_queue: VecDeque<SimCommand>,
    events: Vec<SimEvent>,
}

impl SimulationEngine {
    /// Create an engine for `config`, probing ground through `ground`.
    /// The waypoint chain is resolved here, once.
    pub fn new(config: EncounterConfig, ground: Box<dyn GroundProbe>) -> Self {
        let chain = WaypointChain::resolve(&config.anchors, &config.route);
        let timeline = WaveTimeline::from_config(&config);
        let obstacles = config.obstacles.clone().map(ObstacleField::new);

        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: EncounterPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ground,
            chain,
            timeline,
            obstacles,
            next_agent_id: 0,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            config,
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one fixed tick and return the resulting snapshot.
    pub fn tick(&mut self) -> EncounterSnapshot {
        self.process_commands();

        if matches!(
            self.phase,
            EncounterPhase::Running | EncounterPhase::Complete
        ) {
            self.run_systems();
            self.time.advance(self.config.dt());
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.timeline,
            &self.chain,
            events,
        )
    }

    /// Tick until the timeline is exhausted and every agent has locked in
    /// place, or `max_ticks` have run. Returns every event emitted on the way.
    pub fn run_to_completion(&mut self, max_ticks: u64) -> Vec<SimEvent> {
        let mut events = Vec::new();
        for _ in 0..max_ticks {
            events.extend(self.tick().events);
            if self.is_finished() {
                break;
            }
        }
        events
    }

    /// Timeline done and no agent still walking or settling.
    pub fn is_finished(&self) -> bool {
        self.phase == EncounterPhase::Complete
            && self
                .world
                .query::<&AlienAgent>()
                .iter()
                .all(|(_, agent)| agent.settle == SettlePhase::Locked || agent.halted)
    }

    /// Spawn a single agent outside the wave timeline (e.g. a scripted arrival).
    pub fn spawn_agent(&mut self, kind: EnemyKind, position: Vec3) -> u32 {
        let mut env = SpawnEnv {
            world: &mut self.world,
            rng: &mut self.rng,
            ground: self.ground.as_ref(),
            config: &self.config,
            next_agent_id: &mut self.next_agent_id,
            events: &mut self.events,
        };
        let (_entity, id) = world_setup::spawn_alien(&mut env, kind, position, None);
        id
    }

    /// Add an external velocity change to an agent's body. Only the horizontal
    /// part is applied: walking agents have their height pinned to the cached
    /// ground and settled agents are locked.
    pub fn push_agent(&mut self, agent: u32, impulse: Vec3) -> Result<(), SimError> {
        let mut body = self.body_mut(agent)?;
        body.velocity += flatten(impulse);
        Ok(())
    }

    /// Add a yaw rate change (rad/s) to an agent's body.
    pub fn spin_agent(&mut self, agent: u32, yaw: f32) -> Result<(), SimError> {
        let mut body = self.body_mut(agent)?;
        body.angular_velocity += yaw;
        Ok(())
    }

    fn body_mut(&self, agent: u32) -> Result<hecs::RefMut<'_, Body>, SimError> {
        let entity =
            world_setup::find_agent(&self.world, agent).ok_or(SimError::UnknownAgent(agent))?;
        self.world
            .get::<&mut Body>(entity)
            .map_err(|_| SimError::UnknownAgent(agent))
    }

    /// Remove an agent from the world. Any pending settle sequence is abandoned.
    pub fn kill_agent(&mut self, agent: u32) -> Result<(), SimError> {
        let entity =
            world_setup::find_agent(&self.world, agent).ok_or(SimError::UnknownAgent(agent))?;
        self.world
            .despawn(entity)
            .map_err(|_| SimError::UnknownAgent(agent))?;
        self.events.push(SimEvent::AgentKilled { agent });
        Ok(())
    }

    /// Destroy all live obstacles (scene teardown).
    pub fn clear_obstacles(&mut self) {
        if let Some(field) = self.obstacles.as_mut() {
            field.clear(&mut self.world);
        }
    }

    /// Get the current encounter phase.
    pub fn phase(&self) -> EncounterPhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn config(&self) -> &EncounterConfig {
        &self.config
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn chain(&self) -> &WaypointChain {
        &self.chain
    }

    pub fn timeline(&self) -> &WaveTimeline {
        &self.timeline
    }

    pub fn obstacles(&self) -> Option<&ObstacleField> {
        self.obstacles.as_ref()
    }

    /// Number of live agents.
    pub fn agent_count(&self) -> usize {
        self.world.query::<&AlienAgent>().iter().count()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::StartEncounter => {
                if self.phase == EncounterPhase::Idle {
                    self.timeline.start(self.time.tick);
                    self.phase = EncounterPhase::Running;
                }
            }
            SimCommand::Pause => {
                // Agents keep walking after the timeline completes, so that phase pauses too.
                if matches!(
                    self.phase,
                    EncounterPhase::Running | EncounterPhase::Complete
                ) {
                    self.phase = EncounterPhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == EncounterPhase::Paused {
                    self.phase = if self.timeline.is_complete() {
                        EncounterPhase::Complete
                    } else {
                        EncounterPhase::Running
                    };
                }
            }
            SimCommand::Push { agent, impulse, yaw } => {
                let result = self.push_agent(agent, impulse).and_then(|()| {
                    if yaw != 0.0 {
                        self.spin_agent(agent, yaw)
                    } else {
                        Ok(())
                    }
                });
                if let Err(e) = result {
                    log::warn!("Push ignored: {e}");
                }
            }
            SimCommand::Kill { agent } => {
                if let Err(e) = self.kill_agent(agent) {
                    log::warn!("Kill ignored: {e}");
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        let dt = self.config.dt();

        // 1. Wave timeline (obstacle waves + enemy spawns)
        let mut env = SpawnEnv {
            world: &mut self.world,
            rng: &mut self.rng,
            ground: self.ground.as_ref(),
            config: &self.config,
            next_agent_id: &mut self.next_agent_id,
            events: &mut self.events,
        };
        let completed = systems::wave_orchestrator::run(
            &mut self.timeline,
            &mut env,
            self.obstacles.as_mut(),
            self.time.tick,
        );
        if completed {
            self.phase = EncounterPhase::Complete;
        }

        // 2. Settle finalization (runs one tick after arrival)
        systems::settle::run(&mut self.world, self.ground.as_ref(), &self.config.agent);
        // 3. Navigation
        systems::navigation::run(
            &mut self.world,
            &self.chain,
            &self.config.agent,
            &mut self.rng,
            dt,
            &mut self.events,
        );
        // 4. Body integration (pushes)
        systems::bodies::run(&mut self.world, dt);
    }
}
