//! Wave orchestration system — walks the encounter timeline one wave at a time.
//!
//! The timeline is an explicit state machine with a resume tick: each spawn is
//! followed by the inter-spawn delay, each wave by the inter-wave delay. Waves
//! never overlap and the timeline never loops.

use glam::Vec3;
use rand::Rng;

use breach_core::config::{BurstConfig, EncounterConfig, SpawnMode, WaveTable};
use breach_core::enums::{EnemyKind, SpawnSkipReason};
use breach_core::events::SimEvent;
use breach_core::types::secs_to_ticks;

use crate::obstacles::ObstacleField;
use crate::world_setup::{planar_offset, spawn_alien, OffsetShape, SpawnEnv};

/// One wave's worth of spawns, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct WavePlan {
    /// Wave index; `None` for the single burst.
    pub wave: Option<usize>,
    pub spawns: Vec<EnemyKind>,
    /// Replace the obstacle field when the wave starts.
    pub trigger_obstacles: bool,
}

impl WavePlan {
    fn new(wave: Option<usize>, fast: u32, buff: u32, trigger_obstacles: bool) -> Self {
        let spawns = std::iter::repeat(EnemyKind::Fast)
            .take(fast as usize)
            .chain(std::iter::repeat(EnemyKind::Buff).take(buff as usize))
            .collect();
        Self {
            wave,
            spawns,
            trigger_obstacles,
        }
    }

    pub fn count(&self, kind: EnemyKind) -> u32 {
        self.spawns.iter().filter(|&&k| k == kind).count() as u32
    }
}

/// Where enemies appear.
#[derive(Debug, Clone, PartialEq)]
pub struct SpawnSite {
    pub points: Vec<Vec3>,
    pub radius: f32,
    pub shape: OffsetShape,
}

/// Resume point of the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimelineState {
    NotStarted,
    /// Start wave `index` once `at_tick` is reached (or finish if past the end).
    WaveStart { index: usize, at_tick: u64 },
    /// Spawn entry `next` of wave `index` once `at_tick` is reached.
    Spawning { index: usize, next: usize, at_tick: u64 },
    Complete,
}

#[derive(Debug, Clone)]
pub struct WaveTimeline {
    plans: Vec<WavePlan>,
    site: SpawnSite,
    spawn_interval_ticks: u64,
    wave_gap_ticks: u64,
    state: TimelineState,
}

impl Default for WaveTimeline {
    fn default() -> Self {
        Self {
            plans: Vec::new(),
            site: SpawnSite {
                points: Vec::new(),
                radius: 0.0,
                shape: OffsetShape::Square,
            },
            spawn_interval_ticks: 0,
            wave_gap_ticks: 0,
            state: TimelineState::NotStarted,
        }
    }
}

impl WaveTimeline {
    /// Build the timeline selected by the config's spawn mode.
    pub fn from_config(config: &EncounterConfig) -> Self {
        match &config.mode {
            SpawnMode::Waves => Self::waves(config),
            SpawnMode::Burst(burst) => Self::burst(burst, config.tick_rate),
        }
    }

    /// Multi-wave timeline: one plan per entry of the fast-count sequence.
    pub fn waves(config: &EncounterConfig) -> Self {
        let spawn = &config.enemy_spawn;
        Self {
            plans: wave_plans(&config.waves),
            site: SpawnSite {
                points: spawn.spawn_points.clone(),
                radius: spawn.spawn_radius,
                shape: OffsetShape::Square,
            },
            spawn_interval_ticks: secs_to_ticks(spawn.spawn_interval_secs, config.tick_rate),
            wave_gap_ticks: secs_to_ticks(spawn.wave_gap_secs, config.tick_rate),
            state: TimelineState::NotStarted,
        }
    }

    /// Single flat burst around one origin, no obstacles, no repetition.
    pub fn burst(burst: &BurstConfig, tick_rate: u32) -> Self {
        Self {
            plans: vec![WavePlan::new(None, burst.fast_count, burst.buff_count, false)],
            site: SpawnSite {
                points: vec![burst.origin],
                radius: burst.spawn_radius,
                shape: OffsetShape::Disc,
            },
            spawn_interval_ticks: secs_to_ticks(burst.spawn_interval_secs, tick_rate),
            wave_gap_ticks: 0,
            state: TimelineState::NotStarted,
        }
    }

    /// Begin the timeline at `tick`. Ignored once started.
    pub fn start(&mut self, tick: u64) {
        if self.state == TimelineState::NotStarted {
            self.state = TimelineState::WaveStart {
                index: 0,
                at_tick: tick,
            };
        }
    }

    pub fn state(&self) -> TimelineState {
        self.state
    }

    pub fn plans(&self) -> &[WavePlan] {
        &self.plans
    }

    pub fn is_complete(&self) -> bool {
        self.state == TimelineState::Complete
    }

    /// Wave currently spawning, or the one whose gap is being waited out.
    pub fn current_wave(&self) -> Option<usize> {
        match self.state {
            TimelineState::Spawning { index, .. } => Some(index),
            TimelineState::WaveStart { index, .. } => index.checked_sub(1),
            TimelineState::NotStarted | TimelineState::Complete => None,
        }
    }

    pub fn spawn_interval_ticks(&self) -> u64 {
        self.spawn_interval_ticks
    }

    pub fn wave_gap_ticks(&self) -> u64 {
        self.wave_gap_ticks
    }
}

fn wave_plans(table: &WaveTable) -> Vec<WavePlan> {
    (0..table.wave_count())
        .map(|i| WavePlan::new(Some(i), table.fast(i), table.buff(i), true))
        .collect()
}

/// Advance the timeline to `current_tick`. Returns `true` on the tick the
/// timeline completes.
pub fn run(
    timeline: &mut WaveTimeline,
    env: &mut SpawnEnv,
    mut obstacles: Option<&mut ObstacleField>,
    current_tick: u64,
) -> bool {
    // Zero delays let several steps resolve within one tick.
    loop {
        match timeline.state {
            TimelineState::NotStarted | TimelineState::Complete => return false,
            TimelineState::WaveStart { index, at_tick } => {
                if current_tick < at_tick {
                    return false;
                }
                let Some(plan) = timeline.plans.get(index) else {
                    timeline.state = TimelineState::Complete;
                    log::info!("All waves complete");
                    env.events.push(SimEvent::EncounterComplete);
                    return true;
                };
                begin_wave(plan, env, obstacles.as_deref_mut());
                timeline.state = TimelineState::Spawning {
                    index,
                    next: 0,
                    at_tick: current_tick,
                };
            }
            TimelineState::Spawning {
                index,
                next,
                at_tick,
            } => {
                if current_tick < at_tick {
                    return false;
                }
                let plan = &timeline.plans[index];
                match plan.spawns.get(next) {
                    Some(&kind) => {
                        spawn_enemy(&timeline.site, env, kind, plan.wave);
                        timeline.state = TimelineState::Spawning {
                            index,
                            next: next + 1,
                            at_tick: current_tick + timeline.spawn_interval_ticks,
                        };
                    }
                    None => {
                        let fast = plan.count(EnemyKind::Fast);
                        let buff = plan.count(EnemyKind::Buff);
                        match plan.wave {
                            Some(wave) => {
                                log::info!("Wave {} complete: {fast} fast, {buff} buff", wave + 1);
                                env.events.push(SimEvent::WaveCompleted { wave });
                            }
                            None => log::info!("Burst complete: {fast} fast, {buff} buff"),
                        }
                        timeline.state = TimelineState::WaveStart {
                            index: index + 1,
                            at_tick: current_tick + timeline.wave_gap_ticks,
                        };
                    }
                }
            }
        }
    }
}

fn begin_wave(plan: &WavePlan, env: &mut SpawnEnv, obstacles: Option<&mut ObstacleField>) {
    let fast = plan.count(EnemyKind::Fast);
    let buff = plan.count(EnemyKind::Buff);
    // The burst spawner has no wave structure.
    let Some(index) = plan.wave else {
        log::info!("Starting burst: {fast} fast, {buff} buff");
        return;
    };
    log::info!("Starting wave {}", index + 1);
    env.events.push(SimEvent::WaveStarted {
        wave: index,
        fast,
        buff,
    });

    if !plan.trigger_obstacles {
        return;
    }
    match obstacles {
        Some(field) => {
            if let Some(spawned) = field.spawn_wave(env.world, env.rng, index) {
                env.events.push(SimEvent::ObstaclesSpawned {
                    wave: spawned.wave,
                    per_spawner: spawned.per_spawner,
                    total: spawned.total,
                });
            }
        }
        None => log::warn!("No obstacle manager configured; spawning enemies only"),
    }
}

/// Spawn one enemy at a random spawn point, or log and skip.
fn spawn_enemy(site: &SpawnSite, env: &mut SpawnEnv, kind: EnemyKind, wave: Option<usize>) {
    let skip = if site.points.is_empty() {
        Some(SpawnSkipReason::NoSpawnPoints)
    } else if env.config.enemy_spawn.variant(kind).is_none() {
        Some(SpawnSkipReason::MissingVariant)
    } else {
        None
    };
    if let Some(reason) = skip {
        log::warn!("Missing spawn points or variant for {kind:?} enemy ({reason:?}); skipping");
        env.events.push(SimEvent::SpawnSkipped { kind, reason });
        return;
    }

    let point = site.points[env.rng.gen_range(0..site.points.len())];
    let position = point + planar_offset(env.rng, site.radius, site.shape);
    spawn_alien(env, kind, position, wave);
}
