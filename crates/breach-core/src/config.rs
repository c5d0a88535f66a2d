//! Encounter configuration. Loaded from JSON; every field has a default.
//!
//! Reference gaps (empty spawn-point lists, unassigned variants, no obstacle
//! manager) are allowed here and degrade individual operations at run time.
//! Only numerically meaningless tunables are rejected by [`EncounterConfig::validate`].

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::EnemyKind;
use crate::error::ConfigError;

/// Complete configuration for one encounter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Fixed-update rate (Hz).
    #[serde(default = "default_tick_rate")]
    pub tick_rate: u32,
    /// RNG seed. Same seed = same encounter.
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub waves: WaveTable,
    #[serde(default)]
    pub enemy_spawn: EnemySpawnConfig,
    /// `None` means no obstacle manager is configured.
    #[serde(default = "default_obstacles")]
    pub obstacles: Option<ObstacleConfig>,
    #[serde(default)]
    pub route: RouteNames,
    /// Named scene anchors the route is resolved against.
    #[serde(default = "default_anchors")]
    pub anchors: BTreeMap<String, Vec3>,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub mode: SpawnMode,
}

/// Per-wave counts. Indexed by wave number.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveTable {
    /// Type-A counts. Its length is the number of waves.
    #[serde(default = "default_fast_counts")]
    pub fast_counts: Vec<u32>,
    /// Type-B counts. Missing entries count as zero.
    #[serde(default = "default_buff_counts")]
    pub buff_counts: Vec<u32>,
}

impl WaveTable {
    pub fn wave_count(&self) -> usize {
        self.fast_counts.len()
    }

    pub fn fast(&self, wave: usize) -> u32 {
        self.fast_counts.get(wave).copied().unwrap_or(0)
    }

    pub fn buff(&self, wave: usize) -> u32 {
        self.buff_counts.get(wave).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemySpawnConfig {
    #[serde(default = "default_enemy_spawn_points")]
    pub spawn_points: Vec<Vec3>,
    #[serde(default = "default_enemy_spawn_radius")]
    pub spawn_radius: f32,
    #[serde(default = "default_spawn_interval")]
    pub spawn_interval_secs: f32,
    #[serde(default = "default_wave_gap")]
    pub wave_gap_secs: f32,
    /// Variant spawned for fast enemies; `None` = unassigned.
    #[serde(default = "default_fast_variant")]
    pub fast_variant: Option<String>,
    /// Variant spawned for buff enemies; `None` = unassigned.
    #[serde(default = "default_buff_variant")]
    pub buff_variant: Option<String>,
}

impl EnemySpawnConfig {
    pub fn variant(&self, kind: EnemyKind) -> Option<&str> {
        match kind {
            EnemyKind::Fast => self.fast_variant.as_deref(),
            EnemyKind::Buff => self.buff_variant.as_deref(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleConfig {
    #[serde(default = "default_rock_variants")]
    pub variants: Vec<String>,
    #[serde(default = "default_obstacle_spawn_points")]
    pub spawn_points: Vec<Vec3>,
    /// Obstacles per spawn point, by wave. Out-of-range waves are clamped.
    #[serde(default = "default_obstacles_per_spawner")]
    pub per_spawner: Vec<u32>,
    #[serde(default = "default_obstacle_spawn_radius")]
    pub spawn_radius: f32,
}

/// Anchor names making up the waypoint route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteNames {
    #[serde(default = "default_entrance_name")]
    pub entrance: String,
    #[serde(default = "default_first_room_name")]
    pub first_room: String,
    #[serde(default = "default_final_room_names")]
    pub final_rooms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    #[serde(default = "default_ground_offset")]
    pub ground_offset: f32,
    #[serde(default = "default_probe_height")]
    pub probe_height: f32,
    #[serde(default = "default_probe_range")]
    pub probe_range: f32,
    /// Fraction of the facing gap closed per tick (0..=1).
    #[serde(default = "default_turn_rate")]
    pub turn_rate: f32,
    #[serde(default)]
    pub fast: AgentProfileConfig,
    #[serde(default)]
    pub buff: AgentProfileConfig,
}

impl AgentConfig {
    pub fn profile(&self, kind: EnemyKind) -> &AgentProfileConfig {
        match kind {
            EnemyKind::Fast => &self.fast,
            EnemyKind::Buff => &self.buff,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AgentProfileConfig {
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    #[serde(default = "default_stop_distance")]
    pub stop_distance: f32,
}

/// Which spawn timeline drives the encounter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SpawnMode {
    /// Multi-wave timeline with obstacle waves.
    #[default]
    Waves,
    /// One flat burst around a single origin, no obstacles.
    Burst(BurstConfig),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstConfig {
    #[serde(default)]
    pub origin: Vec3,
    #[serde(default = "default_burst_fast")]
    pub fast_count: u32,
    #[serde(default = "default_burst_buff")]
    pub buff_count: u32,
    #[serde(default = "default_burst_radius")]
    pub spawn_radius: f32,
    #[serde(default = "default_burst_interval")]
    pub spawn_interval_secs: f32,
}

fn default_tick_rate() -> u32 {
    DEFAULT_TICK_RATE
}
fn default_seed() -> u64 {
    DEFAULT_SEED
}
fn default_fast_counts() -> Vec<u32> {
    DEFAULT_FAST_COUNTS.to_vec()
}
fn default_buff_counts() -> Vec<u32> {
    DEFAULT_BUFF_COUNTS.to_vec()
}
fn default_enemy_spawn_points() -> Vec<Vec3> {
    vec![Vec3::new(-3.0, 0.0, -12.0), Vec3::new(3.0, 0.0, -12.0)]
}
fn default_enemy_spawn_radius() -> f32 {
    ENEMY_SPAWN_RADIUS
}
fn default_spawn_interval() -> f32 {
    ENEMY_SPAWN_INTERVAL_SECS
}
fn default_wave_gap() -> f32 {
    WAVE_GAP_SECS
}
fn default_fast_variant() -> Option<String> {
    Some("FastMartian".to_string())
}
fn default_buff_variant() -> Option<String> {
    Some("BuffMartian".to_string())
}
fn default_obstacles() -> Option<ObstacleConfig> {
    Some(ObstacleConfig::default())
}
fn default_rock_variants() -> Vec<String> {
    (1..=DEFAULT_ROCK_VARIANTS).map(|i| format!("Rock{i}")).collect()
}
fn default_obstacle_spawn_points() -> Vec<Vec3> {
    vec![
        Vec3::new(5.0, 0.0, -4.0),
        Vec3::new(15.0, 0.0, 4.0),
        Vec3::new(15.0, 0.0, -4.0),
    ]
}
fn default_obstacles_per_spawner() -> Vec<u32> {
    DEFAULT_OBSTACLES_PER_SPAWNER.to_vec()
}
fn default_obstacle_spawn_radius() -> f32 {
    OBSTACLE_SPAWN_RADIUS
}
fn default_entrance_name() -> String {
    ENTRANCE_ANCHOR.to_string()
}
fn default_first_room_name() -> String {
    FIRST_ROOM_ANCHOR.to_string()
}
fn default_final_room_names() -> Vec<String> {
    FINAL_ROOM_ANCHORS.iter().map(|s| s.to_string()).collect()
}
fn default_anchors() -> BTreeMap<String, Vec3> {
    BTreeMap::from([
        (ENTRANCE_ANCHOR.to_string(), Vec3::new(0.0, 0.0, 0.0)),
        (FIRST_ROOM_ANCHOR.to_string(), Vec3::new(10.0, 0.0, 0.0)),
        (FINAL_ROOM_ANCHORS[0].to_string(), Vec3::new(20.0, 0.0, 0.0)),
        (FINAL_ROOM_ANCHORS[1].to_string(), Vec3::new(20.0, 0.0, 10.0)),
        (FINAL_ROOM_ANCHORS[2].to_string(), Vec3::new(20.0, 0.0, -10.0)),
    ])
}
fn default_ground_offset() -> f32 {
    AGENT_GROUND_OFFSET
}
fn default_probe_height() -> f32 {
    GROUND_PROBE_HEIGHT
}
fn default_probe_range() -> f32 {
    GROUND_PROBE_RANGE
}
fn default_turn_rate() -> f32 {
    AGENT_TURN_RATE
}
fn default_move_speed() -> f32 {
    AGENT_MOVE_SPEED
}
fn default_stop_distance() -> f32 {
    AGENT_STOP_DISTANCE
}
fn default_burst_fast() -> u32 {
    BURST_FAST_COUNT
}
fn default_burst_buff() -> u32 {
    BURST_BUFF_COUNT
}
fn default_burst_radius() -> f32 {
    BURST_SPAWN_RADIUS
}
fn default_burst_interval() -> f32 {
    BURST_SPAWN_INTERVAL_SECS
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            tick_rate: default_tick_rate(),
            seed: default_seed(),
            waves: WaveTable::default(),
            enemy_spawn: EnemySpawnConfig::default(),
            obstacles: default_obstacles(),
            route: RouteNames::default(),
            anchors: default_anchors(),
            agent: AgentConfig::default(),
            mode: SpawnMode::default(),
        }
    }
}

impl Default for WaveTable {
    fn default() -> Self {
        Self {
            fast_counts: default_fast_counts(),
            buff_counts: default_buff_counts(),
        }
    }
}

impl Default for EnemySpawnConfig {
    fn default() -> Self {
        Self {
            spawn_points: default_enemy_spawn_points(),
            spawn_radius: default_enemy_spawn_radius(),
            spawn_interval_secs: default_spawn_interval(),
            wave_gap_secs: default_wave_gap(),
            fast_variant: default_fast_variant(),
            buff_variant: default_buff_variant(),
        }
    }
}

impl Default for ObstacleConfig {
    fn default() -> Self {
        Self {
            variants: default_rock_variants(),
            spawn_points: default_obstacle_spawn_points(),
            per_spawner: default_obstacles_per_spawner(),
            spawn_radius: default_obstacle_spawn_radius(),
        }
    }
}

impl Default for RouteNames {
    fn default() -> Self {
        Self {
            entrance: default_entrance_name(),
            first_room: default_first_room_name(),
            final_rooms: default_final_room_names(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            ground_offset: default_ground_offset(),
            probe_height: default_probe_height(),
            probe_range: default_probe_range(),
            turn_rate: default_turn_rate(),
            fast: AgentProfileConfig::default(),
            buff: AgentProfileConfig::default(),
        }
    }
}

impl Default for AgentProfileConfig {
    fn default() -> Self {
        Self {
            move_speed: default_move_speed(),
            stop_distance: default_stop_distance(),
        }
    }
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            fast_count: default_burst_fast(),
            buff_count: default_burst_buff(),
            spawn_radius: default_burst_radius(),
            spawn_interval_secs: default_burst_interval(),
        }
    }
}

impl EncounterConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    /// Seconds per fixed tick.
    pub fn dt(&self) -> f32 {
        1.0 / self.tick_rate as f32
    }

    /// Reject tunables that have no meaningful interpretation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid("tick_rate must be positive".into()));
        }

        let mut tunables = vec![
            ("enemy_spawn.spawn_radius", self.enemy_spawn.spawn_radius),
            (
                "enemy_spawn.spawn_interval_secs",
                self.enemy_spawn.spawn_interval_secs,
            ),
            ("enemy_spawn.wave_gap_secs", self.enemy_spawn.wave_gap_secs),
            ("agent.ground_offset", self.agent.ground_offset),
            ("agent.probe_height", self.agent.probe_height),
            ("agent.probe_range", self.agent.probe_range),
            ("agent.fast.move_speed", self.agent.fast.move_speed),
            ("agent.fast.stop_distance", self.agent.fast.stop_distance),
            ("agent.buff.move_speed", self.agent.buff.move_speed),
            ("agent.buff.stop_distance", self.agent.buff.stop_distance),
        ];
        if let Some(obstacles) = &self.obstacles {
            tunables.push(("obstacles.spawn_radius", obstacles.spawn_radius));
        }
        if let SpawnMode::Burst(burst) = &self.mode {
            tunables.push(("mode.spawn_radius", burst.spawn_radius));
            tunables.push(("mode.spawn_interval_secs", burst.spawn_interval_secs));
        }

        // ground_offset may legitimately be negative (sink into the surface).
        for (name, value) in tunables {
            let negative_ok = name == "agent.ground_offset";
            if !value.is_finite() || (!negative_ok && value < 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.agent.turn_rate) {
            return Err(ConfigError::Invalid(format!(
                "agent.turn_rate must be within 0..=1, got {}",
                self.agent.turn_rate
            )));
        }

        Ok(())
    }
}
