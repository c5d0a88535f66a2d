//! Simulation constants and tuning defaults.

/// Default fixed-update rate (Hz).
pub const DEFAULT_TICK_RATE: u32 = 50;

/// Default RNG seed.
pub const DEFAULT_SEED: u64 = 42;

// --- Agents ---

/// Horizontal walking speed (m/s).
pub const AGENT_MOVE_SPEED: f32 = 3.0;

/// Horizontal distance at which a waypoint counts as reached (m).
pub const AGENT_STOP_DISTANCE: f32 = 0.3;

/// Height added on top of a probed ground surface (m).
pub const AGENT_GROUND_OFFSET: f32 = 0.05;

/// How far above the agent the downward ground probe starts (m).
pub const GROUND_PROBE_HEIGHT: f32 = 1.0;

/// Maximum downward reach of a ground probe (m).
pub const GROUND_PROBE_RANGE: f32 = 5.0;

/// Fraction of the remaining facing gap closed each tick.
pub const AGENT_TURN_RATE: f32 = 0.15;

/// Movement directions shorter than this leave the facing untouched.
pub const FACING_MIN_DIRECTION: f32 = 0.01;

/// Fixed ticks a settling agent waits before its final ground probe.
pub const SETTLE_DELAY_TICKS: u32 = 1;

// --- Bodies ---

/// Linear damping applied to pushed bodies (1/s).
pub const BODY_LINEAR_DAMPING: f32 = 4.0;

/// Angular damping applied to pushed bodies (1/s).
pub const BODY_ANGULAR_DAMPING: f32 = 4.0;

/// Velocities below this are snapped to zero (m/s).
pub const BODY_REST_SPEED: f32 = 1e-3;

// --- Enemy waves ---

/// Type-A (fast) enemies per wave.
pub const DEFAULT_FAST_COUNTS: [u32; 6] = [3, 5, 7, 0, 4, 6];

/// Type-B (buff) enemies per wave.
pub const DEFAULT_BUFF_COUNTS: [u32; 6] = [0, 0, 0, 5, 2, 5];

/// Planar offset bound around an enemy spawn point (m).
pub const ENEMY_SPAWN_RADIUS: f32 = 3.0;

/// Delay between consecutive enemy spawns (s).
pub const ENEMY_SPAWN_INTERVAL_SECS: f32 = 1.0;

/// Delay between the end of one wave and the start of the next (s).
pub const WAVE_GAP_SECS: f32 = 5.0;

// --- Burst spawner ---

pub const BURST_FAST_COUNT: u32 = 3;
pub const BURST_BUFF_COUNT: u32 = 2;
pub const BURST_SPAWN_RADIUS: f32 = 2.0;
pub const BURST_SPAWN_INTERVAL_SECS: f32 = 1.0;

// --- Obstacles ---

/// Planar offset bound around an obstacle spawn point (m).
pub const OBSTACLE_SPAWN_RADIUS: f32 = 1.0;

/// Obstacles per obstacle spawn point, by wave.
pub const DEFAULT_OBSTACLES_PER_SPAWNER: [u32; 6] = [2, 3, 3, 4, 4, 5];

/// Number of rock variants in the default arena.
pub const DEFAULT_ROCK_VARIANTS: usize = 13;

// --- Scene anchors ---

pub const ENTRANCE_ANCHOR: &str = "EntranceTrigger";
pub const FIRST_ROOM_ANCHOR: &str = "Room1Trigger";
pub const FINAL_ROOM_ANCHORS: [&str; 3] = ["Room2Trigger", "Room3Trigger", "Room4Trigger"];

// --- Animation clips ---

pub const WALK_CLIP: &str = "Alien Walk";
pub const STOP_CLIP: &str = "Alien Stop";
