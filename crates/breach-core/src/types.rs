//! Fundamental geometric and simulation types.
//!
//! World space is Y-up: X/Z span the ground plane, Y is height.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of length `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt as f64;
    }
}

/// Project a vector onto the ground plane (drop the vertical component).
pub fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z)
}

/// Distance between two points measured on the ground plane only.
pub fn horizontal_distance(a: Vec3, b: Vec3) -> f32 {
    flatten(b - a).length()
}

/// Convert a duration in seconds into whole ticks at `tick_rate` Hz.
/// Rounds to the nearest tick; negative or non-finite input yields 0.
pub fn secs_to_ticks(secs: f32, tick_rate: u32) -> u64 {
    let ticks = (secs * tick_rate as f32).round();
    if ticks.is_finite() && ticks > 0.0 {
        ticks as u64
    } else {
        0
    }
}
