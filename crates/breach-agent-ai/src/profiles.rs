//! Kind-specific movement profiles.
//!
//! Consolidates per-kind parameters for the navigation FSM.

use breach_core::config::AgentConfig;
use breach_core::enums::EnemyKind;

/// Movement profile for an enemy kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentProfile {
    /// Horizontal speed (m/s).
    pub move_speed: f32,
    /// Horizontal arrival threshold (m).
    pub stop_distance: f32,
    /// Fraction of the facing gap closed per tick.
    pub turn_rate: f32,
}

/// Get the movement profile for a given kind.
pub fn get_profile(kind: EnemyKind, config: &AgentConfig) -> AgentProfile {
    let profile = config.profile(kind);
    AgentProfile {
        move_speed: profile.move_speed,
        stop_distance: profile.stop_distance,
        turn_rate: config.turn_rate,
    }
}
