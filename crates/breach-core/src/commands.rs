//! Commands sent from the outside world to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimCommand {
    /// Start the configured encounter timeline.
    StartEncounter,
    /// Freeze the simulation (time scale 0).
    Pause,
    /// Unfreeze the simulation.
    Resume,
    /// Apply an external impulse (horizontal velocity change, m/s) and an
    /// optional yaw rate change (rad/s) to an agent's body.
    Push {
        agent: u32,
        impulse: Vec3,
        #[serde(default)]
        yaw: f32,
    },
    /// Destroy an agent, e.g. when it is shot.
    Kill { agent: u32 },
}
