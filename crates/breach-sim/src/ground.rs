//! Ground probes — the downward spatial query agents align their height with.
//!
//! The physics world is a black box; anything that can answer "what walkable
//! surface lies below this point" implements [`GroundProbe`].

use glam::{Vec2, Vec3};

use breach_core::config::AgentConfig;

pub trait GroundProbe {
    /// Height of the nearest walkable surface at or below `origin`, searching
    /// at most `max_distance` down. `None` if nothing is within range.
    fn probe_ground_height(&self, origin: Vec3, max_distance: f32) -> Option<f32>;
}

impl<F> GroundProbe for F
where
    F: Fn(Vec3, f32) -> Option<f32>,
{
    fn probe_ground_height(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        self(origin, max_distance)
    }
}

/// Infinite horizontal plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlatGround {
    pub height: f32,
}

impl GroundProbe for FlatGround {
    fn probe_ground_height(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        surface_in_range(self.height, origin.y, max_distance).then_some(self.height)
    }
}

/// Nothing to stand on anywhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGround;

impl GroundProbe for NoGround {
    fn probe_ground_height(&self, _origin: Vec3, _max_distance: f32) -> Option<f32> {
        None
    }
}

/// Axis-aligned rectangular surface on the ground plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundPatch {
    /// Minimum (x, z) corner.
    pub min: Vec2,
    /// Maximum (x, z) corner.
    pub max: Vec2,
    pub height: f32,
}

impl GroundPatch {
    pub fn contains(&self, x: f32, z: f32) -> bool {
        x >= self.min.x && x <= self.max.x && z >= self.min.y && z <= self.max.y
    }
}

/// Uneven terrain made of raised or sunken patches over an optional base plane.
#[derive(Debug, Clone, Default)]
pub struct TerrainPatches {
    pub base: Option<f32>,
    pub patches: Vec<GroundPatch>,
}

impl GroundProbe for TerrainPatches {
    fn probe_ground_height(&self, origin: Vec3, max_distance: f32) -> Option<f32> {
        self.patches
            .iter()
            .filter(|p| p.contains(origin.x, origin.z))
            .map(|p| p.height)
            .chain(self.base)
            .filter(|&h| surface_in_range(h, origin.y, max_distance))
            .fold(None, |best: Option<f32>, h| Some(best.map_or(h, |b| b.max(h))))
    }
}

fn surface_in_range(surface: f32, origin_y: f32, max_distance: f32) -> bool {
    surface <= origin_y && origin_y - surface <= max_distance
}

/// Probe from slightly above `position` and return the height an agent
/// should stand at, including the configured ground offset.
pub fn agent_ground_height(
    ground: &dyn GroundProbe,
    position: Vec3,
    config: &AgentConfig,
) -> Option<f32> {
    let origin = position + Vec3::Y * config.probe_height;
    ground
        .probe_ground_height(origin, config.probe_range)
        .map(|h| h + config.ground_offset)
}
