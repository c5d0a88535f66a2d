//! Obstacle wave manager.
//!
//! Owns the registry of live obstacles ("rocks"). The only mutation verbs are
//! `spawn_wave`, which replaces the whole registry, and `clear`. The registry
//! never holds obstacles from more than one wave.

use hecs::{Entity, World};
use rand::Rng;

use breach_core::config::ObstacleConfig;

use crate::world_setup::{planar_offset, spawn_obstacle, OffsetShape};

/// Outcome of one successful `spawn_wave`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleWave {
    /// Wave index after clamping.
    pub wave: usize,
    pub per_spawner: u32,
    pub total: usize,
}

#[derive(Debug)]
pub struct ObstacleField {
    config: ObstacleConfig,
    /// Wave the live obstacles belong to.
    wave: Option<usize>,
    live: Vec<Entity>,
}

impl ObstacleField {
    pub fn new(config: ObstacleConfig) -> Self {
        Self {
            config,
            wave: None,
            live: Vec::new(),
        }
    }

    /// Replace the live obstacles with a fresh randomized set for `wave_index`.
    /// Returns `None` (and leaves the registry untouched) if the configuration
    /// has nothing to spawn from.
    pub fn spawn_wave<R: Rng + ?Sized>(
        &mut self,
        world: &mut World,
        rng: &mut R,
        wave_index: usize,
    ) -> Option<ObstacleWave> {
        if self.config.variants.is_empty() {
            log::warn!("[obstacles] No obstacle variants assigned");
            return None;
        }
        if self.config.spawn_points.is_empty() {
            log::warn!("[obstacles] No obstacle spawn points assigned");
            return None;
        }
        if self.config.per_spawner.is_empty() {
            log::warn!("[obstacles] Per-spawner counts not set");
            return None;
        }

        let last = self.config.per_spawner.len() - 1;
        let wave = if wave_index > last {
            log::warn!(
                "[obstacles] Wave index {wave_index} is out of range (0..={last}); clamping"
            );
            last
        } else {
            wave_index
        };

        self.clear(world);

        let per_spawner = self.config.per_spawner[wave];
        let radius = self.config.spawn_radius;
        for &point in &self.config.spawn_points {
            for _ in 0..per_spawner {
                let variant = &self.config.variants[rng.gen_range(0..self.config.variants.len())];
                let position = point + planar_offset(rng, radius, OffsetShape::Square);
                self.live.push(spawn_obstacle(world, variant, position, wave));
            }
        }
        self.wave = Some(wave);

        let total = self.live.len();
        log::info!(
            "[obstacles] Spawned {total} obstacles ({per_spawner} per spawner) for wave {}",
            wave + 1
        );
        Some(ObstacleWave {
            wave,
            per_spawner,
            total,
        })
    }

    /// Destroy every tracked obstacle. No-op on an empty registry.
    pub fn clear(&mut self, world: &mut World) {
        for entity in self.live.drain(..) {
            // Already gone (e.g. destroyed by the player) is fine.
            let _ = world.despawn(entity);
        }
        self.wave = None;
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    pub fn live(&self) -> &[Entity] {
        &self.live
    }

    pub fn wave(&self) -> Option<usize> {
        self.wave
    }

    pub fn config(&self) -> &ObstacleConfig {
        &self.config
    }
}
