//! Encounter simulation for BREACH.
//!
//! Owns the hecs ECS world, runs the wave timeline, agent navigation and
//! body integration at a fixed tick rate, and produces `EncounterSnapshot`s.

pub mod engine;
pub mod error;
pub mod ground;
pub mod obstacles;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use breach_core as core;
pub use engine::SimulationEngine;

#[cfg(test)]
mod tests;
