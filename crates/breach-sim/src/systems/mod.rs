//! ECS systems that operate on the encounter world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! Per-entity state lives in components; the wave timeline carries its own resume point.

pub mod bodies;
pub mod navigation;
pub mod settle;
pub mod snapshot;
pub mod wave_orchestrator;
