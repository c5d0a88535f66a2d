//! Agent AI for BREACH.
//!
//! Implements the approach-and-settle navigation state machine, the waypoint
//! chain it walks, and per-kind movement profiles. No ECS dependency.

pub mod fsm;
pub mod profiles;
pub mod steering;
pub mod waypoints;

pub use breach_core as core;
