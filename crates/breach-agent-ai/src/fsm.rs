//! Agent navigation finite state machine.
//!
//! Pure function that advances one agent by one fixed tick: walk toward the
//! current stage's waypoint on the ground plane, then apply at most one stage
//! transition. No ECS dependency; operates on plain data.

use glam::Vec3;
use rand::Rng;

use breach_core::constants::FACING_MIN_DIRECTION;
use breach_core::enums::AgentStage;
use breach_core::types::horizontal_distance;

use crate::profiles::AgentProfile;
use crate::steering::{smooth_facing, step_toward};
use crate::waypoints::WaypointChain;

/// Input to the navigation FSM for a single agent.
pub struct AgentContext<'a> {
    pub stage: AgentStage,
    pub position: Vec3,
    pub forward: Vec3,
    /// Cached ground height used for the vertical override.
    pub ground_y: f32,
    pub final_room: Option<usize>,
    pub profile: &'a AgentProfile,
    pub chain: &'a WaypointChain,
    pub dt: f32,
}

/// Output from the navigation FSM.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentUpdate {
    pub new_stage: AgentStage,
    pub position: Vec3,
    pub forward: Vec3,
    pub final_room: Option<usize>,
    pub stage_changed: bool,
    /// The current stage has no resolved target; the agent did not move.
    pub halted: bool,
}

/// Evaluate the FSM for one agent.
pub fn evaluate<R: Rng + ?Sized>(ctx: &AgentContext, rng: &mut R) -> AgentUpdate {
    let no_change = AgentUpdate {
        new_stage: ctx.stage,
        position: ctx.position,
        forward: ctx.forward,
        final_room: ctx.final_room,
        stage_changed: false,
        halted: false,
    };

    // Settled is terminal
    if ctx.stage.is_settled() {
        return no_change;
    }

    let Some(target) = ctx.chain.target(ctx.stage, ctx.final_room) else {
        return AgentUpdate {
            halted: true,
            ..no_change
        };
    };

    let (position, direction) = step_toward(
        ctx.position,
        target.position,
        ctx.profile.move_speed,
        ctx.dt,
        ctx.ground_y,
    );

    let forward = if direction.length() > FACING_MIN_DIRECTION {
        smooth_facing(ctx.forward, direction, ctx.profile.turn_rate)
    } else {
        ctx.forward
    };

    let mut update = AgentUpdate {
        position,
        forward,
        ..no_change
    };

    if horizontal_distance(position, target.position) <= ctx.profile.stop_distance {
        update.new_stage = ctx.stage.next();
        update.stage_changed = true;

        // The final room is drawn once, on leaving the first room, and kept.
        if update.new_stage == AgentStage::SeekingFinalRoom && update.final_room.is_none() {
            update.final_room = ctx.chain.choose_final_room(rng);
        }
    }

    update
}
