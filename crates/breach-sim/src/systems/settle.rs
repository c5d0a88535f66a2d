//! Settle finalization — one tick after arrival, re-probe the ground, snap to
//! it and lock the vertical axis for good.

use glam::Vec3;
use hecs::World;

use breach_core::components::{AlienAgent, Body, Transform};
use breach_core::config::AgentConfig;
use breach_core::enums::SettlePhase;

use crate::ground::{agent_ground_height, GroundProbe};

pub fn run(world: &mut World, ground: &dyn GroundProbe, config: &AgentConfig) {
    for (_entity, (agent, transform, body)) in
        world.query_mut::<(&mut AlienAgent, &mut Transform, &mut Body)>()
    {
        let SettlePhase::AwaitingTick { ticks_remaining } = agent.settle else {
            continue;
        };

        let remaining = ticks_remaining.saturating_sub(1);
        if remaining > 0 {
            agent.settle = SettlePhase::AwaitingTick {
                ticks_remaining: remaining,
            };
            continue;
        }

        match agent_ground_height(ground, transform.position, config) {
            Some(y) => {
                agent.ground_y = y;
                transform.position.y = y;
            }
            None => log::debug!(
                "No ground below settled agent {}; keeping height {}",
                agent.id,
                transform.position.y
            ),
        }

        body.lock_y = true;
        body.velocity = Vec3::ZERO;
        body.angular_velocity = 0.0;
        agent.settle = SettlePhase::Locked;
    }
}
