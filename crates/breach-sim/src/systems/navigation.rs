//! Navigation system — advances every walking agent by one fixed tick.
//!
//! Calls the agent FSM from breach-agent-ai, then writes the new transform
//! and stage back. Entering `Settled` starts the settle countdown.

use glam::Vec3;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use breach_core::components::{AlienAgent, Body, Transform};
use breach_core::config::AgentConfig;
use breach_core::constants::SETTLE_DELAY_TICKS;
use breach_core::enums::{AgentStage, AnimationCue, SettlePhase};
use breach_core::events::SimEvent;

use breach_agent_ai::fsm::{evaluate, AgentContext};
use breach_agent_ai::profiles::get_profile;
use breach_agent_ai::waypoints::WaypointChain;

/// Run navigation for all agents that have not settled.
pub fn run(
    world: &mut World,
    chain: &WaypointChain,
    config: &AgentConfig,
    rng: &mut ChaCha8Rng,
    dt: f32,
    events: &mut Vec<SimEvent>,
) {
    for (_entity, (agent, transform, body)) in
        world.query_mut::<(&mut AlienAgent, &mut Transform, &mut Body)>()
    {
        if agent.stage.is_settled() {
            continue;
        }

        let profile = get_profile(agent.kind, config);
        let ctx = AgentContext {
            stage: agent.stage,
            position: transform.position,
            forward: transform.forward,
            ground_y: agent.ground_y,
            final_room: agent.final_room,
            profile: &profile,
            chain,
            dt,
        };

        let update = evaluate(&ctx, rng);
        if update.halted {
            if !agent.halted {
                log::warn!(
                    "Agent {} has no target in stage {:?}; halting",
                    agent.id,
                    agent.stage
                );
                agent.halted = true;
            }
            continue;
        }

        transform.position = update.position;
        transform.forward = update.forward;
        agent.final_room = update.final_room;

        if !update.stage_changed {
            continue;
        }
        agent.stage = update.new_stage;

        if agent.stage == AgentStage::Settled {
            agent.settle = SettlePhase::AwaitingTick {
                ticks_remaining: SETTLE_DELAY_TICKS,
            };
            body.velocity = Vec3::ZERO;
            body.angular_velocity = 0.0;

            let room = agent
                .final_room
                .and_then(|i| chain.final_room_name(i))
                .unwrap_or("unknown room")
                .to_string();
            log::info!("Agent {} reached {room} and is now pushable", agent.id);
            events.push(SimEvent::Animation {
                agent: agent.id,
                cue: AnimationCue::Stop,
            });
            events.push(SimEvent::AgentSettled {
                agent: agent.id,
                room,
            });
        }
    }
}
