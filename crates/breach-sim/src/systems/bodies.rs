//! Body integration — applies external velocities (pushes) to transforms.
//!
//! Stand-in for the physics engine's response: linear and yaw velocity are
//! integrated and damped. Locked bodies never move vertically.

use glam::{Quat, Vec3};
use hecs::World;

use breach_core::components::{Body, Transform};
use breach_core::constants::{BODY_ANGULAR_DAMPING, BODY_LINEAR_DAMPING, BODY_REST_SPEED};

pub fn run(world: &mut World, dt: f32) {
    for (_entity, (transform, body)) in world.query_mut::<(&mut Transform, &mut Body)>() {
        if body.lock_y {
            body.velocity.y = 0.0;
        }

        if body.velocity != Vec3::ZERO {
            let y = transform.position.y;
            transform.position += body.velocity * dt;
            if body.lock_y {
                transform.position.y = y;
            }
            body.velocity *= (1.0 - BODY_LINEAR_DAMPING * dt).max(0.0);
            if body.velocity.length() < BODY_REST_SPEED {
                body.velocity = Vec3::ZERO;
            }
        }

        if body.angular_velocity != 0.0 {
            let turn = Quat::from_rotation_y(body.angular_velocity * dt);
            transform.forward = (turn * transform.forward).normalize_or_zero();
            body.angular_velocity *= (1.0 - BODY_ANGULAR_DAMPING * dt).max(0.0);
            if body.angular_velocity.abs() < BODY_REST_SPEED {
                body.angular_velocity = 0.0;
            }
        }
    }
}
