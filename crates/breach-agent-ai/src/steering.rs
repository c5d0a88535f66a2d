//! Ground-plane steering helpers.

use glam::Vec3;

use breach_core::types::{flatten, horizontal_distance};

/// Unit vector on the ground plane from `from` toward `to`; zero if they coincide.
pub fn planar_direction(from: Vec3, to: Vec3) -> Vec3 {
    flatten(to - from).normalize_or_zero()
}

/// Advance `position` toward `target` by at most `speed * dt` on the ground
/// plane, then pin the height to `ground_y`. Returns the new position and
/// the movement direction.
pub fn step_toward(position: Vec3, target: Vec3, speed: f32, dt: f32, ground_y: f32) -> (Vec3, Vec3) {
    let direction = planar_direction(position, target);
    let travel = (speed * dt).min(horizontal_distance(position, target));
    let mut next = position + direction * travel;
    next.y = ground_y;
    (next, direction)
}

/// Exponentially smooth `current` toward `desired`, closing `rate` of the gap.
pub fn smooth_facing(current: Vec3, desired: Vec3, rate: f32) -> Vec3 {
    let blended = current.lerp(desired, rate).normalize_or_zero();
    if blended == Vec3::ZERO {
        desired
    } else {
        blended
    }
}
