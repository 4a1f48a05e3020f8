//! Boss domain: the shared approach-to-position motion primitive.

use bevy::prelude::*;

/// Exponentially blend `velocity` toward `to`. Beyond `slowdown_radius`
/// the far regime applies (`max_speed` at blend `accel`); inside it the
/// near regime applies (`low_speed` at blend `decel`), giving a natural
/// ease-in/ease-out. Speeds are distance per tick.
pub fn steer_toward(
    velocity: Vec2,
    from: Vec2,
    to: Vec2,
    accel: f32,
    max_speed: f32,
    low_speed: f32,
    decel: f32,
    slowdown_radius: f32,
) -> Vec2 {
    let offset = to - from;
    let dir = offset.normalize_or_zero();
    if offset.length() > slowdown_radius {
        velocity.lerp(dir * max_speed, accel)
    } else {
        velocity.lerp(dir * low_speed, decel)
    }
}

/// Signed smallest rotation carrying direction `b` onto direction `a`.
pub fn rotation_difference(a: Vec2, b: Vec2) -> f32 {
    use std::f32::consts::{PI, TAU};
    (a.to_angle() - b.to_angle() + PI).rem_euclid(TAU) - PI
}
