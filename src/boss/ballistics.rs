//! Boss domain: closed-form ballistic launch solve for the scatter
//! barrage.

use bevy::prelude::*;

/// Default upward launch speed when no arc correction applies.
pub const DEFAULT_LAUNCH_VY: f32 = 10.0;
/// The arc is biased to crest this far above a target that sits higher
/// than the boss.
const ARC_CLEARANCE: f32 = 300.0;
/// Floor on the solved time of flight; keeps horizontal speed bounded.
const MIN_FLIGHT_TICKS: f32 = 1.0;
/// Time of flight used by the degenerate-input fallback lob.
const FALLBACK_FLIGHT_TICKS: f32 = 60.0;

/// Solve the launch velocity that lands a projectile `offset` away under
/// per-tick `gravity` (positive magnitude, pulling -y).
///
/// The vertical component defaults to [`DEFAULT_LAUNCH_VY`]; when the
/// target is above, a steeper launch that crests [`ARC_CLEARANCE`] over it
/// replaces the default only if it exceeds it. Time of flight comes from
/// the kinematic quadratic, taking the descending intersection; the
/// horizontal component is displacement over time.
///
/// Degenerate inputs (non-positive or non-finite gravity, a negative
/// discriminant from a target too far above, a vanishing time of flight)
/// never produce non-finite output: the solve clamps and falls back to a
/// fixed lob instead.
pub fn launch_velocity(offset: Vec2, gravity: f32) -> Vec2 {
    let fallback = Vec2::new(offset.x / FALLBACK_FLIGHT_TICKS, DEFAULT_LAUNCH_VY);

    if !gravity.is_finite() || gravity <= f32::EPSILON {
        warn!("degenerate launch gravity {gravity}; using fallback lob");
        return fallback;
    }

    let mut vy = DEFAULT_LAUNCH_VY;
    if offset.y > 0.0 {
        let arc_top = offset.y + ARC_CLEARANCE;
        let candidate = (arc_top * gravity).sqrt() / 1.5;
        if candidate > vy {
            vy = candidate;
        }
    }

    let disc = vy * vy - 2.0 * gravity * offset.y;
    let disc = if disc < 0.0 {
        warn!("launch arc cannot reach target {} above; clamping", offset.y);
        0.0
    } else {
        disc
    };

    let time = ((vy + disc.sqrt()) / gravity).max(MIN_FLIGHT_TICKS);
    let solved = Vec2::new(offset.x / time, vy);
    if solved.is_finite() { solved } else { fallback }
}
