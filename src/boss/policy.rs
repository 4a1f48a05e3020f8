//! Boss domain: pure difficulty-to-tuning policy.
//!
//! Every number the encounter conditions on difficulty flags lives here,
//! so handlers stay free of flag chains.

use crate::core::DifficultyFlags;

/// Shots in one radial burst.
pub fn radial_shot_count(flags: &DifficultyFlags) -> usize {
    if !flags.expert {
        6
    } else if !flags.nightmare {
        8
    } else if !flags.apex() {
        10
    } else {
        12
    }
}

/// End-lag ticks after the final slam landing.
pub fn slam_end_lag(flags: &DifficultyFlags) -> i32 {
    if flags.apex() {
        80
    } else if flags.nightmare {
        100
    } else {
        120
    }
}

/// Whether the slam gets another bounce before committing to end-lag.
pub fn slam_can_bounce(flags: &DifficultyFlags, bounce: u8) -> bool {
    flags.nightmare && bounce < 2
}

/// Horizontal homing applied during the slam fall.
pub fn slam_drift_step(flags: &DifficultyFlags, bounce: u8) -> f32 {
    if !flags.nightmare {
        0.0
    } else if bounce > 1 {
        0.35
    } else {
        0.2
    }
}

/// Telegraph length before the radial burst.
pub fn circle_telegraph_ticks(flags: &DifficultyFlags) -> i32 {
    if flags.apex() { 60 } else { 70 }
}

/// End-lag after a radial burst. The first pass recovers fast; the
/// repeat burst earns the longer lag.
pub fn circle_end_lag(flags: &DifficultyFlags, first_pass: bool) -> i32 {
    if flags.apex() || first_pass { 20 } else { 50 }
}

/// The burst ends the state immediately, skipping end-lag entirely.
pub fn circle_skips_end_lag(flags: &DifficultyFlags, phase_two: bool) -> bool {
    flags.apex() || !phase_two
}

/// A second burst follows the first.
pub fn circle_repeats(flags: &DifficultyFlags, phase_two: bool) -> bool {
    flags.nightmare && phase_two
}

/// Ticks between scatter volleys.
pub fn scatter_cadence(flags: &DifficultyFlags) -> i32 {
    if flags.apex() { 20 } else { 25 }
}

/// A third, stronger hand joins the pair.
pub fn spawns_extra_hand(flags: &DifficultyFlags) -> bool {
    flags.nightmare
}

/// The entrance slam drops the re-summon relic.
pub fn drops_summon_relic(flags: &DifficultyFlags, first_kill_pending: bool) -> bool {
    flags.nightmare && first_kill_pending
}
