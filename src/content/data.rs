//! Data definitions for the encounter tuning RON file.
//!
//! These structs mirror assets/data/encounter_tuning.ron. Every field has a
//! shipped default so a partial (or missing) file still produces a playable
//! encounter. Difficulty-conditioned numbers do NOT live here; those are
//! the policy functions in the boss domain.

use serde::{Deserialize, Serialize};

/// Root tuning struct loaded at startup into a resource.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct EncounterTuning {
    pub targeting: TargetingTuning,
    pub entrance: EntranceTuning,
    pub phase: PhaseTuning,
    pub hover: HoverTuning,
    pub slam: SlamTuning,
    pub circle: CircleTuning,
    pub flight: FlightTuning,
    pub hands: HandsTuning,
    pub scatter: ScatterTuning,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TargetingTuning {
    /// Beyond this range the current target is abandoned.
    pub range_cap: f32,
    /// Ticks the boss lingers with no valid target before despawning.
    pub grace_ticks: i32,
    /// Per-tick upward drift while target-less.
    pub drift: f32,
}

impl Default for TargetingTuning {
    fn default() -> Self {
        Self {
            range_cap: 2400.0,
            grace_ticks: 60,
            drift: 0.4,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EntranceTuning {
    /// Spawn height above the target.
    pub spawn_height: f32,
    /// The descent anchor sits this far above the target's head.
    pub anchor_above: f32,
    pub initial_fall_speed: f32,
    /// Multiplicative per-tick fall acceleration.
    pub fall_accel: f32,
    /// End-lag after the entrance impact.
    pub impact_end_lag: i32,
    /// Ticks after which the descent stops waiting for the anchor.
    pub max_descent_ticks: i32,
    /// The descent is cut off this far below the anchor.
    pub depth_limit: f32,
}

impl Default for EntranceTuning {
    fn default() -> Self {
        Self {
            spawn_height: 700.0,
            anchor_above: 50.0,
            initial_fall_speed: 0.25,
            fall_accel: 1.04,
            impact_end_lag: 60,
            max_descent_ticks: 120,
            depth_limit: 800.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PhaseTuning {
    /// Life fraction at or below which the phase transition is forced.
    pub life_threshold: f32,
    /// Full duration of the transition animation window.
    pub transition_ticks: i32,
    /// Tick within the window at which the escalation commits.
    pub commit_tick: i32,
    pub defense_bonus: i32,
}

impl Default for PhaseTuning {
    fn default() -> Self {
        Self {
            life_threshold: 0.8,
            transition_ticks: 120,
            commit_tick: 60,
            defense_bonus: 15,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HoverTuning {
    pub wave_amp_x: f32,
    pub wave_amp_y: f32,
    pub x_half_period: f32,
    pub y_half_period: f32,
    /// Hover height above the target.
    pub height: f32,
    pub duration_min: i32,
    pub duration_max: i32,
    /// Phase-one hovers are this much shorter.
    pub phase_one_cut: i32,
}

impl Default for HoverTuning {
    fn default() -> Self {
        Self {
            wave_amp_x: 200.0,
            wave_amp_y: 30.0,
            x_half_period: 90.0,
            y_half_period: 45.0,
            height: 350.0,
            duration_min: 160,
            duration_max: 220,
            phase_one_cut: 55,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SlamTuning {
    /// The slam anchor sits this far above the target's head.
    pub anchor_above: f32,
    pub gravity: f32,
    /// Extra per-tick acceleration once falling.
    pub falling_bonus: f32,
    /// Per-tick horizontal velocity bleed.
    pub x_bleed: f32,
    /// Upward launch speed into the slam.
    pub launch_speed: f32,
    /// Upward bounce speed on a nightmare re-slam.
    pub bounce_speed: f32,
    pub depth_limit: f32,
    pub shockwave_speed: f32,
    pub shockwave_damage_frac: f32,
}

impl Default for SlamTuning {
    fn default() -> Self {
        Self {
            anchor_above: 250.0,
            gravity: 0.175,
            falling_bonus: 0.32,
            x_bleed: 0.97,
            launch_speed: 5.0,
            bounce_speed: 10.0,
            depth_limit: 1000.0,
            shockwave_speed: 3.0,
            shockwave_damage_frac: 0.1,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CircleTuning {
    pub shot_speed: f32,
    /// Telegraph spark ring radius at full telegraph.
    pub spark_radius: f32,
}

impl Default for CircleTuning {
    fn default() -> Self {
        Self {
            shot_speed: 4.0,
            spark_radius: 120.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FlightTuning {
    pub orbit_distance: f32,
    pub prep_ticks: i32,
    pub circling_ticks: i32,
    pub shot_interval: i32,
    pub shot_speed: f32,
    /// Shots lead the target by this many radians.
    pub aim_skew: f32,
    /// No shots in the first/last fraction of the orbit.
    pub shot_padding: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            orbit_distance: 350.0,
            prep_ticks: 60,
            circling_ticks: 280,
            shot_interval: 15,
            shot_speed: 4.0,
            aim_skew: std::f32::consts::PI / 10.0,
            shot_padding: 0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HandsTuning {
    pub hover_height: f32,
    pub hover_side: f32,
    pub approach_ticks: i32,
    pub grab_delay_min: i32,
    pub grab_delay_max: i32,
    pub release_tick: i32,
    pub hand_speed: f32,
    pub hand_damage_frac: f32,
    pub strong_hand_damage_frac: f32,
}

impl Default for HandsTuning {
    fn default() -> Self {
        Self {
            hover_height: 300.0,
            hover_side: 200.0,
            approach_ticks: 40,
            grab_delay_min: 90,
            grab_delay_max: 103,
            release_tick: 40,
            hand_speed: 4.0,
            hand_damage_frac: 0.1,
            strong_hand_damage_frac: 0.5,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ScatterTuning {
    /// Horizontal standoff from the target while firing.
    pub standoff: f32,
    pub open_ticks: i32,
    pub barrage_ticks: i32,
    /// Rotation eases toward the launch direction over this many ticks.
    pub rotation_ease_ticks: f32,
    pub speed_jitter_min: f32,
    pub speed_jitter_max: f32,
    /// Vertical margin for the above/below branch at wind-down.
    pub branch_margin: f32,
}

impl Default for ScatterTuning {
    fn default() -> Self {
        Self {
            standoff: 500.0,
            open_ticks: 60,
            barrage_ticks: 310,
            rotation_ease_ticks: 35.0,
            speed_jitter_min: 0.9,
            speed_jitter_max: 1.3,
            branch_margin: 100.0,
        }
    }
}
