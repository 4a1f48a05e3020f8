//! Boss domain: attack states and per-phase attack pools.

use serde::{Deserialize, Serialize};

use crate::combat::ScatterKind;

/// Attacks the shuffled bag can draw. A subset of [`BossState`]: the
/// entrance, phase transition, stun punish, and slam are only ever entered
/// by forced or chained transitions, never drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackId {
    HoveringForSlam,
    WavyShotCircle,
    WavyShotFlight,
    GrabbyHands,
    RandomStuff,
}

pub const PHASE_ONE_ATTACKS: &[AttackId] = &[
    AttackId::HoveringForSlam,
    AttackId::WavyShotCircle,
    AttackId::WavyShotFlight,
    AttackId::GrabbyHands,
];

pub const PHASE_TWO_ATTACKS: &[AttackId] = &[
    AttackId::HoveringForSlam,
    AttackId::WavyShotCircle,
    AttackId::WavyShotFlight,
    AttackId::GrabbyHands,
    AttackId::RandomStuff,
];

pub fn attack_pool(phase_two: bool) -> &'static [AttackId] {
    if phase_two {
        PHASE_TWO_ATTACKS
    } else {
        PHASE_ONE_ATTACKS
    }
}

/// The boss's attack mode. Each variant carries the scratch state its
/// handler needs, so no field is ever reinterpreted across states.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum BossState {
    /// Entrance descent; never re-entered.
    Opening,
    /// Escalation at the life threshold; entered at most once.
    PhaseTransition,
    /// Forced punish while the target is stunned.
    StunPunish,
    /// Sinusoidal weave above the target before a slam.
    HoveringForSlam {
        /// Sine phase seed captured from the entry x-offset.
        theta_offset: f32,
        /// Randomized hover length in ticks.
        duration: i32,
    },
    /// Gravity-driven drop onto the target; only entered by chaining.
    SlamWithShockwave {
        /// 0 rising, 1 committed to the fall, 2 bounce spent.
        bounce: u8,
    },
    /// Telegraphed radial burst.
    WavyShotCircle {
        /// Second burst already fired (nightmare phase two only).
        repeated: bool,
    },
    /// Eased orbit around the target with periodic aimed shots.
    WavyShotFlight {
        /// Total signed sweep of the orbit.
        total_rotate: f32,
        /// Bearing at orbit entry.
        circle_start: f32,
    },
    /// Hover and send grabbing hands after the target.
    GrabbyHands {
        /// Randomized tick at which poised hands are told to charge.
        grab_delay: i32,
    },
    /// Ballistic scatter barrage; phase two only.
    RandomStuff {
        /// Variant rolled for the current volley.
        shot_kind: ScatterKind,
    },
}

impl BossState {
    /// Fresh state for a bag draw, scratch fields at their defaults.
    pub fn from_attack(id: AttackId) -> Self {
        match id {
            AttackId::HoveringForSlam => BossState::HoveringForSlam {
                theta_offset: 0.0,
                duration: 0,
            },
            AttackId::WavyShotCircle => BossState::WavyShotCircle { repeated: false },
            AttackId::WavyShotFlight => BossState::WavyShotFlight {
                total_rotate: 0.0,
                circle_start: 0.0,
            },
            AttackId::GrabbyHands => BossState::GrabbyHands { grab_delay: 0 },
            AttackId::RandomStuff => BossState::RandomStuff {
                shot_kind: ScatterKind::default(),
            },
        }
    }

    pub fn attack_id(&self) -> Option<AttackId> {
        match self {
            BossState::HoveringForSlam { .. } => Some(AttackId::HoveringForSlam),
            BossState::WavyShotCircle { .. } => Some(AttackId::WavyShotCircle),
            BossState::WavyShotFlight { .. } => Some(AttackId::WavyShotFlight),
            BossState::GrabbyHands { .. } => Some(AttackId::GrabbyHands),
            BossState::RandomStuff { .. } => Some(AttackId::RandomStuff),
            _ => None,
        }
    }
}
