//! Boss domain: the boss entity record and the per-tick input snapshot.

use bevy::prelude::*;

use crate::boss::state::{AttackId, BossState};
use crate::content::EncounterTuning;
use crate::core::DifficultyFlags;

/// Animation frames in the boss sheet.
pub const FRAME_COUNT: u8 = 6;

pub const BOSS_MAX_HEALTH: f32 = 4400.0;
pub const BOSS_BASE_DAMAGE: f32 = 30.0;
pub const BOSS_BASE_DEFENSE: i32 = 10;

/// The sarcophagus. Exclusive owner of all mutable combat state; handlers
/// and the selector are the only writers.
#[derive(Component, Debug)]
pub struct Boss {
    pub position: Vec2,
    /// Distance per tick; integrated by the boss's own move step, not the
    /// physics engine.
    pub velocity: Vec2,
    pub rotation: f32,
    pub state: BossState,
    /// State-local tick counter; negative values count down end-lag.
    pub timer: i32,
    /// Latches true at the life threshold and never clears.
    pub phase_two: bool,
    /// Reference point captured at transition time (hover/slam anchor).
    pub lock_anchor: Vec2,
    pub last_choice: Option<AttackId>,
    /// The shuffled bag: attacks not yet used this cycle.
    pub available: Vec<AttackId>,
    pub frame: u8,
    pub frame_counter: u32,
    /// While set the boss passes through the arena floor.
    pub pass_through: bool,
    /// Motion-trail visual flag during fast descents.
    pub trail: bool,
    /// Ticks left before despawning with no valid target.
    pub time_left: i32,
    /// Ask the targeting resolver for a fresh nearest target next tick.
    pub retarget: bool,
    /// Replicated fields changed; broadcast before the next observable tick.
    pub dirty: bool,
    pub target: Option<Entity>,
    pub half_size: Vec2,
    pub damage: f32,
    pub base_defense: i32,
}

impl Boss {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            rotation: 0.0,
            state: BossState::Opening,
            timer: 0,
            phase_two: false,
            lock_anchor: Vec2::ZERO,
            last_choice: None,
            available: Vec::new(),
            frame: 0,
            frame_counter: 0,
            pass_through: true,
            trail: false,
            time_left: 60,
            retarget: false,
            dirty: false,
            target: None,
            half_size: Vec2::new(40.0, 55.0),
            damage: BOSS_BASE_DAMAGE,
            base_defense: BOSS_BASE_DEFENSE,
        }
    }

    pub fn bottom(&self) -> Vec2 {
        self.position - Vec2::Y * self.half_size.y
    }

    /// The mask on the lid face; telegraphs and shots originate here.
    pub fn mask_center(&self) -> Vec2 {
        self.position + Vec2::Y * 24.0
    }

    /// Flag replicated state for broadcast.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}

/// Snapshot of the resolved target for one tick.
#[derive(Debug, Clone, Copy)]
pub struct TargetView {
    pub center: Vec2,
    pub top: Vec2,
    pub stunned: bool,
}

/// Read-only input to the state handlers for one tick.
pub struct TickContext<'a> {
    pub target: TargetView,
    pub difficulty: DifficultyFlags,
    pub tuning: &'a EncounterTuning,
    pub is_host: bool,
    pub life_fraction: f32,
    /// Live grave hands linked to this boss; blocks stun preemption.
    pub live_hands: u32,
    /// The summon relic still drops on the entrance slam.
    pub first_kill_pending: bool,
}
