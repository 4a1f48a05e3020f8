//! Movement domain: components and physics layers for the arena and the
//! player stand-in the encounter targets.

use avian2d::prelude::*;
use bevy::prelude::*;

/// Physics layers for collision filtering
#[derive(PhysicsLayer, Clone, Copy, Debug, Default)]
pub enum GameLayer {
    #[default]
    Default,
    /// Ground surfaces (arena floor)
    Ground,
    /// Player character
    Player,
    /// The boss body
    Boss,
    /// Boss-owned projectiles and hands (damage the player)
    BossProjectile,
}

/// Half the player's collider height; the boss aims at "just above the
/// head" using this.
pub const PLAYER_HALF_HEIGHT: f32 = 21.0;

#[derive(Component, Debug)]
pub struct Player;

/// Target-eligibility flags the boss's targeting resolver reads.
#[derive(Component, Debug)]
pub struct PlayerStatus {
    pub alive: bool,
    /// Dead-and-spectating; never a valid target.
    pub ghost: bool,
}

impl Default for PlayerStatus {
    fn default() -> Self {
        Self {
            alive: true,
            ghost: false,
        }
    }
}

impl PlayerStatus {
    pub fn targetable(&self) -> bool {
        self.alive && !self.ghost
    }
}

/// Stun debuff: while ticks remain the player cannot act, and the boss's
/// punish interrupt may trigger.
#[derive(Component, Debug, Default)]
pub struct Stunned {
    pub ticks: i32,
}

impl Stunned {
    pub fn is_active(&self) -> bool {
        self.ticks > 0
    }
}

#[derive(Component, Debug, Default)]
pub struct MovementState {
    pub on_ground: bool,
}

/// Marker for ground colliders
#[derive(Component, Debug)]
pub struct Ground;

/// Arena extents the simulation reads for ground contact; the boss's own
/// motion is integrated outside the physics engine.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ArenaBounds {
    pub floor_y: f32,
    pub half_width: f32,
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            floor_y: 0.0,
            half_width: 1600.0,
        }
    }
}

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,
    pub jump_velocity: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 320.0,
            accel: 3000.0,
            decel: 2600.0,
            jump_velocity: 680.0,
        }
    }
}
