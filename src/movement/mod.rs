//! Movement domain: the arena and the player stand-in the boss targets.

mod components;
mod systems;

pub use components::{
    ArenaBounds, GameLayer, Ground, MovementState, MovementTuning, PLAYER_HALF_HEIGHT, Player,
    PlayerStatus, Stunned,
};

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::core::gameplay_active;
use crate::movement::systems::{apply_player_input, spawn_arena, spawn_player, tick_stun};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(Gravity(Vec2::NEG_Y * 1800.0))
            .init_resource::<ArenaBounds>()
            .init_resource::<MovementTuning>()
            .add_systems(Startup, (spawn_arena, spawn_player).chain())
            .add_systems(Update, apply_player_input.run_if(gameplay_active))
            .add_systems(FixedUpdate, tick_stun.run_if(gameplay_active));
    }
}
