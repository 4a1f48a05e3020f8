//! Movement domain: arena setup and player locomotion.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::movement::components::{
    ArenaBounds, GameLayer, Ground, MovementState, MovementTuning, Player, PlayerStatus, Stunned,
};

pub(crate) fn spawn_arena(mut commands: Commands, bounds: Res<ArenaBounds>) {
    commands.spawn((
        Ground,
        Sprite {
            color: Color::srgb(0.25, 0.22, 0.2),
            custom_size: Some(Vec2::new(bounds.half_width * 2.0, 40.0)),
            ..default()
        },
        Transform::from_xyz(0.0, bounds.floor_y - 20.0, 0.0),
        RigidBody::Static,
        Collider::rectangle(bounds.half_width * 2.0, 40.0),
        CollisionLayers::new(GameLayer::Ground, [GameLayer::Player]),
    ));

    commands.spawn(Camera2d);
}

pub(crate) fn spawn_player(mut commands: Commands, bounds: Res<ArenaBounds>) {
    commands.spawn((
        Player,
        PlayerStatus::default(),
        Stunned::default(),
        MovementState::default(),
        crate::combat::Health::new(400.0),
        Sprite {
            color: Color::srgb(0.9, 0.85, 0.7),
            custom_size: Some(Vec2::new(24.0, 42.0)),
            ..default()
        },
        Transform::from_xyz(0.0, bounds.floor_y + 21.0, 0.0),
        RigidBody::Dynamic,
        Collider::rectangle(24.0, 42.0),
        CollisionEventsEnabled,
        CollisionLayers::new(
            GameLayer::Player,
            [GameLayer::Ground, GameLayer::BossProjectile, GameLayer::Boss],
        ),
        LinearVelocity::default(),
        LockedAxes::ROTATION_LOCKED,
        GravityScale(1.0),
    ));
}

pub(crate) fn apply_player_input(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    tuning: Res<MovementTuning>,
    bounds: Res<ArenaBounds>,
    mut query: Query<
        (
            &Transform,
            &mut MovementState,
            &mut LinearVelocity,
            &PlayerStatus,
            &Stunned,
        ),
        With<Player>,
    >,
) {
    let dt = time.delta_secs();

    for (transform, mut state, mut velocity, status, stunned) in &mut query {
        state.on_ground = transform.translation.y <= bounds.floor_y + 22.0 && velocity.y <= 0.01;

        // Stun suppresses every control input for its duration.
        if !status.alive || stunned.is_active() {
            continue;
        }

        let mut axis = 0.0;
        if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
            axis -= 1.0;
        }
        if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
            axis += 1.0;
        }

        let target_vx = axis * tuning.max_speed;
        if axis != 0.0 {
            let accel = tuning.accel * dt;
            if velocity.x < target_vx {
                velocity.x = (velocity.x + accel).min(target_vx);
            } else {
                velocity.x = (velocity.x - accel).max(target_vx);
            }
        } else {
            let decel = tuning.decel * dt;
            if velocity.x > 0.0 {
                velocity.x = (velocity.x - decel).max(0.0);
            } else {
                velocity.x = (velocity.x + decel).min(0.0);
            }
        }

        if state.on_ground && keyboard.just_pressed(KeyCode::Space) {
            velocity.y = tuning.jump_velocity;
        }
    }
}

pub(crate) fn tick_stun(mut query: Query<&mut Stunned>) {
    for mut stunned in &mut query {
        if stunned.ticks > 0 {
            stunned.ticks -= 1;
        }
    }
}
