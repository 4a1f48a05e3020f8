//! Combat domain: spawn bundles for boss-owned projectiles and minions.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::combat::components::{
    GraveHand, HandMode, Lifetime, Projectile, ProjectileKind, ScatterKind, SpiritCompanion,
    TickVelocity,
};
use crate::movement::GameLayer;

fn projectile_color(kind: &ProjectileKind) -> Color {
    match kind {
        ProjectileKind::WaveShot { .. } => Color::srgb(0.55, 0.9, 0.8),
        ProjectileKind::Shockwave => Color::srgb(0.8, 0.6, 0.3),
        ProjectileKind::Scatter(ScatterKind::Bomb) => Color::srgb(0.3, 0.3, 0.3),
        ProjectileKind::Scatter(ScatterKind::Skull) => Color::srgb(0.9, 0.9, 0.85),
        ProjectileKind::Scatter(_) => Color::srgb(0.7, 0.5, 0.9),
    }
}

fn projectile_size(kind: &ProjectileKind) -> Vec2 {
    match kind {
        ProjectileKind::WaveShot { .. } => Vec2::splat(16.0),
        ProjectileKind::Shockwave => Vec2::new(48.0, 24.0),
        ProjectileKind::Scatter(_) => Vec2::splat(20.0),
    }
}

fn projectile_lifetime(kind: &ProjectileKind) -> i32 {
    match kind {
        ProjectileKind::WaveShot { .. } => 600,
        ProjectileKind::Shockwave => 180,
        ProjectileKind::Scatter(_) => 600,
    }
}

/// Spawn one boss projectile moving at `velocity` (distance per tick).
pub fn spawn_projectile(
    commands: &mut Commands,
    kind: ProjectileKind,
    origin: Vec2,
    velocity: Vec2,
    damage: f32,
) -> Entity {
    let size = projectile_size(&kind);
    commands
        .spawn((
            Projectile { kind, damage },
            TickVelocity(velocity),
            Lifetime(projectile_lifetime(&kind)),
            Sprite {
                color: projectile_color(&kind),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_xyz(origin.x, origin.y, 1.0),
            RigidBody::Kinematic,
            Collider::rectangle(size.x, size.y),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::BossProjectile, [GameLayer::Player]),
        ))
        .id()
}

/// Spawn a grave hand linked to `owner`.
pub fn spawn_hand(
    commands: &mut Commands,
    owner: Entity,
    origin: Vec2,
    velocity: Vec2,
    mode: HandMode,
    sweep: f32,
    damage: f32,
) -> Entity {
    commands
        .spawn((
            GraveHand {
                owner,
                mode,
                sweep,
                age: 0,
                damage,
            },
            TickVelocity(velocity),
            Lifetime(900),
            Sprite {
                color: Color::srgb(0.4, 0.8, 0.5),
                custom_size: Some(Vec2::splat(30.0)),
                ..default()
            },
            Transform::from_xyz(origin.x, origin.y, 1.0),
            RigidBody::Kinematic,
            Collider::rectangle(30.0, 30.0),
            Sensor,
            CollisionEventsEnabled,
            CollisionLayers::new(GameLayer::BossProjectile, [GameLayer::Player]),
        ))
        .id()
}

/// Spawn the phase-two spirit companion.
pub fn spawn_spirit(commands: &mut Commands, owner: Entity, origin: Vec2) -> Entity {
    commands
        .spawn((
            SpiritCompanion { owner },
            TickVelocity(Vec2::ZERO),
            Sprite {
                color: Color::srgba(0.6, 0.9, 0.8, 0.7),
                custom_size: Some(Vec2::splat(40.0)),
                ..default()
            },
            Transform::from_xyz(origin.x, origin.y, 1.0),
            RigidBody::Kinematic,
            Collider::circle(20.0),
            Sensor,
            CollisionLayers::new(GameLayer::BossProjectile, [GameLayer::Player]),
        ))
        .id()
}
