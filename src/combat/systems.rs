//! Combat domain: projectile flight, grave-hand behavior, damage, cleanup.

use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::components::{
    Defense, GraveHand, HAND_STUN_TICKS, HandMode, Health, Lifetime, Projectile, ProjectileKind,
    SpiritCompanion, TickVelocity,
};
use crate::combat::events::{BossDefeatedEvent, DamageEvent, ItemDropEvent, PlaySoundEvent, SoundCue};
use crate::core::WorldProgress;
use crate::movement::{ArenaBounds, Player, PlayerStatus, Stunned};

/// Integrate per-tick velocities and apply per-kind flight behavior.
pub(crate) fn projectile_flight(
    bounds: Res<ArenaBounds>,
    mut query: Query<(
        &Projectile,
        &Lifetime,
        &mut TickVelocity,
        &mut Transform,
    )>,
) {
    for (projectile, lifetime, mut velocity, mut transform) in &mut query {
        match projectile.kind {
            ProjectileKind::WaveShot { aimed } => {
                // Perpendicular wiggle around the travel direction.
                let dir = velocity.0.normalize_or_zero();
                let perp = Vec2::new(-dir.y, dir.x);
                let wave_rate = if aimed { 0.25 } else { 0.15 };
                let amp = if aimed { 1.5 } else { 2.5 };
                let wiggle = perp * (lifetime.0 as f32 * wave_rate).sin() * amp;
                let step = velocity.0 + wiggle;
                transform.translation.x += step.x;
                transform.translation.y += step.y;
            }
            ProjectileKind::Shockwave => {
                transform.translation.x += velocity.0.x;
                transform.translation.y = bounds.floor_y + 12.0;
            }
            ProjectileKind::Scatter(kind) => {
                velocity.0.y -= kind.gravity();
                transform.translation.x += velocity.0.x;
                transform.translation.y += velocity.0.y;
            }
        }
    }
}

/// Grave-hand mini state machine: sweep out, hold poised, charge on
/// command. The lunge variant (stun punish) skips straight at the target.
pub(crate) fn update_hands(
    player_query: Query<&Transform, With<Player>>,
    mut hand_query: Query<(&mut GraveHand, &mut TickVelocity, &Transform), Without<Player>>,
) {
    let Some(player_transform) = player_query.iter().next() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (mut hand, mut velocity, transform) in &mut hand_query {
        hand.age += 1;
        let pos = transform.translation.truncate();
        let to_player = (player_pos - pos).normalize_or_zero();

        match hand.mode {
            HandMode::Sweep => {
                // Curl outward along the sweep direction, then hold.
                let angle = hand.sweep * 0.05;
                velocity.0 = Vec2::from_angle(angle).rotate(velocity.0);
                if hand.age >= 60 {
                    hand.mode = HandMode::Poised;
                }
            }
            HandMode::Poised => {
                velocity.0 *= 0.9;
            }
            HandMode::Charge => {
                velocity.0 = velocity.0.lerp(to_player * 12.0, 0.1);
            }
            HandMode::Lunge => {
                velocity.0 = velocity.0.lerp(to_player * 8.0, 0.08);
            }
        }
    }
}

pub(crate) fn integrate_hands(mut query: Query<(&TickVelocity, &mut Transform), With<GraveHand>>) {
    for (velocity, mut transform) in &mut query {
        transform.translation.x += velocity.0.x;
        transform.translation.y += velocity.0.y;
    }
}

/// Boss-owned projectiles and hands hitting the player.
pub(crate) fn detect_contact(
    mut commands: Commands,
    mut collision_events: MessageReader<CollisionStart>,
    mut damage_events: MessageWriter<DamageEvent>,
    projectile_query: Query<&Projectile>,
    hand_query: Query<&GraveHand>,
    mut player_query: Query<(Entity, &PlayerStatus, &mut Stunned), With<Player>>,
) {
    for event in collision_events.read() {
        let pairs = [
            (event.collider1, event.collider2),
            (event.collider2, event.collider1),
        ];

        for (hitter, target) in pairs {
            let Ok((player_entity, status, mut stunned)) = player_query.get_mut(target) else {
                continue;
            };
            if !status.alive {
                continue;
            }

            if let Ok(projectile) = projectile_query.get(hitter) {
                damage_events.write(DamageEvent {
                    target: player_entity,
                    amount: projectile.damage,
                });
                // Shockwaves sweep on; everything else is spent on impact.
                if !matches!(projectile.kind, ProjectileKind::Shockwave) {
                    commands.entity(hitter).despawn();
                }
            } else if let Ok(hand) = hand_query.get(hitter) {
                damage_events.write(DamageEvent {
                    target: player_entity,
                    amount: hand.damage,
                });
                stunned.ticks = stunned.ticks.max(HAND_STUN_TICKS);
                commands.entity(hitter).despawn();
            }
        }
    }
}

/// Range of the player's strike.
const STRIKE_RANGE: f32 = 80.0;
const STRIKE_DAMAGE: f32 = 32.0;

/// Minimal strike input so the encounter can be pushed through its
/// phases: a short-range hit on the boss.
pub(crate) fn player_attack(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut damage_events: MessageWriter<DamageEvent>,
    player_query: Query<(&Transform, &PlayerStatus, &Stunned), With<Player>>,
    boss_query: Query<(Entity, &crate::boss::Boss)>,
) {
    if !keyboard.just_pressed(KeyCode::KeyJ) {
        return;
    }
    let Some((player_transform, status, stunned)) = player_query.iter().next() else {
        return;
    };
    if !status.alive || stunned.is_active() {
        return;
    }
    let player_pos = player_transform.translation.truncate();

    for (entity, boss) in &boss_query {
        if boss.position.distance(player_pos) <= STRIKE_RANGE + boss.half_size.x {
            damage_events.write(DamageEvent {
                target: entity,
                amount: STRIKE_DAMAGE,
            });
        }
    }
}

pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut query: Query<(&mut Health, Option<&Defense>, Option<&mut PlayerStatus>)>,
) {
    for event in damage_events.read() {
        let Ok((mut health, defense, status)) = query.get_mut(event.target) else {
            continue;
        };
        let amount = defense.map_or(event.amount, |d| d.reduce(event.amount));
        health.take_damage(amount);
        if health.is_dead() {
            if let Some(mut status) = status {
                if status.alive {
                    status.alive = false;
                    info!("player defeated");
                }
            }
        }
    }
}

/// Despawn hands and the spirit once their owner is gone.
pub(crate) fn cleanup_orphans(
    mut commands: Commands,
    hands: Query<(Entity, &GraveHand)>,
    spirits: Query<(Entity, &SpiritCompanion)>,
    owners: Query<Entity>,
) {
    for (entity, hand) in &hands {
        if owners.get(hand.owner).is_err() {
            commands.entity(entity).despawn();
        }
    }
    for (entity, spirit) in &spirits {
        if owners.get(spirit.owner).is_err() {
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn tick_lifetimes(mut commands: Commands, mut query: Query<(Entity, &mut Lifetime)>) {
    for (entity, mut lifetime) in &mut query {
        lifetime.0 -= 1;
        if lifetime.0 <= 0 {
            commands.entity(entity).despawn();
        }
    }
}

/// Best-effort audio sink. Real playback lives outside the simulation; the
/// cue stream is observable in logs.
pub(crate) fn drain_sounds(mut sound_events: MessageReader<PlaySoundEvent>) {
    for event in sound_events.read() {
        match event.cue {
            SoundCue::Hover | SoundCue::SpiritDrone => {}
            cue => debug!("cue {:?} at {:.0},{:.0}", cue, event.at.x, event.at.y),
        }
    }
}

/// Item layer stand-in: the drop marker is recorded, nothing more.
pub(crate) fn drain_drops(mut drop_events: MessageReader<ItemDropEvent>) {
    for event in drop_events.read() {
        info!("dropped {:?} at {:.0},{:.0}", event.kind, event.at.x, event.at.y);
    }
}

pub(crate) fn handle_boss_defeat(
    mut defeat_events: MessageReader<BossDefeatedEvent>,
    mut progress: ResMut<WorldProgress>,
) {
    for _ in defeat_events.read() {
        progress.sarcophagus_downed = true;
        info!("sarcophagus defeated");
    }
}
