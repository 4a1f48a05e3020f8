//! Boss domain: the fixed-tick update driving the state machine.
//!
//! Per-tick order matches the controller contract: defaults, targeting
//! (with the drift-and-expire path), stun preemption, handler dispatch,
//! then the timer increment and the move step.

use avian2d::prelude::*;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{BossDefeatedEvent, Defense, GraveHand, Health};
use crate::content::Tuning;
use crate::core::{DifficultyFlags, NetworkRole, SessionRng, WorldProgress};
use crate::movement::{ArenaBounds, GameLayer, PLAYER_HALF_HEIGHT, Player, PlayerStatus, Stunned};

use super::components::{BOSS_MAX_HEALTH, Boss, TargetView, TickContext};
use super::effects::EffectBuffer;
use super::handlers;
use super::state::BossState;

/// Eligibility snapshot of one player for targeting.
struct Candidate {
    entity: Entity,
    center: Vec2,
    targetable: bool,
    stunned: bool,
}

/// Validate or reacquire the boss's target. Returns the resolved view, or
/// None when no eligible player exists (the caller then drifts and counts
/// down the despawn grace).
fn resolve_target(boss: &mut Boss, candidates: &[Candidate], range_cap: f32) -> Option<TargetView> {
    let current = boss
        .target
        .and_then(|e| candidates.iter().find(|c| c.entity == e));
    let invalid = current
        .is_none_or(|c| !c.targetable || boss.position.distance(c.center) > range_cap);

    if invalid || boss.retarget {
        boss.retarget = false;
        let nearest = candidates
            .iter()
            .filter(|c| c.targetable)
            .min_by(|a, b| {
                boss.position
                    .distance_squared(a.center)
                    .total_cmp(&boss.position.distance_squared(b.center))
            });
        boss.target = nearest.map(|c| c.entity);
    }

    let chosen = boss
        .target
        .and_then(|e| candidates.iter().find(|c| c.entity == e))?;
    if !chosen.targetable || boss.position.distance(chosen.center) > range_cap {
        return None;
    }
    Some(TargetView {
        center: chosen.center,
        top: chosen.center + Vec2::Y * PLAYER_HALF_HEIGHT,
        stunned: chosen.stunned,
    })
}

/// Move step: integrate the per-tick velocity and clamp against the arena
/// floor unless the boss is passing through it. Handlers detect a landing
/// by the zeroed vertical velocity on the following tick.
fn integrate(boss: &mut Boss, floor_y: f32) {
    boss.position += boss.velocity;
    if !boss.pass_through {
        let bottom = boss.position.y - boss.half_size.y;
        if bottom <= floor_y && boss.velocity.y <= 0.0 {
            boss.position.y = floor_y + boss.half_size.y;
            boss.velocity.y = 0.0;
        }
    }
}

fn dispatch(
    boss: &mut Boss,
    ctx: &TickContext,
    rng: &mut rand_chacha::ChaCha8Rng,
    fx: &mut EffectBuffer,
) {
    match boss.state {
        BossState::Opening => handlers::opening(boss, ctx, rng, fx),
        BossState::PhaseTransition => handlers::phase_transition(boss, ctx, rng, fx),
        BossState::StunPunish => handlers::stun_punish(boss, ctx, rng, fx),
        BossState::HoveringForSlam { .. } => handlers::hovering_for_slam(boss, ctx, rng, fx),
        BossState::SlamWithShockwave { .. } => handlers::slam_with_shockwave(boss, ctx, rng, fx),
        BossState::WavyShotCircle { .. } => handlers::wavy_shot_circle(boss, ctx, rng, fx),
        BossState::WavyShotFlight { .. } => handlers::wavy_shot_flight(boss, ctx, rng, fx),
        BossState::GrabbyHands { .. } => handlers::grabby_hands(boss, ctx, rng, fx),
        BossState::RandomStuff { .. } => handlers::random_stuff(boss, ctx, rng, fx),
    }
}

/// Advance the boss exactly one simulation tick, assuming a resolved
/// target: defaults, stun preemption, handler dispatch, clock increment,
/// move step. Pure with respect to the world: everything observable
/// lands in the effect buffer.
pub fn advance_tick(
    boss: &mut Boss,
    ctx: &TickContext,
    rng: &mut rand_chacha::ChaCha8Rng,
    fx: &mut EffectBuffer,
    floor_y: f32,
) {
    boss.rotation = 0.0;
    boss.pass_through = true;

    // A stunned target is punished from any state; whatever was
    // mid-flight is abandoned without cleanup.
    if ctx.target.stunned && !matches!(boss.state, BossState::StunPunish) && ctx.live_hands == 0 {
        boss.timer = 0;
        boss.state = BossState::StunPunish;
        boss.mark_dirty();
        debug!("stun punish preempts the active state");
    }

    dispatch(boss, ctx, rng, fx);
    boss.timer += 1;
    integrate(boss, floor_y);
}

pub(crate) fn boss_tick(
    mut commands: Commands,
    role: Res<NetworkRole>,
    difficulty: Res<DifficultyFlags>,
    tuning: Res<Tuning>,
    bounds: Res<ArenaBounds>,
    progress: Res<WorldProgress>,
    mut rng: ResMut<SessionRng>,
    mut boss_query: Query<(Entity, &mut Boss, &Health, &mut Defense, &mut EffectBuffer)>,
    player_query: Query<(Entity, &Transform, &PlayerStatus, &Stunned), With<Player>>,
    hand_query: Query<&GraveHand>,
) {
    let candidates: Vec<Candidate> = player_query
        .iter()
        .map(|(entity, transform, status, stunned)| Candidate {
            entity,
            center: transform.translation.truncate(),
            targetable: status.targetable(),
            stunned: stunned.is_active(),
        })
        .collect();

    for (entity, mut boss, health, mut defense, mut fx) in &mut boss_query {
        let boss = &mut *boss;

        defense.0 = boss.base_defense
            + if boss.phase_two {
                tuning.0.phase.defense_bonus
            } else {
                0
            };

        let Some(target) = resolve_target(boss, &candidates, tuning.0.targeting.range_cap) else {
            boss.time_left -= 1;
            boss.velocity.y += tuning.0.targeting.drift;
            if boss.time_left <= 0 {
                info!("no valid target; the sarcophagus departs");
                commands.entity(entity).despawn();
                continue;
            }
            integrate(boss, bounds.floor_y);
            continue;
        };
        boss.time_left = tuning.0.targeting.grace_ticks;

        let live_hands = hand_query.iter().filter(|h| h.owner == entity).count() as u32;

        let ctx = TickContext {
            target,
            difficulty: *difficulty,
            tuning: &tuning.0,
            is_host: role.is_host(),
            life_fraction: health.fraction(),
            live_hands,
            first_kill_pending: !progress.sarcophagus_downed,
        };

        advance_tick(boss, &ctx, &mut rng.0, &mut fx, bounds.floor_y);
    }
}

/// Spawn the boss above the first live player and aim its descent anchor
/// just over their head.
pub(crate) fn spawn_boss(
    mut commands: Commands,
    tuning: Res<Tuning>,
    player_query: Query<(&Transform, &PlayerStatus), With<Player>>,
) {
    let Some((player_transform, _)) = player_query.iter().find(|(_, status)| status.targetable())
    else {
        warn!("no player to haunt; skipping boss spawn");
        return;
    };
    let player_center = player_transform.translation.truncate();
    let entrance = &tuning.0.entrance;

    let mut boss = Boss::new(player_center + Vec2::Y * entrance.spawn_height);
    boss.lock_anchor =
        player_center + Vec2::Y * (PLAYER_HALF_HEIGHT + entrance.anchor_above);
    boss.velocity = Vec2::new(0.0, -entrance.initial_fall_speed);
    let half_size = boss.half_size;
    let position = boss.position;
    let base_defense = boss.base_defense;

    commands.spawn((
        boss,
        Health::new(BOSS_MAX_HEALTH),
        Defense(base_defense),
        EffectBuffer::default(),
        Sprite {
            color: Color::srgb(0.5, 0.45, 0.35),
            custom_size: Some(half_size * 2.0),
            ..default()
        },
        Transform::from_xyz(position.x, position.y, 1.0),
        RigidBody::Kinematic,
        Collider::rectangle(half_size.x * 2.0, half_size.y * 2.0),
        CollisionLayers::new(GameLayer::Boss, [GameLayer::Player]),
    ));
    info!("the sarcophagus descends");
}

/// Mirror the simulation position/rotation onto the render transform.
pub(crate) fn mirror_to_transform(mut query: Query<(&Boss, &mut Transform, &mut Sprite)>) {
    for (boss, mut transform, mut sprite) in &mut query {
        transform.translation.x = boss.position.x;
        transform.translation.y = boss.position.y;
        transform.rotation = Quat::from_rotation_z(boss.rotation);
        // brighten during fast descents so the trail reads on screen
        sprite.color = if boss.trail {
            Color::srgb(0.65, 0.55, 0.4)
        } else {
            Color::srgb(0.5, 0.45, 0.35)
        };
    }
}

pub(crate) fn check_boss_death(
    mut commands: Commands,
    mut defeat_events: MessageWriter<BossDefeatedEvent>,
    query: Query<(Entity, &Health), With<Boss>>,
) {
    for (entity, health) in &query {
        if health.is_dead() {
            defeat_events.write(BossDefeatedEvent { boss: entity });
            commands.entity(entity).despawn();
        }
    }
}
