//! Boss domain: one handler per attack state.
//!
//! Each handler is a small state machine keyed on the boss timer. Handlers
//! mutate only the boss record and push intended side effects into the
//! effect buffer; they never touch the world directly. Handlers must not
//! assume they reach their own exit path: a stun preemption can abandon
//! any state mid-flight.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::combat::{DropKind, HandMode, ProjectileKind, ScatterKind, SoundCue};

use super::ballistics::launch_velocity;
use super::components::{Boss, FRAME_COUNT, TickContext};
use super::effects::{Effect, EffectBuffer};
use super::policy;
use super::selector::reset_state;
use super::state::{AttackId, BossState};
use super::steering::{rotation_difference, steer_toward};

fn hover_sound(boss: &Boss, fx: &mut EffectBuffer) {
    fx.sound(SoundCue::Hover, boss.position);
}

/// Three-valued sign: a zero offset applies no push.
fn sign(x: f32) -> f32 {
    if x == 0.0 { 0.0 } else { x.signum() }
}

fn steer(boss: &mut Boss, to: Vec2, accel: f32, max: f32, low: f32, decel: f32, slowdown: f32) {
    boss.velocity = steer_toward(
        boss.velocity,
        boss.position,
        to,
        accel,
        max,
        low,
        decel,
        slowdown,
    );
}

fn advance_frame(boss: &mut Boss, every: u32) {
    boss.frame_counter += 1;
    if boss.frame_counter % every == every - 1 && boss.frame < FRAME_COUNT - 1 {
        boss.frame += 1;
    }
}

fn regress_frame(boss: &mut Boss, every: u32) {
    boss.frame_counter += 1;
    if boss.frame_counter % every == every - 1 && boss.frame > 0 {
        boss.frame -= 1;
    }
}

/// Shared slam impact: cues plus the mirrored shockwave pair.
fn slam_impact(boss: &Boss, ctx: &TickContext, fx: &mut EffectBuffer) {
    fx.sound(SoundCue::Impact, boss.position);
    fx.sound(SoundCue::Slam, boss.position);
    for i in [-1.0, 1.0] {
        fx.push(Effect::Projectile {
            kind: ProjectileKind::Shockwave,
            origin: boss.bottom(),
            velocity: Vec2::X * i * ctx.tuning.slam.shockwave_speed,
            damage_frac: ctx.tuning.slam.shockwave_damage_frac,
        });
    }
}

/// Entrance descent. Falls in from above the target, slams the ground,
/// then hands control to the selector. Never re-entered.
pub(crate) fn opening(
    boss: &mut Boss,
    ctx: &TickContext,
    rng: &mut ChaCha8Rng,
    fx: &mut EffectBuffer,
) {
    let entrance = &ctx.tuning.entrance;
    if boss.timer >= 0 {
        boss.trail = true;
        boss.velocity.y *= entrance.fall_accel;
        if boss.position.y <= boss.lock_anchor.y || boss.timer > entrance.max_descent_ticks {
            boss.pass_through = false;
        }
        if !boss.pass_through && boss.velocity.y >= -1.0 {
            slam_impact(boss, ctx, fx);
            boss.trail = false;
            boss.timer = -entrance.impact_end_lag;
            if policy::drops_summon_relic(&ctx.difficulty, ctx.first_kill_pending) {
                fx.push(Effect::Drop {
                    kind: DropKind::SummonRelic,
                    at: ctx.target.center,
                });
            }
        }
        if boss.position.y <= boss.lock_anchor.y - entrance.depth_limit {
            boss.velocity = Vec2::ZERO;
        }
    }
    if boss.timer == -1 {
        reset_state(boss, ctx, rng);
    }
}

/// One-time escalation: drift upward, commit phase two, spawn the spirit
/// companion, then chain straight into a no-bounce slam.
pub(crate) fn phase_transition(
    boss: &mut Boss,
    ctx: &TickContext,
    rng: &mut ChaCha8Rng,
    fx: &mut EffectBuffer,
) {
    let phase = &ctx.tuning.phase;
    hover_sound(boss, fx);
    fx.sound(SoundCue::SpiritDrone, boss.position);

    let progress = boss.timer as f32 / phase.transition_ticks as f32;
    boss.velocity = Vec2::Y * 5.0 * (1.0 - progress);
    let jitter = TAU * 0.06 * progress.max(0.0);
    if jitter > 0.0 {
        boss.rotation = rng.random_range(0.0..jitter);
    }

    if boss.timer >= phase.commit_tick {
        fx.sound(SoundCue::PhaseShift, boss.position);
        boss.phase_two = true;
        boss.mark_dirty();
        fx.push(Effect::Spirit {
            origin: boss.mask_center(),
        });
        boss.velocity = -Vec2::Y * 0.1;
        boss.state = BossState::SlamWithShockwave { bounce: 2 };
        boss.lock_anchor = ctx.target.top + Vec2::Y * ctx.tuning.slam.anchor_above;
        boss.timer = 0;
    }
}

/// Forced punish while the target is stunned: wind up, loose a single
/// lunging hand, wind down, then return to the normal loop.
pub(crate) fn stun_punish(
    boss: &mut Boss,
    ctx: &TickContext,
    rng: &mut ChaCha8Rng,
    fx: &mut EffectBuffer,
) {
    boss.velocity *= 0.95;
    if boss.timer < 20 {
        advance_frame(boss, 4);
    } else if boss.timer == 20 {
        fx.sound(SoundCue::Shot, boss.position);
        let dir = Vec2::from_angle(boss.rotation);
        fx.push(Effect::Hand {
            origin: boss.position,
            velocity: dir * ctx.tuning.hands.hand_speed,
            mode: HandMode::Lunge,
            sweep: 0.0,
            damage_frac: ctx.tuning.hands.hand_damage_frac,
        });
    } else {
        regress_frame(boss, 60);
        if boss.frame == 0 {
            boss.frame_counter = 0;
            reset_state(boss, ctx, rng);
        }
    }
}

/// Sinusoidal weave above the target for a randomized duration, then an
/// upward launch into the slam.
pub(crate) fn hovering_for_slam(
    boss: &mut Boss,
    ctx: &TickContext,
    rng: &mut ChaCha8Rng,
    fx: &mut EffectBuffer,
) {
    let BossState::HoveringForSlam {
        mut theta_offset,
        mut duration,
    } = boss.state
    else {
        return;
    };
    let hover = &ctx.tuning.hover;

    hover_sound(boss, fx);

    if boss.timer == 1 {
        let x_offset =
            (boss.position.x - ctx.target.center.x).clamp(-hover.wave_amp_x, hover.wave_amp_x);
        theta_offset = (x_offset / hover.wave_amp_x).asin();
        duration = rng.random_range(hover.duration_min..hover.duration_max);
        if !boss.phase_two {
            duration -= hover.phase_one_cut;
        }
        boss.mark_dirty();
    }

    if boss.timer >= 0 && boss.timer < duration {
        boss.pass_through = true;
        let t = boss.timer as f32;
        let desired_x = hover.wave_amp_x * (theta_offset + PI * t / hover.x_half_period).sin();
        let desired_y = hover.height + hover.wave_amp_y * (PI * t / hover.y_half_period).sin();
        let desired = ctx.target.center + Vec2::new(desired_x, desired_y);
        steer(boss, desired, 0.1, 10.0, 5.0, 0.08, 20.0);
    } else if boss.timer == duration {
        boss.velocity.y = ctx.tuning.slam.launch_speed;
        boss.velocity.x /= 2.0;
        boss.lock_anchor = ctx.target.top + Vec2::Y * ctx.tuning.slam.anchor_above;
        boss.state = BossState::SlamWithShockwave { bounce: 0 };
        boss.timer = 0;
        return;
    }

    boss.state = BossState::HoveringForSlam {
        theta_offset,
        duration,
    };
}

/// Gravity-driven drop. Lands with shockwaves; in the nightmare ruleset
/// the first landing bounces into a second slam.
pub(crate) fn slam_with_shockwave(
    boss: &mut Boss,
    ctx: &TickContext,
    rng: &mut ChaCha8Rng,
    fx: &mut EffectBuffer,
) {
    let BossState::SlamWithShockwave { mut bounce } = boss.state else {
        return;
    };
    let slam = &ctx.tuning.slam;

    if boss.timer >= 0 {
        boss.velocity.x *= slam.x_bleed;
        let drift = policy::slam_drift_step(&ctx.difficulty, bounce);
        boss.velocity.x += sign(ctx.target.center.x - boss.position.x) * drift;

        if boss.velocity.y <= 0.0 && bounce == 0 {
            bounce = 1;
        }
        // the move step zeroes vertical velocity on floor contact
        if boss.velocity.y == 0.0 && bounce > 0 {
            slam_impact(boss, ctx, fx);
            boss.trail = false;
            if policy::slam_can_bounce(&ctx.difficulty, bounce) {
                bounce = 2;
                boss.timer = 0;
                boss.velocity.y = slam.bounce_speed;
            } else {
                boss.timer = -policy::slam_end_lag(&ctx.difficulty);
                boss.velocity.x = 0.0;
            }
            boss.state = BossState::SlamWithShockwave { bounce };
            return;
        }

        boss.velocity.y -= slam.gravity;
        if boss.velocity.y < 0.0 {
            boss.velocity.y -= slam.falling_bonus;
        }
        boss.trail = true;
        boss.pass_through = false;

        if boss.position.y <= boss.lock_anchor.y - slam.depth_limit {
            boss.velocity = Vec2::ZERO;
        }
    }
    if boss.timer == -1 {
        reset_state(boss, ctx, rng);
        return;
    }

    boss.state = BossState::SlamWithShockwave { bounce };
}

/// Converging telegraph, then a radial burst of wave shots. Nightmare
/// phase two fires a second burst before recovering.
pub(crate) fn wavy_shot_circle(
    boss: &mut Boss,
    ctx: &TickContext,
    rng: &mut ChaCha8Rng,
    fx: &mut EffectBuffer,
) {
    let BossState::WavyShotCircle { repeated } = boss.state else {
        return;
    };
    let telegraph = policy::circle_telegraph_ticks(&ctx.difficulty);
    let progress = 1.0 - boss.timer as f32 / telegraph as f32;
    let mask = boss.mask_center();

    if boss.timer < telegraph {
        let spark_dir = Vec2::from_angle(rng.random_range(0.0..TAU));
        let spark_distance =
            ctx.tuning.circle.spark_radius * progress * rng.random_range(0.6..1.3);
        fx.push(Effect::Spark {
            origin: mask + spark_dir * spark_distance * 2.0,
            toward: mask,
        });
    } else if boss.timer == telegraph {
        fx.sound(SoundCue::BigShot, mask);
        let shots = policy::radial_shot_count(&ctx.difficulty);
        let base_rot = rng.random_range(0.0..TAU);
        for i in 0..shots {
            let rot = base_rot + TAU * (i as f32 / shots as f32);
            fx.push(Effect::Projectile {
                kind: ProjectileKind::WaveShot { aimed: false },
                origin: mask,
                velocity: Vec2::from_angle(rot) * ctx.tuning.circle.shot_speed,
                damage_frac: 1.0,
            });
        }
        if policy::circle_skips_end_lag(&ctx.difficulty, boss.phase_two) {
            reset_state(boss, ctx, rng);
        }
    } else if boss.timer > telegraph + policy::circle_end_lag(&ctx.difficulty, !repeated) {
        if !repeated && policy::circle_repeats(&ctx.difficulty, boss.phase_two) {
            boss.state = BossState::WavyShotCircle { repeated: true };
            boss.timer = 0;
            return;
        }
        reset_state(boss, ctx, rng);
    }
}

/// Smoothstep momentum curve for the orbit sweep.
fn momentum_progress(x: f32) -> f32 {
    (x * x * 3.0) - (x * x * x * 2.0)
}

/// Approach a ring around the target, orbit it with eased momentum while
/// firing aimed shots, then chain into the slam.
pub(crate) fn wavy_shot_flight(
    boss: &mut Boss,
    ctx: &TickContext,
    _rng: &mut ChaCha8Rng,
    fx: &mut EffectBuffer,
) {
    let BossState::WavyShotFlight {
        mut total_rotate,
        mut circle_start,
    } = boss.state
    else {
        return;
    };
    let flight = &ctx.tuning.flight;

    boss.pass_through = true;
    hover_sound(boss, fx);

    if boss.timer <= flight.prep_ticks {
        let current_dir = (boss.position - ctx.target.center).normalize_or(Vec2::Y);
        circle_start = current_dir.to_angle();

        let rot = rotation_difference(current_dir, Vec2::Y);
        let desired = ctx.target.center + current_dir * flight.orbit_distance;
        steer(boss, desired, 0.08, 30.0, 5.0, 0.06, 50.0);

        total_rotate = (TAU - rot.abs()) * -sign(rot);
    } else if boss.timer <= flight.prep_ticks + flight.circling_ticks {
        let progress = (boss.timer - flight.prep_ticks) as f32 / flight.circling_ticks as f32;
        let circle_progress = momentum_progress(progress);
        let angle = circle_start + (total_rotate + TAU * sign(total_rotate)) * circle_progress;
        let desired = ctx.target.center + Vec2::from_angle(angle) * flight.orbit_distance;

        let modifier = (progress / 0.1).clamp(0.0, 1.0);
        boss.velocity = boss.velocity.lerp(desired - boss.position, modifier);

        let padding = flight.shot_padding;
        if boss.timer % flight.shot_interval == 0
            && progress >= padding
            && progress <= 1.0 - padding
        {
            fx.sound(SoundCue::Shot, boss.position);
            let mask = boss.mask_center();
            let aim = (ctx.target.center - mask).normalize_or_zero();
            fx.push(Effect::Projectile {
                kind: ProjectileKind::WaveShot { aimed: true },
                origin: mask,
                velocity: Vec2::from_angle(-flight.aim_skew).rotate(aim) * flight.shot_speed,
                damage_frac: 1.0,
            });
        }
    } else {
        boss.frame = 0;
        boss.velocity.x /= 2.0;
        boss.velocity.y = ctx.tuning.slam.launch_speed;
        boss.lock_anchor = ctx.target.top + Vec2::Y * ctx.tuning.slam.anchor_above;
        boss.state = BossState::SlamWithShockwave { bounce: 2 };
        boss.timer = 0;
        return;
    }

    boss.state = BossState::WavyShotFlight {
        total_rotate,
        circle_start,
    };
}

/// Wind-down branch shared by the hands and scatter states: slam from
/// above, or climb with the orbit attack from below.
fn branch_toward_slam(boss: &mut Boss, ctx: &TickContext, margin: f32) {
    boss.frame_counter = 0;
    boss.frame = 0;
    boss.retarget = true;
    boss.timer = 0;
    if boss.position.y > ctx.target.center.y + margin {
        boss.state = BossState::SlamWithShockwave { bounce: 0 };
        boss.pass_through = true;
        boss.lock_anchor = ctx.target.top + Vec2::Y * ctx.tuning.slam.anchor_above;
        boss.velocity.y += ctx.tuning.slam.launch_speed;
        boss.velocity.x /= 2.0;
    } else {
        boss.state = BossState::from_attack(AttackId::WavyShotFlight);
        boss.last_choice = Some(AttackId::WavyShotFlight);
    }
    boss.mark_dirty();
}

/// Hover beside the target and send a pair (or trio) of grabbing hands
/// after it, charged on a randomized delay.
pub(crate) fn grabby_hands(
    boss: &mut Boss,
    ctx: &TickContext,
    rng: &mut ChaCha8Rng,
    fx: &mut EffectBuffer,
) {
    let BossState::GrabbyHands { mut grab_delay } = boss.state else {
        return;
    };
    let hands = &ctx.tuning.hands;

    boss.pass_through = true;
    hover_sound(boss, fx);

    if boss.timer < hands.approach_ticks {
        let side = sign(boss.position.x - ctx.target.center.x);
        let offset = Vec2::Y * hands.hover_height + Vec2::X * side * hands.hover_side;
        steer(boss, ctx.target.center + offset, 0.1, 10.0, 5.0, 0.08, 20.0);
    } else {
        boss.velocity *= 0.97;
    }

    if boss.timer == 2 {
        grab_delay = rng.random_range(hands.grab_delay_min..hands.grab_delay_max);
        boss.mark_dirty();
    }
    if boss.timer > 2 && boss.timer == grab_delay {
        fx.push(Effect::CommandHands);
    }

    if boss.timer < hands.release_tick {
        advance_frame(boss, 4);
    } else if boss.timer == hands.release_tick {
        fx.sound(SoundCue::Shot, boss.position);
        let dir = Vec2::from_angle(boss.rotation);
        for sweep in [1.0, -1.0] {
            fx.push(Effect::Hand {
                origin: boss.position,
                velocity: dir * hands.hand_speed,
                mode: HandMode::Sweep,
                sweep,
                damage_frac: hands.hand_damage_frac,
            });
        }
        if policy::spawns_extra_hand(&ctx.difficulty) {
            let sweep = if rng.random_bool(0.5) { 1.5 } else { -1.5 };
            fx.push(Effect::Hand {
                origin: boss.position,
                velocity: Vec2::from_angle(boss.rotation - FRAC_PI_2) * hands.hand_speed,
                mode: HandMode::Sweep,
                sweep,
                damage_frac: hands.strong_hand_damage_frac,
            });
        }
    } else {
        regress_frame(boss, 60);
        if boss.frame == 0 && boss.timer > grab_delay + 10 {
            branch_toward_slam(boss, ctx, 0.0);
            return;
        }
    }

    boss.state = BossState::GrabbyHands { grab_delay };
}

/// Phase-two scatter barrage: solve a ballistic arc at the target every
/// tick and lob randomized projectile variants along it.
pub(crate) fn random_stuff(
    boss: &mut Boss,
    ctx: &TickContext,
    rng: &mut ChaCha8Rng,
    fx: &mut EffectBuffer,
) {
    let BossState::RandomStuff { mut shot_kind } = boss.state else {
        return;
    };
    let scatter = &ctx.tuning.scatter;

    boss.pass_through = true;

    let launch = launch_velocity(ctx.target.center - boss.position, shot_kind.gravity());
    let blend = (boss.timer as f32 / scatter.rotation_ease_ticks).clamp(0.0, 1.0);
    let facing = Vec2::from_angle(boss.rotation).lerp(launch.normalize_or(Vec2::X), blend);
    boss.rotation = facing.to_angle();

    hover_sound(boss, fx);
    let side = sign(boss.position.x - ctx.target.center.x);
    let desired = ctx.target.center + Vec2::X * side * scatter.standoff;
    steer(boss, desired, 0.1, 10.0, 5.0, 0.08, 20.0);

    let open = scatter.open_ticks;
    let frame_time = ((open / FRAME_COUNT as i32).max(1)) as u32;
    if boss.timer < open {
        advance_frame(boss, frame_time);
    } else if boss.timer < open + scatter.barrage_ticks {
        boss.velocity.x *= 0.7;
        let cadence = policy::scatter_cadence(&ctx.difficulty);
        if boss.timer % cadence == 0 {
            shot_kind = match rng.random_range(0..3) {
                1 => ScatterKind::Bomb,
                2 => ScatterKind::Skull,
                _ => match rng.random_range(0..5) {
                    0 => ScatterKind::Bone,
                    1 => ScatterKind::Ember,
                    2 => ScatterKind::Shard,
                    3 => ScatterKind::Gust,
                    _ => ScatterKind::Wisp,
                },
            };
            boss.mark_dirty();
        }
        if boss.timer % cadence == cadence - 1 {
            let cue = match shot_kind {
                ScatterKind::Bomb => SoundCue::BombLob,
                ScatterKind::Skull => SoundCue::SkullLaunch,
                _ => SoundCue::ScatterLob,
            };
            fx.sound(cue, boss.position);
            let jitter = rng.random_range(scatter.speed_jitter_min..scatter.speed_jitter_max);
            fx.push(Effect::Projectile {
                kind: ProjectileKind::Scatter(shot_kind),
                origin: boss.position,
                velocity: launch * jitter,
                damage_frac: 1.0,
            });
        }
    } else {
        boss.velocity *= 0.96;
        regress_frame(boss, 30);
        if boss.frame > 0 {
            boss.rotation *= 0.9;
        } else {
            boss.velocity = Vec2::ZERO;
            boss.rotation = 0.0;
            branch_toward_slam(boss, ctx, scatter.branch_margin);
            return;
        }
    }

    boss.state = BossState::RandomStuff { shot_kind };
}
