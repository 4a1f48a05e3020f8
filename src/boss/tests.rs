//! Boss domain: unit tests for the encounter state machine.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::ballistics::{DEFAULT_LAUNCH_VY, launch_velocity};
use super::components::{Boss, TargetView, TickContext};
use super::effects::{Effect, EffectBuffer, permitted_effects};
use super::policy;
use super::selector::select_next_state;
use super::state::{AttackId, BossState, PHASE_ONE_ATTACKS, attack_pool};
use super::steering::{rotation_difference, steer_toward};
use super::systems::advance_tick;
use super::sync::BossSnapshot;
use crate::combat::{ProjectileKind, SoundCue};
use crate::content::EncounterTuning;
use crate::core::DifficultyFlags;

const FLOOR_Y: f32 = 0.0;

fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(7)
}

fn target_at(center: Vec2) -> TargetView {
    TargetView {
        center,
        top: center + Vec2::Y * 21.0,
        stunned: false,
    }
}

fn ctx(tuning: &EncounterTuning) -> TickContext<'_> {
    TickContext {
        target: target_at(Vec2::new(0.0, 21.0)),
        difficulty: DifficultyFlags::default(),
        tuning,
        is_host: true,
        life_fraction: 1.0,
        live_hands: 0,
        first_kill_pending: false,
    }
}

fn boss_in(state: BossState, position: Vec2) -> Boss {
    let mut boss = Boss::new(position);
    boss.state = state;
    boss
}

fn nightmare_expert() -> DifficultyFlags {
    DifficultyFlags {
        expert: true,
        nightmare: true,
        ..Default::default()
    }
}

// --- clock ---

#[test]
fn test_timer_increments_once_per_tick() {
    let tuning = EncounterTuning::default();
    let ctx = ctx(&tuning);
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(
        BossState::HoveringForSlam {
            theta_offset: 0.0,
            duration: 0,
        },
        Vec2::new(0.0, 400.0),
    );
    boss.timer = 1;

    for expected in 2..=100 {
        advance_tick(&mut boss, &ctx, &mut rng, &mut fx, FLOOR_Y);
        fx.drain();
        assert_eq!(boss.timer, expected, "timer must advance exactly 1/tick");
        assert!(matches!(boss.state, BossState::HoveringForSlam { .. }));
    }
}

// --- selector ---

#[test]
fn test_refill_excludes_last_choice() {
    let tuning = EncounterTuning::default();
    let ctx = ctx(&tuning);
    let mut rng = rng();
    let mut boss = Boss::new(Vec2::ZERO);
    boss.last_choice = Some(AttackId::WavyShotFlight);

    // refill boundary: the previous choice stays out of the new bag
    select_next_state(&mut boss, &ctx, &mut rng);
    assert!(!boss.available.contains(&AttackId::WavyShotFlight));
    assert_ne!(boss.state.attack_id(), Some(AttackId::WavyShotFlight));
    assert_eq!(boss.available.len(), 2);

    // mid-cycle draws don't re-apply the exclusion; the bag just empties
    let mut drawn = vec![boss.state.attack_id().unwrap()];
    for _ in 0..2 {
        select_next_state(&mut boss, &ctx, &mut rng);
        drawn.push(boss.state.attack_id().unwrap());
    }
    assert_eq!(boss.available.len(), 0);
    assert!(!drawn.contains(&AttackId::WavyShotFlight));

    // next refill excludes only the newest choice, so the old exclusion
    // becomes eligible again
    let last = *drawn.last().unwrap();
    select_next_state(&mut boss, &ctx, &mut rng);
    assert!(!boss.available.contains(&last));
    let mut cycle = boss.available.clone();
    cycle.push(boss.state.attack_id().unwrap());
    assert!(cycle.contains(&AttackId::WavyShotFlight));
}

#[test]
fn test_first_refill_has_no_exclusion() {
    let tuning = EncounterTuning::default();
    let ctx = ctx(&tuning);
    let mut rng = rng();
    let mut boss = Boss::new(Vec2::ZERO);

    select_next_state(&mut boss, &ctx, &mut rng);
    assert_eq!(boss.available.len(), PHASE_ONE_ATTACKS.len() - 1);
}

#[test]
fn test_life_threshold_forces_phase_transition_once() {
    let tuning = EncounterTuning::default();
    let mut low = ctx(&tuning);
    low.life_fraction = 0.79;
    let mut rng = rng();
    let mut boss = boss_in(
        BossState::HoveringForSlam {
            theta_offset: 0.0,
            duration: 120,
        },
        Vec2::ZERO,
    );

    select_next_state(&mut boss, &low, &mut rng);
    assert_eq!(boss.state, BossState::PhaseTransition);
    assert!(boss.available.is_empty(), "forcing clears the bag");

    // once phase two is latched the force never recurs
    boss.phase_two = true;
    for _ in 0..20 {
        select_next_state(&mut boss, &low, &mut rng);
        assert_ne!(boss.state, BossState::PhaseTransition);
    }
}

#[test]
fn test_no_force_above_threshold() {
    let tuning = EncounterTuning::default();
    let mut high = ctx(&tuning);
    high.life_fraction = 0.85;
    let mut rng = rng();
    let mut boss = Boss::new(Vec2::ZERO);

    select_next_state(&mut boss, &high, &mut rng);
    assert_ne!(boss.state, BossState::PhaseTransition);
    assert!(boss.state.attack_id().is_some());

    // the threshold itself counts: "at or below"
    let mut at = ctx(&tuning);
    at.life_fraction = tuning.phase.life_threshold;
    select_next_state(&mut boss, &at, &mut rng);
    assert_eq!(boss.state, BossState::PhaseTransition);
}

#[test]
fn test_observer_refills_but_never_draws() {
    let tuning = EncounterTuning::default();
    let mut observer = ctx(&tuning);
    observer.is_host = false;
    let mut rng = rng();
    let mut boss = boss_in(BossState::Opening, Vec2::ZERO);

    select_next_state(&mut boss, &observer, &mut rng);
    assert_eq!(boss.state, BossState::Opening, "observers wait for the host");
    assert_eq!(boss.available.len(), PHASE_ONE_ATTACKS.len());
    assert!(boss.dirty);
}

#[test]
fn test_phase_two_pool_adds_scatter_attack() {
    assert!(!attack_pool(false).contains(&AttackId::RandomStuff));
    assert!(attack_pool(true).contains(&AttackId::RandomStuff));
    assert_eq!(attack_pool(true).len(), attack_pool(false).len() + 1);
}

// --- phase transition handler ---

#[test]
fn test_phase_transition_latches_and_chains_into_slam() {
    let tuning = EncounterTuning::default();
    let ctx = ctx(&tuning);
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(BossState::PhaseTransition, Vec2::new(0.0, 300.0));

    let mut spirit_seen = false;
    for _ in 0..200 {
        advance_tick(&mut boss, &ctx, &mut rng, &mut fx, FLOOR_Y);
        for effect in fx.drain() {
            if matches!(effect, Effect::Spirit { .. }) {
                spirit_seen = true;
            }
        }
        if boss.state != BossState::PhaseTransition {
            break;
        }
    }

    assert!(boss.phase_two);
    assert!(spirit_seen, "the companion spawns at the commit tick");
    assert_eq!(boss.state, BossState::SlamWithShockwave { bounce: 2 });
}

// --- steering ---

#[test]
fn test_steer_speed_bounds_per_regime() {
    let to = Vec2::new(500.0, 0.0);
    // far regime: never exceeds max_speed for in-bound input
    let mut v = Vec2::new(3.0, -2.0);
    for _ in 0..300 {
        v = steer_toward(v, Vec2::ZERO, to, 0.1, 10.0, 5.0, 0.08, 20.0);
        assert!(v.length() <= 10.0 + 1e-4);
    }
    // near regime: converges under low_speed
    let mut v = Vec2::new(4.0, 0.0);
    for _ in 0..300 {
        v = steer_toward(v, Vec2::ZERO, Vec2::new(10.0, 0.0), 0.1, 10.0, 5.0, 0.08, 20.0);
        assert!(v.length() <= 5.0 + 1e-4);
    }
}

#[test]
fn test_rotation_difference_is_signed_and_small() {
    let quarter = rotation_difference(Vec2::Y, Vec2::X);
    assert!((quarter - std::f32::consts::FRAC_PI_2).abs() < 1e-5);
    let back = rotation_difference(Vec2::X, Vec2::Y);
    assert!((back + std::f32::consts::FRAC_PI_2).abs() < 1e-5);
}

// --- ballistics ---

#[test]
fn test_launch_solve_reference_displacement() {
    // target 400 across, 300 above; every scatter gravity keeps the arc
    // candidate below the default, so the default launch speed stands
    let offset = Vec2::new(400.0, 300.0);
    for gravity in [0.2, 0.25, 0.3] {
        let v = launch_velocity(offset, gravity);
        assert!(v.is_finite());
        assert!(v.y.abs() <= DEFAULT_LAUNCH_VY + 1e-4);
        assert!(v.x > 0.0);
    }
}

#[test]
fn test_launch_solve_degenerate_gravity() {
    for gravity in [0.0, -1.0, f32::NAN, f32::INFINITY] {
        let v = launch_velocity(Vec2::new(400.0, -300.0), gravity);
        assert!(v.is_finite(), "gravity {gravity} must not produce NaN");
    }
}

#[test]
fn test_launch_solve_target_far_above_clamps() {
    // steep enough that the quadratic's discriminant would go negative
    let v = launch_velocity(Vec2::new(100.0, 2000.0), 0.25);
    assert!(v.is_finite());
    assert!(v.y > 0.0);
}

#[test]
fn test_launch_solve_arc_override_when_needed() {
    // high target with steep gravity: the arc rule must replace the default
    let v = launch_velocity(Vec2::new(0.0, 500.0), 0.5);
    let candidate = ((500.0_f32 + 300.0) * 0.5).sqrt() / 1.5;
    assert!(candidate > DEFAULT_LAUNCH_VY);
    assert!((v.y - candidate).abs() < 1e-4);
}

// --- preemption ---

#[test]
fn test_stun_preempts_any_state() {
    let tuning = EncounterTuning::default();
    let mut stunned_ctx = ctx(&tuning);
    stunned_ctx.target.stunned = true;
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(
        BossState::WavyShotCircle { repeated: false },
        Vec2::new(0.0, 300.0),
    );
    boss.timer = 10;

    advance_tick(&mut boss, &stunned_ctx, &mut rng, &mut fx, FLOOR_Y);
    assert_eq!(boss.state, BossState::StunPunish);
    // clock restarted: zeroed at preemption, then the tick increment
    assert_eq!(boss.timer, 1);
    assert!(boss.dirty);
}

#[test]
fn test_live_hands_block_stun_preemption() {
    let tuning = EncounterTuning::default();
    let mut stunned_ctx = ctx(&tuning);
    stunned_ctx.target.stunned = true;
    stunned_ctx.live_hands = 1;
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(
        BossState::WavyShotCircle { repeated: false },
        Vec2::new(0.0, 300.0),
    );
    boss.timer = 10;

    advance_tick(&mut boss, &stunned_ctx, &mut rng, &mut fx, FLOOR_Y);
    assert!(matches!(boss.state, BossState::WavyShotCircle { .. }));
}

// --- effect gate ---

#[test]
fn test_authority_gate_filters_spawns_not_sounds() {
    let effects = vec![
        Effect::Projectile {
            kind: ProjectileKind::Shockwave,
            origin: Vec2::ZERO,
            velocity: Vec2::X,
            damage_frac: 0.1,
        },
        Effect::Sound {
            cue: SoundCue::Slam,
            at: Vec2::ZERO,
        },
        Effect::Spark {
            origin: Vec2::ZERO,
            toward: Vec2::ZERO,
        },
        Effect::CommandHands,
    ];

    let host = permitted_effects(effects.clone(), true);
    assert_eq!(host.len(), 4);

    let observer = permitted_effects(effects, false);
    assert_eq!(observer.len(), 2);
    assert!(
        observer
            .iter()
            .all(|e| matches!(e, Effect::Sound { .. } | Effect::Spark { .. }))
    );
}

// --- state handlers, end to end ---

#[test]
fn test_opening_impact_spawns_shockwaves_then_resets() {
    let tuning = EncounterTuning::default();
    let ctx = ctx(&tuning);
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(BossState::Opening, Vec2::new(0.0, 721.0));
    boss.lock_anchor = Vec2::new(0.0, 71.0);
    boss.velocity = Vec2::new(0.0, -tuning.entrance.initial_fall_speed);

    let mut shockwaves = 0;
    let mut end_lag_seen = false;
    for _ in 0..2000 {
        advance_tick(&mut boss, &ctx, &mut rng, &mut fx, FLOOR_Y);
        for effect in fx.drain() {
            if matches!(
                effect,
                Effect::Projectile {
                    kind: ProjectileKind::Shockwave,
                    ..
                }
            ) {
                shockwaves += 1;
            }
        }
        if boss.timer < 0 {
            end_lag_seen = true;
        }
        if boss.state != BossState::Opening {
            break;
        }
    }

    assert_eq!(shockwaves, 2, "one shockwave each way");
    assert!(end_lag_seen, "impact parks the clock in end-lag");
    assert!(boss.state.attack_id().is_some(), "selector takes over");
    assert!(PHASE_ONE_ATTACKS.contains(&boss.state.attack_id().unwrap()));
}

#[test]
fn test_opening_drops_relic_only_for_nightmare_first_kill() {
    let tuning = EncounterTuning::default();
    let mut nightmare_ctx = ctx(&tuning);
    nightmare_ctx.difficulty = nightmare_expert();
    nightmare_ctx.first_kill_pending = true;
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(BossState::Opening, Vec2::new(0.0, 721.0));
    boss.lock_anchor = Vec2::new(0.0, 71.0);
    boss.velocity = Vec2::new(0.0, -0.25);

    let mut dropped = false;
    for _ in 0..2000 {
        advance_tick(&mut boss, &nightmare_ctx, &mut rng, &mut fx, FLOOR_Y);
        if fx.drain().iter().any(|e| matches!(e, Effect::Drop { .. })) {
            dropped = true;
        }
        if boss.state != BossState::Opening {
            break;
        }
    }
    assert!(dropped);
}

#[test]
fn test_hover_launches_into_slam() {
    let tuning = EncounterTuning::default();
    let ctx = ctx(&tuning);
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(
        BossState::HoveringForSlam {
            theta_offset: 0.0,
            duration: 0,
        },
        Vec2::new(50.0, 350.0),
    );
    boss.timer = 1;

    for _ in 0..400 {
        advance_tick(&mut boss, &ctx, &mut rng, &mut fx, FLOOR_Y);
        fx.drain();
        if !matches!(boss.state, BossState::HoveringForSlam { .. }) {
            break;
        }
    }

    assert_eq!(boss.state, BossState::SlamWithShockwave { bounce: 0 });
    assert_eq!(boss.velocity.y, tuning.slam.launch_speed);
    let expected_anchor = ctx.target.top + Vec2::Y * tuning.slam.anchor_above;
    assert_eq!(boss.lock_anchor, expected_anchor);
}

#[test]
fn test_slam_lands_with_end_lag_then_redraws() {
    let tuning = EncounterTuning::default();
    let ctx = ctx(&tuning);
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(
        BossState::SlamWithShockwave { bounce: 0 },
        Vec2::new(0.0, 400.0),
    );
    boss.timer = 1;
    boss.velocity = Vec2::new(0.0, tuning.slam.launch_speed);
    boss.lock_anchor = Vec2::new(0.0, 271.0);

    let mut shockwaves = 0;
    let mut min_timer = 0;
    for _ in 0..1500 {
        advance_tick(&mut boss, &ctx, &mut rng, &mut fx, FLOOR_Y);
        for effect in fx.drain() {
            if matches!(
                effect,
                Effect::Projectile {
                    kind: ProjectileKind::Shockwave,
                    ..
                }
            ) {
                shockwaves += 1;
            }
        }
        min_timer = min_timer.min(boss.timer);
        if !matches!(boss.state, BossState::SlamWithShockwave { .. }) {
            break;
        }
    }

    assert_eq!(shockwaves, 2, "default rules land once, no bounce");
    // the landing parks the clock at -end_lag; the increment runs after
    assert_eq!(min_timer, -policy::slam_end_lag(&ctx.difficulty) + 1);
    assert!(boss.state.attack_id().is_some());
}

#[test]
fn test_nightmare_slam_bounces_once() {
    let tuning = EncounterTuning::default();
    let mut nightmare_ctx = ctx(&tuning);
    nightmare_ctx.difficulty = nightmare_expert();
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(
        BossState::SlamWithShockwave { bounce: 0 },
        Vec2::new(0.0, 400.0),
    );
    boss.timer = 1;
    boss.velocity = Vec2::new(0.0, tuning.slam.launch_speed);
    boss.lock_anchor = Vec2::new(0.0, 271.0);

    let mut shockwave_bursts = 0;
    for _ in 0..3000 {
        advance_tick(&mut boss, &nightmare_ctx, &mut rng, &mut fx, FLOOR_Y);
        let impacts = fx
            .drain()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    Effect::Projectile {
                        kind: ProjectileKind::Shockwave,
                        ..
                    }
                )
            })
            .count();
        if impacts > 0 {
            shockwave_bursts += 1;
        }
        if !matches!(boss.state, BossState::SlamWithShockwave { .. }) {
            break;
        }
    }

    assert_eq!(shockwave_bursts, 2, "landing, bounce, landing again");
}

#[test]
fn test_circle_bursts_and_resets_immediately_in_phase_one() {
    let tuning = EncounterTuning::default();
    let ctx = ctx(&tuning);
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(
        BossState::WavyShotCircle { repeated: false },
        Vec2::new(0.0, 300.0),
    );
    // keep the redraw from landing on this same attack
    boss.last_choice = Some(AttackId::WavyShotCircle);
    boss.timer = policy::circle_telegraph_ticks(&ctx.difficulty);

    advance_tick(&mut boss, &ctx, &mut rng, &mut fx, FLOOR_Y);
    let shots = fx
        .drain()
        .iter()
        .filter(|e| {
            matches!(
                e,
                Effect::Projectile {
                    kind: ProjectileKind::WaveShot { aimed: false },
                    ..
                }
            )
        })
        .count();

    assert_eq!(shots, policy::radial_shot_count(&ctx.difficulty));
    assert!(
        !matches!(boss.state, BossState::WavyShotCircle { .. }),
        "phase one skips end-lag entirely"
    );
}

#[test]
fn test_circle_repeats_once_in_nightmare_phase_two() {
    let tuning = EncounterTuning::default();
    let mut nightmare_ctx = ctx(&tuning);
    nightmare_ctx.difficulty = nightmare_expert();
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(
        BossState::WavyShotCircle { repeated: false },
        Vec2::new(0.0, 300.0),
    );
    boss.phase_two = true;
    boss.last_choice = Some(AttackId::WavyShotCircle);
    boss.timer = 1;

    let mut bursts = 0;
    for _ in 0..400 {
        advance_tick(&mut boss, &nightmare_ctx, &mut rng, &mut fx, FLOOR_Y);
        let shots = fx
            .drain()
            .iter()
            .filter(|e| matches!(e, Effect::Projectile { .. }))
            .count();
        if shots > 0 {
            bursts += 1;
        }
        if !matches!(boss.state, BossState::WavyShotCircle { .. }) {
            break;
        }
    }

    assert_eq!(bursts, 2, "one telegraphed burst, one repeat");
    assert!(boss.state.attack_id().is_some());
}

#[test]
fn test_flight_chains_into_committed_slam() {
    let tuning = EncounterTuning::default();
    let ctx = ctx(&tuning);
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(
        BossState::WavyShotFlight {
            total_rotate: 0.0,
            circle_start: 0.0,
        },
        Vec2::new(300.0, 200.0),
    );
    boss.timer = 1;

    let mut aimed_shots = 0;
    for _ in 0..500 {
        advance_tick(&mut boss, &ctx, &mut rng, &mut fx, FLOOR_Y);
        aimed_shots += fx
            .drain()
            .iter()
            .filter(|e| {
                matches!(
                    e,
                    Effect::Projectile {
                        kind: ProjectileKind::WaveShot { aimed: true },
                        ..
                    }
                )
            })
            .count();
        if !matches!(boss.state, BossState::WavyShotFlight { .. }) {
            break;
        }
    }

    assert!(aimed_shots > 0, "the orbit fires periodic aimed shots");
    assert_eq!(boss.state, BossState::SlamWithShockwave { bounce: 2 });
    assert_eq!(boss.velocity.y, tuning.slam.launch_speed);
}

#[test]
fn test_grabby_hands_release_pair_by_default_trio_in_nightmare() {
    let tuning = EncounterTuning::default();

    for (flags, expected) in [
        (DifficultyFlags::default(), 2),
        (nightmare_expert(), 3),
    ] {
        let mut hand_ctx = ctx(&tuning);
        hand_ctx.difficulty = flags;
        let mut rng = rng();
        let mut fx = EffectBuffer::default();
        let mut boss = boss_in(
            BossState::GrabbyHands { grab_delay: 95 },
            Vec2::new(0.0, 300.0),
        );
        boss.timer = tuning.hands.release_tick;

        advance_tick(&mut boss, &hand_ctx, &mut rng, &mut fx, FLOOR_Y);
        let hands = fx
            .drain()
            .iter()
            .filter(|e| matches!(e, Effect::Hand { .. }))
            .count();
        assert_eq!(hands, expected);
    }
}

#[test]
fn test_grabby_hands_charge_command_fires_at_rolled_delay() {
    let tuning = EncounterTuning::default();
    let hand_ctx = ctx(&tuning);
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(
        BossState::GrabbyHands { grab_delay: 95 },
        Vec2::new(0.0, 300.0),
    );
    boss.timer = 95;

    advance_tick(&mut boss, &hand_ctx, &mut rng, &mut fx, FLOOR_Y);
    assert!(
        fx.drain()
            .iter()
            .any(|e| matches!(e, Effect::CommandHands))
    );
}

#[test]
fn test_wind_down_branch_depends_on_relative_height() {
    let tuning = EncounterTuning::default();
    let branch_ctx = ctx(&tuning);
    let mut rng = rng();
    let mut fx = EffectBuffer::default();

    // above the target: straight to the slam
    let mut high = boss_in(BossState::GrabbyHands { grab_delay: 90 }, Vec2::new(0.0, 300.0));
    high.timer = 101;
    high.frame = 0;
    advance_tick(&mut high, &branch_ctx, &mut rng, &mut fx, FLOOR_Y);
    fx.drain();
    assert_eq!(high.state, BossState::SlamWithShockwave { bounce: 0 });

    // below the target: climb with the orbit attack first, and record it
    // as the last choice so the bag cannot repeat it
    let mut low = boss_in(BossState::GrabbyHands { grab_delay: 90 }, Vec2::new(0.0, -50.0));
    low.timer = 101;
    low.frame = 0;
    advance_tick(&mut low, &branch_ctx, &mut rng, &mut fx, FLOOR_Y);
    fx.drain();
    assert!(matches!(low.state, BossState::WavyShotFlight { .. }));
    assert_eq!(low.last_choice, Some(AttackId::WavyShotFlight));
}

#[test]
fn test_scatter_barrage_fires_on_cadence() {
    let tuning = EncounterTuning::default();
    let mut scatter_ctx = ctx(&tuning);
    scatter_ctx.difficulty = nightmare_expert();
    let mut rng = rng();
    let mut fx = EffectBuffer::default();
    let mut boss = boss_in(
        BossState::RandomStuff {
            shot_kind: Default::default(),
        },
        Vec2::new(400.0, 300.0),
    );
    boss.phase_two = true;
    boss.timer = tuning.scatter.open_ticks + 1;

    let cadence = policy::scatter_cadence(&scatter_ctx.difficulty);
    let mut lobs = 0;
    for _ in 0..(cadence * 4) {
        advance_tick(&mut boss, &scatter_ctx, &mut rng, &mut fx, FLOOR_Y);
        for effect in fx.drain() {
            if let Effect::Projectile {
                kind: ProjectileKind::Scatter(_),
                velocity,
                ..
            } = effect
            {
                lobs += 1;
                assert!(velocity.is_finite());
            }
        }
    }

    assert_eq!(lobs, 4, "one lob per cadence window");
}

// --- policy tables ---

#[test]
fn test_radial_shot_count_table() {
    let mut flags = DifficultyFlags::default();
    assert_eq!(policy::radial_shot_count(&flags), 6);
    flags.expert = true;
    assert_eq!(policy::radial_shot_count(&flags), 8);
    flags.nightmare = true;
    assert_eq!(policy::radial_shot_count(&flags), 10);
    flags.master = true;
    assert_eq!(policy::radial_shot_count(&flags), 12);
}

#[test]
fn test_slam_end_lag_table() {
    let mut flags = DifficultyFlags::default();
    assert_eq!(policy::slam_end_lag(&flags), 120);
    flags.nightmare = true;
    assert_eq!(policy::slam_end_lag(&flags), 100);
    flags.master = true;
    assert_eq!(policy::slam_end_lag(&flags), 80);
}

// --- replication ---

#[test]
fn test_snapshot_payload_roundtrip() {
    let mut boss = boss_in(
        BossState::GrabbyHands { grab_delay: 97 },
        Vec2::new(12.0, 345.0),
    );
    boss.timer = 41;
    boss.phase_two = true;
    boss.last_choice = Some(AttackId::GrabbyHands);
    boss.available = vec![AttackId::WavyShotCircle, AttackId::RandomStuff];

    let snapshot = BossSnapshot::capture(&boss);
    let payload = snapshot.to_payload().unwrap();
    let decoded = BossSnapshot::from_payload(&payload).unwrap();
    assert_eq!(snapshot, decoded);

    let mut replica = Boss::new(Vec2::ZERO);
    decoded.apply(&mut replica);
    assert_eq!(replica.state, boss.state);
    assert_eq!(replica.timer, boss.timer);
    assert_eq!(replica.available, boss.available);
}

#[test]
fn test_snapshot_cannot_clear_phase_two() {
    let mut replica = Boss::new(Vec2::ZERO);
    replica.phase_two = true;

    let stale = BossSnapshot::capture(&Boss::new(Vec2::ZERO));
    assert!(!stale.phase_two);
    stale.apply(&mut replica);
    assert!(replica.phase_two, "phase two latches against stale snapshots");
}

#[test]
fn test_malformed_payload_is_rejected() {
    assert!(BossSnapshot::from_payload("not json").is_err());
}
