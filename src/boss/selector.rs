//! Boss domain: shuffled-bag attack selection.
//!
//! Attacks cycle in a random order with no immediate repeats: draws come
//! from a bag of not-yet-used attacks, refilled (minus the previous
//! choice) when empty. The forced phase transition preempts the draw the
//! first time the life threshold is crossed.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::components::{Boss, TickContext};
use super::state::{BossState, attack_pool};

/// Refill the bag from the phase-appropriate pool, excluding the previous
/// choice so a refill boundary cannot repeat it. A single-member pool has
/// nothing else to offer, so the exclusion is skipped.
fn refill_bag(boss: &mut Boss) {
    let pool = attack_pool(boss.phase_two);
    boss.available = pool.to_vec();
    if boss.available.len() > 1 {
        if let Some(last) = boss.last_choice {
            boss.available.retain(|&id| id != last);
        }
    }
}

/// Pick the next state. Only the host draws; observers keep their current
/// state until the host's decision arrives in a snapshot.
pub fn select_next_state(boss: &mut Boss, ctx: &TickContext, rng: &mut ChaCha8Rng) {
    boss.mark_dirty();
    if boss.available.is_empty() {
        refill_bag(boss);
    }
    if !ctx.is_host {
        return;
    }

    if !boss.phase_two && ctx.life_fraction <= ctx.tuning.phase.life_threshold {
        info!("life at {:.2}: forcing phase transition", ctx.life_fraction);
        boss.state = BossState::PhaseTransition;
        boss.available.clear();
        return;
    }

    let index = rng.random_range(0..boss.available.len());
    let id = boss.available.remove(index);
    boss.last_choice = Some(id);
    boss.state = BossState::from_attack(id);
    debug!("drew {:?}, {} left in bag", id, boss.available.len());
}

/// Full transition reset: retarget, draw the next state, zero the clock.
/// Also the recovery path after a forced preemption.
pub fn reset_state(boss: &mut Boss, ctx: &TickContext, rng: &mut ChaCha8Rng) {
    boss.retarget = true;
    select_next_state(boss, ctx, rng);
    boss.timer = 0;
}
