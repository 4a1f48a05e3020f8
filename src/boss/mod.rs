//! Boss domain: the sarcophagus encounter controller.
//!
//! A single entity cycles through an enumerated set of attack states, each
//! a timer-keyed procedural behavior. Selection runs through a shuffled
//! bag with no immediate repeats; a health threshold forces a one-time
//! phase escalation; every side effect funnels through an authority-gated
//! dispatch boundary so only the host session creates spawns.

mod ballistics;
mod components;
mod effects;
mod handlers;
mod policy;
mod selector;
mod state;
mod steering;
mod sync;
mod systems;
#[cfg(test)]
mod tests;

pub use ballistics::{DEFAULT_LAUNCH_VY, launch_velocity};
pub use components::{Boss, TargetView, TickContext};
pub use effects::{Effect, EffectBuffer, permitted_effects};
pub use selector::{reset_state, select_next_state};
pub use state::{AttackId, BossState, PHASE_ONE_ATTACKS, PHASE_TWO_ATTACKS, attack_pool};
pub use steering::{rotation_difference, steer_toward};
pub use sync::{BossSnapshot, BossSyncMessage};
pub use systems::advance_tick;

use bevy::prelude::*;

use crate::core::gameplay_active;
use crate::boss::effects::dispatch_effects;
use crate::boss::sync::{apply_snapshots, broadcast_snapshots};
use crate::boss::systems::{boss_tick, check_boss_death, mirror_to_transform, spawn_boss};

pub struct BossPlugin;

impl Plugin for BossPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<BossSyncMessage>()
            .add_systems(PostStartup, spawn_boss)
            .add_systems(
                FixedUpdate,
                (
                    boss_tick,
                    dispatch_effects,
                    broadcast_snapshots,
                    apply_snapshots,
                    mirror_to_transform,
                    check_boss_death,
                )
                    .chain()
                    .run_if(gameplay_active),
            );
    }
}
