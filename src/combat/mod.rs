//! Combat domain: health, boss-owned projectiles, and the entities that
//! serve the encounter (grave hands, spirit companion).

mod components;
mod events;
mod spawn;
mod systems;

pub use components::{
    Defense, GraveHand, HAND_STUN_TICKS, HandMode, Health, Lifetime, Projectile, ProjectileKind,
    ScatterKind, SpiritCompanion, TickVelocity,
};
pub use events::{
    BossDefeatedEvent, DamageEvent, DropKind, ItemDropEvent, PlaySoundEvent, SoundCue,
};
pub use spawn::{spawn_hand, spawn_projectile, spawn_spirit};

use bevy::prelude::*;

use crate::core::gameplay_active;
use crate::combat::systems::{
    apply_damage, cleanup_orphans, detect_contact, drain_drops, drain_sounds, handle_boss_defeat,
    integrate_hands, player_attack, projectile_flight, tick_lifetimes, update_hands,
};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<PlaySoundEvent>()
            .add_message::<DamageEvent>()
            .add_message::<ItemDropEvent>()
            .add_message::<BossDefeatedEvent>()
            .add_systems(
                FixedUpdate,
                (
                    projectile_flight,
                    update_hands,
                    integrate_hands,
                    tick_lifetimes,
                )
                    .chain()
                    .run_if(gameplay_active),
            )
            .add_systems(
                Update,
                (
                    player_attack,
                    detect_contact,
                    apply_damage,
                    cleanup_orphans,
                    drain_sounds,
                    drain_drops,
                    handle_boss_defeat,
                ),
            );
    }
}
