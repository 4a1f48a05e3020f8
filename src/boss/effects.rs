//! Boss domain: the authority-gated effect boundary.
//!
//! Handlers never spawn anything themselves; they describe intent by
//! pushing [`Effect`]s. One dispatcher executes the buffer, and the host
//! check lives in exactly one place instead of inside every handler.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use std::collections::HashSet;

use crate::combat::{
    self, DropKind, HandMode, ItemDropEvent, PlaySoundEvent, ProjectileKind, SoundCue,
};
use crate::core::NetworkRole;

use super::components::Boss;

/// One intended side effect of a handler tick. Damage is expressed as a
/// fraction of the boss's base damage and scaled at execution.
#[derive(Debug, Clone, Copy)]
pub enum Effect {
    Projectile {
        kind: ProjectileKind,
        origin: Vec2,
        velocity: Vec2,
        damage_frac: f32,
    },
    Hand {
        origin: Vec2,
        velocity: Vec2,
        mode: HandMode,
        sweep: f32,
        damage_frac: f32,
    },
    /// The phase-two spirit companion.
    Spirit { origin: Vec2 },
    Sound { cue: SoundCue, at: Vec2 },
    /// Telegraph spark converging on a point; rendering is out of scope,
    /// the stream is still observable.
    Spark { origin: Vec2, toward: Vec2 },
    Drop { kind: DropKind, at: Vec2 },
    /// Tell every poised hand linked to this boss to charge.
    CommandHands,
}

impl Effect {
    /// Only the host may execute spawn-type effects; sounds and telegraphs
    /// play everywhere.
    fn host_only(&self) -> bool {
        !matches!(self, Effect::Sound { .. } | Effect::Spark { .. })
    }
}

/// Per-boss buffer of effects produced this tick.
#[derive(Component, Debug, Default)]
pub struct EffectBuffer {
    effects: Vec<Effect>,
}

impl EffectBuffer {
    pub fn push(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub fn sound(&mut self, cue: SoundCue, at: Vec2) {
        self.push(Effect::Sound { cue, at });
    }

    pub fn drain(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

/// Split a buffer into the effects this session may execute and the ones
/// the authority filter discards. Pure so the gate itself is testable.
pub fn permitted_effects(effects: Vec<Effect>, is_host: bool) -> Vec<Effect> {
    effects
        .into_iter()
        .filter(|e| is_host || !e.host_only())
        .collect()
}

pub(crate) fn dispatch_effects(
    mut commands: Commands,
    role: Res<NetworkRole>,
    mut boss_query: Query<(Entity, &Boss, &mut EffectBuffer)>,
    mut hand_query: Query<(&mut combat::GraveHand, &Transform)>,
    mut sounds: MessageWriter<PlaySoundEvent>,
    mut drops: MessageWriter<ItemDropEvent>,
) {
    for (boss_entity, boss, mut buffer) in &mut boss_query {
        if buffer.is_empty() {
            continue;
        }

        // Looping cues stack across handler sub-steps; one per tick is
        // the cap, matching a single audio instance.
        let mut played: HashSet<SoundCue> = HashSet::new();

        for effect in permitted_effects(buffer.drain(), role.is_host()) {
            match effect {
                Effect::Projectile {
                    kind,
                    origin,
                    velocity,
                    damage_frac,
                } => {
                    combat::spawn_projectile(
                        &mut commands,
                        kind,
                        origin,
                        velocity,
                        boss.damage * damage_frac,
                    );
                }
                Effect::Hand {
                    origin,
                    velocity,
                    mode,
                    sweep,
                    damage_frac,
                } => {
                    combat::spawn_hand(
                        &mut commands,
                        boss_entity,
                        origin,
                        velocity,
                        mode,
                        sweep,
                        boss.damage * damage_frac,
                    );
                }
                Effect::Spirit { origin } => {
                    combat::spawn_spirit(&mut commands, boss_entity, origin);
                }
                Effect::Sound { cue, at } => {
                    if played.insert(cue) {
                        sounds.write(PlaySoundEvent { cue, at });
                    }
                }
                Effect::Spark { origin, toward } => {
                    trace!(
                        "telegraph spark {:.0},{:.0} -> {:.0},{:.0}",
                        origin.x, origin.y, toward.x, toward.y
                    );
                }
                Effect::Drop { kind, at } => {
                    drops.write(ItemDropEvent { kind, at });
                }
                Effect::CommandHands => {
                    for (mut hand, transform) in &mut hand_query {
                        if hand.owner != boss_entity {
                            continue;
                        }
                        if matches!(hand.mode, HandMode::Sweep | HandMode::Poised) {
                            hand.mode = HandMode::Charge;
                            sounds.write(PlaySoundEvent {
                                cue: SoundCue::HandCharge,
                                at: transform.translation.truncate(),
                            });
                        }
                    }
                }
            }
        }
    }
}
