//! Combat domain: combat-related events and audio cues.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Audio cue identifiers. Playback is best-effort; the simulation never
/// reads anything back from the audio side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    /// Looping hover rumble while the boss floats.
    Hover,
    /// Looping drone during the phase transition.
    SpiritDrone,
    PhaseShift,
    Slam,
    /// Generic ground-impact thud accompanying a slam.
    Impact,
    Shot,
    BigShot,
    HandCharge,
    BombLob,
    SkullLaunch,
    ScatterLob,
}

#[derive(Debug)]
pub struct PlaySoundEvent {
    pub cue: SoundCue,
    pub at: Vec2,
}

impl Message for PlaySoundEvent {}

#[derive(Debug)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: f32,
}

impl Message for DamageEvent {}

/// Loot markers handed to the (out-of-scope) item layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropKind {
    /// Re-summon item dropped on the entrance slam before the first kill.
    SummonRelic,
}

#[derive(Debug)]
pub struct ItemDropEvent {
    pub kind: DropKind,
    pub at: Vec2,
}

impl Message for ItemDropEvent {}

#[derive(Debug)]
pub struct BossDefeatedEvent {
    pub boss: Entity,
}

impl Message for BossDefeatedEvent {}
