//! Combat domain: health, projectiles, and boss-serving entities.

use bevy::prelude::*;

/// Health component for damageable entities
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    pub fn fraction(&self) -> f32 {
        self.current / self.max
    }
}

/// Flat damage reduction. The boss raises its own defense in phase two.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Defense(pub i32);

impl Defense {
    /// Post-defense damage, floored at 1 so hits always register.
    pub fn reduce(&self, amount: f32) -> f32 {
        (amount - self.0 as f32 / 2.0).max(1.0)
    }
}

/// Per-tick velocity for entities integrated by the fixed-rate simulation
/// rather than the physics engine. Units are distance per tick.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct TickVelocity(pub Vec2);

/// Remaining lifetime in simulation ticks; despawned at zero.
#[derive(Component, Debug)]
pub struct Lifetime(pub i32);

/// Scatter projectile variants. The barrage rolls one per volley; bomb and
/// skull are each weighted a third, the rest split the remainder.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ScatterKind {
    #[default]
    Bone,
    Ember,
    Shard,
    Gust,
    Wisp,
    Bomb,
    Skull,
}

impl ScatterKind {
    /// Per-tick gravity magnitude pulling the projectile back down. Also
    /// the gravity constant fed to the boss's ballistic launch solve.
    pub fn gravity(&self) -> f32 {
        match self {
            ScatterKind::Bomb => 0.2,
            ScatterKind::Skull => 0.3,
            _ => 0.25,
        }
    }
}

/// Boss-owned projectile. Damage is already difficulty-scaled at spawn.
#[derive(Component, Debug)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub damage: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProjectileKind {
    /// Sinusoidally drifting shot; `aimed` shots wiggle on a tighter wave.
    WaveShot { aimed: bool },
    /// Crawls along the arena floor away from the impact point.
    Shockwave,
    Scatter(ScatterKind),
}

/// A grabbing hand linked to the boss. Hands idle in a sweep pattern until
/// the boss commands the charge; on contact they stun the target.
#[derive(Component, Debug)]
pub struct GraveHand {
    pub owner: Entity,
    pub mode: HandMode,
    /// Signed sweep direction/rate; mirrored pairs get +1/-1.
    pub sweep: f32,
    pub age: i32,
    pub damage: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandMode {
    /// Sweeping outward to a poised position.
    Sweep,
    /// Holding position, waiting for the charge command.
    Poised,
    /// Charging the target.
    Charge,
    /// Stun-punish variant: accelerates at the target immediately.
    Lunge,
}

/// Companion spirit spawned at the phase transition; dies with its owner.
#[derive(Component, Debug)]
pub struct SpiritCompanion {
    pub owner: Entity,
}

/// Ticks of stun a hand grab inflicts.
pub const HAND_STUN_TICKS: i32 = 90;
