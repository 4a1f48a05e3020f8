//! Core domain: shared resources for session configuration and authority.

use bevy::prelude::*;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

/// Resource tracking if gameplay should be paused.
/// Gameplay is paused if any source is active.
#[derive(Resource, Debug, Default)]
pub struct GameplayPaused {
    pub sources: HashSet<String>,
}

impl GameplayPaused {
    pub fn is_paused(&self) -> bool {
        !self.sources.is_empty()
    }

    pub fn pause(&mut self, source: impl Into<String>) {
        self.sources.insert(source.into());
    }

    pub fn unpause(&mut self, source: impl Into<String>) {
        self.sources.remove(&source.into());
    }
}

/// Run condition: returns true only when gameplay is not paused
pub fn gameplay_active(paused: Res<GameplayPaused>) -> bool {
    !paused.is_paused()
}

#[derive(Resource, Debug)]
pub struct RunConfig {
    pub seed: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: rand::rng().random(),
        }
    }
}

/// Session-wide combat RNG. Seeded from [`RunConfig`] so a session replays
/// identically; only the host's draws become authoritative decisions.
#[derive(Resource, Debug)]
pub struct SessionRng(pub ChaCha8Rng);

/// Which role this process plays in a shared session. Exactly one process
/// is the host; it alone creates spawns and makes random decisions that
/// observers cannot re-derive.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NetworkRole {
    #[default]
    Host,
    Observer,
}

impl NetworkRole {
    pub fn is_host(&self) -> bool {
        matches!(self, NetworkRole::Host)
    }
}

/// World difficulty surface consulted by the encounter policy functions.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct DifficultyFlags {
    /// Post-midgame world escalation.
    pub hard: bool,
    /// Expert ruleset.
    pub expert: bool,
    /// Master tier layered on expert.
    pub master: bool,
    /// Opt-in enhanced ruleset layered over everything else.
    pub nightmare: bool,
}

impl DifficultyFlags {
    /// The harshest tier: master rules under the enhanced ruleset.
    pub fn apex(&self) -> bool {
        self.master && self.nightmare
    }
}

/// Run-wide progression flags that outlive any single encounter.
#[derive(Resource, Debug, Default)]
pub struct WorldProgress {
    /// Set once the sarcophagus has been defeated this world.
    pub sarcophagus_downed: bool,
}
