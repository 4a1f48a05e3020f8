//! Core domain: run configuration, difficulty flags, session RNG, and
//! network authority shared by every other domain.

mod resources;

pub use resources::{
    DifficultyFlags, GameplayPaused, NetworkRole, RunConfig, SessionRng, WorldProgress,
    gameplay_active,
};

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        let run_config = RunConfig::default();
        let rng = SessionRng(ChaCha8Rng::seed_from_u64(run_config.seed));

        app.insert_resource(run_config)
            .insert_resource(rng)
            .init_resource::<DifficultyFlags>()
            .init_resource::<NetworkRole>()
            .init_resource::<WorldProgress>()
            .init_resource::<GameplayPaused>()
            .add_systems(Startup, log_session);
    }
}

fn log_session(config: Res<RunConfig>, role: Res<NetworkRole>, difficulty: Res<DifficultyFlags>) {
    info!(
        "session start: seed={} role={:?} difficulty={:?}",
        config.seed, *role, *difficulty
    );
}
