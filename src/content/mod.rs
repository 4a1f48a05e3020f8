//! Content domain: designer tuning loaded from RON at startup.

mod data;
mod loader;

pub use data::*;
pub use loader::{ContentLoadError, load_tuning};

use bevy::prelude::*;
use std::path::Path;

/// Resource wrapper so systems can read tuning without knowing its origin.
#[derive(Resource, Debug, Clone, Default)]
pub struct Tuning(pub EncounterTuning);

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(load_tuning_or_default());
    }
}

fn load_tuning_or_default() -> Tuning {
    let base = Path::new("assets/data");
    match load_tuning(base) {
        Ok(tuning) => {
            info!("encounter tuning loaded from {}", base.display());
            Tuning(tuning)
        }
        Err(e) => {
            warn!("{e}; using built-in tuning defaults");
            Tuning::default()
        }
    }
}
