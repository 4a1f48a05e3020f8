//! Loader for the RON tuning file at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::EncounterTuning;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

/// Load a single RON struct from a file.
fn load_single_file<T>(path: &Path) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let file_name = path.display().to_string();
    let contents = fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: file_name.clone(),
        message: format!("IO error: {}", e),
    })?;

    ron_options()
        .from_str(&contents)
        .map_err(|e| ContentLoadError {
            file: file_name,
            message: format!("Parse error: {}", e),
        })
}

/// Load encounter tuning from assets/data/encounter_tuning.ron.
pub fn load_tuning(base_path: &Path) -> Result<EncounterTuning, ContentLoadError> {
    load_single_file::<EncounterTuning>(&base_path.join("encounter_tuning.ron"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shipped_tuning_file_parses() {
        let base = Path::new(env!("CARGO_MANIFEST_DIR")).join("assets/data");
        let tuning = load_tuning(&base).expect("shipped tuning file should parse");
        assert!(tuning.phase.life_threshold > 0.0 && tuning.phase.life_threshold < 1.0);
        assert!(tuning.hover.duration_max > tuning.hover.duration_min);
    }

    #[test]
    fn test_missing_file_is_an_error_not_a_panic() {
        let err = load_tuning(Path::new("/nonexistent")).unwrap_err();
        assert!(err.message.contains("IO error"));
        assert!(err.to_string().contains("encounter_tuning.ron"));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = std::env::temp_dir().join("sepulcher_tuning_test");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join("encounter_tuning.ron"),
            "(phase: (life_threshold: 0.5))",
        )
        .unwrap();

        let tuning = load_tuning(&dir).expect("partial file should parse");
        assert_eq!(tuning.phase.life_threshold, 0.5);
        // untouched sections come from defaults
        assert_eq!(tuning.targeting.grace_ticks, 60);
    }
}
