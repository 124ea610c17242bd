use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::game::{Difficulty, MISMATCH_DELAY};

pub const DATA_DIR_VAR: &str = "MEMORY_MATCH_DATA_DIR";
pub const DIFFICULTY_VAR: &str = "MEMORY_MATCH_DIFFICULTY";
pub const MISMATCH_DELAY_VAR: &str = "MEMORY_MATCH_MISMATCH_DELAY_MS";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub difficulty: Difficulty,
    pub mismatch_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            difficulty: Difficulty::default(),
            mismatch_delay: MISMATCH_DELAY,
        }
    }
}

fn default_data_dir() -> PathBuf {
    glib::user_data_dir().join("memory-match")
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Bad values are logged and replaced by their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut settings = Self::default();

        if let Some(dir) = lookup(DATA_DIR_VAR).filter(|v| !v.trim().is_empty()) {
            settings.data_dir = PathBuf::from(dir);
        }

        if let Some(key) = lookup(DIFFICULTY_VAR) {
            match Difficulty::from_key(&key) {
                Ok(difficulty) => settings.difficulty = difficulty,
                Err(err) => tracing::warn!(
                    "{err}; starting with {} instead",
                    settings.difficulty.name()
                ),
            }
        }

        if let Some(raw) = lookup(MISMATCH_DELAY_VAR) {
            match raw.trim().parse::<u64>() {
                Ok(ms) => settings.mismatch_delay = Duration::from_millis(ms),
                Err(err) => tracing::warn!(
                    "{MISMATCH_DELAY_VAR}={raw:?} is not a number of milliseconds ({err}); using {}ms",
                    settings.mismatch_delay.as_millis()
                ),
            }
        }

        settings
    }
}
