use std::io;

use thiserror::Error;

/// Problems with a difficulty preset. Fatal to the action that hit them,
/// never to the running game.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Unknown difficulty: {0}")]
    UnknownDifficulty(String),
    #[error("Difficulty {name} has grid size {grid_size}; it must be even and at least 2")]
    InvalidGridSize { name: String, grid_size: usize },
    #[error("Difficulty {name} needs {needed} symbols but only {available} are configured")]
    InsufficientSymbols {
        name: String,
        needed: usize,
        available: usize,
    },
    #[error("Difficulty {name} repeats a symbol in its palette")]
    DuplicateSymbols { name: String },
}

/// Failures around the persisted leaderboard. Callers recover by falling
/// back to an empty (or unpersisted) list.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to read {key}: {source}")]
    Read {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("Failed to save {key}: {source}")]
    Write {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("Stored {key} is not valid JSON: {reason}")]
    Corrupt { key: String, reason: String },
    #[error("Stored {key} is not a list of entries")]
    NotAnArray { key: String },
    #[error("Skipped invalid entry #{index} in {key}: {reason}")]
    InvalidEntry {
        key: String,
        index: usize,
        reason: String,
    },
    #[error("Failed to encode leaderboard: {source}")]
    Encode {
        #[source]
        source: serde_json::Error,
    },
}

/// Malformed UI events. Ignored, state is left as it was.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Card {index} is outside the {len}-card board")]
    CardOutOfRange { index: usize, len: usize },
}
