//! Headless core of the memory match game: deck building, the turn state
//! machine, the game timer and the persisted leaderboard.

pub mod config;
pub mod error;
pub mod game;
pub mod leaderboard;
pub mod logging;
pub mod status;

pub use error::{ConfigError, InputError, StorageError};
pub use game::{ClickOutcome, Completion, Difficulty, Phase, Session};
pub use leaderboard::{FileStore, Leaderboard, LeaderboardEntry, Standings};
pub use status::{Severity, StatusMessage};
