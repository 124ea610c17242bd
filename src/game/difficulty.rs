use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

const FRUITS: [&str; 18] = [
    "🍎", "🍌", "🍇", "🍒", "🍉", "🍍", "🥝", "🍑", "🍊", "🍋", "🍐", "🥭", "🍓", "🫐", "🥥", "🍈",
    "🍏", "🍅",
];

const PANTRY: [&str; 14] = [
    "🥕", "🌽", "🥔", "🍠", "🥜", "🌰", "🍯", "🥛", "🍼", "🧀", "🥚", "🍳", "🥞", "🥨",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Stable key used in settings and in persisted leaderboard entries.
    pub fn key(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn grid_size(self) -> usize {
        match self {
            Difficulty::Easy => 4,
            Difficulty::Medium => 6,
            Difficulty::Hard => 8,
        }
    }

    pub fn config(self) -> DifficultyConfig {
        let palette: Vec<&str> = match self {
            Difficulty::Easy => FRUITS[..8].to_vec(),
            Difficulty::Medium => FRUITS.to_vec(),
            Difficulty::Hard => FRUITS.iter().chain(PANTRY.iter()).copied().collect(),
        };
        DifficultyConfig::new(self.name(), self.grid_size(), palette)
    }

    pub fn from_key(key: &str) -> Result<Self, ConfigError> {
        let normalized = key.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|d| d.key() == normalized)
            .ok_or_else(|| ConfigError::UnknownDifficulty(key.to_string()))
    }

    /// Display name for a stored key, falling back to the key itself.
    pub fn display_name_for_key(key: &str) -> String {
        Self::from_key(key)
            .map(|d| d.name().to_string())
            .unwrap_or_else(|_| key.to_string())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A square board layout plus the palette its pairs are drawn from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DifficultyConfig {
    pub name: String,
    pub grid_size: usize,
    pub symbols: Vec<String>,
}

impl DifficultyConfig {
    pub fn new<S: Into<String>>(name: &str, grid_size: usize, symbols: impl IntoIterator<Item = S>) -> Self {
        Self {
            name: name.to_string(),
            grid_size,
            symbols: symbols.into_iter().map(Into::into).collect(),
        }
    }

    pub fn card_count(&self) -> usize {
        self.grid_size * self.grid_size
    }

    pub fn total_pairs(&self) -> usize {
        self.card_count() / 2
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 || self.grid_size % 2 != 0 {
            return Err(ConfigError::InvalidGridSize {
                name: self.name.clone(),
                grid_size: self.grid_size,
            });
        }
        let needed = self.total_pairs();
        if self.symbols.len() < needed {
            return Err(ConfigError::InsufficientSymbols {
                name: self.name.clone(),
                needed,
                available: self.symbols.len(),
            });
        }
        let mut seen = HashSet::with_capacity(needed);
        if !self.symbols[..needed].iter().all(|s| seen.insert(s.as_str())) {
            return Err(ConfigError::DuplicateSymbols {
                name: self.name.clone(),
            });
        }
        Ok(())
    }
}
