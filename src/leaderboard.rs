use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};
use std::{fs, mem};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::StorageError;
use crate::game::{Completion, Difficulty};

pub const LEADERBOARD_KEY: &str = "memoryMatchLeaderboard";
pub const MAX_ENTRIES: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub moves: u32,
    #[serde(rename = "time", alias = "timeSeconds")]
    pub time_secs: u32,
    #[serde(default)]
    pub timestamp: String,
    #[serde(default)]
    pub difficulty: String,
    #[serde(default)]
    pub grid_size: u32,
}

impl LeaderboardEntry {
    pub fn from_completion(completion: &Completion, timestamp: impl Into<String>) -> Self {
        Self {
            moves: completion.moves,
            time_secs: completion.seconds_elapsed,
            timestamp: timestamp.into(),
            difficulty: completion.difficulty.key().to_string(),
            grid_size: u32::try_from(completion.grid_size).unwrap_or(u32::MAX),
        }
    }

    /// `#1: 12 moves in 40s (Easy) (2026-02-11 20:31)`
    pub fn display_line(&self, rank: usize) -> String {
        let difficulty = if self.difficulty.is_empty() {
            String::new()
        } else {
            format!(" ({})", Difficulty::display_name_for_key(&self.difficulty))
        };
        let timestamp = if self.timestamp.is_empty() {
            "Unknown"
        } else {
            self.timestamp.as_str()
        };
        format!(
            "#{}: {} moves in {}s{} ({})",
            rank, self.moves, self.time_secs, difficulty, timestamp
        )
    }
}

/// Fewest moves first, then fastest. Stable, so equal runs keep their order.
pub fn sort_entries(entries: &mut [LeaderboardEntry]) {
    entries.sort_by(|a, b| a.moves.cmp(&b.moves).then_with(|| a.time_secs.cmp(&b.time_secs)));
}

pub fn now_timestamp() -> String {
    if let Ok(dt) = glib::DateTime::now_local()
        && let Ok(text) = dt.format("%Y-%m-%d %H:%M")
    {
        return text.to_string();
    }
    "Unknown date".to_string()
}

/// Whole-value string storage addressed by a logical key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key under `dir`.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Read {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let write = || -> io::Result<()> {
            fs::create_dir_all(&self.dir)?;
            // Write-then-rename so a crash never leaves half a file behind.
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, value)?;
            fs::rename(&tmp, &path)
        };
        write().map_err(|source| StorageError::Write {
            key: key.to_string(),
            source,
        })
    }
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The best-effort list plus whatever went wrong producing it.
#[derive(Debug, Default)]
pub struct Standings {
    pub entries: Vec<LeaderboardEntry>,
    pub issues: Vec<StorageError>,
}

impl Standings {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn take_issues(&mut self) -> Vec<StorageError> {
        mem::take(&mut self.issues)
    }
}

/// Bounded, sorted top list persisted under [`LEADERBOARD_KEY`].
pub struct Leaderboard<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> Leaderboard<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: LEADERBOARD_KEY.to_string(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Never fails: missing data is an empty board, corrupt data is an
    /// empty board plus an issue.
    pub fn load(&self) -> Standings {
        let mut standings = Standings::default();
        let raw = match self.store.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return standings,
            Err(err) => {
                tracing::warn!("leaderboard unavailable: {err}");
                standings.issues.push(err);
                return standings;
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                let issue = StorageError::Corrupt {
                    key: self.key.clone(),
                    reason: err.to_string(),
                };
                tracing::warn!("{issue}");
                standings.issues.push(issue);
                return standings;
            }
        };
        let Value::Array(items) = value else {
            let issue = StorageError::NotAnArray {
                key: self.key.clone(),
            };
            tracing::warn!("{issue}");
            standings.issues.push(issue);
            return standings;
        };

        for (index, item) in items.into_iter().enumerate() {
            match serde_json::from_value::<LeaderboardEntry>(item) {
                Ok(entry) => standings.entries.push(entry),
                Err(err) => {
                    let issue = StorageError::InvalidEntry {
                        key: self.key.clone(),
                        index,
                        reason: err.to_string(),
                    };
                    tracing::warn!("{issue}");
                    standings.issues.push(issue);
                }
            }
        }
        standings
    }

    /// Merges `entry` into the stored list, keeps the best [`MAX_ENTRIES`]
    /// and writes it back. The returned entries are the merged list even
    /// when the write failed.
    pub fn save(&mut self, entry: LeaderboardEntry) -> Standings {
        let mut standings = self.load();
        standings.entries.push(entry);
        sort_entries(&mut standings.entries);
        standings.entries.truncate(MAX_ENTRIES);

        let written = serde_json::to_string(&standings.entries)
            .map_err(|source| StorageError::Encode { source })
            .and_then(|encoded| self.store.set(&self.key, &encoded));
        match written {
            Ok(()) => tracing::info!(entries = standings.entries.len(), "leaderboard saved"),
            Err(err) => {
                tracing::warn!("leaderboard not persisted: {err}");
                standings.issues.push(err);
            }
        }
        standings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(moves: u32, time_secs: u32) -> LeaderboardEntry {
        LeaderboardEntry {
            moves,
            time_secs,
            timestamp: "2026-02-11 20:31".to_string(),
            difficulty: "easy".to_string(),
            grid_size: 4,
        }
    }

    fn board_with(raw: &str) -> Leaderboard<MemoryStore> {
        let mut store = MemoryStore::new();
        store.set(LEADERBOARD_KEY, raw).unwrap();
        Leaderboard::new(store)
    }

    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&mut self, key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Write {
                key: key.to_string(),
                source: io::Error::new(io::ErrorKind::StorageFull, "quota exceeded"),
            })
        }
    }

    #[test]
    fn orders_by_moves_then_time() {
        let mut entries = vec![entry(5, 10), entry(3, 50), entry(3, 20)];
        sort_entries(&mut entries);
        let keys: Vec<(u32, u32)> = entries.iter().map(|e| (e.moves, e.time_secs)).collect();
        assert_eq!(keys, vec![(3, 20), (3, 50), (5, 10)]);
    }

    #[test]
    fn missing_value_loads_empty_without_issues() {
        let board = Leaderboard::new(MemoryStore::new());
        let standings = board.load();
        assert!(standings.entries.is_empty());
        assert!(standings.is_clean());
    }

    #[test]
    fn non_json_loads_empty() {
        let standings = board_with("{not json").load();
        assert!(standings.entries.is_empty());
        assert!(matches!(standings.issues.as_slice(), [StorageError::Corrupt { .. }]));
    }

    #[test]
    fn non_array_loads_empty() {
        let standings = board_with(r#"{"moves": 3}"#).load();
        assert!(standings.entries.is_empty());
        assert!(matches!(standings.issues.as_slice(), [StorageError::NotAnArray { .. }]));
    }

    #[test]
    fn bad_elements_are_skipped() {
        let standings =
            board_with(r#"[{"moves": 4, "time": 9}, "junk", {"moves": -1, "time": 2}]"#).load();
        assert_eq!(standings.entries.len(), 1);
        assert_eq!(standings.entries[0].moves, 4);
        assert_eq!(standings.issues.len(), 2);
        assert!(matches!(
            standings.issues[0],
            StorageError::InvalidEntry { index: 1, .. }
        ));
    }

    #[test]
    fn reads_original_field_names() {
        let raw = r#"[{"moves":7,"time":31,"timestamp":"2/11/2026, 8:31:00 PM","difficulty":"hard","gridSize":8},
                      {"moves":8,"timeSeconds":12}]"#;
        let standings = board_with(raw).load();
        assert!(standings.is_clean());
        assert_eq!(standings.entries[0].grid_size, 8);
        assert_eq!(standings.entries[0].time_secs, 31);
        assert_eq!(standings.entries[1].time_secs, 12);
        assert_eq!(standings.entries[1].difficulty, "");
    }

    #[test]
    fn save_writes_sorted_json_with_original_field_names() {
        let mut board = Leaderboard::new(MemoryStore::new());
        board.save(entry(5, 10));
        let standings = board.save(entry(3, 50));
        assert!(standings.is_clean());
        assert_eq!(standings.entries[0].moves, 3);

        let raw = board.store().get(LEADERBOARD_KEY).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["moves"], 3);
        assert_eq!(value[0]["time"], 50);
        assert_eq!(value[0]["gridSize"], 4);
        assert_eq!(value[1]["difficulty"], "easy");
    }

    #[test]
    fn eleventh_entry_drops_the_worst() {
        let mut board = Leaderboard::new(MemoryStore::new());
        for moves in 10..20 {
            board.save(entry(moves, 30));
        }
        assert_eq!(board.load().entries.len(), MAX_ENTRIES);

        let standings = board.save(entry(12, 5));
        assert_eq!(standings.entries.len(), MAX_ENTRIES);
        assert!(standings.entries.iter().all(|e| e.moves != 19));
        assert_eq!(standings.entries[2], entry(12, 5));
        assert_eq!(board.load().entries, standings.entries);
    }

    #[test]
    fn save_over_corrupt_value_starts_fresh() {
        let mut board = board_with("]]");
        let standings = board.save(entry(6, 6));
        assert_eq!(standings.entries, vec![entry(6, 6)]);
        assert_eq!(standings.issues.len(), 1);
        assert!(board.load().is_clean());
    }

    #[test]
    fn failed_write_still_returns_merged_list() {
        let mut inner = MemoryStore::new();
        inner.set(LEADERBOARD_KEY, r#"[{"moves": 9, "time": 9}]"#).unwrap();
        let mut board = Leaderboard::new(ReadOnlyStore(inner));
        let standings = board.save(entry(2, 2));
        assert_eq!(standings.entries.len(), 2);
        assert_eq!(standings.entries[0].moves, 2);
        assert!(matches!(standings.issues.as_slice(), [StorageError::Write { .. }]));
        assert_eq!(board.load().entries.len(), 1);
    }

    #[test]
    fn display_line_formats_rank_and_fallbacks() {
        assert_eq!(
            entry(12, 40).display_line(1),
            "#1: 12 moves in 40s (Easy) (2026-02-11 20:31)"
        );
        let bare = LeaderboardEntry {
            moves: 3,
            time_secs: 4,
            timestamp: String::new(),
            difficulty: "legacy".to_string(),
            grid_size: 0,
        };
        assert_eq!(bare.display_line(2), "#2: 3 moves in 4s (legacy) (Unknown)");
    }

    #[test]
    fn entry_from_completion_uses_difficulty_key() {
        let completion = Completion {
            moves: 20,
            seconds_elapsed: 75,
            difficulty: Difficulty::Hard,
            grid_size: 8,
        };
        let entry = LeaderboardEntry::from_completion(&completion, "now");
        assert_eq!(entry.difficulty, "hard");
        assert_eq!(entry.grid_size, 8);
        assert_eq!(entry.time_secs, 75);
    }
}
