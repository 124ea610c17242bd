use std::fs;

use memory_match::leaderboard::{
    FileStore, KeyValueStore, Leaderboard, LeaderboardEntry, LEADERBOARD_KEY, MAX_ENTRIES,
};
use memory_match::{Completion, Difficulty, StorageError};

fn completion(moves: u32, seconds: u32) -> Completion {
    Completion {
        moves,
        seconds_elapsed: seconds,
        difficulty: Difficulty::Medium,
        grid_size: 6,
    }
}

#[test]
fn file_store_persists_across_instances() {
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().join("nested").join("memory-match");

    let mut board = Leaderboard::new(FileStore::new(&data_dir));
    for (moves, secs) in [(5, 10), (3, 50), (3, 20)] {
        let standings =
            board.save(LeaderboardEntry::from_completion(&completion(moves, secs), "2026-10-17 09:00"));
        assert!(standings.is_clean());
    }

    let reopened = Leaderboard::new(FileStore::new(&data_dir));
    let entries = reopened.load().entries;
    let keys: Vec<(u32, u32)> = entries.iter().map(|e| (e.moves, e.time_secs)).collect();
    assert_eq!(keys, vec![(3, 20), (3, 50), (5, 10)]);
    assert!(entries.iter().all(|e| e.difficulty == "medium" && e.grid_size == 6));
}

#[test]
fn file_store_missing_file_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    assert!(store.get(LEADERBOARD_KEY).unwrap().is_none());
    let standings = Leaderboard::new(store).load();
    assert!(standings.entries.is_empty());
    assert!(standings.is_clean());
}

#[test]
fn tampered_file_is_tolerated_and_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileStore::new(dir.path());
    fs::write(store.path_for(LEADERBOARD_KEY), "\"just a string\"").unwrap();

    let mut board = Leaderboard::new(store);
    let loaded = board.load();
    assert!(loaded.entries.is_empty());
    assert!(matches!(loaded.issues.as_slice(), [StorageError::NotAnArray { .. }]));

    let saved = board.save(LeaderboardEntry::from_completion(&completion(9, 9), "now"));
    assert_eq!(saved.entries.len(), 1);
    assert!(board.load().is_clean());
}

#[test]
fn board_stays_bounded() {
    let dir = tempfile::tempdir().unwrap();
    let mut board = Leaderboard::new(FileStore::new(dir.path()));
    for moves in (1..=15).rev() {
        board.save(LeaderboardEntry::from_completion(&completion(moves, 1), "now"));
    }
    let entries = board.load().entries;
    assert_eq!(entries.len(), MAX_ENTRIES);
    assert_eq!(entries.first().unwrap().moves, 1);
    assert_eq!(entries.last().unwrap().moves, 10);
}

#[test]
fn unwritable_location_reports_but_returns_list() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, "not a directory").unwrap();

    let mut board = Leaderboard::new(FileStore::new(&blocker));
    let standings = board.save(LeaderboardEntry::from_completion(&completion(4, 4), "now"));
    assert_eq!(standings.entries.len(), 1);
    assert!(standings
        .issues
        .iter()
        .any(|issue| matches!(issue, StorageError::Write { .. })));
}
