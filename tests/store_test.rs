//! Tests for the progress and highscore store.

use slide_puzzle::{FileStorage, HighscoreRecord, KvStorage, MemoryStorage, ProgressStore};
use tempfile::tempdir;

fn store() -> ProgressStore<MemoryStorage> {
    ProgressStore::new(MemoryStorage::new())
}

#[test]
fn test_absent_highscore() {
    assert!(store().highscore(1).is_none());
}

#[test]
fn test_first_submission_is_best() {
    let store = store();
    let score = HighscoreRecord::new(10, Some(50));
    assert!(store.submit_score(2, &score, true).expect("submit"));
    assert_eq!(store.highscore(2), Some(score));
}

#[test]
fn test_lower_time_beats_more_moves() {
    let store = store();
    store
        .submit_score(2, &HighscoreRecord::new(10, Some(50)), true)
        .expect("submit");

    let better = HighscoreRecord::new(12, Some(40));
    assert!(store.submit_score(2, &better, true).expect("submit"));
    assert_eq!(store.highscore(2), Some(better));
}

#[test]
fn test_worse_time_does_not_replace() {
    let store = store();
    store
        .submit_score(2, &HighscoreRecord::new(10, Some(40)), true)
        .expect("submit");
    assert!(
        !store
            .submit_score(2, &HighscoreRecord::new(5, Some(41)), true)
            .expect("submit")
    );
}

#[test]
fn test_time_tie_broken_by_moves() {
    let store = store();
    store
        .submit_score(3, &HighscoreRecord::new(20, Some(30)), true)
        .expect("submit");
    assert!(
        store
            .submit_score(3, &HighscoreRecord::new(15, Some(30)), true)
            .expect("submit")
    );
    assert!(
        !store
            .submit_score(3, &HighscoreRecord::new(15, Some(30)), true)
            .expect("submit")
    );
}

#[test]
fn test_equal_moves_without_timer_do_not_replace() {
    let store = store();
    store
        .submit_score(1, &HighscoreRecord::new(10, None), false)
        .expect("submit");
    assert!(
        !store
            .submit_score(1, &HighscoreRecord::new(10, None), false)
            .expect("submit")
    );
    assert!(
        store
            .submit_score(1, &HighscoreRecord::new(9, None), false)
            .expect("submit")
    );
}

#[test]
fn test_previous_record_without_time_counts_as_absent() {
    let store = store();
    store
        .submit_score(2, &HighscoreRecord::new(3, None), true)
        .expect("submit");
    // The stored record has no time, so any timed result replaces it.
    assert!(
        store
            .submit_score(2, &HighscoreRecord::new(50, Some(999)), true)
            .expect("submit")
    );
}

#[test]
fn test_malformed_highscore_treated_as_absent() {
    let storage = MemoryStorage::new();
    storage.set("highscore_4", "not json").expect("set");
    let store = ProgressStore::new(storage);

    assert!(store.highscore(4).is_none());
    assert!(
        store
            .submit_score(4, &HighscoreRecord::new(99, Some(99)), true)
            .expect("submit")
    );
    assert!(store.highscore(4).is_some());
}

#[test]
fn test_unlock_defaults_to_zero() {
    assert_eq!(store().unlocked_level(), 0);
}

#[test]
fn test_unlock_is_monotonic() {
    let store = store();
    store.set_unlocked_level(2).expect("set");
    store.set_unlocked_level(1).expect("set");
    assert_eq!(store.unlocked_level(), 2);

    store.set_unlocked_level(5).expect("set");
    assert_eq!(store.unlocked_level(), 5);
}

#[test]
fn test_garbage_unlock_value_defaults_to_zero() {
    let storage = MemoryStorage::new();
    storage.set("unlocked_level", "banana").expect("set");
    let store = ProgressStore::new(storage);
    assert_eq!(store.unlocked_level(), 0);
}

#[test]
fn test_persisted_record_layout() {
    let json =
        serde_json::to_string(&HighscoreRecord::new(12, Some(40))).expect("encode");
    assert_eq!(json, r#"{"moveCount":12,"elapsedSeconds":40}"#);

    let json = serde_json::to_string(&HighscoreRecord::new(7, None)).expect("encode");
    assert_eq!(json, r#"{"moveCount":7}"#);

    let decoded: HighscoreRecord =
        serde_json::from_str(r#"{"moveCount":3}"#).expect("decode");
    assert_eq!(*decoded.move_count(), 3);
    assert_eq!(*decoded.elapsed_seconds(), None);
}

#[test]
fn test_file_storage_round_trip() {
    let dir = tempdir().expect("temp dir");
    let storage = FileStorage::new(dir.path().join("data"));

    assert_eq!(storage.get("missing").expect("get"), None);
    storage.set("unlocked_level", "3").expect("set");
    assert_eq!(
        storage.get("unlocked_level").expect("get").as_deref(),
        Some("3")
    );
}

#[test]
fn test_progress_survives_store_reopen() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("data");

    {
        let store = ProgressStore::new(FileStorage::new(&path));
        store.set_unlocked_level(4).expect("set");
        store
            .submit_score(1, &HighscoreRecord::new(9, None), false)
            .expect("submit");
    }

    let store = ProgressStore::new(FileStorage::new(&path));
    assert_eq!(store.unlocked_level(), 4);
    assert_eq!(store.highscore(1), Some(HighscoreRecord::new(9, None)));
}
