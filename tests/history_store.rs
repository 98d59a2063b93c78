use chrono::{TimeZone, Utc};
use minimalist_lens::models::{AdviceResult, Language, Session};
use minimalist_lens::store::{
    FilesystemStore, HistoryStore, KeyValueStore, HISTORY_KEY,
};
use std::fs;
use tempfile::TempDir;

fn create_test_session(id: &str, minutes_ago: i64) -> Session {
    Session {
        id: id.to_string(),
        created_at: Utc.timestamp_millis_opt(1_700_000_000_000).unwrap()
            - chrono::Duration::minutes(minutes_ago),
        image: "data:image/jpeg;base64,AAAA".to_string(),
        questions: vec!["Q1".into(), "Q2".into(), "Q3".into()],
        answers: vec!["A1".into(), "A2".into(), "A3".into()],
        advice: AdviceResult {
            summary: "S".to_string(),
            tips: vec!["T1".to_string(), "T2".to_string()],
            reflection: "R".to_string(),
        },
        language: Language::En,
    }
}

#[test]
fn test_append_and_load_newest_first() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = HistoryStore::open(FilesystemStore::new(temp_dir.path()));

    let older = create_test_session("older", 10);
    let newer = create_test_session("newer", 0);
    store.append_and_save(older).unwrap();
    store.append_and_save(newer.clone()).unwrap();

    // A fresh store reads the same file back
    let reopened = HistoryStore::open(FilesystemStore::new(temp_dir.path()));
    let loaded = reopened.load();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0], newer);
    assert_eq!(loaded[1].id, "older");
}

#[test]
fn test_missing_directory_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    let store = HistoryStore::open(FilesystemStore::new(temp_dir.path().join("absent")));
    assert!(store.load().is_empty());
    assert!(store.is_empty());
}

#[test]
fn test_corrupt_file_loads_empty() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(
        temp_dir.path().join(format!("{}.json", HISTORY_KEY)),
        "[{\"id\": 42",
    )
    .unwrap();

    let store = HistoryStore::open(FilesystemStore::new(temp_dir.path()));
    assert!(store.load().is_empty());
}

#[test]
fn test_remove_existing_and_missing() {
    let temp_dir = TempDir::new().unwrap();
    let mut store = HistoryStore::open(FilesystemStore::new(temp_dir.path()));
    store.append_and_save(create_test_session("a", 2)).unwrap();
    store.append_and_save(create_test_session("b", 1)).unwrap();

    store.remove("a").unwrap();
    let loaded = store.load();
    assert_eq!(loaded.len(), 1);
    assert!(loaded.iter().all(|s| s.id != "a"));

    // Removing again changes nothing
    store.remove("a").unwrap();
    assert_eq!(store.load(), loaded);
}

#[test]
fn test_clear_removes_persisted_history() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FilesystemStore::new(temp_dir.path());
    let mut store = HistoryStore::open(FilesystemStore::new(temp_dir.path()));
    store.append_and_save(create_test_session("a", 0)).unwrap();
    assert!(storage.get(HISTORY_KEY).is_some());

    store.clear().unwrap();
    assert!(store.load().is_empty());
    assert!(storage.get(HISTORY_KEY).is_none());

    // Clearing twice is fine
    store.clear().unwrap();
}

#[test]
fn test_filesystem_store_rejects_path_like_keys() {
    let temp_dir = TempDir::new().unwrap();
    let storage = FilesystemStore::new(temp_dir.path());
    assert!(storage.set("../escape", "x").is_err());
    assert!(storage.get("../escape").is_none());
}
