//! Tests for the JSON file and in-memory score stores.

use tempfile::TempDir;
use tictactoe_bot::{
    JsonFileStore, MemoryStore, Period, STORE_KEY, ScoreRecord, ScoreStore, StoreErrorKind,
};
use tictactoe_engine::RoundResult;

fn sample_record() -> ScoreRecord {
    let mut record = ScoreRecord::zeroed(Period::new(9, 2026));
    record.record(RoundResult::PlayerWin);
    record.record(RoundResult::PlayerWin);
    record.record(RoundResult::OpponentWin);
    record
}

fn setup_store() -> (TempDir, JsonFileStore) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = JsonFileStore::new(dir.path().join("progress.json"));
    (dir, store)
}

#[test]
fn test_missing_file_loads_none() {
    let (_dir, store) = setup_store();
    assert!(store.load().expect("missing file is not an error").is_none());
}

#[test]
fn test_save_then_load() {
    let (_dir, store) = setup_store();
    let record = sample_record();

    store.save(&record).expect("Save failed");
    assert_eq!(store.load().expect("Load failed"), Some(record));
}

#[test]
fn test_save_overwrites_whole_record() {
    let (_dir, store) = setup_store();
    store.save(&sample_record()).expect("Save failed");

    let zeroed = ScoreRecord::zeroed(Period::new(10, 2026));
    store.save(&zeroed).expect("Save failed");
    assert_eq!(store.load().expect("Load failed"), Some(zeroed));
}

#[test]
fn test_file_layout_is_flat_record_under_key() {
    let (_dir, store) = setup_store();
    store.save(&sample_record()).expect("Save failed");

    let text = std::fs::read_to_string(store.path()).expect("file written");
    let doc: serde_json::Value = serde_json::from_str(&text).expect("valid JSON");
    assert_eq!(
        doc[STORE_KEY],
        serde_json::json!({
            "playerWins": 2,
            "opponentWins": 1,
            "monthlyWins": 2,
            "month": 9,
            "year": 2026
        })
    );
}

#[test]
fn test_save_leaves_no_temp_file() {
    let (dir, store) = setup_store();
    store.save(&sample_record()).expect("Save failed");

    let names: Vec<String> = std::fs::read_dir(dir.path())
        .expect("readable dir")
        .map(|entry| entry.expect("entry").file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["progress.json".to_string()]);
}

#[test]
fn test_save_creates_parent_directories() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let store = JsonFileStore::new(dir.path().join("nested/deeper/progress.json"));

    store.save(&sample_record()).expect("Save failed");
    assert_eq!(store.load().expect("Load failed"), Some(sample_record()));
}

#[test]
fn test_corrupt_files_report_corrupt() {
    let (_dir, store) = setup_store();
    for text in [
        "",
        "[1, 2, 3]",
        "{\"tictactoe_bot.progress\": \"nope\"}",
        "{\"tictactoe_bot.progress\": {\"playerWins\": 1, \"month\": 2}}",
        "{\"tictactoe_bot.progress\": {\"playerWins\": -1, \"opponentWins\": 0, \"monthlyWins\": 0, \"month\": 2, \"year\": 2026}}",
    ] {
        std::fs::write(store.path(), text).expect("write");
        let err = store.load().expect_err("corrupt data must not load");
        assert_eq!(err.kind, StoreErrorKind::Corrupt, "input {}", text);
    }
}

#[test]
fn test_document_without_key_loads_none() {
    let (_dir, store) = setup_store();
    std::fs::write(store.path(), "{\"someOtherApp\": {}}").expect("write");
    assert!(store.load().expect("Load failed").is_none());
}

#[test]
fn test_unreadable_path_reports_io() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    // A directory where the file should be.
    let store = JsonFileStore::new(dir.path());
    let err = store.load().expect_err("directory is not a file");
    assert_eq!(err.kind, StoreErrorKind::Io);
}

#[test]
fn test_memory_store_round_trip_and_sharing() {
    let store = MemoryStore::new();
    let handle = store.clone();
    assert!(store.load().expect("Load failed").is_none());

    store.save(&sample_record()).expect("Save failed");
    assert_eq!(handle.load().expect("Load failed"), Some(sample_record()));
    assert_eq!(handle.save_count(), 1);
    assert!(handle.raw().expect("document stored").contains(STORE_KEY));
}

#[test]
fn test_memory_store_refuses_writes_on_request() {
    let store = MemoryStore::new();
    store.fail_saves(true);

    let err = store.save(&sample_record()).expect_err("writes refused");
    assert_eq!(err.kind, StoreErrorKind::Io);
    assert!(store.load().expect("Load failed").is_none());
}
