mod common;

use common::dated_record;
use slotledger::error::LedgerError;
use slotledger::store::{JsonFileStore, MemoryStore, RecordStore};
use std::fs;

#[test]
fn test_memory_store_assigns_unique_ids() {
    let mut store = MemoryStore::new();
    let a = store.create(dated_record("2024-01-01", "新ハナビ", 1000, 0)).unwrap();
    let b = store.create(dated_record("2024-01-01", "新ハナビ", 1000, 0)).unwrap();
    assert_ne!(a, b);
    assert_eq!(store.len(), 2);

    // Same-day records keep most-recent-first order.
    let listed = store.list().unwrap();
    assert_eq!(listed[0].id.as_deref(), Some(b.as_str()));
    assert_eq!(listed[1].id.as_deref(), Some(a.as_str()));
}

#[test]
fn test_memory_store_update_and_delete() {
    let mut store = MemoryStore::new();
    let id = store.create(dated_record("2024-01-01", "新ハナビ", 1000, 0)).unwrap();

    store
        .update(&id, dated_record("2024-01-02", "Lハナビ", 0, 100))
        .unwrap();
    let listed = store.list().unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id.as_deref(), Some(id.as_str()));
    assert_eq!(listed[0].machine_name(), "Lハナビ");

    store.delete(&id).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_missing_id_is_reported() {
    let mut store = MemoryStore::new();
    let err = store.delete("nope").unwrap_err();
    assert!(matches!(err, LedgerError::RecordNotFound(ref id) if id == "nope"));

    let err = store
        .update("nope", dated_record("2024-01-01", "新ハナビ", 0, 0))
        .unwrap_err();
    assert!(matches!(err, LedgerError::RecordNotFound(_)));
}

#[test]
fn test_json_store_persists_across_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("records.json");

    let mut store = JsonFileStore::open(&path).unwrap();
    assert!(store.list().unwrap().is_empty());
    let first = store.create(dated_record("2024-01-15", "新ハナビ", 1000, 150)).unwrap();
    let second = store.create(dated_record("2024-02-10", "Lハナビ", 2000, 0)).unwrap();
    assert!(path.exists());

    let reopened = JsonFileStore::open(&path).unwrap();
    let records = reopened.list().unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id.as_deref(), Some(second.as_str()));
    assert_eq!(records[1].id.as_deref(), Some(first.as_str()));
    assert_eq!(records[1].profit_yen, 2000);

    let mut reopened = reopened;
    reopened.delete(&first).unwrap();
    let again = JsonFileStore::open(&path).unwrap();
    assert_eq!(again.list().unwrap().len(), 1);
}

#[test]
fn test_json_store_accepts_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    fs::write(&path, "  \n").unwrap();
    let store = JsonFileStore::open(&path).unwrap();
    assert!(store.list().unwrap().is_empty());
    assert_eq!(store.path(), path.as_path());
}

#[test]
fn test_json_store_rejects_corrupt_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        JsonFileStore::open(&path),
        Err(LedgerError::Json(_))
    ));
}

#[test]
fn test_json_store_loads_numeric_ids() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let mut record = serde_json::to_value(dated_record("2023-11-03", "Lハナビ", 1000, 100)).unwrap();
    record["id"] = serde_json::json!(1700000000000i64);
    fs::write(&path, serde_json::to_string(&vec![record]).unwrap()).unwrap();

    let mut store = JsonFileStore::open(&path).unwrap();
    let records = store.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.as_deref(), Some("1700000000000"));

    store.delete("1700000000000").unwrap();
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn test_failed_write_leaves_store_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");
    let mut store = JsonFileStore::open(&path).unwrap();

    // A directory in the file's place makes every write fail.
    fs::create_dir(&path).unwrap();
    let err = store
        .create(dated_record("2024-01-15", "新ハナビ", 1000, 150))
        .unwrap_err();
    assert!(matches!(err, LedgerError::Io(_)));
    assert!(store.list().unwrap().is_empty());

    fs::remove_dir(&path).unwrap();
    store
        .create(dated_record("2024-02-10", "Lハナビ", 2000, 0))
        .unwrap();
    let reopened = JsonFileStore::open(&path).unwrap();
    let records = reopened.list().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].date(), "2024-02-10");
}
