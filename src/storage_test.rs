use super::*;

use serde::Deserialize;

fn temp_dir() -> PathBuf {
    std::env::temp_dir().join(format!("sessiongate-storage-{}", uuid::Uuid::new_v4()))
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
struct Prefs {
    theme: String,
}

// =============================================================================
// MemoryStorage
// =============================================================================

#[test]
fn memory_save_then_load_returns_value() {
    let storage = MemoryStorage::new();
    storage.save("token", "T1").unwrap();
    assert_eq!(storage.load("token").as_deref(), Some("T1"));
}

#[test]
fn memory_save_overwrites() {
    let storage = MemoryStorage::new();
    storage.save("token", "T1").unwrap();
    storage.save("token", "T2").unwrap();
    assert_eq!(storage.load("token").as_deref(), Some("T2"));
    assert_eq!(storage.len(), 1);
}

#[test]
fn memory_remove_missing_key_is_ok() {
    let storage = MemoryStorage::new();
    storage.remove("token").unwrap();
    storage.remove("token").unwrap();
    assert!(storage.is_empty());
}

#[test]
fn memory_load_missing_is_none() {
    assert_eq!(MemoryStorage::new().load("user"), None);
}

// =============================================================================
// load_json / save_json
// =============================================================================

#[test]
fn json_helpers_store_structured_value() {
    let storage = MemoryStorage::new();
    save_json(&storage, "prefs", &Prefs { theme: "dark".into() }).unwrap();
    assert_eq!(storage.load("prefs").as_deref(), Some(r#"{"theme":"dark"}"#));
    assert_eq!(load_json::<Prefs>(&storage, "prefs"), Some(Prefs { theme: "dark".into() }));
}

#[test]
fn load_json_malformed_is_none() {
    let storage = MemoryStorage::new();
    storage.save("prefs", "{not json").unwrap();
    assert_eq!(load_json::<Prefs>(&storage, "prefs"), None);
}

#[test]
fn load_json_literal_null_is_none_for_struct() {
    let storage = MemoryStorage::new();
    storage.save("prefs", "null").unwrap();
    assert_eq!(load_json::<Prefs>(&storage, "prefs"), None);
}

// =============================================================================
// FileStorage
// =============================================================================

#[test]
fn file_round_trip_survives_new_instance() {
    let dir = temp_dir();
    let first = FileStorage::in_dir(&dir);
    first.save("token", "T1").unwrap();
    first.save("user", r#"{"id":1}"#).unwrap();

    let second = FileStorage::in_dir(&dir);
    assert_eq!(second.load("token").as_deref(), Some("T1"));
    assert_eq!(second.load("user").as_deref(), Some(r#"{"id":1}"#));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn file_remove_clears_only_that_key() {
    let dir = temp_dir();
    let storage = FileStorage::in_dir(&dir);
    storage.save("token", "T1").unwrap();
    storage.save("user", "{}").unwrap();
    storage.remove("token").unwrap();

    assert_eq!(storage.load("token"), None);
    assert_eq!(storage.load("user").as_deref(), Some("{}"));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn file_missing_loads_as_empty() {
    let storage = FileStorage::in_dir(&temp_dir());
    assert_eq!(storage.load("token"), None);
}

#[test]
fn file_corrupt_loads_as_empty_and_is_replaced_on_write() {
    let dir = temp_dir();
    std::fs::create_dir_all(&dir).unwrap();
    let storage = FileStorage::in_dir(&dir);
    std::fs::write(storage.path(), "garbage").unwrap();

    assert_eq!(storage.load("token"), None);
    storage.save("token", "T9").unwrap();
    assert_eq!(storage.load("token").as_deref(), Some("T9"));

    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn file_in_dir_uses_session_file_name() {
    let storage = FileStorage::in_dir(Path::new("/var/lib/sg"));
    assert_eq!(storage.path(), Path::new("/var/lib/sg/session.json"));
}
