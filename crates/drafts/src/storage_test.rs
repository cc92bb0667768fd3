//! Tests for storage backends

use crate::storage::{FileStorage, KeyValueStorage, MemoryStorage};

#[test]
fn test_memory_round_trip() {
    let storage = MemoryStorage::new();
    assert_eq!(storage.get("k").unwrap(), None);

    storage.set("k", "v1").unwrap();
    assert_eq!(storage.get("k").unwrap(), Some("v1".to_string()));

    storage.set("k", "v2").unwrap();
    assert_eq!(storage.get("k").unwrap(), Some("v2".to_string()));

    storage.remove("k").unwrap();
    assert_eq!(storage.get("k").unwrap(), None);
}

#[test]
fn test_memory_remove_missing_is_noop() {
    let storage = MemoryStorage::new();
    storage.remove("missing").unwrap();
}

#[test]
fn test_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path()).unwrap();

    assert_eq!(storage.get("outreach.campaign.current").unwrap(), None);

    storage
        .set("outreach.campaign.current", r#"{"message":"hi"}"#)
        .unwrap();
    assert_eq!(
        storage.get("outreach.campaign.current").unwrap(),
        Some(r#"{"message":"hi"}"#.to_string())
    );

    storage.remove("outreach.campaign.current").unwrap();
    assert_eq!(storage.get("outreach.campaign.current").unwrap(), None);
}

#[test]
fn test_file_overwrite_leaves_no_temp_file() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path()).unwrap();

    storage.set("slot", "first").unwrap();
    storage.set("slot", "second").unwrap();
    assert_eq!(storage.get("slot").unwrap(), Some("second".to_string()));

    let leftovers: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .filter(|name| name.ends_with(".tmp"))
        .collect();
    assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");
}

#[test]
fn test_file_creates_missing_dir() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("a").join("b");
    let storage = FileStorage::new(&nested).unwrap();
    storage.set("k", "v").unwrap();
    assert_eq!(storage.get("k").unwrap(), Some("v".to_string()));
}

#[cfg(unix)]
#[test]
fn test_file_permissions_owner_only() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::new(dir.path()).unwrap();
    storage.set("slot", "secret").unwrap();

    let path = dir.path().join("slot.json");
    let mode = std::fs::metadata(path).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o600);
}
