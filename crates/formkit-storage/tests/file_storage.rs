use formkit_storage::{
    FileStore, Storage, StorageBackend, StorageConfig, StorageConfigBuilder, StorageError,
};
use tempfile::TempDir;

#[test]
fn round_trip_through_facade_and_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    let config = StorageConfig::default();

    let values = ["0", "", "  padded  ", "quote\"d", "emoji 🚀", "multi\nline"];

    let storage = Storage::with_config(FileStore::open(&path, &config).unwrap(), config.clone());
    for (i, value) in values.iter().enumerate() {
        storage.set_item(&format!("key{}", i), value).unwrap();
    }

    let reopened = Storage::with_config(FileStore::open(&path, &config).unwrap(), config);
    for (i, value) in values.iter().enumerate() {
        assert_eq!(
            reopened.get_item(&format!("key{}", i)).unwrap().as_deref(),
            Some(*value)
        );
    }
}

#[test]
fn quota_overflow_is_not_persisted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    let config = StorageConfigBuilder::testing()
        .quota_bytes(Some(16))
        .build()
        .expect("Failed to build config");

    let storage = Storage::with_config(FileStore::open(&path, &config).unwrap(), config.clone());
    storage.set_item("count", "9").unwrap();

    let err = storage.set_item("note", "this will not fit").unwrap_err();
    assert!(matches!(err, StorageError::QuotaExceeded { .. }));

    let reopened = FileStore::open(&path, &config).unwrap();
    assert_eq!(reopened.keys().unwrap(), vec!["count".to_string()]);
}

#[test]
fn counter_value_is_stored_as_text() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("storage.json");
    let config = StorageConfig::default();

    let storage = Storage::with_config(FileStore::open(&path, &config).unwrap(), config);
    storage.set_display("count", &5u32).unwrap();

    assert_eq!(storage.get_item("count").unwrap().as_deref(), Some("5"));
    assert_eq!(storage.get_parsed::<i64>("count").unwrap(), Some(5));
    assert_eq!(storage.backend().path(), path.as_path());
}
