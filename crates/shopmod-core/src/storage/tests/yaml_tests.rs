use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_yaml::Value;
use tempfile::tempdir;

use crate::storage::error::StorageSystemError;
use crate::storage::local::LocalStorageProvider;
use crate::storage::lock::FileLockRegistry;
use crate::storage::provider::FileStorageProvider;
use crate::storage::yaml::YamlFileStorage;

fn create_storage(file: &str) -> (tempfile::TempDir, YamlFileStorage) {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider: Arc<dyn FileStorageProvider> =
        Arc::new(LocalStorageProvider::new(temp_dir.path().to_path_buf()));
    let storage = YamlFileStorage::new(
        provider,
        PathBuf::from(file),
        Arc::new(FileLockRegistry::new()),
    );
    (temp_dir, storage)
}

#[test]
fn test_get_missing_file_yields_null() {
    let (_temp_dir, storage) = create_storage("absent.yaml");
    let value = storage.get().expect("missing file must not be an error");
    assert!(value.is_null());
}

#[tokio::test]
async fn test_save_and_get_round_trip() {
    let (_temp_dir, storage) = create_storage("config/shops/1.yaml");

    let data: Value = serde_yaml::from_str(
        "shop_id: 1\nactive_modules:\n  - first\n  - second\n",
    )
    .expect("fixture yaml");

    storage.save(&data).await.expect("save");
    let loaded = storage.get().expect("get");
    assert_eq!(loaded, data);
}

#[tokio::test]
async fn test_save_preserves_sequence_order() {
    let (_temp_dir, storage) = create_storage("ordered.yaml");

    let data: Value =
        serde_yaml::from_str("items:\n  - z\n  - a\n  - m\n").expect("fixture yaml");
    storage.save(&data).await.expect("save");

    let loaded = storage.get().expect("get");
    let items: Vec<String> =
        serde_yaml::from_value(loaded["items"].clone()).expect("items sequence");
    assert_eq!(items, vec!["z", "a", "m"]);
}

#[test]
fn test_get_corrupt_file_is_deserialization_error() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let provider: Arc<dyn FileStorageProvider> =
        Arc::new(LocalStorageProvider::new(temp_dir.path().to_path_buf()));
    provider
        .write_string(Path::new("broken.yaml"), "a: [unclosed\n- ]broken")
        .expect("write fixture");

    let storage = YamlFileStorage::new(
        provider,
        PathBuf::from("broken.yaml"),
        Arc::new(FileLockRegistry::new()),
    );

    let error = storage.get().expect_err("corrupt yaml must fail");
    assert!(matches!(
        error,
        StorageSystemError::DeserializationError { .. }
    ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_saves_never_tear_the_file() {
    let (_temp_dir, storage) = create_storage("contended.yaml");

    let first: Value = serde_yaml::from_str("writer: first\npayload: [1, 2, 3]\n").expect("yaml");
    let second: Value = serde_yaml::from_str("writer: second\npayload: [4, 5, 6]\n").expect("yaml");

    let storage_a = storage.clone();
    let storage_b = storage.clone();
    let data_a = first.clone();
    let data_b = second.clone();

    let (result_a, result_b) = tokio::join!(
        tokio::spawn(async move { storage_a.save(&data_a).await }),
        tokio::spawn(async move { storage_b.save(&data_b).await }),
    );
    result_a.expect("task a").expect("save a");
    result_b.expect("task b").expect("save b");

    // The file must parse and equal the state of exactly one of the writes.
    let loaded = storage.get().expect("file must not be torn");
    assert!(loaded == first || loaded == second);
}

#[test]
fn test_lock_registry_hands_out_one_lock_per_resource() {
    let registry = FileLockRegistry::new();

    let a1 = registry.lock_for(Path::new("/var/shop/config/shops/1.yaml"));
    let a2 = registry.lock_for(Path::new("/var/shop/config/shops/1.yaml"));
    let b = registry.lock_for(Path::new("/var/shop/config/shops/2.yaml"));

    assert!(Arc::ptr_eq(&a1, &a2));
    assert!(!Arc::ptr_eq(&a1, &b));
}
