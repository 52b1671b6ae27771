//! Collection Tests
//!
//! These tests verify in-memory behaviour:
//! - Identifier allocation and monotonicity
//! - Lookup and absence semantics
//! - Deletion (memory only, first match, silent no-op)
//! - Config validation

use std::collections::HashSet;

use objstore::collection::FIRST_ID;
use objstore::{Collection, Config, StoreError, Value};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_collection() -> (TempDir, Collection) {
    let temp_dir = TempDir::new().unwrap();
    let collection = Collection::new(temp_dir.path().join("objects.dat"));
    (temp_dir, collection)
}

// =============================================================================
// Create Tests
// =============================================================================

#[test]
fn test_new_collection_defaults() {
    let (_temp, collection) = setup_temp_collection();

    assert_eq!(collection.object_count(), 0);
    assert!(collection.is_empty());
    assert_eq!(collection.next_id(), FIRST_ID);
}

#[test]
fn test_new_does_no_io() {
    let (temp, collection) = setup_temp_collection();

    assert!(!collection.path().exists());
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_create_assigns_sequential_ids() {
    let (_temp, mut collection) = setup_temp_collection();

    let first = collection.create_object().unwrap().id();
    let second = collection.create_object().unwrap().id();
    let third = collection.create_object().unwrap().id();

    assert_eq!((first, second, third), (1, 2, 3));
    assert_eq!(collection.next_id(), 4);
    assert_eq!(collection.object_count(), 3);
}

#[test]
fn test_create_returns_populatable_record() {
    let (_temp, mut collection) = setup_temp_collection();

    let record = collection.create_object().unwrap();
    record.set_entry("name", "a");
    let id = record.id();

    let stored = collection.get_object(id).unwrap();
    assert_eq!(stored.get_entry("name"), Some(&Value::from("a")));
}

#[test]
fn test_create_never_assigns_zero() {
    let (_temp, mut collection) = setup_temp_collection();

    for _ in 0..10 {
        assert_ne!(collection.create_object().unwrap().id(), 0);
    }
}

#[test]
fn test_ids_not_reused_after_delete_of_highest() {
    let (_temp, mut collection) = setup_temp_collection();

    collection.create_object().unwrap();
    let highest = collection.create_object().unwrap().id();
    collection.delete_object(highest);

    let next = collection.create_object().unwrap().id();
    assert_eq!(next, highest + 1);
}

#[test]
fn test_ids_unique_after_mixed_operations() {
    let (_temp, mut collection) = setup_temp_collection();

    for i in 0..50u32 {
        let id = collection.create_object().unwrap().id();
        if i % 3 == 0 {
            collection.delete_object(id);
        }
        if i % 7 == 0 {
            collection.delete_object(id / 2);
        }
    }

    let ids: Vec<u32> = collection.iter().map(|r| r.id()).collect();
    let unique: HashSet<u32> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len());
    assert!(ids.iter().all(|&id| id < collection.next_id()));
}

#[test]
fn test_iteration_follows_creation_order() {
    let (_temp, mut collection) = setup_temp_collection();

    for _ in 0..5 {
        collection.create_object().unwrap();
    }
    collection.delete_object(2);

    let ids: Vec<u32> = collection.iter().map(|r| r.id()).collect();
    assert_eq!(ids, vec![1, 3, 4, 5]);
}

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_get_unknown_id_is_none() {
    let (_temp, mut collection) = setup_temp_collection();
    collection.create_object().unwrap();

    assert!(collection.get_object(99).is_none());
    assert!(collection.get_object(0).is_none());
}

#[test]
fn test_get_object_mut_edits_in_place() {
    let (_temp, mut collection) = setup_temp_collection();
    let id = collection.create_object().unwrap().id();

    collection
        .get_object_mut(id)
        .unwrap()
        .set_entry("count", 5);

    assert_eq!(
        collection.get_object(id).unwrap().get_entry("count"),
        Some(&Value::Integer(5))
    );
}

// =============================================================================
// Delete Tests
// =============================================================================

#[test]
fn test_delete_removes_record() {
    let (_temp, mut collection) = setup_temp_collection();
    let id = collection.create_object().unwrap().id();

    let removed = collection.delete_object(id).unwrap();

    assert_eq!(removed.id(), id);
    assert_eq!(collection.object_count(), 0);
    assert!(collection.get_object(id).is_none());
}

#[test]
fn test_delete_unknown_is_noop() {
    let (_temp, mut collection) = setup_temp_collection();
    collection.create_object().unwrap();

    assert!(collection.delete_object(42).is_none());
    assert_eq!(collection.object_count(), 1);
}

#[test]
fn test_delete_twice() {
    let (_temp, mut collection) = setup_temp_collection();
    let id = collection.create_object().unwrap().id();

    assert!(collection.delete_object(id).is_some());
    assert!(collection.delete_object(id).is_none());
}

#[test]
fn test_delete_does_not_touch_disk() {
    let (_temp, mut collection) = setup_temp_collection();
    let id = collection.create_object().unwrap().id();
    collection.save().unwrap();
    let before = std::fs::read(collection.path()).unwrap();

    collection.delete_object(id);

    let after = std::fs::read(collection.path()).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_create_does_not_touch_disk() {
    let (_temp, mut collection) = setup_temp_collection();

    collection.create_object().unwrap();

    assert!(!collection.path().exists());
}

// =============================================================================
// Config Tests
// =============================================================================

#[test]
fn test_config_builder() {
    let config = Config::builder()
        .path("data/objects.dat")
        .atomic_save(false)
        .sync_on_save(false)
        .max_field_len(1024)
        .build()
        .unwrap();

    assert_eq!(config.path, std::path::PathBuf::from("data/objects.dat"));
    assert!(!config.atomic_save);
    assert!(!config.sync_on_save);
    assert_eq!(config.max_field_len, 1024);
}

#[test]
fn test_config_rejects_empty_path() {
    let result = Config::builder().path("").build();
    assert!(matches!(result, Err(StoreError::Config(_))));
}

#[test]
fn test_config_rejects_zero_field_len() {
    let result = Config::builder().max_field_len(0).build();
    assert!(matches!(result, Err(StoreError::Config(_))));
}
