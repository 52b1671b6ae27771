//! SharedCollection Tests
//!
//! Tests verify:
//! - Handles cloned from one collection see the same state
//! - Concurrent creates never hand out duplicate identifiers
//! - Save/load through the shared handle

use std::collections::HashSet;
use std::thread;

use objstore::{Collection, SharedCollection, Value};
use tempfile::TempDir;

fn setup_shared() -> (TempDir, SharedCollection) {
    let temp_dir = TempDir::new().unwrap();
    let collection = Collection::new(temp_dir.path().join("shared.dat"));
    (temp_dir, SharedCollection::new(collection))
}

#[test]
fn test_clones_share_state() {
    let (_temp, shared) = setup_shared();
    let other = shared.clone();

    let id = shared
        .create_with(|record| {
            record.set_entry("owner", "first");
        })
        .unwrap();

    let record = other.get_object(id).unwrap();
    assert_eq!(record.get_entry("owner"), Some(&Value::from("first")));
    assert_eq!(other.object_count(), 1);
}

#[test]
fn test_concurrent_creates_are_unique() {
    let (_temp, shared) = setup_shared();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let shared = shared.clone();
            thread::spawn(move || {
                (0..100)
                    .map(|i| {
                        shared
                            .create_with(|record| {
                                record.set_entry("thread", t);
                                record.set_entry("seq", i);
                            })
                            .unwrap()
                    })
                    .collect::<Vec<u32>>()
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.join().unwrap() {
            assert!(ids.insert(id), "duplicate id {}", id);
        }
    }

    assert_eq!(ids.len(), 800);
    assert_eq!(shared.object_count(), 800);
    assert_eq!(shared.next_id(), 801);
}

#[test]
fn test_save_and_load_through_handle() {
    let (temp, shared) = setup_shared();

    shared.create_with(|record| {
        record.set_entry("k", 1.25f32);
    })
    .unwrap();
    shared.save().unwrap();

    let reopened = SharedCollection::from(Collection::new(temp.path().join("shared.dat")));
    reopened.load().unwrap();

    assert_eq!(reopened.object_count(), 1);
    assert_eq!(
        reopened.read(|c| c.get_object(1).and_then(|r| r.get_entry("k").cloned())),
        Some(Value::Float(1.25))
    );
}

#[test]
fn test_write_closure_and_delete() {
    let (_temp, shared) = setup_shared();

    let id = shared.write(|c| c.create_object().map(|r| r.id())).unwrap();
    assert!(shared.delete_object(id).is_some());
    assert!(shared.delete_object(id).is_none());
    assert!(shared.get_object(id).is_none());
}
