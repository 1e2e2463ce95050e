//! End-to-end usage of both routers through the public API.

use partitioned_kv::{KeyValueStore, NodeState, RangeRouter, ShardRouter, StorageError};
use std::thread;

fn round_trip<S: KeyValueStore<i32>>(store: &S) {
    for i in 0..200 {
        store.create(&format!("key_{}", i), i).unwrap();
    }
    for i in 0..200 {
        assert_eq!(store.read(&format!("key_{}", i)).unwrap(), i);
    }
}

#[test]
fn sharding_crud_sequence() {
    let storage = ShardRouter::new(5).unwrap();
    storage.mark_all_up();

    storage.create("toto", 1).unwrap();
    assert_eq!(storage.read("toto").unwrap(), 1);

    storage.update("toto", 2).unwrap();
    assert_eq!(storage.read("toto").unwrap(), 2);

    assert_eq!(
        storage.update("tutu", 1).unwrap_err(),
        StorageError::not_found("tutu")
    );

    storage.delete("toto").unwrap();
    assert_eq!(
        storage.read("toto").unwrap_err(),
        StorageError::not_found("toto")
    );
    assert_eq!(
        storage.delete("toto").unwrap_err(),
        StorageError::not_found("toto")
    );
}

#[test]
fn consistent_hashing_create_then_read() {
    let storage = RangeRouter::new(50).unwrap();
    storage.mark_all_up();

    storage.create("toto", 1).unwrap();

    assert_eq!(storage.read("toto").unwrap(), 1);
}

#[test]
fn fresh_routers_refuse_reads() {
    let sharded = ShardRouter::new(5).unwrap();
    let ranged = RangeRouter::new(50).unwrap();
    sharded.create("toto", 1).unwrap();
    ranged.create("toto", 1).unwrap();

    assert!(matches!(
        sharded.read("toto"),
        Err(StorageError::Unavailable { .. })
    ));
    assert!(matches!(
        ranged.read("toto"),
        Err(StorageError::AllReplicasDown { .. })
    ));
}

#[test]
fn round_trip_through_every_strategy() {
    let sharded = ShardRouter::new(7).unwrap();
    let ranged = RangeRouter::new(7).unwrap();
    let replicated = RangeRouter::with_replicas(7, 2).unwrap();
    sharded.mark_all_up();
    ranged.mark_all_up();
    replicated.mark_all_up();

    round_trip(&sharded);
    round_trip(&ranged);
    round_trip(&replicated);

    assert_eq!(sharded.entry_count(), 200);
    assert_eq!(ranged.entry_count(), 200);
    assert_eq!(replicated.entry_count(), 600);
}

#[test]
fn replicated_router_survives_one_node_down() {
    let storage = RangeRouter::with_replicas(5, 1).unwrap();
    storage.mark_all_up();
    round_trip(&storage);

    storage.set_node_state(2, NodeState::Down).unwrap();

    for i in 0..200 {
        assert_eq!(storage.read(&format!("key_{}", i)).unwrap(), i);
    }
}

#[test]
fn concurrent_writers_on_shared_router() {
    let storage = RangeRouter::new(16).unwrap();
    storage.mark_all_up();

    thread::scope(|scope| {
        for worker in 0..4 {
            let storage = &storage;
            scope.spawn(move || {
                for i in 0..250 {
                    let key = format!("w{}_{}", worker, i);
                    storage.create(&key, i).unwrap();
                    storage.update(&key, i + 1).unwrap();
                }
            });
        }
    });

    assert_eq!(storage.entry_count(), 1000);
    assert_eq!(storage.read("w3_249").unwrap(), 250);
}
