use std::collections::HashSet;
use std::sync::Arc;

use lamp_control::{InMemoryLampStore, LampBackend, LampStore};

use crate::contract;

#[tokio::test]
async fn ids_are_unique() {
    contract::ids_are_unique(&InMemoryLampStore::new()).await;
}

#[tokio::test]
async fn lifecycle_scenario() {
    contract::lifecycle_scenario(&InMemoryLampStore::new()).await;
}

#[tokio::test]
async fn not_found_is_consistent() {
    contract::not_found_is_consistent(&InMemoryLampStore::new()).await;
}

#[tokio::test]
async fn second_delete_is_rejected() {
    contract::second_delete_is_rejected(&InMemoryLampStore::new()).await;
}

#[tokio::test]
async fn timestamps_stay_ordered() {
    contract::timestamps_stay_ordered(&InMemoryLampStore::new()).await;
}

#[tokio::test]
async fn listing_is_stable_and_limited() {
    contract::listing_is_stable_and_limited(&InMemoryLampStore::new()).await;
}

#[tokio::test]
async fn reads_return_copies() {
    contract::reads_return_copies(&InMemoryLampStore::new()).await;
}

#[tokio::test]
async fn empty_store_lists_nothing() {
    contract::empty_store_lists_nothing(&InMemoryLampStore::new()).await;
}

#[tokio::test]
async fn backend_satisfies_the_contract() {
    let backend = LampBackend::select(None, false).await.unwrap();
    assert_eq!(backend.name(), "in-memory");
    contract::lifecycle_scenario(&backend).await;
    contract::not_found_is_consistent(&backend).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_are_all_kept() {
    let store = Arc::new(InMemoryLampStore::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = store.clone();
            tokio::spawn(async move {
                let mut ids = Vec::new();
                for i in 0..25 {
                    ids.push(store.create((t + i) % 2 == 0).await.unwrap().id);
                }
                ids
            })
        })
        .collect();

    let mut ids = HashSet::new();
    for handle in handles {
        for id in handle.await.unwrap() {
            assert!(ids.insert(id));
        }
    }

    assert_eq!(ids.len(), 200);
    assert_eq!(store.list_all(None).await.unwrap().len(), 200);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_are_never_lost() {
    let store = Arc::new(InMemoryLampStore::new());
    let lamp = store.create(false).await.unwrap();

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let store = store.clone();
            tokio::spawn(async move {
                let mut last = None;
                for i in 0..20 {
                    let updated = store.update(lamp.id, (t + i) % 2 == 0).await.unwrap();
                    last = Some(updated.updated_at);
                }
                last
            })
        })
        .collect();

    let mut latest_seen = Vec::new();
    for handle in handles {
        latest_seen.extend(handle.await.unwrap());
    }

    let stored = store.get_by_id(lamp.id).await.unwrap();
    assert_eq!(stored.created_at, lamp.created_at);
    assert!(stored.updated_at > lamp.updated_at);
    // Every update bumped updated_at, so the stored value is the newest one handed out.
    assert!(latest_seen.iter().all(|seen| *seen <= stored.updated_at));
}
