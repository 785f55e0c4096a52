//! Behaviour every `LampStore` backend must share.
//!
//! Each check takes a fresh, empty store.

use std::collections::HashSet;

use lamp_control::{LampError, LampStore};
use uuid::Uuid;

pub async fn ids_are_unique<S: LampStore>(store: &S) {
    let mut ids = HashSet::new();
    for i in 0..50 {
        let lamp = store.create(i % 2 == 0).await.unwrap();
        assert!(ids.insert(lamp.id), "duplicate id {}", lamp.id);
    }
    assert_eq!(store.list_all(None).await.unwrap().len(), 50);
}

pub async fn lifecycle_scenario<S: LampStore>(store: &S) {
    let created = store.create(true).await.unwrap();
    assert!(created.status);
    assert_eq!(created.created_at, created.updated_at);
    assert!(store.exists(created.id).await.unwrap());

    let updated = store.update(created.id, false).await.unwrap();
    assert!(!updated.status);
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);
    assert!(store.exists(created.id).await.unwrap());

    store.delete(created.id).await.unwrap();
    assert!(!store.exists(created.id).await.unwrap());

    assert_eq!(
        store.get_by_id(created.id).await,
        Err(LampError::NotFound(created.id.to_string()))
    );
    let remaining = store.list_all(None).await.unwrap();
    assert!(remaining.iter().all(|lamp| lamp.id != created.id));
}

pub async fn not_found_is_consistent<S: LampStore>(store: &S) {
    let never_created = Uuid::new_v4();
    assert!(matches!(
        store.get_by_id(never_created).await,
        Err(LampError::NotFound(_))
    ));
    assert!(matches!(
        store.update(never_created, true).await,
        Err(LampError::NotFound(_))
    ));
    assert!(matches!(
        store.delete(never_created).await,
        Err(LampError::NotFound(_))
    ));
    assert!(!store.exists(never_created).await.unwrap());

    let lamp = store.create(false).await.unwrap();
    store.delete(lamp.id).await.unwrap();

    assert!(matches!(
        store.get_by_id(lamp.id).await,
        Err(LampError::NotFound(_))
    ));
    assert!(matches!(
        store.update(lamp.id, true).await,
        Err(LampError::NotFound(_))
    ));
    assert!(matches!(
        store.delete(lamp.id).await,
        Err(LampError::NotFound(_))
    ));
    assert!(!store.exists(lamp.id).await.unwrap());
}

pub async fn second_delete_is_rejected<S: LampStore>(store: &S) {
    let lamp = store.create(true).await.unwrap();
    assert!(store.delete(lamp.id).await.is_ok());
    assert!(matches!(
        store.delete(lamp.id).await,
        Err(LampError::NotFound(_))
    ));
}

pub async fn timestamps_stay_ordered<S: LampStore>(store: &S) {
    let lamp = store.create(false).await.unwrap();
    let mut previous = lamp.clone();
    for i in 0..10 {
        let next = store.update(lamp.id, i % 2 == 0).await.unwrap();
        assert!(next.created_at <= next.updated_at);
        assert!(next.updated_at > previous.updated_at);
        assert_eq!(next.created_at, lamp.created_at);
        previous = next;
    }

    let stored = store.get_by_id(lamp.id).await.unwrap();
    assert_eq!(stored, previous);
}

pub async fn listing_is_stable_and_limited<S: LampStore>(store: &S) {
    for _ in 0..7 {
        store.create(true).await.unwrap();
    }

    let first = store.list_all(None).await.unwrap();
    let second = store.list_all(None).await.unwrap();
    let ids = |lamps: &[lamp_control::LampEntity]| lamps.iter().map(|l| l.id).collect::<Vec<_>>();
    assert_eq!(ids(&first[..]), ids(&second[..]));

    let limited = store.list_all(Some(3)).await.unwrap();
    assert_eq!(ids(&limited[..]), ids(&first[..3]));

    let page = store.list_page(3, Some(3)).await.unwrap();
    assert_eq!(ids(&page[..]), ids(&first[3..6]));

    let tail = store.list_page(6, Some(10)).await.unwrap();
    assert_eq!(ids(&tail[..]), ids(&first[6..]));

    assert!(store.list_page(20, None).await.unwrap().is_empty());
    assert!(store.list_all(Some(0)).await.unwrap().is_empty());
}

pub async fn reads_return_copies<S: LampStore>(store: &S) {
    let lamp = store.create(true).await.unwrap();

    let mut copy = store.get_by_id(lamp.id).await.unwrap();
    copy.status = false;

    assert!(store.get_by_id(lamp.id).await.unwrap().status);
}

pub async fn empty_store_lists_nothing<S: LampStore>(store: &S) {
    assert!(store.list_all(None).await.unwrap().is_empty());
}
