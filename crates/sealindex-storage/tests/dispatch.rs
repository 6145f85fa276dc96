//! End-to-end dispatch tests: raw envelope through the dispatcher into a
//! real store backend.

use serde_json::json;

use sealindex_core::event::{BlockRef, EventEnvelope, EventKind};
use sealindex_core::handler::EventDispatcher;
use sealindex_core::store::EntityStore;
use sealindex_storage::InMemoryStore;

fn envelope(chain_id: u64, block: u64, log_index: u32, params: serde_json::Value) -> EventEnvelope {
    EventEnvelope {
        chain_id,
        block: BlockRef { number: block },
        log_index,
        params,
    }
}

#[tokio::test]
async fn full_pipeline_roundtrip() {
    let dispatcher = EventDispatcher::new(InMemoryStore::new());

    dispatcher
        .dispatch(
            EventKind::DocumentAdded,
            &envelope(1, 200, 0, json!({ "addedBy": "0xAA", "cid": "QmDoc", "user": "0xBB" })),
        )
        .await
        .unwrap();

    let stored = dispatcher
        .store()
        .get("SealEncrypt_DocumentAdded", "1_200_0")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, "1_200_0");
    assert_eq!(stored.fields["addedBy"], "0xAA");
    assert_eq!(stored.fields["cid"], "QmDoc");
    assert_eq!(stored.fields["user"], "0xBB");
}

#[tokio::test]
async fn replayed_log_is_a_noop() {
    let dispatcher = EventDispatcher::new(InMemoryStore::new());
    let env = envelope(
        1,
        100,
        2,
        json!({ "user": "0xAA", "cid": "Qm123", "Revokeuser": "bob", "RevokeAddr": "0xBB" }),
    );

    dispatcher.dispatch(EventKind::AccessRevoked, &env).await.unwrap();
    dispatcher.dispatch(EventKind::AccessRevoked, &env).await.unwrap();

    let rows = dispatcher
        .store()
        .scan("SealEncrypt_AccessRevoked")
        .await
        .unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fields["revokeUser"], "bob");
    assert_eq!(rows[0].fields["revokeAddr"], "0xBB");
}

#[tokio::test]
async fn revocation_is_a_new_row_not_a_mutation() {
    let dispatcher = EventDispatcher::new(InMemoryStore::new());

    dispatcher
        .dispatch(
            EventKind::ShareAccess,
            &envelope(
                1,
                100,
                0,
                json!({ "user": "0xAA", "cid": "Qm1", "shareUser": "carol", "shareAddr": "0xCC" }),
            ),
        )
        .await
        .unwrap();
    dispatcher
        .dispatch(
            EventKind::AccessRevoked,
            &envelope(
                1,
                105,
                0,
                json!({ "user": "0xAA", "cid": "Qm1", "Revokeuser": "carol", "RevokeAddr": "0xCC" }),
            ),
        )
        .await
        .unwrap();

    // The share row is untouched; the revocation lives in its own collection
    let shares = dispatcher.store().scan("SealEncrypt_ShareAccess").await.unwrap();
    assert_eq!(shares.len(), 1);
    assert_eq!(shares[0].fields["shareUser"], "carol");

    let revocations = dispatcher
        .store()
        .scan("SealEncrypt_AccessRevoked")
        .await
        .unwrap();
    assert_eq!(revocations.len(), 1);
}

#[tokio::test]
async fn events_across_kinds_do_not_collide() {
    let dispatcher = EventDispatcher::new(InMemoryStore::new());

    // Same coordinates, different kinds — distinct collections, same id
    dispatcher
        .dispatch(EventKind::AdminAdded, &envelope(1, 100, 0, json!({ "admin": "0x01" })))
        .await
        .unwrap();
    dispatcher
        .dispatch(EventKind::AdminRemoved, &envelope(1, 100, 0, json!({ "admin": "0x01" })))
        .await
        .unwrap();

    assert!(dispatcher
        .store()
        .get("SealEncrypt_AdminAdded", "1_100_0")
        .await
        .unwrap()
        .is_some());
    assert!(dispatcher
        .store()
        .get("SealEncrypt_AdminRemoved", "1_100_0")
        .await
        .unwrap()
        .is_some());
}
