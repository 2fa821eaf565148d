//! End-to-end session tests against an in-memory fake store.
//!
//! The fake implements [`DatasetStore`] with a `Mutex<Vec<Record>>`, so every
//! test exercises the real fetch → transform → push flow, including the
//! guarantee that a failed operation leaves the remote data untouched.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use async_trait::async_trait;

use turndeck::error::CurateError;
use turndeck::models::{Record, Role, Snapshot};
use turndeck::session::Session;
use turndeck::store::DatasetStore;

/// In-memory fake store. Push overwrites the whole record list, like the
/// real hub.
struct MemoryStore {
    records: Mutex<Vec<Record>>,
    pushes: AtomicUsize,
    fail_push: bool,
}

impl MemoryStore {
    fn seeded(records: Vec<Record>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
            pushes: AtomicUsize::new(0),
            fail_push: false,
        })
    }

    fn failing_push(records: Vec<Record>) -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(records),
            pushes: AtomicUsize::new(0),
            fail_push: true,
        })
    }

    fn records(&self) -> Vec<Record> {
        self.records.lock().unwrap().clone()
    }

    fn push_count(&self) -> usize {
        self.pushes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DatasetStore for MemoryStore {
    async fn fetch(&self, _dataset: &str) -> Result<Snapshot> {
        Ok(Snapshot::new(self.records()))
    }

    async fn push(&self, _dataset: &str, snapshot: &Snapshot, _private: bool) -> Result<()> {
        if self.fail_push {
            return Err(CurateError::RemoteStore("push rejected".to_string()).into());
        }
        *self.records.lock().unwrap() = snapshot.records.clone();
        self.pushes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn three_pairs() -> Vec<Record> {
    vec![
        Record::user("Q1"),
        Record::assistant("A1"),
        Record::user("Q2"),
        Record::assistant("A2"),
        Record::user("Q3"),
        Record::assistant("A3"),
    ]
}

fn session_over(store: Arc<MemoryStore>) -> Session {
    Session::new(store, "test/pairs", true)
}

#[tokio::test]
async fn view_lists_pairs_in_order() {
    let store = MemoryStore::seeded(three_pairs());
    let session = session_over(store.clone());

    let pairs = session.view().await.unwrap();
    assert_eq!(pairs.len(), 3);
    assert_eq!(pairs[0].user, "Q1");
    assert_eq!(pairs[0].assistant, "A1");
    assert_eq!(pairs[2].index, 2);
    assert_eq!(pairs[2].assistant, "A3");
    // View never writes.
    assert_eq!(store.push_count(), 0);
}

#[tokio::test]
async fn remove_named_pair_preserves_order() {
    let store = MemoryStore::seeded(three_pairs());
    let session = session_over(store.clone());

    let outcome = session.remove("2").await.unwrap();
    assert_eq!(outcome.removed, 1);
    assert_eq!(outcome.remaining, 2);

    let contents: Vec<String> = store.records().iter().map(|r| r.content.clone()).collect();
    assert_eq!(contents, vec!["Q1", "A1", "Q3", "A3"]);
}

#[tokio::test]
async fn remove_mixed_tokens_deduplicated() {
    let store = MemoryStore::seeded(three_pairs());
    let session = session_over(store.clone());

    let outcome = session.remove("1 3 1-2").await.unwrap();
    assert_eq!(outcome.removed, 3);
    assert_eq!(outcome.remaining, 0);
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn add_to_empty_dataset() {
    let store = MemoryStore::seeded(vec![]);
    let session = session_over(store.clone());

    let total = session.add("Hi", "Hello").await.unwrap();
    assert_eq!(total, 1);

    let records = store.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].role, Role::User);
    assert_eq!(records[0].content, "Hi");
    assert_eq!(records[1].role, Role::Assistant);
    assert_eq!(records[1].content, "Hello");
}

#[tokio::test]
async fn add_then_remove_round_trips() {
    let store = MemoryStore::seeded(three_pairs());
    let session = session_over(store.clone());

    session.add("Q4", "A4").await.unwrap();
    session.remove("4").await.unwrap();
    assert_eq!(store.records(), three_pairs());
}

#[tokio::test]
async fn invalid_index_leaves_remote_untouched() {
    let store = MemoryStore::seeded(three_pairs());
    let session = session_over(store.clone());

    let err = session.remove("0").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CurateError>(),
        Some(CurateError::InvalidIndex(0))
    ));
    assert_eq!(store.push_count(), 0);
    assert_eq!(store.records(), three_pairs());
}

#[tokio::test]
async fn invalid_range_leaves_remote_untouched() {
    let store = MemoryStore::seeded(three_pairs());
    let session = session_over(store.clone());

    let err = session.remove("6-3").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CurateError>(),
        Some(CurateError::InvalidRange(6, 3))
    ));
    assert_eq!(store.records(), three_pairs());
}

#[tokio::test]
async fn bad_token_aborts_whole_batch() {
    let store = MemoryStore::seeded(three_pairs());
    let session = session_over(store.clone());

    // "1" alone would be valid; the bad token must abort everything.
    assert!(session.remove("1 oops").await.is_err());
    assert_eq!(store.records(), three_pairs());
}

#[tokio::test]
async fn add_many_zips_parallel_lists() {
    let store = MemoryStore::seeded(vec![]);
    let session = session_over(store.clone());

    let users = vec!["Q1".to_string(), "Q2".to_string()];
    let assistants = vec!["A1".to_string(), "A2".to_string()];
    let added = session.add_many(&users, &assistants).await.unwrap();
    assert_eq!(added, 2);

    let contents: Vec<String> = store.records().iter().map(|r| r.content.clone()).collect();
    assert_eq!(contents, vec!["Q1", "A1", "Q2", "A2"]);
}

#[tokio::test]
async fn add_many_shape_mismatch_rejected() {
    let store = MemoryStore::seeded(vec![]);
    let session = session_over(store.clone());

    let users = vec!["Q1".to_string(), "Q2".to_string()];
    let assistants = vec!["A1".to_string()];
    let err = session.add_many(&users, &assistants).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CurateError>(),
        Some(CurateError::ShapeMismatch {
            users: 2,
            assistants: 1
        })
    ));
    assert_eq!(store.push_count(), 0);
}

#[tokio::test]
async fn import_appends_in_input_order() {
    let store = MemoryStore::seeded(three_pairs());
    let session = session_over(store.clone());

    let added = session
        .import_json(serde_json::json!([
            {"role": "user", "content": "Q4", "topic": "enrollment"},
            {"role": "assistant", "content": "A4"},
        ]))
        .await
        .unwrap();
    assert_eq!(added, 1);

    let records = store.records();
    assert_eq!(records.len(), 8);
    assert_eq!(records[6].content, "Q4");
    assert_eq!(
        records[6].extra.get("topic"),
        Some(&serde_json::json!("enrollment"))
    );
}

#[tokio::test]
async fn import_rejects_non_list() {
    let store = MemoryStore::seeded(three_pairs());
    let session = session_over(store.clone());

    let err = session
        .import_json(serde_json::json!({"role": "user", "content": "Q"}))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CurateError>(),
        Some(CurateError::InvalidImportSchema(_))
    ));
    assert_eq!(store.records(), three_pairs());
}

#[tokio::test]
async fn import_rejects_odd_entry_count() {
    let store = MemoryStore::seeded(three_pairs());
    let session = session_over(store.clone());

    let err = session
        .import_json(serde_json::json!([{"role": "user", "content": "Q4"}]))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CurateError>(),
        Some(CurateError::OddRecordCount(1))
    ));
    assert_eq!(store.records(), three_pairs());
}

#[tokio::test]
async fn import_rejects_broken_role_alternation() {
    let store = MemoryStore::seeded(vec![]);
    let session = session_over(store.clone());

    let err = session
        .import_json(serde_json::json!([
            {"role": "assistant", "content": "A"},
            {"role": "user", "content": "Q"},
        ]))
        .await
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CurateError>(),
        Some(CurateError::RolePairing(1))
    ));
    assert_eq!(store.push_count(), 0);
}

#[tokio::test]
async fn fetch_validation_rejects_odd_remote_data() {
    let store = MemoryStore::seeded(vec![Record::user("orphan")]);
    let session = session_over(store.clone());

    let err = session.view().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CurateError>(),
        Some(CurateError::OddRecordCount(1))
    ));
}

#[tokio::test]
async fn fetch_validation_rejects_misordered_roles() {
    let store = MemoryStore::seeded(vec![Record::assistant("A"), Record::user("Q")]);
    let session = session_over(store.clone());

    let err = session.view().await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CurateError>(),
        Some(CurateError::RolePairing(1))
    ));
}

#[tokio::test]
async fn push_failure_surfaces_as_remote_store_error() {
    let store = MemoryStore::failing_push(three_pairs());
    let session = session_over(store.clone());

    let err = session.remove("1").await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<CurateError>(),
        Some(CurateError::RemoteStore(_))
    ));
    // The fake never applied the write; the real hub gives no such guarantee.
    assert_eq!(store.records(), three_pairs());
}
