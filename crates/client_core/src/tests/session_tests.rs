use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn fixed_id() -> String {
    "test-uuid-123".to_string()
}

#[test]
fn repeated_calls_return_the_same_session_id() {
    let provider = SessionIdProvider::with_generator(Arc::new(InMemoryStore::new()), fixed_id);

    let first = provider.get_or_create_session_id().expect("first id");
    let second = provider.get_or_create_session_id().expect("second id");

    assert_eq!(first, "test-uuid-123");
    assert_eq!(first, second);
}

#[test]
fn generated_ids_are_uuid_v4() {
    let provider = SessionIdProvider::new(Arc::new(InMemoryStore::new()));
    let id = provider.get_or_create_session_id().expect("id");
    let parsed = uuid::Uuid::parse_str(&id).expect("uuid");
    assert_eq!(parsed.get_version_num(), 4);
}

#[test]
fn empty_stored_value_is_replaced() {
    let store = Arc::new(InMemoryStore::new());
    store.set_item(SESSION_STORAGE_KEY, "").expect("seed");

    let provider = SessionIdProvider::with_generator(store.clone(), fixed_id);
    assert_eq!(
        provider.get_or_create_session_id().expect("id"),
        "test-uuid-123"
    );
    assert_eq!(
        store.get_item(SESSION_STORAGE_KEY).expect("read").as_deref(),
        Some("test-uuid-123")
    );
}

#[test]
fn session_id_survives_reload_from_disk() {
    let dir = tempfile::tempdir().expect("tempdir");

    let first = SessionIdProvider::new(Arc::new(FileStore::in_data_dir(dir.path())))
        .get_or_create_session_id()
        .expect("first run");

    // A fresh store over the same directory stands in for an app restart.
    let reloaded = SessionIdProvider::new(Arc::new(FileStore::in_data_dir(dir.path())))
        .get_or_create_session_id()
        .expect("second run");

    assert_eq!(first, reloaded);
}

#[test]
fn file_store_creates_missing_parent_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::new(dir.path().join("nested").join("state").join("session.json"));

    store.set_item("k", "v").expect("write");

    assert!(store.path().exists());
    assert_eq!(store.get_item("k").expect("read").as_deref(), Some("v"));
    assert_eq!(store.get_item("missing").expect("read"), None);
}

#[test]
fn file_store_keeps_unrelated_keys() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::in_data_dir(dir.path());

    store.set_item("theme", "dark").expect("write theme");
    store.set_item(SESSION_STORAGE_KEY, "abc").expect("write id");

    assert_eq!(store.get_item("theme").expect("read").as_deref(), Some("dark"));
    assert_eq!(
        store.get_item(SESSION_STORAGE_KEY).expect("read").as_deref(),
        Some("abc")
    );
}

#[test]
fn corrupt_file_store_is_treated_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = FileStore::in_data_dir(dir.path());
    fs::write(store.path(), "not json").expect("seed corrupt file");

    let provider = SessionIdProvider::with_generator(Arc::new(store), fixed_id);
    assert_eq!(
        provider.get_or_create_session_id().expect("id"),
        "test-uuid-123"
    );
}

#[derive(Default)]
struct CountingStore {
    inner: InMemoryStore,
    reads: AtomicUsize,
    writes: AtomicUsize,
}

impl KeyValueStore for CountingStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, SessionStoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.inner.get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), SessionStoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_item(key, value)
    }
}

#[test]
fn session_id_is_read_from_store_only_once() {
    let store = Arc::new(CountingStore::default());
    let provider = SessionIdProvider::with_generator(store.clone(), fixed_id);

    for _ in 0..3 {
        assert_eq!(
            provider.get_or_create_session_id().expect("id"),
            "test-uuid-123"
        );
    }
    // Clones share the resolved id.
    assert_eq!(
        provider.clone().get_or_create_session_id().expect("id"),
        "test-uuid-123"
    );

    assert_eq!(store.reads.load(Ordering::SeqCst), 1);
    assert_eq!(store.writes.load(Ordering::SeqCst), 1);
}

#[test]
fn failed_lookup_is_not_cached() {
    let dir = tempfile::tempdir().expect("tempdir");
    // A directory where the file should be makes the write fail.
    let blocked = dir.path().join("session.json");
    fs::create_dir(&blocked).expect("block path");
    let store = Arc::new(FileStore::new(blocked.clone()));
    let provider = SessionIdProvider::with_generator(store, fixed_id);

    assert!(provider.get_or_create_session_id().is_err());

    fs::remove_dir(&blocked).expect("unblock path");
    assert_eq!(
        provider.get_or_create_session_id().expect("id after recovery"),
        "test-uuid-123"
    );
}
