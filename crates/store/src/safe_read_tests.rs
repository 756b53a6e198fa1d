use super::*;
use crate::memory::MemoryStore;
use fleet_core::StoreTuning;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

fn fast_tuning(max_retries: u32) -> StoreTuning {
    StoreTuning {
        safe_read_max_retries: max_retries,
        safe_read_retry_backoff: Duration::from_millis(0),
    }
}

#[test]
fn reads_value_immediately_when_present() {
    let store = MemoryStore::new();
    let path = Path::new("/status/task0.status");
    store.write_json(path, &serde_json::json!({"status": "Unassigned"})).unwrap();

    let outcome: ReadOutcome<serde_json::Value> = safe_read_json(&store, path, &fast_tuning(3));
    assert!(matches!(outcome, ReadOutcome::Value(_)));
}

#[test]
fn missing_file_becomes_unreadable_after_retry_budget() {
    let store = MemoryStore::new();
    let path = Path::new("/status/missing.status");

    let outcome: ReadOutcome<serde_json::Value> = safe_read_json(&store, path, &fast_tuning(3));
    assert!(matches!(outcome, ReadOutcome::Unreadable));
}

#[test]
fn torn_json_becomes_unreadable_after_retry_budget() {
    let store = MemoryStore::new();
    let path = Path::new("/status/task0.status");
    store.write_bytes(path, b"{not json").unwrap();

    let outcome: ReadOutcome<serde_json::Value> = safe_read_json(&store, path, &fast_tuning(2));
    assert!(matches!(outcome, ReadOutcome::Unreadable));
}

/// A store that appears empty for the first `delay` reads of a given path,
/// then behaves like a normal `MemoryStore` — simulating a producer that is
/// mid-write when the reader's first few attempts land.
#[derive(Clone)]
struct FlakyStore {
    inner: MemoryStore,
    hits: std::sync::Arc<AtomicU32>,
    delay: u32,
}

impl Store for FlakyStore {
    fn create_dir_all(&self, path: &Path) -> Result<(), StoreError> {
        self.inner.create_dir_all(path)
    }

    fn write_bytes(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        self.inner.write_bytes(path, bytes)
    }

    fn read_bytes(&self, path: &Path) -> std::io::Result<Vec<u8>> {
        let seen = self.hits.fetch_add(1, Ordering::SeqCst);
        if seen < self.delay {
            return Err(std::io::Error::new(std::io::ErrorKind::NotFound, "not yet"));
        }
        self.inner.read_bytes(path)
    }

    fn unlink(&self, path: &Path) -> Result<(), StoreError> {
        self.inner.unlink(path)
    }

    fn list(&self, dir: &Path) -> Result<Vec<PathBuf>, StoreError> {
        self.inner.list(dir)
    }

    fn touch(&self, path: &Path) -> Result<(), StoreError> {
        self.inner.touch(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.inner.exists(path)
    }
}

#[test]
fn recovers_once_the_lagging_write_lands() {
    let inner = MemoryStore::new();
    let path = Path::new("/status/task0.status");
    inner.write_json(path, &serde_json::json!({"status": "Unassigned"})).unwrap();
    let store = FlakyStore { inner, hits: std::sync::Arc::new(AtomicU32::new(0)), delay: 2 };

    let outcome: ReadOutcome<serde_json::Value> = safe_read_json(&store, path, &fast_tuning(5));
    assert!(matches!(outcome, ReadOutcome::Value(_)));
}

#[test]
fn value_helper_converts_to_option() {
    let value: ReadOutcome<u32> = ReadOutcome::Value(7);
    assert_eq!(value.value(), Some(7));
    let unreadable: ReadOutcome<u32> = ReadOutcome::Unreadable;
    assert_eq!(unreadable.value(), None);
}
