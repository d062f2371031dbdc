//! Memory Store Module
//!
//! In-process backing store combining HashMap storage with per-entry expiration.

use std::collections::HashMap;

use anyhow::bail;
use async_trait::async_trait;
use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;

use crate::store::{
    BackingStore, StoreEntry, StoreResult, StoreStats, MAX_KEY_LENGTH, MAX_VALUE_SIZE,
};
use crate::ttl::StoreOptions;

// == Memory Store ==
/// Thread-safe in-memory store honoring absolute, relative and sliding expiration.
///
/// The lock is only held for the duration of a single map operation.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<StoreInner>,
}

#[derive(Debug, Default)]
struct StoreInner {
    /// Key-value storage
    entries: HashMap<String, StoreEntry>,
    /// Traffic statistics
    stats: StoreStats,
}

impl MemoryStore {
    // == Constructor ==
    pub fn new() -> Self {
        Self::default()
    }

    // == Set ==
    /// Stores bytes under `key` with the given expiration options.
    ///
    /// An existing entry is overwritten and its expiration reset.
    pub fn set(&self, key: &str, value: Vec<u8>, options: StoreOptions) -> StoreResult<()> {
        if key.len() > MAX_KEY_LENGTH {
            bail!("Key exceeds maximum length of {} bytes", MAX_KEY_LENGTH);
        }
        if value.len() > MAX_VALUE_SIZE {
            bail!("Value exceeds maximum size of {} bytes", MAX_VALUE_SIZE);
        }

        let mut inner = self.inner.lock();
        inner
            .entries
            .insert(key.to_string(), StoreEntry::new(value, options));
        inner.stats.record_write();
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
        Ok(())
    }

    // == Get ==
    /// Retrieves the bytes stored under `key`.
    ///
    /// Expired entries are removed and reported as absent. A hit restarts the
    /// sliding window of the entry.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let mut guard = self.inner.lock();
        let inner = &mut *guard;

        let expired = match inner.entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                entry.touch();
                let value = entry.value.clone();
                inner.stats.record_read(true);
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            inner.entries.remove(key);
            inner.stats.record_expirations(1);
            let len = inner.entries.len();
            inner.stats.set_total_entries(len);
        }
        inner.stats.record_read(false);
        None
    }

    // == Refresh ==
    /// Restarts the sliding window of a live entry without reading it.
    ///
    /// Returns false if the key is absent or expired.
    pub fn refresh(&self, key: &str) -> bool {
        let mut inner = self.inner.lock();
        match inner.entries.get_mut(key) {
            Some(entry) if !entry.is_expired() => {
                entry.touch();
                true
            }
            _ => false,
        }
    }

    // == Remove ==
    /// Removes an entry by key. Returns true if an entry was present.
    pub fn remove(&self, key: &str) -> bool {
        let mut inner = self.inner.lock();
        let removed = inner.entries.remove(key).is_some();
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
        removed
    }

    // == Entry Options ==
    /// Returns the options a live entry was written with.
    pub fn entry_options(&self, key: &str) -> Option<StoreOptions> {
        let inner = self.inner.lock();
        inner
            .entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.options)
    }

    // == Stats ==
    /// Returns current store statistics.
    pub fn stats(&self) -> StoreStats {
        let inner = self.inner.lock();
        let mut stats = inner.stats.clone();
        stats.set_total_entries(inner.entries.len());
        stats
    }

    // == Cleanup Expired ==
    /// Removes all expired entries from the store.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&self) -> usize {
        let mut inner = self.inner.lock();
        let before = inner.entries.len();
        inner.entries.retain(|_, entry| !entry.is_expired());
        let count = before - inner.entries.len();

        inner.stats.record_expirations(count);
        let len = inner.entries.len();
        inner.stats.set_total_entries(len);
        count
    }

    // == Length ==
    pub fn len(&self) -> usize {
        self.inner.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().entries.is_empty()
    }
}

#[async_trait]
impl BackingStore for MemoryStore {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.get(key))
    }

    fn write(&self, key: &str, value: Vec<u8>, options: &StoreOptions) -> StoreResult<()> {
        self.set(key, value, *options)
    }

    // In-memory operations complete immediately, so the async variants run
    // the sync ones inline.
    async fn read_async(
        &self,
        key: &str,
        _cancel: &CancellationToken,
    ) -> StoreResult<Option<Vec<u8>>> {
        self.read(key)
    }

    async fn write_async(
        &self,
        key: &str,
        value: Vec<u8>,
        options: &StoreOptions,
        _cancel: &CancellationToken,
    ) -> StoreResult<()> {
        self.write(key, value, options)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn ten_minutes() -> StoreOptions {
        StoreOptions::relative(Duration::from_secs(600))
    }

    #[test]
    fn test_store_new() {
        let store = MemoryStore::new();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_store_set_and_get() {
        let store = MemoryStore::new();

        store.set("key1", b"value1".to_vec(), ten_minutes()).unwrap();

        assert_eq!(store.get("key1"), Some(b"value1".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = MemoryStore::new();
        assert!(store.get("nonexistent").is_none());
    }

    #[test]
    fn test_store_keeps_empty_values() {
        let store = MemoryStore::new();
        store.set("blank", Vec::new(), ten_minutes()).unwrap();
        assert_eq!(store.get("blank"), Some(Vec::new()));
    }

    #[test]
    fn test_store_remove() {
        let store = MemoryStore::new();

        store.set("key1", b"value1".to_vec(), ten_minutes()).unwrap();
        assert!(store.remove("key1"));

        assert!(store.is_empty());
        assert!(store.get("key1").is_none());
        assert!(!store.remove("key1"));
    }

    #[test]
    fn test_store_overwrite() {
        let store = MemoryStore::new();

        store.set("key1", b"value1".to_vec(), ten_minutes()).unwrap();
        store.set("key1", b"value2".to_vec(), ten_minutes()).unwrap();

        assert_eq!(store.get("key1"), Some(b"value2".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_relative_expiration() {
        let store = MemoryStore::new();

        store
            .set("key1", b"value1".to_vec(), StoreOptions::relative(Duration::from_millis(50)))
            .unwrap();
        assert!(store.get("key1").is_some());

        sleep(Duration::from_millis(80));

        assert!(store.get("key1").is_none());
        assert!(store.is_empty());
        assert_eq!(store.stats().expirations, 1);
    }

    #[test]
    fn test_store_sliding_expiration_refreshed_by_reads() {
        let store = MemoryStore::new();

        store
            .set("key1", b"value1".to_vec(), StoreOptions::sliding(Duration::from_millis(300)))
            .unwrap();

        sleep(Duration::from_millis(200));
        assert!(store.get("key1").is_some());
        sleep(Duration::from_millis(200));
        assert!(store.refresh("key1"));
        sleep(Duration::from_millis(200));
        assert!(store.get("key1").is_some(), "reads should keep a sliding entry alive");

        sleep(Duration::from_millis(450));
        assert!(store.get("key1").is_none());
    }

    #[test]
    fn test_store_keeps_entries_with_unbounded_ttl() {
        let store = MemoryStore::new();

        store
            .set("forever", b"v".to_vec(), StoreOptions::relative(Duration::MAX))
            .unwrap();
        store
            .set("idle", b"v".to_vec(), StoreOptions::sliding(Duration::MAX))
            .unwrap();

        assert_eq!(store.get("forever"), Some(b"v".to_vec()));
        assert_eq!(store.get("idle"), Some(b"v".to_vec()));
        assert!(store.refresh("idle"));
        assert_eq!(store.cleanup_expired(), 0);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_entry_options() {
        let store = MemoryStore::new();
        let options = StoreOptions::sliding(Duration::from_secs(10));

        store.set("key1", b"v".to_vec(), options).unwrap();

        assert_eq!(store.entry_options("key1"), Some(options));
        assert!(store.entry_options("missing").is_none());
    }

    #[test]
    fn test_store_stats() {
        let store = MemoryStore::new();

        store.set("key1", b"value1".to_vec(), ten_minutes()).unwrap();
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.writes, 1);
        assert_eq!(stats.reads, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_store_cleanup_expired() {
        let store = MemoryStore::new();

        store
            .set("key1", b"value1".to_vec(), StoreOptions::relative(Duration::from_millis(50)))
            .unwrap();
        store.set("key2", b"value2".to_vec(), ten_minutes()).unwrap();

        sleep(Duration::from_millis(80));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_store_key_too_long() {
        let store = MemoryStore::new();
        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);

        let err = store.set(&long_key, b"value".to_vec(), ten_minutes()).unwrap_err();
        assert!(err.to_string().contains("maximum length"));
        assert_eq!(store.stats().writes, 0);
    }

    #[test]
    fn test_store_value_too_large() {
        let store = MemoryStore::new();
        let large_value = vec![b'x'; MAX_VALUE_SIZE + 1];

        assert!(store.set("key", large_value, ten_minutes()).is_err());
    }

    #[tokio::test]
    async fn test_store_async_variants() {
        let store = MemoryStore::new();
        let cancel = CancellationToken::new();

        store
            .write_async("key", b"v".to_vec(), &ten_minutes(), &cancel)
            .await
            .unwrap();
        let value = store.read_async("key", &cancel).await.unwrap();

        assert_eq!(value, Some(b"v".to_vec()));
    }
}
