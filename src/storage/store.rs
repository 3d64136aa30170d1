//! Shared Key-Value Store
//!
//! A single `HashMap` behind a `RwLock`, created once at startup and handed to
//! every connection through an `Arc`.
//!
//! ## Concurrency Model
//!
//! - `get` takes the read lock, so any number of readers proceed together.
//! - `set` takes the write lock for the duration of one `insert`.
//! - No I/O ever happens while a lock is held.
//!
//! Values are `Bytes`, so an overwrite swaps the whole value in one step and a
//! reader sees either the old value or the new one, never a mix.

use bytes::Bytes;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Point-in-time counters for the store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    pub keys: u64,
    pub get_ops: u64,
    pub set_ops: u64,
}

/// The process-wide key-value store.
///
/// # Example
///
/// ```
/// use respkv::storage::Store;
/// use bytes::Bytes;
///
/// let store = Store::new();
/// store.set(Bytes::from("name"), Bytes::from("Ariz"));
/// assert_eq!(store.get(b"name"), Some(Bytes::from("Ariz")));
/// assert_eq!(store.get(b"missing"), None);
/// ```
#[derive(Default)]
pub struct Store {
    data: RwLock<HashMap<Bytes, Bytes>>,

    /// Statistics: total GET operations
    get_count: AtomicU64,

    /// Statistics: total SET operations
    set_count: AtomicU64,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("keys", &self.len())
            .field("get_count", &self.get_count.load(Ordering::Relaxed))
            .field("set_count", &self.set_count.load(Ordering::Relaxed))
            .finish()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    // Writers do a single insert under the lock; the map stays consistent
    // even when the lock is poisoned.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<Bytes, Bytes>> {
        self.data.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<Bytes, Bytes>> {
        self.data.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Installs or overwrites `key`.
    ///
    /// Returns `true` if the key was new.
    pub fn set(&self, key: Bytes, value: Bytes) -> bool {
        self.set_count.fetch_add(1, Ordering::Relaxed);
        self.write().insert(key, value).is_none()
    }

    /// Looks up `key` without modifying the store.
    pub fn get(&self, key: &[u8]) -> Option<Bytes> {
        self.get_count.fetch_add(1, Ordering::Relaxed);
        self.read().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            keys: self.len() as u64,
            get_ops: self.get_count.load(Ordering::Relaxed),
            set_ops: self.set_count.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_set_and_get() {
        let store = Store::new();

        assert!(store.set(Bytes::from("key"), Bytes::from("value")));
        assert_eq!(store.get(b"key"), Some(Bytes::from("value")));
    }

    #[test]
    fn test_get_nonexistent() {
        let store = Store::new();
        assert_eq!(store.get(b"nonexistent"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn test_last_write_wins() {
        let store = Store::new();

        assert!(store.set(Bytes::from("key"), Bytes::from("one")));
        assert!(!store.set(Bytes::from("key"), Bytes::from("two")));
        assert_eq!(store.get(b"key"), Some(Bytes::from("two")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_binary_keys_and_values() {
        let store = Store::new();

        store.set(Bytes::from_static(b"\x00\xff"), Bytes::from_static(b"\r\n"));
        assert_eq!(store.get(b"\x00\xff"), Some(Bytes::from_static(b"\r\n")));
    }

    #[test]
    fn test_stats() {
        let store = Store::new();

        store.set(Bytes::from("a"), Bytes::from("1"));
        store.set(Bytes::from("a"), Bytes::from("2"));
        store.get(b"a");

        assert_eq!(
            store.stats(),
            StoreStats {
                keys: 1,
                get_ops: 1,
                set_ops: 2,
            }
        );
    }

    #[test]
    fn test_concurrent_access() {
        let store = Arc::new(Store::new());
        let mut handles = vec![];

        for i in 0..10 {
            let store = Arc::clone(&store);
            handles.push(thread::spawn(move || {
                for j in 0..100 {
                    let key = format!("key-{}-{}", i, j);
                    store.set(Bytes::from(key.clone()), Bytes::from("value"));
                    assert_eq!(store.get(key.as_bytes()), Some(Bytes::from("value")));
                }
            }));
        }

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len(), 1000);
    }

    #[test]
    fn test_concurrent_writers_same_key() {
        let store = Arc::new(Store::new());
        let values: Vec<String> = (0..32).map(|i| format!("value-{}", i).repeat(64)).collect();

        let handles: Vec<_> = values
            .iter()
            .cloned()
            .map(|value| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.set(Bytes::from("k"), Bytes::from(value));
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let winner = store.get(b"k").unwrap();
        assert!(values.iter().any(|v| v.as_bytes() == winner.as_ref()));
        assert_eq!(store.len(), 1);
    }
}
