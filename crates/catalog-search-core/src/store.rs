//! Key-value persistence collaborator
//!
//! The engine persists only small JSON documents (search history, and reads
//! the admin-managed catalog) through this interface. The storage technology
//! behind it is the host's concern.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::StoreError;

/// Minimal string key-value store.
pub trait KeyValueStore {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    /// Returns `StoreError` when the backend rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str);
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key);
    }
}

/// In-process store backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a store, e.g. with state written by another tab.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        Self {
            entries: RwLock::new(map),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().map_or(0, |map| map.len())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut map = self
            .entries
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        map.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        if let Ok(mut map) = self.entries.write() {
            map.remove(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_remove() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert_eq!(store.get("k"), None);

        store.set("k", "v1").unwrap();
        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").as_deref(), Some("v2"));
        assert_eq!(store.len(), 1);

        store.remove("k");
        store.remove("k");
        assert_eq!(store.get("k"), None);
    }

    #[test]
    fn prepopulated_store() {
        let store = MemoryStore::with_entries([("searchHistory", r#"["a"]"#)]);
        assert_eq!(store.get("searchHistory").as_deref(), Some(r#"["a"]"#));
    }

    #[test]
    fn borrowed_store_delegates() {
        fn write_through<S: KeyValueStore>(store: S) {
            store.set("x", "1").unwrap();
        }
        let store = MemoryStore::new();
        write_through(&store);
        assert_eq!(store.get("x").as_deref(), Some("1"));
    }
}
