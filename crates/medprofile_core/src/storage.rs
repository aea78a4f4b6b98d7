//! Key-value storage contract for platform-independent persistence.
//!
//! This module defines the [`KeyValueStore`] trait that the profile screen
//! reads and writes through. Native builds back it with files, web builds with
//! browser LocalStorage, and tests with [`MemoryStore`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

/// Prefix for per-user profile keys
pub const KEY_PREFIX: &str = "medprofile.profile.";
/// User id used when none is configured
pub const DEFAULT_USER: &str = "default";

/// Storage key holding the profile of `user_id`.
pub fn profile_key(user_id: &str) -> String {
    format!("{KEY_PREFIX}{user_id}")
}

/// Platform-independent key-value interface.
///
/// Values are opaque text. There is no locking: when two writers race on the
/// same key the last `set` wins.
pub trait KeyValueStore {
    /// Read the value under `key`, `None` if nothing is stored
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value, for setting up a store before handing it out
    pub fn with_entry(self, key: &str, value: &str) -> Self {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
        self
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::NotAvailable("memory store lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::NotAvailable("memory store lock poisoned".to_string()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// A storage round-trip requested by the profile controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageRequest {
    Get { key: String },
    Set { key: String, value: String },
}

/// Result of running a [`StorageRequest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageReply {
    Got(Result<Option<String>, StorageError>),
    Stored(Result<(), StorageError>),
}

impl StorageRequest {
    pub fn key(&self) -> &str {
        match self {
            StorageRequest::Get { key } | StorageRequest::Set { key, .. } => key,
        }
    }

    /// Perform the request against `store`, blocking until it completes.
    pub fn execute(&self, store: &dyn KeyValueStore) -> StorageReply {
        match self {
            StorageRequest::Get { key } => StorageReply::Got(store.get(key)),
            StorageRequest::Set { key, value } => StorageReply::Stored(store.set(key, value)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_key() {
        assert_eq!(profile_key(DEFAULT_USER), "medprofile.profile.default");
        assert_eq!(profile_key("alice"), "medprofile.profile.alice");
    }

    #[test]
    fn test_memory_store_get_missing() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nothing"), Ok(None));
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_last_write_wins() {
        let store = MemoryStore::new();
        store.set("k", "first").unwrap();
        store.set("k", "second").unwrap();
        assert_eq!(store.get("k"), Ok(Some("second".to_string())));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_execute_request() {
        let store = MemoryStore::new().with_entry("k", "v");
        let get = StorageRequest::Get {
            key: "k".to_string(),
        };
        assert_eq!(
            get.execute(&store),
            StorageReply::Got(Ok(Some("v".to_string())))
        );

        let set = StorageRequest::Set {
            key: "k2".to_string(),
            value: "w".to_string(),
        };
        assert_eq!(set.key(), "k2");
        assert_eq!(set.execute(&store), StorageReply::Stored(Ok(())));
        assert_eq!(store.get("k2"), Ok(Some("w".to_string())));
    }
}
