//! Web storage implementation using browser LocalStorage.

use gloo_storage::{LocalStorage, Storage as GlooStorage};

use medprofile_core::{KeyValueStore, StorageError};

/// Raw string access to LocalStorage. Records are already JSON, so they are
/// stored as-is rather than re-encoded by gloo.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebStore;

impl WebStore {
    pub fn new() -> Self {
        Self
    }
}

impl KeyValueStore for WebStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        LocalStorage::raw()
            .get_item(key)
            .map_err(|e| StorageError::NotAvailable(format!("LocalStorage read failed: {:?}", e)))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(|e| StorageError::Io(format!("LocalStorage write failed: {:?}", e)))
    }
}
