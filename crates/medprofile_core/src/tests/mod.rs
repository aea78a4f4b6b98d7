//! Behavioural tests for the profile controller
//!
//! Tests are organized by topic:
//! - `controller` - Mode transitions, validation and the staged draft
//! - `persistence` - Load/save round-trips through a store

mod persistence;

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::error::StorageError;
use crate::storage::{KeyValueStore, MemoryStore};

/// Memory store whose reads and writes can be made to fail, and which counts writes.
#[derive(Default)]
pub(crate) struct FlakyStore {
    inner: MemoryStore,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    writes: AtomicUsize,
}

impl FlakyStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub(crate) fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub(crate) fn seed(&self, key: &str, value: &str) {
        self.inner.set(key, value).unwrap();
    }
}

impl KeyValueStore for FlakyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StorageError::NotAvailable("reads disabled".to_string()));
        }
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io("disk full".to_string()));
        }
        self.inner.set(key, value)
    }
}
