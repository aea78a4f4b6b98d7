//! File-backed key-value store.
//!
//! Each key is one JSON document at `<root>/store/<key>.json`. Writes land in
//! a sibling temp file first and are renamed over the target, so a crash
//! mid-write leaves the previous record intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use medprofile_core::{KeyValueStore, StorageError};

const STORE_DIR: &str = "store";

#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Store rooted in the app data directory.
    pub fn new(data_dir: &Path) -> Self {
        Self {
            root: data_dir.join(STORE_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", sanitize_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .map_err(|e| StorageError::Io(format!("Failed to create store directory: {}", e)))?;

        let path = self.path_for(key);
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).map_err(|e| {
            StorageError::Io(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        fs::rename(&tmp_path, &path).map_err(|e| {
            StorageError::Io(format!("Failed to replace {}: {}", path.display(), e))
        })?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "Stored record");
        Ok(())
    }
}

/// Keep keys to a single safe path component.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' || c == '.' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use medprofile_core::profile_key;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_reads_as_none() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert_eq!(store.get(&profile_key("nobody")).unwrap(), None);
        assert!(!store.root().exists());
    }

    #[test]
    fn test_set_then_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let key = profile_key("alice");

        store.set(&key, r#"{"fullName":"Alice"}"#).unwrap();
        assert_eq!(
            store.get(&key).unwrap().as_deref(),
            Some(r#"{"fullName":"Alice"}"#)
        );

        store.set(&key, r#"{"fullName":"Alice B"}"#).unwrap();
        assert_eq!(
            store.get(&key).unwrap().as_deref(),
            Some(r#"{"fullName":"Alice B"}"#)
        );
        assert!(!store.path_for(&key).with_extension("json.tmp").exists());
    }

    #[test]
    fn test_keys_stay_inside_store() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        let path = store.path_for("../../etc/passwd");
        assert_eq!(path.parent(), Some(store.root()));
        assert_eq!(sanitize_key("medprofile.profile.a/b"), "medprofile.profile.a_b");
    }

    #[test]
    fn test_unreadable_entry_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());
        let key = profile_key("dir");

        // A directory where the file should be cannot be read as text
        fs::create_dir_all(store.path_for(&key)).unwrap();
        assert!(matches!(store.get(&key), Err(StorageError::Io(_))));
    }
}
