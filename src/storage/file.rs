// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Persistent key/value store backed by a JSON file

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::debug;

use super::{KeyValueStore, MemoryStorage};
use crate::error::{ErrorContext, Result};

/// localStorage stand-in that survives process restarts.
///
/// The whole map is rewritten on every mutation. A mutation becomes visible
/// in memory only after the file write succeeds.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    inner: MemoryStorage,
    /// Serializes mutations
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    /// Open a store, loading existing entries if the file exists
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let inner = if path.exists() {
            let content =
                fs::read_to_string(&path).context(&format!("reading {}", path.display()))?;
            if content.trim().is_empty() {
                MemoryStorage::new()
            } else {
                MemoryStorage::from_json(&content)?
            }
        } else {
            MemoryStorage::new()
        };

        debug!(path = %path.display(), entries = inner.snapshot().len(), "opened file storage");

        Ok(Self {
            path,
            inner,
            write_lock: Mutex::new(()),
        })
    }

    /// Backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&self.path, json).context(&format!("writing {}", self.path.display()))
    }
}

impl KeyValueStore for JsonFileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut entries = self.inner.snapshot();
        entries.insert(key.to_string(), value.to_string());
        self.write(&entries)?;
        self.inner.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.write_lock.lock();
        let mut entries = self.inner.snapshot();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write(&entries)?;
        self.inner.remove(key)
    }

    fn keys(&self) -> Result<Vec<String>> {
        self.inner.keys()
    }

    fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.write(&BTreeMap::new())?;
        self.inner.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_persists_across_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = JsonFileStorage::open(&path).unwrap();
        store.set("secure_a", "blob").unwrap();
        store.set("other", "x").unwrap();
        store.remove("other").unwrap();
        drop(store);

        let reopened = JsonFileStorage::open(&path).unwrap();
        assert_eq!(reopened.get("secure_a").unwrap(), Some("blob".to_string()));
        assert!(reopened.get("other").unwrap().is_none());
    }

    #[test]
    fn test_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let store = JsonFileStorage::open(file.path()).unwrap();
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_corrupt_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "{not json").unwrap();
        assert!(JsonFileStorage::open(file.path()).is_err());
    }

    #[test]
    fn test_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStorage::open(dir.path().join("missing/dir/store.json")).unwrap();
        let err = store.set("k", "v").unwrap_err();
        assert!(err.is_storage());
    }

    #[test]
    fn test_failed_set_leaves_store_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStorage::open(dir.path().join("missing/dir/store.json")).unwrap();

        assert!(store.set("k", "v").is_err());
        assert!(store.get("k").unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_failed_remove_and_clear_keep_entries() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("sub");
        fs::create_dir(&sub).unwrap();
        let path = sub.join("store.json");

        let store = JsonFileStorage::open(&path).unwrap();
        store.set("k", "v").unwrap();
        fs::remove_dir_all(&sub).unwrap();

        assert!(store.remove("k").is_err());
        assert_eq!(store.get("k").unwrap(), Some("v".to_string()));
        assert!(store.clear().is_err());
        assert_eq!(store.keys().unwrap(), vec!["k".to_string()]);

        // nothing to remove, nothing to write
        assert!(store.remove("absent").is_ok());
    }
}
