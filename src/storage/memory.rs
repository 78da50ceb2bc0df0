// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! In-memory key/value store

use std::collections::BTreeMap;
use std::sync::Arc;

use dashmap::DashMap;

use super::KeyValueStore;
use crate::error::{Error, Result};

/// Thread-safe in-memory store.
///
/// Clones share the same entries. An optional quota (in UTF-16 units over
/// keys and values, like browsers count) makes writes fail once exceeded.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Arc<DashMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryStorage {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes beyond `units` UTF-16 code units
    pub fn with_quota(units: usize) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            quota: Some(units),
        }
    }

    /// Current usage in UTF-16 code units
    pub fn usage(&self) -> usize {
        self.entries
            .iter()
            .map(|e| utf16_len(e.key()) + utf16_len(e.value()))
            .sum()
    }

    /// Snapshot of all entries, sorted by key
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect()
    }

    /// Import entries from a JSON object
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        let entries: BTreeMap<String, String> = serde_json::from_str(json)?;
        let store = MemoryStorage::new();
        for (k, v) in entries {
            store.entries.insert(k, v);
        }
        Ok(store)
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).map(|v| v.value().clone()))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            let existing = self
                .entries
                .get(key)
                .map(|v| utf16_len(key) + utf16_len(v.value()))
                .unwrap_or(0);
            // a concurrent remove can leave usage() below `existing`
            let needed = self.usage().saturating_sub(existing) + utf16_len(key) + utf16_len(value);
            if needed > quota {
                return Err(Error::storage(format!(
                    "quota exceeded setting '{}' ({} > {})",
                    key, needed, quota
                )));
            }
        }

        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.iter().map(|e| e.key().clone()).collect())
    }

    fn clear(&self) -> Result<()> {
        self.entries.clear();
        Ok(())
    }
}

fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStorage::new();
        store.set("a", "1").unwrap();
        assert_eq!(store.get("a").unwrap(), Some("1".to_string()));

        store.set("a", "2").unwrap();
        assert_eq!(store.get("a").unwrap(), Some("2".to_string()));
        assert_eq!(store.len().unwrap(), 1);

        store.remove("a").unwrap();
        store.remove("a").unwrap();
        assert!(store.get("a").unwrap().is_none());
        assert!(store.is_empty().unwrap());
    }

    #[test]
    fn test_clones_share_entries() {
        let store = MemoryStorage::new();
        let other = store.clone();
        store.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_quota() {
        let store = MemoryStorage::with_quota(10);
        store.set("ab", "cdef").unwrap();
        assert_eq!(store.usage(), 6);

        // Overwrite only counts the difference
        store.set("ab", "cdefghij").unwrap();

        let err = store.set("x", "yy").unwrap_err();
        assert!(err.is_storage());
        assert!(store.get("x").unwrap().is_none());
    }

    #[test]
    fn test_quota_under_concurrent_remove() {
        let store = MemoryStorage::with_quota(1_000);
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for i in 0..500 {
                        store.set("k", &"v".repeat(i % 50)).unwrap();
                    }
                });
                s.spawn(|| {
                    for _ in 0..500 {
                        store.remove("k").unwrap();
                    }
                });
            }
        });
        assert!(store.usage() <= 50);
    }

    #[test]
    fn test_from_json() {
        let store = MemoryStorage::from_json(r#"{"secure_a": "blob", "theme": "dark"}"#).unwrap();
        assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));
        assert_eq!(store.snapshot().into_keys().collect::<Vec<_>>(), vec!["secure_a", "theme"]);

        assert!(MemoryStorage::from_json("[1, 2]").is_err());
    }
}
