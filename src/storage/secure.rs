// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Obfuscated entries in a shared persistent store

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use super::KeyValueStore;
use crate::error::Result;
use crate::obfuscation::{decrypt, encrypt};

/// Namespace prefix for obfuscated entries
pub const SECURE_PREFIX: &str = "secure_";

/// Obfuscated view over a persistent store.
///
/// Entry `name` lives under `<prefix><name>` and is obfuscated with `name`
/// itself as the key. The store is shared with other page code, so bulk
/// operations only ever touch keys carrying the prefix.
#[derive(Clone)]
pub struct SecureStore {
    store: Arc<dyn KeyValueStore>,
    prefix: String,
}

impl SecureStore {
    /// Wrap a store using the default `secure_` prefix
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_prefix(store, SECURE_PREFIX)
    }

    /// Wrap a store using a custom prefix
    pub fn with_prefix(store: Arc<dyn KeyValueStore>, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// Namespaced storage key for `name`
    pub fn storage_key(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Obfuscate `data` and write it under `name`
    pub fn store<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> Result<()> {
        let blob = encrypt(data, name)?;
        self.store.set(&self.storage_key(name), &blob)?;
        debug!(name, bytes = blob.len(), "stored secure entry");
        Ok(())
    }

    /// Read and decode `name`; `None` if absent or empty
    pub fn retrieve<T: DeserializeOwned>(&self, name: &str) -> Result<Option<T>> {
        match self.store.get(&self.storage_key(name))? {
            Some(blob) if !blob.is_empty() => decrypt(&blob, name).map(Some),
            _ => Ok(None),
        }
    }

    /// Remove a single entry
    pub fn clear(&self, name: &str) -> Result<()> {
        self.store.remove(&self.storage_key(name))
    }

    /// Remove every namespaced entry, leaving other keys alone.
    ///
    /// Returns how many entries were removed.
    pub fn clear_all(&self) -> Result<usize> {
        let mut removed = 0;
        for key in self.store.keys()? {
            if key.starts_with(&self.prefix) {
                self.store.remove(&key)?;
                removed += 1;
            }
        }
        debug!(removed, "cleared secure entries");
        Ok(removed)
    }

    /// Names of all stored entries (prefix stripped), sorted
    pub fn names(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self
            .store
            .keys()?
            .into_iter()
            .filter_map(|k| k.strip_prefix(&self.prefix).map(String::from))
            .collect();
        names.sort();
        Ok(names)
    }
}

impl std::fmt::Debug for SecureStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureStore")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}
