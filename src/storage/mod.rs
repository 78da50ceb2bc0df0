// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Key/value storage ports
//!
//! - [`KeyValueStore`]: the session/persistent store surface
//! - [`MemoryStorage`]: in-memory store (sessionStorage stand-in, test fake)
//! - [`JsonFileStorage`]: persistent store backed by a JSON file
//! - [`SecureStore`]: obfuscated entries under the `secure_` namespace

mod file;
mod memory;
mod secure;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use secure::{SecureStore, SECURE_PREFIX};

use crate::error::Result;

/// A string key/value store with the semantics of Web Storage.
///
/// Implementations use interior mutability so a store can be shared
/// between a [`Guard`](crate::Guard) and page code.
pub trait KeyValueStore: Send + Sync {
    /// Read a value
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a value; missing keys are not an error
    fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently held, in no particular order
    fn keys(&self) -> Result<Vec<String>>;

    /// Remove everything
    fn clear(&self) -> Result<()>;

    /// Number of entries
    fn len(&self) -> Result<usize> {
        Ok(self.keys()?.len())
    }

    /// Check if the store is empty
    fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}
