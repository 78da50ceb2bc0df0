// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! XOR obfuscation of JSON values

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::hash::rolling_hash;
use super::latin1::{atob, btoa, bytes_to_latin1};
use crate::error::Result;

/// Key used when the caller does not supply one
pub const DEFAULT_KEY: &str = "default";

/// XOR `data` against `key` repeated to the data length.
///
/// An empty key leaves the data unchanged.
pub fn xor_keystream(data: &[u8], key: &[u8]) -> Vec<u8> {
    if key.is_empty() {
        return data.to_vec();
    }
    data.iter()
        .zip(key.iter().cycle())
        .map(|(d, k)| d ^ k)
        .collect()
}

/// Obfuscate any serializable value under `key`.
///
/// Fails when the value cannot be serialized or its JSON text holds
/// characters above U+00FF.
pub fn encrypt<T: Serialize + ?Sized>(data: &T, key: &str) -> Result<String> {
    let json = serde_json::to_string(data)?;
    let encoded = btoa(&json)?;
    let keystream = rolling_hash(key);
    let xored = xor_keystream(encoded.as_bytes(), keystream.as_bytes());
    btoa(&bytes_to_latin1(&xored))
}

/// Reverse [`encrypt`].
///
/// A wrong key normally surfaces as a base64 or JSON error; it can also
/// decode to a different value when the inner text happens to stay valid.
pub fn decrypt<T: DeserializeOwned>(blob: &str, key: &str) -> Result<T> {
    let keystream = rolling_hash(key);
    let xored = atob(blob)?;
    let encoded = xor_keystream(&xored, keystream.as_bytes());
    let json_bytes = atob(&bytes_to_latin1(&encoded))?;
    let json = bytes_to_latin1(&json_bytes);
    Ok(serde_json::from_str(&json)?)
}
