// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Reversible string obfuscation
//!
//! JSON text -> Latin-1 base64 -> XOR with a key-derived keystream -> base64.
//!
//! This is obfuscation, not encryption. The keystream is a short base36
//! string derived from a 32-bit rolling hash, so anyone holding a blob and
//! the (usually guessable) key name can recover the data.

mod cipher;
mod hash;
mod latin1;

pub use cipher::{decrypt, encrypt, xor_keystream, DEFAULT_KEY};
pub use hash::{rolling_hash, to_base36};
pub use latin1::{atob, btoa, bytes_to_latin1};
