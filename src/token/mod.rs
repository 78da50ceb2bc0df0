// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Token generation
//!
//! - Session tokens: two base36 fragments of non-cryptographic floats,
//!   only good for same-tab request matching
//! - Secure tokens: alphanumeric strings over a cryptographically strong
//!   byte source (with the usual `byte % 62` bias)

mod random;

pub use random::{OsRandom, RandomSource, SeededRandom};

/// Alphabet for secure tokens
pub const TOKEN_ALPHABET: &[u8; 62] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Default secure token length
pub const DEFAULT_TOKEN_LENGTH: usize = 32;

/// Upper bound on digits emitted per base36 fragment
const MAX_FRACTION_DIGITS: usize = 11;

/// Render the fractional part of `value` in base36, without the leading `0.`
pub fn base36_fraction(value: f64) -> String {
    let mut frac = value.fract().abs();
    let mut out = String::with_capacity(MAX_FRACTION_DIGITS);

    while frac > 0.0 && out.len() < MAX_FRACTION_DIGITS {
        frac *= 36.0;
        let digit = frac.floor();
        frac -= digit;
        if let Some(c) = char::from_digit(digit as u32, 36) {
            out.push(c);
        }
    }

    out
}

/// Build a session token from two random base36 fragments
pub fn session_token(rng: &mut dyn RandomSource) -> String {
    let mut token = base36_fraction(rng.next_f64());
    token.push_str(&base36_fraction(rng.next_f64()));
    token
}

/// Build an alphanumeric token of `length` chars from strong random bytes
pub fn secure_token(rng: &mut dyn RandomSource, length: usize) -> String {
    let mut bytes = vec![0u8; length];
    rng.fill_bytes(&mut bytes);

    bytes
        .iter()
        .map(|&b| char::from(TOKEN_ALPHABET[usize::from(b) % TOKEN_ALPHABET.len()]))
        .collect()
}
