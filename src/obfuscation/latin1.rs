// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Browser-compatible `btoa` / `atob`
//!
//! Strings are treated as Latin-1: one char per byte. `atob` follows the
//! forgiving-base64 decode rules browsers use.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;

use crate::error::{Error, Result};

/// Padded standard alphabet for encoding
const ENCODER: GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Unpadded, trailing-bit tolerant decoder (padding is stripped beforehand)
const FORGIVING: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::RequireNone)
        .with_decode_allow_trailing_bits(true),
);

/// Encode a Latin-1 string as base64.
///
/// Fails on the first char above U+00FF, matching the browser's
/// `InvalidCharacterError`.
pub fn btoa(input: &str) -> Result<String> {
    let mut bytes = Vec::with_capacity(input.len());
    for (index, ch) in input.chars().enumerate() {
        let code = u32::from(ch);
        if code > 0xFF {
            return Err(Error::Latin1 { ch, index });
        }
        bytes.push(code as u8);
    }
    Ok(ENCODER.encode(bytes))
}

/// Decode forgiving-base64 into raw bytes
pub fn atob(input: &str) -> Result<Vec<u8>> {
    let mut data: String = input
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\x0C' | '\r' | ' '))
        .collect();

    if data.len() % 4 == 0 {
        if data.ends_with("==") {
            data.truncate(data.len() - 2);
        } else if data.ends_with('=') {
            data.truncate(data.len() - 1);
        }
    }

    if data.len() % 4 == 1 {
        return Err(Error::base64(format!("invalid length {}", data.len())));
    }

    if let Some(bad) = data
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || *c == '+' || *c == '/'))
    {
        return Err(Error::base64(format!("invalid character {:?}", bad)));
    }

    FORGIVING
        .decode(data.as_bytes())
        .map_err(|e| Error::base64(e.to_string()))
}

/// Interpret bytes as Latin-1 text
pub fn bytes_to_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}
