// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Rolling hash used to derive the XOR keystream

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// 31-multiplier rolling hash over UTF-16 code units.
///
/// Each step computes `(h << 5) - h + unit` and truncates to a signed
/// 32-bit integer. The absolute value is rendered in lowercase base36.
/// Not collision resistant; only ever used as a keystream seed.
pub fn rolling_hash(text: &str) -> String {
    let mut h: i32 = 0;
    for unit in text.encode_utf16() {
        h = h.wrapping_shl(5).wrapping_sub(h).wrapping_add(i32::from(unit));
    }
    to_base36(u64::from(h.unsigned_abs()))
}

/// Render an unsigned integer in lowercase base36
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36_DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    // Digits are all ASCII
    digits.into_iter().map(char::from).collect()
}
