// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Loose email shape check

use lazy_static::lazy_static;
use regex::Regex;

use crate::xss::BROWSER_SPACE;

lazy_static! {
    static ref EMAIL_RE: Regex = {
        let part = format!("[^{}@]+", BROWSER_SPACE);
        Regex::new(&format!(r"^{0}@{0}\.{0}$", part)).unwrap()
    };
}

/// `local@domain.tld` with no whitespace and a single `@`.
///
/// Accepts plenty of addresses RFC 5322 would reject.
pub fn validate_email(text: &str) -> bool {
    EMAIL_RE.is_match(text)
}
