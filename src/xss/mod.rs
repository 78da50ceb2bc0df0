// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! XSS heuristics
//!
//! A fixed list of case-insensitive patterns flags input that looks like
//! markup injection, and [`sanitize_html`] escapes text for insertion as
//! markup. Neither is a parser-grade defence.

mod detector;
mod sanitize;

pub(crate) use detector::BROWSER_SPACE;
pub use detector::{detect_xss, scan_xss, XssMatch, XssPattern};
pub use sanitize::sanitize_html;
