// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Markup escaping

use crate::dom::DocumentPort;

/// Escape `text` for insertion as markup.
///
/// The text is assigned to a detached element and its inner markup is read
/// back, so `&`, `<`, `>` and U+00A0 are escaped while quotes pass through.
pub fn sanitize_html<D: DocumentPort + ?Sized>(document: &D, text: &str) -> String {
    document.escape_text(text)
}
