// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document access used by the security helpers

use super::document::Document;
use super::node::NodeData;
use super::selector::Selector;
use crate::error::Result;

/// Selector locating an existing CSP meta tag
pub const CSP_META_SELECTOR: &str = "meta[http-equiv=\"Content-Security-Policy\"]";

/// The slice of a hosting page that the guard needs.
///
/// Implementations must be usable from several threads; [`Document`]
/// serializes mutation behind its own node lock.
pub trait DocumentPort: Send + Sync {
    /// Append `<meta http-equiv="Content-Security-Policy" content=policy>` to
    /// head unless the page already declares a CSP meta tag.
    ///
    /// Check and insert are one atomic step. Returns `Ok(false)` when a tag
    /// was already present.
    fn inject_csp_meta(&self, policy: &str) -> Result<bool>;

    /// Escape text the way a text node's serialization would
    fn escape_text(&self, text: &str) -> String;
}

impl DocumentPort for Document {
    fn inject_csp_meta(&self, policy: &str) -> Result<bool> {
        let existing = Selector::parse(CSP_META_SELECTOR)?;

        let mut meta = NodeData::element("meta");
        meta.attributes
            .push(("http-equiv".to_string(), "Content-Security-Policy".to_string()));
        meta.attributes.push(("content".to_string(), policy.to_string()));

        self.append_to_head_unless(&existing, meta)
    }

    fn escape_text(&self, text: &str) -> String {
        let scratch = self.create_element("div");
        scratch.set_text_content(text);
        let html = scratch.inner_html();
        self.discard(&scratch.node);
        html
    }
}
