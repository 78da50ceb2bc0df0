// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Element-specific DOM operations

use super::node::Node;

/// Element node with extended operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Inner node reference
    pub node: Node,
}

impl Element {
    /// Set text content
    pub fn set_text_content(&self, content: impl Into<String>) {
        self.node.set_text_content(content);
    }

    /// Get inner HTML
    pub fn inner_html(&self) -> String {
        self.node.inner_html()
    }

    /// Append a child element
    pub fn append_child(&self, child: &Element) {
        self.node.append_child(&child.node);
    }
}
