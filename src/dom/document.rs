// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Document representation

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use super::element::Element;
use super::node::{remove_subtree, Node, NodeData, NodeId, NodeMap};
use super::selector::Selector;
use crate::error::{Error, Result};

/// HTML Document representation
#[derive(Debug, Clone)]
pub struct Document {
    /// Root node ID
    root_id: NodeId,
    /// Node storage
    pub(crate) nodes: NodeMap,
    /// Head element ID
    head_id: Option<NodeId>,
}

impl Document {
    /// Create a new empty document (no `<html>`, `<head>` or `<body>`)
    pub fn new() -> Self {
        let root_id = NodeId::new();
        let mut nodes = HashMap::new();
        nodes.insert(root_id, NodeData::document());

        Self {
            root_id,
            nodes: Arc::new(RwLock::new(nodes)),
            head_id: None,
        }
    }

    /// Create a document with an empty `<html><head></head><body></body></html>`
    pub fn blank() -> Self {
        let mut doc = Self::new();
        let html = doc.create_element("html");
        let head = doc.create_element("head");
        let body = doc.create_element("body");
        html.append_child(&head);
        html.append_child(&body);
        doc.root().append_child(&html.node);
        doc.set_head(Some(head.node.id));
        doc
    }

    /// Set the head element ID (called during parsing)
    pub(crate) fn set_head(&mut self, head: Option<NodeId>) {
        self.head_id = head;
    }

    /// Get the root node
    pub(crate) fn root(&self) -> Node {
        Node::new(self.root_id, self.nodes.clone())
    }

    /// Create a new detached element
    pub fn create_element(&self, tag: &str) -> Element {
        let id = NodeId::new();
        self.nodes.write().insert(id, NodeData::element(tag));
        Element { node: Node::new(id, self.nodes.clone()) }
    }

    /// Drop a detached node and its subtree from storage.
    ///
    /// Connected nodes are left untouched; returns whether anything was freed.
    pub fn discard(&self, node: &Node) -> bool {
        if node.is_connected() || node.id == self.root_id {
            return false;
        }
        let mut nodes = self.nodes.write();
        let existed = nodes.contains_key(&node.id);
        remove_subtree(&mut nodes, node.id);
        existed
    }

    /// Append `data` to `<head>` unless a node in the tree matches `unless`.
    ///
    /// The lookup and the insertion happen under one write lock, so
    /// concurrent callers add at most one node. Returns whether `data` was
    /// appended.
    pub(crate) fn append_to_head_unless(&self, unless: &Selector, mut data: NodeData) -> Result<bool> {
        let mut nodes = self.nodes.write();

        if contains_match(&nodes, self.root_id, unless) {
            return Ok(false);
        }

        let head = self
            .head_id
            .filter(|id| nodes.contains_key(id))
            .ok_or_else(|| Error::dom("document has no <head>"))?;

        let id = NodeId::new();
        data.parent = Some(head);
        nodes.insert(id, data);
        if let Some(head) = nodes.get_mut(&head) {
            head.children.push(id);
        }
        Ok(true)
    }

    /// Get the document's HTML
    pub fn outer_html(&self) -> String {
        self.root().inner_html()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether any descendant of `node_id` matches `selector`
fn contains_match(nodes: &HashMap<NodeId, NodeData>, node_id: NodeId, selector: &Selector) -> bool {
    nodes.get(&node_id).map_or(false, |node| {
        node.children.iter().any(|&child| {
            nodes.get(&child).map_or(false, |data| selector.matches(data))
                || contains_match(nodes, child, selector)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse_html;

    #[test]
    fn test_document_creation() {
        let doc = Document::new();
        assert!(doc.head_id.is_none());
        assert_eq!(doc.outer_html(), "");
    }

    #[test]
    fn test_blank_document() {
        let doc = Document::blank();
        assert!(doc.head_id.is_some());
        assert_eq!(doc.outer_html(), "<html><head></head><body></body></html>");
    }

    #[test]
    fn test_create_element() {
        let doc = Document::new();
        let div = doc.create_element("div");
        assert!(!div.node.is_connected());
        assert_eq!(doc.outer_html(), "");
    }

    #[test]
    fn test_discard_detached() {
        let doc = Document::blank();
        let before = doc.nodes.read().len();

        let div = doc.create_element("div");
        div.set_text_content("temp");
        assert_eq!(doc.nodes.read().len(), before + 2);

        assert!(doc.discard(&div.node));
        assert_eq!(doc.nodes.read().len(), before);
        assert!(!doc.discard(&div.node));
        assert!(!doc.discard(&doc.root()));
    }

    #[test]
    fn test_append_to_head_unless() {
        let doc = Document::blank();
        let selector = Selector::parse("meta[name=\"robots\"]").unwrap();
        let robots = || {
            let mut data = NodeData::element("meta");
            data.attributes.push(("name".into(), "robots".into()));
            data
        };

        assert!(doc.append_to_head_unless(&selector, robots()).unwrap());
        assert!(!doc.append_to_head_unless(&selector, robots()).unwrap());
        assert_eq!(
            doc.outer_html(),
            "<html><head><meta name=\"robots\"></head><body></body></html>"
        );
    }

    #[test]
    fn test_match_anywhere_blocks_append() {
        let doc = parse_html("<body><meta name='robots'></body>").unwrap();
        let selector = Selector::parse("meta[name=\"robots\"]").unwrap();

        assert!(!doc
            .append_to_head_unless(&selector, NodeData::element("meta"))
            .unwrap());
        assert!(!doc.outer_html().contains("<head><meta"));
    }
}
