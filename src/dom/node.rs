// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM Node types

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;

/// Shared node storage of a document
pub(crate) type NodeMap = Arc<RwLock<HashMap<NodeId, NodeData>>>;

/// Elements whose text children are serialized verbatim
const RAW_TEXT_ELEMENTS: [&str; 8] = [
    "style", "script", "xmp", "iframe", "noembed", "noframes", "plaintext", "noscript",
];

/// Elements serialized without children or end tag
const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Unique node identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl NodeId {
    /// Create a new unique node ID
    pub fn new() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    /// Document node
    Document,
    /// Element node (like <div>, <p>, etc.)
    Element,
    /// Text node
    Text,
    /// Comment node
    Comment,
    /// Document type node (<!DOCTYPE>)
    DocumentType,
}

/// Internal node data
#[derive(Debug)]
pub struct NodeData {
    /// Node type
    pub node_type: NodeType,
    /// Tag name (for elements), lowercase
    pub tag_name: Option<String>,
    /// Text content (for text/comment nodes)
    pub text_content: Option<String>,
    /// Attributes in insertion order, names lowercase
    pub attributes: Vec<(String, String)>,
    /// Parent node ID
    pub parent: Option<NodeId>,
    /// Child node IDs
    pub children: Vec<NodeId>,
}

impl NodeData {
    fn blank(node_type: NodeType) -> Self {
        Self {
            node_type,
            tag_name: None,
            text_content: None,
            attributes: Vec::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Create a new element node data
    pub fn element(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: Some(tag_name.into().to_lowercase()),
            ..Self::blank(NodeType::Element)
        }
    }

    /// Create a new text node data
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            text_content: Some(content.into()),
            ..Self::blank(NodeType::Text)
        }
    }

    /// Create a new comment node data
    pub fn comment(content: impl Into<String>) -> Self {
        Self {
            text_content: Some(content.into()),
            ..Self::blank(NodeType::Comment)
        }
    }

    /// Create a doctype node data
    pub fn doctype() -> Self {
        Self::blank(NodeType::DocumentType)
    }

    /// Create a new document node data
    pub fn document() -> Self {
        Self::blank(NodeType::Document)
    }

    /// Look up an attribute by lowercase name
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// A reference to a node in the DOM tree
#[derive(Debug, Clone)]
pub struct Node {
    /// Node ID
    pub id: NodeId,
    /// Reference to document's node storage
    nodes: NodeMap,
}

impl Node {
    /// Create a new node reference
    pub(crate) fn new(id: NodeId, nodes: NodeMap) -> Self {
        Self { id, nodes }
    }

    /// Set text content (replaces all children with a single text node)
    pub fn set_text_content(&self, content: impl Into<String>) {
        let content = content.into();
        let mut nodes = self.nodes.write();

        let Some(node) = nodes.get_mut(&self.id) else {
            return;
        };

        if matches!(node.node_type, NodeType::Text | NodeType::Comment) {
            node.text_content = Some(content);
            return;
        }

        let old_children = std::mem::take(&mut node.children);
        for child in old_children {
            remove_subtree(&mut nodes, child);
        }

        // Empty string leaves no text node behind
        if content.is_empty() {
            return;
        }

        let text_id = NodeId::new();
        let mut text_data = NodeData::text(content);
        text_data.parent = Some(self.id);
        nodes.insert(text_id, text_data);

        if let Some(parent) = nodes.get_mut(&self.id) {
            parent.children.push(text_id);
        }
    }

    /// Get parent node
    pub fn parent(&self) -> Option<Node> {
        self.nodes
            .read()
            .get(&self.id)
            .and_then(|n| n.parent)
            .map(|id| Node::new(id, self.nodes.clone()))
    }

    /// Check if the node is attached to a tree (has a parent)
    pub fn is_connected(&self) -> bool {
        self.parent().is_some()
    }

    /// Append a child node, moving it from any previous parent
    pub fn append_child(&self, child: &Node) {
        let mut nodes = self.nodes.write();

        let old_parent_id = nodes.get(&child.id).and_then(|d| d.parent);
        if let Some(old_pid) = old_parent_id {
            if let Some(old_parent) = nodes.get_mut(&old_pid) {
                old_parent.children.retain(|&id| id != child.id);
            }
        }

        if let Some(child_data) = nodes.get_mut(&child.id) {
            child_data.parent = Some(self.id);
        }

        if let Some(parent_data) = nodes.get_mut(&self.id) {
            parent_data.children.push(child.id);
        }
    }

    /// Get inner HTML
    pub fn inner_html(&self) -> String {
        let nodes = self.nodes.read();
        let mut out = String::new();
        if let Some(node) = nodes.get(&self.id) {
            let raw = is_raw_text_parent(node);
            for &id in &node.children {
                serialize_node(&nodes, id, raw, &mut out);
            }
        }
        out
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Drop a node and all its descendants from storage
pub(crate) fn remove_subtree(nodes: &mut HashMap<NodeId, NodeData>, node_id: NodeId) {
    if let Some(data) = nodes.remove(&node_id) {
        for child in data.children {
            remove_subtree(nodes, child);
        }
    }
}

fn is_raw_text_parent(node: &NodeData) -> bool {
    node.tag_name
        .as_deref()
        .map(|t| RAW_TEXT_ELEMENTS.contains(&t))
        .unwrap_or(false)
}

/// Serialize a node following the HTML fragment serialization rules
fn serialize_node(
    nodes: &HashMap<NodeId, NodeData>,
    node_id: NodeId,
    raw_text: bool,
    out: &mut String,
) {
    let Some(node) = nodes.get(&node_id) else {
        return;
    };

    match node.node_type {
        NodeType::Text => {
            let text = node.text_content.as_deref().unwrap_or("");
            if raw_text {
                out.push_str(text);
            } else {
                out.push_str(&escape_text(text));
            }
        }
        NodeType::Comment => {
            out.push_str("<!--");
            out.push_str(node.text_content.as_deref().unwrap_or(""));
            out.push_str("-->");
        }
        NodeType::Element => {
            let tag = node.tag_name.as_deref().unwrap_or("div");
            out.push('<');
            out.push_str(tag);
            for (k, v) in &node.attributes {
                out.push(' ');
                out.push_str(k);
                out.push_str("=\"");
                out.push_str(&escape_attribute(v));
                out.push('"');
            }
            out.push('>');

            if VOID_ELEMENTS.contains(&tag) {
                return;
            }

            let raw = is_raw_text_parent(node);
            for &id in &node.children {
                serialize_node(nodes, id, raw, out);
            }
            out.push_str("</");
            out.push_str(tag);
            out.push('>');
        }
        NodeType::Document => {
            for &id in &node.children {
                serialize_node(nodes, id, false, out);
            }
        }
        NodeType::DocumentType => out.push_str("<!DOCTYPE html>"),
    }
}

/// Escape text node content the way `innerHTML` does
fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value
fn escape_attribute(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{A0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}
