// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! HTML parser using html5ever

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::ParseOpts;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use super::document::Document;
use super::node::{NodeData, NodeId};
use crate::error::{Error, Result};

/// Parse HTML string into a Document
pub fn parse_html(html: &str) -> Result<Document> {
    let opts = ParseOpts {
        tree_builder: TreeBuilderOpts {
            drop_doctype: false,
            ..Default::default()
        },
        ..Default::default()
    };

    let dom = parse_document(RcDom::default(), opts)
        .from_utf8()
        .read_from(&mut html.as_bytes())
        .map_err(|e| Error::HtmlParse(e.to_string()))?;

    let mut doc = Document::new();

    // Convert html5ever DOM to our DOM
    let converter = DomConverter::new(&mut doc);
    converter.convert(&dom.document);

    Ok(doc)
}

/// Converts html5ever DOM to our DOM
struct DomConverter<'a> {
    doc: &'a mut Document,
}

impl<'a> DomConverter<'a> {
    fn new(doc: &'a mut Document) -> Self {
        Self { doc }
    }

    fn convert(mut self, handle: &Handle) {
        let root_id = self.doc.root().id;

        let mut html_id = None;
        for child in handle.children.borrow().iter() {
            if let Some(id) = self.convert_node(child, root_id) {
                if self.tag_of(id).as_deref() == Some("html") {
                    html_id = Some(id);
                }
            }
        }

        // html5ever always synthesizes head inside html
        let mut head_id = None;
        if let Some(html) = html_id {
            let children = self
                .doc
                .nodes
                .read()
                .get(&html)
                .map(|d| d.children.clone())
                .unwrap_or_default();
            head_id = children
                .into_iter()
                .find(|&id| self.tag_of(id).as_deref() == Some("head"));
        }

        self.doc.set_head(head_id);
    }

    fn tag_of(&self, id: NodeId) -> Option<String> {
        self.doc
            .nodes
            .read()
            .get(&id)
            .and_then(|d| d.tag_name.clone())
    }

    fn convert_node(&self, handle: &Handle, parent_id: NodeId) -> Option<NodeId> {
        let mut data = match handle.data {
            RcNodeData::Document => return None,
            RcNodeData::Doctype { .. } => NodeData::doctype(),
            RcNodeData::Text { ref contents } => {
                let text = contents.borrow().to_string();
                if text.trim().is_empty() && text.len() > 1 {
                    // Skip whitespace-only text nodes (but keep single spaces)
                    return None;
                }
                NodeData::text(text)
            }
            RcNodeData::Comment { ref contents } => NodeData::comment(contents.to_string()),
            RcNodeData::Element {
                ref name,
                ref attrs,
                ..
            } => {
                let mut data = NodeData::element(name.local.to_string());
                for attr in attrs.borrow().iter() {
                    data.attributes
                        .push((attr.name.local.to_string(), attr.value.to_string()));
                }
                data
            }
            RcNodeData::ProcessingInstruction { .. } => return None,
        };

        let node_id = NodeId::new();
        data.parent = Some(parent_id);

        {
            let mut nodes = self.doc.nodes.write();
            nodes.insert(node_id, data);
            if let Some(parent) = nodes.get_mut(&parent_id) {
                parent.children.push(node_id);
            }
        }

        for child in handle.children.borrow().iter() {
            self.convert_node(child, node_id);
        }

        Some(node_id)
    }
}
