// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! DOM engine for HTML parsing and manipulation
//!
//! Provides a DOM-like interface built on top of html5ever, plus the
//! [`DocumentPort`] seam the security helpers talk to.

mod document;
mod element;
mod node;
mod parser;
mod port;
mod selector;

pub use document::Document;
pub use element::Element;
pub use node::{Node, NodeId};
pub use parser::parse_html;
pub use port::{DocumentPort, CSP_META_SELECTOR};
