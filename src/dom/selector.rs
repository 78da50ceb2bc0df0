// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! CSS Selector parsing and matching
//!
//! Compound selectors of a tag and exact attribute tests only
//! (`meta[http-equiv="..."]`). Anything else is rejected.

use crate::error::{Error, Result};

use super::node::{NodeData, NodeType};

/// A parsed compound selector
#[derive(Debug, Clone)]
pub(crate) struct Selector {
    parts: Vec<SelectorPart>,
}

/// A part of a compound selector
#[derive(Debug, Clone)]
enum SelectorPart {
    /// Tag name
    Tag(String),
    /// `[attr]` or `[attr=value]`
    Attribute { name: String, value: Option<String> },
}

impl Selector {
    /// Parse a CSS selector string
    pub(crate) fn parse(selector: &str) -> Result<Self> {
        let trimmed = selector.trim();
        if trimmed.is_empty() {
            return Err(Error::selector(selector, "empty selector"));
        }

        let mut parser = SelectorParser::new(trimmed);
        let parts = parser.parse_compound()?;
        if let Some(c) = parser.peek() {
            return Err(parser.error(format!("unsupported selector syntax '{}'", c)));
        }
        Ok(Self { parts })
    }

    /// Check if node data matches this selector
    pub(crate) fn matches(&self, node: &NodeData) -> bool {
        node.node_type == NodeType::Element
            && self.parts.iter().all(|part| match part {
                SelectorPart::Tag(tag) => node.tag_name.as_deref() == Some(tag.as_str()),
                SelectorPart::Attribute { name, value } => match (node.attribute(name), value) {
                    (Some(actual), Some(expected)) => actual == expected,
                    (Some(_), None) => true,
                    (None, _) => false,
                },
            })
    }
}

/// Simple selector parser
struct SelectorParser {
    source: String,
    input: Vec<char>,
    pos: usize,
}

impl SelectorParser {
    fn new(input: &str) -> Self {
        Self {
            source: input.to_string(),
            input: input.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> Error {
        Error::selector(self.source.clone(), reason)
    }

    fn parse_compound(&mut self) -> Result<Vec<SelectorPart>> {
        let mut parts = Vec::new();

        while let Some(c) = self.peek() {
            match c {
                '[' => parts.push(self.parse_attribute()?),
                c if parts.is_empty() && (c.is_alphabetic() || c == '_' || c == '-') => {
                    let tag = self.read_identifier()?;
                    parts.push(SelectorPart::Tag(tag.to_lowercase()));
                }
                _ => break,
            }
        }

        if parts.is_empty() {
            return Err(self.error("expected a compound selector"));
        }

        Ok(parts)
    }

    fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        self.pos += 1;
        c
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !c.is_whitespace() {
                break;
            }
            self.advance();
        }
    }

    fn read_identifier(&mut self) -> Result<String> {
        let mut result = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' || c == '-' {
                result.push(c);
                self.advance();
            } else {
                break;
            }
        }
        if result.is_empty() {
            return Err(self.error("expected identifier"));
        }
        Ok(result)
    }

    fn parse_attribute(&mut self) -> Result<SelectorPart> {
        self.advance(); // consume '['

        self.skip_whitespace();
        let name = self.read_identifier()?.to_lowercase();
        self.skip_whitespace();

        let mut value = None;
        match self.peek() {
            Some(']') | None => {}
            Some('=') => {
                self.advance();
                self.skip_whitespace();
                value = Some(self.read_string_or_ident()?);
                self.skip_whitespace();
            }
            Some(c) => return Err(self.error(format!("unknown operator '{}'", c))),
        }

        self.expect(']')?;

        Ok(SelectorPart::Attribute { name, value })
    }

    fn read_string_or_ident(&mut self) -> Result<String> {
        match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let mut result = String::new();
                loop {
                    match self.advance() {
                        Some(c) if c == quote => return Ok(result),
                        Some('\\') => {
                            if let Some(escaped) = self.advance() {
                                result.push(escaped);
                            }
                        }
                        Some(c) => result.push(c),
                        None => return Err(self.error("unterminated string")),
                    }
                }
            }
            _ => self.read_identifier(),
        }
    }

    fn expect(&mut self, expected: char) -> Result<()> {
        match self.advance() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', got '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', got end of input", expected))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::CSP_META_SELECTOR;

    fn meta(http_equiv: &str) -> NodeData {
        let mut data = NodeData::element("meta");
        data.attributes.push(("http-equiv".into(), http_equiv.into()));
        data
    }

    #[test]
    fn test_selector_parsing() {
        assert!(Selector::parse("div").is_ok());
        assert!(Selector::parse("[attr]").is_ok());
        assert!(Selector::parse("[attr=value]").is_ok());
        assert!(Selector::parse("meta[name='x'][content]").is_ok());
        assert!(Selector::parse(CSP_META_SELECTOR).is_ok());
    }

    #[test]
    fn test_selector_errors() {
        assert!(matches!(Selector::parse("   "), Err(Error::Selector { .. })));
        assert!(Selector::parse("div > p").is_err());
        assert!(Selector::parse("a, b").is_err());
        assert!(Selector::parse(".class").is_err());
        assert!(Selector::parse("[attr").is_err());
        assert!(Selector::parse("[attr=\"open").is_err());
        assert!(Selector::parse("[a^=b]").is_err());
    }

    #[test]
    fn test_attribute_matching() {
        let exact = Selector::parse(CSP_META_SELECTOR).unwrap();
        assert!(exact.matches(&meta("Content-Security-Policy")));
        assert!(!exact.matches(&meta("content-security-policy")));
        assert!(!exact.matches(&NodeData::element("meta")));

        let mut link = NodeData::element("link");
        link.attributes.push(("http-equiv".into(), "Content-Security-Policy".into()));
        assert!(!exact.matches(&link));

        assert!(Selector::parse("[http-equiv]").unwrap().matches(&meta("refresh")));
        assert!(!Selector::parse("[name]").unwrap().matches(&meta("refresh")));
    }

    #[test]
    fn test_non_elements_never_match() {
        let selector = Selector::parse("meta").unwrap();
        assert!(!selector.matches(&NodeData::text("meta")));
        assert!(selector.matches(&NodeData::element("META")));
    }
}
