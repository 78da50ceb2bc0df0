// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Pattern-based XSS detection

use std::fmt;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// `.` of browser regular expressions: anything but a line terminator
const LINE_CHAR: &str = r"[^\n\r\x{2028}\x{2029}]";

/// Body of a character class equal to `\s` in browser regular expressions.
///
/// Unlike the Unicode `\s` it contains U+FEFF and omits U+0085.
pub(crate) const BROWSER_SPACE: &str =
    r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

lazy_static! {
    static ref SCRIPT_TAG: Regex =
        Regex::new(&format!(r"(?i)<script[^>]*>{}*?</script>", LINE_CHAR)).unwrap();
    // \w is ASCII-only in browsers
    static ref EVENT_HANDLER: Regex =
        Regex::new(&format!(r"(?i)on[A-Za-z0-9_]+[{}]*=", BROWSER_SPACE)).unwrap();
    static ref JAVASCRIPT_URI: Regex = Regex::new(r"(?i)javascript:").unwrap();
    static ref IFRAME_TAG: Regex =
        Regex::new(&format!(r"(?i)<iframe[^>]*>{}*?</iframe>", LINE_CHAR)).unwrap();
    static ref EMBED_TAG: Regex = Regex::new(r"(?i)<embed[^>]*>").unwrap();
    static ref OBJECT_TAG: Regex = Regex::new(r"(?i)<object[^>]*>").unwrap();
}

/// The kinds of markup injection recognized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum XssPattern {
    /// `<script ...>...</script>` on one line
    ScriptTag,
    /// `onxxx=` attribute
    EventHandler,
    /// `javascript:` URI
    JavascriptUri,
    /// `<iframe ...>...</iframe>` on one line
    IframeTag,
    /// `<embed ...>`
    EmbedTag,
    /// `<object ...>`
    ObjectTag,
}

impl XssPattern {
    /// Every pattern, in evaluation order
    pub const ALL: [XssPattern; 6] = [
        XssPattern::ScriptTag,
        XssPattern::EventHandler,
        XssPattern::JavascriptUri,
        XssPattern::IframeTag,
        XssPattern::EmbedTag,
        XssPattern::ObjectTag,
    ];

    fn regex(&self) -> &'static Regex {
        match self {
            XssPattern::ScriptTag => &*SCRIPT_TAG,
            XssPattern::EventHandler => &*EVENT_HANDLER,
            XssPattern::JavascriptUri => &*JAVASCRIPT_URI,
            XssPattern::IframeTag => &*IFRAME_TAG,
            XssPattern::EmbedTag => &*EMBED_TAG,
            XssPattern::ObjectTag => &*OBJECT_TAG,
        }
    }

    /// Short identifier
    pub fn name(&self) -> &'static str {
        match self {
            XssPattern::ScriptTag => "script_tag",
            XssPattern::EventHandler => "event_handler",
            XssPattern::JavascriptUri => "javascript_uri",
            XssPattern::IframeTag => "iframe_tag",
            XssPattern::EmbedTag => "embed_tag",
            XssPattern::ObjectTag => "object_tag",
        }
    }

    /// Whether `input` contains this pattern
    pub fn is_match(&self, input: &str) -> bool {
        self.regex().is_match(input)
    }
}

impl fmt::Display for XssPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// First occurrence of a pattern in scanned input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XssMatch {
    pub pattern: XssPattern,
    /// Matched text
    pub fragment: String,
    /// Byte offset of the match
    pub offset: usize,
}

/// True if any pattern matches anywhere in `input`
pub fn detect_xss(input: &str) -> bool {
    XssPattern::ALL.iter().any(|p| p.is_match(input))
}

/// Report the first match of each pattern, in pattern order
pub fn scan_xss(input: &str) -> Vec<XssMatch> {
    XssPattern::ALL
        .iter()
        .filter_map(|&pattern| {
            pattern.regex().find(input).map(|m| XssMatch {
                pattern,
                fragment: m.as_str().to_string(),
                offset: m.start(),
            })
        })
        .collect()
}
