// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for beerry
//!
//! The typed core returns these errors. The [`Guard`](crate::Guard) facade
//! swallows them after logging so no failure ever reaches page code.

use thiserror::Error;

/// Result type alias for beerry operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    /// Value could not be turned into (or parsed from) JSON text
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// `btoa` input contained a character outside Latin-1
    #[error("Character {ch:?} at index {index} is outside the Latin-1 range")]
    Latin1 { ch: char, index: usize },

    /// `atob` input was not valid forgiving-base64
    #[error("Base64 decode error: {0}")]
    Base64Decode(String),

    /// Storage backend refused or failed the operation
    #[error("Storage error: {0}")]
    Storage(String),

    /// DOM operation failed
    #[error("DOM error: {0}")]
    Dom(String),

    /// Selector parsing error
    #[error("Invalid selector '{selector}': {reason}")]
    Selector { selector: String, reason: String },

    /// HTML parsing failed
    #[error("HTML parsing error: {0}")]
    HtmlParse(String),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Error::Storage(msg.into())
    }

    /// Create a new DOM error
    pub fn dom<S: Into<String>>(msg: S) -> Self {
        Error::Dom(msg.into())
    }

    /// Create a new base64 decode error
    pub fn base64<S: Into<String>>(msg: S) -> Self {
        Error::Base64Decode(msg.into())
    }

    /// Create a selector error
    pub fn selector(selector: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Selector {
            selector: selector.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Error::Config(msg.into())
    }

    /// Failure while decoding a blob (bad base64, bad text or bad JSON).
    /// A wrong key lands here.
    pub fn is_decode(&self) -> bool {
        matches!(
            self,
            Error::Base64Decode(_) | Error::Serialization(_) | Error::Latin1 { .. }
        )
    }

    /// Check if this is a storage error
    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_) | Error::Io(_))
    }
}

/// Helper trait for adding context to errors
pub trait ErrorContext<T> {
    /// Add operation context to error
    fn context(self, msg: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, msg: &str) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            match err {
                Error::Storage(inner) => Error::Storage(format!("{}: {}", msg, inner)),
                Error::Io(io) => Error::Storage(format!("{}: {}", msg, io)),
                other => Error::Other(format!("{}: {}", msg, other)),
            }
        })
    }
}
