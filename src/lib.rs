// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! # BeeRRy - profile page security helpers
//!
//! The client-side security utility of the BeeRRy profile page, as a
//! library with its browser globals replaced by ports.
//!
//! ## Features
//!
//! - Session tokens kept in a session-scoped store, plus strong random tokens
//! - Reversible XOR obfuscation of JSON values (not encryption)
//! - Obfuscated entries in a persistent store under the `secure_` namespace
//! - Email and password heuristics with Indonesian feedback
//! - Pattern-based XSS detection and markup escaping
//! - CSP meta injection at page load
//! - Environment snapshot (HTTPS, cookies, user agent, platform, language)
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use beerry::{Document, Guard, MemoryStorage};
//! use serde_json::{json, Value};
//!
//! let document = Arc::new(Document::blank());
//! let guard = Guard::builder()
//!     .persistent_store(Arc::new(MemoryStorage::new()))
//!     .document(document.clone())
//!     .build()
//!     .unwrap();
//!
//! let report = guard.init();
//! assert!(report.csp_injected);
//!
//! assert!(guard.store_secure("profile", &json!({"theme": "dark"})));
//! let back: Option<Value> = guard.retrieve_secure("profile");
//! assert_eq!(back, Some(json!({"theme": "dark"})));
//!
//! assert!(guard.detect_xss("<script>alert(1)</script>"));
//! ```

pub mod config;
pub mod dom;
pub mod error;
pub mod guard;
pub mod obfuscation;
pub mod security;
pub mod storage;
pub mod token;
pub mod validation;
pub mod xss;

// Re-exports for convenience

// Facade
pub use config::{GuardConfig, SESSION_TOKEN_KEY};
pub use guard::{Guard, GuardBuilder, InitReport};

// Ports and their default implementations
pub use dom::{parse_html, Document, DocumentPort};
pub use security::{EnvironmentInfoPort, SecurityInfo, StaticEnvironment};
pub use storage::{JsonFileStorage, KeyValueStore, MemoryStorage, SecureStore};
pub use token::{OsRandom, RandomSource, SeededRandom};

// Typed core
pub use obfuscation::{decrypt, encrypt, rolling_hash};
pub use security::DEFAULT_CSP_POLICY;
pub use validation::{check_password_strength, validate_email, PasswordAssessment, StrengthLevel};
pub use xss::{detect_xss, sanitize_html, scan_xss, XssMatch, XssPattern};

// Error types
pub use error::{Error, Result};
