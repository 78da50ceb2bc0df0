// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Security policy and environment
//!
//! - CSP policy injected at page load
//! - Host environment snapshot

mod environment;

pub use environment::{EnvironmentInfoPort, SecurityInfo, StaticEnvironment, DEFAULT_USER_AGENT};

/// Policy injected by `init()` when the page declares none
pub const DEFAULT_CSP_POLICY: &str = "default-src 'self'; script-src 'self' 'unsafe-inline' https://unpkg.com; style-src 'self' 'unsafe-inline'; img-src 'self' data: https:; font-src 'self' data:";
