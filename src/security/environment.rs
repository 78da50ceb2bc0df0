// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Host environment introspection

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Result;

/// Default user agent reported by [`StaticEnvironment`]
pub const DEFAULT_USER_AGENT: &str = concat!("beerry/", env!("CARGO_PKG_VERSION"));

/// Read-only view of the host the page runs in
pub trait EnvironmentInfoPort: Send + Sync {
    /// Page protocol including the colon, e.g. `https:`
    fn protocol(&self) -> String;
    fn cookies_enabled(&self) -> bool;
    fn user_agent(&self) -> String;
    fn platform(&self) -> String;
    fn language(&self) -> String;
}

/// Snapshot of the environment taken at call time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityInfo {
    pub https: bool,
    pub cookies_enabled: bool,
    pub user_agent: String,
    pub platform: String,
    pub language: String,
}

impl SecurityInfo {
    /// Read every field from `env`
    pub fn capture(env: &dyn EnvironmentInfoPort) -> Self {
        Self {
            https: env.protocol() == "https:",
            cookies_enabled: env.cookies_enabled(),
            user_agent: env.user_agent(),
            platform: env.platform(),
            language: env.language(),
        }
    }
}

/// Fixed environment values, configured with a builder
#[derive(Debug, Clone)]
pub struct StaticEnvironment {
    /// Protocol including the trailing colon
    pub protocol: String,
    pub cookies_enabled: bool,
    pub user_agent: String,
    pub platform: String,
    pub language: String,
}

impl Default for StaticEnvironment {
    fn default() -> Self {
        Self {
            protocol: "https:".to_string(),
            cookies_enabled: true,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            platform: std::env::consts::OS.to_string(),
            language: "en-US".to_string(),
        }
    }
}

impl StaticEnvironment {
    /// Create an environment with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the protocol from a page URL
    pub fn from_url(url: &str) -> Result<Self> {
        let parsed = Url::parse(url)?;
        Ok(Self::default().protocol(format!("{}:", parsed.scheme())))
    }

    /// Set protocol; a missing trailing colon is added
    pub fn protocol(mut self, protocol: impl Into<String>) -> Self {
        let mut protocol = protocol.into();
        if !protocol.ends_with(':') {
            protocol.push(':');
        }
        self.protocol = protocol;
        self
    }

    /// Set cookie support
    pub fn cookies_enabled(mut self, enabled: bool) -> Self {
        self.cookies_enabled = enabled;
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set platform
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = platform.into();
        self
    }

    /// Set language tag
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

impl EnvironmentInfoPort for StaticEnvironment {
    fn protocol(&self) -> String {
        self.protocol.clone()
    }

    fn cookies_enabled(&self) -> bool {
        self.cookies_enabled
    }

    fn user_agent(&self) -> String {
        self.user_agent.clone()
    }

    fn platform(&self) -> String {
        self.platform.clone()
    }

    fn language(&self) -> String {
        self.language.clone()
    }
}
