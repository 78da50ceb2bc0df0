// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Guard configuration

use crate::error::{Error, Result};
use crate::obfuscation::DEFAULT_KEY;
use crate::security::DEFAULT_CSP_POLICY;
use crate::storage::SECURE_PREFIX;
use crate::token::DEFAULT_TOKEN_LENGTH;

/// Session store key holding the current session token
pub const SESSION_TOKEN_KEY: &str = "csrf_token";

/// Guard configuration
#[derive(Debug, Clone)]
pub struct GuardConfig {
    /// Session store key for the session token
    pub session_token_key: String,
    /// Persistent store prefix for obfuscated entries
    pub secure_prefix: String,
    /// Key used by `encrypt`/`decrypt` when none is given
    pub default_key: String,
    /// Length of secure tokens when none is given
    pub token_length: usize,
    /// Policy injected by `init()`
    pub csp_policy: String,
    /// Whether `init()` injects the policy at all
    pub inject_csp: bool,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            session_token_key: SESSION_TOKEN_KEY.to_string(),
            secure_prefix: SECURE_PREFIX.to_string(),
            default_key: DEFAULT_KEY.to_string(),
            token_length: DEFAULT_TOKEN_LENGTH,
            csp_policy: DEFAULT_CSP_POLICY.to_string(),
            inject_csp: true,
        }
    }
}

impl GuardConfig {
    /// Create a new guard config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session token key
    pub fn session_token_key(mut self, key: impl Into<String>) -> Self {
        self.session_token_key = key.into();
        self
    }

    /// Set the secure entry prefix
    pub fn secure_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.secure_prefix = prefix.into();
        self
    }

    /// Set the default obfuscation key
    pub fn default_key(mut self, key: impl Into<String>) -> Self {
        self.default_key = key.into();
        self
    }

    /// Set the default secure token length
    pub fn token_length(mut self, length: usize) -> Self {
        self.token_length = length;
        self
    }

    /// Set the injected CSP
    pub fn csp_policy(mut self, policy: impl Into<String>) -> Self {
        self.csp_policy = policy.into();
        self
    }

    /// Enable or disable CSP injection
    pub fn inject_csp(mut self, enabled: bool) -> Self {
        self.inject_csp = enabled;
        self
    }

    /// Reject settings that would break the store layout
    pub fn validate(&self) -> Result<()> {
        if self.session_token_key.is_empty() {
            return Err(Error::config("session token key must not be empty"));
        }
        // an empty prefix would let clear_all wipe the whole store
        if self.secure_prefix.is_empty() {
            return Err(Error::config("secure prefix must not be empty"));
        }
        if self.inject_csp && self.csp_policy.trim().is_empty() {
            return Err(Error::config("CSP policy must not be empty when injection is on"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GuardConfig::default();
        assert_eq!(config.session_token_key, "csrf_token");
        assert_eq!(config.secure_prefix, "secure_");
        assert_eq!(config.default_key, "default");
        assert_eq!(config.token_length, 32);
        assert!(config.csp_policy.starts_with("default-src 'self';"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = GuardConfig::new()
            .session_token_key("xsrf")
            .secure_prefix("vault_")
            .token_length(16)
            .inject_csp(false)
            .csp_policy("");

        assert_eq!(config.session_token_key, "xsrf");
        assert_eq!(config.secure_prefix, "vault_");
        assert_eq!(config.token_length, 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects() {
        assert!(matches!(
            GuardConfig::new().secure_prefix("").validate(),
            Err(Error::Config(_))
        ));
        assert!(GuardConfig::new().session_token_key("").validate().is_err());
        assert!(GuardConfig::new().csp_policy("  ").validate().is_err());
    }
}
