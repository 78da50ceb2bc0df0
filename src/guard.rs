// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! The page-facing security facade
//!
//! [`Guard`] wires the typed helpers to the injected ports and fails closed:
//! every error is logged through `tracing` and surfaces as `None`, `false`
//! or an empty result. Callers that want the typed error use the module
//! functions directly.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::GuardConfig;
use crate::dom::{Document, DocumentPort};
use crate::error::Result;
use crate::obfuscation::{decrypt, encrypt, rolling_hash};
use crate::security::{EnvironmentInfoPort, SecurityInfo, StaticEnvironment};
use crate::storage::{KeyValueStore, MemoryStorage, SecureStore};
use crate::token::{secure_token, session_token, OsRandom, RandomSource};
use crate::validation::{self, PasswordAssessment};
use crate::xss::{self, XssMatch};

/// Outcome of [`Guard::init`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitReport {
    /// Fresh session token, `None` if the session store refused it
    pub session_token: Option<String>,
    /// Environment snapshot logged at startup
    pub security_info: SecurityInfo,
    /// Whether a CSP meta tag was added by this call
    pub csp_injected: bool,
}

/// Builder for [`Guard`]
///
/// Unset ports fall back to in-memory stores, OS randomness, a blank
/// document and a default environment.
#[derive(Default)]
pub struct GuardBuilder {
    config: GuardConfig,
    session: Option<Arc<dyn KeyValueStore>>,
    persistent: Option<Arc<dyn KeyValueStore>>,
    random: Option<Box<dyn RandomSource>>,
    document: Option<Arc<dyn DocumentPort>>,
    environment: Option<Arc<dyn EnvironmentInfoPort>>,
}

impl GuardBuilder {
    /// Start from default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    /// Session-scoped store (token storage)
    pub fn session_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.session = Some(store);
        self
    }

    /// Persistent store (secure entries)
    pub fn persistent_store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.persistent = Some(store);
        self
    }

    /// Random source for tokens
    pub fn random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Some(Box::new(random));
        self
    }

    /// Hosting document
    pub fn document(mut self, document: Arc<dyn DocumentPort>) -> Self {
        self.document = Some(document);
        self
    }

    /// Host environment
    pub fn environment(mut self, environment: Arc<dyn EnvironmentInfoPort>) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Validate the configuration and build the guard
    pub fn build(self) -> Result<Guard> {
        self.config.validate()?;

        let persistent = self
            .persistent
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));
        let secure = SecureStore::with_prefix(persistent, self.config.secure_prefix.clone());

        Ok(Guard {
            session: self.session.unwrap_or_else(|| Arc::new(MemoryStorage::new())),
            secure,
            random: Mutex::new(self.random.unwrap_or_else(|| Box::new(OsRandom))),
            document: self.document.unwrap_or_else(|| Arc::new(Document::blank())),
            environment: self
                .environment
                .unwrap_or_else(|| Arc::new(StaticEnvironment::default())),
            config: self.config,
        })
    }
}

/// Fail-closed security utility for a profile page
pub struct Guard {
    config: GuardConfig,
    session: Arc<dyn KeyValueStore>,
    secure: SecureStore,
    random: Mutex<Box<dyn RandomSource>>,
    document: Arc<dyn DocumentPort>,
    environment: Arc<dyn EnvironmentInfoPort>,
}

impl Guard {
    /// Guard with every port defaulted
    pub fn new() -> Self {
        Self {
            config: GuardConfig::default(),
            session: Arc::new(MemoryStorage::new()),
            secure: SecureStore::new(Arc::new(MemoryStorage::new())),
            random: Mutex::new(Box::new(OsRandom)),
            document: Arc::new(Document::blank()),
            environment: Arc::new(StaticEnvironment::default()),
        }
    }

    /// Start building a guard
    pub fn builder() -> GuardBuilder {
        GuardBuilder::new()
    }

    /// Active configuration
    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Generate a session token and remember it in the session store
    pub fn generate_session_token(&self) -> Option<String> {
        let token = session_token(&mut **self.random.lock());
        match self.session.set(&self.config.session_token_key, &token) {
            Ok(()) => {
                tracing::debug!(len = token.len(), "session token generated");
                Some(token)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to store session token");
                None
            }
        }
    }

    /// Whether `candidate` equals the stored session token
    pub fn validate_session_token(&self, candidate: &str) -> bool {
        match self.session.get(&self.config.session_token_key) {
            Ok(stored) => stored.as_deref() == Some(candidate),
            Err(e) => {
                tracing::error!(error = %e, "failed to read session token");
                false
            }
        }
    }

    /// Secure token of the configured length
    pub fn generate_secure_token(&self) -> String {
        self.generate_secure_token_len(self.config.token_length)
    }

    /// Secure token of `length` alphanumeric characters
    pub fn generate_secure_token_len(&self, length: usize) -> String {
        secure_token(&mut **self.random.lock(), length)
    }

    /// Obfuscate `data` under the default key
    pub fn encrypt<T: Serialize + ?Sized>(&self, data: &T) -> Option<String> {
        self.encrypt_with_key(data, &self.config.default_key)
    }

    /// Obfuscate `data` under `key`
    pub fn encrypt_with_key<T: Serialize + ?Sized>(&self, data: &T, key: &str) -> Option<String> {
        encrypt(data, key)
            .map_err(|e| tracing::error!(error = %e, "encryption failed"))
            .ok()
    }

    /// Decode a blob made with the default key
    pub fn decrypt<T: DeserializeOwned>(&self, blob: &str) -> Option<T> {
        self.decrypt_with_key(blob, &self.config.default_key)
    }

    /// Decode a blob made with `key`
    pub fn decrypt_with_key<T: DeserializeOwned>(&self, blob: &str, key: &str) -> Option<T> {
        decrypt(blob, key)
            .map_err(|e| tracing::error!(error = %e, "decryption failed"))
            .ok()
    }

    /// Rolling hash of `text` in base36
    pub fn hash(&self, text: &str) -> String {
        rolling_hash(text)
    }

    /// Obfuscate and persist `data` under `name`
    pub fn store_secure<T: Serialize + ?Sized>(&self, name: &str, data: &T) -> bool {
        match self.secure.store(name, data) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(name, error = %e, "failed to store secure entry");
                false
            }
        }
    }

    /// Read back an entry written by [`store_secure`](Self::store_secure)
    pub fn retrieve_secure<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        match self.secure.retrieve(name) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(name, error = %e, "failed to retrieve secure entry");
                None
            }
        }
    }

    /// Remove one entry
    pub fn clear_secure(&self, name: &str) -> bool {
        self.secure
            .clear(name)
            .map_err(|e| tracing::error!(name, error = %e, "failed to clear secure entry"))
            .is_ok()
    }

    /// Remove every secure entry; returns how many went
    pub fn clear_all_secure(&self) -> usize {
        self.secure.clear_all().unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to clear secure entries");
            0
        })
    }

    /// Names of stored secure entries, sorted
    pub fn list_secure(&self) -> Vec<String> {
        self.secure.names().unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to list secure entries");
            Vec::new()
        })
    }

    pub fn validate_email(&self, text: &str) -> bool {
        validation::validate_email(text)
    }

    pub fn check_password_strength(&self, password: &str) -> PasswordAssessment {
        validation::check_password_strength(password)
    }

    /// Escape text through the hosting document
    pub fn sanitize_html(&self, text: &str) -> String {
        xss::sanitize_html(self.document.as_ref(), text)
    }

    pub fn detect_xss(&self, text: &str) -> bool {
        xss::detect_xss(text)
    }

    pub fn scan_xss(&self, text: &str) -> Vec<XssMatch> {
        xss::scan_xss(text)
    }

    /// Environment snapshot read at call time
    pub fn security_info(&self) -> SecurityInfo {
        SecurityInfo::capture(self.environment.as_ref())
    }

    /// Page-load initialization.
    ///
    /// Generates a session token, logs the environment and injects the
    /// configured CSP unless the document already declares one.
    pub fn init(&self) -> InitReport {
        let session_token = self.generate_session_token();
        let security_info = self.security_info();

        tracing::info!(
            https = security_info.https,
            cookies_enabled = security_info.cookies_enabled,
            user_agent = %security_info.user_agent,
            platform = %security_info.platform,
            language = %security_info.language,
            "BeeRRy Security initialized"
        );

        let csp_injected = self.config.inject_csp && self.inject_csp();

        InitReport {
            session_token,
            security_info,
            csp_injected,
        }
    }

    fn inject_csp(&self) -> bool {
        match self.document.inject_csp_meta(&self.config.csp_policy) {
            Ok(true) => {
                tracing::info!(policy = %self.config.csp_policy, "CSP meta injected");
                true
            }
            Ok(false) => {
                tracing::debug!("CSP meta already present");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to inject CSP meta");
                false
            }
        }
    }

    /// Read a secure entry as untyped JSON
    pub fn retrieve_secure_value(&self, name: &str) -> Option<Value> {
        self.retrieve_secure(name)
    }
}

impl Default for Guard {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Guard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Guard")
            .field("config", &self.config)
            .field("secure", &self.secure)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use serde_json::json;

    use super::*;
    use crate::dom::parse_html;
    use crate::error::Error;
    use crate::security::DEFAULT_CSP_POLICY;
    use crate::storage::JsonFileStorage;
    use crate::token::SeededRandom;

    fn csp_metas(document: &Document) -> usize {
        document
            .outer_html()
            .matches("<meta http-equiv=\"Content-Security-Policy\"")
            .count()
    }

    struct Fixture {
        guard: Guard,
        session: MemoryStorage,
        persistent: MemoryStorage,
        document: Arc<Document>,
    }

    fn fixture() -> Fixture {
        let session = MemoryStorage::new();
        let persistent = MemoryStorage::new();
        let document = Arc::new(Document::blank());
        let guard = Guard::builder()
            .session_store(Arc::new(session.clone()))
            .persistent_store(Arc::new(persistent.clone()))
            .random(SeededRandom::new(7))
            .document(document.clone())
            .environment(Arc::new(
                StaticEnvironment::new().user_agent("test-agent").language("id-ID"),
            ))
            .build()
            .unwrap();
        Fixture {
            guard,
            session,
            persistent,
            document,
        }
    }

    /// Store that refuses everything
    struct Unavailable;

    impl KeyValueStore for Unavailable {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(Error::storage("storage disabled"))
        }
        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(Error::storage("storage disabled"))
        }
        fn remove(&self, _key: &str) -> Result<()> {
            Err(Error::storage("storage disabled"))
        }
        fn keys(&self) -> Result<Vec<String>> {
            Err(Error::storage("storage disabled"))
        }
        fn clear(&self) -> Result<()> {
            Err(Error::storage("storage disabled"))
        }
    }

    #[test]
    fn test_session_token_lifecycle() {
        let f = fixture();
        assert!(!f.guard.validate_session_token("anything"));

        let token = f.guard.generate_session_token().unwrap();
        assert!(!token.is_empty());
        assert!(token.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_eq!(f.session.get("csrf_token").unwrap(), Some(token.clone()));
        assert!(f.guard.validate_session_token(&token));
        assert!(!f.guard.validate_session_token("forged"));

        let next = f.guard.generate_session_token().unwrap();
        assert_ne!(next, token);
        assert!(!f.guard.validate_session_token(&token));
    }

    #[test]
    fn test_secure_tokens_distinct() {
        let guard = Guard::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            let token = guard.generate_secure_token();
            assert_eq!(token.len(), 32);
            assert!(token.chars().all(|c| c.is_ascii_alphanumeric()));
            assert!(seen.insert(token));
        }
        assert_eq!(guard.generate_secure_token_len(8).len(), 8);
        assert!(guard.generate_secure_token_len(0).is_empty());
    }

    #[test]
    fn test_encrypt_default_key() {
        let f = fixture();
        let blob = f.guard.encrypt(&json!({"theme": "dark"})).unwrap();

        assert_eq!(f.guard.decrypt::<Value>(&blob), Some(json!({"theme": "dark"})));
        assert_eq!(
            crate::obfuscation::decrypt::<Value>(&blob, "default").unwrap(),
            json!({"theme": "dark"})
        );
    }

    #[test]
    fn test_encrypt_fails_closed() {
        let f = fixture();
        assert_eq!(f.guard.encrypt(&"🐝"), None);
        assert_eq!(f.guard.decrypt::<Value>("%%%"), None);
    }

    #[test]
    fn test_hash_matches_core() {
        let f = fixture();
        assert_eq!(f.guard.hash(""), "0");
        assert_eq!(f.guard.hash("default"), rolling_hash("default"));
    }

    #[test]
    fn test_storage_round_trip() {
        let f = fixture();
        assert!(f.guard.store_secure("x", &json!({"a": 1})));
        assert_eq!(f.guard.retrieve_secure_value("x"), Some(json!({"a": 1})));
        assert!(f.persistent.get("secure_x").unwrap().is_some());

        assert!(f.guard.clear_secure("x"));
        assert_eq!(f.guard.retrieve_secure_value("x"), None);
    }

    #[test]
    fn test_clear_all_scoped_to_prefix() {
        let f = fixture();
        assert!(f.guard.store_secure("a", &1));
        assert!(f.guard.store_secure("b", &"two"));
        f.persistent.set("other", "keep me").unwrap();

        assert_eq!(f.guard.list_secure(), vec!["a", "b"]);
        assert_eq!(f.guard.clear_all_secure(), 2);
        assert_eq!(f.persistent.snapshot().into_keys().collect::<Vec<_>>(), vec!["other"]);
        assert!(f.guard.list_secure().is_empty());
    }

    #[test]
    fn test_store_secure_failures() {
        let f = fixture();
        // non Latin-1 text cannot be encoded
        assert!(!f.guard.store_secure("bio", &"héllo 🐝"));
        assert!(f.persistent.is_empty().unwrap());

        let broken = Guard::builder()
            .persistent_store(Arc::new(Unavailable))
            .session_store(Arc::new(Unavailable))
            .build()
            .unwrap();
        assert!(!broken.store_secure("x", &1));
        assert_eq!(broken.retrieve_secure_value("x"), None);
        assert!(!broken.clear_secure("x"));
        assert_eq!(broken.clear_all_secure(), 0);
        assert!(broken.list_secure().is_empty());
        assert_eq!(broken.generate_session_token(), None);
        assert!(!broken.validate_session_token(""));
    }

    #[test]
    fn test_failed_file_write_not_visible() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStorage::open(dir.path().join("missing/store.json")).unwrap();
        let guard = Guard::builder()
            .persistent_store(Arc::new(store))
            .build()
            .unwrap();

        assert!(!guard.store_secure("x", &json!({"a": 1})));
        assert_eq!(guard.retrieve_secure_value("x"), None);
        assert!(guard.list_secure().is_empty());
    }

    #[test]
    fn test_quota_exceeded() {
        let guard = Guard::builder()
            .persistent_store(Arc::new(MemoryStorage::with_quota(16)))
            .build()
            .unwrap();
        assert!(!guard.store_secure("profile", &json!({"bio": "a fairly long biography"})));
    }

    #[test]
    fn test_retrieve_wrong_payload() {
        let f = fixture();
        f.persistent.set("secure_junk", "not a blob").unwrap();
        assert_eq!(f.guard.retrieve_secure_value("junk"), None);

        f.persistent.set("secure_empty", "").unwrap();
        assert_eq!(f.guard.retrieve_secure_value("empty"), None);
    }

    #[test]
    fn test_heuristics() {
        let f = fixture();
        assert!(f.guard.validate_email("bee@example.com"));
        assert!(!f.guard.validate_email("bee@example"));

        assert_eq!(f.guard.check_password_strength("").score, 0);
        assert_eq!(f.guard.check_password_strength("").feedback.len(), 6);
        let p = f.guard.check_password_strength("Abcdef12!@#");
        assert_eq!((p.score, p.feedback.len()), (5, 1));
        let p = f.guard.check_password_strength("Abcdef12!@#$");
        assert_eq!((p.score, p.feedback.len()), (6, 0));

        assert!(f.guard.detect_xss("<script>alert(1)</script>"));
        assert!(!f.guard.detect_xss("hello world"));
        assert_eq!(f.guard.scan_xss("<embed src=x>").len(), 1);

        assert_eq!(f.guard.sanitize_html("<p>&</p>"), "&lt;p&gt;&amp;&lt;/p&gt;");
    }

    #[test]
    fn test_security_info() {
        let f = fixture();
        let info = f.guard.security_info();
        assert!(info.https);
        assert_eq!(info.user_agent, "test-agent");
        assert_eq!(info.language, "id-ID");
    }

    #[test]
    fn test_init_injects_csp_once() {
        let f = fixture();

        let first = f.guard.init();
        assert!(first.csp_injected);
        assert!(first.session_token.is_some());
        assert!(f.guard.validate_session_token(first.session_token.as_deref().unwrap()));

        let second = f.guard.init();
        assert!(!second.csp_injected);
        assert_ne!(second.session_token, first.session_token);

        assert_eq!(csp_metas(&f.document), 1);
        assert!(f
            .document
            .outer_html()
            .contains(&format!("content=\"{}\"", DEFAULT_CSP_POLICY)));
    }

    #[test]
    fn test_concurrent_init_injects_once() {
        for _ in 0..20 {
            let document = Arc::new(Document::blank());
            let guard = Guard::builder().document(document.clone()).build().unwrap();

            let guard = &guard;
            let injected = std::thread::scope(|s| {
                let handles: Vec<_> = (0..8).map(|_| s.spawn(move || guard.init())).collect();
                handles
                    .into_iter()
                    .map(|h| h.join().unwrap())
                    .filter(|report| report.csp_injected)
                    .count()
            });

            assert_eq!(injected, 1);
            assert_eq!(csp_metas(&document), 1);
        }
    }

    #[test]
    fn test_init_respects_existing_csp() {
        let doc = parse_html(
            "<html><head><meta http-equiv=\"Content-Security-Policy\" content=\"default-src 'none'\"></head><body></body></html>",
        )
        .unwrap();
        let doc = Arc::new(doc);
        let guard = Guard::builder().document(doc.clone()).build().unwrap();

        assert!(!guard.init().csp_injected);
        assert_eq!(csp_metas(&doc), 1);
        assert!(doc.outer_html().contains("content=\"default-src 'none'\""));
    }

    #[test]
    fn test_init_without_head() {
        let doc = Arc::new(Document::new());
        let guard = Guard::builder().document(doc.clone()).build().unwrap();
        let report = guard.init();
        assert!(!report.csp_injected);
        assert!(report.session_token.is_some());
        assert_eq!(csp_metas(&doc), 0);
    }

    #[test]
    fn test_init_injection_disabled() {
        let doc = Arc::new(Document::blank());
        let guard = Guard::builder()
            .config(GuardConfig::new().inject_csp(false))
            .document(doc.clone())
            .build()
            .unwrap();
        assert!(!guard.init().csp_injected);
        assert_eq!(csp_metas(&doc), 0);
    }

    #[test]
    fn test_custom_prefix() {
        let persistent = MemoryStorage::new();
        let guard = Guard::builder()
            .config(GuardConfig::new().secure_prefix("vault_"))
            .persistent_store(Arc::new(persistent.clone()))
            .build()
            .unwrap();

        assert!(guard.store_secure("pin", &1234));
        assert!(persistent.get("vault_pin").unwrap().is_some());
        assert_eq!(guard.retrieve_secure::<u32>("pin"), Some(1234));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = Guard::builder()
            .config(GuardConfig::new().secure_prefix(""))
            .build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_init_report_serializes() {
        let f = fixture();
        let json = serde_json::to_value(f.guard.init()).unwrap();
        assert_eq!(json["csp_injected"], true);
        assert_eq!(json["security_info"]["https"], true);
    }

    proptest! {
        #[test]
        fn prop_round_trip(text in "[\\x00-\\xff]{0,40}", n in any::<i64>(), key in any::<String>()) {
            let guard = Guard::new();
            let data = json!({"text": text, "n": n, "list": [n, null, true]});

            let blob = guard.encrypt_with_key(&data, &key).unwrap();
            prop_assert_eq!(guard.decrypt_with_key::<Value>(&blob, &key), Some(data));
        }

        #[test]
        fn prop_wrong_key_never_panics(text in "[a-z ]{0,20}", key in "[a-z]{1,8}", other in "[A-Z]{1,8}") {
            let guard = Guard::new();
            let blob = guard.encrypt_with_key(&text, &key).unwrap();
            // either a decode failure or some other value
            let _ = guard.decrypt_with_key::<Value>(&blob, &other);
        }
    }
}
