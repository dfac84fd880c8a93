//! Checkout Configuration
//!
//! Defaults match the upload page served next to the WASM bundle. The page
//! can override the endpoint and publishable key through `data-*` attributes
//! on the form, so nothing has to be rebuilt per deployment.

use std::fmt;

use reqwest::Url;

use crate::error::{CheckoutError, Result};

/// Id of the upload form element
pub const DEFAULT_FORM_ID: &str = "upload-form";

/// Path the form data is posted to
pub const DEFAULT_ENDPOINT: &str = "/create-checkout-session";

/// Form attribute overriding the endpoint
pub const ENDPOINT_ATTRIBUTE: &str = "data-checkout-endpoint";

/// Form attribute overriding the publishable key
pub const PUBLISHABLE_KEY_ATTRIBUTE: &str = "data-publishable-key";

// Replace with your Stripe test publishable key, or set STRIPE_PUBLISHABLE_KEY at build time.
const FALLBACK_PUBLISHABLE_KEY: &str = "pk_test_51R7cMOQCSwJNKq1cKk2n7c5v4lQ6J0Z6r8n3y5n8w5v6p4x3j2l1k0h9g8f7e6d5c4b3a2s1d0f9g8h7j6k5l4m3n2b1v0";

/// Stripe mode a publishable key belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyMode {
    Test,
    Live,
}

/// Stripe publishable key (`pk_test_...` / `pk_live_...`)
///
/// Publishable keys are meant for the browser, but the formatting impls
/// still only print the prefix so secret keys pasted by mistake never end
/// up in a console log.
#[derive(Clone, PartialEq, Eq)]
pub struct PublishableKey(String);

impl PublishableKey {
    /// Parse and validate a key
    pub fn parse(key: &str) -> Result<Self> {
        let key = key.trim();
        if key.starts_with("sk_") || key.starts_with("rk_") {
            return Err(CheckoutError::Config(
                "secret key supplied where a publishable key is expected".into(),
            ));
        }
        let body = key
            .strip_prefix("pk_test_")
            .or_else(|| key.strip_prefix("pk_live_"))
            .ok_or_else(|| {
                CheckoutError::Config("publishable key must start with pk_test_ or pk_live_".into())
            })?;
        if body.is_empty() {
            return Err(CheckoutError::Config("publishable key is empty".into()));
        }
        Ok(Self(key.to_string()))
    }

    pub fn mode(&self) -> KeyMode {
        if self.0.starts_with("pk_live_") {
            KeyMode::Live
        } else {
            KeyMode::Test
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PublishableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.mode() {
            KeyMode::Test => "pk_test_",
            KeyMode::Live => "pk_live_",
        };
        write!(f, "{prefix}***")
    }
}

impl fmt::Debug for PublishableKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublishableKey({self})")
    }
}

impl Default for PublishableKey {
    fn default() -> Self {
        let key = option_env!("STRIPE_PUBLISHABLE_KEY").unwrap_or(FALLBACK_PUBLISHABLE_KEY);
        Self::parse(key).unwrap_or_else(|_| Self(FALLBACK_PUBLISHABLE_KEY.to_string()))
    }
}

/// Checkout trigger configuration
#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    /// Id of the form element to intercept
    pub form_id: String,

    /// Endpoint path (or absolute URL) that creates the session
    pub endpoint: String,

    /// Publishable key for the payment provider
    pub publishable_key: PublishableKey,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            form_id: DEFAULT_FORM_ID.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            publishable_key: PublishableKey::default(),
        }
    }
}

impl CheckoutConfig {
    /// Apply overrides read from the page. Blank values are ignored.
    ///
    /// A malformed key is logged and the current key kept; it never keeps the
    /// form from being intercepted.
    pub fn with_overrides(
        mut self,
        endpoint: Option<String>,
        publishable_key: Option<String>,
    ) -> Self {
        if let Some(endpoint) = endpoint.filter(|e| !e.trim().is_empty()) {
            self.endpoint = endpoint.trim().to_string();
        }
        if let Some(key) = publishable_key.filter(|k| !k.trim().is_empty()) {
            match PublishableKey::parse(&key) {
                Ok(key) => self.publishable_key = key,
                Err(e) => tracing::warn!(
                    error = %e,
                    fallback = %self.publishable_key,
                    "Ignoring publishable key override"
                ),
            }
        }
        self
    }

    /// Resolve the endpoint against the URL of the current page
    pub fn endpoint_url(&self, page_url: &str) -> Result<Url> {
        let base = Url::parse(page_url)
            .map_err(|e| CheckoutError::Config(format!("invalid page URL {page_url:?}: {e}")))?;
        base.join(&self.endpoint).map_err(|e| {
            CheckoutError::Config(format!("invalid endpoint {:?}: {e}", self.endpoint))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckoutConfig::default();
        assert_eq!(config.form_id, "upload-form");
        assert_eq!(config.endpoint, "/create-checkout-session");
        assert!(config.publishable_key.as_str().starts_with("pk_"));
    }

    #[test]
    fn test_secret_key_rejected() {
        let err = PublishableKey::parse("sk_test_abc").unwrap_err();
        assert!(matches!(err, CheckoutError::Config(_)));
        assert!(PublishableKey::parse("rk_live_abc").is_err());
        assert!(PublishableKey::parse("pk_test_").is_err());
        assert!(PublishableKey::parse("hello").is_err());
    }

    #[test]
    fn test_key_mode_and_redaction() {
        let key = PublishableKey::parse("pk_live_abc123").unwrap();
        assert_eq!(key.mode(), KeyMode::Live);
        assert_eq!(key.to_string(), "pk_live_***");
        assert!(!format!("{key:?}").contains("abc123"));
    }

    #[test]
    fn test_overrides() {
        let config = CheckoutConfig::default()
            .with_overrides(Some("/api/checkout".into()), Some(" pk_test_xyz ".into()));
        assert_eq!(config.endpoint, "/api/checkout");
        assert_eq!(config.publishable_key.as_str(), "pk_test_xyz");

        let config = CheckoutConfig::default().with_overrides(Some("  ".into()), None);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn test_bad_key_override_keeps_default() {
        let default_key = PublishableKey::default();
        let config = CheckoutConfig::default()
            .with_overrides(Some("/api/checkout".into()), Some("pk_mistyped".into()));
        assert_eq!(config.publishable_key, default_key);
        assert_eq!(config.endpoint, "/api/checkout");

        let config = CheckoutConfig::default().with_overrides(None, Some("sk_live_oops".into()));
        assert_eq!(config.publishable_key, default_key);
    }

    #[test]
    fn test_endpoint_url_resolves_against_page() {
        let config = CheckoutConfig::default();
        let url = config
            .endpoint_url("https://reports.example/upload?step=1")
            .unwrap();
        assert_eq!(url.as_str(), "https://reports.example/create-checkout-session");

        assert!(config.endpoint_url("not a url").is_err());
    }
}
