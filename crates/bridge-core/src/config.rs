//! # Checkout Configuration
//!
//! Configuration for the checkout bridge. Merchants construct a
//! `CheckoutConfig` programmatically or load one from environment variables.
//!
//! A configuration object owns the one-shot state of the fraud data
//! collector: constructing a new config (and the client around it) is the
//! only way to arm the collector again.

use crate::error::{BridgeError, BridgeResult};
use std::env;
use std::time::Duration;

/// Default time to wait for the embedded frame to deliver a result
pub const DEFAULT_FRAME_TIMEOUT: Duration = Duration::from_secs(300);

/// Fraud vendor settings
#[derive(Debug, Clone, Default)]
pub struct FraudConfig {
    /// Enables the kount data collector fetch/inject step
    pub data_collector: bool,

    /// Vantiv/Litle ThreatMetrix session id, when that vendor is in use
    pub litle_session_id: Option<String>,
}

impl FraudConfig {
    /// Builder: enable the data collector
    pub fn with_data_collector(mut self, enabled: bool) -> Self {
        self.data_collector = enabled;
        self
    }

    /// Builder: set the Litle ThreatMetrix session id
    pub fn with_litle_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.litle_session_id = Some(session_id.into());
        self
    }
}

/// Geometry and patience settings for embedded frames
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Frame width in CSS pixels
    pub width: u32,

    /// Frame height in CSS pixels
    pub height: u32,

    /// How long to wait for a terminal message before giving up
    pub timeout: Duration,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            width: 450,
            height: 600,
            timeout: DEFAULT_FRAME_TIMEOUT,
        }
    }
}

impl FrameConfig {
    /// Builder: set frame geometry
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Builder: set the frame timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Checkout bridge configuration
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Base URL of the tokenization API (e.g. "https://api.example.com")
    pub api_base: String,

    /// Origin the embedded frame's messages must come from
    /// (scheme and host only, e.g. "https://hosted.example.com")
    pub processor_origin: String,

    /// Whether the environment supports cross-origin requests with
    /// credentials. When false the dispatcher falls back to JSONP.
    pub cors: bool,

    /// Per-request timeout for the dispatcher, when configured
    pub request_timeout: Option<Duration>,

    /// Fraud vendor settings
    pub fraud: FraudConfig,

    /// Embedded frame settings
    pub frame: FrameConfig,
}

impl CheckoutConfig {
    /// Create a config with explicit endpoints
    pub fn new(api_base: impl Into<String>, processor_origin: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            processor_origin: processor_origin.into(),
            cors: false,
            request_timeout: None,
            fraud: FraudConfig::default(),
            frame: FrameConfig::default(),
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `PAYBRIDGE_API_BASE`
    /// - `PAYBRIDGE_PROCESSOR_ORIGIN`
    ///
    /// Optional:
    /// - `PAYBRIDGE_CORS` ("true"/"1" enables the CORS transport)
    /// - `PAYBRIDGE_REQUEST_TIMEOUT_SECS`
    pub fn from_env() -> BridgeResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base = env::var("PAYBRIDGE_API_BASE")
            .map_err(|_| BridgeError::Configuration("PAYBRIDGE_API_BASE not set".to_string()))?;

        let processor_origin = env::var("PAYBRIDGE_PROCESSOR_ORIGIN").map_err(|_| {
            BridgeError::Configuration("PAYBRIDGE_PROCESSOR_ORIGIN not set".to_string())
        })?;

        let cors = env::var("PAYBRIDGE_CORS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        let request_timeout = env::var("PAYBRIDGE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs);

        let config = Self {
            cors,
            request_timeout,
            ..Self::new(api_base, processor_origin)
        };
        config.validate()?;
        Ok(config)
    }

    /// Builder: enable or disable the CORS transport
    pub fn with_cors(mut self, cors: bool) -> Self {
        self.cors = cors;
        self
    }

    /// Builder: set the per-request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Builder: set fraud vendor settings
    pub fn with_fraud(mut self, fraud: FraudConfig) -> Self {
        self.fraud = fraud;
        self
    }

    /// Builder: set embedded frame settings
    pub fn with_frame(mut self, frame: FrameConfig) -> Self {
        self.frame = frame;
        self
    }

    /// Validate endpoint formats.
    ///
    /// The processor origin is compared byte-for-byte against message
    /// origins, so it must be scheme and host only, with no trailing slash
    /// and no path.
    pub fn validate(&self) -> BridgeResult<()> {
        if !is_http_url(&self.api_base) {
            return Err(BridgeError::Configuration(
                "api_base must be an http(s) URL".to_string(),
            ));
        }

        if !is_http_url(&self.processor_origin) {
            return Err(BridgeError::Configuration(
                "processor_origin must be an http(s) URL".to_string(),
            ));
        }

        let after_scheme = self
            .processor_origin
            .splitn(2, "://")
            .nth(1)
            .unwrap_or_default();
        if after_scheme.is_empty() || after_scheme.contains('/') {
            return Err(BridgeError::Configuration(
                "processor_origin must be scheme and host only, with no path".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckoutConfig::new("https://api.test", "https://hosted.test");
        assert!(!config.cors);
        assert!(config.request_timeout.is_none());
        assert!(!config.fraud.data_collector);
        assert_eq!(config.frame.width, 450);
        assert_eq!(config.frame.height, 600);
        assert_eq!(config.frame.timeout, DEFAULT_FRAME_TIMEOUT);
    }

    #[test]
    fn test_validate_accepts_origin() {
        let config = CheckoutConfig::new("https://api.test", "https://hosted.test:8443");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_path_in_origin() {
        let config = CheckoutConfig::new("https://api.test", "https://hosted.test/checkout");
        assert!(config.validate().is_err());

        let config = CheckoutConfig::new("https://api.test", "https://hosted.test/");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http() {
        let config = CheckoutConfig::new("ftp://api.test", "https://hosted.test");
        assert!(config.validate().is_err());

        let config = CheckoutConfig::new("https://api.test", "hosted.test");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_env_missing_base() {
        env::remove_var("PAYBRIDGE_API_BASE");

        let result = CheckoutConfig::from_env();
        assert!(result.is_err());
    }

    #[test]
    fn test_builders() {
        let config = CheckoutConfig::new("https://api.test", "https://hosted.test")
            .with_cors(true)
            .with_request_timeout(Duration::from_secs(10))
            .with_fraud(
                FraudConfig::default()
                    .with_data_collector(true)
                    .with_litle_session_id("98as6d09df907asd"),
            )
            .with_frame(FrameConfig::default().with_size(600, 800));

        assert!(config.cors);
        assert_eq!(config.request_timeout, Some(Duration::from_secs(10)));
        assert!(config.fraud.data_collector);
        assert_eq!(
            config.fraud.litle_session_id.as_deref(),
            Some("98as6d09df907asd")
        );
        assert_eq!(config.frame.height, 800);
    }
}
