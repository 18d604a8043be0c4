//! # Bridge Error Types
//!
//! Typed error handling for the paybridge checkout client.
//! All bridge operations return `Result<T, BridgeError>`.

use thiserror::Error;

/// Core error type for all checkout-bridge operations
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Configuration errors (bad origin, missing settings)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The API answered with a non-success status
    #[error("Request failed [{status}]: {message}")]
    RequestFailed { status: u16, message: String },

    /// Network failure before a response was received
    #[error("Network error: {0}")]
    Network(String),

    /// Response body could not be interpreted
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The configured request timeout elapsed
    #[error("Request timed out")]
    Timeout,

    /// The frame content reported a tokenization failure
    #[error("Tokenization failed: {cause}")]
    TokenizeFailed { cause: String },

    /// The frame was closed or navigated away before a result arrived
    #[error("Frame closed before delivering a result")]
    FrameClosed,

    /// No terminal message arrived within the frame timeout
    #[error("Timed out waiting for the frame to deliver a result")]
    FrameTimeout,

    /// Fetching the fraud collector fragment failed
    #[error("Fraud data collector request failed: {message}")]
    FraudCollectorRequestFailed { message: String },

    /// No checkout form was found to inject the collector fragment into
    #[error("Fraud data collector found no checkout form to inject into")]
    FraudCollectorMissingForm,
}

impl BridgeError {
    /// Stable machine-readable code for this error.
    ///
    /// These names are part of the contract with host-page code and must
    /// not change between releases.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::Configuration(_) => "configuration-error",
            BridgeError::RequestFailed { .. } => "request-failed",
            BridgeError::Network(_) => "request-network",
            BridgeError::MalformedResponse(_) => "request-malformed",
            BridgeError::Timeout => "request-timeout",
            BridgeError::TokenizeFailed { .. } => "tokenize-error",
            BridgeError::FrameClosed => "frame-closed",
            BridgeError::FrameTimeout => "frame-timeout",
            BridgeError::FraudCollectorRequestFailed { .. } => {
                "fraud-data-collector-request-failed"
            }
            BridgeError::FraudCollectorMissingForm => "fraud-data-collector-missing-form",
        }
    }

    /// Returns true for transport-level failures (both request paths)
    pub fn is_request_error(&self) -> bool {
        matches!(
            self,
            BridgeError::RequestFailed { .. }
                | BridgeError::Network(_)
                | BridgeError::MalformedResponse(_)
                | BridgeError::Timeout
        )
    }

    /// Returns true for failures of the embedded-frame flow
    pub fn is_frame_error(&self) -> bool {
        matches!(
            self,
            BridgeError::TokenizeFailed { .. }
                | BridgeError::FrameClosed
                | BridgeError::FrameTimeout
        )
    }
}

/// Result type alias for bridge operations
pub type BridgeResult<T> = Result<T, BridgeError>;
