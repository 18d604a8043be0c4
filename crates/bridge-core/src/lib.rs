//! # bridge-core
//!
//! Core types and traits for the paybridge checkout client.
//!
//! This crate provides:
//! - `BridgeError` for typed error handling across the bridge
//! - `CheckoutConfig` and its fraud/frame sub-configs
//! - `Payload` flat parameter maps shared by both transports
//! - The host-page seams: `HostDocument`/`FormAnchor` for DOM access and
//!   `FrameHost`/`FrameHandle` for embedded tokenization frames
//!
//! ## Example
//!
//! ```rust,ignore
//! use bridge_core::{CheckoutConfig, FraudConfig, Payload};
//!
//! let config = CheckoutConfig::new("https://api.example.com", "https://hosted.example.com")
//!     .with_cors(true)
//!     .with_fraud(FraudConfig::default().with_data_collector(true));
//!
//! let payload = Payload::new()
//!     .with("currencyCode", "EUR")
//!     .with("countryCode", "NL");
//! ```

pub mod config;
pub mod error;
pub mod host;
pub mod payload;

// Re-exports for convenience
pub use config::{CheckoutConfig, FrameConfig, FraudConfig, DEFAULT_FRAME_TIMEOUT};
pub use error::{BridgeError, BridgeResult};
pub use host::{
    FormAnchor, FrameHandle, FrameHost, FrameMessage, FrameMessageBody, FrameRequest,
    HostDocument,
};
pub use payload::{ParamValue, Payload};
