//! # bridge-client
//!
//! The paybridge checkout client facade.
//!
//! Moves sensitive payment data from a merchant's host page to a payment
//! processor without that data ever touching the merchant's backend. One
//! `CheckoutClient` is built per configuration object and composes:
//!
//! - the transport dispatcher (CORS or JSONP, fixed at construction),
//! - the embedded-frame tokenization channel,
//! - the one-shot fraud data collector and fraud params.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bridge_client::{CheckoutClient, CheckoutConfig, FramePayload, FraudConfig};
//!
//! let config = CheckoutConfig::new("https://api.example.com", "https://hosted.example.com")
//!     .with_cors(true)
//!     .with_fraud(FraudConfig::default().with_data_collector(true));
//!
//! let client = CheckoutClient::new(config, frame_host)?;
//! client.configure(&document).await?;
//!
//! let session = client.tokenize(
//!     "/hosted/start",
//!     FramePayload::new()
//!         .with_subscription_uuid("sub_123")
//!         .with_currency_code("EUR"),
//! );
//! let outcome = session.outcome().await;
//! ```

pub mod client;

// Re-exports: the whole bridge surface through one crate
pub use bridge_core::{
    BridgeError, BridgeResult, CheckoutConfig, FormAnchor, FrameConfig, FrameHandle, FrameHost,
    FrameMessage, FrameMessageBody, FrameRequest, FraudConfig, HostDocument, ParamValue, Payload,
};
pub use bridge_frame::{FrameChannel, FrameOutcome, FramePayload, FrameSession};
pub use bridge_fraud::{DataCollector, FraudParam, FraudProcessor};
pub use bridge_transport::{Dispatcher, Method, TransportMode};

pub use client::CheckoutClient;
