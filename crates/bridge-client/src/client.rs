//! # Checkout Client
//!
//! The composition layer of the bridge. A `CheckoutClient` is built around
//! one configuration object and owns the pieces assembled from it: the
//! transport dispatcher, the frame channel, and the fraud data collector
//! with its one-shot state.

use bridge_core::{BridgeResult, CheckoutConfig, FrameHost, HostDocument, Payload};
use bridge_frame::{FrameChannel, FramePayload, FrameSession};
use bridge_fraud::{DataCollector, FraudParam};
use bridge_transport::{Dispatcher, Method, TransportMode};
use std::sync::Arc;
use tracing::info;

/// Client-side checkout bridge bound to one configuration
pub struct CheckoutClient {
    config: CheckoutConfig,
    dispatcher: Arc<Dispatcher>,
    frames: FrameChannel,
    collector: DataCollector,
}

impl CheckoutClient {
    /// Build a client from a configuration and the host page's frame
    /// capability.
    ///
    /// Transport selection happens here, once; so does arming the fraud
    /// collector. Constructing a new client is the only way to reset the
    /// collector's one-shot state.
    pub fn new(config: CheckoutConfig, frame_host: Arc<dyn FrameHost>) -> anyhow::Result<Self> {
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("invalid checkout configuration: {}", e))?;

        let dispatcher = Arc::new(Dispatcher::new(&config)?);
        let frames = FrameChannel::new(frame_host, &config);
        let collector = DataCollector::new(dispatcher.clone(), config.fraud.clone());

        info!(mode = ?dispatcher.mode(), "checkout client ready");

        Ok(Self {
            config,
            dispatcher,
            frames,
            collector,
        })
    }

    /// Apply (or re-apply) configuration side effects against the page.
    ///
    /// Triggers the fraud data collector; its failure is returned to this
    /// caller directly rather than through an async event channel. Calling
    /// this repeatedly never re-runs the collector fetch.
    pub async fn configure(&self, document: &dyn HostDocument) -> BridgeResult<()> {
        self.collector.run(document).await
    }

    /// Issue one request over the configured transport
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        payload: &Payload,
    ) -> BridgeResult<serde_json::Value> {
        self.dispatcher.request(method, path, payload).await
    }

    /// Start a hosted tokenization flow in an embedded frame
    pub fn tokenize(&self, target_path: &str, payload: FramePayload) -> FrameSession {
        self.frames.start(target_path, payload)
    }

    /// Fraud params for the configured vendors, in wire order
    pub fn fraud_params(&self, extra: &Payload) -> Vec<FraudParam> {
        self.collector.params(extra)
    }

    /// The transport this client was locked to at construction
    pub fn transport_mode(&self) -> TransportMode {
        self.dispatcher.mode()
    }

    /// The configuration this client was built from
    pub fn config(&self) -> &CheckoutConfig {
        &self.config
    }

    /// Library version
    pub fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }
}
