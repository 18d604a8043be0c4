//! # Fraud Data Collector
//!
//! One-shot fetch-and-inject of the kount collector fragment. The
//! collector runs when configuration is applied; it fetches a small
//! HTML/script fragment from the collector endpoint and appends it to the
//! checkout form.
//!
//! The attempt state lives on the collector instance, which is owned by
//! the client built around one configuration object. Re-applying
//! configuration never re-runs the fetch; only constructing a fresh
//! client arms the collector again. Unlike transport and frame failures,
//! collector failures surface directly to the caller applying the
//! configuration.

use crate::params::{FraudParam, FraudProcessor};
use bridge_core::{BridgeError, BridgeResult, FraudConfig, HostDocument, Payload};
use bridge_transport::{Dispatcher, Method};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Path of the collector fragment endpoint
pub const COLLECTOR_PATH: &str = "/fraud_data_collector";

/// Fetches and injects the collector fragment at most once
pub struct DataCollector {
    dispatcher: Arc<Dispatcher>,
    config: FraudConfig,
    attempted: AtomicBool,
}

impl DataCollector {
    pub fn new(dispatcher: Arc<Dispatcher>, config: FraudConfig) -> Self {
        Self {
            dispatcher,
            config,
            attempted: AtomicBool::new(false),
        }
    }

    /// Whether the one-shot attempt has been consumed
    pub fn has_attempted(&self) -> bool {
        self.attempted.load(Ordering::SeqCst)
    }

    /// Fetch the collector fragment and inject it into the checkout form.
    ///
    /// No-op when the feature is disabled, and a no-op on every call after
    /// the first attempt, whatever that attempt's outcome was.
    #[instrument(skip(self, document))]
    pub async fn run(&self, document: &dyn HostDocument) -> BridgeResult<()> {
        if !self.config.data_collector {
            debug!("fraud data collector disabled");
            return Ok(());
        }

        if self.attempted.swap(true, Ordering::SeqCst) {
            debug!("fraud data collector already attempted");
            return Ok(());
        }

        let response = self
            .dispatcher
            .request(Method::Get, COLLECTOR_PATH, &Payload::new())
            .await
            .map_err(|e| BridgeError::FraudCollectorRequestFailed {
                message: e.to_string(),
            })?;

        let fragment = response
            .get("content")
            .and_then(|v| v.as_str())
            .ok_or_else(|| BridgeError::FraudCollectorRequestFailed {
                message: "collector response carried no content".to_string(),
            })?;

        let form = document
            .checkout_form()
            .ok_or(BridgeError::FraudCollectorMissingForm)?;

        form.append_fragment(fragment);
        info!("fraud data collector fields injected");
        Ok(())
    }

    /// Build the fraud params for a tokenization request.
    ///
    /// Read-only; never touches the attempt state. Entry order is fixed:
    /// kount first, then litle_threat_metrix. The kount entry uses the
    /// caller-supplied `fraud_session_id`; the litle entry uses the
    /// configured vendor session id.
    pub fn params(&self, extra: &Payload) -> Vec<FraudParam> {
        let mut params = Vec::new();

        if self.config.data_collector {
            if let Some(session_id) = extra.get_str("fraud_session_id") {
                params.push(FraudParam::new(FraudProcessor::Kount, session_id));
            }
        }

        if let Some(session_id) = &self.config.litle_session_id {
            params.push(FraudParam::new(
                FraudProcessor::LitleThreatMetrix,
                session_id.clone(),
            ));
        }

        params
    }
}
