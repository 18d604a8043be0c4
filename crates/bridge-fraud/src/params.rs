//! # Fraud Params
//!
//! Vendor session identifier pairs appended to a tokenization request so
//! the backend can run fraud scoring. Processor names and entry ordering
//! are part of the wire contract with the backend.

use serde::{Deserialize, Serialize};

/// Supported fraud vendors, in wire order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudProcessor {
    Kount,
    LitleThreatMetrix,
}

impl FraudProcessor {
    /// Returns the wire name of the vendor
    pub fn as_str(&self) -> &'static str {
        match self {
            FraudProcessor::Kount => "kount",
            FraudProcessor::LitleThreatMetrix => "litle_threat_metrix",
        }
    }
}

impl std::fmt::Display for FraudProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One vendor/session pair sent with a tokenization request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraudParam {
    pub processor: FraudProcessor,
    pub session_id: String,
}

impl FraudParam {
    pub fn new(processor: FraudProcessor, session_id: impl Into<String>) -> Self {
        Self {
            processor,
            session_id: session_id.into(),
        }
    }
}
