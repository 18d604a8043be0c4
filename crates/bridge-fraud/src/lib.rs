//! # bridge-fraud
//!
//! Fraud scoring support for the paybridge checkout client.
//!
//! Two pieces:
//!
//! 1. **DataCollector** - a one-shot fetch of the kount collector fragment,
//!    injected into the checkout form when configuration is applied. The
//!    attempt state is owned by the configuration's client instance, so
//!    independent clients in one process never interfere.
//! 2. **Fraud params** - the ordered `{processor, session_id}` pairs
//!    appended to tokenization requests for the configured vendors.

pub mod collector;
pub mod params;

// Re-exports
pub use collector::{DataCollector, COLLECTOR_PATH};
pub use params::{FraudParam, FraudProcessor};
