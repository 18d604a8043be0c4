//! # bridge-transport
//!
//! The request layer of the paybridge checkout client.
//!
//! A `Dispatcher` issues one logical request over whichever of two mutually
//! incompatible transports the configuration selected:
//!
//! 1. **CORS** - a direct cross-origin request; responses are plain JSON
//! 2. **JSONP** - a script-tag style GET carrying a generated callback
//!    name; responses are a script invoking that callback
//!
//! The mode is fixed when the dispatcher is constructed and both paths are
//! normalized into the same request contract: a future resolving exactly
//! once with a parsed body or a `BridgeError`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bridge_core::{CheckoutConfig, Payload};
//! use bridge_transport::{Dispatcher, Method};
//!
//! let config = CheckoutConfig::new("https://api.example.com", "https://hosted.example.com")
//!     .with_cors(true);
//! let dispatcher = Dispatcher::new(&config)?;
//!
//! let body = dispatcher
//!     .request(Method::Post, "/token", &Payload::new().with("currencyCode", "EUR"))
//!     .await?;
//! ```

pub mod dispatcher;
mod jsonp;

// Re-exports
pub use dispatcher::{Dispatcher, Method, TransportMode};
