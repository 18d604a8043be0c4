//! # bridge-frame
//!
//! The embedded-frame tokenization channel of the paybridge checkout
//! client.
//!
//! A `FrameChannel` launches a processor-hosted page inside an embedded
//! cross-origin frame and resolves the flow's outcome exactly once:
//!
//! - a terminal `done` message carrying an opaque token,
//! - a terminal `error` message carrying a cause,
//! - a `frame-closed` or `frame-timeout` failure when the page goes away
//!   or stays silent,
//! - or `Cancelled`, which suppresses delivery entirely.
//!
//! Messages are only accepted from the configured processor origin, and
//! the frame is torn down on every exit path.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bridge_frame::{FrameChannel, FrameOutcome, FramePayload};
//!
//! let channel = FrameChannel::new(frame_host, &config);
//! let session = channel.start(
//!     "/hosted/start",
//!     FramePayload::new()
//!         .with_subscription_uuid("sub_123")
//!         .with_currency_code("EUR"),
//! );
//!
//! match session.outcome().await {
//!     FrameOutcome::Token(token) => submit(token),
//!     FrameOutcome::Failed(e) => report(e),
//!     FrameOutcome::Cancelled => {}
//! }
//! ```

pub mod channel;
pub mod payload;

// Re-exports
pub use channel::{FrameChannel, FrameOutcome, FrameSession};
pub use payload::FramePayload;
