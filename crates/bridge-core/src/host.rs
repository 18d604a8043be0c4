//! # Host Page Seams
//!
//! The bridge never touches a real DOM. The host page (or its wasm shim)
//! lends the library two capabilities through these traits: locating the
//! checkout form for fragment injection, and mounting embedded frames for
//! hosted tokenization flows.

use crate::error::BridgeResult;
use crate::payload::Payload;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A handle to the checkout form element inside the host page
pub trait FormAnchor: Send + Sync {
    /// Append an HTML/script fragment to the form, verbatim
    fn append_fragment(&self, fragment: &str);
}

/// DOM query capability lent by the host page
pub trait HostDocument: Send + Sync {
    /// Locate the checkout form the collector fragment is injected into.
    /// Returns `None` when the page carries no such form.
    fn checkout_form(&self) -> Option<Box<dyn FormAnchor>>;
}

/// Geometry and navigation details for mounting an embedded frame
#[derive(Debug, Clone)]
pub struct FrameRequest {
    /// Processor-hosted page to navigate the frame to
    pub url: String,

    /// Parameters encoded into the navigation request
    pub params: Payload,

    /// Frame width in CSS pixels
    pub width: u32,

    /// Frame height in CSS pixels
    pub height: u32,
}

/// A message posted from the embedded frame's content back to the host.
///
/// The origin is whatever the host environment observed on delivery, not
/// anything the frame content claims about itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameMessage {
    /// Observed origin of the sender
    pub origin: String,

    /// Message body
    #[serde(flatten)]
    pub body: FrameMessageBody,
}

/// The two terminal message shapes a processor-hosted page may post
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum FrameMessageBody {
    /// Flow finished; carries the opaque payment token
    Done { token: String },

    /// Flow failed; carries a cause description
    Error { cause: String },
}

/// Frame mounting capability lent by the host page
#[async_trait]
pub trait FrameHost: Send + Sync {
    /// Mount an embedded frame and navigate it per the request.
    /// The returned handle is exclusively owned by the caller.
    async fn mount(&self, request: FrameRequest) -> BridgeResult<Box<dyn FrameHandle>>;
}

/// An exclusively-owned handle to one mounted frame
#[async_trait]
pub trait FrameHandle: Send {
    /// Next message posted by the frame content. Returns `None` once the
    /// frame has been closed or navigated away.
    async fn recv(&mut self) -> Option<FrameMessage>;

    /// Remove the frame from the page and drop its listeners
    async fn dispose(&mut self);
}
