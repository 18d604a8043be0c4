//! # Frame Channel
//!
//! Runs one hosted tokenization flow inside an embedded cross-origin frame
//! and resolves its outcome exactly once.
//!
//! A session mounts a frame through the host seam, navigates it to the
//! processor-hosted page, and waits for a terminal message. The first
//! accepted terminal message wins; everything after it is inert. Frame
//! content is untrusted except for the processor's own origin, so a
//! message is only accepted when its observed origin matches the
//! configured processor origin.
//!
//! The frame handle is owned by the session's driver task alone and is
//! disposed on every exit path: token, error, timeout, closed frame, and
//! cancellation.

use crate::payload::FramePayload;
use bridge_core::{
    BridgeError, CheckoutConfig, FrameConfig, FrameHost, FrameMessageBody, FrameRequest,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, Notify};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// The single terminal outcome of a frame session
#[derive(Debug)]
pub enum FrameOutcome {
    /// The hosted flow produced an opaque payment token
    Token(String),

    /// The flow failed, was closed, or timed out
    Failed(BridgeError),

    /// The session was cancelled before a terminal message was accepted;
    /// neither token nor error was delivered
    Cancelled,
}

impl FrameOutcome {
    pub fn is_token(&self) -> bool {
        matches!(self, FrameOutcome::Token(_))
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FrameOutcome::Cancelled)
    }

    /// Consume the outcome, keeping the token if there is one
    pub fn token(self) -> Option<String> {
        match self {
            FrameOutcome::Token(token) => Some(token),
            _ => None,
        }
    }
}

/// Launches frame sessions against one processor origin
pub struct FrameChannel {
    host: Arc<dyn FrameHost>,
    processor_origin: String,
    config: FrameConfig,
}

impl FrameChannel {
    /// Create a channel from the checkout configuration
    pub fn new(host: Arc<dyn FrameHost>, config: &CheckoutConfig) -> Self {
        Self {
            host,
            processor_origin: config.processor_origin.clone(),
            config: config.frame.clone(),
        }
    }

    /// Start a tokenization flow against a processor-hosted page.
    ///
    /// Returns immediately; the outcome resolves asynchronously through
    /// the session.
    pub fn start(&self, target_path: &str, payload: FramePayload) -> FrameSession {
        let id = Uuid::new_v4().to_string();
        let state = Arc::new(SessionState {
            terminal: AtomicBool::new(false),
            cancel: Notify::new(),
        });
        let (outcome_tx, outcome_rx) = oneshot::channel();

        let request = FrameRequest {
            url: target_path.to_string(),
            params: payload.into_params(),
            width: self.config.width,
            height: self.config.height,
        };

        info!(session = %id, url = %request.url, "starting frame session");

        tokio::spawn(drive(
            self.host.clone(),
            request,
            self.processor_origin.clone(),
            self.config.timeout,
            id.clone(),
            state.clone(),
            outcome_tx,
        ));

        FrameSession {
            id,
            state,
            outcome_rx,
        }
    }
}

/// One active tokenization flow
pub struct FrameSession {
    id: String,
    state: Arc<SessionState>,
    outcome_rx: oneshot::Receiver<FrameOutcome>,
}

impl FrameSession {
    /// Session identifier, for correlation in logs
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether a terminal state has been reached (outcome delivered or
    /// cancellation requested)
    pub fn is_terminal(&self) -> bool {
        self.state.terminal.load(Ordering::SeqCst)
    }

    /// Cancel the session.
    ///
    /// Takes effect immediately: the terminal flag flips before this call
    /// returns, so any message arriving afterwards is inert. The frame is
    /// torn down and neither a token nor an error is delivered.
    pub fn cancel(&self) {
        if self
            .state
            .terminal
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!(session = %self.id, "frame session cancelled");
            self.state.cancel.notify_one();
        }
    }

    /// Wait for the session's single terminal outcome
    pub async fn outcome(self) -> FrameOutcome {
        match self.outcome_rx.await {
            Ok(outcome) => outcome,
            // The driver suppressed delivery: cancellation won the race
            Err(_) => FrameOutcome::Cancelled,
        }
    }
}

struct SessionState {
    /// Authoritative terminal flag; checked before any outcome delivery
    terminal: AtomicBool,
    cancel: Notify,
}

async fn drive(
    host: Arc<dyn FrameHost>,
    request: FrameRequest,
    expected_origin: String,
    timeout: std::time::Duration,
    session: String,
    state: Arc<SessionState>,
    outcome_tx: oneshot::Sender<FrameOutcome>,
) {
    let mut frame = match host.mount(request).await {
        Ok(frame) => frame,
        Err(e) => {
            deliver(&state, outcome_tx, FrameOutcome::Failed(e));
            return;
        }
    };

    let deadline = tokio::time::sleep(timeout);
    tokio::pin!(deadline);

    // None means cancelled: tear down without delivering anything
    let outcome = loop {
        tokio::select! {
            _ = state.cancel.notified() => break None,
            _ = &mut deadline => {
                warn!(%session, "frame session timed out");
                break Some(FrameOutcome::Failed(BridgeError::FrameTimeout));
            }
            message = frame.recv() => match message {
                None => {
                    debug!(%session, "frame closed before a terminal message");
                    break Some(FrameOutcome::Failed(BridgeError::FrameClosed));
                }
                Some(m) if m.origin != expected_origin => {
                    warn!(%session, origin = %m.origin, "discarding message from unexpected origin");
                    continue;
                }
                Some(m) => match m.body {
                    FrameMessageBody::Done { token } => {
                        debug!(%session, "frame delivered a token");
                        break Some(FrameOutcome::Token(token));
                    }
                    FrameMessageBody::Error { cause } => {
                        debug!(%session, %cause, "frame reported an error");
                        break Some(FrameOutcome::Failed(BridgeError::TokenizeFailed { cause }));
                    }
                },
            }
        }
    };

    frame.dispose().await;

    if let Some(outcome) = outcome {
        deliver(&state, outcome_tx, outcome);
    }
}

/// Deliver at most once; the terminal flag is authoritative and a
/// concurrent cancel may already hold it
fn deliver(state: &SessionState, tx: oneshot::Sender<FrameOutcome>, outcome: FrameOutcome) {
    if state
        .terminal
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_ok()
    {
        let _ = tx.send(outcome);
    }
}
