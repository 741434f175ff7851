//! One-shot cancellation token with a stored reason.

use std::fmt;
use std::sync::{Arc, OnceLock};

use tokio_util::sync::CancellationToken as SignalToken;

/// The reason a request was cancelled.
///
/// Distinct from [`crate::Error`]'s failure variants: callers branch on
/// cancellation by matching `Error::Cancelled`, never by message text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cancel {
    message: Option<String>,
}

impl Cancel {
    /// The message supplied at cancellation time, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for Cancel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "Request canceled: {message}"),
            None => write!(f, "Request canceled"),
        }
    }
}

struct TokenState {
    // Reason is published before the signal fires, so any waiter woken by the
    // signal always observes it.
    reason: OnceLock<Cancel>,
    signal: SignalToken,
}

/// A shareable handle observing one cancellation slot.
///
/// Clones observe the same slot. The token is single-writer (the paired
/// [`CancelSource`]), multi-reader, and needs no external locking: the state
/// transitions at most once and never transitions back.
#[derive(Clone)]
pub struct CancelToken {
    state: Arc<TokenState>,
}

impl CancelToken {
    /// Creates a `{token, cancel}` pairing.
    ///
    /// Pass [`CancelSource::token`] in a request's config to wire it to that
    /// request; keep the source to trigger cancellation from outside the
    /// pipeline. A token may be shared across requests by cloning it.
    pub fn source() -> CancelSource {
        CancelSource {
            token: CancelToken {
                state: Arc::new(TokenState {
                    reason: OnceLock::new(),
                    signal: SignalToken::new(),
                }),
            },
        }
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.state.reason.get().is_some()
    }

    /// The stored reason, if cancellation has been requested.
    pub fn reason(&self) -> Option<Cancel> {
        self.state.reason.get().cloned()
    }

    /// Synchronous poll: fails with the stored [`Cancel`] if already
    /// cancelled. Used by the dispatcher at chain checkpoints.
    pub fn check(&self) -> Result<(), Cancel> {
        match self.state.reason.get() {
            Some(cancel) => Err(cancel.clone()),
            None => Ok(()),
        }
    }

    /// Settles with the [`Cancel`] reason when cancellation occurs; never
    /// settles otherwise. Used by the transport to race cancellation against
    /// the in-flight transfer.
    pub async fn cancelled(&self) -> Cancel {
        self.state.signal.cancelled().await;
        self.state
            .reason
            .get()
            .cloned()
            .expect("signal fired without a published reason")
    }
}

impl fmt::Debug for CancelToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelToken")
            .field("reason", &self.state.reason.get())
            .finish()
    }
}

/// The cancel capability paired with a [`CancelToken`].
pub struct CancelSource {
    token: CancelToken,
}

impl CancelSource {
    /// A token observing this source's cancellation slot.
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Requests cancellation with no message. A no-op after the first call.
    pub fn cancel(&self) {
        self.cancel_inner(Cancel { message: None });
    }

    /// Requests cancellation with a message. A no-op after the first call:
    /// the first reason is kept and later calls change nothing.
    pub fn cancel_with_reason(&self, message: impl Into<String>) {
        self.cancel_inner(Cancel {
            message: Some(message.into()),
        });
    }

    fn cancel_inner(&self, cancel: Cancel) {
        // First writer wins; losers must not re-fire the signal.
        if self.token.state.reason.set(cancel).is_ok() {
            self.token.state.signal.cancel();
        }
    }
}

impl fmt::Debug for CancelSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CancelSource")
            .field("cancelled", &self.token.is_cancelled())
            .finish()
    }
}
