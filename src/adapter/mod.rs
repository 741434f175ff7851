//! The transport boundary.
//!
//! An [`Adapter`] turns the final request descriptor into a raw response, and
//! reports exactly one of four outcomes: a response (any status), a network
//! failure, an elapsed timeout, or an observed cancellation. Status
//! validation is not the transport's job; the dispatcher classifies it.

use std::time::Duration;

use futures::future::BoxFuture;

use crate::body::Body;
use crate::cancel::{Cancel, CancelToken};
use crate::config::{Method, ResponseType};
use crate::headers::Headers;

pub mod http;

/// The final request descriptor handed to the transport: URL built, auth
/// merged, transforms applied.
#[derive(Clone, Debug)]
pub struct TransportRequest {
    /// Fully built request URL, query included.
    pub url: String,
    /// Request method.
    pub method: Method,
    /// Outgoing headers.
    pub headers: Headers,
    /// Wire-form request body.
    pub data: Option<Body>,
    /// Deadline; [`Duration::ZERO`] means no timeout.
    pub timeout: Duration,
    /// How to read the response body.
    pub response_type: ResponseType,
    /// Cancellation token to race against the transfer.
    pub cancel_token: Option<CancelToken>,
}

/// A response as the transport produced it, before response transforms and
/// status validation.
#[derive(Clone, Debug)]
pub struct RawResponse {
    /// Raw body, read per the requested [`ResponseType`].
    pub data: Body,
    /// HTTP status code.
    pub status: u16,
    /// Status reason phrase, when known.
    pub status_text: String,
    /// Response headers.
    pub headers: Headers,
}

/// A transport-level failure. Classified into [`crate::Error`] by the
/// dispatcher, which attaches the effective config.
#[derive(Debug)]
pub enum TransportError {
    /// No response received: connection, DNS, or transfer failure.
    Network(anyhow::Error),
    /// The deadline elapsed with no response.
    Timeout(Duration),
    /// The request's cancellation token settled while in flight. The
    /// transfer has been aborted.
    Cancelled(Cancel),
}

/// A pluggable transport.
///
/// Implementations must race the transfer against the request's cancellation
/// token and timeout: whichever settles first wins, and the losing waits are
/// dropped — no double settlement, no leaked handle.
pub trait Adapter: Send + Sync {
    /// Executes one request to settlement.
    fn call(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'static, Result<RawResponse, TransportError>>;
}
