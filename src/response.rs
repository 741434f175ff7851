//! The normalized response record.

use crate::body::Body;
use crate::config::EffectiveConfig;
use crate::headers::Headers;

/// A normalized HTTP response.
///
/// Always carries the effective configuration the request ran with, so
/// callers (and response interceptors) can inspect the originating request.
#[derive(Clone, Debug)]
pub struct Response {
    /// Response body, after the response transform stages.
    pub data: Body,
    /// HTTP status code.
    pub status: u16,
    /// Status reason phrase, when the transport knows one.
    pub status_text: String,
    /// Response headers.
    pub headers: Headers,
    /// The effective configuration this request ran with.
    pub config: EffectiveConfig,
}
