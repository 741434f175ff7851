//! The unified request error.

use std::time::Duration;

use thiserror::Error;

use crate::cancel::Cancel;
use crate::config::EffectiveConfig;
use crate::response::Response;

/// Error code reported for elapsed request deadlines.
pub const TIMEOUT_ERROR_CODE: &str = "ECONNABORTED";

/// A classified request failure.
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure with no response received (connection refused,
    /// DNS failure, broken transfer).
    #[error("Network Error")]
    Network {
        /// The configuration of the failed request.
        config: Box<EffectiveConfig>,
        /// The underlying transport error.
        #[source]
        source: Option<anyhow::Error>,
    },

    /// The configured deadline elapsed before the transport settled.
    #[error("Timeout of {} ms exceeded", timeout.as_millis())]
    Timeout {
        /// The deadline that elapsed.
        timeout: Duration,
        /// The configuration of the failed request.
        config: Box<EffectiveConfig>,
    },

    /// A response arrived but its status failed the configured predicate.
    #[error("Request failed with status code {status}")]
    Status {
        /// The failing status code.
        status: u16,
        /// The full response, transforms applied.
        response: Box<Response>,
    },

    /// The request was cancelled through its token. Carries the raw
    /// [`Cancel`] value; never wrapped in request context.
    #[error("{0}")]
    Cancelled(Cancel),

    /// The request could not be prepared or post-processed: URL building,
    /// transform stages, or a failure raised by an interceptor.
    #[error("{message}")]
    Request {
        /// What went wrong.
        message: String,
        /// The configuration, when the failure happened after merge.
        config: Option<Box<EffectiveConfig>>,
        /// The underlying cause, when one exists.
        #[source]
        source: Option<anyhow::Error>,
    },
}

impl Error {
    /// Builds a free-form failure, e.g. from an interceptor. No config is
    /// attached; the pipeline attaches one where it knows it.
    pub fn message(message: impl Into<String>) -> Self {
        Error::Request {
            message: message.into(),
            config: None,
            source: None,
        }
    }

    /// The effective configuration of the failed request, when attached.
    pub fn config(&self) -> Option<&EffectiveConfig> {
        match self {
            Error::Network { config, .. } | Error::Timeout { config, .. } => Some(config),
            Error::Status { response, .. } => Some(&response.config),
            Error::Request { config, .. } => config.as_deref(),
            Error::Cancelled(_) => None,
        }
    }

    /// The response, present only for status failures.
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Status { response, .. } => Some(response),
            _ => None,
        }
    }

    /// The failing status code, present only for status failures.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The protocol-style error code, currently only set for timeouts.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Error::Timeout { .. } => Some(TIMEOUT_ERROR_CODE),
            _ => None,
        }
    }

    /// The cancellation reason, present only for cancelled requests.
    pub fn cancel(&self) -> Option<&Cancel> {
        match self {
            Error::Cancelled(cancel) => Some(cancel),
            _ => None,
        }
    }

    /// Whether this failure is a cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled(_))
    }

    /// Whether this failure is a transport-level network error.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network { .. })
    }

    /// Whether this failure is an elapsed deadline.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Whether this failure is a rejected HTTP status.
    pub fn is_status(&self) -> bool {
        matches!(self, Error::Status { .. })
    }
}
