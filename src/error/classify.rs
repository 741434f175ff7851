//! Classification of adapter outcomes into [`Error`] values.

use log::debug;

use super::types::Error;
use crate::adapter::TransportError;
use crate::config::EffectiveConfig;
use crate::response::Response;

/// Classifies an adapter-level failure, attaching the effective config.
///
/// Cancellation passes through as the raw [`crate::Cancel`] value inside
/// `Error::Cancelled`; everything else is wrapped exactly once.
pub(crate) fn transport_error(error: TransportError, config: &EffectiveConfig) -> Error {
    match error {
        TransportError::Network(source) => {
            debug!("{} {}: network error: {source:#}", config.method, config.url);
            Error::Network {
                config: Box::new(config.clone()),
                source: Some(source),
            }
        }
        TransportError::Timeout(timeout) => {
            debug!(
                "{} {}: no response within {} ms",
                config.method,
                config.url,
                timeout.as_millis()
            );
            Error::Timeout {
                timeout,
                config: Box::new(config.clone()),
            }
        }
        TransportError::Cancelled(cancel) => {
            debug!("{} {}: cancelled", config.method, config.url);
            Error::Cancelled(cancel)
        }
    }
}

/// Classifies a response whose status failed the configured predicate.
pub(crate) fn status_error(response: Response) -> Error {
    debug!(
        "{} {}: status {} rejected by validate_status",
        response.config.method, response.config.url, response.status
    );
    Error::Status {
        status: response.status,
        response: Box::new(response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::Body;
    use crate::cancel::CancelToken;
    use crate::config::{merge_config, Defaults, RequestConfig};
    use crate::headers::Headers;
    use std::time::Duration;

    fn config() -> EffectiveConfig {
        merge_config(&Defaults::default(), RequestConfig::new("https://example.com/x"))
    }

    #[test]
    fn network_failures_keep_the_source_chain() {
        let err = transport_error(
            TransportError::Network(anyhow::anyhow!("dns failure")),
            &config(),
        );
        assert!(err.is_network());
        let source = std::error::Error::source(&err).expect("source attached");
        assert!(source.to_string().contains("dns failure"));
    }

    #[test]
    fn timeouts_carry_the_deadline() {
        let err = transport_error(TransportError::Timeout(Duration::from_secs(2)), &config());
        assert_eq!(err.to_string(), "Timeout of 2000 ms exceeded");
    }

    #[test]
    fn cancellation_is_never_wrapped() {
        let source = CancelToken::source();
        source.cancel_with_reason("bail");
        let reason = source.token().reason().unwrap();

        let err = transport_error(TransportError::Cancelled(reason.clone()), &config());
        assert_eq!(err.cancel(), Some(&reason));
        assert!(err.config().is_none());
    }

    #[test]
    fn status_error_attaches_the_full_response() {
        let response = Response {
            data: Body::Text("teapot".to_string()),
            status: 418,
            status_text: "I'm a teapot".to_string(),
            headers: Headers::new(),
            config: config(),
        };
        let err = status_error(response);
        assert_eq!(err.status(), Some(418));
        assert_eq!(
            err.response().unwrap().data,
            Body::Text("teapot".to_string())
        );
    }
}
