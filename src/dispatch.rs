//! The request pipeline: interceptor chains folded around the adapter call.

use std::sync::Arc;

use log::debug;

use crate::adapter::{Adapter, RawResponse, TransportRequest};
use crate::config::constants::HEADER_AUTHORIZATION;
use crate::config::EffectiveConfig;
use crate::error::{self, Error};
use crate::headers::basic_auth_value;
use crate::interceptor::{run_chain_step, InterceptorManager};
use crate::response::Response;
use crate::transform;
use crate::urls;

/// Runs one request through the full pipeline.
///
/// Ordering is total and matches materialization: request entries fold in
/// reverse insertion order (last registered runs first, outside-in), then the
/// adapter boundary, then response entries in forward insertion order. Each
/// step awaits the prior one; no two stages of one request ever run
/// concurrently.
pub(crate) async fn dispatch(
    adapter: &Arc<dyn Adapter>,
    request_interceptors: &InterceptorManager<EffectiveConfig>,
    response_interceptors: &InterceptorManager<Response>,
    config: EffectiveConfig,
) -> Result<Response, Error> {
    // A token settled before dispatch short-circuits the whole pipeline; the
    // adapter is never started.
    if let Some(token) = &config.cancel_token {
        token.check().map_err(Error::Cancelled)?;
    }

    debug!("dispatching {} {}", config.method, config.url);

    // Both chains are materialized up front: registration or ejection during
    // this request's flight affects only later requests.
    let request_chain = request_interceptors.snapshot(&config);
    let response_chain = response_interceptors.snapshot(&config);

    let mut state: Result<EffectiveConfig, Error> = Ok(config);
    for entry in request_chain.iter().rev() {
        state = run_chain_step(entry, state).await;
    }

    let mut outcome = match state {
        Ok(config) => call_adapter(adapter, config).await,
        // The request chain already failed; the adapter boundary is skipped
        // and response entries get their crack at the error.
        Err(error) => Err(error),
    };

    for entry in &response_chain {
        outcome = run_chain_step(entry, outcome).await;
    }
    outcome
}

/// The adapter boundary: URL building, auth, transforms, transport call,
/// status validation.
async fn call_adapter(
    adapter: &Arc<dyn Adapter>,
    config: EffectiveConfig,
) -> Result<Response, Error> {
    // Second checkpoint: a token settled while request interceptors ran.
    if let Some(token) = &config.cancel_token {
        token.check().map_err(Error::Cancelled)?;
    }

    let url = urls::build_url(config.base_url.as_deref(), &config.url, &config.params)
        .map_err(|source| Error::Request {
            message: source.to_string(),
            config: Some(Box::new(config.clone())),
            source: None,
        })?;

    let mut headers = config.headers.clone();
    if let Some(auth) = &config.auth {
        headers.set(
            HEADER_AUTHORIZATION,
            basic_auth_value(&auth.username, &auth.password),
        );
    }

    let data = transform::run_request_transforms(
        &config.transform_request,
        config.data.clone(),
        &mut headers,
    )
    .map_err(|source| Error::Request {
        message: "request body transform failed".to_string(),
        config: Some(Box::new(config.clone())),
        source: Some(source),
    })?;

    let transport_request = TransportRequest {
        url,
        method: config.method,
        headers,
        data,
        timeout: config.timeout,
        response_type: config.response_type,
        cancel_token: config.cancel_token.clone(),
    };

    let raw = adapter
        .call(transport_request)
        .await
        .map_err(|transport| error::transport_error(transport, &config))?;

    let RawResponse {
        data,
        status,
        status_text,
        headers,
    } = raw;

    let data = transform::run_response_transforms(&config.transform_response, data, &headers)
        .map_err(|source| Error::Request {
            message: "response body transform failed".to_string(),
            config: Some(Box::new(config.clone())),
            source: Some(source),
        })?;

    let response = Response {
        data,
        status,
        status_text,
        headers,
        config,
    };

    if (response.config.validate_status)(response.status) {
        debug!(
            "{} {}: {} {}",
            response.config.method, response.config.url, response.status, response.status_text
        );
        Ok(response)
    } else {
        Err(error::status_error(response))
    }
}
