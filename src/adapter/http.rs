//! The default transport, backed by a shared `reqwest::Client`.

use futures::future::{self, BoxFuture, Either};
use log::debug;
use url::form_urlencoded;

use super::{Adapter, RawResponse, TransportError, TransportRequest};
use crate::body::Body;
use crate::cancel::Cancel;
use crate::config::{Method, ResponseType};
use crate::headers::Headers;

/// Transport over a pooled [`reqwest::Client`].
///
/// No client-level timeout is configured; deadlines come from each request's
/// config and are enforced here by racing the transfer.
#[derive(Clone, Debug, Default)]
pub struct HttpAdapter {
    client: reqwest::Client,
}

impl HttpAdapter {
    /// Creates an adapter with a fresh connection pool.
    pub fn new() -> Self {
        HttpAdapter::default()
    }

    /// Wraps a preconfigured `reqwest::Client` (proxies, TLS settings, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        HttpAdapter { client }
    }
}

impl Adapter for HttpAdapter {
    fn call(
        &self,
        request: TransportRequest,
    ) -> BoxFuture<'static, Result<RawResponse, TransportError>> {
        let client = self.client.clone();
        Box::pin(execute(client, request))
    }
}

async fn execute(
    client: reqwest::Client,
    request: TransportRequest,
) -> Result<RawResponse, TransportError> {
    let TransportRequest {
        url,
        method,
        headers,
        data,
        timeout,
        response_type,
        cancel_token,
    } = request;

    let mut builder = client.request(to_reqwest_method(method), &url);
    for (name, value) in headers.iter() {
        // Invalid names/values are deferred by the builder and surface as a
        // build error at send time.
        builder = builder.header(name, value);
    }
    if let Some(body) = data {
        builder = match body {
            Body::Text(text) => builder.body(text),
            Body::Bytes(bytes) => builder.body(bytes),
            // Bodies a custom transform pipeline left unserialized.
            Body::Json(value) => {
                let text = serde_json::to_string(&value)
                    .map_err(|e| TransportError::Network(anyhow::Error::new(e)))?;
                builder.body(text)
            }
            Body::Form(pairs) => {
                let encoded = form_urlencoded::Serializer::new(String::new())
                    .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                    .finish();
                builder.body(encoded)
            }
        };
    }

    let send = send_and_read(builder, response_type);

    // Optional race arms: a missing token or a zero timeout becomes a future
    // that never settles.
    let cancel_wait = match cancel_token {
        Some(token) => Either::Left(async move { token.cancelled().await }),
        None => Either::Right(future::pending::<Cancel>()),
    };
    let deadline = if timeout.is_zero() {
        Either::Right(future::pending::<()>())
    } else {
        Either::Left(tokio::time::sleep(timeout))
    };

    // Whichever settles first wins; losing arms are dropped, which aborts an
    // in-flight transfer.
    tokio::select! {
        biased;
        cancel = cancel_wait => {
            debug!("{method} {url}: aborted by cancellation");
            Err(TransportError::Cancelled(cancel))
        }
        _ = deadline => {
            debug!("{method} {url}: deadline of {} ms elapsed", timeout.as_millis());
            Err(TransportError::Timeout(timeout))
        }
        result = send => result,
    }
}

async fn send_and_read(
    builder: reqwest::RequestBuilder,
    response_type: ResponseType,
) -> Result<RawResponse, TransportError> {
    let response = builder
        .send()
        .await
        .map_err(|e| TransportError::Network(anyhow::Error::new(e)))?;

    let status = response.status();
    let status_text = status.canonical_reason().unwrap_or_default().to_string();
    let headers = from_reqwest_headers(response.headers());

    let data = match response_type {
        ResponseType::Bytes => Body::Bytes(
            response
                .bytes()
                .await
                .map_err(|e| TransportError::Network(anyhow::Error::new(e)))?
                .to_vec(),
        ),
        ResponseType::Json | ResponseType::Text => Body::Text(
            response
                .text()
                .await
                .map_err(|e| TransportError::Network(anyhow::Error::new(e)))?,
        ),
    };

    Ok(RawResponse {
        data,
        status: status.as_u16(),
        status_text,
        headers,
    })
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
    }
}

fn from_reqwest_headers(map: &reqwest::header::HeaderMap) -> Headers {
    let mut headers = Headers::new();
    for (name, value) in map.iter() {
        headers.append(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
    }
    headers
}
