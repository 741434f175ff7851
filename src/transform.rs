//! Request/response body transform stages.
//!
//! Transforms run inside the dispatcher, around the adapter call: request
//! stages reduce the caller's [`Body`] to its wire form and may adjust the
//! outgoing headers; response stages post-process the raw body before status
//! validation. The default stages implement the JSON codec.

use std::sync::Arc;

use anyhow::Result;
use url::form_urlencoded;

use crate::body::Body;
use crate::config::constants::{CONTENT_TYPE_FORM, CONTENT_TYPE_JSON, HEADER_CONTENT_TYPE};
use crate::headers::Headers;

/// One request-body transform stage.
///
/// Receives the prior stage's output and the mutable outgoing header set;
/// returns the next body. Stages run in order.
pub type RequestTransformer =
    Arc<dyn Fn(Option<Body>, &mut Headers) -> Result<Option<Body>> + Send + Sync>;

/// One response-body transform stage.
///
/// Receives the prior stage's output and the response headers; returns the
/// next body. Stages run in order.
pub type ResponseTransformer = Arc<dyn Fn(Body, &Headers) -> Result<Body> + Send + Sync>;

/// The default request pipeline: serialize JSON and form bodies to text,
/// setting the matching content type when the caller has not set one.
pub fn default_request_transforms() -> Vec<RequestTransformer> {
    vec![Arc::new(serialize_request_body)]
}

/// The default response pipeline: try to parse text bodies as JSON, leaving
/// unparseable text untouched.
pub fn default_response_transforms() -> Vec<ResponseTransformer> {
    vec![Arc::new(parse_response_json)]
}

fn serialize_request_body(data: Option<Body>, headers: &mut Headers) -> Result<Option<Body>> {
    match data {
        Some(Body::Json(value)) => {
            headers.set_if_unset(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);
            Ok(Some(Body::Text(serde_json::to_string(&value)?)))
        }
        Some(Body::Form(pairs)) => {
            headers.set_if_unset(HEADER_CONTENT_TYPE, CONTENT_TYPE_FORM);
            let encoded = form_urlencoded::Serializer::new(String::new())
                .extend_pairs(pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
                .finish();
            Ok(Some(Body::Text(encoded)))
        }
        other => Ok(other),
    }
}

fn parse_response_json(data: Body, _headers: &Headers) -> Result<Body> {
    match data {
        Body::Text(text) => match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => Ok(Body::Json(value)),
            Err(_) => Ok(Body::Text(text)),
        },
        other => Ok(other),
    }
}

/// Runs request stages in order, threading body and headers through.
pub(crate) fn run_request_transforms(
    stages: &[RequestTransformer],
    mut data: Option<Body>,
    headers: &mut Headers,
) -> Result<Option<Body>> {
    for stage in stages {
        data = stage(data, headers)?;
    }
    Ok(data)
}

/// Runs response stages in order.
pub(crate) fn run_response_transforms(
    stages: &[ResponseTransformer],
    mut data: Body,
    headers: &Headers,
) -> Result<Body> {
    for stage in stages {
        data = stage(data, headers)?;
    }
    Ok(data)
}
