//! Configuration types: methods, credentials, per-call and instance configs.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::body::Body;
use crate::cancel::CancelToken;
use crate::headers::Headers;
use crate::transform::{RequestTransformer, ResponseTransformer};

/// An HTTP request method.
///
/// The canonical rendering ([`Method::as_str`]) is lowercase; parsing accepts
/// any casing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
}

/// Error returned when parsing an unrecognized method name.
#[derive(Error, Debug)]
#[error("unrecognized HTTP method: {0}")]
pub struct InvalidMethod(
    /// The rejected method name.
    pub String,
);

impl Method {
    /// All supported methods.
    pub const ALL: [Method; 7] = [
        Method::Get,
        Method::Post,
        Method::Put,
        Method::Patch,
        Method::Delete,
        Method::Head,
        Method::Options,
    ];

    /// The lowercase canonical name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "get",
            Method::Post => "post",
            Method::Put => "put",
            Method::Patch => "patch",
            Method::Delete => "delete",
            Method::Head => "head",
            Method::Options => "options",
        }
    }

    /// Whether the shorthand verb for this method takes a positional body.
    pub fn has_request_body(&self) -> bool {
        matches!(self, Method::Post | Method::Put | Method::Patch)
    }
}

impl FromStr for Method {
    type Err = InvalidMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "get" => Ok(Method::Get),
            "post" => Ok(Method::Post),
            "put" => Ok(Method::Put),
            "patch" => Ok(Method::Patch),
            "delete" => Ok(Method::Delete),
            "head" => Ok(Method::Head),
            "options" => Ok(Method::Options),
            other => Err(InvalidMethod(other.to_string())),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the transport should read the response body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResponseType {
    /// Read text and let the default response transform parse JSON.
    #[default]
    Json,
    /// Read text, no parsing by the transport.
    Text,
    /// Read raw bytes.
    Bytes,
}

/// HTTP basic-auth credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The username; may be empty.
    pub username: String,
    /// The password; may be empty.
    pub password: String,
}

impl Credentials {
    /// Builds a credentials pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"********")
            .finish()
    }
}

/// Predicate deciding which HTTP status codes count as success.
pub type StatusValidator = Arc<dyn Fn(u16) -> bool + Send + Sync>;

/// Header defaults partitioned into a common map plus per-method maps.
///
/// On merge, `common` is applied first, then the map for the request's
/// method, then the call-site headers; later layers override
/// case-insensitively.
#[derive(Clone, Debug, Default)]
pub struct HeaderDefaults {
    /// Headers applied to every request.
    pub common: Headers,
    /// Headers applied to requests of a specific method.
    pub per_method: HashMap<Method, Headers>,
}

impl HeaderDefaults {
    /// The default headers for `method`, creating the map on first access.
    pub fn method_mut(&mut self, method: Method) -> &mut Headers {
        self.per_method.entry(method).or_default()
    }
}

/// Instance-level defaults, every field concrete.
///
/// `Defaults::default()` is the library configuration; mutate a client's
/// copy (or build your own) to scope overrides to that instance.
#[derive(Clone)]
pub struct Defaults {
    /// Method used when the call site does not set one.
    pub method: Method,
    /// Request deadline; [`Duration::ZERO`] means no timeout.
    pub timeout: Duration,
    /// How response bodies are read.
    pub response_type: ResponseType,
    /// Base URL that relative request URLs are resolved against.
    pub base_url: Option<String>,
    /// Partitioned header defaults.
    pub headers: HeaderDefaults,
    /// Basic-auth credentials applied to every request.
    pub auth: Option<Credentials>,
    /// Success predicate for HTTP status codes.
    pub validate_status: StatusValidator,
    /// Ordered request-body transform stages.
    pub transform_request: Vec<RequestTransformer>,
    /// Ordered response-body transform stages.
    pub transform_response: Vec<ResponseTransformer>,
}

impl Default for Defaults {
    fn default() -> Self {
        super::defaults::library_defaults()
    }
}

impl fmt::Debug for Defaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Defaults")
            .field("method", &self.method)
            .field("timeout", &self.timeout)
            .field("response_type", &self.response_type)
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// A call-site request description.
///
/// Every field except `url` is optional; unset fields fall through to the
/// instance defaults on merge and never override them.
///
/// # Examples
///
/// ```no_run
/// use courier::{Body, Method, RequestConfig};
/// use std::time::Duration;
///
/// let config = RequestConfig::new("https://api.example.com/items")
///     .method(Method::Post)
///     .data(Body::Json(serde_json::json!({"name": "widget"})))
///     .timeout(Duration::from_secs(5));
/// ```
#[derive(Clone, Default)]
pub struct RequestConfig {
    /// Request URL; resolved against the effective `base_url` when relative.
    pub url: String,
    /// Request method.
    pub method: Option<Method>,
    /// Base URL override for this request.
    pub base_url: Option<String>,
    /// Call-site header overrides.
    pub headers: Headers,
    /// Query parameters appended to the URL.
    pub params: Vec<(String, String)>,
    /// Request body.
    pub data: Option<Body>,
    /// Deadline override; [`Duration::ZERO`] disables the timeout.
    pub timeout: Option<Duration>,
    /// Response-body reading override.
    pub response_type: Option<ResponseType>,
    /// Basic-auth override.
    pub auth: Option<Credentials>,
    /// Status-predicate override; replaces the default wholesale.
    pub validate_status: Option<StatusValidator>,
    /// Request-transform override; replaces the default stages wholesale.
    pub transform_request: Option<Vec<RequestTransformer>>,
    /// Response-transform override; replaces the default stages wholesale.
    pub transform_response: Option<Vec<ResponseTransformer>>,
    /// Cancellation token wired to this request.
    pub cancel_token: Option<CancelToken>,
}

impl RequestConfig {
    /// Starts a request description for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        RequestConfig {
            url: url.into(),
            ..RequestConfig::default()
        }
    }

    /// Sets the request method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the base URL for this request.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Sets one header, replacing any call-site value under the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Appends one query parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Sets the request body.
    pub fn data(mut self, data: impl Into<Body>) -> Self {
        self.data = Some(data.into());
        self
    }

    /// Sets the deadline for this request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets how the response body is read.
    pub fn response_type(mut self, response_type: ResponseType) -> Self {
        self.response_type = Some(response_type);
        self
    }

    /// Sets basic-auth credentials for this request.
    pub fn auth(mut self, credentials: Credentials) -> Self {
        self.auth = Some(credentials);
        self
    }

    /// Replaces the status predicate for this request.
    pub fn validate_status<F>(mut self, predicate: F) -> Self
    where
        F: Fn(u16) -> bool + Send + Sync + 'static,
    {
        self.validate_status = Some(Arc::new(predicate));
        self
    }

    /// Replaces the request-transform stages for this request.
    pub fn transform_request(mut self, stages: Vec<RequestTransformer>) -> Self {
        self.transform_request = Some(stages);
        self
    }

    /// Replaces the response-transform stages for this request.
    pub fn transform_response(mut self, stages: Vec<ResponseTransformer>) -> Self {
        self.transform_response = Some(stages);
        self
    }

    /// Wires a cancellation token to this request.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel_token = Some(token);
        self
    }
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("params", &self.params)
            .field("timeout", &self.timeout)
            .field("response_type", &self.response_type)
            .finish_non_exhaustive()
    }
}

/// The fully merged configuration for one request.
///
/// Immutable for the remainder of the pipeline: the dispatcher derives the
/// transport request from it but never mutates it in place.
#[derive(Clone)]
pub struct EffectiveConfig {
    /// Request URL as given at the call site.
    pub url: String,
    /// Resolved method.
    pub method: Method,
    /// Resolved base URL, if any.
    pub base_url: Option<String>,
    /// Flattened headers: common, then per-method, then call-site.
    pub headers: Headers,
    /// Query parameters.
    pub params: Vec<(String, String)>,
    /// Request body as given at the call site.
    pub data: Option<Body>,
    /// Resolved deadline; [`Duration::ZERO`] means no timeout.
    pub timeout: Duration,
    /// Resolved response-body reading mode.
    pub response_type: ResponseType,
    /// Resolved credentials, if any.
    pub auth: Option<Credentials>,
    /// Resolved status predicate.
    pub validate_status: StatusValidator,
    /// Resolved request-transform stages.
    pub transform_request: Vec<RequestTransformer>,
    /// Resolved response-transform stages.
    pub transform_response: Vec<ResponseTransformer>,
    /// Cancellation token, if the call site wired one.
    pub cancel_token: Option<CancelToken>,
}

impl fmt::Debug for EffectiveConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectiveConfig")
            .field("url", &self.url)
            .field("method", &self.method)
            .field("base_url", &self.base_url)
            .field("headers", &self.headers)
            .field("params", &self.params)
            .field("timeout", &self.timeout)
            .field("response_type", &self.response_type)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}
