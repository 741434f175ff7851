//! Typed request and response payloads.

use serde::Serialize;

/// A request or response body.
///
/// Request bodies start in whichever variant the caller provides and are
/// reduced to `Text` or `Bytes` by the request transform pipeline before they
/// reach the transport. Response bodies arrive as `Text` or `Bytes` and may be
/// promoted to `Json` by the response transform pipeline.
#[derive(Clone, Debug, PartialEq)]
pub enum Body {
    /// A JSON document. Serialized to text by the default request transform.
    Json(serde_json::Value),
    /// Plain text, sent and received verbatim.
    Text(String),
    /// Raw bytes, sent and received verbatim.
    Bytes(Vec<u8>),
    /// Form fields, serialized to `application/x-www-form-urlencoded` by the
    /// default request transform.
    Form(Vec<(String, String)>),
}

impl Body {
    /// Builds a JSON body from any serializable value.
    pub fn json<T: Serialize>(value: &T) -> Result<Body, serde_json::Error> {
        Ok(Body::Json(serde_json::to_value(value)?))
    }

    /// Borrows the JSON document, if this body is JSON.
    pub fn as_json(&self) -> Option<&serde_json::Value> {
        match self {
            Body::Json(value) => Some(value),
            _ => None,
        }
    }

    /// Borrows the text, if this body is text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Body::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrows the raw bytes, if this body is binary.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Body::Bytes(bytes) => Some(bytes),
            _ => None,
        }
    }
}

impl From<serde_json::Value> for Body {
    fn from(value: serde_json::Value) -> Self {
        Body::Json(value)
    }
}

impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Text(text)
    }
}

impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Text(text.to_string())
    }
}

impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}
