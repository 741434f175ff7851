//! courier: an HTTP client with interceptor pipelines and cooperative
//! cancellation.
//!
//! A request flows through configuration merging, the request-side
//! interceptor chain, the transport adapter, and the response-side chain,
//! settling exactly once with a normalized [`Response`] or a classified
//! [`Error`]. Requests can be cancelled from outside the pipeline through a
//! [`CancelToken`].
//!
//! # Example
//!
//! ```no_run
//! use courier::{Body, CancelToken, Client, RequestConfig};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), courier::Error> {
//! let client = Client::new();
//!
//! // Shorthand verbs...
//! let response = client.get("https://api.example.com/items").await?;
//! println!("{}: {:?}", response.status, response.data);
//!
//! // ...or a full request description, with cancellation wired in.
//! let source = CancelToken::source();
//! let pending = client.request(
//!     RequestConfig::new("https://api.example.com/items")
//!         .data(Body::Json(serde_json::json!({"name": "widget"})))
//!         .cancel_token(source.token()),
//! );
//! source.cancel_with_reason("operation canceled by the user");
//! assert!(pending.await.unwrap_err().is_cancelled());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! The default transport runs on Tokio. Use `#[tokio::main]` in your
//! application or call into the client from an async context.

#![warn(missing_docs)]

pub mod adapter;
mod body;
pub mod cancel;
mod client;
pub mod config;
mod dispatch;
mod error;
pub mod headers;
pub mod interceptor;
mod response;
mod transform;
pub mod urls;

// Re-export the public API
pub use adapter::http::HttpAdapter;
pub use adapter::{Adapter, RawResponse, TransportError, TransportRequest};
pub use body::Body;
pub use cancel::{Cancel, CancelSource, CancelToken};
pub use client::{Client, ClientBuilder, Interceptors};
pub use config::{
    Credentials, Defaults, EffectiveConfig, HeaderDefaults, Method, RequestConfig, ResponseType,
    StatusValidator,
};
pub use error::{Error, TIMEOUT_ERROR_CODE};
pub use headers::{parse_headers, Headers};
pub use interceptor::{Interceptor, InterceptorId, InterceptorManager};
pub use response::Response;
pub use transform::{RequestTransformer, ResponseTransformer};
