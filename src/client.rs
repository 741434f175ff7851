//! The public client: defaults, interceptor registries, and verb shorthands.

use std::sync::Arc;

use crate::adapter::http::HttpAdapter;
use crate::adapter::Adapter;
use crate::body::Body;
use crate::config::{merge_config, Defaults, EffectiveConfig, Method, RequestConfig};
use crate::dispatch;
use crate::error::Error;
use crate::interceptor::InterceptorManager;
use crate::response::Response;

/// The request- and response-side interceptor registries of one client.
#[derive(Clone, Default)]
pub struct Interceptors {
    /// Entries applied to the effective config before the adapter call,
    /// last-registered first.
    pub request: InterceptorManager<EffectiveConfig>,
    /// Entries applied to the outcome after the adapter call,
    /// first-registered first.
    pub response: InterceptorManager<Response>,
}

/// An HTTP client: instance defaults, interceptors, and a transport adapter.
///
/// Methods take `&self`; a client can be shared across tasks (wrap it in an
/// `Arc` or hand out references) and issues independent requests fully
/// concurrently.
///
/// # Examples
///
/// ```no_run
/// use courier::Client;
///
/// # async fn demo() -> Result<(), courier::Error> {
/// let client = Client::new();
/// let response = client.get("https://api.example.com/items").await?;
/// println!("{} {:?}", response.status, response.data);
/// # Ok(())
/// # }
/// ```
pub struct Client {
    defaults: Defaults,
    interceptors: Interceptors,
    adapter: Arc<dyn Adapter>,
}

impl Default for Client {
    fn default() -> Self {
        Client::new()
    }
}

impl Client {
    /// A client with library defaults and the reqwest-backed transport.
    pub fn new() -> Self {
        Client::builder().build()
    }

    /// Starts building a client with custom defaults or a custom adapter.
    pub fn builder() -> ClientBuilder {
        ClientBuilder {
            defaults: Defaults::default(),
            adapter: None,
        }
    }

    /// This instance's defaults.
    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    /// Mutable access to this instance's defaults. Changes affect requests
    /// dispatched afterwards; in-flight requests keep their merged config.
    pub fn defaults_mut(&mut self) -> &mut Defaults {
        &mut self.defaults
    }

    /// The interceptor registries.
    pub fn interceptors(&self) -> &Interceptors {
        &self.interceptors
    }

    /// Dispatches a request described by `config`.
    pub async fn request(&self, config: RequestConfig) -> Result<Response, Error> {
        let effective = merge_config(&self.defaults, config);
        dispatch::dispatch(
            &self.adapter,
            &self.interceptors.request,
            &self.interceptors.response,
            effective,
        )
        .await
    }

    /// Sends a GET request to `url`.
    pub async fn get(&self, url: &str) -> Result<Response, Error> {
        self.request(RequestConfig::new(url).method(Method::Get)).await
    }

    /// Sends a DELETE request to `url`.
    pub async fn delete(&self, url: &str) -> Result<Response, Error> {
        self.request(RequestConfig::new(url).method(Method::Delete)).await
    }

    /// Sends a HEAD request to `url`.
    pub async fn head(&self, url: &str) -> Result<Response, Error> {
        self.request(RequestConfig::new(url).method(Method::Head)).await
    }

    /// Sends an OPTIONS request to `url`.
    pub async fn options(&self, url: &str) -> Result<Response, Error> {
        self.request(RequestConfig::new(url).method(Method::Options)).await
    }

    /// Sends a POST request with `data` as the body.
    pub async fn post(&self, url: &str, data: impl Into<Body>) -> Result<Response, Error> {
        self.request(RequestConfig::new(url).method(Method::Post).data(data))
            .await
    }

    /// Sends a PUT request with `data` as the body.
    pub async fn put(&self, url: &str, data: impl Into<Body>) -> Result<Response, Error> {
        self.request(RequestConfig::new(url).method(Method::Put).data(data))
            .await
    }

    /// Sends a PATCH request with `data` as the body.
    pub async fn patch(&self, url: &str, data: impl Into<Body>) -> Result<Response, Error> {
        self.request(RequestConfig::new(url).method(Method::Patch).data(data))
            .await
    }
}

/// Builder for [`Client`].
pub struct ClientBuilder {
    defaults: Defaults,
    adapter: Option<Arc<dyn Adapter>>,
}

impl ClientBuilder {
    /// Replaces the instance defaults.
    pub fn defaults(mut self, defaults: Defaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Installs a custom transport adapter.
    pub fn adapter(mut self, adapter: impl Adapter + 'static) -> Self {
        self.adapter = Some(Arc::new(adapter));
        self
    }

    /// Builds the client, defaulting to the reqwest-backed transport.
    pub fn build(self) -> Client {
        Client {
            defaults: self.defaults,
            interceptors: Interceptors::default(),
            adapter: self
                .adapter
                .unwrap_or_else(|| Arc::new(HttpAdapter::new())),
        }
    }
}
