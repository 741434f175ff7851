// Shared test helpers: a local HTTP server the client is exercised against.
//
// Routes:
// - GET  /json          -> a small JSON document
// - ANY  /echo          -> JSON description of the received request
// - ANY  /status/{code} -> empty-ish body with the given status
// - ANY  /delay/{ms}    -> responds after the given delay

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::routing::{any, get};
use axum::{Json, Router};
use tokio::net::TcpListener;

type Hits = Arc<AtomicUsize>;

/// A spawned local server plus the counter of requests it has served.
pub struct TestServer {
    pub url: String,
    hits: Hits,
}

impl TestServer {
    /// Number of requests that reached the server.
    #[allow(dead_code)] // Used by some test files only
    pub fn hit_count(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Absolute URL for a path on this server.
    pub fn route(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

/// Binds a fresh server on an ephemeral port and serves it in the background.
pub async fn start_test_server() -> TestServer {
    let hits: Hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/json", get(json_doc))
        .route("/echo", any(echo))
        .route("/status/{code}", any(status_code))
        .route("/delay/{ms}", any(delay))
        .with_state(Arc::clone(&hits));

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    let addr = listener.local_addr().expect("Failed to get address");

    tokio::spawn(async move {
        axum::serve(listener, app)
            .await
            .expect("Server failed to start");
    });

    TestServer {
        url: format!("http://{addr}"),
        hits,
    }
}

/// Initializes test logging; safe to call from every test.
#[allow(dead_code)] // Used by some test files only
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

async fn json_doc(State(hits): State<Hits>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"errno":0}"#,
    )
}

async fn echo(
    State(hits): State<Hits>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);

    let headers: serde_json::Map<String, serde_json::Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_string(),
                serde_json::Value::String(String::from_utf8_lossy(value.as_bytes()).into_owned()),
            )
        })
        .collect();

    Json(serde_json::json!({
        "method": method.as_str(),
        "query": uri.query().unwrap_or(""),
        "headers": headers,
        "body": body,
    }))
}

async fn status_code(State(hits): State<Hits>, Path(code): Path<u16>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, format!("status {code}"))
}

async fn delay(State(hits): State<Hits>, Path(ms): Path<u64>) -> impl IntoResponse {
    hits.fetch_add(1, Ordering::SeqCst);
    tokio::time::sleep(Duration::from_millis(ms)).await;
    "done waiting"
}
