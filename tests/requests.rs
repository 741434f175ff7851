//! End-to-end request semantics against a local server: verbs, headers,
//! query building, auth, status classification, and body transforms.

mod helpers;

use courier::{Body, Client, Credentials, Method, RequestConfig, ResponseType};
use helpers::{init_logging, start_test_server};
use serde_json::json;

/// The echoed request document returned by the `/echo` route.
fn echoed(response: &courier::Response) -> serde_json::Value {
    response
        .data
        .as_json()
        .expect("echo responses are JSON")
        .clone()
}

#[tokio::test]
async fn get_parses_json_by_default() {
    init_logging();
    let server = start_test_server().await;
    let client = Client::new();

    let response = client.get(&server.route("/json")).await.unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.data, Body::Json(json!({"errno": 0})));
    assert_eq!(
        response.headers.get("content-type"),
        Some("application/json")
    );
}

#[tokio::test]
async fn effective_config_normalizes_the_method() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client
        .request(RequestConfig::new(server.route("/json")).method("GET".parse().unwrap()))
        .await
        .unwrap();

    // The merged config renders its method lowercase regardless of the
    // casing it was parsed from.
    assert_eq!(response.config.method.as_str(), "get");
}

#[tokio::test]
async fn default_accept_header_is_sent() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client.get(&server.route("/echo")).await.unwrap();
    let echo = echoed(&response);

    assert_eq!(
        echo["headers"]["accept"],
        json!("application/json, text/plain, */*")
    );
}

#[tokio::test]
async fn call_site_header_overrides_default_case_insensitively() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client
        .request(
            RequestConfig::new(server.route("/echo")).header("ACCEPT", "application/vnd.test"),
        )
        .await
        .unwrap();
    let echo = echoed(&response);

    assert_eq!(echo["headers"]["accept"], json!("application/vnd.test"));
}

#[tokio::test]
async fn post_serializes_json_and_sets_content_type() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client
        .post(
            &server.route("/echo"),
            Body::Json(json!({"name": "widget", "count": 2})),
        )
        .await
        .unwrap();
    let echo = echoed(&response);

    assert_eq!(echo["method"], json!("POST"));
    assert_eq!(
        echo["headers"]["content-type"],
        json!("application/json;charset=utf-8")
    );
    let body: serde_json::Value = serde_json::from_str(echo["body"].as_str().unwrap()).unwrap();
    assert_eq!(body, json!({"name": "widget", "count": 2}));
}

#[tokio::test]
async fn form_bodies_are_urlencoded() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client
        .post(
            &server.route("/echo"),
            Body::Form(vec![
                ("name".to_string(), "a b".to_string()),
                ("kind".to_string(), "x&y".to_string()),
            ]),
        )
        .await
        .unwrap();
    let echo = echoed(&response);

    assert_eq!(
        echo["headers"]["content-type"],
        json!("application/x-www-form-urlencoded")
    );
    assert_eq!(echo["body"], json!("name=a+b&kind=x%26y"));
}

#[tokio::test]
async fn params_are_appended_to_the_query() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client
        .request(
            RequestConfig::new(server.route("/echo"))
                .param("page", "2")
                .param("tag", "a b"),
        )
        .await
        .unwrap();

    assert_eq!(echoed(&response)["query"], json!("page=2&tag=a+b"));
}

#[tokio::test]
async fn basic_auth_reaches_the_wire() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client
        .request(
            RequestConfig::new(server.route("/echo"))
                .auth(Credentials::new("Aladdin", "open sesame")),
        )
        .await
        .unwrap();

    assert_eq!(
        echoed(&response)["headers"]["authorization"],
        json!("Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==")
    );
}

#[tokio::test]
async fn failing_status_rejects_with_the_response_attached() {
    let server = start_test_server().await;
    let client = Client::new();

    let err = client.get(&server.route("/status/404")).await.unwrap_err();

    assert!(err.is_status());
    assert_eq!(err.to_string(), "Request failed with status code 404");
    let response = err.response().unwrap();
    assert_eq!(response.status, 404);
    assert_eq!(response.data, Body::Text("status 404".to_string()));
}

#[tokio::test]
async fn custom_validate_status_widens_success() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client
        .request(
            RequestConfig::new(server.route("/status/404")).validate_status(|status| status < 500),
        )
        .await
        .unwrap();

    assert_eq!(response.status, 404);
}

#[tokio::test]
async fn non_json_bodies_pass_through_as_text() {
    let server = start_test_server().await;
    let client = Client::new();

    // "status 200" is not parseable JSON, so the default response transform
    // leaves it alone.
    let response = client.get(&server.route("/status/200")).await.unwrap();
    assert_eq!(response.data, Body::Text("status 200".to_string()));
}

#[tokio::test]
async fn replacing_response_transforms_keeps_raw_text() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client
        .request(RequestConfig::new(server.route("/json")).transform_response(Vec::new()))
        .await
        .unwrap();

    assert_eq!(response.data, Body::Text(r#"{"errno":0}"#.to_string()));
}

#[tokio::test]
async fn bytes_response_type_returns_raw_bytes() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client
        .request(RequestConfig::new(server.route("/json")).response_type(ResponseType::Bytes))
        .await
        .unwrap();

    assert_eq!(
        response.data,
        Body::Bytes(br#"{"errno":0}"#.to_vec())
    );
}

#[tokio::test]
async fn instance_base_url_resolves_relative_requests() {
    let server = start_test_server().await;
    let mut client = Client::new();
    client.defaults_mut().base_url = Some(server.url.clone());

    let response = client.get("/json").await.unwrap();
    assert_eq!(response.data, Body::Json(json!({"errno": 0})));

    // Absolute URLs bypass the base.
    let response = client.get(&server.route("/echo")).await.unwrap();
    assert_eq!(echoed(&response)["method"], json!("GET"));
}

#[tokio::test]
async fn unreachable_port_is_a_network_error() {
    // Bind and immediately drop a listener to get a port nothing serves.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = Client::new();
    let err = client.get(&format!("http://{addr}/json")).await.unwrap_err();

    assert!(err.is_network());
    assert_eq!(err.to_string(), "Network Error");
    assert!(err.config().is_some());
    assert!(err.response().is_none());
}

#[tokio::test]
async fn head_requests_have_no_body() {
    let server = start_test_server().await;
    let client = Client::new();

    let response = client.head(&server.route("/json")).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.data, Body::Text(String::new()));
}

#[tokio::test]
async fn instance_default_headers_apply_per_method() {
    let server = start_test_server().await;
    let mut client = Client::new();
    client
        .defaults_mut()
        .headers
        .common
        .set("X-Client", "courier-tests");
    client
        .defaults_mut()
        .headers
        .method_mut(Method::Post)
        .set("X-Write", "yes");

    let get = client.get(&server.route("/echo")).await.unwrap();
    let get_echo = echoed(&get);
    assert_eq!(get_echo["headers"]["x-client"], json!("courier-tests"));
    assert!(get_echo["headers"].get("x-write").is_none());

    let post = client.post(&server.route("/echo"), "data").await.unwrap();
    let post_echo = echoed(&post);
    assert_eq!(post_echo["headers"]["x-write"], json!("yes"));
}
