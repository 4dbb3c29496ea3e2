#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use speech_proxy::{SpeechProxyConfig, StaticCredentials, router};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TRANSCRIBE_PATH: &str = "/v1/speech/transcribe";
pub const SYNTHESIZE_PATH: &str = "/v1/speech/synthesize";

pub struct TestHarness {
    pub mock_server: MockServer,
}

impl TestHarness {
    pub async fn new() -> Self {
        let _ = tracing_subscriber::fmt::try_init();
        Self {
            mock_server: MockServer::start().await,
        }
    }

    pub fn config(&self) -> SpeechProxyConfig {
        SpeechProxyConfig::new(StaticCredentials::new("test-api-key", "test-org"))
            .with_api_base(self.mock_server.uri())
    }

    pub fn config_without_credentials(&self) -> SpeechProxyConfig {
        SpeechProxyConfig::new(StaticCredentials::missing()).with_api_base(self.mock_server.uri())
    }

    pub fn router(&self) -> Router {
        router(self.config())
    }

    pub async fn mount_json_response(&self, endpoint: &str, response: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .and(header("Authorization", "Bearer test-api-key"))
            .and(header("X-Organization-Id", "test-org"))
            .and(header("Content-Type", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(&response))
            .expect(1)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn mount_error_response(&self, endpoint: &str, status: u16, body: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(status).set_body_json(&body))
            .expect(1)
            .mount(&self.mock_server)
            .await;
    }

    pub async fn expect_no_upstream_calls(&self) {
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&self.mock_server)
            .await;
    }

    /// Body of the single request the upstream received.
    pub async fn upstream_body(&self) -> serde_json::Value {
        let requests = self
            .mock_server
            .received_requests()
            .await
            .expect("request recording enabled");
        assert_eq!(requests.len(), 1, "expected exactly one upstream request");
        requests[0].body_json().unwrap()
    }
}

pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    post_raw(uri, serde_json::to_string(&body).unwrap())
}

pub fn post_raw(uri: &str, body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub async fn response_to_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body_bytes).unwrap()
}

pub async fn into_status_and_json(
    response: axum::http::Response<Body>,
) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    (status, response_to_json(response).await)
}

/// Every response, success or failure, carries timing metadata.
pub fn assert_timing_metadata(body: &serde_json::Value) {
    assert!(
        body["responseTime"].as_u64().is_some(),
        "responseTime should be a non-negative integer: {body}"
    );
    let timestamp = body["timestamp"].as_str().expect("timestamp should be a string");
    chrono::DateTime::parse_from_rfc3339(timestamp).expect("timestamp should be ISO-8601");
}
