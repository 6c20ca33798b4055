//! HTTP contract tests for the Detoxify API
//!
//! Drives the full router in-process with `tower::ServiceExt::oneshot`.

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use detoxify_mediator::{
    create_router, AnalysisOrchestrator, AnalysisResult, AppError, AppResult, AppState,
    HeuristicAnalyzer, ProviderTag, Suggestions, ToxicityProvider,
};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

#[derive(Clone, Copy)]
enum Mode {
    Clean,
    Unauthorized,
    Panic,
}

struct CountingProvider {
    mode: Mode,
    calls: AtomicUsize,
}

impl CountingProvider {
    fn new(mode: Mode) -> Arc<Self> {
        Arc::new(Self {
            mode,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl ToxicityProvider for CountingProvider {
    fn name(&self) -> &'static str {
        "counting"
    }

    async fn analyze(&self, _text: &str, _caller_key: Option<&str>) -> AppResult<AnalysisResult> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            Mode::Clean => Ok(AnalysisResult::from_tier(
                ProviderTag::Groq,
                Vec::new(),
                Suggestions::default(),
            )),
            Mode::Unauthorized => Err(AppError::provider_status(401)),
            Mode::Panic => panic!("provider exploded"),
        }
    }
}

fn app_with(provider: Arc<CountingProvider>) -> Router {
    let orchestrator =
        AnalysisOrchestrator::new(provider, HeuristicAnalyzer::new(), Duration::from_secs(2));
    create_router(Arc::new(AppState::new(Arc::new(orchestrator), true)))
}

fn heuristic_app() -> Router {
    let orchestrator = AnalysisOrchestrator::heuristic_only(HeuristicAnalyzer::new());
    create_router(Arc::new(AppState::new(Arc::new(orchestrator), false)))
}

fn post_analyze(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/analyze")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_toxic_message_with_provider_disabled() {
    let (status, body) = send(
        heuristic_app(),
        post_analyze(json!({"text": "you are so stupid"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isToxic"], json!(true));
    assert_eq!(body["matches"], json!(["stupid"]));
    assert_eq!(body["provider"], json!("local_heuristic"));
    assert_eq!(body["kindSuggestion"], body["suggestions"]["kind"]);
}

#[tokio::test]
async fn test_empty_text_returns_neutral_without_tiers() {
    let provider = CountingProvider::new(Mode::Clean);

    for payload in [json!({"text": ""}), json!({}), json!({"groqKey": "gsk_abc"})] {
        let (status, body) = send(app_with(provider.clone()), post_analyze(payload.to_string())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isToxic"], json!(false));
        assert_eq!(body["matches"], json!([]));
        assert_eq!(body["kindSuggestion"], json!(""));
        assert!(body.get("error").is_none());
    }

    assert_eq!(provider.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_clean_message_from_provider() {
    let provider = CountingProvider::new(Mode::Clean);
    let (status, body) = send(
        app_with(provider.clone()),
        post_analyze(json!({"text": "hello, how are you?"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isToxic"], json!(false));
    assert_eq!(
        body["suggestions"],
        json!({"kind": "", "funny": "", "professional": ""})
    );
    assert_eq!(body["provider"], json!("groq"));
    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_provider_failure_is_absorbed() {
    let provider = CountingProvider::new(Mode::Unauthorized);
    let (status, body) = send(
        app_with(provider),
        post_analyze(json!({"text": "I hate you", "groqKey": "gsk_revoked"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["provider"], json!("local_heuristic"));
    assert_eq!(body["matches"], json!(["hate"]));
    assert!(body.get("error").is_none());
}

#[tokio::test]
async fn test_malformed_payload_is_server_error_with_neutral_shape() {
    for raw in ["{not json", r#"{"text": 42}"#] {
        let (status, body) = send(heuristic_app(), post_analyze(raw)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "payload: {}", raw);
        assert_eq!(body["isToxic"], json!(false));
        assert_eq!(body["matches"], json!([]));
        assert_eq!(body["kindSuggestion"], json!(""));
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_panic_in_pipeline_is_contained() {
    let (status, body) = send(
        app_with(CountingProvider::new(Mode::Panic)),
        post_analyze(json!({"text": "anything"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["isToxic"], json!(false));
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_health_check() {
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(heuristic_app(), request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("healthy"));
    assert_eq!(body["data"]["provider_configured"], json!(false));
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();
    let response = heuristic_app().oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-123");

    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = heuristic_app().oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_cors_preflight_allows_extension_origin() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/analyze")
        .header(header::ORIGIN, "chrome-extension://abcdef")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = heuristic_app().oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
