//! End-to-end tests: the real router against a stub upstream that speaks the
//! Gemini `generateContent` wire shape.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use daybrief_core::{GeminiClient, PromptProxy, RetryPolicy};
use daybrief_server::http::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Scripted upstream: answers `fail_status` for the first `fail_first`
/// calls, then a well-formed candidates envelope wrapping `text`.
#[derive(Clone)]
struct Stub {
    calls: Arc<AtomicU32>,
    fail_first: u32,
    fail_status: StatusCode,
    fail_body: &'static str,
    text: String,
}

impl Stub {
    fn ok(text: impl Into<String>) -> Self {
        Self {
            calls: Arc::new(AtomicU32::new(0)),
            fail_first: 0,
            fail_status: StatusCode::OK,
            fail_body: "",
            text: text.into(),
        }
    }

    fn overloaded_for(fail_first: u32, text: impl Into<String>) -> Self {
        Self {
            fail_first,
            fail_status: StatusCode::SERVICE_UNAVAILABLE,
            fail_body: "The model is overloaded. Please try again later.",
            ..Self::ok(text)
        }
    }

    fn always(fail_status: StatusCode, fail_body: &'static str) -> Self {
        Self {
            fail_first: u32::MAX,
            fail_status,
            fail_body,
            ..Self::ok("")
        }
    }

    fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

async fn stub_handler(State(stub): State<Stub>) -> axum::response::Response {
    let n = stub.calls.fetch_add(1, Ordering::SeqCst);
    if n < stub.fail_first {
        return (stub.fail_status, stub.fail_body).into_response();
    }
    Json(json!({
        "candidates": [
            { "content": { "parts": [ { "text": stub.text } ] } }
        ]
    }))
    .into_response()
}

/// Bind the stub on an ephemeral port and return its base URL.
async fn spawn_stub(stub: Stub) -> String {
    let app = Router::new()
        .route("/models/:call", post(stub_handler))
        .with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// The router under test, pointed at `upstream` with fast retry delays.
fn app(upstream: &str) -> Router {
    let client = GeminiClient::new("test-key").with_base_url(upstream);
    let proxy = PromptProxy::new(client)
        .with_retry(RetryPolicy::new(3).with_base_delay(Duration::from_millis(10)));
    create_router(AppState {
        proxy: Arc::new(proxy),
        model: "gemini-3-flash-preview".to_string(),
        start_time: std::time::Instant::now(),
    })
}

async fn post_generate(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn entry() -> Value {
    json!({
        "title": "Managing Oneself",
        "body": "Effective executives know where their time goes.",
        "actionPoint": "Track one week of your time."
    })
}

#[tokio::test]
async fn briefing_round_trip_returns_structured_result() {
    let briefing_text = json!({
        "modernRelevance": "X",
        "keyTakeaways": ["A", "B", "C"],
        "challengeQuestion": "Y?"
    })
    .to_string();
    let stub = Stub::ok(briefing_text);
    let upstream = spawn_stub(stub.clone()).await;

    let (status, body) = post_generate(
        app(&upstream),
        json!({ "action": "briefing", "entry": entry() }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"]["modernRelevance"], "X");
    assert_eq!(body["result"]["keyTakeaways"], json!(["A", "B", "C"]));
    assert_eq!(body["result"]["challengeQuestion"], "Y?");
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn insight_round_trip_returns_raw_text() {
    let stub = Stub::ok("Plain conversational answer.");
    let upstream = spawn_stub(stub.clone()).await;

    let (status, body) = post_generate(
        app(&upstream),
        json!({
            "action": "insight",
            "entry": entry(),
            "userQuery": "How does this apply to remote teams?"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Plain conversational answer.");
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn invalid_action_is_400_with_zero_upstream_calls() {
    let stub = Stub::ok("unused");
    let upstream = spawn_stub(stub.clone()).await;

    let (status, body) = post_generate(
        app(&upstream),
        json!({ "action": "summarize", "entry": entry() }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("invalid action"));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn missing_insight_query_is_400_with_zero_upstream_calls() {
    let stub = Stub::ok("unused");
    let upstream = spawn_stub(stub.clone()).await;

    let (status, body) = post_generate(
        app(&upstream),
        json!({ "action": "insight", "entry": entry(), "userQuery": "" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("userQuery"));
    assert_eq!(stub.calls(), 0);
}

#[tokio::test]
async fn permanent_upstream_error_maps_to_500_without_retry() {
    let stub = Stub::always(StatusCode::BAD_REQUEST, "API key not valid");
    let upstream = spawn_stub(stub.clone()).await;

    let (status, body) = post_generate(
        app(&upstream),
        json!({ "action": "briefing", "entry": entry() }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("400"));
    assert_eq!(stub.calls(), 1);
}

#[tokio::test]
async fn transient_overload_is_retried_then_succeeds() {
    let stub = Stub::overloaded_for(2, "Recovered answer.");
    let upstream = spawn_stub(stub.clone()).await;

    let (status, body) = post_generate(
        app(&upstream),
        json!({
            "action": "insight",
            "entry": entry(),
            "userQuery": "still there?"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"], "Recovered answer.");
    assert_eq!(stub.calls(), 3);
}

#[tokio::test]
async fn persistent_overload_exhausts_the_retry_budget() {
    let stub = Stub::always(StatusCode::SERVICE_UNAVAILABLE, "overloaded");
    let upstream = spawn_stub(stub.clone()).await;

    let (status, body) = post_generate(
        app(&upstream),
        json!({ "action": "briefing", "entry": entry() }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("retries exhausted"));
    assert_eq!(stub.calls(), 3);
}

#[tokio::test]
async fn malformed_briefing_payload_is_a_generation_failure() {
    let stub = Stub::ok("not json at all");
    let upstream = spawn_stub(stub.clone()).await;

    let (status, body) = post_generate(
        app(&upstream),
        json!({ "action": "briefing", "entry": entry() }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("generation failed"));
}

#[tokio::test]
async fn preflight_and_responses_allow_any_origin() {
    let stub = Stub::ok("unused");
    let upstream = spawn_stub(stub).await;

    let preflight = app(&upstream)
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/generate")
                .header(header::ORIGIN, "http://localhost:5173")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(preflight.status().is_success());
    assert_eq!(
        preflight
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );

    let upstream2 = spawn_stub(Stub::ok("hello")).await;
    let response = app(&upstream2)
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/generate")
                .header(header::CONTENT_TYPE, "application/json")
                .header(header::ORIGIN, "http://localhost:5173")
                .body(Body::from(
                    json!({
                        "action": "insight",
                        "entry": entry(),
                        "userQuery": "hi"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}

#[tokio::test]
async fn health_reports_version_and_model() {
    let upstream = spawn_stub(Stub::ok("unused")).await;
    let response = app(&upstream)
        .oneshot(
            Request::builder()
                .method(Method::GET)
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["healthy"], true);
    assert_eq!(body["model"], "gemini-3-flash-preview");
}
