// Tests for the practice session HTTP API

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use common::{question, settle, MockApi, MockCapture};
use pte_practice::config::Config;
use pte_practice::context::{AppContext, AuthSession};
use pte_practice::http::{create_router, AppState, CaptureProvider};
use pte_practice::session::{SessionSnapshot, SessionState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn app(api: &MockApi, capture: &MockCapture) -> Router {
    let ctx = AppContext::new(
        Config::default(),
        AuthSession::default(),
        Arc::new(api.clone()),
    );
    let capture = capture.clone();
    let provider: CaptureProvider = Arc::new(move |_session_id: &str| capture.boxed());
    create_router(AppState::with_capture(ctx, provider))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn open_session(app: &Router, session_id: &str) -> SessionSnapshot {
    let (status, body) = send(
        app,
        "POST",
        "/practice/sessions",
        Some(json!({"question_id": "q1", "session_id": session_id})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_value(body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let app = app(&MockApi::default(), &MockCapture::new());
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_full_attempt_over_http() {
    let api = MockApi::with_questions(vec![question("q1", "the cat sat")]);
    let capture = MockCapture::new();
    capture.script("the dog sat");
    let app = app(&api, &capture);

    let snapshot = open_session(&app, "s1").await;
    assert_eq!(snapshot.state, SessionState::Prep);
    assert_eq!(snapshot.timer.time_left, 35);

    let (status, body) = send(&app, "POST", "/practice/sessions/s1/skip", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "recording");

    let (status, body) = send(&app, "POST", "/practice/sessions/s1/stop", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "result");
    assert_eq!(body["result"]["score"], 10);
    assert_eq!(body["result"]["wordAnalysis"][1]["status"], "bad");

    settle().await;
    let (status, body) = send(&app, "GET", "/practice/questions/q1/attempts", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_action_conflicts() {
    let api = MockApi::with_questions(vec![question("q1", "the cat sat")]);
    let app = app(&api, &MockCapture::new());
    open_session(&app, "s1").await;

    let (status, body) = send(&app, "POST", "/practice/sessions/s1/stop", None).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("prep"));
}

#[tokio::test]
async fn test_duplicate_session_conflicts() {
    let api = MockApi::with_questions(vec![question("q1", "the cat sat")]);
    let app = app(&api, &MockCapture::new());
    open_session(&app, "s1").await;

    let (status, _) = send(
        &app,
        "POST",
        "/practice/sessions",
        Some(json!({"question_id": "q1", "session_id": "s1"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_concurrent_opens_of_same_session_conflict() {
    let api = MockApi::with_questions(vec![question("q1", "the cat sat")]);
    let capture = MockCapture::new();
    let app = app(&api, &capture);
    let body = json!({"question_id": "q1", "session_id": "s1"});

    // Both requests pass the early duplicate check before either registers.
    let (first, second) = tokio::join!(
        send(&app, "POST", "/practice/sessions", Some(body.clone())),
        send(&app, "POST", "/practice/sessions", Some(body)),
    );

    let mut statuses = vec![first.0, second.0];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::CONFLICT]);

    // The surviving session still answers
    let (status, body) = send(&app, "GET", "/practice/sessions/s1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "prep");

    let (status, _) = send(&app, "DELETE", "/practice/sessions/s1", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_question_and_session() {
    let app = app(&MockApi::default(), &MockCapture::new());

    let (status, _) = send(
        &app,
        "POST",
        "/practice/sessions",
        Some(json!({"question_id": "missing"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", "/practice/sessions/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_capture_unavailable_is_503() {
    let api = MockApi::with_questions(vec![question("q1", "the cat sat")]);
    let app = app(&api, &MockCapture::unavailable());
    open_session(&app, "s1").await;

    let (status, _) = send(&app, "POST", "/practice/sessions/s1/skip", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    let (_, body) = send(&app, "GET", "/practice/sessions/s1", None).await;
    assert_eq!(body["state"], "prep");
    assert!(body["notice"].is_string());
}

#[tokio::test]
async fn test_one_line_and_close() {
    let api = MockApi::with_questions(vec![question("q1", "The sun rose. The birds sang.")]);
    let capture = MockCapture::new();
    let app = app(&api, &capture);
    open_session(&app, "s1").await;

    let (status, body) = send(
        &app,
        "POST",
        "/practice/sessions/s1/one-line",
        Some(json!({"enabled": true, "highlight": "The birds sang."})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["one_line"], true);

    let (_, body) = send(&app, "POST", "/practice/sessions/s1/skip", None).await;
    assert_eq!(body["timer"]["max_time"], 15);

    let (status, _) = send(&app, "DELETE", "/practice/sessions/s1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(capture.stop_calls(), 1);

    let (status, _) = send(&app, "GET", "/practice/sessions/s1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
