// Integration tests for the HTTP control surface
//
// The router is exercised in-process with tower's oneshot, the same way the
// route/navigation collaborator drives it over the wire.

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;
use uuid::Uuid;

use viva_screen::{
    create_router, AppState, Capabilities, CaptureConstraints, SyntheticCamera,
};

fn test_app() -> axum::Router {
    let capabilities = Capabilities {
        capture: Some(Arc::new(SyntheticCamera::new(
            Duration::from_millis(10),
            64,
        ))),
        speech: None,
        fullscreen: None,
    };
    let state = AppState::new(
        capabilities,
        CaptureConstraints::default(),
        "/tests".to_string(),
    );
    create_router(state)
}

async fn request(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(value) => builder.body(Body::from(value.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn health_check_works() {
    let app = test_app();
    let (status, body) = request(&app, "GET", "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn start_interview_returns_an_idle_snapshot() {
    let app = test_app();
    let (status, body) = request(
        &app,
        "POST",
        "/interviews/start",
        Some(json!({ "test_id": "java-screening" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["snapshot"]["test_id"], "java-screening");
    assert_eq!(body["snapshot"]["phase"], "idle");
    // Built-in default question set when the collaborator sends none
    assert_eq!(body["snapshot"]["question_total"], 3);
    assert_eq!(body["snapshot"]["question_index"], 0);
    assert!(body["session_id"].is_string());
}

#[tokio::test]
async fn out_of_order_commands_conflict() {
    let app = test_app();
    let (_, started) = request(
        &app,
        "POST",
        "/interviews/start",
        Some(json!({ "test_id": "sql-screening" })),
    )
    .await;
    let session_id = started["session_id"].as_str().unwrap().to_string();

    // StopRecording before anything started
    let (status, body) = request(
        &app,
        "POST",
        &format!("/interviews/{}/record/stop", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("rejected"));
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = test_app();
    let (status, _) = request(
        &app,
        "GET",
        &format!("/interviews/{}/status", Uuid::new_v4()),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn full_flow_over_http_retires_the_session() {
    let app = test_app();
    let (_, started) = request(&app, "POST", "/interviews/start", Some(json!({}))).await;
    let session_id = started["session_id"].as_str().unwrap().to_string();

    let (status, _) = request(
        &app,
        "POST",
        &format!("/interviews/{}/record/start", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Poll until the async acquisition binds and the session records
    let mut recording = false;
    for _ in 0..100 {
        let (_, body) = request(
            &app,
            "GET",
            &format!("/interviews/{}/status", session_id),
            None,
        )
        .await;
        if body["snapshot"]["phase"] == "recording" {
            recording = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert!(recording, "session never started recording");

    let (status, body) = request(
        &app,
        "POST",
        &format!("/interviews/{}/record/stop", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["snapshot"]["phase"], "recorded");
    assert_eq!(body["snapshot"]["has_artifact"], true);

    let (status, body) = request(
        &app,
        "POST",
        &format!("/interviews/{}/answer", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["answer"]["transcript"].is_string());

    let (status, body) = request(
        &app,
        "POST",
        &format!("/interviews/{}/submit", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["redirect"], "/tests");
    assert_eq!(body["summary"]["answers"].as_array().unwrap().len(), 1);

    // The session was retired from the map
    let (status, _) = request(
        &app,
        "GET",
        &format!("/interviews/{}/status", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn abort_retires_the_session() {
    let app = test_app();
    let (_, started) = request(&app, "POST", "/interviews/start", Some(json!({}))).await;
    let session_id = started["session_id"].as_str().unwrap().to_string();

    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/interviews/{}", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = request(
        &app,
        "GET",
        &format!("/interviews/{}/status", session_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
