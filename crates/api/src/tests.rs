//! Handler-level tests against an in-memory repository.
//!
//! The ML service base URL points at a closed local port, so every
//! predict call exercises the fallback path without network mocking.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use crate::{create_router, AppState, Settings};
use storage::Repository;

async fn test_app() -> Router {
    let repository = Repository::in_memory().await.unwrap();
    repository.init_schema().await.unwrap();

    let mut settings = Settings::load().unwrap();
    // Nothing listens on port 9; the primary path always fails fast.
    settings.ml_service.base_url = "http://127.0.0.1:9".to_string();
    settings.ml_service.timeout_secs = 1;

    create_router(Arc::new(AppState::new(&settings, repository).unwrap()))
}

async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Register a user and return a usable bearer token.
async fn register(app: &Router, email: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": email, "password": "password123", "name": "Ada" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}

fn sample_submission() -> Value {
    json!({
        "sleepHours": 5,
        "attendancePercentage": 65,
        "studyHours": 9,
        "stressLevel": 8,
        "deadlinesCount": 6
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let (status, body) = request(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["message"], "StudyTwin API is running");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_register_login_me_flow() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    let (status, body) = request(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["name"], "Ada");

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn test_register_missing_field() {
    let app = test_app().await;
    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "ada@example.com", "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = test_app().await;
    register(&app, "ada@example.com").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({ "email": "ada@example.com", "password": "other", "name": "Eve" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn test_login_bad_password() {
    let app = test_app().await;
    register(&app, "ada@example.com").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "email": "ada@example.com", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app().await;

    let (status, body) = request(&app, "GET", "/api/student/history", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Authentication required");

    let (status, body) =
        request(&app, "GET", "/api/student/history", Some("not-a-token"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired token");
}

#[tokio::test]
async fn test_submit_data_and_history() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/student/data",
        Some(&token),
        Some(sample_submission()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Data submitted successfully");
    assert_eq!(body["data"]["sleepHours"], 5.0);
    assert_eq!(body["data"]["deadlinesCount"], 6);

    let (status, body) = request(&app, "GET", "/api/student/history", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["attendancePercentage"], 65.0);
    assert!(records[0]["createdAt"].is_string());
}

#[tokio::test]
async fn test_submit_data_rejects_out_of_range() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/student/data",
        Some(&token),
        Some(json!({
            "sleepHours": 25,
            "attendancePercentage": 65,
            "studyHours": 9,
            "stressLevel": 8,
            "deadlinesCount": 6
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].as_str().unwrap().contains("sleep_hours"));
}

#[tokio::test]
async fn test_submit_data_missing_field() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/student/data",
        Some(&token),
        Some(json!({ "sleepHours": 7 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");
}

#[tokio::test]
async fn test_predict_uses_fallback_when_primary_unreachable() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    // Submit metrics so the prediction has a row to link to.
    let (status, _) = request(
        &app,
        "POST",
        "/api/student/data",
        Some(&token),
        Some(sample_submission()),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = request(
        &app,
        "POST",
        "/api/predict",
        Some(&token),
        Some(sample_submission()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["burnoutRisk"], "High");
    assert_eq!(body["attendanceRisk"], 80.0);
    assert_eq!(body["examPerformance"], 63.5);

    let (status, body) = request(&app, "GET", "/api/predict/latest", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["burnoutRisk"], "High");
    assert!(body["createdAt"].is_string());

    let (status, body) = request(&app, "GET", "/api/predict/history", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_predict_without_submission_is_not_persisted() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/predict",
        Some(&token),
        Some(sample_submission()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["burnoutRisk"], "High");

    let (status, body) = request(&app, "GET", "/api/predict/latest", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "No predictions found");
}

#[tokio::test]
async fn test_predict_rejects_out_of_range() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    let (status, _) = request(
        &app,
        "POST",
        "/api/predict",
        Some(&token),
        Some(json!({
            "sleepHours": 7,
            "attendancePercentage": 90,
            "studyHours": 4,
            "stressLevel": 11,
            "deadlinesCount": 1
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_alerts_derived_from_latest_prediction() {
    let app = test_app().await;
    let token = register(&app, "ada@example.com").await;

    // No predictions yet: no alerts.
    let (status, body) = request(&app, "GET", "/api/alerts", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());

    request(&app, "POST", "/api/student/data", Some(&token), Some(sample_submission())).await;
    request(&app, "POST", "/api/predict", Some(&token), Some(sample_submission())).await;

    let (status, body) = request(&app, "GET", "/api/alerts", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let alerts = body.as_array().unwrap();
    let titles: Vec<&str> = alerts.iter().map(|a| a["title"].as_str().unwrap()).collect();
    assert!(titles.contains(&"High Burnout Risk Detected"));
    assert!(titles.contains(&"Critical Attendance Risk"));
    assert!(titles.contains(&"Exam Performance Below Average"));
    assert_eq!(alerts[0]["type"], "danger");
}
