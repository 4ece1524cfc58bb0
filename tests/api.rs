//! HTTP-level tests against the in-memory repository.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use cycle_insights_backend::repository::InMemoryCycleRepository;
use cycle_insights_backend::routes;

fn app() -> Router {
    routes::app(Arc::new(InMemoryCycleRepository::new()))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

async fn log_cycle(app: &Router, user_id: Uuid, start: &str, end: &str) -> (StatusCode, Value) {
    let body = json!({ "user_id": user_id, "start_date": start, "end_date": end });
    let request = Request::post("/cycle")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, path: &str, user_id: Uuid) -> (StatusCode, Value) {
    let request = Request::get(format!("{path}?user_id={user_id}")).body(Body::empty()).unwrap();
    send(app, request).await
}

#[tokio::test]
async fn health_check() {
    let app = app();
    let (status, body) = send(&app, Request::get("/health").body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("✅ Backend up".into()));
}

#[tokio::test]
async fn logging_a_cycle_returns_the_record() {
    let app = app();
    let user = Uuid::new_v4();

    let (status, body) = log_cycle(&app, user, "2024-03-01", "2024-03-05").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["start_date"], "2024-03-01");
    assert_eq!(body["end_date"], "2024-03-05");
    assert_eq!(body["user_id"], user.to_string());
}

#[tokio::test]
async fn end_before_start_is_rejected_and_not_stored() {
    let app = app();
    let user = Uuid::new_v4();

    let (status, _) = log_cycle(&app, user, "2024-03-05", "2024-03-01").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (_, cycles) = get(&app, "/cycles", user).await;
    assert_eq!(cycles, json!([]));
}

#[tokio::test]
async fn cycles_are_listed_chronologically() {
    let app = app();
    let user = Uuid::new_v4();
    log_cycle(&app, user, "2023-03-15", "2023-03-19").await;
    log_cycle(&app, user, "2023-01-01", "2023-01-05").await;

    let (status, cycles) = get(&app, "/cycles", user).await;
    assert_eq!(status, StatusCode::OK);
    let starts: Vec<&str> = cycles.as_array().unwrap().iter().map(|c| c["start_date"].as_str().unwrap()).collect();
    assert_eq!(starts, vec!["2023-01-01", "2023-03-15"]);
}

#[tokio::test]
async fn prediction_without_history_is_null() {
    let app = app();
    let (status, body) = get(&app, "/cycle/prediction", Uuid::new_v4()).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predicted_start"], Value::Null);
    assert_eq!(body["average_cycle_length"], 28);
    assert_eq!(body["based_on_cycles"], 0);
}

#[tokio::test]
async fn prediction_uses_average_gap() {
    let app = app();
    let user = Uuid::new_v4();
    log_cycle(&app, user, "2023-03-15", "2023-03-19").await;
    log_cycle(&app, user, "2023-01-01", "2023-01-05").await;
    log_cycle(&app, user, "2023-02-01", "2023-02-04").await;

    let (_, body) = get(&app, "/cycle/prediction", user).await;
    assert_eq!(body["predicted_start"], "2023-04-20");
    assert_eq!(body["average_cycle_length"], 36);
}

#[tokio::test]
async fn risk_needs_three_cycles() {
    let app = app();
    let user = Uuid::new_v4();
    log_cycle(&app, user, "2023-01-01", "2023-01-05").await;

    let (status, body) = get(&app, "/risk", user).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["tier"], "insufficient_cycles");
    assert_eq!(body["label"], "Insufficient Data (Need 3+ cycles)");
    assert_eq!(body["color"], "gray");
}

#[tokio::test]
async fn regular_cycles_are_low_risk() {
    let app = app();
    let user = Uuid::new_v4();
    log_cycle(&app, user, "2023-01-01", "2023-01-05").await;
    log_cycle(&app, user, "2023-01-29", "2023-02-02").await;
    log_cycle(&app, user, "2023-02-26", "2023-03-02").await;

    let (_, body) = get(&app, "/risk", user).await;
    assert_eq!(body["label"], "Low Risk");
    assert_eq!(body["color"], "green");
    assert_eq!(body["reasons"], json!([]));
    assert_eq!(body["average_cycle_length"], 28.0);
}

#[tokio::test]
async fn long_cycles_are_high_risk() {
    let app = app();
    let user = Uuid::new_v4();
    log_cycle(&app, user, "2023-01-01", "2023-01-05").await;
    log_cycle(&app, user, "2023-02-01", "2023-02-05").await;
    log_cycle(&app, user, "2023-03-15", "2023-03-19").await;

    let (_, body) = get(&app, "/risk", user).await;
    assert_eq!(body["label"], "High Risk");
    assert_eq!(body["color_hex"], "#ff4b4b");
    assert_eq!(body["reasons"], json!(["long_cycles", "irregular"]));
    assert!(body["disclaimer"].as_str().unwrap().contains("Not a medical diagnosis"));
}

#[tokio::test]
async fn stats_are_scoped_to_the_user() {
    let app = app();
    let user = Uuid::new_v4();
    log_cycle(&app, user, "2023-01-01", "2023-01-06").await;
    log_cycle(&app, user, "2023-03-03", "2023-03-06").await;
    log_cycle(&app, Uuid::new_v4(), "2023-02-01", "2023-02-05").await;

    let (status, body) = get(&app, "/cycle-stats", user).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cycle_stats"].as_array().unwrap().len(), 2);
    assert_eq!(body["average_period_length"], 5.0);
    assert_eq!(body["average_cycle_length"], 61.0);

    let durations: Vec<i64> = body["history"].as_array().unwrap().iter().map(|m| m["duration"].as_i64().unwrap()).collect();
    assert_eq!(durations, vec![6, 0, 4]);
}

#[tokio::test]
async fn missing_user_id_is_a_client_error() {
    let app = app();
    let request = Request::get("/risk").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
