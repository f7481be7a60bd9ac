// HTTP API tests — requests driven through the router with tower's oneshot.
//
// Each test builds a fresh router over an in-memory store, so no server
// is started and nothing touches the filesystem.

#![cfg(feature = "web")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use mailtopic::config::Config;
use mailtopic::store::MemoryStore;
use mailtopic::web::{build_router, AppState};

fn app() -> Router {
    let store = Arc::new(MemoryStore::new());
    build_router(AppState::new(Config::default(), store.clone(), store))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: &Router, uri: &str, payload: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    send(app, request).await
}

async fn with_topics() -> Router {
    let app = app();
    for (name, description) in [
        ("promotions", "Deals!!!"),
        ("work", "Meetings and deadlines"),
    ] {
        let (status, _) = post(
            &app,
            "/api/v1/topics",
            json!({ "name": name, "description": description }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }
    app
}

// ============================================================
// Health and introspection
// ============================================================

#[tokio::test]
async fn health_reports_service_name() {
    let (status, body) = get(&app(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "service": "ML Server" }));
}

#[tokio::test]
async fn features_lists_builtin_generators() {
    let (status, body) = get(&app(), "/api/v1/features").await;
    assert_eq!(status, StatusCode::OK);

    let names: Vec<&str> = body["available_generators"]
        .as_array()
        .unwrap()
        .iter()
        .map(|g| g["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["spam", "word_length", "email_embeddings", "raw_email"]);
}

#[tokio::test]
async fn pipeline_info_reflects_topics() {
    let app = with_topics().await;
    let (status, body) = get(&app, "/api/v1/pipeline/info").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available_topics"], json!(["promotions", "work"]));
    assert_eq!(
        body["topics_with_descriptions"]["work"],
        "Meetings and deadlines"
    );
    assert_eq!(body["decay_scale"], 50.0);
}

// ============================================================
// Topics
// ============================================================

#[tokio::test]
async fn add_topic_then_duplicate_conflicts() {
    let app = app();
    let payload = json!({ "name": "work", "description": "Meetings" });

    let (status, body) = post(&app, "/api/v1/topics", payload.clone()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Topic 'work' added");
    assert_eq!(body["topics"], json!(["work"]));

    let (status, body) = post(&app, "/api/v1/topics", payload).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("work"));

    let (_, body) = get(&app, "/api/v1/topics").await;
    assert_eq!(body["topics"], json!(["work"]));
}

// ============================================================
// Emails
// ============================================================

#[tokio::test]
async fn store_email_returns_position() {
    let app = with_topics().await;

    let (status, body) = post(
        &app,
        "/api/v1/emails",
        json!({ "subject": "Sync", "body": "At noon", "ground_truth": "work" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "message": "Email stored", "email_id": 0 }));

    let (status, body) = post(
        &app,
        "/api/v1/emails",
        json!({ "subject": "Unlabeled", "body": "No label here" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email_id"], 1);

    let (_, body) = get(&app, "/api/v1/emails").await;
    assert_eq!(body["count"], 2);
    assert_eq!(body["emails"][0]["ground_truth"], "work");
}

#[tokio::test]
async fn store_email_with_unknown_label_is_rejected() {
    let app = with_topics().await;
    let (status, body) = post(
        &app,
        "/api/v1/emails",
        json!({ "subject": "a", "body": "b", "ground_truth": "travel" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("travel"));

    let (_, body) = get(&app, "/api/v1/emails").await;
    assert_eq!(body["count"], 0);
}

// ============================================================
// Classification
// ============================================================

#[tokio::test]
async fn classify_defaults_to_topic_mode() {
    let app = with_topics().await;
    let (status, body) = post(
        &app,
        "/api/v1/emails/classify",
        json!({ "subject": "SALE", "body": "50% off now!" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "topic");
    assert_eq!(body["predicted_topic"], "promotions");
    assert_eq!(body["topic_scores"]["promotions"], 1.0);
    assert_eq!(body["features"]["spam_has_spam_words"], 0);
    assert_eq!(body["available_topics"], json!(["promotions", "work"]));
}

#[tokio::test]
async fn classify_with_generator_subset() {
    let app = with_topics().await;
    let (status, body) = post(
        &app,
        "/api/v1/emails/classify",
        json!({
            "subject": "Win a FREE prize",
            "body": "Click now",
            "generators": ["spam"],
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["features"], json!({ "spam_has_spam_words": 1 }));
}

#[tokio::test]
async fn classify_with_unknown_generator_is_bad_request() {
    let app = with_topics().await;
    let (status, body) = post(
        &app,
        "/api/v1/emails/classify",
        json!({ "subject": "a", "body": "b", "generators": ["sentiment"] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("sentiment"));
}

#[tokio::test]
async fn classify_without_topics_is_server_error() {
    let (status, body) = post(
        &app(),
        "/api/v1/emails/classify",
        json!({ "subject": "a", "body": "b" }),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn classify_nearest_email_mode() {
    let app = with_topics().await;
    post(
        &app,
        "/api/v1/emails",
        json!({ "subject": "hi", "body": "there", "ground_truth": "work" }),
    )
    .await;

    let (status, body) = post(
        &app,
        "/api/v1/emails/classify",
        json!({ "subject": "hi", "body": "there", "mode": "nearest_email" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mode"], "nearest_email");
    assert_eq!(body["predicted_topic"], "work");
    assert_eq!(body["match"]["subject"], "hi");
    let similarity = body["similarity"].as_f64().unwrap();
    assert!((similarity - 1.0).abs() < 1e-9, "got {similarity}");
}

#[tokio::test]
async fn classify_nearest_with_empty_store() {
    let (status, body) = post(
        &app(),
        "/api/v1/emails/classify",
        json!({ "subject": "a", "body": "b", "mode": "nearest_email" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["predicted_topic"], Value::Null);
    assert_eq!(body["match"], Value::Null);
    assert_eq!(body["similarity"], 0.0);
}
