// tests/companion_api.rs

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, register, request};

#[tokio::test]
async fn classifies_and_replies() {
    let app = app().await;

    // Anonymous traffic is allowed.
    let (status, body) = request(
        &app,
        "POST",
        "/api/companion/chat",
        None,
        Some(json!({ "message": "I had a lovely walk this morning" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    // Stub model does not emit JSON, so the keyword heuristic decides.
    assert_eq!(body["mood"]["label"], "Positive");
    assert_eq!(body["mood"]["score"], 0.7);
    assert_eq!(body["user_message"]["sender"], "user");
    assert_eq!(
        body["ai_response"]["text"],
        "Thank you for telling me. I'm here with you."
    );
    assert!(body["user_message"]["user_id"].is_null());

    // Both sides of the exchange land in history, newest first.
    let (status, body) = request(&app, "GET", "/api/companion/history", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let history = body.as_array().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0]["sender"], "ai");
    assert_eq!(history[1]["sender"], "user");
}

#[tokio::test]
async fn negative_keywords_score_high() {
    let app = app().await;
    let (status, body) = request(
        &app,
        "POST",
        "/api/companion/chat",
        None,
        Some(json!({ "message": "everything feels hopeless" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["mood"]["label"], "Negative");
    assert_eq!(body["mood"]["score"], 0.9);
    assert_eq!(body["user_message"]["mood_label"], "Negative");
}

#[tokio::test]
async fn empty_messages_are_rejected_before_persisting() {
    let app = app().await;
    let (status, body) = request(
        &app,
        "POST",
        "/api/companion/chat",
        None,
        Some(json!({ "message": "  " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Empty message");

    // Nothing was persisted.
    let (status, body) = request(&app, "GET", "/api/companion/history", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn oversized_messages_are_rejected() {
    let app = app().await;
    let long = "a".repeat(2001);
    let (status, body) = request(
        &app,
        "POST",
        "/api/companion/chat",
        None,
        Some(json!({ "message": long })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("2000 characters"));

    // Nothing was persisted.
    let (status, body) = request(&app, "GET", "/api/companion/history", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn token_attaches_exchange_to_account() {
    let app = app().await;
    let token = register(&app, "ada").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/companion/chat",
        Some(&token),
        Some(json!({ "message": "doing okay today" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["user_message"]["user_id"].is_string());
    assert_eq!(body["mood"]["label"], "Neutral");
}

#[tokio::test]
async fn invalid_token_is_rejected_even_though_endpoint_is_open() {
    let app = app().await;
    let (status, _) = request(
        &app,
        "POST",
        "/api/companion/chat",
        Some("bogus"),
        Some(json!({ "message": "hello" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
