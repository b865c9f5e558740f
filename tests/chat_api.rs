// tests/chat_api.rs

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;

use common::{app, app_with_models, register, request, FailingModel, FixedModel};

#[tokio::test]
async fn session_lifecycle() {
    let app = app().await;
    let token = register(&app, "ada").await;

    // Create: greeting seeds the conversation and names the mood.
    let (status, body) = request(
        &app,
        "POST",
        "/api/chat/sessions",
        Some(&token),
        Some(json!({ "mood": "anxious" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["mood"], "anxious");
    let session_id = body["id"].as_str().unwrap().to_string();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0]["sender"], "bot");
    assert!(messages[0]["content"]
        .as_str()
        .unwrap()
        .contains("you're feeling anxious"));

    // Session creation also records a mood entry.
    let (status, history) =
        request(&app, "GET", "/api/mood/history", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["mood"], "anxious");

    // Converse.
    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/chat/sessions/{session_id}/messages"),
        Some(&token),
        Some(json!({ "message": "Work has been overwhelming lately" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_message"]["sender"], "user");
    assert_eq!(body["bot_message"]["sender"], "bot");
    assert_eq!(
        body["bot_message"]["content"],
        "I'm glad you shared that with me."
    );

    // Fetch: greeting + user + bot.
    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/chat/sessions/{session_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"].as_array().unwrap().len(), 3);

    // Delete, then the session is gone.
    let (status, _) = request(
        &app,
        "DELETE",
        &format!("/api/chat/sessions/{session_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/chat/sessions/{session_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn blank_messages_are_rejected() {
    let app = app().await;
    let token = register(&app, "ada").await;

    let (_, body) = request(
        &app,
        "POST",
        "/api/chat/sessions",
        Some(&token),
        Some(json!({ "mood": "sad" })),
    )
    .await;
    let session_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/chat/sessions/{session_id}/messages"),
        Some(&token),
        Some(json!({ "message": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Message is required");

    // The rejection left the session as it was: greeting only.
    let (status, body) = request(
        &app,
        "GET",
        &format!("/api/chat/sessions/{session_id}"),
        Some(&token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn model_failure_degrades_to_fallback_with_hint() {
    let app = app_with_models(
        Arc::new(FailingModel),
        Arc::new(FixedModel("unused")),
    )
    .await;
    let token = register(&app, "ada").await;

    let (_, body) = request(
        &app,
        "POST",
        "/api/chat/sessions",
        Some(&token),
        Some(json!({ "mood": "stressed" })),
    )
    .await;
    let session_id = body["id"].as_str().unwrap().to_string();

    let (status, body) = request(
        &app,
        "POST",
        &format!("/api/chat/sessions/{session_id}/messages"),
        Some(&token),
        Some(json!({ "message": "hi" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let reply = body["bot_message"]["content"].as_str().unwrap();
    assert!(!reply.is_empty());
    assert!(reply.contains("(Note: our AI service could not authenticate"));
}

#[tokio::test]
async fn sessions_require_a_token_and_are_scoped() {
    let app = app().await;

    let (status, _) = request(&app, "GET", "/api/chat/sessions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let ada = register(&app, "ada").await;
    let eve = register(&app, "eve").await;

    let (_, body) = request(
        &app,
        "POST",
        "/api/chat/sessions",
        Some(&ada),
        Some(json!({ "mood": "happy" })),
    )
    .await;
    let session_id = body["id"].as_str().unwrap().to_string();

    let (status, _) = request(
        &app,
        "GET",
        &format!("/api/chat/sessions/{session_id}"),
        Some(&eve),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = request(&app, "GET", "/api/chat/sessions", Some(&eve), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_mood_defaults_to_neutral() {
    let app = app().await;
    let token = register(&app, "ada").await;

    let (status, body) = request(
        &app,
        "POST",
        "/api/chat/sessions",
        Some(&token),
        Some(json!({ "mood": "ecstatic" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["mood"], "neutral");
}
