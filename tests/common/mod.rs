// tests/common/mod.rs
// Shared harness: in-memory database, stub models, and request helpers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::{routing::get, Router};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use haven::api::router::{api_router, health_handler};
use haven::llm::{ChatModel, CompletionRequest, LlmError};
use haven::state::{create_app_state, StateOptions};

/// Always replies with the same text.
pub struct FixedModel(pub &'static str);

#[async_trait]
impl ChatModel for FixedModel {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
        Ok(self.0.to_string())
    }
}

/// Always fails with an auth error, which carries a remediation hint.
pub struct FailingModel;

#[async_trait]
impl ChatModel for FailingModel {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
        Err(LlmError::Auth)
    }
}

pub async fn app_with_models(
    chat_model: Arc<dyn ChatModel>,
    companion_model: Arc<dyn ChatModel>,
) -> Router {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    haven::db::run_migrations(&pool).await.unwrap();

    let state = create_app_state(
        pool,
        StateOptions {
            chat_model,
            companion_model,
            enable_local_sentiment: false,
            news_api_key: None,
            // Unreachable on purpose; tests exercise the offline path.
            news_api_url: "http://127.0.0.1:9/v2/everything".to_string(),
            news_staleness_hours: 6,
            news_timeout_secs: 1,
        },
    )
    .unwrap();

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router(state))
}

pub async fn app() -> Router {
    app_with_models(
        Arc::new(FixedModel("I'm glad you shared that with me.")),
        Arc::new(FixedModel("Thank you for telling me. I'm here with you.")),
    )
    .await
}

pub async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
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

/// Registers an account and returns its bearer token.
pub async fn register(app: &Router, username: &str) -> String {
    let (status, body) = request(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(serde_json::json!({ "username": username })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}
