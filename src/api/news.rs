// src/api/news.rs
// Public endpoints; the feed carries no per-user data.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::{ApiResult, IntoApiError};
use crate::news::Article;
use crate::state::AppState;

/// Refreshes the cache only when it has gone stale, then lists the feed.
pub async fn list_articles(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Article>>> {
    let articles = state
        .news
        .feed(false)
        .await
        .into_api_error("Failed to load news feed")?;
    Ok(Json(articles))
}

/// Bypasses the staleness check and hits the upstream API.
pub async fn refresh_articles(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Article>>> {
    let articles = state
        .news
        .feed(true)
        .await
        .into_api_error("Failed to refresh news feed")?;
    Ok(Json(articles))
}
