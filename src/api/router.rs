// src/api/router.rs
// HTTP router composition for REST API endpoints.

use axum::{
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;

use super::{auth, chat, companion, journal, mood, news, wellness};
use crate::state::AppState;

/// Main HTTP router. Nested under /api in main.rs, except /health which the
/// caller mounts at the root.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        // Accounts
        .route("/auth/register", post(auth::register))
        // Chat sessions
        .route("/chat/sessions", post(chat::create_session))
        .route("/chat/sessions", get(chat::list_sessions))
        .route("/chat/sessions/{id}", get(chat::get_session))
        .route("/chat/sessions/{id}", delete(chat::delete_session))
        .route("/chat/sessions/{id}/messages", post(chat::send_message))
        // Single-turn companion
        .route("/companion/chat", post(companion::companion_chat))
        .route("/companion/history", get(companion::companion_history))
        // Mood tracking
        .route("/mood/track", post(mood::track_mood))
        .route("/mood/history", get(mood::mood_history))
        .route("/mood/analytics", get(mood::mood_analytics))
        // Journal
        .route("/journal", post(journal::create_entry))
        .route("/journal", get(journal::list_entries))
        .route("/journal/{id}", get(journal::get_entry))
        .route("/journal/{id}", put(journal::update_entry))
        .route("/journal/{id}", delete(journal::delete_entry))
        // Wellness
        .route("/meditation", post(wellness::log_meditation))
        .route("/meditation", get(wellness::list_meditations))
        .route("/meditation/stats", get(wellness::meditation_stats))
        .route("/selfcare", post(wellness::create_activity))
        .route("/selfcare", get(wellness::list_activities))
        .route("/selfcare/{id}/complete", post(wellness::complete_activity))
        .route("/selfcare/{id}", delete(wellness::delete_activity))
        // News feed
        .route("/news/articles", get(news::list_articles))
        .route("/news/refresh", get(news::refresh_articles))
        .with_state(app_state)
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
