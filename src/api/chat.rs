// src/api/chat.rs
// Mood-aware chat sessions: create, list, inspect, converse, delete.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::api::auth::AuthUser;
use crate::api::error::{ApiError, ApiResult, IntoApiError, IntoApiErrorOption};
use crate::chat::{ChatMessage, ChatSession};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateSessionRequest {
    pub mood: Option<String>,
}

#[derive(Serialize)]
pub struct SessionWithMessages {
    #[serde(flatten)]
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}

pub async fn create_session(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateSessionRequest>,
) -> ApiResult<(StatusCode, Json<SessionWithMessages>)> {
    let (session, messages) = state
        .chat
        .create_session(&user.id, request.mood.as_deref())
        .await
        .into_api_error("Failed to create chat session")?;

    info!(session_id = %session.id, mood = %session.mood, "created chat session");

    Ok((
        StatusCode::CREATED,
        Json(SessionWithMessages { session, messages }),
    ))
}

pub async fn list_sessions(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<SessionWithMessages>>> {
    let sessions = state
        .sessions
        .list(&user.id)
        .await
        .into_api_error("Failed to list chat sessions")?;

    let mut out = Vec::with_capacity(sessions.len());
    for session in sessions {
        let messages = state
            .sessions
            .history(&session.id)
            .await
            .into_api_error("Failed to load session messages")?;
        out.push(SessionWithMessages { session, messages });
    }

    Ok(Json(out))
}

pub async fn get_session(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(session_id): Path<String>,
) -> ApiResult<Json<SessionWithMessages>> {
    let session = state
        .sessions
        .get(&user.id, &session_id)
        .await
        .into_api_error("Failed to load chat session")?
        .ok_or_not_found("Session not found")?;

    let messages = state
        .sessions
        .history(&session.id)
        .await
        .into_api_error("Failed to load session messages")?;

    Ok(Json(SessionWithMessages { session, messages }))
}

pub async fn delete_session(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(session_id): Path<String>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .sessions
        .delete(&user.id, &session_id)
        .await
        .into_api_error("Failed to delete chat session")?;

    if !deleted {
        return Err(ApiError::not_found("Session not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Deserialize)]
pub struct SendMessageRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct SendMessageResponse {
    pub user_message: ChatMessage,
    pub bot_message: ChatMessage,
}

pub async fn send_message(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(session_id): Path<String>,
    Json(request): Json<SendMessageRequest>,
) -> ApiResult<Json<SendMessageResponse>> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request("Message is required"));
    }

    let session = state
        .sessions
        .get(&user.id, &session_id)
        .await
        .into_api_error("Failed to load chat session")?
        .ok_or_not_found("Session not found")?;

    let (user_message, bot_message) = state
        .chat
        .send_message(&session, message)
        .await
        .into_api_error("Failed to process message")?;

    Ok(Json(SendMessageResponse {
        user_message,
        bot_message,
    }))
}
