// src/api/companion.rs
// Single-turn companion endpoint. Anonymous traffic is allowed; a valid
// bearer token attaches the exchange to the account.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::auth::OptionalAuthUser;
use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::companion::{CompanionMessage, MAX_MESSAGE_CHARS};
use crate::mood::sentiment::Sentiment;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CompanionRequest {
    pub message: String,
}

#[derive(Serialize)]
pub struct CompanionResponse {
    pub user_message: CompanionMessage,
    pub ai_response: CompanionMessage,
    pub mood: MoodDetail,
}

#[derive(Serialize)]
pub struct MoodDetail {
    pub label: String,
    pub score: f64,
}

impl From<Sentiment> for MoodDetail {
    fn from(s: Sentiment) -> Self {
        Self {
            label: s.label.as_str().to_string(),
            score: s.score,
        }
    }
}

pub async fn companion_chat(
    State(state): State<Arc<AppState>>,
    OptionalAuthUser(user): OptionalAuthUser,
    Json(request): Json<CompanionRequest>,
) -> ApiResult<Json<CompanionResponse>> {
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ApiError::bad_request("Empty message"));
    }
    if message.chars().count() > MAX_MESSAGE_CHARS {
        return Err(ApiError::bad_request(format!(
            "Message exceeds {MAX_MESSAGE_CHARS} characters"
        )));
    }

    let reply = state
        .companion
        .respond(user.as_ref().map(|u| u.id.as_str()), message)
        .await
        .into_api_error("Failed to process companion message")?;

    Ok(Json(CompanionResponse {
        user_message: reply.user_message,
        ai_response: reply.ai_message,
        mood: reply.mood.into(),
    }))
}

#[derive(Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<i64>,
}

pub async fn companion_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> ApiResult<Json<Vec<CompanionMessage>>> {
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let messages = state
        .companion
        .recent(limit)
        .await
        .into_api_error("Failed to load companion history")?;
    Ok(Json(messages))
}
