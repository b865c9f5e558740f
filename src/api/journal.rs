// src/api/journal.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::auth::AuthUser;
use crate::api::error::{ApiError, ApiResult, IntoApiError, IntoApiErrorOption};
use crate::journal::{JournalEntry, JournalPatch};
use crate::mood::Mood;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CreateEntryRequest {
    pub title: String,
    pub content: String,
    pub mood: Option<String>,
    pub tags: Option<String>,
}

pub async fn create_entry(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateEntryRequest>,
) -> ApiResult<(StatusCode, Json<JournalEntry>)> {
    if request.title.trim().is_empty() || request.content.trim().is_empty() {
        return Err(ApiError::bad_request("Title and content are required"));
    }

    let mood = request
        .mood
        .as_deref()
        .map(Mood::from_label)
        .unwrap_or(Mood::Neutral);

    let entry = state
        .journal
        .create(
            &user.id,
            request.title.trim(),
            &request.content,
            mood,
            request.tags.as_deref().unwrap_or(""),
        )
        .await
        .into_api_error("Failed to create journal entry")?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_entries(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<JournalEntry>>> {
    let entries = state
        .journal
        .list(&user.id)
        .await
        .into_api_error("Failed to list journal entries")?;
    Ok(Json(entries))
}

pub async fn get_entry(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<JournalEntry>> {
    let entry = state
        .journal
        .get(&user.id, id)
        .await
        .into_api_error("Failed to load journal entry")?
        .ok_or_not_found("Journal entry not found")?;
    Ok(Json(entry))
}

#[derive(Deserialize)]
pub struct UpdateEntryRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<String>,
    pub tags: Option<String>,
    pub is_favorite: Option<bool>,
}

pub async fn update_entry(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateEntryRequest>,
) -> ApiResult<Json<JournalEntry>> {
    let patch = JournalPatch {
        title: request.title,
        content: request.content,
        mood: request.mood.as_deref().map(Mood::from_label),
        tags: request.tags,
        is_favorite: request.is_favorite,
    };

    let entry = state
        .journal
        .update(&user.id, id, patch)
        .await
        .into_api_error("Failed to update journal entry")?
        .ok_or_not_found("Journal entry not found")?;
    Ok(Json(entry))
}

pub async fn delete_entry(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .journal
        .delete(&user.id, id)
        .await
        .into_api_error("Failed to delete journal entry")?;

    if !deleted {
        return Err(ApiError::not_found("Journal entry not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
