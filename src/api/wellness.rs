// src/api/wellness.rs
// Meditation logging and self-care activity endpoints.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::api::auth::AuthUser;
use crate::api::error::{ApiError, ApiResult, IntoApiError, IntoApiErrorOption};
use crate::state::AppState;
use crate::wellness::{MeditationSession, MeditationStats, SelfCareActivity};

#[derive(Deserialize)]
pub struct LogMeditationRequest {
    pub session_type: String,
    pub duration_seconds: i64,
    pub notes: Option<String>,
}

pub async fn log_meditation(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(request): Json<LogMeditationRequest>,
) -> ApiResult<(StatusCode, Json<MeditationSession>)> {
    if request.session_type.trim().is_empty() {
        return Err(ApiError::bad_request("Session type is required"));
    }
    if request.duration_seconds <= 0 {
        return Err(ApiError::bad_request("Duration must be positive"));
    }

    let session = state
        .wellness
        .create_meditation(
            &user.id,
            request.session_type.trim(),
            request.duration_seconds,
            request.notes.as_deref().unwrap_or(""),
        )
        .await
        .into_api_error("Failed to log meditation session")?;

    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn list_meditations(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<MeditationSession>>> {
    let sessions = state
        .wellness
        .list_meditations(&user.id)
        .await
        .into_api_error("Failed to list meditation sessions")?;
    Ok(Json(sessions))
}

pub async fn meditation_stats(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<MeditationStats>> {
    let stats = state
        .wellness
        .meditation_stats(&user.id)
        .await
        .into_api_error("Failed to compute meditation stats")?;
    Ok(Json(stats))
}

#[derive(Deserialize)]
pub struct CreateActivityRequest {
    pub activity_type: String,
    pub title: String,
    pub description: Option<String>,
    pub scheduled_date: String,
}

pub async fn create_activity(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateActivityRequest>,
) -> ApiResult<(StatusCode, Json<SelfCareActivity>)> {
    if request.title.trim().is_empty() {
        return Err(ApiError::bad_request("Title is required"));
    }

    let activity = state
        .wellness
        .create_activity(
            &user.id,
            request.activity_type.trim(),
            request.title.trim(),
            request.description.as_deref().unwrap_or(""),
            request.scheduled_date.trim(),
        )
        .await
        .into_api_error("Failed to create self-care activity")?;

    Ok((StatusCode::CREATED, Json(activity)))
}

pub async fn list_activities(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> ApiResult<Json<Vec<SelfCareActivity>>> {
    let activities = state
        .wellness
        .list_activities(&user.id)
        .await
        .into_api_error("Failed to list self-care activities")?;
    Ok(Json(activities))
}

pub async fn complete_activity(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<SelfCareActivity>> {
    let activity = state
        .wellness
        .complete_activity(&user.id, id)
        .await
        .into_api_error("Failed to complete self-care activity")?
        .ok_or_not_found("Activity not found")?;
    Ok(Json(activity))
}

pub async fn delete_activity(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    let deleted = state
        .wellness
        .delete_activity(&user.id, id)
        .await
        .into_api_error("Failed to delete self-care activity")?;

    if !deleted {
        return Err(ApiError::not_found("Activity not found"));
    }
    Ok(StatusCode::NO_CONTENT)
}
