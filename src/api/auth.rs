// src/api/auth.rs
// Bearer-token extraction plus the registration endpoint.

use axum::{
    extract::{FromRequestParts, State},
    http::{request::Parts, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::auth::User;
use crate::state::AppState;

/// A request that carried a valid `Authorization: Bearer <token>` header.
pub struct AuthUser(pub User);

/// Same extraction, but an absent header resolves to `None` instead of 401.
/// A header that is present but invalid is still rejected.
pub struct OptionalAuthUser(pub Option<User>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;

        let user = state
            .users
            .find_by_token(token)
            .await
            .into_api_error("Failed to resolve token")?
            .ok_or_else(|| ApiError::unauthorized("Invalid token"))?;

        Ok(AuthUser(user))
    }
}

impl FromRequestParts<Arc<AppState>> for OptionalAuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Some(token) = bearer_token(parts) else {
            return Ok(OptionalAuthUser(None));
        };

        let user = state
            .users
            .find_by_token(token)
            .await
            .into_api_error("Failed to resolve token")?
            .ok_or_else(|| ApiError::unauthorized("Invalid token"))?;

        Ok(OptionalAuthUser(Some(user)))
    }
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub user_id: String,
    pub username: String,
    /// Plaintext token, shown exactly once.
    pub token: String,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    let username = request.username.trim();
    if username.is_empty() {
        return Err(ApiError::bad_request("Username is required"));
    }

    if state
        .users
        .find_by_username(username)
        .await
        .into_api_error("Failed to check username")?
        .is_some()
    {
        return Err(ApiError::conflict("Username is already taken"));
    }

    let (user, token) = state
        .users
        .create(username)
        .await
        .into_api_error("Failed to create user")?;

    info!(user_id = %user.id, "registered user");

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user_id: user.id,
            username: user.username,
            token,
        }),
    ))
}
