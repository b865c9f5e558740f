// src/api/mood.rs
// Mood tracking and the aggregate analytics view.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::auth::AuthUser;
use crate::api::error::{ApiError, ApiResult, IntoApiError};
use crate::mood::store::MoodEntry;
use crate::mood::{classifier, Mood};
use crate::state::AppState;

const DEFAULT_WINDOW_DAYS: i64 = 30;

#[derive(Deserialize)]
pub struct TrackMoodRequest {
    pub mood: Option<String>,
    pub notes: Option<String>,
}

pub async fn track_mood(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Json(request): Json<TrackMoodRequest>,
) -> ApiResult<(StatusCode, Json<MoodEntry>)> {
    let notes = request.notes.unwrap_or_default();

    // An explicit mood wins; otherwise the notes are classified. A request
    // carrying neither gives the classifier nothing to work with.
    let mood = match request.mood.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => Mood::from_label(label),
        _ if !notes.trim().is_empty() => classifier::classify(&notes),
        _ => return Err(ApiError::bad_request("Provide a mood or notes to classify")),
    };

    let entry = state
        .moods
        .insert(&user.id, mood, &notes)
        .await
        .into_api_error("Failed to record mood")?;

    Ok((StatusCode::CREATED, Json(entry)))
}

#[derive(Deserialize)]
pub struct WindowQuery {
    pub days: Option<i64>,
}

impl WindowQuery {
    fn days(&self) -> i64 {
        self.days.unwrap_or(DEFAULT_WINDOW_DAYS).clamp(1, 365)
    }
}

pub async fn mood_history(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(window): Query<WindowQuery>,
) -> ApiResult<Json<Vec<MoodEntry>>> {
    let entries = state
        .moods
        .history(&user.id, window.days())
        .await
        .into_api_error("Failed to load mood history")?;
    Ok(Json(entries))
}

#[derive(Serialize)]
pub struct MoodSlice {
    pub mood: Mood,
    pub count: i64,
    pub percentage: f64,
}

#[derive(Serialize)]
pub struct MoodAnalytics {
    pub total_entries: i64,
    pub window_days: i64,
    pub most_common: Option<Mood>,
    pub distribution: Vec<MoodSlice>,
}

pub async fn mood_analytics(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    Query(window): Query<WindowQuery>,
) -> ApiResult<Json<MoodAnalytics>> {
    let days = window.days();
    let counts = state
        .moods
        .distribution(&user.id, days)
        .await
        .into_api_error("Failed to load mood distribution")?;

    let total_entries: i64 = counts.iter().map(|c| c.count).sum();
    let most_common = counts
        .iter()
        .max_by_key(|c| c.count)
        .map(|c| c.mood);

    let distribution = counts
        .into_iter()
        .map(|c| {
            let percentage = if total_entries > 0 {
                round2(c.count as f64 * 100.0 / total_entries as f64)
            } else {
                0.0
            };
            MoodSlice {
                mood: c.mood,
                count: c.count,
                percentage,
            }
        })
        .collect();

    Ok(Json(MoodAnalytics {
        total_entries,
        window_days: days,
        most_common,
        distribution,
    }))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_round_to_two_places() {
        assert_eq!(round2(33.333333), 33.33);
        assert_eq!(round2(66.666666), 66.67);
        assert_eq!(round2(100.0), 100.0);
    }

    #[test]
    fn window_defaults_and_clamps() {
        assert_eq!(WindowQuery { days: None }.days(), 30);
        assert_eq!(WindowQuery { days: Some(0) }.days(), 1);
        assert_eq!(WindowQuery { days: Some(1000) }.days(), 365);
    }
}
