// src/wellness/mod.rs
// Meditation sessions and self-care activities: plain per-user records.

pub mod store;

use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct MeditationSession {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub session_type: String,
    pub duration_seconds: i64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MeditationStats {
    pub total_sessions: i64,
    pub total_minutes: i64,
    pub recent_sessions: Vec<MeditationSession>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SelfCareActivity {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub activity_type: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub scheduled_date: String,
    pub completed_at: Option<DateTime<Utc>>,
}
