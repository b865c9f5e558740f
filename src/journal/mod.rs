// src/journal/mod.rs

pub mod store;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::mood::Mood;

#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub title: String,
    pub content: String,
    pub mood: Mood,
    pub tags: String,
    pub is_favorite: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields a partial update may change; `None` leaves the stored value.
#[derive(Debug, Default, Clone)]
pub struct JournalPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub mood: Option<Mood>,
    pub tags: Option<String>,
    pub is_favorite: Option<bool>,
}
