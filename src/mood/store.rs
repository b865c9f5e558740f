// src/mood/store.rs
//! Mood-entry persistence plus the aggregate query behind the analytics
//! endpoint.

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDateTime, TimeZone, Utc};
use serde::Serialize;
use sqlx::{Row, SqlitePool};

use super::Mood;

#[derive(Debug, Clone, Serialize)]
pub struct MoodEntry {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: String,
    pub mood: Mood,
    pub notes: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MoodCount {
    pub mood: Mood,
    pub count: i64,
}

#[derive(Clone)]
pub struct MoodStore {
    pool: SqlitePool,
}

impl MoodStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, user_id: &str, mood: Mood, notes: &str) -> Result<MoodEntry> {
        let now = Utc::now();
        let row = sqlx::query(
            r#"
            INSERT INTO mood_entries (user_id, mood, notes, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(mood.as_str())
        .bind(notes)
        .bind(now.naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(MoodEntry {
            id: row.get("id"),
            user_id: user_id.to_string(),
            mood,
            notes: notes.to_string(),
            created_at: now,
        })
    }

    /// Entries within the last `days`, newest first.
    pub async fn history(&self, user_id: &str, days: i64) -> Result<Vec<MoodEntry>> {
        let since = Utc::now() - Duration::days(days);
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, mood, notes, created_at
            FROM mood_entries
            WHERE user_id = ? AND created_at >= ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(since.naive_utc())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let mood: String = row.get("mood");
                let created_at: NaiveDateTime = row.get("created_at");
                MoodEntry {
                    id: row.get("id"),
                    user_id: row.get("user_id"),
                    mood: Mood::from_label(&mood),
                    notes: row.get("notes"),
                    created_at: Utc.from_utc_datetime(&created_at),
                }
            })
            .collect())
    }

    /// Per-mood counts within the window, for the distribution endpoint.
    pub async fn distribution(&self, user_id: &str, days: i64) -> Result<Vec<MoodCount>> {
        let since = Utc::now() - Duration::days(days);
        let rows = sqlx::query(
            r#"
            SELECT mood, COUNT(*) AS count
            FROM mood_entries
            WHERE user_id = ? AND created_at >= ?
            GROUP BY mood
            "#,
        )
        .bind(user_id)
        .bind(since.naive_utc())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let mood: String = row.get("mood");
                MoodCount {
                    mood: Mood::from_label(&mood),
                    count: row.get("count"),
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> MoodStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        MoodStore::new(pool)
    }

    #[tokio::test]
    async fn history_is_user_scoped_and_newest_first() {
        let store = store().await;
        store.insert("u1", Mood::Happy, "good day").await.unwrap();
        store.insert("u1", Mood::Sad, "bad evening").await.unwrap();
        store.insert("u2", Mood::Angry, "").await.unwrap();

        let history = store.history("u1", 30).await.unwrap();
        assert_eq!(history.len(), 2);
        assert!(history[0].created_at >= history[1].created_at);
        assert!(history.iter().all(|e| e.user_id == "u1"));
    }

    #[tokio::test]
    async fn distribution_counts_by_mood() {
        let store = store().await;
        store.insert("u1", Mood::Happy, "").await.unwrap();
        store.insert("u1", Mood::Happy, "").await.unwrap();
        store.insert("u1", Mood::Stressed, "").await.unwrap();

        let counts = store.distribution("u1", 30).await.unwrap();
        let happy = counts.iter().find(|c| c.mood == Mood::Happy).unwrap();
        assert_eq!(happy.count, 2);
        assert_eq!(counts.iter().map(|c| c.count).sum::<i64>(), 3);
    }

    #[tokio::test]
    async fn window_excludes_old_entries() {
        let store = store().await;
        store.insert("u1", Mood::Neutral, "recent").await.unwrap();
        sqlx::query("UPDATE mood_entries SET created_at = ? WHERE notes = 'recent'")
            .bind((Utc::now() - Duration::days(45)).naive_utc())
            .execute(&store.pool)
            .await
            .unwrap();

        assert!(store.history("u1", 30).await.unwrap().is_empty());
        assert!(!store.history("u1", 60).await.unwrap().is_empty());
    }
}
