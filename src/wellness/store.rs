// src/wellness/store.rs

use anyhow::Result;
use chrono::{NaiveDateTime, TimeZone, Utc};
use sqlx::{Row, SqlitePool};

use super::{MeditationSession, MeditationStats, SelfCareActivity};

#[derive(Clone)]
pub struct WellnessStore {
    pool: SqlitePool,
}

impl WellnessStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ── Meditation ─────────────────────────────────────────────────────

    pub async fn create_meditation(
        &self,
        user_id: &str,
        session_type: &str,
        duration_seconds: i64,
        notes: &str,
    ) -> Result<MeditationSession> {
        let now = Utc::now();
        let row = sqlx::query(
            r#"
            INSERT INTO meditation_sessions (user_id, session_type, duration_seconds, notes, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(session_type)
        .bind(duration_seconds)
        .bind(notes)
        .bind(now.naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(MeditationSession {
            id: row.get("id"),
            user_id: user_id.to_string(),
            session_type: session_type.to_string(),
            duration_seconds,
            notes: notes.to_string(),
            created_at: now,
        })
    }

    pub async fn list_meditations(&self, user_id: &str) -> Result<Vec<MeditationSession>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, session_type, duration_seconds, notes, created_at
            FROM meditation_sessions
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(meditation_from_row).collect())
    }

    /// Totals plus the five most recent sessions.
    pub async fn meditation_stats(&self, user_id: &str) -> Result<MeditationStats> {
        let sessions = self.list_meditations(user_id).await?;
        let total_sessions = sessions.len() as i64;
        let total_minutes = sessions.iter().map(|s| s.duration_seconds).sum::<i64>() / 60;
        let recent_sessions = sessions.into_iter().take(5).collect();

        Ok(MeditationStats {
            total_sessions,
            total_minutes,
            recent_sessions,
        })
    }

    // ── Self-care ──────────────────────────────────────────────────────

    pub async fn create_activity(
        &self,
        user_id: &str,
        activity_type: &str,
        title: &str,
        description: &str,
        scheduled_date: &str,
    ) -> Result<SelfCareActivity> {
        let row = sqlx::query(
            r#"
            INSERT INTO selfcare_activities (user_id, activity_type, title, description, completed, scheduled_date)
            VALUES (?, ?, ?, ?, 0, ?)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(activity_type)
        .bind(title)
        .bind(description)
        .bind(scheduled_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(SelfCareActivity {
            id: row.get("id"),
            user_id: user_id.to_string(),
            activity_type: activity_type.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            completed: false,
            scheduled_date: scheduled_date.to_string(),
            completed_at: None,
        })
    }

    pub async fn list_activities(&self, user_id: &str) -> Result<Vec<SelfCareActivity>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, activity_type, title, description, completed, scheduled_date, completed_at
            FROM selfcare_activities
            WHERE user_id = ?
            ORDER BY scheduled_date DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(activity_from_row).collect())
    }

    /// Marks an activity complete, stamping the completion time. Returns
    /// the updated row, or None for an unknown/foreign id.
    pub async fn complete_activity(
        &self,
        user_id: &str,
        id: i64,
    ) -> Result<Option<SelfCareActivity>> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE selfcare_activities SET completed = 1, completed_at = ? WHERE id = ? AND user_id = ?",
        )
        .bind(now.naive_utc())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let row = sqlx::query(
            r#"
            SELECT id, user_id, activity_type, title, description, completed, scheduled_date, completed_at
            FROM selfcare_activities
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await?;

        Ok(Some(activity_from_row(row)))
    }

    pub async fn delete_activity(&self, user_id: &str, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM selfcare_activities WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn meditation_from_row(row: sqlx::sqlite::SqliteRow) -> MeditationSession {
    let created_at: NaiveDateTime = row.get("created_at");
    MeditationSession {
        id: row.get("id"),
        user_id: row.get("user_id"),
        session_type: row.get("session_type"),
        duration_seconds: row.get("duration_seconds"),
        notes: row.get("notes"),
        created_at: Utc.from_utc_datetime(&created_at),
    }
}

fn activity_from_row(row: sqlx::sqlite::SqliteRow) -> SelfCareActivity {
    let completed_at: Option<NaiveDateTime> = row.get("completed_at");
    SelfCareActivity {
        id: row.get("id"),
        user_id: row.get("user_id"),
        activity_type: row.get("activity_type"),
        title: row.get("title"),
        description: row.get("description"),
        completed: row.get("completed"),
        scheduled_date: row.get("scheduled_date"),
        completed_at: completed_at.map(|t| Utc.from_utc_datetime(&t)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> WellnessStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        WellnessStore::new(pool)
    }

    #[tokio::test]
    async fn meditation_stats_roll_up_minutes() {
        let store = store().await;
        store.create_meditation("u1", "breathing", 300, "").await.unwrap();
        store.create_meditation("u1", "mindfulness", 600, "").await.unwrap();
        store.create_meditation("u2", "breathing", 900, "").await.unwrap();

        let stats = store.meditation_stats("u1").await.unwrap();
        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.total_minutes, 15);
        assert_eq!(stats.recent_sessions.len(), 2);
    }

    #[tokio::test]
    async fn completing_an_activity_stamps_the_time() {
        let store = store().await;
        let activity = store
            .create_activity("u1", "exercise", "Evening walk", "", "2026-08-25")
            .await
            .unwrap();
        assert!(!activity.completed);

        let done = store.complete_activity("u1", activity.id).await.unwrap().unwrap();
        assert!(done.completed);
        assert!(done.completed_at.is_some());

        assert!(store.complete_activity("someone-else", activity.id).await.unwrap().is_none());
        assert!(store.delete_activity("u1", activity.id).await.unwrap());
    }
}
