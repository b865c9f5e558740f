// src/companion/store.rs

use anyhow::Result;
use chrono::{NaiveDateTime, TimeZone, Utc};
use sqlx::{Row, SqlitePool};

use super::{CompanionMessage, CompanionSender};
use crate::mood::sentiment::Sentiment;

#[derive(Clone)]
pub struct CompanionStore {
    pool: SqlitePool,
}

impl CompanionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persists one message. `user_id` is nullable: the companion endpoint
    /// accepts anonymous traffic.
    pub async fn insert(
        &self,
        user_id: Option<&str>,
        sender: CompanionSender,
        text: &str,
        mood: Option<Sentiment>,
    ) -> Result<CompanionMessage> {
        let now = Utc::now();
        let mood_label = mood.map(|m| m.label.as_str().to_string());
        let mood_score = mood.map(|m| m.score);

        let row = sqlx::query(
            r#"
            INSERT INTO companion_messages (user_id, sender, text, mood_label, mood_score, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(sender.as_str())
        .bind(text)
        .bind(&mood_label)
        .bind(mood_score)
        .bind(now.naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(CompanionMessage {
            id: row.get("id"),
            user_id: user_id.map(str::to_string),
            sender,
            text: text.to_string(),
            mood_label,
            mood_score,
            created_at: now,
        })
    }

    pub async fn recent(&self, limit: i64) -> Result<Vec<CompanionMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, sender, text, mood_label, mood_score, created_at
            FROM companion_messages
            ORDER BY created_at DESC, id DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let sender: String = row.get("sender");
                let created_at: NaiveDateTime = row.get("created_at");
                CompanionMessage {
                    id: row.get("id"),
                    user_id: row.get("user_id"),
                    sender: sender.parse().unwrap_or(CompanionSender::Ai),
                    text: row.get("text"),
                    mood_label: row.get("mood_label"),
                    mood_score: row.get("mood_score"),
                    created_at: Utc.from_utc_datetime(&created_at),
                }
            })
            .collect())
    }

    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM companion_messages")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mood::sentiment::SentimentLabel;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> CompanionStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        CompanionStore::new(pool)
    }

    #[tokio::test]
    async fn stores_anonymous_messages_with_mood() {
        let store = store().await;
        let sentiment = Sentiment {
            label: SentimentLabel::Negative,
            score: 0.9,
        };

        let saved = store
            .insert(None, CompanionSender::User, "feeling hopeless", Some(sentiment))
            .await
            .unwrap();

        assert!(saved.user_id.is_none());
        assert_eq!(saved.mood_label.as_deref(), Some("Negative"));
        assert_eq!(saved.mood_score, Some(0.9));

        let recent = store.recent(10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].text, "feeling hopeless");
    }

    #[tokio::test]
    async fn ai_messages_carry_no_mood() {
        let store = store().await;
        let saved = store
            .insert(Some("u1"), CompanionSender::Ai, "I'm here with you.", None)
            .await
            .unwrap();
        assert_eq!(saved.sender, CompanionSender::Ai);
        assert!(saved.mood_label.is_none());
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
