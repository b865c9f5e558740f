// src/chat/store.rs
//! SQLite persistence for chat sessions and messages. All reads are scoped
//! to the owning user; message order is insertion order.

use anyhow::Result;
use chrono::{NaiveDateTime, TimeZone, Utc};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use super::{ChatMessage, ChatSession, Sender};
use crate::mood::Mood;

#[derive(Clone)]
pub struct SessionStore {
    pool: SqlitePool,
}

impl SessionStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, user_id: &str, mood: Mood) -> Result<ChatSession> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        sqlx::query(
            "INSERT INTO chat_sessions (id, user_id, mood, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(mood.as_str())
        .bind(now.naive_utc())
        .bind(now.naive_utc())
        .execute(&self.pool)
        .await?;

        Ok(ChatSession {
            id,
            user_id: user_id.to_string(),
            mood,
            created_at: now,
            updated_at: now,
        })
    }

    /// Sessions for a user, most recently active first.
    pub async fn list(&self, user_id: &str) -> Result<Vec<ChatSession>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, mood, created_at, updated_at
            FROM chat_sessions
            WHERE user_id = ?
            ORDER BY updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(session_from_row).collect())
    }

    pub async fn get(&self, user_id: &str, session_id: &str) -> Result<Option<ChatSession>> {
        let row = sqlx::query(
            "SELECT id, user_id, mood, created_at, updated_at FROM chat_sessions WHERE id = ? AND user_id = ?",
        )
        .bind(session_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(session_from_row))
    }

    /// Deletes a session and its messages. Returns false when the session
    /// does not exist (or belongs to someone else).
    pub async fn delete(&self, user_id: &str, session_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM chat_sessions WHERE id = ? AND user_id = ?")
            .bind(session_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("DELETE FROM chat_messages WHERE session_id = ?")
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(true)
    }

    /// Appends a message and touches the session's `updated_at`.
    pub async fn append_message(
        &self,
        session_id: &str,
        sender: Sender,
        content: &str,
    ) -> Result<ChatMessage> {
        let now = Utc::now();

        let row = sqlx::query(
            r#"
            INSERT INTO chat_messages (session_id, sender, content, timestamp)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(session_id)
        .bind(sender.as_str())
        .bind(content)
        .bind(now.naive_utc())
        .fetch_one(&self.pool)
        .await?;

        sqlx::query("UPDATE chat_sessions SET updated_at = ? WHERE id = ?")
            .bind(now.naive_utc())
            .bind(session_id)
            .execute(&self.pool)
            .await?;

        Ok(ChatMessage {
            id: row.get("id"),
            session_id: session_id.to_string(),
            sender,
            content: content.to_string(),
            timestamp: now,
        })
    }

    /// Full history, oldest first. Insertion order is preserved even when
    /// two messages share a timestamp.
    pub async fn history(&self, session_id: &str) -> Result<Vec<ChatMessage>> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, sender, content, timestamp
            FROM chat_messages
            WHERE session_id = ?
            ORDER BY timestamp ASC, id ASC
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let sender: String = row.get("sender");
                let timestamp: NaiveDateTime = row.get("timestamp");
                ChatMessage {
                    id: row.get("id"),
                    session_id: row.get("session_id"),
                    sender: sender.parse().unwrap_or(Sender::Bot),
                    content: row.get("content"),
                    timestamp: Utc.from_utc_datetime(&timestamp),
                }
            })
            .collect())
    }

    pub async fn message_count(&self, session_id: &str) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM chat_messages WHERE session_id = ?")
            .bind(session_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("n"))
    }
}

fn session_from_row(row: sqlx::sqlite::SqliteRow) -> ChatSession {
    let mood: String = row.get("mood");
    let created_at: NaiveDateTime = row.get("created_at");
    let updated_at: NaiveDateTime = row.get("updated_at");
    ChatSession {
        id: row.get("id"),
        user_id: row.get("user_id"),
        mood: Mood::from_label(&mood),
        created_at: Utc.from_utc_datetime(&created_at),
        updated_at: Utc.from_utc_datetime(&updated_at),
    }
}
