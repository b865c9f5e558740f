// src/journal/store.rs

use anyhow::Result;
use chrono::{NaiveDateTime, TimeZone, Utc};
use sqlx::{Row, SqlitePool};

use super::{JournalEntry, JournalPatch};
use crate::mood::Mood;

#[derive(Clone)]
pub struct JournalStore {
    pool: SqlitePool,
}

impl JournalStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        user_id: &str,
        title: &str,
        content: &str,
        mood: Mood,
        tags: &str,
    ) -> Result<JournalEntry> {
        let now = Utc::now();
        let row = sqlx::query(
            r#"
            INSERT INTO journal_entries (user_id, title, content, mood, tags, is_favorite, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, 0, ?, ?)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(title)
        .bind(content)
        .bind(mood.as_str())
        .bind(tags)
        .bind(now.naive_utc())
        .bind(now.naive_utc())
        .fetch_one(&self.pool)
        .await?;

        Ok(JournalEntry {
            id: row.get("id"),
            user_id: user_id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            mood,
            tags: tags.to_string(),
            is_favorite: false,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn list(&self, user_id: &str) -> Result<Vec<JournalEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, content, mood, tags, is_favorite, created_at, updated_at
            FROM journal_entries
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(entry_from_row).collect())
    }

    pub async fn get(&self, user_id: &str, id: i64) -> Result<Option<JournalEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, content, mood, tags, is_favorite, created_at, updated_at
            FROM journal_entries
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(entry_from_row))
    }

    /// Partial update; returns the stored entry, or None if it is missing.
    pub async fn update(
        &self,
        user_id: &str,
        id: i64,
        patch: JournalPatch,
    ) -> Result<Option<JournalEntry>> {
        let Some(mut entry) = self.get(user_id, id).await? else {
            return Ok(None);
        };

        if let Some(title) = patch.title {
            entry.title = title;
        }
        if let Some(content) = patch.content {
            entry.content = content;
        }
        if let Some(mood) = patch.mood {
            entry.mood = mood;
        }
        if let Some(tags) = patch.tags {
            entry.tags = tags;
        }
        if let Some(is_favorite) = patch.is_favorite {
            entry.is_favorite = is_favorite;
        }
        entry.updated_at = Utc::now();

        sqlx::query(
            r#"
            UPDATE journal_entries
            SET title = ?, content = ?, mood = ?, tags = ?, is_favorite = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(&entry.title)
        .bind(&entry.content)
        .bind(entry.mood.as_str())
        .bind(&entry.tags)
        .bind(entry.is_favorite)
        .bind(entry.updated_at.naive_utc())
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(Some(entry))
    }

    pub async fn delete(&self, user_id: &str, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM journal_entries WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn entry_from_row(row: sqlx::sqlite::SqliteRow) -> JournalEntry {
    let mood: String = row.get("mood");
    let created_at: NaiveDateTime = row.get("created_at");
    let updated_at: NaiveDateTime = row.get("updated_at");
    JournalEntry {
        id: row.get("id"),
        user_id: row.get("user_id"),
        title: row.get("title"),
        content: row.get("content"),
        mood: Mood::from_label(&mood),
        tags: row.get("tags"),
        is_favorite: row.get("is_favorite"),
        created_at: Utc.from_utc_datetime(&created_at),
        updated_at: Utc.from_utc_datetime(&updated_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> JournalStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        JournalStore::new(pool)
    }

    #[tokio::test]
    async fn crud_roundtrip() {
        let store = store().await;
        let entry = store
            .create("u1", "Monday", "Long day at work.", Mood::Stressed, "work")
            .await
            .unwrap();

        let fetched = store.get("u1", entry.id).await.unwrap().unwrap();
        assert_eq!(fetched.title, "Monday");
        assert!(!fetched.is_favorite);

        let updated = store
            .update(
                "u1",
                entry.id,
                JournalPatch {
                    is_favorite: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(updated.is_favorite);
        assert_eq!(updated.title, "Monday");

        assert!(store.delete("u1", entry.id).await.unwrap());
        assert!(store.get("u1", entry.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn entries_are_user_scoped() {
        let store = store().await;
        let entry = store
            .create("owner", "Private", "...", Mood::Neutral, "")
            .await
            .unwrap();

        assert!(store.get("other", entry.id).await.unwrap().is_none());
        assert!(!store.delete("other", entry.id).await.unwrap());
        assert!(store
            .update("other", entry.id, JournalPatch::default())
            .await
            .unwrap()
            .is_none());
    }
}
