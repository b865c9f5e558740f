// src/db/mod.rs
//! Schema bootstrap for SQLite. Run at startup so a fresh database file
//! (or an in-memory pool in tests) always has the full schema.

use anyhow::Result;
use sqlx::SqlitePool;

const CREATE_USERS: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    token_hash TEXT NOT NULL UNIQUE,
    created_at DATETIME NOT NULL
);
"#;

const CREATE_CHAT_SESSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS chat_sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    mood TEXT NOT NULL,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

const CREATE_CHAT_MESSAGES: &str = r#"
CREATE TABLE IF NOT EXISTS chat_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    session_id TEXT NOT NULL,
    sender TEXT NOT NULL CHECK (sender IN ('user', 'bot')),
    content TEXT NOT NULL,
    timestamp DATETIME NOT NULL
);
"#;

const CREATE_MOOD_ENTRIES: &str = r#"
CREATE TABLE IF NOT EXISTS mood_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    mood TEXT NOT NULL,
    notes TEXT NOT NULL DEFAULT '',
    created_at DATETIME NOT NULL
);
"#;

const CREATE_JOURNAL_ENTRIES: &str = r#"
CREATE TABLE IF NOT EXISTS journal_entries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    mood TEXT NOT NULL,
    tags TEXT NOT NULL DEFAULT '',
    is_favorite BOOLEAN NOT NULL DEFAULT 0,
    created_at DATETIME NOT NULL,
    updated_at DATETIME NOT NULL
);
"#;

const CREATE_MEDITATION_SESSIONS: &str = r#"
CREATE TABLE IF NOT EXISTS meditation_sessions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    session_type TEXT NOT NULL,
    duration_seconds INTEGER NOT NULL,
    notes TEXT NOT NULL DEFAULT '',
    created_at DATETIME NOT NULL
);
"#;

const CREATE_SELFCARE_ACTIVITIES: &str = r#"
CREATE TABLE IF NOT EXISTS selfcare_activities (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    activity_type TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    completed BOOLEAN NOT NULL DEFAULT 0,
    scheduled_date TEXT NOT NULL,
    completed_at DATETIME
);
"#;

const CREATE_COMPANION_MESSAGES: &str = r#"
CREATE TABLE IF NOT EXISTS companion_messages (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT,
    sender TEXT NOT NULL CHECK (sender IN ('user', 'ai')),
    text TEXT NOT NULL,
    mood_label TEXT,
    mood_score REAL,
    created_at DATETIME NOT NULL
);
"#;

const CREATE_ARTICLES: &str = r#"
CREATE TABLE IF NOT EXISTS articles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT NOT NULL,
    url TEXT NOT NULL UNIQUE,
    image_url TEXT,
    source TEXT NOT NULL,
    published_at DATETIME NOT NULL,
    created_at DATETIME NOT NULL
);
"#;

/// Creates every table the backend uses. Statements are idempotent.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    for statement in [
        CREATE_USERS,
        CREATE_CHAT_SESSIONS,
        CREATE_CHAT_MESSAGES,
        CREATE_MOOD_ENTRIES,
        CREATE_JOURNAL_ENTRIES,
        CREATE_MEDITATION_SESSIONS,
        CREATE_SELFCARE_ACTIVITIES,
        CREATE_COMPANION_MESSAGES,
        CREATE_ARTICLES,
    ] {
        sqlx::query(statement).execute(pool).await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();

        run_migrations(&pool).await.unwrap();
        run_migrations(&pool).await.unwrap();

        sqlx::query("SELECT id FROM chat_sessions")
            .fetch_all(&pool)
            .await
            .unwrap();
    }
}
