// src/auth/mod.rs
//! Minimal bearer-token accounts. Tokens are random, shown once at
//! registration, and stored only as SHA-256 hashes.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use sha2::{Digest, Sha256};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: String,
    pub username: String,
}

pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{:x}", digest)
}

#[derive(Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Creates a user and returns it with the plaintext token. The token is
    /// not recoverable afterwards.
    pub async fn create(&self, username: &str) -> Result<(User, String)> {
        let id = Uuid::new_v4().to_string();
        let token = Uuid::new_v4().simple().to_string();

        sqlx::query(
            "INSERT INTO users (id, username, token_hash, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(username)
        .bind(hash_token(&token))
        .bind(Utc::now().naive_utc())
        .execute(&self.pool)
        .await?;

        Ok((
            User {
                id,
                username: username.to_string(),
            },
            token,
        ))
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username FROM users WHERE username = ?")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            username: r.get("username"),
        }))
    }

    pub async fn find_by_token(&self, token: &str) -> Result<Option<User>> {
        let row = sqlx::query("SELECT id, username FROM users WHERE token_hash = ?")
            .bind(hash_token(token))
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|r| User {
            id: r.get("id"),
            username: r.get("username"),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> UserStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        UserStore::new(pool)
    }

    #[tokio::test]
    async fn token_resolves_to_its_user() {
        let store = store().await;
        let (user, token) = store.create("ada").await.unwrap();

        let found = store.find_by_token(&token).await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert_eq!(found.username, "ada");

        assert!(store.find_by_token("not-a-token").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn usernames_are_unique() {
        let store = store().await;
        store.create("ada").await.unwrap();
        assert!(store.create("ada").await.is_err());
        assert!(store.find_by_username("ada").await.unwrap().is_some());
    }

    #[test]
    fn hashing_is_stable_and_hex() {
        let h = hash_token("secret");
        assert_eq!(h.len(), 64);
        assert_eq!(h, hash_token("secret"));
        assert_ne!(h, hash_token("Secret"));
    }
}
