// src/news/store.rs

use anyhow::Result;
use chrono::{Duration, NaiveDateTime, TimeZone, Utc};
use sqlx::{Row, SqlitePool};

use super::{Article, NewArticle};

#[derive(Clone)]
pub struct ArticleStore {
    pool: SqlitePool,
}

impl ArticleStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts a batch, skipping anything already cached (url is unique).
    /// Returns how many rows were actually added.
    pub async fn upsert(&self, articles: &[NewArticle]) -> Result<u64> {
        let now = Utc::now();
        let mut inserted = 0;
        for article in articles {
            let result = sqlx::query(
                r#"
                INSERT OR IGNORE INTO articles (title, description, url, image_url, source, published_at, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&article.title)
            .bind(&article.description)
            .bind(&article.url)
            .bind(&article.image_url)
            .bind(&article.source)
            .bind(article.published_at.naive_utc())
            .bind(now.naive_utc())
            .execute(&self.pool)
            .await?;
            inserted += result.rows_affected();
        }
        Ok(inserted)
    }

    pub async fn newest(&self, limit: i64) -> Result<Vec<Article>> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, description, url, image_url, source, published_at, created_at
            FROM articles
            ORDER BY published_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(article_from_row).collect())
    }

    /// True when any article was cached within the staleness window.
    pub async fn has_recent(&self, max_age_hours: i64) -> Result<bool> {
        let cutoff = Utc::now() - Duration::hours(max_age_hours);
        let row = sqlx::query("SELECT COUNT(*) AS n FROM articles WHERE created_at >= ?")
            .bind(cutoff.naive_utc())
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.get("n");
        Ok(n > 0)
    }

    pub async fn is_empty(&self) -> Result<bool> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM articles")
            .fetch_one(&self.pool)
            .await?;
        let n: i64 = row.get("n");
        Ok(n == 0)
    }
}

fn article_from_row(row: sqlx::sqlite::SqliteRow) -> Article {
    let published_at: NaiveDateTime = row.get("published_at");
    let created_at: NaiveDateTime = row.get("created_at");
    Article {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        url: row.get("url"),
        image_url: row.get("image_url"),
        source: row.get("source"),
        published_at: Utc.from_utc_datetime(&published_at),
        created_at: Utc.from_utc_datetime(&created_at),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;

    async fn store() -> ArticleStore {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        crate::db::run_migrations(&pool).await.unwrap();
        ArticleStore::new(pool)
    }

    fn article(url: &str, hours_ago: i64) -> NewArticle {
        NewArticle {
            title: format!("Article at {url}"),
            description: String::new(),
            url: url.to_string(),
            image_url: None,
            source: "Test Wire".to_string(),
            published_at: Utc::now() - Duration::hours(hours_ago),
        }
    }

    #[tokio::test]
    async fn duplicate_urls_are_ignored() {
        let store = store().await;
        assert!(store.is_empty().await.unwrap());

        let batch = vec![article("https://a.example/1", 1), article("https://a.example/2", 2)];
        assert_eq!(store.upsert(&batch).await.unwrap(), 2);
        assert_eq!(store.upsert(&batch).await.unwrap(), 0);

        let newest = store.newest(20).await.unwrap();
        assert_eq!(newest.len(), 2);
        assert_eq!(newest[0].url, "https://a.example/1");
    }

    #[tokio::test]
    async fn recency_tracks_cache_time_not_publish_time() {
        let store = store().await;
        // Published a week ago, but cached just now.
        store.upsert(&[article("https://a.example/old", 168)]).await.unwrap();
        assert!(store.has_recent(6).await.unwrap());
    }
}
