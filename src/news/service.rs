// src/news/service.rs

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{info, warn};

use super::store::ArticleStore;
use super::{Article, NewArticle};

const FEED_LIMIT: i64 = 20;
const SEARCH_QUERY: &str = "mental health OR wellness OR mindfulness";

pub struct NewsService {
    store: ArticleStore,
    client: reqwest::Client,
    api_key: Option<String>,
    api_url: String,
    staleness_hours: i64,
}

impl NewsService {
    pub fn new(
        store: ArticleStore,
        api_key: Option<String>,
        api_url: String,
        staleness_hours: i64,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("failed to build news HTTP client")?;
        Ok(Self {
            store,
            client,
            api_key,
            api_url,
            staleness_hours,
        })
    }

    /// Returns the newest cached articles, refreshing the cache first if it
    /// has gone stale. `force` bypasses the staleness check.
    pub async fn feed(&self, force: bool) -> Result<Vec<Article>> {
        self.refresh(force).await?;
        self.store.newest(FEED_LIMIT).await
    }

    pub async fn refresh(&self, force: bool) -> Result<()> {
        if !force && self.store.has_recent(self.staleness_hours).await? {
            return Ok(());
        }

        match self.fetch_remote().await {
            Ok(articles) if !articles.is_empty() => {
                let added = self.store.upsert(&articles).await?;
                info!(fetched = articles.len(), added, "refreshed news cache");
            }
            Ok(_) => {
                warn!("news API returned no articles");
                self.seed_if_empty().await?;
            }
            Err(err) => {
                warn!(error = %err, "news fetch failed, serving cached articles");
                self.seed_if_empty().await?;
            }
        }
        Ok(())
    }

    async fn fetch_remote(&self) -> Result<Vec<NewArticle>> {
        let api_key = self
            .api_key
            .as_deref()
            .context("no news API key configured")?;

        let response = self
            .client
            .get(&self.api_url)
            .query(&[
                ("q", SEARCH_QUERY),
                ("language", "en"),
                ("sortBy", "publishedAt"),
                ("pageSize", "20"),
                ("apiKey", api_key),
            ])
            .send()
            .await
            .context("news API request failed")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("news API returned {status}");
        }

        let body: NewsApiResponse = response
            .json()
            .await
            .context("failed to parse news API response")?;

        Ok(body
            .articles
            .into_iter()
            .filter_map(raw_to_article)
            .collect())
    }

    /// The feed should never be blank on a fresh database, so a failed or
    /// keyless fetch falls back to a couple of evergreen pieces.
    async fn seed_if_empty(&self) -> Result<()> {
        if !self.store.is_empty().await? {
            return Ok(());
        }
        let added = self.store.upsert(&sample_articles()).await?;
        info!(added, "seeded news cache with sample articles");
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct NewsApiResponse {
    #[serde(default)]
    articles: Vec<RawArticle>,
}

#[derive(Debug, Deserialize)]
struct RawArticle {
    title: Option<String>,
    description: Option<String>,
    url: Option<String>,
    #[serde(rename = "urlToImage")]
    url_to_image: Option<String>,
    source: Option<RawSource>,
    #[serde(rename = "publishedAt")]
    published_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawSource {
    name: Option<String>,
}

fn raw_to_article(raw: RawArticle) -> Option<NewArticle> {
    let title = raw.title?;
    let url = raw.url?;
    if title.trim().is_empty() || url.trim().is_empty() {
        return None;
    }
    let published_at = raw
        .published_at
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    Some(NewArticle {
        title,
        description: raw.description.unwrap_or_default(),
        url,
        image_url: raw.url_to_image,
        source: raw
            .source
            .and_then(|s| s.name)
            .unwrap_or_else(|| "Unknown".to_string()),
        published_at,
    })
}

fn sample_articles() -> Vec<NewArticle> {
    let now = Utc::now();
    vec![
        NewArticle {
            title: "5 Simple Mindfulness Exercises You Can Do Anywhere".to_string(),
            description: "Short grounding practices that fit into a busy day, from box \
                          breathing to a one-minute body scan."
                .to_string(),
            url: "https://example.com/mindfulness-exercises".to_string(),
            image_url: None,
            source: "Wellness Weekly".to_string(),
            published_at: now,
        },
        NewArticle {
            title: "How Journaling Supports Mental Health".to_string(),
            description: "Research continues to link regular expressive writing with lower \
                          stress and better emotional awareness."
                .to_string(),
            url: "https://example.com/journaling-mental-health".to_string(),
            image_url: None,
            source: "Mind Matters".to_string(),
            published_at: now,
        },
    ]
}
