// src/state.rs
// Shared application state handed to every handler.

use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::auth::UserStore;
use crate::chat::service::ChatService;
use crate::chat::store::SessionStore;
use crate::companion::store::CompanionStore;
use crate::companion::CompanionService;
use crate::fallback::{FallbackGenerator, RandomSource, ThreadRngSource};
use crate::journal::store::JournalStore;
use crate::llm::ChatModel;
use crate::mood::sentiment::{LlmSentiment, LocalLexicon, SentimentChain, SentimentStrategy};
use crate::mood::store::MoodStore;
use crate::news::service::NewsService;
use crate::news::store::ArticleStore;
use crate::wellness::store::WellnessStore;

pub struct AppState {
    pub users: UserStore,
    pub sessions: SessionStore,
    pub chat: ChatService,
    pub companion: CompanionService,
    pub moods: MoodStore,
    pub journal: JournalStore,
    pub wellness: WellnessStore,
    pub news: NewsService,
}

/// Everything `create_app_state` needs beyond the database pool. Models are
/// injected so tests can swap in stubs.
pub struct StateOptions {
    pub chat_model: Arc<dyn ChatModel>,
    pub companion_model: Arc<dyn ChatModel>,
    pub enable_local_sentiment: bool,
    pub news_api_key: Option<String>,
    pub news_api_url: String,
    pub news_staleness_hours: i64,
    pub news_timeout_secs: u64,
}

pub fn create_app_state(pool: SqlitePool, options: StateOptions) -> Result<Arc<AppState>> {
    let rng: Arc<dyn RandomSource> = Arc::new(ThreadRngSource);
    let fallback = FallbackGenerator::new(rng);

    let sessions = SessionStore::new(pool.clone());
    let moods = MoodStore::new(pool.clone());
    let chat = ChatService::new(
        sessions.clone(),
        moods.clone(),
        options.chat_model,
        fallback.clone(),
    );

    let mut strategies: Vec<Box<dyn SentimentStrategy>> = Vec::new();
    if options.enable_local_sentiment {
        strategies.push(Box::new(LocalLexicon));
    }
    strategies.push(Box::new(LlmSentiment::new(options.companion_model.clone())));
    let sentiment = SentimentChain::new(strategies);

    let companion = CompanionService::new(
        CompanionStore::new(pool.clone()),
        options.companion_model,
        sentiment,
        fallback,
    );

    let news = NewsService::new(
        ArticleStore::new(pool.clone()),
        options.news_api_key,
        options.news_api_url,
        options.news_staleness_hours,
        options.news_timeout_secs,
    )?;

    Ok(Arc::new(AppState {
        users: UserStore::new(pool.clone()),
        sessions,
        chat,
        companion,
        moods,
        journal: JournalStore::new(pool.clone()),
        wellness: WellnessStore::new(pool),
        news,
    }))
}
