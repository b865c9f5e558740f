// src/companion/mod.rs
// Single-turn companion: classify sentiment, reply once, persist both sides.

pub mod store;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::fallback::FallbackGenerator;
use crate::llm::{ChatModel, ChatTurn, CompletionRequest};
use crate::mood::sentiment::{Sentiment, SentimentChain};
use crate::prompt::COMPANION_SYSTEM_PROMPT;
use store::CompanionStore;

/// Requests longer than this are rejected before anything is persisted.
pub const MAX_MESSAGE_CHARS: usize = 2000;

const COMPANION_TEMPERATURE: f32 = 0.7;
const COMPANION_MAX_OUTPUT_TOKENS: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompanionSender {
    User,
    Ai,
}

impl CompanionSender {
    pub fn as_str(self) -> &'static str {
        match self {
            CompanionSender::User => "user",
            CompanionSender::Ai => "ai",
        }
    }
}

impl std::str::FromStr for CompanionSender {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(CompanionSender::User),
            "ai" => Ok(CompanionSender::Ai),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanionMessage {
    pub id: i64,
    pub user_id: Option<String>,
    pub sender: CompanionSender,
    pub text: String,
    pub mood_label: Option<String>,
    pub mood_score: Option<f64>,
    pub created_at: DateTime<Utc>,
}

pub struct CompanionReply {
    pub user_message: CompanionMessage,
    pub ai_message: CompanionMessage,
    pub mood: Sentiment,
}

pub struct CompanionService {
    store: CompanionStore,
    model: Arc<dyn ChatModel>,
    sentiment: SentimentChain,
    fallback: FallbackGenerator,
}

impl CompanionService {
    pub fn new(
        store: CompanionStore,
        model: Arc<dyn ChatModel>,
        sentiment: SentimentChain,
        fallback: FallbackGenerator,
    ) -> Self {
        Self {
            store,
            model,
            sentiment,
            fallback,
        }
    }

    /// Handles one validated message. Gateway failures degrade to canned
    /// text; this method only errors on storage failures.
    pub async fn respond(&self, user_id: Option<&str>, message: &str) -> Result<CompanionReply> {
        let mood = self.sentiment.analyze(message).await;

        let user_message = self
            .store
            .insert(
                user_id,
                CompanionSender::User,
                message,
                Some(mood),
            )
            .await?;

        let request = CompletionRequest {
            system: Some(COMPANION_SYSTEM_PROMPT.to_string()),
            turns: vec![ChatTurn::user(message)],
            temperature: COMPANION_TEMPERATURE,
            max_output_tokens: COMPANION_MAX_OUTPUT_TOKENS,
            top_p: None,
        };

        let ai_text = match self.model.complete(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!("companion completion failed, falling back: {}", e);
                let mut text = self.fallback.plain(mood.label.nearest_mood());
                if let Some(hint) = e.remediation_hint() {
                    text.push_str(hint);
                }
                text
            }
        };

        let ai_message = self
            .store
            .insert(user_id, CompanionSender::Ai, &ai_text, None)
            .await?;

        Ok(CompanionReply {
            user_message,
            ai_message,
            mood,
        })
    }

    /// Most recent exchanges, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<CompanionMessage>> {
        self.store.recent(limit).await
    }
}
