// src/chat/service.rs
//! Orchestrates one chat turn: persist the user message, build the prompt,
//! call the model, and degrade to canned text on any gateway error. The
//! caller can never tell a fallback from a genuine completion.

use anyhow::Result;
use std::sync::Arc;
use tracing::warn;

use super::store::SessionStore;
use super::{ChatMessage, ChatSession, Sender};
use crate::fallback::FallbackGenerator;
use crate::llm::{ChatModel, ChatTurn, CompletionRequest};
use crate::mood::store::MoodStore;
use crate::mood::Mood;
use crate::prompt::build_chat_prompt;

const CHAT_TEMPERATURE: f32 = 0.8;
const CHAT_MAX_OUTPUT_TOKENS: u32 = 150;
const CHAT_TOP_P: f32 = 0.9;

pub struct ChatService {
    sessions: SessionStore,
    moods: MoodStore,
    model: Arc<dyn ChatModel>,
    fallback: FallbackGenerator,
}

impl ChatService {
    pub fn new(
        sessions: SessionStore,
        moods: MoodStore,
        model: Arc<dyn ChatModel>,
        fallback: FallbackGenerator,
    ) -> Self {
        Self {
            sessions,
            moods,
            model,
            fallback,
        }
    }

    /// Starts a session: records a mood entry as a side effect and seeds
    /// the conversation with the bot greeting.
    pub async fn create_session(
        &self,
        user_id: &str,
        mood_label: Option<&str>,
    ) -> Result<(ChatSession, Vec<ChatMessage>)> {
        let mood = mood_label.map(Mood::from_label).unwrap_or(Mood::Neutral);

        let session = self.sessions.create(user_id, mood).await?;

        self.moods
            .insert(
                user_id,
                mood,
                &format!("Started chat session with {} mood", mood),
            )
            .await?;

        let greeting = format!(
            "Hello! I'm here to support you. I understand you're feeling {}. How can I help you today?",
            mood
        );
        let message = self
            .sessions
            .append_message(&session.id, Sender::Bot, &greeting)
            .await?;

        Ok((session, vec![message]))
    }

    /// One pass, no retries: user message is persisted before the model is
    /// consulted, and a bot message is always persisted afterwards.
    pub async fn send_message(
        &self,
        session: &ChatSession,
        message: &str,
    ) -> Result<(ChatMessage, ChatMessage)> {
        // History is loaded before the insert so the window never includes
        // the message being answered.
        let history = self.sessions.history(&session.id).await?;

        let user_message = self
            .sessions
            .append_message(&session.id, Sender::User, message)
            .await?;

        let turns: Vec<ChatTurn> = history
            .iter()
            .map(|m| match m.sender {
                Sender::User => ChatTurn::user(m.content.as_str()),
                Sender::Bot => ChatTurn::assistant(m.content.as_str()),
            })
            .collect();

        let prompt = build_chat_prompt(session.mood, message, &turns);
        let request = CompletionRequest {
            system: None,
            turns: vec![ChatTurn::user(prompt)],
            temperature: CHAT_TEMPERATURE,
            max_output_tokens: CHAT_MAX_OUTPUT_TOKENS,
            top_p: Some(CHAT_TOP_P),
        };

        let reply = match self.model.complete(&request).await {
            Ok(text) => text,
            Err(e) => {
                warn!("chat completion failed, falling back to canned reply: {}", e);
                let mut text = self.fallback.friendly(session.mood, message);
                if let Some(hint) = e.remediation_hint() {
                    text.push_str(hint);
                }
                text
            }
        };

        let bot_message = self
            .sessions
            .append_message(&session.id, Sender::Bot, &reply)
            .await?;

        Ok((user_message, bot_message))
    }
}
