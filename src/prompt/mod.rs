// src/prompt/mod.rs
//! Prompt assembly. User text is interpolated verbatim; the upstream API
//! imposes no escaping requirements beyond JSON encoding.

use crate::llm::{ChatTurn, TurnRole};
use crate::mood::Mood;
use crate::persona::persona_prompt;

/// Number of prior messages (current message excluded) carried as context.
pub const HISTORY_WINDOW: usize = 6;

/// System prompt for the single-turn companion endpoint.
pub const COMPANION_SYSTEM_PROMPT: &str = "You are a compassionate, nonjudgmental mental health companion. \
Respond with empathy and supportive language. Do NOT provide medical or legal advice. \
If the user mentions self-harm, suicidal intent, or imminent danger, encourage them to seek \
immediate help and provide crisis resources. Keep replies short and clear (one or two paragraphs).";

/// Renders the most recent `HISTORY_WINDOW` turns as User:/Assistant: lines
/// in chronological order.
fn render_history(history: &[ChatTurn]) -> String {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|turn| {
            let role = match turn.role {
                TurnRole::User => "User",
                TurnRole::Assistant => "Assistant",
            };
            format!("{}: {}\n", role, turn.content)
        })
        .collect()
}

/// Builds the full instruction text sent to the chat model: persona,
/// mood context, trimmed history, the quoted message, and the fixed
/// behavioral instructions.
pub fn build_chat_prompt(mood: Mood, message: &str, history: &[ChatTurn]) -> String {
    let mut prompt = String::new();

    prompt.push_str(persona_prompt(mood));
    prompt.push_str("\n\n");

    prompt.push_str(&format!(
        "Context: You are chatting with someone who selected \"{}\" as their current mood.\n\n",
        mood
    ));

    if history.is_empty() {
        prompt.push_str("This is the start of a new conversation.\n\n");
    } else {
        prompt.push_str("Previous conversation context:\n");
        prompt.push_str(&render_history(history));
        prompt.push('\n');
    }

    prompt.push_str(&format!("User just said: \"{}\"\n\n", message));

    prompt.push_str("Instructions:\n");
    prompt.push_str("- Build on our previous conversation naturally\n");
    prompt.push_str("- Respond directly to what they said with genuine understanding\n");
    prompt.push_str("- Reference previous topics if relevant to show you remember\n");
    prompt.push_str("- Match their energy level and mood appropriately\n");
    prompt.push_str("- Ask thoughtful follow-up questions about their specific situation\n");
    prompt.push_str("- Use their exact words when reflecting back to show you're listening\n");
    prompt.push_str("- Be conversational and natural, like a caring friend who remembers what they shared\n");
    prompt.push_str("- Use emojis sparingly but meaningfully\n");
    prompt.push_str("- Keep response under 120 words\n");
    prompt.push_str("- Make each response unique and personalized to their message and our conversation history\n\n");

    prompt.push_str("Respond now:");

    prompt
}
