// src/mood/sentiment.rs
//! Sentiment classification for the single-turn companion service.
//!
//! Strategies are tried in order; the first one that returns a result wins.
//! The terminal keyword heuristic cannot fail, so the chain always produces
//! a label.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::llm::{ChatModel, CompletionRequest, ChatTurn};
use crate::mood::Mood;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

impl SentimentLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Negative => "Negative",
        }
    }

    /// Mood used when the companion has to fall back to canned text.
    pub fn nearest_mood(self) -> Mood {
        match self {
            SentimentLabel::Positive => Mood::Happy,
            SentimentLabel::Neutral => Mood::Neutral,
            SentimentLabel::Negative => Mood::Sad,
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: f64,
}

#[async_trait]
pub trait SentimentStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    async fn analyze(&self, text: &str) -> anyhow::Result<Sentiment>;
}

/// Ordered strategy list with an infallible keyword terminal.
pub struct SentimentChain {
    strategies: Vec<Box<dyn SentimentStrategy>>,
}

impl SentimentChain {
    pub fn new(strategies: Vec<Box<dyn SentimentStrategy>>) -> Self {
        Self { strategies }
    }

    pub async fn analyze(&self, text: &str) -> Sentiment {
        for strategy in &self.strategies {
            match strategy.analyze(text).await {
                Ok(sentiment) => return sentiment,
                Err(e) => debug!("sentiment strategy {} unavailable: {}", strategy.name(), e),
            }
        }
        keyword_heuristic(text)
    }
}

/// Last-resort bucket classifier with fixed confidence scores.
pub fn keyword_heuristic(text: &str) -> Sentiment {
    let lowered = text.to_lowercase();

    const NEGATIVE: [&str; 5] = ["sad", "depressed", "suicid", "hopeless", "angry"];
    const NEUTRAL: [&str; 5] = ["okay", "fine", "neutral", "so-so", "meh"];

    if NEGATIVE.iter().any(|kw| lowered.contains(kw)) {
        return Sentiment {
            label: SentimentLabel::Negative,
            score: 0.9,
        };
    }
    if NEUTRAL.iter().any(|kw| lowered.contains(kw)) {
        return Sentiment {
            label: SentimentLabel::Neutral,
            score: 0.6,
        };
    }
    Sentiment {
        label: SentimentLabel::Positive,
        score: 0.7,
    }
}

// ── Local lexicon strategy ─────────────────────────────────────────────

/// Small valence lexicon standing in for an on-box sentiment model.
/// Only wired into the chain when enabled in config.
pub struct LocalLexicon;

const POSITIVE_WORDS: [&str; 12] = [
    "happy", "joy", "glad", "great", "wonderful", "love", "excited", "grateful", "proud",
    "hopeful", "calm", "relieved",
];
const NEGATIVE_WORDS: [&str; 12] = [
    "sad", "angry", "hate", "awful", "terrible", "anxious", "scared", "lonely", "hopeless",
    "worthless", "miserable", "exhausted",
];

#[async_trait]
impl SentimentStrategy for LocalLexicon {
    fn name(&self) -> &'static str {
        "local-lexicon"
    }

    async fn analyze(&self, text: &str) -> anyhow::Result<Sentiment> {
        let lowered = text.to_lowercase();
        let positive = POSITIVE_WORDS.iter().filter(|w| lowered.contains(**w)).count() as i64;
        let negative = NEGATIVE_WORDS.iter().filter(|w| lowered.contains(**w)).count() as i64;

        let net = positive - negative;
        let label = match net {
            n if n > 0 => SentimentLabel::Positive,
            n if n < 0 => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        };
        // Confidence grows with the margin, capped below certainty.
        let score = (0.5 + 0.1 * net.unsigned_abs() as f64).min(0.95);

        Ok(Sentiment { label, score })
    }
}

// ── LLM strategy ───────────────────────────────────────────────────────

/// Asks the companion model for a strict-JSON classification. Any transport
/// or parse failure hands control to the next strategy.
pub struct LlmSentiment {
    model: Arc<dyn ChatModel>,
}

impl LlmSentiment {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

#[derive(Deserialize)]
struct RawClassification {
    label: Option<String>,
    score: Option<f64>,
}

#[async_trait]
impl SentimentStrategy for LlmSentiment {
    fn name(&self) -> &'static str {
        "llm-json"
    }

    async fn analyze(&self, text: &str) -> anyhow::Result<Sentiment> {
        let prompt = format!(
            "Classify the sentiment of the text that follows into Positive, Neutral, or Negative. \
             Return strictly JSON like: {{\"label\": \"Positive\", \"score\": 0.83}}\n\nText: \"{}\"",
            text
        );

        let request = CompletionRequest {
            system: None,
            turns: vec![ChatTurn::user(prompt)],
            temperature: 0.0,
            max_output_tokens: 60,
            top_p: None,
        };

        let content = self.model.complete(&request).await?;
        let parsed: RawClassification = serde_json::from_str(content.trim())?;

        let label = match parsed.label.as_deref().unwrap_or("Neutral").to_lowercase().as_str() {
            "positive" => SentimentLabel::Positive,
            "negative" => SentimentLabel::Negative,
            _ => SentimentLabel::Neutral,
        };

        Ok(Sentiment {
            label,
            score: parsed.score.unwrap_or(0.0),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::LlmError;

    struct FailingStrategy;

    #[async_trait]
    impl SentimentStrategy for FailingStrategy {
        fn name(&self) -> &'static str {
            "failing"
        }
        async fn analyze(&self, _text: &str) -> anyhow::Result<Sentiment> {
            anyhow::bail!("unavailable")
        }
    }

    struct FixedStrategy(Sentiment);

    #[async_trait]
    impl SentimentStrategy for FixedStrategy {
        fn name(&self) -> &'static str {
            "fixed"
        }
        async fn analyze(&self, _text: &str) -> anyhow::Result<Sentiment> {
            Ok(self.0)
        }
    }

    struct ErrModel;

    #[async_trait]
    impl ChatModel for ErrModel {
        async fn complete(&self, _request: &CompletionRequest) -> Result<String, LlmError> {
            Err(LlmError::MissingApiKey)
        }
    }

    #[test]
    fn heuristic_buckets() {
        assert_eq!(keyword_heuristic("I feel hopeless").label, SentimentLabel::Negative);
        assert_eq!(keyword_heuristic("I feel hopeless").score, 0.9);
        assert_eq!(keyword_heuristic("I'm doing okay I guess").label, SentimentLabel::Neutral);
        assert_eq!(keyword_heuristic("I'm doing okay I guess").score, 0.6);
        assert_eq!(keyword_heuristic("what a lovely morning").label, SentimentLabel::Positive);
        assert_eq!(keyword_heuristic("what a lovely morning").score, 0.7);
    }

    #[tokio::test]
    async fn first_successful_strategy_wins() {
        let fixed = Sentiment {
            label: SentimentLabel::Negative,
            score: 0.42,
        };
        let chain = SentimentChain::new(vec![
            Box::new(FailingStrategy),
            Box::new(FixedStrategy(fixed)),
        ]);
        assert_eq!(chain.analyze("whatever").await, fixed);
    }

    #[tokio::test]
    async fn empty_chain_falls_back_to_heuristic() {
        let chain = SentimentChain::new(vec![]);
        let result = chain.analyze("feeling so depressed today").await;
        assert_eq!(result.label, SentimentLabel::Negative);
    }

    #[tokio::test]
    async fn llm_strategy_errors_do_not_escape_chain() {
        let chain = SentimentChain::new(vec![Box::new(LlmSentiment::new(Arc::new(ErrModel)))]);
        let result = chain.analyze("I'm fine, thanks").await;
        assert_eq!(result.label, SentimentLabel::Neutral);
    }

    #[tokio::test]
    async fn local_lexicon_net_valence() {
        let lexicon = LocalLexicon;
        let negative = lexicon.analyze("lonely and miserable tonight").await.unwrap();
        assert_eq!(negative.label, SentimentLabel::Negative);

        let positive = lexicon.analyze("grateful and hopeful about tomorrow").await.unwrap();
        assert_eq!(positive.label, SentimentLabel::Positive);

        let neutral = lexicon.analyze("the bus arrives at nine").await.unwrap();
        assert_eq!(neutral.label, SentimentLabel::Neutral);
        assert!((neutral.score - 0.5).abs() < 1e-9);
    }
}
