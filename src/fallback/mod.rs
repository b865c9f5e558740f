// src/fallback/mod.rs
//! Canned supportive responses used whenever the LLM gateway is disabled or
//! errors. Selection randomness sits behind `RandomSource` so tests can pin
//! the choice.

use std::sync::Arc;

use rand::Rng;

use crate::mood::Mood;

pub trait RandomSource: Send + Sync {
    /// Returns an index in `0..len`. `len` is always non-zero.
    fn pick(&self, len: usize) -> usize;
}

pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn pick(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Fixed-index source for deterministic tests.
pub struct FixedSource(pub usize);

impl RandomSource for FixedSource {
    fn pick(&self, len: usize) -> usize {
        self.0 % len
    }
}

// ── Plain pools (companion degrade path) ───────────────────────────────

fn plain_pool(mood: Mood) -> &'static [&'static str; 3] {
    match mood {
        Mood::Happy => &[
            "That's wonderful to hear! What's been bringing you joy lately? I'd love to hear more about what's making you feel this way.",
            "I'm so glad you're feeling happy! Can you share what's been going well for you? Sometimes reflecting on positive moments helps us appreciate them even more.",
            "It's great that you're in a good place right now. What activities or people have been contributing to your happiness?",
        ],
        Mood::Sad => &[
            "I hear you, and I want you to know that it's okay to feel sad. Your feelings are valid. Would you like to talk about what's been weighing on your heart?",
            "Thank you for sharing that with me. Sadness is a natural emotion, and I'm here to support you through it. What's been on your mind?",
            "I'm here for you. Sometimes just talking about what's making us sad can help. Would you like to share more about how you're feeling?",
        ],
        Mood::Anxious => &[
            "I understand that anxiety can feel overwhelming. Let's take this one step at a time. Can you tell me what's been making you feel anxious?",
            "Anxiety is challenging, but you're not alone. I'm here to help. What thoughts or situations have been triggering these feelings?",
            "Thank you for trusting me with this. Let's work through this together. What's been causing you the most worry lately?",
        ],
        Mood::Angry => &[
            "I hear that you're feeling angry, and that's completely valid. Anger often tells us something important. What's been frustrating you?",
            "It's okay to feel angry. Let's talk about what's been bothering you. Sometimes expressing these feelings can help us understand them better.",
            "Thank you for being honest about your anger. I'm here to listen without judgment. What situation or person has been triggering these feelings?",
        ],
        Mood::Stressed => &[
            "Stress can be really difficult to manage. I'm here to help you work through it. What's been causing you the most stress lately?",
            "I understand you're feeling overwhelmed. Let's break things down together. What are the main sources of stress in your life right now?",
            "Thank you for sharing. Stress affects us all. What would help you feel more balanced right now? Let's explore some strategies together.",
        ],
        Mood::Neutral => &[
            "I'm here to listen and support you. How has your day been? Is there anything on your mind you'd like to talk about?",
            "Thank you for reaching out. I'm here for you. What would you like to discuss today?",
            "I'm glad you're here. Sometimes it helps just to talk. What's been happening in your life lately?",
        ],
    }
}

// ── Friendly pools (chat-session degrade path) ─────────────────────────

fn friendly_pool(mood: Mood) -> &'static [&'static str; 3] {
    match mood {
        Mood::Happy => &[
            "That's absolutely wonderful to hear! 😊 Your happiness is contagious! What's been bringing you the most joy lately? I'd love to celebrate with you!",
            "I'm so thrilled that you're feeling happy! 🌟 There's nothing better than hearing someone share their joy. What amazing things have been happening in your life?",
            "Your happiness just made my day brighter! ✨ I can feel your positive energy through your words. Tell me more about what's making you feel so good!",
        ],
        Mood::Sad => &[
            "I'm here with you, and I want you to know that your feelings are completely valid. 💙 It takes courage to share when you're feeling sad. What's been weighing on your heart?",
            "Thank you for trusting me with your feelings. I can sense you're going through a difficult time, and I want you to know you're not alone. Would you like to talk about what's making you feel this way?",
            "I hear you, and I'm sending you so much care and compassion right now. 🤗 Sadness is a natural part of being human. What would help you feel a little bit of comfort today?",
        ],
        Mood::Anxious => &[
            "I can feel that you're feeling anxious, and I want you to know that's completely okay. 🌸 Let's take this one breath at a time. What's been making you feel worried lately?",
            "Anxiety can feel so overwhelming, but you're incredibly brave for reaching out. 💚 I'm right here with you. What thoughts have been racing through your mind?",
            "You're safe here with me. 🕊️ Anxiety is tough, but you're tougher. Let's work through this together. What's been triggering these anxious feelings for you?",
        ],
        Mood::Angry => &[
            "I hear your anger, and it's completely valid to feel this way. 🔥 Anger often tells us something important about our boundaries. What's been frustrating you?",
            "Thank you for being honest about your anger. It takes strength to acknowledge these feelings. 💪 I'm here to listen without any judgment. What's been making you feel this way?",
            "Your anger is telling you something important, and I want to understand. 🤝 You're in a safe space here. What situation or person has been triggering these feelings?",
        ],
        Mood::Stressed => &[
            "I can feel how overwhelmed you must be feeling right now. 🌊 Stress can be so heavy to carry. I'm here to help you sort through this. What's been piling up for you lately?",
            "Stress is exhausting, and you're doing your best to handle everything. 🌱 Let's break things down together. What are the main things that have been stressing you out?",
            "You're carrying a lot right now, and that's really hard. 💜 I'm here to support you through this. What would help you feel even just a little bit lighter today?",
        ],
        Mood::Neutral => &[
            "Hi there! I'm so glad you're here. 😊 I'm here to listen and support you in whatever way you need. How has your day been treating you?",
            "Welcome! It's wonderful to connect with you. 🌟 I'm here as your supportive companion. What's on your mind today?",
            "Hello! I'm really happy you decided to reach out. 💙 This is your safe space to share anything. What would you like to talk about?",
        ],
    }
}

// ── Topic contextualization ────────────────────────────────────────────

struct TopicGroup {
    keywords: &'static [&'static str],
    acknowledgement: &'static str,
    follow_up: &'static str,
}

const TOPICS: [TopicGroup; 7] = [
    TopicGroup {
        keywords: &["work", "job", "boss", "colleague", "office", "meeting"],
        acknowledgement: "I hear that work has been on your mind.",
        follow_up: "What's been happening at work that's affecting you? 💼",
    },
    TopicGroup {
        keywords: &["family", "parent", "sibling", "child", "mom", "dad", "mother", "father"],
        acknowledgement: "Family situations can bring up so many emotions.",
        follow_up: "Tell me more about what's going on with your family. 👨‍👩‍👧‍👦",
    },
    TopicGroup {
        keywords: &["friend", "relationship", "partner", "boyfriend", "girlfriend", "dating"],
        acknowledgement: "Relationships can be both wonderful and challenging.",
        follow_up: "What's been happening in your relationships? 💕",
    },
    TopicGroup {
        keywords: &["school", "study", "exam", "test", "homework", "college", "university"],
        acknowledgement: "School can be so demanding and stressful.",
        follow_up: "What's been the most challenging part of your studies? 📚",
    },
    TopicGroup {
        keywords: &["tired", "exhausted", "sleep", "insomnia"],
        acknowledgement: "Being tired can make everything feel harder.",
        follow_up: "How has your sleep been lately? 😴",
    },
    TopicGroup {
        keywords: &["money", "financial", "bills", "debt", "expensive"],
        acknowledgement: "Financial stress can be really overwhelming.",
        follow_up: "What's been weighing on you financially? 💰",
    },
    TopicGroup {
        keywords: &["health", "sick", "doctor", "hospital", "pain"],
        acknowledgement: "Health concerns can be so scary and stressful.",
        follow_up: "How are you taking care of yourself? 🏥",
    },
];

/// Opening/closing framing used when no topic keyword matches.
fn mood_framing(mood: Mood) -> (&'static str, &'static str) {
    match mood {
        Mood::Happy => (
            "I love hearing positive energy in your message!",
            "What's been the highlight of your day? ✨",
        ),
        Mood::Sad => (
            "I can sense you're going through a tough time right now.",
            "What's been weighing on your heart? 💙",
        ),
        Mood::Anxious => (
            "I can feel some worry in your words.",
            "What thoughts have been racing through your mind? 🌸",
        ),
        Mood::Angry => (
            "I hear some frustration in what you're sharing.",
            "What's been making you feel this way? 🔥",
        ),
        Mood::Stressed => (
            "It sounds like you have a lot on your plate right now.",
            "What's been the most overwhelming part? 🌊",
        ),
        Mood::Neutral => (
            "Thank you for sharing with me.",
            "What's been on your mind today? 💭",
        ),
    }
}

#[derive(Clone)]
pub struct FallbackGenerator {
    rng: Arc<dyn RandomSource>,
}

impl FallbackGenerator {
    pub fn new(rng: Arc<dyn RandomSource>) -> Self {
        Self { rng }
    }

    fn choose(&self, pool: &'static [&'static str; 3]) -> &'static str {
        pool[self.rng.pick(pool.len())]
    }

    /// Short supportive reply for the single-turn companion.
    pub fn plain(&self, mood: Mood) -> String {
        self.choose(plain_pool(mood)).to_string()
    }

    /// Contextualized reply for the chat-session path: reflects the user's
    /// topic back when the message gives enough to work with, otherwise
    /// frames a mood-tailored question around a pool entry.
    pub fn friendly(&self, mood: Mood, message: &str) -> String {
        let pool = friendly_pool(mood);
        let lowered = message.to_lowercase();

        if message.split_whitespace().count() > 3 {
            for topic in &TOPICS {
                if topic.keywords.iter().any(|kw| lowered.contains(kw)) {
                    return format!(
                        "{} {} {}",
                        topic.acknowledgement,
                        self.choose(pool),
                        topic.follow_up
                    );
                }
            }
        }

        let (opening, closing) = mood_framing(mood);
        format!("{} {} {}", opening, self.choose(pool), closing)
    }
}
