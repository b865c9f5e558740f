// src/mood/classifier.rs
//! Keyword mood classifier. Scans lowercased input against per-mood keyword
//! lists; the mood with the most hits wins, ties go to the earlier entry in
//! the table, and zero hits means Neutral. Never fails.

use super::Mood;

// Order matters: ties are broken by the first mood to reach the max count.
const MOOD_KEYWORDS: [(Mood, &[&str]); 5] = [
    (
        Mood::Happy,
        &[
            "happy", "joy", "excited", "great", "wonderful", "amazing", "good", "cheerful",
        ],
    ),
    (
        Mood::Sad,
        &[
            "sad", "depressed", "down", "unhappy", "miserable", "crying", "tears",
        ],
    ),
    (
        Mood::Anxious,
        &[
            "anxious", "worried", "nervous", "panic", "fear", "scared", "stress",
        ],
    ),
    (
        Mood::Angry,
        &[
            "angry", "mad", "furious", "irritated", "frustrated", "annoyed",
        ],
    ),
    (
        Mood::Stressed,
        &[
            "stressed", "overwhelmed", "pressure", "tired", "exhausted", "busy",
        ],
    ),
];

pub fn classify(text: &str) -> Mood {
    let lowered = text.to_lowercase();

    let mut best = Mood::Neutral;
    let mut best_hits = 0usize;
    for (mood, keywords) in MOOD_KEYWORDS {
        let hits = keywords.iter().filter(|kw| lowered.contains(**kw)).count();
        if hits > best_hits {
            best = mood;
            best_hits = hits;
        }
    }
    best
}
