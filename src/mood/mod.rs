// src/mood/mod.rs
// Mood vocabulary shared by the classifier, personas, and fallback pools.

pub mod classifier;
pub mod sentiment;
pub mod store;

use serde::{Deserialize, Serialize};

/// The fixed mood vocabulary. Anything outside it degrades to Neutral at
/// every lookup site (personas, fallback pools, prompt selection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Anxious,
    Angry,
    Stressed,
    Neutral,
}

impl Mood {
    pub const ALL: [Mood; 6] = [
        Mood::Happy,
        Mood::Sad,
        Mood::Anxious,
        Mood::Angry,
        Mood::Stressed,
        Mood::Neutral,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Anxious => "anxious",
            Mood::Angry => "angry",
            Mood::Stressed => "stressed",
            Mood::Neutral => "neutral",
        }
    }

    /// Lenient parse used wherever a mood arrives as free text from a
    /// client: unknown labels become Neutral instead of failing.
    pub fn from_label(label: &str) -> Mood {
        label.parse().unwrap_or(Mood::Neutral)
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Mood {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "happy" => Ok(Mood::Happy),
            "sad" => Ok(Mood::Sad),
            "anxious" => Ok(Mood::Anxious),
            "angry" => Ok(Mood::Angry),
            "stressed" => Ok(Mood::Stressed),
            "neutral" => Ok(Mood::Neutral),
            _ => Err(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for mood in Mood::ALL {
            assert_eq!(mood.as_str().parse::<Mood>().unwrap(), mood);
        }
    }

    #[test]
    fn unknown_labels_default_to_neutral() {
        assert_eq!(Mood::from_label("melancholic"), Mood::Neutral);
        assert_eq!(Mood::from_label(""), Mood::Neutral);
        assert_eq!(Mood::from_label("  HAPPY "), Mood::Happy);
    }

    #[test]
    fn serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Mood::Anxious).unwrap(), "\"anxious\"");
        let parsed: Mood = serde_json::from_str("\"stressed\"").unwrap();
        assert_eq!(parsed, Mood::Stressed);
    }
}
