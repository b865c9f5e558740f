// src/config/mod.rs
// All tunables come from the environment (.env supported), with defaults
// that make a fresh checkout runnable without any keys configured.

use once_cell::sync::Lazy;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct HavenConfig {
    // ── Server
    pub host: String,
    pub port: u16,

    // ── Database
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Gemini (chat-session replies)
    pub gemini_api_key: String,
    pub gemini_model: String,

    // ── OpenAI (companion replies + sentiment classification)
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub companion_model: String,

    // ── Sentiment chain
    pub enable_local_sentiment: bool,

    // ── News feed
    pub news_api_key: String,
    pub news_api_url: String,
    pub news_staleness_hours: i64,
    pub news_timeout_secs: u64,

    // ── Logging
    pub log_level: String,
}

// Values may carry inline comments in .env files; strip them before parsing.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => {
                    eprintln!("Config: {} = '{}' (parse failed, using default)", key, val);
                    default
                }
            }
        }
        Err(_) => default,
    }
}

impl HavenConfig {
    pub fn from_env() -> Self {
        if dotenvy::dotenv().is_err() {
            eprintln!("Warning: .env file not found. Using environment variables and defaults.");
        }

        Self {
            host: env_var_or("HAVEN_HOST", "0.0.0.0".to_string()),
            port: env_var_or("HAVEN_PORT", 8000),
            database_url: env_var_or("DATABASE_URL", "sqlite:./haven.db".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            gemini_api_key: env_var_or("GEMINI_API_KEY", String::new()),
            gemini_model: env_var_or("HAVEN_GEMINI_MODEL", "gemini-2.0-flash".to_string()),
            openai_api_key: env_var_or("OPENAI_API_KEY", String::new()),
            openai_base_url: env_var_or(
                "OPENAI_BASE_URL",
                "https://api.openai.com/v1".to_string(),
            ),
            companion_model: env_var_or("HAVEN_COMPANION_MODEL", "gpt-4o-mini".to_string()),
            enable_local_sentiment: env_var_or("HAVEN_ENABLE_LOCAL_SENTIMENT", false),
            news_api_key: env_var_or("NEWS_API_KEY", String::new()),
            news_api_url: env_var_or(
                "NEWS_API_URL",
                "https://newsapi.org/v2/everything".to_string(),
            ),
            news_staleness_hours: env_var_or("HAVEN_NEWS_STALENESS_HOURS", 6),
            news_timeout_secs: env_var_or("HAVEN_NEWS_TIMEOUT_SECS", 10),
            log_level: env_var_or("HAVEN_LOG_LEVEL", "info".to_string()),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Empty string means "no key configured"; callers never see it as a key.
    pub fn gemini_key(&self) -> Option<&str> {
        non_empty(&self.gemini_api_key)
    }

    pub fn openai_key(&self) -> Option<&str> {
        non_empty(&self.openai_api_key)
    }

    pub fn news_key(&self) -> Option<&str> {
        non_empty(&self.news_api_key)
    }
}

fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

// Global config instance - loaded once at startup
pub static CONFIG: Lazy<HavenConfig> = Lazy::new(HavenConfig::from_env);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = HavenConfig::from_env();

        assert_eq!(config.companion_model, "gpt-4o-mini");
        assert_eq!(config.news_staleness_hours, 6);
        assert_eq!(config.news_timeout_secs, 10);
    }

    #[test]
    fn test_bind_address() {
        let config = HavenConfig::from_env();
        assert!(config.bind_address().contains(':'));
    }

    #[test]
    fn test_empty_keys_are_absent() {
        let config = HavenConfig {
            gemini_api_key: "  ".to_string(),
            ..HavenConfig::from_env()
        };
        assert!(config.gemini_key().is_none());
    }
}
