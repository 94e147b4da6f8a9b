use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::llm_client::DEFAULT_BASE_URL;
use crate::persistence::DEFAULT_DRAFT_KEY;
use crate::resume::scoring::ScoringMode;
use crate::transfer::codec::ImportMode;

/// Application configuration loaded from environment variables.
/// Everything has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub draft_dir: PathBuf,
    pub draft_key: String,
    pub autosave_debounce: Duration,
    pub scoring_mode: ScoringMode,
    pub import_mode: ImportMode,
    /// Absent means the canned fallback generator is used.
    pub openai_api_key: Option<String>,
    pub openai_base_url: String,
    pub generation_fallback_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            draft_dir: PathBuf::from("./data"),
            draft_key: DEFAULT_DRAFT_KEY.to_string(),
            autosave_debounce: Duration::from_millis(500),
            scoring_mode: ScoringMode::default(),
            import_mode: ImportMode::default(),
            openai_api_key: None,
            openai_base_url: DEFAULT_BASE_URL.to_string(),
            generation_fallback_delay: Duration::from_millis(1500),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_env("PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            draft_dir: optional_env("DRAFT_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.draft_dir),
            draft_key: optional_env("DRAFT_KEY").unwrap_or(defaults.draft_key),
            autosave_debounce: Duration::from_millis(
                parse_env("AUTOSAVE_DEBOUNCE_MS", 500)
                    .context("AUTOSAVE_DEBOUNCE_MS must be a number of milliseconds")?,
            ),
            scoring_mode: parse_env("SCORING_MODE", defaults.scoring_mode)?,
            import_mode: parse_env("IMPORT_MODE", defaults.import_mode)?,
            openai_api_key: optional_env("OPENAI_API_KEY"),
            openai_base_url: optional_env("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            generation_fallback_delay: Duration::from_millis(
                parse_env("GENERATION_FALLBACK_DELAY_MS", 1500)
                    .context("GENERATION_FALLBACK_DELAY_MS must be a number of milliseconds")?,
            ),
        })
    }
}

/// Set and non-blank, trimmed.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional_env(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow!("Invalid value '{raw}' for environment variable '{key}': {e}")),
    }
}
