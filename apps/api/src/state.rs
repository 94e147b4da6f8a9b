use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::generation::{FallbackGenerator, LlmGenerator, TextGenerator};
use crate::llm_client::{LlmClient, MODEL};
use crate::persistence::{DraftRepository, DraftSession, DraftStore};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// The one draft this service edits. Hydrated once at startup.
    pub session: Arc<DraftSession>,
    /// Pluggable text generator. LLM-backed when OPENAI_API_KEY is set,
    /// canned fallback otherwise.
    pub generator: Arc<dyn TextGenerator>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn DraftStore>,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        let repository = DraftRepository::new(store, config.draft_key.clone());
        let session = Arc::new(DraftSession::new(repository, config.autosave_debounce));
        Self {
            config,
            session,
            generator,
        }
    }
}

pub fn build_generator(config: &Config) -> Arc<dyn TextGenerator> {
    match &config.openai_api_key {
        Some(key) => {
            info!("Text generation via LLM (model: {MODEL})");
            Arc::new(LlmGenerator::new(LlmClient::new(
                key.clone(),
                &config.openai_base_url,
            )))
        }
        None => {
            info!(
                "OPENAI_API_KEY not set; using canned text after {}ms",
                config.generation_fallback_delay.as_millis()
            );
            Arc::new(FallbackGenerator::new(config.generation_fallback_delay))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_choice_follows_api_key() {
        let mut config = Config::default();
        assert_eq!(build_generator(&config).backend(), "fallback");

        config.openai_api_key = Some("sk-test".into());
        assert_eq!(build_generator(&config).backend(), "llm");
    }
}
