//! LLM-backed generator. Any failure of the call itself falls back to the
//! canned text, so callers only ever see a usable result.

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::warn;

use crate::generation::canned::{canned_bullets, canned_skills, CANNED_SUMMARY};
use crate::generation::prompts::{
    bullets_prompt, skills_prompt, summary_prompt, BULLETS_MAX_TOKENS, SKILLS_MAX_TOKENS,
    SUMMARY_MAX_TOKENS,
};
use crate::generation::{GenerationError, TextGenerator};
use crate::llm_client::prompts::RESUME_WRITER_SYSTEM;
use crate::llm_client::{strip_json_fences, LlmClient};
use crate::models::resume::{Experience, ResumeData};

const MAX_LINE_BULLETS: usize = 5;
const MAX_SKILL_CHARS: usize = 50;

static BULLET_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-•*]\s*").expect("valid regex"));
static SKILL_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-•*0-9.]\s*").expect("valid regex"));

pub struct LlmGenerator {
    client: LlmClient,
}

impl LlmGenerator {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Option<String> {
        match self
            .client
            .complete(prompt, RESUME_WRITER_SYSTEM, max_tokens)
            .await
        {
            Ok(text) => Some(text),
            Err(e) => {
                warn!("LLM call failed, using canned text: {e}");
                None
            }
        }
    }
}

#[async_trait]
impl TextGenerator for LlmGenerator {
    async fn summary(&self, data: &ResumeData) -> Result<String, GenerationError> {
        let text = self
            .complete(&summary_prompt(data), SUMMARY_MAX_TOKENS)
            .await;
        Ok(text.unwrap_or_else(|| CANNED_SUMMARY.to_string()))
    }

    async fn bullets(&self, experience: &Experience) -> Result<Vec<String>, GenerationError> {
        let text = self
            .complete(&bullets_prompt(experience), BULLETS_MAX_TOKENS)
            .await;
        Ok(text.map(|t| parse_bullets(&t)).unwrap_or_else(canned_bullets))
    }

    async fn refine_skills(&self, skills: &[String]) -> Result<Vec<String>, GenerationError> {
        let text = self.complete(&skills_prompt(skills), SKILLS_MAX_TOKENS).await;
        Ok(text
            .map(|t| parse_skills(&t, skills))
            .unwrap_or_else(canned_skills))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Reads bullets from a model response.
///
/// A JSON array is taken as-is (string elements only). Any other JSON value
/// yields the canned bullets. Text that is not JSON is split into lines with
/// a leading `-`, `•` or `*` removed, keeping at most five.
pub fn parse_bullets(text: &str) -> Vec<String> {
    let bullets: Vec<String> = match serde_json::from_str::<Value>(strip_json_fences(text)) {
        Ok(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Ok(_) => Vec::new(),
        Err(_) => text
            .lines()
            .map(|line| BULLET_MARKER.replace(line, "").trim().to_string())
            .filter(|line| !line.is_empty())
            .take(MAX_LINE_BULLETS)
            .collect(),
    };

    if bullets.is_empty() {
        canned_bullets()
    } else {
        bullets
    }
}

/// Reads skills from a model response, one per line. A single leading list
/// marker (`-`, `•`, `*`, a digit or `.`) is removed and lines of 50 or more
/// characters are dropped. Falls back to `original` when nothing is left.
pub fn parse_skills(text: &str, original: &[String]) -> Vec<String> {
    let refined: Vec<String> = text
        .lines()
        .map(|line| SKILL_MARKER.replace(line, "").trim().to_string())
        .filter(|line| !line.is_empty() && line.chars().count() < MAX_SKILL_CHARS)
        .collect();

    if refined.is_empty() {
        original.to_vec()
    } else {
        refined
    }
}
