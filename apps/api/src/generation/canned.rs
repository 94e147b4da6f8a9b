//! Canned generation results, used when no API key is configured and
//! whenever the LLM call fails.

use std::time::Duration;

use async_trait::async_trait;

use crate::generation::{GenerationError, TextGenerator};
use crate::models::resume::{Experience, ResumeData};

pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(1500);

pub const CANNED_SUMMARY: &str = "Experienced professional with a strong background in \
    technology and innovation. Proven track record of delivering high-quality solutions \
    and driving business growth through strategic thinking and technical expertise.";

pub const CANNED_BULLETS: [&str; 4] = [
    "Led cross-functional teams to deliver projects 20% ahead of schedule",
    "Implemented process improvements that increased efficiency by 35%",
    "Collaborated with stakeholders to define and execute strategic initiatives",
    "Mentored junior team members and contributed to knowledge sharing initiatives",
];

pub const CANNED_SKILLS: [&str; 8] = [
    "JavaScript",
    "TypeScript",
    "React",
    "Node.js",
    "Python",
    "AWS",
    "Docker",
    "Kubernetes",
];

pub fn canned_bullets() -> Vec<String> {
    CANNED_BULLETS.iter().map(|s| s.to_string()).collect()
}

pub fn canned_skills() -> Vec<String> {
    CANNED_SKILLS.iter().map(|s| s.to_string()).collect()
}

/// Answers every request with the canned text after a simulated delay.
pub struct FallbackGenerator {
    delay: Duration,
}

impl FallbackGenerator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FallbackGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_DELAY)
    }
}

#[async_trait]
impl TextGenerator for FallbackGenerator {
    async fn summary(&self, _data: &ResumeData) -> Result<String, GenerationError> {
        tokio::time::sleep(self.delay).await;
        Ok(CANNED_SUMMARY.to_string())
    }

    async fn bullets(&self, _experience: &Experience) -> Result<Vec<String>, GenerationError> {
        tokio::time::sleep(self.delay).await;
        Ok(canned_bullets())
    }

    async fn refine_skills(&self, _skills: &[String]) -> Result<Vec<String>, GenerationError> {
        tokio::time::sleep(self.delay).await;
        Ok(canned_skills())
    }

    fn backend(&self) -> &'static str {
        "fallback"
    }
}
