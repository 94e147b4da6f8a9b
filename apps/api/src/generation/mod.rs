// Generated résumé text: a professional summary, bullets for one experience
// entry, and a refined skill list. Backends implement `TextGenerator`; all
// network calls go through llm_client.

pub mod canned;
pub mod draft;
pub mod handlers;
pub mod llm;
pub mod models;
pub mod prompts;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::resume::{Experience, ResumeData};
use crate::persistence::SessionError;

pub use canned::FallbackGenerator;
pub use llm::LlmGenerator;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Please fill in your name and title first")]
    MissingNameOrTitle,

    #[error("Please fill in role and company first")]
    MissingRoleOrCompany,

    #[error("Please add some skills first")]
    NoSkills,

    #[error("experienceId is required for bullets")]
    MissingExperienceId,

    #[error("Experience {0} not found")]
    UnknownExperience(String),

    #[error("The draft changed while text was being generated")]
    Superseded,

    #[error("Text generation failed: {0}")]
    Backend(String),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// A text generation backend. Carried in `AppState` as
/// `Arc<dyn TextGenerator>` and chosen at startup from config.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn summary(&self, data: &ResumeData) -> Result<String, GenerationError>;

    async fn bullets(&self, experience: &Experience) -> Result<Vec<String>, GenerationError>;

    async fn refine_skills(&self, skills: &[String]) -> Result<Vec<String>, GenerationError>;

    /// "fallback" | "llm", for logs and the health endpoint.
    fn backend(&self) -> &'static str;
}
