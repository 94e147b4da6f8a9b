//! Generation against the live draft.
//!
//! A request snapshots the draft and takes a [`GenerationTicket`] before the
//! slow call. The result is written onto whatever the draft is when the call
//! returns, so edits made meanwhile survive. If the draft was cleared or
//! replaced in the meantime, or the target experience was removed, the result
//! is dropped and the draft is left alone.

use tracing::info;

use crate::generation::models::GenerationKind;
use crate::generation::{GenerationError, TextGenerator};
use crate::models::resume::ResumeData;
use crate::persistence::{DraftSession, GenerationTicket};
use crate::resume::editing::update_experience;

pub async fn generate_into_draft(
    session: &DraftSession,
    generator: &dyn TextGenerator,
    kind: GenerationKind,
    experience_id: Option<&str>,
) -> Result<ResumeData, GenerationError> {
    let ticket = session.ticket()?;
    let snapshot = session.current()?;

    match kind {
        GenerationKind::Summary => {
            let info = &snapshot.personal_info;
            if info.name.is_empty() || info.title.is_empty() {
                return Err(GenerationError::MissingNameOrTitle);
            }
            let summary = generator.summary(&snapshot).await?;
            apply(session, ticket, |draft| {
                let mut next = draft.clone();
                next.summary = summary;
                Some(next)
            })
        }
        GenerationKind::Bullets => {
            let id = experience_id.ok_or(GenerationError::MissingExperienceId)?;
            let experience = snapshot
                .find_experience(id)
                .ok_or_else(|| GenerationError::UnknownExperience(id.to_string()))?;
            if experience.role.is_empty() || experience.company.is_empty() {
                return Err(GenerationError::MissingRoleOrCompany);
            }
            let bullets = generator.bullets(experience).await?;
            apply(session, ticket, |draft| {
                update_experience(draft, id, |e| e.bullets = bullets)
            })
        }
        GenerationKind::Skills => {
            if snapshot.skills.is_empty() {
                return Err(GenerationError::NoSkills);
            }
            let skills = generator.refine_skills(&snapshot.skills).await?;
            apply(session, ticket, |draft| {
                let mut next = draft.clone();
                next.skills = skills;
                Some(next)
            })
        }
    }
}

fn apply(
    session: &DraftSession,
    ticket: GenerationTicket,
    edit: impl FnOnce(&ResumeData) -> Option<ResumeData>,
) -> Result<ResumeData, GenerationError> {
    match session.update_if_current(ticket, edit)? {
        Some(draft) => Ok(draft),
        None => {
            info!("Dropping generated text for a draft that has changed");
            Err(GenerationError::Superseded)
        }
    }
}
