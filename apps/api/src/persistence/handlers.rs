//! Axum route handlers for the live draft.
//!
//! Every accepted edit goes through [`DraftSession`](crate::persistence::DraftSession),
//! which schedules the debounced autosave.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::resume::editing::{
    add_custom_item, add_skills, clear_skills, remove_custom_item, remove_custom_section,
    remove_education, remove_experience, remove_skill, update_custom_item,
    with_new_custom_section, with_new_education, with_new_experience,
};
use crate::resume::handlers::ResumeReport;
use crate::resume::normalize::{apply_blur, BlurField};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct BlurResponse {
    pub changed: bool,
    pub draft: ResumeData,
}

#[derive(Debug, Serialize)]
pub struct CreatedEntry {
    pub id: String,
    pub draft: ResumeData,
}

#[derive(Debug, Deserialize)]
pub struct SkillsRequest {
    /// One or more skills separated by commas or newlines.
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemRequest {
    pub value: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Whole draft
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/draft
pub async fn handle_get_draft(State(state): State<AppState>) -> Result<Json<ResumeData>, AppError> {
    Ok(Json(state.session.current()?))
}

/// PUT /api/v1/draft
pub async fn handle_put_draft(
    State(state): State<AppState>,
    Json(mut data): Json<ResumeData>,
) -> Result<Json<ResumeData>, AppError> {
    let repaired = data.repair_entry_ids();
    if repaired > 0 {
        debug!("Assigned fresh ids to {repaired} entries in submitted draft");
    }
    state.session.replace(data.clone())?;
    Ok(Json(data))
}

/// DELETE /api/v1/draft
pub async fn handle_clear_draft(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.session.clear()?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/draft/blur
pub async fn handle_blur(
    State(state): State<AppState>,
    Json(field): Json<BlurField>,
) -> Result<Json<BlurResponse>, AppError> {
    match state.session.update(|d| apply_blur(d, &field))? {
        Some(draft) => Ok(Json(BlurResponse {
            changed: true,
            draft,
        })),
        None => Ok(Json(BlurResponse {
            changed: false,
            draft: state.session.current()?,
        })),
    }
}

/// GET /api/v1/draft/quality
pub async fn handle_draft_quality(
    State(state): State<AppState>,
) -> Result<Json<ResumeReport>, AppError> {
    let draft = state.session.current()?;
    Ok(Json(ResumeReport::build(&draft, state.config.scoring_mode)))
}

// ────────────────────────────────────────────────────────────────────────────
// Entries
// ────────────────────────────────────────────────────────────────────────────

fn created(
    state: &AppState,
    insert: fn(&ResumeData) -> (ResumeData, String),
) -> Result<(StatusCode, Json<CreatedEntry>), AppError> {
    let mut new_id = String::new();
    let draft = state
        .session
        .update(|d| {
            let (next, id) = insert(d);
            new_id = id;
            Some(next)
        })?
        .ok_or_else(|| AppError::Conflict("Draft was not updated".into()))?;
    Ok((StatusCode::CREATED, Json(CreatedEntry { id: new_id, draft })))
}

fn removed(
    state: &AppState,
    id: &str,
    exists: impl FnOnce(&ResumeData) -> bool,
    remove: fn(&ResumeData, &str) -> ResumeData,
) -> Result<Json<ResumeData>, AppError> {
    state
        .session
        .update(|d| exists(d).then(|| remove(d, id)))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Entry {id} not found")))
}

/// POST /api/v1/draft/experience
pub async fn handle_add_experience(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreatedEntry>), AppError> {
    created(&state, with_new_experience)
}

/// DELETE /api/v1/draft/experience/:id
pub async fn handle_remove_experience(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeData>, AppError> {
    removed(
        &state,
        &id,
        |d| d.experience.iter().any(|e| e.id == id),
        remove_experience,
    )
}

/// POST /api/v1/draft/education
pub async fn handle_add_education(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreatedEntry>), AppError> {
    created(&state, with_new_education)
}

/// DELETE /api/v1/draft/education/:id
pub async fn handle_remove_education(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeData>, AppError> {
    removed(
        &state,
        &id,
        |d| d.education.iter().any(|e| e.id == id),
        remove_education,
    )
}

/// POST /api/v1/draft/sections
pub async fn handle_add_section(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreatedEntry>), AppError> {
    created(&state, with_new_custom_section)
}

/// DELETE /api/v1/draft/sections/:id
pub async fn handle_remove_section(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeData>, AppError> {
    removed(
        &state,
        &id,
        |d| d.custom_sections.iter().any(|s| s.id == id),
        remove_custom_section,
    )
}

/// POST /api/v1/draft/sections/:id/items
pub async fn handle_add_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ResumeData>, AppError> {
    state
        .session
        .update(|d| add_custom_item(d, &id))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Section {id} not found")))
}

/// PUT /api/v1/draft/sections/:id/items/:index
pub async fn handle_update_item(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
    Json(req): Json<ItemRequest>,
) -> Result<Json<ResumeData>, AppError> {
    state
        .session
        .update(|d| update_custom_item(d, &id, index, &req.value))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Item {index} of section {id} not found")))
}

/// DELETE /api/v1/draft/sections/:id/items/:index
pub async fn handle_remove_item(
    State(state): State<AppState>,
    Path((id, index)): Path<(String, usize)>,
) -> Result<Json<ResumeData>, AppError> {
    state
        .session
        .update(|d| remove_custom_item(d, &id, index))?
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Item {index} of section {id} not found")))
}

// ────────────────────────────────────────────────────────────────────────────
// Skills
// ────────────────────────────────────────────────────────────────────────────

/// The edited draft, or the unchanged one when `edit` declined.
fn updated_or_current(
    state: &AppState,
    edit: impl FnOnce(&ResumeData) -> Option<ResumeData>,
) -> Result<Json<ResumeData>, AppError> {
    match state.session.update(edit)? {
        Some(draft) => Ok(Json(draft)),
        None => Ok(Json(state.session.current()?)),
    }
}

/// POST /api/v1/draft/skills
pub async fn handle_add_skills(
    State(state): State<AppState>,
    Json(req): Json<SkillsRequest>,
) -> Result<Json<ResumeData>, AppError> {
    updated_or_current(&state, |d| add_skills(d, &req.text))
}

/// DELETE /api/v1/draft/skills
pub async fn handle_clear_skills(
    State(state): State<AppState>,
) -> Result<Json<ResumeData>, AppError> {
    updated_or_current(&state, |d| Some(clear_skills(d)))
}

/// DELETE /api/v1/draft/skills/:skill
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path(skill): Path<String>,
) -> Result<Json<ResumeData>, AppError> {
    updated_or_current(&state, |d| Some(remove_skill(d, &skill)))
}
