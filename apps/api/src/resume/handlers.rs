//! Axum route handlers for stateless résumé analysis.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeData;
use crate::resume::normalize::FieldKind;
use crate::resume::scoring::{
    calculate_resume_progress_with, get_resume_quality_with, ResumeQuality, ScoringMode,
};
use crate::resume::validation::validate_resume;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub progress: u32,
}

#[derive(Debug, Serialize)]
pub struct ValidationResponse {
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Everything the editor shows about a draft at once.
#[derive(Debug, Serialize)]
pub struct ResumeReport {
    pub progress: u32,
    pub valid: bool,
    pub errors: Vec<String>,
    #[serde(flatten)]
    pub quality: ResumeQuality,
}

impl ResumeReport {
    pub fn build(data: &ResumeData, mode: ScoringMode) -> Self {
        let errors = validate_resume(data);
        Self {
            progress: calculate_resume_progress_with(data, mode),
            valid: errors.is_empty(),
            errors,
            quality: get_resume_quality_with(data, mode),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct NormalizeRequest {
    pub field: FieldKind,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct NormalizeResponse {
    pub value: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resume/progress
pub async fn handle_progress(
    State(state): State<AppState>,
    Json(data): Json<ResumeData>,
) -> Json<ProgressResponse> {
    Json(ProgressResponse {
        progress: calculate_resume_progress_with(&data, state.config.scoring_mode),
    })
}

/// POST /api/v1/resume/validate
pub async fn handle_validate(Json(data): Json<ResumeData>) -> Json<ValidationResponse> {
    let errors = validate_resume(&data);
    Json(ValidationResponse {
        valid: errors.is_empty(),
        errors,
    })
}

/// POST /api/v1/resume/quality
pub async fn handle_quality(
    State(state): State<AppState>,
    Json(data): Json<ResumeData>,
) -> Json<ResumeReport> {
    Json(ResumeReport::build(&data, state.config.scoring_mode))
}

/// POST /api/v1/normalize
pub async fn handle_normalize(Json(req): Json<NormalizeRequest>) -> Json<NormalizeResponse> {
    Json(NormalizeResponse {
        value: req.field.normalize(&req.value),
    })
}
