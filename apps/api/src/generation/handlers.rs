//! Axum route handlers for the Generation API.

use axum::{extract::State, http::StatusCode, Json};
use tracing::error;

use crate::errors::AppError;
use crate::generation::draft::generate_into_draft;
use crate::generation::models::{
    DraftGenerateRequest, GenerateRequest, GenerateResponse, GeneratedText, RawGenerateRequest,
};
use crate::models::resume::ResumeData;
use crate::state::AppState;

/// POST /api/generate
///
/// Stateless: generates for the posted payload and leaves the draft alone.
/// Errors use the flat `{"error": "..."}` body of this contract.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(raw): Json<RawGenerateRequest>,
) -> (StatusCode, Json<GenerateResponse>) {
    let request = match GenerateRequest::try_from(raw) {
        Ok(request) => request,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(GenerateResponse::Error {
                    error: e.to_string(),
                }),
            )
        }
    };

    let generator = &state.generator;
    let result = match &request {
        GenerateRequest::Summary(data) => generator.summary(data).await.map(GeneratedText::Text),
        GenerateRequest::Bullets(experience) => {
            generator.bullets(experience).await.map(GeneratedText::List)
        }
        GenerateRequest::Skills(skills) => {
            generator.refine_skills(skills).await.map(GeneratedText::List)
        }
    };

    match result {
        Ok(result) => (StatusCode::OK, Json(GenerateResponse::Result { result })),
        Err(e) => {
            error!("Generation failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(GenerateResponse::Error {
                    error: "Internal server error".to_string(),
                }),
            )
        }
    }
}

/// POST /api/v1/draft/generate
///
/// Generates for the live draft and writes the result into it.
pub async fn handle_draft_generate(
    State(state): State<AppState>,
    Json(req): Json<DraftGenerateRequest>,
) -> Result<Json<ResumeData>, AppError> {
    let draft = generate_into_draft(
        &state.session,
        state.generator.as_ref(),
        req.kind,
        req.experience_id.as_deref(),
    )
    .await?;
    Ok(Json(draft))
}
