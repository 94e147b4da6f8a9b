//! Axum route handlers for exporting, importing and duplicating the draft.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue},
    response::IntoResponse,
    Json,
};
use tracing::info;

use crate::errors::AppError;
use crate::models::resume::ResumeData;
use crate::state::AppState;
use crate::transfer::{decode_bytes, duplicate, export_as_json, export_filename, render_plain_text};

/// GET /api/v1/draft/export
pub async fn handle_export(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let draft = state.session.current()?;
    let disposition = format!("attachment; filename=\"{}\"", export_filename(&draft));
    let disposition = HeaderValue::from_bytes(disposition.as_bytes())
        .unwrap_or_else(|_| HeaderValue::from_static("attachment; filename=\"resume-resume.json\""));

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/json")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        export_as_json(&draft),
    ))
}

/// GET /api/v1/draft/text
pub async fn handle_plain_text(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let draft = state.session.current()?;
    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        )],
        render_plain_text(&draft),
    ))
}

/// POST /api/v1/draft/import
///
/// The body is the raw transfer file. On success it replaces the draft.
pub async fn handle_import(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResumeData>, AppError> {
    let data = decode_bytes(&body, state.config.import_mode)?;
    state.session.reset(data.clone())?;
    info!("Imported resume for '{}'", data.personal_info.name);
    Ok(Json(data))
}

/// POST /api/v1/draft/duplicate
pub async fn handle_duplicate(
    State(state): State<AppState>,
) -> Result<Json<ResumeData>, AppError> {
    let copy = state.session.reset_with(duplicate)?;
    info!("Duplicated draft");
    Ok(Json(copy))
}
