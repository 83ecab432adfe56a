//! Axum route handlers for the analysis API. Thin: validation and ingestion
//! at the edge, everything else delegated to the pipeline.

use axum::{
    extract::{Multipart, Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analysis::pipeline::AnalysisSession;
use crate::errors::AppError;
use crate::ingest;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeTextRequest {
    pub text: String,
}

/// POST /api/v1/sessions
///
/// Creates a fresh analysis session. All state lives in memory for the
/// lifetime of the process; clients hold only the returned id.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<Json<AnalysisSession>, AppError> {
    Ok(Json(state.pipeline.create_session().await))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisSession>, AppError> {
    Ok(Json(state.pipeline.snapshot(id).await?))
}

/// DELETE /api/v1/sessions/:id
///
/// Resets the session to idle, discarding all extracted state.
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AnalysisSession>, AppError> {
    Ok(Json(state.pipeline.reset(id).await?))
}

/// POST /api/v1/sessions/:id/profile
///
/// Runs profile (CV) extraction on raw text.
pub async fn handle_analyze_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisSession>, AppError> {
    Ok(Json(state.pipeline.analyze_profile(id, &request.text).await?))
}

/// POST /api/v1/sessions/:id/profile/upload
///
/// Multipart upload of a CV file (PDF or TXT). The extracted text goes
/// through the same profile-extraction path as raw text.
pub async fn handle_upload_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisSession>, AppError> {
    let mut text: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let filename = field.file_name().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read upload: {e}")))?;

        text = Some(ingest::extract_text(
            content_type.as_deref(),
            filename.as_deref(),
            &data,
        )?);
        break;
    }

    let text = text.ok_or_else(|| AppError::Validation("missing 'file' field".to_string()))?;
    Ok(Json(state.pipeline.analyze_profile(id, &text).await?))
}

/// POST /api/v1/sessions/:id/target
///
/// Runs target (job description) extraction, diffs against the stored
/// profile, and fetches course recommendations when the gap is non-empty.
pub async fn handle_analyze_target(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<AnalyzeTextRequest>,
) -> Result<Json<AnalysisSession>, AppError> {
    Ok(Json(state.pipeline.analyze_target(id, &request.text).await?))
}

/// DELETE /api/v1/sessions/:id/profile/skills/:index
pub async fn handle_remove_profile_skill(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<AnalysisSession>, AppError> {
    Ok(Json(state.pipeline.remove_profile_skill(id, index).await?))
}

/// DELETE /api/v1/sessions/:id/target/skills/:index
pub async fn handle_remove_target_skill(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<AnalysisSession>, AppError> {
    Ok(Json(state.pipeline.remove_target_skill(id, index).await?))
}
