//! Résumé endpoints: upload/replace, fetch, delete.
//!
//! Uploading re-runs skill extraction and recomputes every match for the
//! candidate, so recruiter rankings stay in sync with the latest résumé.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::service;
use crate::models::resume::ResumeRow;
use crate::resumes::ingest::store_resume_file;
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeUploadResponse {
    pub message: String,
    pub resume: ResumeRow,
}

pub struct UploadedFile {
    pub data: Bytes,
    pub content_type: String,
}

/// Pulls the `resume` file field out of a multipart body.
pub async fn read_resume_field(multipart: &mut Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() == Some("resume") {
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
            return Ok(UploadedFile { data, content_type });
        }
    }
    Err(AppError::Validation(
        "Please upload a resume file".to_string(),
    ))
}

/// POST /api/v1/resumes
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    user.require_candidate()?;

    let file = read_resume_field(&mut multipart).await?;
    let text = state
        .text_extractor
        .extract(file.data.clone(), &file.content_type)
        .await?;

    let key = store_resume_file(
        &state.s3,
        &state.config.s3_bucket,
        user.id,
        &file.content_type,
        file.data,
    )
    .await?;

    let resume =
        service::process_resume_upload(&state.db, &state.ontology, user.id, &key, &text).await?;

    Ok(Json(ResumeUploadResponse {
        message: "Resume uploaded and processed successfully".to_string(),
        resume,
    }))
}

/// GET /api/v1/resumes/me
pub async fn handle_get_my_resume(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<ResumeRow>, AppError> {
    let resume = service::fetch_resume(&state.db, user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("No resume found. Please upload a resume.".to_string()))?;
    Ok(Json(resume))
}

/// GET /api/v1/resumes/candidate/:candidate_id
pub async fn handle_get_candidate_resume(
    State(state): State<AppState>,
    user: AuthUser,
    Path(candidate_id): Path<Uuid>,
) -> Result<Json<ResumeRow>, AppError> {
    user.require_recruiter()?;
    let resume = service::fetch_resume(&state.db, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Resume not found for this candidate".to_string()))?;
    Ok(Json(resume))
}

/// DELETE /api/v1/resumes/me
pub async fn handle_delete_my_resume(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<StatusCode, AppError> {
    user.require_candidate()?;

    let deleted: Option<ResumeRow> =
        sqlx::query_as("DELETE FROM resumes WHERE candidate_id = $1 RETURNING *")
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    let deleted = deleted.ok_or_else(|| AppError::NotFound("No resume found".to_string()))?;

    // Best effort blob cleanup; the row is already gone.
    if let Err(e) = state
        .s3
        .delete_object()
        .bucket(&state.config.s3_bucket)
        .key(&deleted.resume_file_url)
        .send()
        .await
    {
        tracing::warn!("failed to delete resume blob {}: {e}", deleted.resume_file_url);
    }

    Ok(StatusCode::NO_CONTENT)
}
