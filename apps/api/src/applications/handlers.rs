//! Application endpoints.
//!
//! Applying computes a score snapshot on the application itself (score +
//! matched/missing at submission time) and separately refreshes the
//! denormalized match store, which recruiter rankings read.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::extractor::extract_skills;
use crate::matching::scorer::score_match;
use crate::matching::service;
use crate::models::application::{ApplicationRow, ApplicationSummaryRow};
use crate::resumes::handlers::UploadedFile;
use crate::resumes::ingest::store_resume_file;
use crate::state::AppState;

struct ApplyFields {
    job_id: Uuid,
    source: String,
    resume: Option<UploadedFile>,
}

async fn read_apply_fields(multipart: &mut Multipart) -> Result<ApplyFields, AppError> {
    let mut job_id = None;
    let mut source = None;
    let mut resume = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        match field.name() {
            Some("jobId") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid jobId field: {e}")))?;
                let id = Uuid::parse_str(text.trim())
                    .map_err(|_| AppError::Validation("jobId must be a UUID".to_string()))?;
                job_id = Some(id);
            }
            Some("source") => {
                source = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Invalid source field: {e}"))
                })?);
            }
            Some("resume") => {
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
                resume = Some(UploadedFile { data, content_type });
            }
            _ => {}
        }
    }

    Ok(ApplyFields {
        job_id: job_id.ok_or_else(|| AppError::Validation("jobId is required".to_string()))?,
        source: source.unwrap_or_else(|| "direct".to_string()),
        resume,
    })
}

/// POST /api/v1/applications
///
/// Multipart: `jobId` (UUID), optional `source`, `resume` (file).
pub async fn handle_apply(
    State(state): State<AppState>,
    user: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApplicationRow>), AppError> {
    user.require_candidate()?;

    let fields = read_apply_fields(&mut multipart).await?;
    let file = fields
        .resume
        .ok_or_else(|| AppError::Validation("Please upload a resume".to_string()))?;

    let existing: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM applications WHERE job_id = $1 AND candidate_id = $2")
            .bind(fields.job_id)
            .bind(user.id)
            .fetch_optional(&state.db)
            .await?;
    if existing.is_some() {
        return Err(AppError::Validation(
            "You have already applied for this job".to_string(),
        ));
    }

    let job = service::fetch_job(&state.db, fields.job_id).await?;

    let resume_text = state
        .text_extractor
        .extract(file.data.clone(), &file.content_type)
        .await?;

    // Score snapshot at submission time, stored on the application itself.
    let resume_skills: Vec<String> =
        extract_skills(&state.ontology, &resume_text).into_iter().collect();
    let outcome = score_match(&state.ontology, &resume_skills, &job.required_skills);

    let key = store_resume_file(
        &state.s3,
        &state.config.s3_bucket,
        user.id,
        &file.content_type,
        file.data,
    )
    .await?;

    let now = Utc::now();
    let application: ApplicationRow = sqlx::query_as(
        r#"
        INSERT INTO applications
            (id, job_id, candidate_id, resume_url, resume_text, skill_score,
             matched_skills, missing_skills, status, source, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'received', $9, $10, $10)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(fields.job_id)
    .bind(user.id)
    .bind(&key)
    .bind(&resume_text)
    .bind(outcome.score as i32)
    .bind(&outcome.matched_skills)
    .bind(&outcome.missing_skills)
    .bind(&fields.source)
    .bind(now)
    .fetch_one(&state.db)
    .await?;

    // Refresh the candidate's stored résumé and every affected match record,
    // then ensure this pair's match row links back to the new application.
    service::process_resume_upload(&state.db, &state.ontology, user.id, &key, &resume_text)
        .await?;
    service::calculate_and_store_match(
        &state.db,
        &state.ontology,
        fields.job_id,
        user.id,
        Some(application.id),
    )
    .await?;

    Ok((StatusCode::CREATED, Json(application)))
}

/// GET /api/v1/applications/job/:job_id
///
/// Recruiter view, ranked by the application-time score, highest first.
pub async fn handle_job_applications(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<Vec<ApplicationSummaryRow>>, AppError> {
    user.require_recruiter()?;
    let job = service::fetch_job(&state.db, job_id).await?;
    if job.posted_by != user.id {
        return Err(AppError::Forbidden);
    }

    let applications = sqlx::query_as(
        r#"
        SELECT a.id, a.job_id, a.candidate_id, u.name AS candidate_name,
               u.email AS candidate_email, a.skill_score, a.matched_skills,
               a.missing_skills, a.status, a.source, a.created_at
        FROM applications a
        JOIN users u ON u.id = a.candidate_id
        WHERE a.job_id = $1
        ORDER BY a.skill_score DESC
        "#,
    )
    .bind(job_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(applications))
}

/// GET /api/v1/applications/me
pub async fn handle_my_applications(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<Json<Vec<ApplicationRow>>, AppError> {
    let applications =
        sqlx::query_as("SELECT * FROM applications WHERE candidate_id = $1 ORDER BY created_at DESC")
            .bind(user.id)
            .fetch_all(&state.db)
            .await?;
    Ok(Json(applications))
}
