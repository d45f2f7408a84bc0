//! Job posting endpoints. Updating a job's required skills triggers a
//! recomputation of every stored match for that job.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::service;
use crate::models::job::JobRow;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub title: String,
    pub description: String,
    pub required_skills: Vec<String>,
    pub experience: String,
    pub department: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub required_skills: Option<Vec<String>>,
    pub experience: Option<String>,
    pub department: Option<String>,
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    user.require_recruiter()?;
    if req.title.trim().is_empty() {
        return Err(AppError::Validation("Job title is required".to_string()));
    }

    let now = Utc::now();
    let job: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs (id, title, description, required_skills, experience, department, posted_by, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.required_skills)
    .bind(&req.experience)
    .bind(&req.department)
    .bind(user.id)
    .bind(now)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let jobs = sqlx::query_as("SELECT * FROM jobs ORDER BY created_at DESC")
        .fetch_all(&state.db)
        .await?;
    Ok(Json(jobs))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<Uuid>,
) -> Result<Json<JobRow>, AppError> {
    let job = service::fetch_job(&state.db, job_id).await?;
    Ok(Json(job))
}

/// PUT /api/v1/jobs/:id
///
/// When `requiredSkills` changes, every applicant's match record is
/// recomputed so rankings reflect the new requirements immediately.
pub async fn handle_update_job(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
    Json(req): Json<UpdateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    user.require_recruiter()?;
    let existing = service::fetch_job(&state.db, job_id).await?;
    if existing.posted_by != user.id {
        return Err(AppError::Forbidden);
    }

    let skills_changed = req
        .required_skills
        .as_ref()
        .is_some_and(|s| *s != existing.required_skills);

    let job: JobRow = sqlx::query_as(
        r#"
        UPDATE jobs SET
            title = COALESCE($2, title),
            description = COALESCE($3, description),
            required_skills = COALESCE($4, required_skills),
            experience = COALESCE($5, experience),
            department = COALESCE($6, department),
            updated_at = $7
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(job_id)
    .bind(&req.title)
    .bind(&req.description)
    .bind(&req.required_skills)
    .bind(&req.experience)
    .bind(&req.department)
    .bind(Utc::now())
    .fetch_one(&state.db)
    .await?;

    if skills_changed {
        service::recalculate_for_job(&state.db, &state.ontology, job_id).await?;
    }

    Ok(Json(job))
}
