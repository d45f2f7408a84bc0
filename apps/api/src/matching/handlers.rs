//! Recruiter-facing match endpoints: ranked candidates, per-pair detail,
//! manual recalculation, and the score explanation.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::explanation::ScoreExplanation;
use crate::matching::service;
use crate::models::candidate_match::{JobCandidateMatchRow, RankedCandidateRow};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidatesResponse {
    pub job_id: Uuid,
    pub job_title: String,
    pub total_candidates: usize,
    pub candidates: Vec<RankedCandidateRow>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecalculationResponse {
    pub message: String,
    pub recalculated_matches: u64,
}

/// Loads the job and checks the caller posted it.
async fn owned_job(
    state: &AppState,
    user: &AuthUser,
    job_id: Uuid,
) -> Result<crate::models::job::JobRow, AppError> {
    user.require_recruiter()?;
    let job = service::fetch_job(&state.db, job_id).await?;
    if job.posted_by != user.id {
        return Err(AppError::Forbidden);
    }
    Ok(job)
}

/// GET /api/v1/matches/job/:job_id/ranked-candidates
pub async fn handle_ranked_candidates(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<RankedCandidatesResponse>, AppError> {
    let job = owned_job(&state, &user, job_id).await?;
    let candidates = service::ranked_candidates_for_job(&state.db, job_id).await?;
    Ok(Json(RankedCandidatesResponse {
        job_id,
        job_title: job.title,
        total_candidates: candidates.len(),
        candidates,
    }))
}

/// GET /api/v1/matches/job/:job_id/candidate/:candidate_id
pub async fn handle_match_details(
    State(state): State<AppState>,
    user: AuthUser,
    Path((job_id, candidate_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<JobCandidateMatchRow>, AppError> {
    owned_job(&state, &user, job_id).await?;
    let row = service::match_for_pair(&state.db, job_id, candidate_id)
        .await?
        .ok_or_else(|| AppError::NotFound("No match found for this candidate".to_string()))?;
    Ok(Json(row))
}

/// POST /api/v1/matches/job/:job_id/recalculate
///
/// Manual trigger, useful right after a recruiter edits job requirements.
pub async fn handle_recalculate(
    State(state): State<AppState>,
    user: AuthUser,
    Path(job_id): Path<Uuid>,
) -> Result<Json<RecalculationResponse>, AppError> {
    owned_job(&state, &user, job_id).await?;
    let recalculated =
        service::recalculate_for_job(&state.db, &state.ontology, job_id).await?;
    Ok(Json(RecalculationResponse {
        message: "Match recalculation completed".to_string(),
        recalculated_matches: recalculated,
    }))
}

/// GET /api/v1/matches/job/:job_id/candidate/:candidate_id/explanation
pub async fn handle_score_explanation(
    State(state): State<AppState>,
    user: AuthUser,
    Path((job_id, candidate_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ScoreExplanation>, AppError> {
    owned_job(&state, &user, job_id).await?;
    let explanation =
        service::generate_score_explanation(&state.db, &state.ontology, job_id, candidate_id)
            .await?;
    Ok(Json(explanation))
}
