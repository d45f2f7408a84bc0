use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Denormalized match record: exactly one row per (job, candidate) pair,
/// fully replaced on every recomputation. Optimized for recruiter dashboard
/// ranking queries.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobCandidateMatchRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub application_id: Option<Uuid>,
    pub matching_score: i32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub calculated_at: DateTime<Utc>,
}

/// Match record joined with candidate identity, ordered by score for the
/// ranked-candidates view.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct RankedCandidateRow {
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub matching_score: i32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub calculated_at: DateTime<Utc>,
}
