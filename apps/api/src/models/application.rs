use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One application of a candidate to a job, carrying the score snapshot
/// computed at submission time (independent of the denormalized match store).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub resume_url: String,
    pub resume_text: String,
    pub skill_score: i32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    /// 'received', 'shortlisted', 'rejected'.
    pub status: String,
    /// Where the application came from: 'direct', 'linkedin', ...
    pub source: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Application joined with candidate identity for recruiter listings.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSummaryRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub candidate_id: Uuid,
    pub candidate_name: String,
    pub candidate_email: String,
    pub skill_score: i32,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub status: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}
