use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A candidate's résumé: one row per candidate, replaced on re-upload.
/// `extracted_skills` holds the canonical skill set from the last extraction.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ResumeRow {
    pub id: Uuid,
    pub candidate_id: Uuid,
    pub resume_file_url: String,
    pub extracted_text: String,
    pub extracted_skills: Vec<String>,
    pub uploaded_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}
