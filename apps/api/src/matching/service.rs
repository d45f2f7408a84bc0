//! Match store coordinator.
//!
//! Owns the `job_candidate_matches` table: recomputes and upserts a match
//! record whenever a résumé is uploaded, job requirements change, or an
//! application is created. Recomputation is a full replace — matched/missing
//! lists and score never merge with the previous record, and a (job,
//! candidate) pair has at most one row.

use chrono::Utc;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::explanation::{self, ExplanationInputs, ScoreExplanation};
use crate::matching::extractor::extract_skills;
use crate::matching::ontology::SkillOntology;
use crate::matching::scorer::{score_match, MatchOutcome};
use crate::models::application::ApplicationRow;
use crate::models::candidate_match::{JobCandidateMatchRow, RankedCandidateRow};
use crate::models::job::JobRow;
use crate::models::resume::ResumeRow;

/// Recomputes and stores the match for one (job, candidate) pair.
///
/// Fails NotFound when the job is missing. A candidate without a stored
/// résumé gets a zero-score match with every required skill missing — a
/// legitimate, displayable result.
pub async fn calculate_and_store_match(
    pool: &PgPool,
    ontology: &SkillOntology,
    job_id: Uuid,
    candidate_id: Uuid,
    application_id: Option<Uuid>,
) -> Result<JobCandidateMatchRow, AppError> {
    let job = fetch_job(pool, job_id).await?;
    let resume = fetch_resume(pool, candidate_id).await?;

    let candidate_skills = resume.map(|r| r.extracted_skills).unwrap_or_default();
    let outcome = score_match(ontology, &candidate_skills, &job.required_skills);

    upsert_match(pool, job_id, candidate_id, application_id, &outcome).await
}

/// Recomputes matches for every job the candidate has applied to.
/// Returns the number of recalculated records.
pub async fn recalculate_for_candidate(
    pool: &PgPool,
    ontology: &SkillOntology,
    candidate_id: Uuid,
) -> Result<u64, AppError> {
    let applications: Vec<(Uuid, Uuid)> =
        sqlx::query_as("SELECT job_id, id FROM applications WHERE candidate_id = $1")
            .bind(candidate_id)
            .fetch_all(pool)
            .await?;

    let mut recalculated = 0;
    for (job_id, application_id) in applications {
        calculate_and_store_match(pool, ontology, job_id, candidate_id, Some(application_id))
            .await?;
        recalculated += 1;
    }

    info!(%candidate_id, recalculated, "recalculated matches for candidate");
    Ok(recalculated)
}

/// Recomputes matches for every candidate who applied to the job.
/// Returns the number of recalculated records.
pub async fn recalculate_for_job(
    pool: &PgPool,
    ontology: &SkillOntology,
    job_id: Uuid,
) -> Result<u64, AppError> {
    let applications: Vec<(Uuid, Uuid)> =
        sqlx::query_as("SELECT candidate_id, id FROM applications WHERE job_id = $1")
            .bind(job_id)
            .fetch_all(pool)
            .await?;

    let mut recalculated = 0;
    for (candidate_id, application_id) in applications {
        calculate_and_store_match(pool, ontology, job_id, candidate_id, Some(application_id))
            .await?;
        recalculated += 1;
    }

    info!(%job_id, recalculated, "recalculated matches for job");
    Ok(recalculated)
}

/// Candidates for a job, highest score first.
pub async fn ranked_candidates_for_job(
    pool: &PgPool,
    job_id: Uuid,
) -> Result<Vec<RankedCandidateRow>, AppError> {
    let rows = sqlx::query_as(
        r#"
        SELECT m.candidate_id, u.name AS candidate_name, u.email AS candidate_email,
               m.matching_score, m.matched_skills, m.missing_skills, m.calculated_at
        FROM job_candidate_matches m
        JOIN users u ON u.id = m.candidate_id
        WHERE m.job_id = $1
        ORDER BY m.matching_score DESC
        "#,
    )
    .bind(job_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// The stored match record for one pair, if any.
pub async fn match_for_pair(
    pool: &PgPool,
    job_id: Uuid,
    candidate_id: Uuid,
) -> Result<Option<JobCandidateMatchRow>, AppError> {
    let row = sqlx::query_as(
        "SELECT * FROM job_candidate_matches WHERE job_id = $1 AND candidate_id = $2",
    )
    .bind(job_id)
    .bind(candidate_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Stores a freshly uploaded résumé (one row per candidate, replaced on
/// re-upload), extracts its skills, and recomputes all of the candidate's
/// matches.
pub async fn process_resume_upload(
    pool: &PgPool,
    ontology: &SkillOntology,
    candidate_id: Uuid,
    resume_file_url: &str,
    extracted_text: &str,
) -> Result<ResumeRow, AppError> {
    let extracted_skills: Vec<String> =
        extract_skills(ontology, extracted_text).into_iter().collect();

    let resume: ResumeRow = sqlx::query_as(
        r#"
        INSERT INTO resumes (id, candidate_id, resume_file_url, extracted_text, extracted_skills, uploaded_at, last_updated)
        VALUES ($1, $2, $3, $4, $5, $6, $6)
        ON CONFLICT (candidate_id) DO UPDATE SET
            resume_file_url = EXCLUDED.resume_file_url,
            extracted_text = EXCLUDED.extracted_text,
            extracted_skills = EXCLUDED.extracted_skills,
            last_updated = EXCLUDED.last_updated
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(candidate_id)
    .bind(resume_file_url)
    .bind(extracted_text)
    .bind(&extracted_skills)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    recalculate_for_candidate(pool, ontology, candidate_id).await?;
    Ok(resume)
}

/// Builds the four-factor score explanation for one (job, candidate) pair.
///
/// Requires an existing application and job; aborts with NotFound otherwise.
/// A missing résumé row falls back to the text snapshot stored on the
/// application.
pub async fn generate_score_explanation(
    pool: &PgPool,
    ontology: &SkillOntology,
    job_id: Uuid,
    candidate_id: Uuid,
) -> Result<ScoreExplanation, AppError> {
    let application: Option<ApplicationRow> =
        sqlx::query_as("SELECT * FROM applications WHERE job_id = $1 AND candidate_id = $2")
            .bind(job_id)
            .bind(candidate_id)
            .fetch_optional(pool)
            .await?;
    let application =
        application.ok_or_else(|| AppError::NotFound("Application not found".to_string()))?;

    let job = fetch_job(pool, job_id).await?;
    let resume = fetch_resume(pool, candidate_id).await?;

    let department_text = resume
        .as_ref()
        .map(|r| r.extracted_text.as_str())
        .unwrap_or(application.resume_text.as_str());
    let candidate_skills = resume
        .as_ref()
        .map(|r| r.extracted_skills.clone())
        .unwrap_or_default();

    let inputs = ExplanationInputs {
        matched_skills: &application.matched_skills,
        missing_skills: &application.missing_skills,
        required_skill_count: job.required_skills.len(),
        application_resume_text: &application.resume_text,
        department_text,
        candidate_skills: &candidate_skills,
        job_experience: &job.experience,
        job_description: &job.description,
    };

    Ok(explanation::compose(ontology, &inputs))
}

pub async fn fetch_job(pool: &PgPool, job_id: Uuid) -> Result<JobRow, AppError> {
    let job: Option<JobRow> = sqlx::query_as("SELECT * FROM jobs WHERE id = $1")
        .bind(job_id)
        .fetch_optional(pool)
        .await?;
    job.ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}

pub async fn fetch_resume(
    pool: &PgPool,
    candidate_id: Uuid,
) -> Result<Option<ResumeRow>, AppError> {
    let resume = sqlx::query_as("SELECT * FROM resumes WHERE candidate_id = $1")
        .bind(candidate_id)
        .fetch_optional(pool)
        .await?;
    Ok(resume)
}

async fn upsert_match(
    pool: &PgPool,
    job_id: Uuid,
    candidate_id: Uuid,
    application_id: Option<Uuid>,
    outcome: &MatchOutcome,
) -> Result<JobCandidateMatchRow, AppError> {
    let row = sqlx::query_as(
        r#"
        INSERT INTO job_candidate_matches
            (id, job_id, candidate_id, application_id, matching_score, matched_skills, missing_skills, calculated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (job_id, candidate_id) DO UPDATE SET
            application_id = EXCLUDED.application_id,
            matching_score = EXCLUDED.matching_score,
            matched_skills = EXCLUDED.matched_skills,
            missing_skills = EXCLUDED.missing_skills,
            calculated_at = EXCLUDED.calculated_at
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(job_id)
    .bind(candidate_id)
    .bind(application_id)
    .bind(outcome.score as i32)
    .bind(&outcome.matched_skills)
    .bind(&outcome.missing_skills)
    .bind(Utc::now())
    .fetch_one(pool)
    .await?;

    Ok(row)
}
