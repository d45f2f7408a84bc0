pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::applications::handlers as application_handlers;
use crate::jobs::handlers as job_handlers;
use crate::matching::handlers as match_handlers;
use crate::resumes::handlers as resume_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Jobs
        .route("/api/v1/jobs", post(job_handlers::handle_create_job))
        .route("/api/v1/jobs", get(job_handlers::handle_list_jobs))
        .route("/api/v1/jobs/:id", get(job_handlers::handle_get_job))
        .route("/api/v1/jobs/:id", put(job_handlers::handle_update_job))
        // Resumes
        .route("/api/v1/resumes", post(resume_handlers::handle_upload_resume))
        .route("/api/v1/resumes/me", get(resume_handlers::handle_get_my_resume))
        .route(
            "/api/v1/resumes/me",
            delete(resume_handlers::handle_delete_my_resume),
        )
        .route(
            "/api/v1/resumes/candidate/:candidate_id",
            get(resume_handlers::handle_get_candidate_resume),
        )
        // Applications
        .route(
            "/api/v1/applications",
            post(application_handlers::handle_apply),
        )
        .route(
            "/api/v1/applications/me",
            get(application_handlers::handle_my_applications),
        )
        .route(
            "/api/v1/applications/job/:job_id",
            get(application_handlers::handle_job_applications),
        )
        // Matching
        .route(
            "/api/v1/matches/job/:job_id/ranked-candidates",
            get(match_handlers::handle_ranked_candidates),
        )
        .route(
            "/api/v1/matches/job/:job_id/candidate/:candidate_id",
            get(match_handlers::handle_match_details),
        )
        .route(
            "/api/v1/matches/job/:job_id/recalculate",
            post(match_handlers::handle_recalculate),
        )
        .route(
            "/api/v1/matches/job/:job_id/candidate/:candidate_id/explanation",
            get(match_handlers::handle_score_explanation),
        )
        .with_state(state)
}
