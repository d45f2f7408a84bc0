use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::matching::ontology::SkillOntology;
use crate::resumes::ingest::TextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub config: Config,
    /// Skill ontology, loaded once at startup and immutable for the process
    /// lifetime. Every extraction and canonicalization must go through the
    /// same table.
    pub ontology: Arc<SkillOntology>,
    /// Pluggable résumé text extraction. Default: PdfTextExtractor.
    pub text_extractor: Arc<dyn TextExtractor>,
}
