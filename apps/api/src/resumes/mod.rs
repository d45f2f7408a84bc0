//! Résumé upload and retrieval.

pub mod handlers;
pub mod ingest;
