//! Résumé text extraction, behind a pluggable trait.
//!
//! PDF parsing is CPU-bound third-party code, so the default implementation
//! runs it under `spawn_blocking`. Carried in `AppState` as
//! `Arc<dyn TextExtractor>` so tests can swap in a stub.

use anyhow::anyhow;
use async_trait::async_trait;
use bytes::Bytes;

use crate::errors::AppError;

/// Extracts plain text from an uploaded résumé file.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, data: Bytes, content_type: &str) -> Result<String, AppError>;
}

/// Default extractor: `pdf-extract` for PDFs, UTF-8 passthrough for plain text.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, data: Bytes, content_type: &str) -> Result<String, AppError> {
        if data.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }

        let text = if content_type.contains("pdf") {
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                .await
                .map_err(|e| AppError::Internal(anyhow!("extraction task failed: {e}")))?
                .map_err(|e| AppError::Extraction(e.to_string()))?
        } else if content_type.starts_with("text/") {
            String::from_utf8(data.to_vec())
                .map_err(|_| AppError::Extraction("File is not valid UTF-8 text".to_string()))?
        } else {
            return Err(AppError::Validation(format!(
                "Unsupported resume content type: {content_type}"
            )));
        };

        if text.trim().is_empty() {
            return Err(AppError::Extraction(
                "No readable text found in resume".to_string(),
            ));
        }

        Ok(text)
    }
}

/// Stores the raw résumé blob in S3 and returns its object key.
pub async fn store_resume_file(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    candidate_id: uuid::Uuid,
    content_type: &str,
    data: Bytes,
) -> Result<String, AppError> {
    let extension = if content_type.contains("pdf") { "pdf" } else { "txt" };
    let key = format!("resumes/{candidate_id}/{}.{extension}", uuid::Uuid::new_v4());

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .content_type(content_type)
        .body(data.into())
        .send()
        .await
        .map_err(|e| AppError::S3(e.to_string()))?;

    Ok(key)
}
