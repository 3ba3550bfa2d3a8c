//! Axum route handlers for file uploads and text extraction.

use axum::extract::Multipart;
use axum::Json;
use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::extract::{extract_text, ExtractedText};
use crate::routes::ApiSuccess;

/// Upload size ceiling applied to the multipart routes.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// The parts of a multipart upload this service reads.
#[derive(Debug, Default)]
pub struct Upload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub file: Option<Bytes>,
    pub template: Option<String>,
}

/// Reads the `file` part and an optional `template` text part.
/// Other parts are ignored.
pub async fn read_upload(mut multipart: Multipart) -> Result<Upload, AppError> {
    let mut upload = Upload::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                upload.file_name = field.file_name().map(String::from);
                upload.content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                upload.file = Some(data);
            }
            Some("template") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid template field: {e}")))?;
                upload.template = Some(value.trim().to_string()).filter(|t| !t.is_empty());
            }
            _ => {}
        }
    }
    Ok(upload)
}

/// Runs extraction off the async runtime.
pub async fn extract_upload(upload: &Upload) -> Result<ExtractedText, AppError> {
    let file = upload
        .file
        .clone()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::Validation("A non-empty file part named 'file' is required".to_string()))?;
    let file_name = upload.file_name.clone();
    let content_type = upload.content_type.clone();

    let extracted = tokio::task::spawn_blocking(move || {
        extract_text(&file, file_name.as_deref(), content_type.as_deref())
    })
    .await
    .map_err(|e| AppError::Extraction(format!("Extraction aborted: {e}")))??;

    info!(
        "Extracted {} characters from {} upload",
        extracted.characters,
        extracted.format.as_str()
    );
    Ok(extracted)
}

/// POST /api/extract-text
pub async fn handle_extract_text(
    multipart: Multipart,
) -> Result<Json<ApiSuccess<ExtractedText>>, AppError> {
    let upload = read_upload(multipart).await?;
    let extracted = extract_upload(&upload).await?;
    Ok(ApiSuccess::json(extracted))
}
