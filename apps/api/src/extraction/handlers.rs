use axum::{extract::Multipart, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::extraction::extract_pdf_text;

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub text: String,
    pub chars: usize,
}

/// POST /api/v1/resumes/extract
///
/// Multipart form with a single PDF `file`. Returns the extracted plain text so
/// the caller can review or edit it before generating.
pub async fn handle_extract(mut multipart: Multipart) -> Result<Json<ExtractResponse>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Could not read field 'file': {e}")))?;
        if data.is_empty() {
            break;
        }

        let text = extract_pdf_text(data).await?;
        return Ok(Json(ExtractResponse {
            chars: text.chars().count(),
            text,
        }));
    }

    Err(AppError::Validation(
        "A non-empty 'file' field is required".to_string(),
    ))
}
