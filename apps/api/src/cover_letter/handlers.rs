//! Axum route handlers for the Cover Letter API.
//!
//! Handlers only gather and trim input. All pipeline semantics live in `pipeline`.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;

use crate::cover_letter::pipeline::{run_pipeline, CoverLetterResult};
use crate::errors::AppError;
use crate::extraction::extract_pdf_text;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    pub resume: String,
    pub job_description: String,
}

/// Fields collected from the upload form.
#[derive(Debug, Default)]
struct UploadForm {
    resume_file: Option<bytes::Bytes>,
    resume_text: Option<String>,
    job_description: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/cover-letters
///
/// Runs draft → critique → revision on pasted resume and job description text.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<CoverLetterRequest>,
) -> Result<Json<CoverLetterResult>, AppError> {
    let result = run_pipeline(
        state.llm.as_ref(),
        request.resume.trim(),
        request.job_description.trim(),
    )
    .await?;

    Ok(Json(result))
}

/// POST /api/v1/cover-letters/upload
///
/// Multipart form: `resume_file` (PDF), `resume_text`, `job_description`.
/// An uploaded PDF wins over pasted text.
pub async fn handle_generate_from_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<CoverLetterResult>, AppError> {
    let form = read_upload_form(multipart).await?;

    let pasted_resume = form
        .resume_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if form.resume_file.is_none() && pasted_resume.is_none() {
        return Err(AppError::Validation(
            "Please upload a resume PDF or paste resume text.".to_string(),
        ));
    }

    let job_description = form.job_description.as_deref().unwrap_or_default().trim();
    if job_description.is_empty() {
        return Err(AppError::Validation(
            "Please provide the job description.".to_string(),
        ));
    }

    let resume = match form.resume_file {
        Some(pdf) => {
            let text = extract_pdf_text(pdf).await?;
            if text.is_empty() {
                return Err(AppError::Validation(
                    "The uploaded PDF contains no extractable text.".to_string(),
                ));
            }
            text
        }
        None => pasted_resume.unwrap_or_default().to_string(),
    };

    let result = run_pipeline(state.llm.as_ref(), &resume, job_description).await?;

    Ok(Json(result))
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let invalid = |e: axum::extract::multipart::MultipartError| {
            AppError::Validation(format!("Could not read field '{name}': {e}"))
        };

        match name.as_str() {
            "resume_file" => {
                let data = field.bytes().await.map_err(invalid)?;
                // Browsers send an empty part when no file is chosen.
                if !data.is_empty() {
                    form.resume_file = Some(data);
                }
            }
            "resume_text" => form.resume_text = Some(field.text().await.map_err(invalid)?),
            "job_description" => {
                form.job_description = Some(field.text().await.map_err(invalid)?)
            }
            _ => {}
        }
    }

    Ok(form)
}
