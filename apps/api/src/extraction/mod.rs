//! Turns an uploaded resume PDF into plain text for the pipeline.
//!
//! Pages are joined in document order with a newline. Pages with no text are
//! skipped rather than producing blank lines. A PDF with no extractable text
//! yields an empty string, not an error.

pub mod handlers;

use tracing::{debug, warn};

use crate::errors::AppError;

/// Joins per-page text: empty pages dropped, newline-separated, outer whitespace trimmed.
pub fn extract_text_from_pages<I, S>(pages: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut text = String::new();
    for page in pages {
        let page = page.as_ref();
        if page.is_empty() {
            continue;
        }
        text.push_str(page);
        text.push('\n');
    }
    text.trim().to_string()
}

/// Extracts text from an in-memory PDF.
///
/// Parsing runs on the blocking pool. A parse failure or a panic inside the PDF
/// parser is reported as `AppError::Extraction`.
pub async fn extract_pdf_text(bytes: bytes::Bytes) -> Result<String, AppError> {
    let size = bytes.len();
    let pages = tokio::task::spawn_blocking(move || {
        pdf_extract::extract_text_from_mem_by_pages(&bytes)
    })
    .await
    .map_err(|e| {
        warn!("PDF parser aborted on {size}-byte upload: {e}");
        AppError::Extraction("The PDF could not be read".to_string())
    })?
    .map_err(|e| {
        warn!("PDF parse failed on {size}-byte upload: {e}");
        AppError::Extraction(format!("The PDF could not be parsed: {e}"))
    })?;

    debug!("Extracted {} pages from {size}-byte PDF", pages.len());
    Ok(extract_text_from_pages(pages))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_pages_are_skipped() {
        assert_eq!(extract_text_from_pages(["Hello", "", "World"]), "Hello\nWorld");
    }

    #[test]
    fn test_pages_kept_in_document_order() {
        let pages = vec!["Experience".to_string(), "Education".to_string()];
        assert_eq!(extract_text_from_pages(pages), "Experience\nEducation");
    }

    #[test]
    fn test_result_is_trimmed() {
        assert_eq!(
            extract_text_from_pages(["\n  Jane Doe", "Rust engineer  \n"]),
            "Jane Doe\nRust engineer"
        );
    }

    #[test]
    fn test_no_pages_yields_empty_string() {
        assert_eq!(extract_text_from_pages(Vec::<String>::new()), "");
    }

    #[test]
    fn test_all_blank_pages_yield_empty_string() {
        assert_eq!(extract_text_from_pages(["", "", ""]), "");
    }

    #[tokio::test]
    async fn test_two_page_pdf_is_read_in_page_order() {
        let pdf = bytes::Bytes::from_static(include_bytes!(
            "../../tests/fixtures/two_page_resume.pdf"
        ));
        let text = extract_pdf_text(pdf).await.unwrap();

        let name_at = text.find("Jane Doe").unwrap();
        let ledger_at = text.find("payments ledger").unwrap();
        assert!(name_at < ledger_at);
        assert!(text.contains("Staff Rust Engineer"));
        assert_eq!(text, text.trim());
    }

    #[tokio::test]
    async fn test_non_pdf_bytes_are_an_extraction_error() {
        let err = extract_pdf_text(bytes::Bytes::from_static(b"definitely not a pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Extraction(_)));
    }
}
