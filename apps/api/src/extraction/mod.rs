//! Document text extraction for uploaded resumes.
//!
//! A thin wrapper over `pdf-extract`. Output is the pages in order, joined by
//! a single space, with every whitespace run collapsed to a single space.

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, warn};

const PDF_MAGIC: &[u8] = b"%PDF-";
const PDF_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("not a PDF document")]
    NotPdf,

    #[error("failed to parse document: {0}")]
    Malformed(String),

    #[error("document contains no extractable text")]
    NoText,

    #[error("extraction task failed: {0}")]
    Unavailable(String),
}

#[async_trait]
pub trait DocumentExtractor: Send + Sync {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractionError>;
}

/// Returns true if the content type or the leading bytes identify a PDF.
pub fn is_pdf(content_type: Option<&str>, head: &[u8]) -> bool {
    let ct = content_type.unwrap_or("").to_ascii_lowercase();
    ct.contains(PDF_CONTENT_TYPE) || head.starts_with(PDF_MAGIC)
}

/// Joins all text runs with single spaces.
pub fn normalize_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalises each page and joins the non-empty ones with a single space.
pub fn join_pages<S: AsRef<str>>(pages: &[S]) -> String {
    pages
        .iter()
        .map(|page| normalize_text(page.as_ref()))
        .filter(|page| !page.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Production extractor backed by `pdf-extract`.
pub struct PdfExtractor;

#[async_trait]
impl DocumentExtractor for PdfExtractor {
    async fn extract(&self, document: Bytes) -> Result<String, ExtractionError> {
        if !document.starts_with(PDF_MAGIC) {
            return Err(ExtractionError::NotPdf);
        }

        // pdf-extract is CPU-bound and can panic on malformed input.
        let pages = tokio::task::spawn_blocking(move || {
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                pdf_extract::extract_text_from_mem_by_pages(&document)
            }))
        })
        .await
        .map_err(|e| ExtractionError::Unavailable(e.to_string()))?
        .map_err(|_| {
            warn!("pdf-extract panicked while parsing an upload");
            ExtractionError::Malformed("parser panicked".to_string())
        })?
        .map_err(|e| ExtractionError::Malformed(e.to_string()))?;

        let text = join_pages(&pages);
        if text.is_empty() {
            return Err(ExtractionError::NoText);
        }

        debug!(
            "Extracted {} chars from {} PDF page(s)",
            text.chars().count(),
            pages.len()
        );
        Ok(text)
    }
}
