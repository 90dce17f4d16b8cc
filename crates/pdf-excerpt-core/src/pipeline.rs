//! The per-request extraction pipeline:
//! fetch -> validate -> parse -> per-page text -> aggregate -> truncate.
//!
//! Nothing here is shared between requests except the immutable backends and
//! the HTTP client; every buffer lives on the calling task.

use std::sync::Arc;

use thiserror::Error;

use crate::backend::{BackendError, DocumentParser, FormatValidator};
use crate::excerpt::{clip_text, preview};
use crate::extract::{extract_full_text, normalize_empty};
use crate::fetch::{FetchError, Fetcher};
use crate::validate::LopdfValidator;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Invalid PDF format")]
    InvalidFormat(#[source] BackendError),
    #[error("PDF extraction failed: {0}")]
    Extraction(String),
}

impl PipelineError {
    /// Stable tag for logs and the optional detailed error body.
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::Fetch(_) => "fetch",
            PipelineError::InvalidFormat(_) => "invalid_format",
            PipelineError::Extraction(_) => "extraction",
        }
    }
}

pub struct Pipeline {
    fetcher: Fetcher,
    validator: Arc<dyn FormatValidator>,
    parser: Arc<dyn DocumentParser>,
}

impl Pipeline {
    pub fn new(
        fetcher: Fetcher,
        validator: Arc<dyn FormatValidator>,
        parser: Arc<dyn DocumentParser>,
    ) -> Self {
        Self {
            fetcher,
            validator,
            parser,
        }
    }

    /// Pipeline with the default [`LopdfValidator`] gate in front of `parser`.
    pub fn with_parser(fetcher: Fetcher, parser: Arc<dyn DocumentParser>) -> Self {
        Self::new(fetcher, Arc::new(LopdfValidator), parser)
    }

    /// Download `url` and return its text, clipped to
    /// [`MAX_TEXT_CHARS`](crate::excerpt::MAX_TEXT_CHARS) characters.
    ///
    /// A document with no extractable text is a success with an empty string.
    pub async fn extract_text(&self, url: &str) -> Result<String, PipelineError> {
        let document = self.fetcher.fetch(url).await?;

        let validator = Arc::clone(&self.validator);
        let parser = Arc::clone(&self.parser);

        // Validation and parsing are CPU-bound; keep them off the async workers.
        let full_text = tokio::task::spawn_blocking(move || {
            extract_blocking(validator.as_ref(), parser.as_ref(), &document.bytes)
        })
        .await
        .map_err(|e| PipelineError::Extraction(format!("extraction task failed: {e}")))??;

        tracing::info!(url, length = full_text.len(), "text extraction complete");
        let full_text = normalize_empty(full_text);
        tracing::debug!(preview = %preview(&full_text), "extracted text");

        Ok(clip_text(&full_text).to_string())
    }
}

fn extract_blocking(
    validator: &dyn FormatValidator,
    parser: &dyn DocumentParser,
    bytes: &[u8],
) -> Result<String, PipelineError> {
    validator
        .validate(bytes)
        .map_err(PipelineError::InvalidFormat)?;

    let document = parser
        .parse(bytes)
        .map_err(|e| PipelineError::Extraction(e.to_string()))?;
    tracing::info!(pages = document.page_count(), "PDF loaded");

    extract_full_text(document.as_ref())
        .map_err(|e| PipelineError::Extraction(e.to_string()))
}
