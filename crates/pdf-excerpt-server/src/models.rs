use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use pdf_excerpt_core::{PipelineError, preview, utf16_len};

pub const URL_REQUIRED: &str = "URL is required";
pub const EXTRACTION_FAILED: &str = "Failed to extract text from PDF";
pub const PROCESSING_FAILED: &str = "Failed to process request";

// ── Request ─────────────────────────────────────────────────────────────

/// Failure to make sense of the request body at all.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("{0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("request body is null")]
    NullBody,
    /// The body could not be read, e.g. it exceeded the size limit.
    #[error("{0}")]
    Body(String),
}

/// The `url` of an extraction request, or `None` when it is missing or falsy.
///
/// Missing, `null`, `false`, `0` and `""` all count as absent. Non-object
/// bodies have no `url`. Other non-string values are passed on as their JSON
/// text and fail at fetch time.
pub fn parse_extract_url(body: &[u8]) -> Result<Option<String>, RequestError> {
    match serde_json::from_slice::<Value>(body)? {
        Value::Null => Err(RequestError::NullBody),
        Value::Object(map) => Ok(map.get("url").and_then(url_from_value)),
        _ => Ok(None),
    }
}

fn url_from_value(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

// ── Responses ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok",
            message: "PDF Extraction Service",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResponse {
    pub success: bool,
    pub text: String,
    pub text_length: usize,
    pub first_chars: String,
}

impl ExtractResponse {
    pub fn new(text: String) -> Self {
        Self {
            success: true,
            text_length: utf16_len(&text),
            first_chars: preview(&text),
            text,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: &'static str) -> Self {
        Self {
            error,
            kind: None,
            details: None,
        }
    }

    pub fn with_details(error: &'static str, details: impl Into<String>) -> Self {
        Self {
            details: Some(details.into()),
            ..Self::new(error)
        }
    }

    /// Generic extraction failure, optionally carrying the failure kind.
    pub fn extraction_failed(err: &PipelineError, expose: bool) -> Self {
        if expose {
            Self {
                kind: Some(err.kind()),
                ..Self::with_details(EXTRACTION_FAILED, err.to_string())
            }
        } else {
            Self::new(EXTRACTION_FAILED)
        }
    }
}
