use crate::backend::{BackendError, FormatValidator};

/// Structural check backed by `lopdf`.
///
/// Loads the cross-reference table and object graph without interpreting any
/// content streams, which is enough to reject truncated files and non-PDF
/// payloads (HTML error pages, images) before the full parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct LopdfValidator;

impl FormatValidator for LopdfValidator {
    fn validate(&self, bytes: &[u8]) -> Result<(), BackendError> {
        lopdf::Document::load_mem(bytes)
            .map(|_| ())
            .map_err(|e| BackendError::OpenError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::build_text_pdf;

    #[test]
    fn accepts_well_formed_pdf() {
        let bytes = build_text_pdf(&["Hello World"]).unwrap();
        assert!(LopdfValidator.validate(&bytes).is_ok());
    }

    #[test]
    fn rejects_html() {
        let bytes = b"<!DOCTYPE html><html><body>Not Found</body></html>";
        assert!(LopdfValidator.validate(bytes).is_err());
    }

    #[test]
    fn rejects_empty_buffer() {
        assert!(LopdfValidator.validate(&[]).is_err());
    }

    #[test]
    fn rejects_header_only() {
        assert!(LopdfValidator.validate(b"%PDF-1.5\n").is_err());
    }
}
