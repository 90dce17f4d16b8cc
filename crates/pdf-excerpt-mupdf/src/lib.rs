use mupdf::{Document, TextPageFlags};

use pdf_excerpt_core::{BackendError, DocumentParser, ParsedDocument, TextItem};

/// MuPDF-based implementation of [`DocumentParser`].
///
/// This crate is the sole AGPL island: it isolates the mupdf dependency
/// (which is AGPL-3.0) so the core and its tests do not transitively
/// depend on it.
///
/// Each structured-text line becomes one [`TextItem::Fragment`]. A text block
/// that carries no lines becomes a [`TextItem::Marker`]. Pages are read with
/// [`TextPageFlags::empty()`], so image blocks are not emitted at all and an
/// image-only or blank page yields no items.
#[derive(Debug, Clone, Copy, Default)]
pub struct MupdfParser;

impl MupdfParser {
    pub fn new() -> Self {
        Self
    }
}

impl DocumentParser for MupdfParser {
    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn ParsedDocument>, BackendError> {
        let document = Document::from_bytes(bytes, "application/pdf")
            .map_err(|e| BackendError::OpenError(e.to_string()))?;
        let page_count = document
            .page_count()
            .map_err(|e| BackendError::OpenError(e.to_string()))?;

        Ok(Box::new(MupdfDocument {
            document,
            page_count: usize::try_from(page_count).unwrap_or(0),
        }))
    }
}

struct MupdfDocument {
    document: Document,
    page_count: usize,
}

impl ParsedDocument for MupdfDocument {
    fn page_count(&self) -> usize {
        self.page_count
    }

    fn page_items(&self, page_number: usize) -> Result<Vec<TextItem>, BackendError> {
        let page_error = |message: String| BackendError::PageError {
            page: page_number,
            message,
        };

        let index = page_number
            .checked_sub(1)
            .and_then(|i| i32::try_from(i).ok())
            .ok_or_else(|| page_error(format!("page number {page_number} out of range")))?;

        let page = self
            .document
            .load_page(index)
            .map_err(|e| page_error(e.to_string()))?;
        let text_page = page
            .to_text_page(TextPageFlags::empty())
            .map_err(|e| page_error(e.to_string()))?;

        let mut items = Vec::new();
        for block in text_page.blocks() {
            let mut has_lines = false;
            for line in block.lines() {
                has_lines = true;
                let line_text: String = line
                    .chars()
                    .map(|c| c.char().unwrap_or('\u{FFFD}'))
                    .collect();
                items.push(TextItem::Fragment(line_text));
            }
            if !has_lines {
                items.push(TextItem::Marker);
            }
        }

        tracing::trace!(page = page_number, items = items.len(), "page text items");
        Ok(items)
    }
}
