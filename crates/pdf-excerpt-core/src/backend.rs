use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("failed to open PDF: {0}")]
    OpenError(String),
    #[error("failed to extract text from page {page}: {message}")]
    PageError { page: usize, message: String },
}

/// One item of a page's text content, in the order the parser emits them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextItem {
    /// A run of text with a string payload.
    Fragment(String),
    /// A non-text item (image block, marked-content boundary) with no payload.
    Marker,
}

impl TextItem {
    pub fn fragment(text: impl Into<String>) -> Self {
        TextItem::Fragment(text.into())
    }

    /// The string payload, or `None` for markers.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            TextItem::Fragment(s) => Some(s),
            TextItem::Marker => None,
        }
    }
}

/// Cheap sanity gate run on the raw bytes before the full parse.
pub trait FormatValidator: Send + Sync {
    fn validate(&self, bytes: &[u8]) -> Result<(), BackendError>;
}

/// Trait for document parsing backends.
///
/// Implementors turn raw bytes into a page collection; joining fragments,
/// page boundaries and truncation live in [`crate::extract`] and
/// [`crate::excerpt`].
pub trait DocumentParser: Send + Sync {
    fn parse(&self, bytes: &[u8]) -> Result<Box<dyn ParsedDocument>, BackendError>;
}

/// A parsed document, addressed by 1-indexed page number.
pub trait ParsedDocument {
    fn page_count(&self) -> usize;

    /// Text content items of page `page_number` (1-indexed).
    fn page_items(&self, page_number: usize) -> Result<Vec<TextItem>, BackendError>;
}
