//! Core of the PDF excerpt service: download a document, sanity-check it,
//! extract the text of every page and clip it for transport.
//!
//! The document parser itself sits behind [`DocumentParser`]; the MuPDF
//! implementation lives in the `pdf-excerpt-mupdf` crate.

pub mod backend;
pub mod config_file;
pub mod excerpt;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod settings;
pub mod validate;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use backend::{BackendError, DocumentParser, FormatValidator, ParsedDocument, TextItem};
pub use excerpt::{MAX_TEXT_CHARS, PREVIEW_CHARS, clip_text, preview, utf16_len};
pub use fetch::{FetchError, FetchedDocument, Fetcher, FetcherOptions};
pub use pipeline::{Pipeline, PipelineError};
pub use settings::Settings;
pub use validate::LopdfValidator;
