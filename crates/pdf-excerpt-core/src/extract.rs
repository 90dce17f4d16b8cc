use crate::backend::{BackendError, ParsedDocument, TextItem};

/// Join the text fragments of one page with single spaces, dropping markers.
///
/// Items are taken in the order the parser emitted them; no attempt is made to
/// repair hyphenation or reorder columns.
pub fn page_text(items: &[TextItem]) -> String {
    items
        .iter()
        .filter_map(TextItem::as_str)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract the text of every page in order, each followed by a newline.
///
/// Pages are visited strictly one after another. The first failing page aborts
/// the whole extraction; no partial text is returned.
pub fn extract_full_text(document: &dyn ParsedDocument) -> Result<String, BackendError> {
    let num_pages = document.page_count();
    let mut full_text = String::new();

    for page_number in 1..=num_pages {
        tracing::debug!(page = page_number, pages = num_pages, "processing page");
        let items = document.page_items(page_number)?;
        full_text.push_str(&page_text(&items));
        full_text.push('\n');
    }

    Ok(full_text)
}

/// Collapse whitespace-only text to the empty string, warning when it happens.
pub fn normalize_empty(text: String) -> String {
    if text.trim().is_empty() {
        tracing::warn!(length = text.len(), "extracted text is empty");
        String::new()
    } else {
        text
    }
}
