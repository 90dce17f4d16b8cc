//! Bounding the extracted text for transport.
//!
//! Lengths are counted in UTF-16 code units, the unit clients reading the
//! JSON body see as the string length. A cut never splits a surrogate pair:
//! a character that would cross the bound is left out whole.

/// Maximum length, in UTF-16 units, of the `text` field.
pub const MAX_TEXT_CHARS: usize = 1000;

/// Length, in UTF-16 units, of the `firstChars` preview before the suffix.
pub const PREVIEW_CHARS: usize = 100;

/// Appended to every preview, whether or not anything was cut.
pub const PREVIEW_SUFFIX: &str = "...";

/// Return the longest prefix of `text` spanning at most `max_units` UTF-16
/// code units.
pub fn truncate_utf16(text: &str, max_units: usize) -> &str {
    let mut units = 0;
    for (byte_idx, c) in text.char_indices() {
        units += c.len_utf16();
        if units > max_units {
            return &text[..byte_idx];
        }
    }
    text
}

/// Clip the full document text to [`MAX_TEXT_CHARS`].
pub fn clip_text(text: &str) -> &str {
    truncate_utf16(text, MAX_TEXT_CHARS)
}

/// Build the `firstChars` preview: first [`PREVIEW_CHARS`] units plus "...".
pub fn preview(text: &str) -> String {
    let head = truncate_utf16(text, PREVIEW_CHARS);
    let mut out = String::with_capacity(head.len() + PREVIEW_SUFFIX.len());
    out.push_str(head);
    out.push_str(PREVIEW_SUFFIX);
    out
}

/// Length of `text` as reported in `textLength`.
pub fn utf16_len(text: &str) -> usize {
    text.encode_utf16().count()
}
