//! Bounded context extraction from the editing surface.

use scribe_core::{Document, TextSize};

/// The source-text window and language tag a completion prompt is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContextWindow {
    /// Text in `[cursor - limit, cursor)`. Always ends exactly at the cursor;
    /// completion is a forward continuation, never infill.
    pub text: String,
    /// Leading word token of the editor mode identifier, e.g. "python" for
    /// "python-mode". Empty when the identifier has no word characters.
    pub language: String,
}

/// Extract the prompt context at `cursor`, taking at most `limit` bytes of
/// text before it.
///
/// Pure function of the document snapshot, cursor, and mode identifier.
/// Offsets are clamped to the document and snapped to UTF-8 character
/// boundaries; snapping only ever shrinks the window, so the result is
/// always `<= limit` bytes and never reads past the cursor.
pub fn extract(doc: &Document, cursor: TextSize, limit: usize, mode_id: &str) -> ContextWindow {
    let text = doc.text();
    let end = usize::from(cursor.min(doc.len()));
    let end = floor_char_boundary(text, end);
    let start = ceil_char_boundary(text, end.saturating_sub(limit));

    ContextWindow {
        text: text[start..end].to_string(),
        language: language_tag(mode_id),
    }
}

/// First maximal run of word characters (`[A-Za-z0-9_]`) in `mode_id`.
pub fn language_tag(mode_id: &str) -> String {
    let is_word = |c: char| c.is_ascii_alphanumeric() || c == '_';

    mode_id
        .chars()
        .skip_while(|&c| !is_word(c))
        .take_while(|&c| is_word(c))
        .collect()
}

fn floor_char_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while idx > 0 && !text.is_char_boundary(idx) {
        idx -= 1;
    }
    idx
}

fn ceil_char_boundary(text: &str, mut idx: usize) -> usize {
    idx = idx.min(text.len());
    while idx < text.len() && !text.is_char_boundary(idx) {
        idx += 1;
    }
    idx
}
