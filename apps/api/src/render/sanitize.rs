//! Maps text into the Latin-1 range the built-in PDF fonts can encode.

use std::borrow::Cow;

/// Replacement for any character the renderers cannot represent.
pub const PLACEHOLDER: &str = "(Idea)";

const MAX_SUPPORTED: char = '\u{FF}';

/// Replaces every character above U+00FF with [`PLACEHOLDER`].
///
/// Borrows when the input is already representable.
pub fn sanitize_text(text: &str) -> Cow<'_, str> {
    if text.chars().all(|c| c <= MAX_SUPPORTED) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c <= MAX_SUPPORTED {
            out.push(c);
        } else {
            out.push_str(PLACEHOLDER);
        }
    }
    Cow::Owned(out)
}

/// Derives the output file stem from a document title.
///
/// The title is sanitized, spaces become underscores, and `/` and `:` are
/// dropped. Falls back to `Generated_Topic` when nothing is left.
pub fn file_stem(title: &str) -> String {
    let stem: String = sanitize_text(title.trim())
        .chars()
        .filter(|c| !matches!(c, '/' | ':' | '\\'))
        .filter(|c| !c.is_control())
        .map(|c| if c == ' ' { '_' } else { c })
        .collect();
    if stem.is_empty() || stem.chars().all(|c| c == '.' || c == '_') {
        "Generated_Topic".to_string()
    } else {
        stem
    }
}
