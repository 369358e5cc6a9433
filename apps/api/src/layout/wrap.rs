//! Greedy word wrap against the static font metrics.

use crate::layout::font_metrics::FontMetricTable;

/// Breaks `text` into lines no wider than `max_width_mm` at `size_pt`.
///
/// Words are kept whole unless a single word is wider than the line, in which
/// case it is split at character boundaries. Runs of whitespace collapse to a
/// single space. Empty or whitespace-only input yields no lines.
pub fn wrap_text(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_mm: f32,
) -> Vec<String> {
    let space_w = metrics.space_mm(size_pt);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        for piece in split_overlong(word, metrics, size_pt, max_width_mm) {
            let piece_w = metrics.width_mm(piece, size_pt);

            if current.is_empty() {
                current.push_str(piece);
                current_width = piece_w;
            } else if current_width + space_w + piece_w > max_width_mm {
                // Line is full; start a new one.
                lines.push(std::mem::take(&mut current));
                current.push_str(piece);
                current_width = piece_w;
            } else {
                current.push(' ');
                current.push_str(piece);
                current_width += space_w + piece_w;
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Splits a word wider than the line into line-sized chunks.
fn split_overlong<'a>(
    word: &'a str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_mm: f32,
) -> Vec<&'a str> {
    if metrics.width_mm(word, size_pt) <= max_width_mm {
        return vec![word];
    }

    let mut pieces = Vec::new();
    let mut start = 0;
    let mut width = 0.0_f32;
    for (idx, c) in word.char_indices() {
        let mut buf = [0u8; 4];
        let char_w = metrics.width_mm(c.encode_utf8(&mut buf), size_pt);
        // Always keep at least one char per piece so progress is guaranteed.
        if idx > start && width + char_w > max_width_mm {
            pieces.push(&word[start..idx]);
            start = idx;
            width = 0.0;
        }
        width += char_w;
    }
    pieces.push(&word[start..]);
    pieces
}
