//! Splits a section's free-text body into bullet and paragraph lines.
//!
//! Shared by the PDF and PPTX renderers so both treat the model's markup the
//! same way.

/// One logical line of a section body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyLine {
    /// Marker (`*`, `-`, `1.`) stripped.
    Bullet(String),
    Paragraph(String),
}

/// Classifies each non-blank line of `body`.
pub fn classify_body(body: &str) -> Vec<BodyLine> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(classify_line)
        .collect()
}

/// A line is a bullet when it starts with `*` or `-`, or with digits followed
/// by `.` and whitespace. A marker with nothing after it stays a paragraph.
pub fn classify_line(line: &str) -> BodyLine {
    let line = line.trim();
    match strip_marker(line) {
        Some(rest) if !rest.is_empty() => BodyLine::Bullet(rest.to_string()),
        _ => BodyLine::Paragraph(line.to_string()),
    }
}

fn strip_marker(line: &str) -> Option<&str> {
    if line.starts_with('*') {
        return Some(line.trim_start_matches('*').trim_start());
    }
    if let Some(rest) = line.strip_prefix('-') {
        return Some(rest.trim_start());
    }

    let digits = line.len() - line.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let rest = line[digits..].strip_prefix('.')?;
    // "3.5 million" is a number, not a list item.
    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        Some(rest.trim_start())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbered_line_is_bullet_with_prefix_stripped() {
        assert_eq!(
            classify_line("1. Self-driving cars"),
            BodyLine::Bullet("Self-driving cars".to_string())
        );
    }

    #[test]
    fn test_plain_line_is_paragraph() {
        assert_eq!(
            classify_line("Just text"),
            BodyLine::Paragraph("Just text".to_string())
        );
    }

    #[test]
    fn test_star_and_dash_markers() {
        assert_eq!(classify_line("* Mimics decisions"), BodyLine::Bullet("Mimics decisions".into()));
        assert_eq!(classify_line("- Automation"), BodyLine::Bullet("Automation".into()));
        assert_eq!(classify_line("**Bold lead**"), BodyLine::Bullet("Bold lead**".into()));
    }

    #[test]
    fn test_multi_digit_numbering() {
        assert_eq!(classify_line("12. Twelfth"), BodyLine::Bullet("Twelfth".into()));
    }

    #[test]
    fn test_decimal_number_is_not_a_bullet() {
        assert_eq!(
            classify_line("3.5 million qubits"),
            BodyLine::Paragraph("3.5 million qubits".into())
        );
        assert_eq!(classify_line("2024 was big"), BodyLine::Paragraph("2024 was big".into()));
    }

    #[test]
    fn test_bare_marker_stays_paragraph() {
        assert_eq!(classify_line("-"), BodyLine::Paragraph("-".into()));
    }

    #[test]
    fn test_classify_body_skips_blank_lines() {
        let body = "AI applications are everywhere:\n\n1. Self-driving cars\n   \n* Chatbots\n";
        assert_eq!(
            classify_body(body),
            vec![
                BodyLine::Paragraph("AI applications are everywhere:".into()),
                BodyLine::Bullet("Self-driving cars".into()),
                BodyLine::Bullet("Chatbots".into()),
            ]
        );
    }
}
