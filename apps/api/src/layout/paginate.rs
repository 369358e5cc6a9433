//! Report pagination: turns a `TopicContent` into positioned page items.
//!
//! The plan is pure data (millimetres, measured from the top-left corner) so it
//! can be checked in tests without parsing PDF output. The PDF backend only
//! converts coordinates and draws.
//!
//! Emission order: title → summary → sections in order. A page break happens
//! whenever the next line or image would cross the bottom margin.

use crate::layout::body::{classify_body, BodyLine};
use crate::layout::font_metrics::{get_metrics, PageConfig, PdfFont, MM_PER_PT};
use crate::layout::wrap::wrap_text;
use crate::models::TopicContent;
use crate::render::images::SectionImage;
use crate::render::sanitize::sanitize_text;

pub const SUMMARY_HEADING: &str = "Key Takeaways / Summary";
pub const IMAGE_SUGGESTION_LABEL: &str = "\u{1F4A1} Image Suggestion: ";
pub const IMAGE_WIDTH_MM: f32 = 100.0;

const TITLE_SIZE_PT: f32 = 20.0;
const TITLE_LINE_MM: f32 = 15.0;
const HEADING_SIZE_PT: f32 = 13.0;
const HEADING_LINE_MM: f32 = 10.0;
const BODY_SIZE_PT: f32 = 11.0;
const BODY_LINE_MM: f32 = 6.0;
const NOTE_SIZE_PT: f32 = 8.0;
const NOTE_LINE_MM: f32 = 5.0;
const BULLET_INDENT_MM: f32 = 5.0;

// ────────────────────────────────────────────────────────────────────────────
// Plan types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    Black,
    Navy,
}

/// One positioned element on a page.
#[derive(Debug, Clone, PartialEq)]
pub enum PageItem {
    Text {
        font: PdfFont,
        size_pt: f32,
        color: TextColor,
        x_mm: f32,
        /// Baseline, measured from the top edge.
        baseline_mm: f32,
        text: String,
    },
    /// The bullet glyph in front of a bulleted line.
    Bullet {
        size_pt: f32,
        x_mm: f32,
        baseline_mm: f32,
    },
    Image {
        /// Index into `TopicContent::sections`.
        section: usize,
        x_mm: f32,
        top_mm: f32,
        width_mm: f32,
        height_mm: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub items: Vec<PageItem>,
}

#[cfg(test)]
impl Page {
    /// All text on the page, in emission order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

struct PageCursor<'a> {
    config: &'a PageConfig,
    pages: Vec<Page>,
    y_mm: f32,
}

impl<'a> PageCursor<'a> {
    fn new(config: &'a PageConfig) -> Self {
        Self {
            config,
            pages: vec![Page::default()],
            y_mm: config.content_top_mm(),
        }
    }

    fn current(&mut self) -> &mut Page {
        // `pages` is never empty: it starts with one page and only grows.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Breaks to a new page if `height_mm` does not fit below the cursor.
    /// A fresh page never breaks again, so oversized items still make progress.
    fn reserve(&mut self, height_mm: f32) {
        let at_top = (self.y_mm - self.config.content_top_mm()).abs() < f32::EPSILON;
        if !at_top && self.y_mm + height_mm > self.config.content_bottom_mm() {
            self.pages.push(Page::default());
            self.y_mm = self.config.content_top_mm();
        }
    }

    fn gap(&mut self, mm: f32) {
        self.y_mm += mm;
    }

    /// Baseline for text of `size_pt` vertically centred in a line of `line_mm`.
    fn baseline(&self, line_mm: f32, size_pt: f32) -> f32 {
        self.y_mm + 0.5 * line_mm + 0.3 * size_pt * MM_PER_PT
    }

    fn text_line(&mut self, style: LineStyle, x_mm: f32, text: String) {
        self.reserve(style.line_mm);
        let baseline_mm = self.baseline(style.line_mm, style.size_pt);
        self.current().items.push(PageItem::Text {
            font: style.font,
            size_pt: style.size_pt,
            color: style.color,
            x_mm,
            baseline_mm,
            text,
        });
        self.y_mm += style.line_mm;
    }

    fn bullet_line(&mut self, style: LineStyle, text: String) {
        self.reserve(style.line_mm);
        let baseline_mm = self.baseline(style.line_mm, style.size_pt);
        let margin = self.config.margin_mm;
        let page = self.current();
        page.items.push(PageItem::Bullet {
            size_pt: style.size_pt,
            x_mm: margin,
            baseline_mm,
        });
        page.items.push(PageItem::Text {
            font: style.font,
            size_pt: style.size_pt,
            color: style.color,
            x_mm: margin + BULLET_INDENT_MM,
            baseline_mm,
            text,
        });
        self.y_mm += style.line_mm;
    }

    fn finish(self) -> Vec<Page> {
        self.pages
    }
}

#[derive(Debug, Clone, Copy)]
struct LineStyle {
    font: PdfFont,
    size_pt: f32,
    line_mm: f32,
    color: TextColor,
}

const TITLE: LineStyle = LineStyle {
    font: PdfFont::Bold,
    size_pt: TITLE_SIZE_PT,
    line_mm: TITLE_LINE_MM,
    color: TextColor::Black,
};

const HEADING: LineStyle = LineStyle {
    font: PdfFont::Bold,
    size_pt: HEADING_SIZE_PT,
    line_mm: HEADING_LINE_MM,
    color: TextColor::Navy,
};

const BODY: LineStyle = LineStyle {
    font: PdfFont::Regular,
    size_pt: BODY_SIZE_PT,
    line_mm: BODY_LINE_MM,
    color: TextColor::Black,
};

const NOTE: LineStyle = LineStyle {
    font: PdfFont::Italic,
    size_pt: NOTE_SIZE_PT,
    line_mm: NOTE_LINE_MM,
    color: TextColor::Black,
};

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Text shown in place of an image when the section has no image URL.
pub fn image_suggestion(prompt: &str) -> String {
    sanitize_text(&format!("{IMAGE_SUGGESTION_LABEL}{prompt}")).into_owned()
}

/// Text shown in place of an image that could not be fetched or decoded.
pub fn image_failure_note(cause: &str) -> String {
    sanitize_text(&format!("[Image failed: {cause}]")).into_owned()
}

/// Lays out the whole report. `images` is aligned with `content.sections`;
/// a missing entry is treated as "no image URL".
pub fn paginate(content: &TopicContent, images: &[SectionImage], config: &PageConfig) -> Vec<Page> {
    let mut cursor = PageCursor::new(config);
    let width = config.text_width_mm();
    let margin = config.margin_mm;

    // Title, centred.
    let title_metrics = get_metrics(TITLE.font);
    for line in wrap_text(&sanitize_text(&content.title), title_metrics, TITLE.size_pt, width) {
        let line_w = title_metrics.width_mm(&line, TITLE.size_pt);
        let x = margin + ((width - line_w) / 2.0).max(0.0);
        cursor.text_line(TITLE, x, line);
    }
    cursor.gap(10.0);

    // Summary.
    heading(&mut cursor, SUMMARY_HEADING);
    for point in &content.summary_points {
        bullet(&mut cursor, &sanitize_text(point));
    }
    cursor.gap(5.0);

    // Sections.
    for (index, section) in content.sections.iter().enumerate() {
        heading(&mut cursor, &sanitize_text(&section.title));

        for line in classify_body(&sanitize_text(&section.main_content)) {
            match line {
                BodyLine::Bullet(text) => bullet(&mut cursor, &text),
                BodyLine::Paragraph(text) => paragraph(&mut cursor, BODY, &text),
            }
        }
        cursor.gap(4.0);

        match images.get(index).unwrap_or(&SectionImage::None) {
            SectionImage::Loaded(image) => {
                let (w_px, h_px) = image.dimensions();
                let usable = config.content_bottom_mm() - config.content_top_mm();
                let mut width_mm = IMAGE_WIDTH_MM;
                let mut height_mm = width_mm * h_px as f32 / w_px as f32;
                if height_mm > usable {
                    width_mm *= usable / height_mm;
                    height_mm = usable;
                }
                cursor.reserve(height_mm);
                let top_mm = cursor.y_mm;
                cursor.current().items.push(PageItem::Image {
                    section: index,
                    x_mm: margin,
                    top_mm,
                    width_mm,
                    height_mm,
                });
                cursor.gap(height_mm + 10.0);
            }
            SectionImage::Failed(cause) => paragraph(&mut cursor, NOTE, &image_failure_note(cause)),
            SectionImage::None => paragraph(&mut cursor, NOTE, &image_suggestion(&section.image_prompt)),
        }
    }

    cursor.finish()
}

fn heading(cursor: &mut PageCursor<'_>, text: &str) {
    paragraph(cursor, HEADING, text);
    cursor.gap(2.0);
}

fn paragraph(cursor: &mut PageCursor<'_>, style: LineStyle, text: &str) {
    let x = cursor.config.margin_mm;
    let width = cursor.config.text_width_mm();
    for line in wrap_text(text, get_metrics(style.font), style.size_pt, width) {
        cursor.text_line(style, x, line);
    }
}

/// First wrapped line carries the glyph; continuation lines hang under the text.
fn bullet(cursor: &mut PageCursor<'_>, text: &str) {
    let x = cursor.config.margin_mm + BULLET_INDENT_MM;
    let width = cursor.config.text_width_mm() - BULLET_INDENT_MM;
    let lines = wrap_text(text, get_metrics(BODY.font), BODY.size_pt, width);
    for (i, line) in lines.into_iter().enumerate() {
        if i == 0 {
            cursor.bullet_line(BODY, line);
        } else {
            cursor.text_line(BODY, x, line);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
