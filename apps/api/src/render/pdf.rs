//! PDF backend: draws a paginated plan with `printpdf` using the base-14
//! Helvetica family, so no font files are needed at runtime.

use image::DynamicImage;
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Rgb,
};

use crate::layout::{default_page_config, paginate, Page, PageConfig, PageItem, PdfFont, TextColor};
use crate::models::{OutputFormat, TopicContent};
use crate::render::images::SectionImage;
use crate::render::sanitize::sanitize_text;
use crate::render::{DocumentRenderer, RenderError};

const LAYER_NAME: &str = "Content";
/// ZapfDingbats 'l' is a filled circle.
const BULLET_GLYPH: &str = "l";
const IMAGE_DPI: f32 = 300.0;

pub struct PdfRenderer {
    config: PageConfig,
}

impl PdfRenderer {
    pub fn new(config: PageConfig) -> Self {
        Self { config }
    }
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(default_page_config())
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    italic: IndirectFontRef,
    bullet: IndirectFontRef,
}

impl Fonts {
    fn load(doc: &PdfDocumentReference) -> Result<Self, RenderError> {
        let load = |font: BuiltinFont| {
            doc.add_builtin_font(font)
                .map_err(|e| RenderError::Pdf(format!("failed to load built-in font: {e}")))
        };
        Ok(Self {
            regular: load(BuiltinFont::Helvetica)?,
            bold: load(BuiltinFont::HelveticaBold)?,
            italic: load(BuiltinFont::HelveticaOblique)?,
            bullet: load(BuiltinFont::ZapfDingbats)?,
        })
    }

    fn get(&self, font: PdfFont) -> &IndirectFontRef {
        match font {
            PdfFont::Regular => &self.regular,
            PdfFont::Bold => &self.bold,
            PdfFont::Italic => &self.italic,
        }
    }
}

impl DocumentRenderer for PdfRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Pdf
    }

    fn render(&self, content: &TopicContent, images: &[SectionImage]) -> Result<Vec<u8>, RenderError> {
        let pages = paginate(content, images, &self.config);
        let width = Mm(self.config.page_width_mm);
        let height = Mm(self.config.page_height_mm);

        let (doc, first_page, first_layer) = PdfDocument::new(
            sanitize_text(&content.title).into_owned(),
            width,
            height,
            LAYER_NAME.to_string(),
        );
        let fonts = Fonts::load(&doc)?;

        for (index, page) in pages.iter().enumerate() {
            let layer = if index == 0 {
                doc.get_page(first_page).get_layer(first_layer)
            } else {
                let (page_idx, layer_idx) = doc.add_page(width, height, LAYER_NAME);
                doc.get_page(page_idx).get_layer(layer_idx)
            };
            self.draw_page(&layer, page, &fonts, images);
        }

        doc.save_to_bytes()
            .map_err(|e| RenderError::Pdf(format!("failed to serialize PDF: {e}")))
    }
}

impl PdfRenderer {
    /// Converts a top-down plan coordinate to PDF user space (origin bottom-left).
    fn flip(&self, y_from_top_mm: f32) -> Mm {
        Mm(self.config.page_height_mm - y_from_top_mm)
    }

    fn draw_page(
        &self,
        layer: &PdfLayerReference,
        page: &Page,
        fonts: &Fonts,
        images: &[SectionImage],
    ) {
        for item in &page.items {
            match item {
                PageItem::Text {
                    font,
                    size_pt,
                    color,
                    x_mm,
                    baseline_mm,
                    text,
                } => {
                    layer.set_fill_color(fill(*color));
                    layer.use_text(
                        text.as_str(),
                        *size_pt,
                        Mm(*x_mm),
                        self.flip(*baseline_mm),
                        fonts.get(*font),
                    );
                }
                PageItem::Bullet {
                    size_pt,
                    x_mm,
                    baseline_mm,
                } => {
                    layer.set_fill_color(fill(TextColor::Black));
                    layer.use_text(
                        BULLET_GLYPH,
                        *size_pt,
                        Mm(*x_mm),
                        self.flip(*baseline_mm),
                        &fonts.bullet,
                    );
                }
                PageItem::Image {
                    section,
                    x_mm,
                    top_mm,
                    width_mm,
                    height_mm,
                } => {
                    // The plan only places images that decoded successfully.
                    if let Some(SectionImage::Loaded(loaded)) = images.get(*section) {
                        let rgb = DynamicImage::ImageRgb8(loaded.image.to_rgb8());
                        let (w_px, h_px) = loaded.dimensions();
                        let natural_w_mm = w_px as f32 * 25.4 / IMAGE_DPI;
                        let natural_h_mm = h_px as f32 * 25.4 / IMAGE_DPI;
                        Image::from_dynamic_image(&rgb).add_to_layer(
                            layer.clone(),
                            ImageTransform {
                                translate_x: Some(Mm(*x_mm)),
                                translate_y: Some(self.flip(top_mm + height_mm)),
                                scale_x: Some(width_mm / natural_w_mm),
                                scale_y: Some(height_mm / natural_h_mm),
                                dpi: Some(IMAGE_DPI),
                                ..Default::default()
                            },
                        );
                    }
                }
            }
        }
    }
}

fn fill(color: TextColor) -> Color {
    match color {
        TextColor::Black => Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)),
        TextColor::Navy => Color::Rgb(Rgb::new(0.0, 0.0, 128.0 / 255.0, None)),
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;
    use crate::models::Section;
    use crate::render::images::{decode_image, tests::png_bytes};

    fn sample_content(sections: usize) -> TopicContent {
        TopicContent {
            title: "Artificial Intelligence Overview".to_string(),
            summary_points: vec![
                "AI simulates human intelligence processes by machines.".to_string(),
                "Key subsets include ML, DL, and NLP 🤖.".to_string(),
            ],
            sections: (1..=sections)
                .map(|i| Section {
                    title: format!("Section {i}"),
                    main_content: "Intro line.\n* Mimics human decision-making.\n1. Self-driving cars"
                        .to_string(),
                    image_prompt: "Illustration of AI concept.".to_string(),
                    image_url: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let bytes = PdfRenderer::default()
            .render(&sample_content(5), &[])
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"), "missing PDF header");
        assert!(bytes.len() > 500);
    }

    #[test]
    fn test_render_with_embedded_and_failed_images() {
        let loaded = decode_image(Bytes::from(png_bytes(64, 32))).unwrap();
        let images = vec![
            SectionImage::Loaded(loaded),
            SectionImage::Failed("connection refused".to_string()),
        ];
        let bytes = PdfRenderer::default()
            .render(&sample_content(2), &images)
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_long_document_spans_pages() {
        let bytes = PdfRenderer::default()
            .render(&sample_content(40), &[])
            .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_flip_converts_to_bottom_origin() {
        let renderer = PdfRenderer::default();
        assert_eq!(renderer.flip(15.0).0, 282.0);
    }
}
