//! PPTX backend: writes an Office Open XML presentation with `zip`.
//!
//! The package is the smallest set of parts PowerPoint, Keynote and
//! LibreOffice accept: one master, one blank layout, one theme, and the
//! slides. Slide order: title, summary, one slide per section.

use std::io::{Cursor, Write};

use quick_xml::escape::escape;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::layout::paginate::SUMMARY_HEADING;
use crate::layout::{classify_body, image_failure_note, image_suggestion, BodyLine};
use crate::models::{OutputFormat, TopicContent};
use crate::render::images::{LoadedImage, SectionImage};
use crate::render::sanitize::sanitize_text;
use crate::render::{DocumentRenderer, RenderError};

// 16:9, in EMU (914400 per inch).
const SLIDE_CX: i64 = 12_192_000;
const SLIDE_CY: i64 = 6_858_000;
const INSET: i64 = 457_200;
const TITLE_CY: i64 = 1_143_000;
const CAPTION_CY: i64 = 457_200;
const IMAGE_BOX: i64 = 4_572_000;

const NS: &str = r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main""#;
const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_OFFICE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

#[derive(Default)]
pub struct PptxRenderer;

impl DocumentRenderer for PptxRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Ppt
    }

    fn render(&self, content: &TopicContent, images: &[SectionImage]) -> Result<Vec<u8>, RenderError> {
        let slides = build_slides(content, images);
        write_package(&sanitize_text(&content.title), &slides)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Slide model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
enum Paragraph {
    Bullet(String),
    Plain(String),
}

struct Slide<'a> {
    title: String,
    body: Vec<Paragraph>,
    caption: Option<String>,
    picture: Option<&'a LoadedImage>,
    /// Title slides centre a large heading and carry no body.
    is_cover: bool,
}

fn build_slides<'a>(content: &TopicContent, images: &'a [SectionImage]) -> Vec<Slide<'a>> {
    let mut slides = vec![
        Slide {
            title: sanitize_text(&content.title).into_owned(),
            body: Vec::new(),
            caption: None,
            picture: None,
            is_cover: true,
        },
        Slide {
            title: SUMMARY_HEADING.to_string(),
            body: content
                .summary_points
                .iter()
                .map(|p| Paragraph::Bullet(sanitize_text(p).into_owned()))
                .collect(),
            caption: None,
            picture: None,
            is_cover: false,
        },
    ];

    for (index, section) in content.sections.iter().enumerate() {
        let body = classify_body(&sanitize_text(&section.main_content))
            .into_iter()
            .map(|line| match line {
                BodyLine::Bullet(text) => Paragraph::Bullet(text),
                BodyLine::Paragraph(text) => Paragraph::Plain(text),
            })
            .collect();
        let (caption, picture) = match images.get(index) {
            Some(SectionImage::Loaded(image)) => (None, Some(image)),
            Some(SectionImage::Failed(cause)) => (Some(image_failure_note(cause)), None),
            Some(SectionImage::None) | None => (Some(image_suggestion(&section.image_prompt)), None),
        };
        slides.push(Slide {
            title: sanitize_text(&section.title).into_owned(),
            body,
            caption,
            picture,
            is_cover: false,
        });
    }
    slides
}

// ────────────────────────────────────────────────────────────────────────────
// Package writer
// ────────────────────────────────────────────────────────────────────────────

fn write_package(title: &str, slides: &[Slide<'_>]) -> Result<Vec<u8>, RenderError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let mut put = |name: &str, data: &[u8]| -> Result<(), RenderError> {
        zip.start_file(name, options)
            .map_err(|e| RenderError::Pptx(e.to_string()))?;
        zip.write_all(data)?;
        Ok(())
    };

    let media: Vec<Option<String>> = slides
        .iter()
        .enumerate()
        .map(|(i, s)| s.picture.map(|p| format!("image{}.{}", i + 1, p.kind.extension())))
        .collect();

    put("[Content_Types].xml", content_types(slides.len()).as_bytes())?;
    put("_rels/.rels", package_rels().as_bytes())?;
    put("docProps/core.xml", core_props(title).as_bytes())?;
    put("ppt/presentation.xml", presentation(slides.len()).as_bytes())?;
    put("ppt/_rels/presentation.xml.rels", presentation_rels(slides.len()).as_bytes())?;
    put("ppt/slideMasters/slideMaster1.xml", SLIDE_MASTER.as_bytes())?;
    put("ppt/slideMasters/_rels/slideMaster1.xml.rels", master_rels().as_bytes())?;
    put("ppt/slideLayouts/slideLayout1.xml", SLIDE_LAYOUT.as_bytes())?;
    put("ppt/slideLayouts/_rels/slideLayout1.xml.rels", layout_rels().as_bytes())?;
    put("ppt/theme/theme1.xml", THEME.as_bytes())?;

    for (i, slide) in slides.iter().enumerate() {
        let n = i + 1;
        put(&format!("ppt/slides/slide{n}.xml"), slide_xml(slide).as_bytes())?;
        put(
            &format!("ppt/slides/_rels/slide{n}.xml.rels"),
            slide_rels(media[i].as_deref()).as_bytes(),
        )?;
        if let (Some(name), Some(picture)) = (&media[i], slide.picture) {
            put(&format!("ppt/media/{name}"), &picture.bytes)?;
        }
    }

    let cursor = zip
        .finish()
        .map_err(|e| RenderError::Pptx(e.to_string()))?;
    Ok(cursor.into_inner())
}

fn content_types(slide_count: usize) -> String {
    let mut xml = format!(
        r#"{XML_DECL}<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Default Extension="png" ContentType="image/png"/><Default Extension="jpeg" ContentType="image/jpeg"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/><Override PartName="/ppt/presentation.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml"/><Override PartName="/ppt/slideMasters/slideMaster1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml"/><Override PartName="/ppt/slideLayouts/slideLayout1.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml"/><Override PartName="/ppt/theme/theme1.xml" ContentType="application/vnd.openxmlformats-officedocument.theme+xml"/>"#
    );
    for n in 1..=slide_count {
        xml.push_str(&format!(
            r#"<Override PartName="/ppt/slides/slide{n}.xml" ContentType="application/vnd.openxmlformats-officedocument.presentationml.slide+xml"/>"#
        ));
    }
    xml.push_str("</Types>");
    xml
}

fn package_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{REL_OFFICE}/officeDocument" Target="ppt/presentation.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#
    )
}

fn core_props(title: &str) -> String {
    format!(
        r#"{XML_DECL}<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>{}</dc:title></cp:coreProperties>"#,
        xml_text(title)
    )
}

/// Relationship ids in presentation.xml.rels: rId1 master, rId2 theme, rId3.. slides.
fn presentation(slide_count: usize) -> String {
    let slide_ids: String = (0..slide_count)
        .map(|i| format!(r#"<p:sldId id="{}" r:id="rId{}"/>"#, 256 + i, i + 3))
        .collect();
    format!(
        r#"{XML_DECL}<p:presentation {NS}><p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst><p:sldIdLst>{slide_ids}</p:sldIdLst><p:sldSz cx="{SLIDE_CX}" cy="{SLIDE_CY}"/><p:notesSz cx="{SLIDE_CY}" cy="{SLIDE_CX}"/></p:presentation>"#
    )
}

fn presentation_rels(slide_count: usize) -> String {
    let slides: String = (0..slide_count)
        .map(|i| {
            format!(
                r#"<Relationship Id="rId{}" Type="{REL_OFFICE}/slide" Target="slides/slide{}.xml"/>"#,
                i + 3,
                i + 1
            )
        })
        .collect();
    format!(
        r#"{XML_DECL}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{REL_OFFICE}/slideMaster" Target="slideMasters/slideMaster1.xml"/><Relationship Id="rId2" Type="{REL_OFFICE}/theme" Target="theme/theme1.xml"/>{slides}</Relationships>"#
    )
}

fn master_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{REL_OFFICE}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/><Relationship Id="rId2" Type="{REL_OFFICE}/theme" Target="../theme/theme1.xml"/></Relationships>"#
    )
}

fn layout_rels() -> String {
    format!(
        r#"{XML_DECL}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{REL_OFFICE}/slideMaster" Target="../slideMasters/slideMaster1.xml"/></Relationships>"#
    )
}

/// rId1 is always the layout; rId2 the picture, when present.
fn slide_rels(media: Option<&str>) -> String {
    let picture = media
        .map(|name| {
            format!(r#"<Relationship Id="rId2" Type="{REL_OFFICE}/image" Target="../media/{name}"/>"#)
        })
        .unwrap_or_default();
    format!(
        r#"{XML_DECL}<Relationships xmlns="{REL_NS}"><Relationship Id="rId1" Type="{REL_OFFICE}/slideLayout" Target="../slideLayouts/slideLayout1.xml"/>{picture}</Relationships>"#
    )
}

// ────────────────────────────────────────────────────────────────────────────
// Slide XML
// ────────────────────────────────────────────────────────────────────────────

const EMPTY_GROUP: &str = r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#;

#[derive(Clone, Copy)]
struct Rect {
    x: i64,
    y: i64,
    cx: i64,
    cy: i64,
}

fn slide_xml(slide: &Slide<'_>) -> String {
    let mut shapes = String::new();
    let full_width = SLIDE_CX - 2 * INSET;

    if slide.is_cover {
        let rect = Rect {
            x: INSET,
            y: SLIDE_CY / 2 - TITLE_CY,
            cx: full_width,
            cy: 2 * TITLE_CY,
        };
        let para = run_paragraph(&slide.title, 4000, true, false, Some("ctr"), false);
        shapes.push_str(&text_shape(2, "Title", rect, &para));
        return wrap_slide(&shapes);
    }

    let title_rect = Rect {
        x: INSET,
        y: INSET / 2,
        cx: full_width,
        cy: TITLE_CY,
    };
    let title_para = run_paragraph(&slide.title, 3200, true, false, None, false);
    shapes.push_str(&text_shape(2, "Title", title_rect, &title_para));

    let body_top = title_rect.y + TITLE_CY;
    let body_bottom = SLIDE_CY - INSET - CAPTION_CY;
    let body_cx = if slide.picture.is_some() {
        full_width - IMAGE_BOX - INSET
    } else {
        full_width
    };
    let body_rect = Rect {
        x: INSET,
        y: body_top,
        cx: body_cx,
        cy: body_bottom - body_top,
    };
    let body: String = slide
        .body
        .iter()
        .map(|p| match p {
            Paragraph::Bullet(text) => run_paragraph(text, 1800, false, false, None, true),
            Paragraph::Plain(text) => run_paragraph(text, 1800, false, false, None, false),
        })
        .collect();
    if !body.is_empty() {
        shapes.push_str(&text_shape(3, "Body", body_rect, &body));
    }

    if let Some(picture) = slide.picture {
        let (w_px, h_px) = picture.dimensions();
        let (cx, cy) = fit_box(w_px, h_px, IMAGE_BOX, body_bottom - body_top);
        let rect = Rect {
            x: SLIDE_CX - INSET - cx,
            y: body_top,
            cx,
            cy,
        };
        shapes.push_str(&picture_shape(4, rect));
    }

    if let Some(caption) = &slide.caption {
        let rect = Rect {
            x: INSET,
            y: body_bottom,
            cx: full_width,
            cy: CAPTION_CY,
        };
        let para = run_paragraph(caption, 1200, false, true, None, false);
        shapes.push_str(&text_shape(5, "Caption", rect, &para));
    }

    wrap_slide(&shapes)
}

fn wrap_slide(shapes: &str) -> String {
    format!(
        r#"{XML_DECL}<p:sld {NS}><p:cSld><p:spTree>{EMPTY_GROUP}{shapes}</p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>"#
    )
}

fn xfrm(rect: Rect) -> String {
    format!(
        r#"<a:xfrm><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></a:xfrm>"#,
        rect.x, rect.y, rect.cx, rect.cy
    )
}

fn text_shape(id: u32, name: &str, rect: Rect, paragraphs: &str) -> String {
    format!(
        r#"<p:sp><p:nvSpPr><p:cNvPr id="{id}" name="{name}"/><p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr><p:txBody><a:bodyPr wrap="square" rtlCol="0"><a:normAutofit/></a:bodyPr><a:lstStyle/>{paragraphs}</p:txBody></p:sp>"#,
        xfrm(rect)
    )
}

fn picture_shape(id: u32, rect: Rect) -> String {
    format!(
        r#"<p:pic><p:nvPicPr><p:cNvPr id="{id}" name="Picture"/><p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/></p:nvPicPr><p:blipFill><a:blip r:embed="rId2"/><a:stretch><a:fillRect/></a:stretch></p:blipFill><p:spPr>{}<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></p:spPr></p:pic>"#,
        xfrm(rect)
    )
}

/// `size` is in hundredths of a point.
fn run_paragraph(
    text: &str,
    size: u32,
    bold: bool,
    italic: bool,
    align: Option<&str>,
    bullet: bool,
) -> String {
    let mut ppr = String::from("<a:pPr");
    if let Some(align) = align {
        ppr.push_str(&format!(r#" algn="{align}""#));
    }
    if bullet {
        ppr.push_str(r#" marL="342900" indent="-342900"><a:buFont typeface="Arial"/><a:buChar char="&#8226;"/></a:pPr>"#);
    } else {
        ppr.push_str("><a:buNone/></a:pPr>");
    }
    format!(
        r#"<a:p>{ppr}<a:r><a:rPr lang="en-US" sz="{size}" b="{}" i="{}" dirty="0"/><a:t>{}</a:t></a:r></a:p>"#,
        u8::from(bold),
        u8::from(italic),
        xml_text(text)
    )
}

/// Escapes text for an XML element, dropping characters XML 1.0 forbids.
fn xml_text(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\t'))
        .collect();
    escape(cleaned.as_str()).into_owned()
}

/// Scales `w_px` × `h_px` to fit inside `max_cx` × `max_cy`, keeping aspect.
fn fit_box(w_px: u32, h_px: u32, max_cx: i64, max_cy: i64) -> (i64, i64) {
    let (w, h) = (w_px.max(1) as f64, h_px.max(1) as f64);
    let scale = (max_cx as f64 / w).min(max_cy as f64 / h);
    ((w * scale).round() as i64, (h * scale).round() as i64)
}

// ────────────────────────────────────────────────────────────────────────────
// Static parts
// ────────────────────────────────────────────────────────────────────────────

const SLIDE_MASTER: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldMaster xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld><p:bg><p:bgRef idx="1001"><a:schemeClr val="bg1"/></p:bgRef></p:bg><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMap bg1="lt1" tx1="dk1" bg2="lt2" tx2="dk2" accent1="accent1" accent2="accent2" accent3="accent3" accent4="accent4" accent5="accent5" accent6="accent6" hlink="hlink" folHlink="folHlink"/><p:sldLayoutIdLst><p:sldLayoutId id="2147483649" r:id="rId1"/></p:sldLayoutIdLst></p:sldMaster>"#;

const SLIDE_LAYOUT: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><p:sldLayout xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" type="blank" preserve="1"><p:cSld name="Blank"><p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr/></p:spTree></p:cSld><p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sldLayout>"#;

const THEME: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?><a:theme xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" name="Topic"><a:themeElements><a:clrScheme name="Topic"><a:dk1><a:srgbClr val="000000"/></a:dk1><a:lt1><a:srgbClr val="FFFFFF"/></a:lt1><a:dk2><a:srgbClr val="000080"/></a:dk2><a:lt2><a:srgbClr val="EEECE1"/></a:lt2><a:accent1><a:srgbClr val="4F81BD"/></a:accent1><a:accent2><a:srgbClr val="C0504D"/></a:accent2><a:accent3><a:srgbClr val="9BBB59"/></a:accent3><a:accent4><a:srgbClr val="8064A2"/></a:accent4><a:accent5><a:srgbClr val="4BACC6"/></a:accent5><a:accent6><a:srgbClr val="F79646"/></a:accent6><a:hlink><a:srgbClr val="0000FF"/></a:hlink><a:folHlink><a:srgbClr val="800080"/></a:folHlink></a:clrScheme><a:fontScheme name="Topic"><a:majorFont><a:latin typeface="Helvetica"/><a:ea typeface=""/><a:cs typeface=""/></a:majorFont><a:minorFont><a:latin typeface="Helvetica"/><a:ea typeface=""/><a:cs typeface=""/></a:minorFont></a:fontScheme><a:fmtScheme name="Topic"><a:fillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:fillStyleLst><a:lnStyleLst><a:ln w="9525"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="25400"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln><a:ln w="38100"><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:ln></a:lnStyleLst><a:effectStyleLst><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle><a:effectStyle><a:effectLst/></a:effectStyle></a:effectStyleLst><a:bgFillStyleLst><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill><a:solidFill><a:schemeClr val="phClr"/></a:solidFill></a:bgFillStyleLst></a:fmtScheme></a:themeElements></a:theme>"#;

#[cfg(test)]
mod tests {
    use std::io::Read;

    use bytes::Bytes;

    use super::*;
    use crate::models::Section;
    use crate::render::images::{decode_image, tests::png_bytes};

    fn sample_content(sections: usize) -> TopicContent {
        TopicContent {
            title: "AI & You 🤖".to_string(),
            summary_points: vec!["First <point>".to_string(), "Second".to_string()],
            sections: (1..=sections)
                .map(|i| Section {
                    title: format!("Section {i}"),
                    main_content: "Intro.\n* Bullet one\n2. Bullet two".to_string(),
                    image_prompt: format!("picture {i}"),
                    image_url: None,
                })
                .collect(),
        }
    }

    fn read_entry(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut out = String::new();
        file.read_to_string(&mut out).unwrap();
        out
    }

    fn slide_count(bytes: &[u8]) -> usize {
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        archive
            .file_names()
            .filter(|n| n.starts_with("ppt/slides/slide") && n.ends_with(".xml"))
            .count()
    }

    #[test]
    fn test_one_slide_per_section_plus_title_and_summary() {
        let bytes = PptxRenderer.render(&sample_content(5), &[]).unwrap();
        assert_eq!(slide_count(&bytes), 7);
        let presentation = read_entry(&bytes, "ppt/presentation.xml");
        assert_eq!(presentation.matches("<p:sldId ").count(), 7);
    }

    #[test]
    fn test_text_is_sanitized_and_escaped() {
        let bytes = PptxRenderer.render(&sample_content(1), &[]).unwrap();
        let cover = read_entry(&bytes, "ppt/slides/slide1.xml");
        assert!(cover.contains("AI &amp; You (Idea)"), "cover: {cover}");
        let summary = read_entry(&bytes, "ppt/slides/slide2.xml");
        assert!(summary.contains("First &lt;point&gt;"));
    }

    #[test]
    fn test_section_slide_bullets_and_caption() {
        let bytes = PptxRenderer.render(&sample_content(1), &[]).unwrap();
        let slide = read_entry(&bytes, "ppt/slides/slide3.xml");
        assert!(slide.contains("<a:t>Section 1</a:t>"));
        assert!(slide.contains("<a:t>Bullet two</a:t>"));
        assert_eq!(slide.matches("<a:buChar").count(), 2);
        assert!(slide.contains("(Idea) Image Suggestion: picture 1"));
    }

    #[test]
    fn test_loaded_image_is_embedded_as_media() {
        let image = decode_image(Bytes::from(png_bytes(30, 10))).unwrap();
        let images = vec![SectionImage::Loaded(image), SectionImage::Failed("boom".into())];
        let bytes = PptxRenderer.render(&sample_content(2), &images).unwrap();

        let rels = read_entry(&bytes, "ppt/slides/_rels/slide3.xml.rels");
        assert!(rels.contains("../media/image3.png"));
        let slide = read_entry(&bytes, "ppt/slides/slide3.xml");
        assert!(slide.contains(r#"r:embed="rId2""#));
        assert!(!slide.contains("Image Suggestion"));

        let failed = read_entry(&bytes, "ppt/slides/slide4.xml");
        assert!(failed.contains("[Image failed: boom]"));

        let mut archive = zip::ZipArchive::new(Cursor::new(&bytes[..])).unwrap();
        assert!(archive.by_name("ppt/media/image3.png").is_ok());
    }

    #[test]
    fn test_fit_box_keeps_aspect() {
        assert_eq!(fit_box(200, 100, 1000, 1000), (1000, 500));
        assert_eq!(fit_box(100, 400, 1000, 1000), (250, 1000));
    }
}
