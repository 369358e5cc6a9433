// Document rendering: image fetch, text sanitization, and the PDF / PPTX backends.
// Rendering is CPU-bound and does blocking file I/O, so RenderService runs it
// on the blocking pool. Backends only see already-fetched images.

pub mod images;
pub mod pdf;
pub mod pptx;
pub mod sanitize;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use tracing::info;

use crate::models::{OutputFormat, TopicContent};
use images::{decode_images, fetch_section_images, SectionImage};
use pdf::PdfRenderer;
use pptx::PptxRenderer;
use sanitize::file_stem;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF error: {0}")]
    Pdf(String),

    #[error("PPTX error: {0}")]
    Pptx(String),

    #[error("render task failed: {0}")]
    Task(String),
}

/// A document backend. Produces the complete file contents in memory.
pub trait DocumentRenderer: Send + Sync {
    fn format(&self) -> OutputFormat;

    /// `images` is indexed like `content.sections`; missing entries render
    /// as image suggestions.
    fn render(&self, content: &TopicContent, images: &[SectionImage]) -> Result<Vec<u8>, RenderError>;
}

pub fn renderer_for(format: OutputFormat) -> Box<dyn DocumentRenderer> {
    match format {
        OutputFormat::Pdf => Box::new(PdfRenderer::default()),
        OutputFormat::Ppt => Box::new(PptxRenderer),
    }
}

/// `<dir>/<file stem of title>.<ext>`. Identical titles map to the same path.
pub fn output_path(dir: &Path, title: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{}.{}", file_stem(title), format.extension()))
}

/// Writes `bytes` next to `path` and renames it into place.
fn write_document(path: &Path, bytes: &[u8]) -> Result<(), RenderError> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".render-")
        .suffix(".part")
        .tempfile_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.persist(path).map_err(|e| RenderError::Io(e.error))?;
    Ok(())
}

/// Renders `content` and writes it under `output_dir`. Blocking.
pub fn render_document(
    content: &TopicContent,
    format: OutputFormat,
    images: &[SectionImage],
    output_dir: &Path,
) -> Result<PathBuf, RenderError> {
    let renderer = renderer_for(format);
    let bytes = renderer.render(content, images)?;
    let path = output_path(output_dir, &content.title, renderer.format());
    write_document(&path, &bytes)?;
    info!("Wrote {} ({} bytes)", path.display(), bytes.len());
    Ok(path)
}

/// Async entry point used by the HTTP layer.
#[derive(Debug, Clone)]
pub struct RenderService {
    http: reqwest::Client,
    output_dir: PathBuf,
    image_timeout: Duration,
}

impl RenderService {
    pub fn new(output_dir: impl Into<PathBuf>, image_timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            output_dir: output_dir.into(),
            image_timeout,
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Fetches section images, then renders and writes on the blocking pool.
    pub async fn render(&self, content: TopicContent, format: OutputFormat) -> Result<PathBuf, RenderError> {
        let fetched = fetch_section_images(&self.http, &content.sections, self.image_timeout).await;
        let output_dir = self.output_dir.clone();

        tokio::task::spawn_blocking(move || {
            let images = decode_images(fetched);
            render_document(&content, format, &images, &output_dir)
        })
        .await
        .map_err(|e| RenderError::Task(e.to_string()))?
    }
}
