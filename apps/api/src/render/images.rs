//! Section images: fetched over HTTP before rendering, decoded inside the
//! blocking render step.
//!
//! Any failure here degrades to a note in the document. Nothing in this module
//! fails a request.

use std::time::Duration;

use bytes::Bytes;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, warn};

use crate::models::Section;

/// Responses larger than this are not embedded.
pub const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Result of the network stage for one section.
#[derive(Debug, Clone)]
pub enum FetchOutcome {
    NotRequested,
    Fetched(Bytes),
    Failed(String),
}

/// Image formats both renderers can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    Png,
    Jpeg,
}

impl ImageKind {
    pub fn extension(self) -> &'static str {
        match self {
            ImageKind::Png => "png",
            ImageKind::Jpeg => "jpeg",
        }
    }
}

/// A decoded image plus the original bytes (the PPTX renderer embeds those as-is).
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub kind: ImageKind,
    pub bytes: Bytes,
    pub image: DynamicImage,
}

impl LoadedImage {
    pub fn dimensions(&self) -> (u32, u32) {
        (self.image.width(), self.image.height())
    }
}

/// What the renderers see for one section.
#[derive(Debug, Clone)]
pub enum SectionImage {
    /// The section had no image URL; render the suggestion caption.
    None,
    Loaded(LoadedImage),
    /// Fetching or decoding failed; render the message inline.
    Failed(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Network stage
// ────────────────────────────────────────────────────────────────────────────

/// Downloads each section's image in order, one at a time.
pub async fn fetch_section_images(
    client: &reqwest::Client,
    sections: &[Section],
    timeout: Duration,
) -> Vec<FetchOutcome> {
    let mut outcomes = Vec::with_capacity(sections.len());
    for section in sections {
        let outcome = match section.image_url() {
            None => FetchOutcome::NotRequested,
            Some(url) => match fetch_one(client, url, timeout).await {
                Ok(bytes) => {
                    debug!("Fetched image {} ({} bytes)", url, bytes.len());
                    FetchOutcome::Fetched(bytes)
                }
                Err(e) => {
                    warn!("Image fetch failed for {}: {}", url, e);
                    FetchOutcome::Failed(e)
                }
            },
        };
        outcomes.push(outcome);
    }
    outcomes
}

async fn fetch_one(client: &reqwest::Client, url: &str, timeout: Duration) -> Result<Bytes, String> {
    let response = client
        .get(url)
        .timeout(timeout)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| e.to_string())?;

    if response
        .content_length()
        .is_some_and(|len| len as usize > MAX_IMAGE_BYTES)
    {
        return Err(format!("image larger than {MAX_IMAGE_BYTES} bytes"));
    }

    let bytes = response.bytes().await.map_err(|e| e.to_string())?;
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(format!("image larger than {MAX_IMAGE_BYTES} bytes"));
    }
    Ok(bytes)
}

// ────────────────────────────────────────────────────────────────────────────
// Decode stage (CPU-bound, runs inside spawn_blocking with the renderer)
// ────────────────────────────────────────────────────────────────────────────

pub fn decode_images(outcomes: Vec<FetchOutcome>) -> Vec<SectionImage> {
    outcomes
        .into_iter()
        .map(|outcome| match outcome {
            FetchOutcome::NotRequested => SectionImage::None,
            FetchOutcome::Failed(e) => SectionImage::Failed(e),
            FetchOutcome::Fetched(bytes) => match decode_image(bytes) {
                Ok(image) => SectionImage::Loaded(image),
                Err(e) => {
                    warn!("Image decode failed: {}", e);
                    SectionImage::Failed(e)
                }
            },
        })
        .collect()
}

pub fn decode_image(bytes: Bytes) -> Result<LoadedImage, String> {
    let format = image::guess_format(&bytes).map_err(|e| e.to_string())?;
    let kind = match format {
        ImageFormat::Png => ImageKind::Png,
        ImageFormat::Jpeg => ImageKind::Jpeg,
        other => return Err(format!("unsupported image format {other:?}")),
    };
    let image = image::load_from_memory_with_format(&bytes, format).map_err(|e| e.to_string())?;
    if image.width() == 0 || image.height() == 0 {
        return Err("image has no pixels".to_string());
    }
    Ok(LoadedImage { kind, bytes, image })
}
