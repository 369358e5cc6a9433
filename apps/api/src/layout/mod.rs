// Report layout: static font metrics, greedy word wrap, body-line
// classification and pagination into positioned page items.
// Pure computation. The PDF backend in render::pdf only draws the result.

pub mod body;
pub mod font_metrics;
pub mod paginate;
pub mod wrap;

// Re-export the public API consumed by the renderers.
pub use body::{classify_body, BodyLine};
pub use font_metrics::{default_page_config, PageConfig, PdfFont};
pub use paginate::{image_failure_note, image_suggestion, paginate, Page, PageItem, TextColor};
