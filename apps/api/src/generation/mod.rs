// Topic outline generation.
// Implements: prompt building, the model call, response normalization and parsing.
// All model calls go through llm_client; no direct Gemini calls here.

pub mod generator;
pub mod handlers;
pub mod normalize;
pub mod parser;
pub mod prompts;

use thiserror::Error;

/// Why a topic could not be turned into structured content.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Transport, auth, quota, blocked or empty model response.
    #[error("Error generating content from Gemini: {0}")]
    Failed(String),

    /// The model answered, but not with a usable JSON outline.
    #[error("{0}")]
    InvalidOutput(String),
}
