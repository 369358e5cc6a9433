//! Topic Generation: orchestrates the content side of the pipeline.
//!
//! Flow: build prompt → model call → normalize → parse.
//!
//! Each step runs once. A failed step fails the whole generation; there is
//! no retry or repair pass.

use tracing::{info, warn};

use crate::generation::normalize::normalize_response;
use crate::generation::parser::parse_topic_content;
use crate::generation::prompts::build_topic_prompt;
use crate::generation::GenerationError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::TextGenerator;
use crate::models::TopicContent;

/// The model is asked for at least this many sections; fewer is logged, not rejected.
pub const MIN_REQUESTED_SECTIONS: usize = 5;

/// Generates structured content for `topic`.
pub async fn generate_topic_content(
    llm: &dyn TextGenerator,
    topic: &str,
) -> Result<TopicContent, GenerationError> {
    let prompt = build_topic_prompt(topic);

    info!("Requesting outline for topic {:?} from {}", topic, llm.model());
    let raw = llm
        .generate(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| GenerationError::Failed(e.to_string()))?;

    let normalized = normalize_response(&raw);
    let content = parse_topic_content(normalized).map_err(|e| {
        warn!(
            "Model response was not valid JSON: {:?}",
            raw.chars().take(200).collect::<String>()
        );
        e
    })?;

    if content.sections.len() < MIN_REQUESTED_SECTIONS {
        warn!(
            "Model returned {} sections for {:?} (requested at least {})",
            content.sections.len(),
            topic,
            MIN_REQUESTED_SECTIONS
        );
    }

    info!(
        "Outline ready: {:?} with {} sections",
        content.title,
        content.sections.len()
    );
    Ok(content)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::llm_client::LlmError;

    /// Returns a fixed response and records the prompts it was given.
    pub(crate) struct ScriptedGenerator {
        response: Result<String, String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl ScriptedGenerator {
        pub(crate) fn replying(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn failing(message: &str) -> Self {
            Self {
                response: Err(message.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, prompt: &str, _system: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(message) => Err(LlmError::Api {
                    status: 503,
                    message: message.clone(),
                }),
            }
        }

        fn model(&self) -> &str {
            "scripted"
        }
    }

    /// A schema-conformant outline with `sections` sections and no image URLs.
    pub(crate) fn outline_json(title: &str, sections: usize) -> String {
        let slides: Vec<_> = (1..=sections)
            .map(|i| {
                serde_json::json!({
                    "slide_title": format!("Part {i}"),
                    "main_content": format!("Intro for part {i}.\n* First point\n- Second point\n{i}. Numbered point"),
                    "image_prompt": format!("diagram of part {i}"),
                })
            })
            .collect();
        serde_json::json!({
            "title": title,
            "summary_points": ["Qubits hold superpositions", "Entanglement links qubits"],
            "slides": slides,
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_generate_parses_fenced_response() {
        let fenced = format!("```json\n{}\n```", outline_json("Quantum Computing", 5));
        let llm = ScriptedGenerator::replying(&fenced);
        let content = generate_topic_content(&llm, "Quantum Computing").await.unwrap();
        assert_eq!(content.title, "Quantum Computing");
        assert_eq!(content.sections.len(), 5);
        assert_eq!(content.summary_points.len(), 2);
    }

    #[tokio::test]
    async fn test_generate_sends_topic_in_prompt() {
        let llm = ScriptedGenerator::replying(&outline_json("T", 5));
        generate_topic_content(&llm, "Quantum Computing").await.unwrap();
        let prompts = llm.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1, "exactly one model call, no retries");
        assert!(prompts[0].contains("Quantum Computing"));
    }

    #[tokio::test]
    async fn test_non_json_response_is_invalid_output() {
        let llm = ScriptedGenerator::replying("Sorry, I can't help with that");
        let result = generate_topic_content(&llm, "Quantum Computing").await;
        assert!(matches!(result, Err(GenerationError::InvalidOutput(_))));
    }

    #[tokio::test]
    async fn test_client_failure_is_generation_failed() {
        let llm = ScriptedGenerator::failing("quota exceeded");
        match generate_topic_content(&llm, "Quantum Computing").await {
            Err(GenerationError::Failed(cause)) => assert!(cause.contains("quota exceeded")),
            other => panic!("expected Failed, got {other:?}"),
        }
        assert_eq!(llm.prompts.lock().unwrap().len(), 1);
    }
}
