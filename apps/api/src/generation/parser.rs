//! Structured content parser: turns normalized model text into `TopicContent`.
//!
//! Parsing is strict JSON followed by a typed decode with default-on-missing
//! fields. Anything the model returns that is not a JSON object describing an
//! outline is an `InvalidOutput`, never a panic.

use serde_json::Value;

use crate::generation::GenerationError;
use crate::models::TopicContent;

const INVALID_JSON_MESSAGE: &str =
    "Gemini returned invalid JSON format. Try rephrasing the topic.";

/// Parses normalized model output.
pub fn parse_topic_content(text: &str) -> Result<TopicContent, GenerationError> {
    let value: Value = serde_json::from_str(text)
        .map_err(|e| GenerationError::InvalidOutput(format!("{INVALID_JSON_MESSAGE} ({e})")))?;

    let object = value.as_object().ok_or_else(|| {
        GenerationError::InvalidOutput(format!(
            "Model output was JSON but not an object (got {})",
            json_kind(&value)
        ))
    })?;

    // A model-side refusal shaped like our own error object.
    if !object.contains_key("title") {
        if let Some(error) = object.get("error") {
            let message = error
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(GenerationError::InvalidOutput(format!(
                "Model returned an error object: {message}"
            )));
        }
    }

    serde_json::from_value(value).map_err(|e| {
        GenerationError::InvalidOutput(format!("Model output did not match the outline schema: {e}"))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
