// Prompt templates for topic outline generation.

/// Topic outline prompt template. Replace `{topic}` before sending.
pub const TOPIC_PROMPT_TEMPLATE: &str = r#"Generate a presentation content in strict JSON format for the topic: "{topic}".

Structure it like this:
{
  "title": "Main title",
  "summary_points": ["Point 1", "Point 2", "Point 3"],
  "slides": [
    {
      "slide_title": "Slide 1 Title",
      "main_content": "Bullet points or short explanation for slide 1.",
      "image_prompt": "Relevant image description (3-6 words)"
    },
    {
      "slide_title": "Slide 2 Title",
      "main_content": "Slide 2 content.",
      "image_prompt": "Image prompt"
    }
  ]
}

Rules:
- Output only valid JSON.
- No explanations, no markdown, just JSON.
- Include 5-7 slides minimum."#;

/// Fills the topic template.
///
/// Double quotes in the topic become single quotes so the topic cannot close
/// the quotation it sits in.
pub fn build_topic_prompt(topic: &str) -> String {
    let topic = topic.trim().replace('"', "'");
    TOPIC_PROMPT_TEMPLATE.replace("{topic}", &topic)
}
