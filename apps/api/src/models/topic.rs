use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Structured outline produced by the model for one topic.
///
/// Every field defaults when the model omits it, so a sparse but well-formed
/// JSON object still renders. Wire names follow the prompt schema; the
/// camelCase aliases are accepted because models drift between the two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicContent {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default, alias = "summaryPoints")]
    pub summary_points: Vec<String>,
    #[serde(default, rename = "slides", alias = "sections")]
    pub sections: Vec<Section>,
}

/// One titled unit of content: a slide in the deck, a segment in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    #[serde(default = "default_section_title", rename = "slide_title", alias = "sectionTitle")]
    pub title: String,
    #[serde(default = "default_main_content", alias = "mainContent")]
    pub main_content: String,
    #[serde(default = "default_image_prompt", alias = "imagePrompt")]
    pub image_prompt: String,
    #[serde(default, alias = "imageUrl", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn default_title() -> String {
    "Generated_Topic".to_string()
}

fn default_section_title() -> String {
    "Section".to_string()
}

fn default_main_content() -> String {
    "No content provided.".to_string()
}

fn default_image_prompt() -> String {
    "No image prompt".to_string()
}

impl Section {
    /// The image URL, if the model supplied a non-blank one.
    pub fn image_url(&self) -> Option<&str> {
        self.image_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Output format
// ────────────────────────────────────────────────────────────────────────────

/// Document kind requested by the caller. Defaults to a slide deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Pdf,
    #[default]
    Ppt,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Ppt => "pptx",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Pdf => f.write_str("pdf"),
            OutputFormat::Ppt => f.write_str("ppt"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFormat(pub String);

impl FromStr for OutputFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "ppt" | "pptx" => Ok(OutputFormat::Ppt),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_object_deserializes_with_empty_sequences() {
        let content: TopicContent =
            serde_json::from_str(r#"{"title":"T","summary_points":[],"slides":[]}"#).unwrap();
        assert_eq!(content.title, "T");
        assert!(content.summary_points.is_empty());
        assert!(content.sections.is_empty());
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let content: TopicContent = serde_json::from_str(r#"{"slides":[{}]}"#).unwrap();
        assert_eq!(content.title, "Generated_Topic");
        assert_eq!(content.sections.len(), 1);
        let section = &content.sections[0];
        assert_eq!(section.title, "Section");
        assert_eq!(section.main_content, "No content provided.");
        assert_eq!(section.image_prompt, "No image prompt");
        assert!(section.image_url().is_none());
    }

    #[test]
    fn test_camel_case_aliases_accepted() {
        let json = r#"{
            "title": "T",
            "summaryPoints": ["a"],
            "sections": [{
                "sectionTitle": "S",
                "mainContent": "body",
                "imagePrompt": "a robot",
                "imageUrl": "https://example.com/x.png"
            }]
        }"#;
        let content: TopicContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.summary_points, vec!["a".to_string()]);
        assert_eq!(content.sections[0].title, "S");
        assert_eq!(
            content.sections[0].image_url(),
            Some("https://example.com/x.png")
        );
    }

    #[test]
    fn test_blank_image_url_is_treated_as_absent() {
        let section: Section = serde_json::from_str(r#"{"image_url": "   "}"#).unwrap();
        assert!(section.image_url().is_none());
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("pdf".parse::<OutputFormat>(), Ok(OutputFormat::Pdf));
        assert_eq!("PPT".parse::<OutputFormat>(), Ok(OutputFormat::Ppt));
        assert_eq!("pptx".parse::<OutputFormat>(), Ok(OutputFormat::Ppt));
        assert!("docx".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::default(), OutputFormat::Ppt);
        assert_eq!(OutputFormat::Ppt.extension(), "pptx");
    }
}
