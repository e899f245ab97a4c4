//! Vision extraction: the rendered document goes to a multimodal model which
//! answers with a JSON resume record.
//!
//! `VisionExtractor` is the seam. The orchestrator holds an
//! `Arc<dyn VisionExtractor>` so tests can substitute a fake model.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::llm_client::{strip_json_fences, DocumentAttachment, LlmClient, LlmError};
use crate::parsing::mime::is_vision_mime;
use crate::parsing::models::{dedupe_case_insensitive, ResumeRecord, DEFAULT_CANDIDATE_NAME};
use crate::parsing::prompts::{vision_extraction_prompt, vision_system_prompt};

#[derive(Debug, Error)]
pub enum VisionError {
    #[error("Unsupported media type for vision extraction: {0}")]
    UnsupportedMedia(String),

    #[error("Vision model call failed: {0}")]
    Llm(#[from] LlmError),

    #[error("Vision response is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Vision response is not a JSON object")]
    NotAnObject,
}

/// A multimodal model that reads a document and answers with a JSON string.
/// One attempt per call; callers own any retry policy.
#[async_trait]
pub trait VisionExtractor: Send + Sync {
    async fn extract(
        &self,
        bytes: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String, VisionError>;
}

/// Production extractor backed by the Anthropic Messages API.
pub struct LlmVisionExtractor {
    llm: LlmClient,
    system: String,
}

impl LlmVisionExtractor {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            system: vision_system_prompt(),
        }
    }
}

#[async_trait]
impl VisionExtractor for LlmVisionExtractor {
    async fn extract(
        &self,
        bytes: &[u8],
        mime_type: &str,
        prompt: &str,
    ) -> Result<String, VisionError> {
        if !is_vision_mime(mime_type) {
            return Err(VisionError::UnsupportedMedia(mime_type.to_string()));
        }
        let attachment = DocumentAttachment::from_bytes(bytes, mime_type);
        let response = self
            .llm
            .call_with_document(prompt, &self.system, &attachment)
            .await?;
        let text = response.text().ok_or(LlmError::EmptyContent)?;
        Ok(text.to_string())
    }
}

/// Runs `extractor` once over the document and decodes its answer.
pub async fn extract_with_vision(
    extractor: &dyn VisionExtractor,
    bytes: &[u8],
    mime_type: &str,
) -> Result<ResumeRecord, VisionError> {
    let raw = extractor
        .extract(bytes, mime_type, &vision_extraction_prompt())
        .await?;
    decode_vision_record(&raw)
}

/// Decodes a model answer into a record. Field types are accepted loosely:
/// models return lists where strings are expected and vice versa.
pub fn decode_vision_record(raw: &str) -> Result<ResumeRecord, VisionError> {
    let value: Value = serde_json::from_str(strip_json_fences(raw))?;
    let obj = value.as_object().ok_or(VisionError::NotAnObject)?;

    let name = text_field(obj, "name");
    Ok(ResumeRecord {
        name: if name.is_empty() {
            DEFAULT_CANDIDATE_NAME.to_string()
        } else {
            name
        },
        email: text_field(obj, "email"),
        phone: text_field(obj, "phone"),
        education: text_field(obj, "education"),
        skills: dedupe_case_insensitive(list_field(obj, "skills", true)),
        experience: list_field(obj, "experience", false),
        projects: list_field(obj, "projects", false),
    })
}

fn text_field(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .map(scalar_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join("; "),
        Some(value) => scalar_text(value),
        None => String::new(),
    }
}

fn list_field(obj: &Map<String, Value>, key: &str, split_commas: bool) -> Vec<String> {
    let items: Vec<String> = match obj.get(key) {
        Some(Value::Array(items)) => items.iter().map(scalar_text).collect(),
        Some(Value::String(s)) if split_commas => s.split(',').map(str::to_string).collect(),
        Some(Value::String(s)) => s.lines().map(str::to_string).collect(),
        Some(value) => vec![scalar_text(value)],
        None => Vec::new(),
    };
    items
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Renders a JSON value as display text. Objects become their string values joined by ", ".
fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(scalar_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => map
            .values()
            .map(scalar_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
    }
}
