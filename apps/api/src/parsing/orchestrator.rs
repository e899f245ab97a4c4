//! Resume parsing orchestrator.
//!
//! Picks an [`ExtractionStrategy`] per request, runs the extraction chain
//! (vision → rule-based sections → regex), backfills gaps, and assembles the
//! scored response. Stateless: everything lives for one request.

use std::sync::Arc;

use bytes::Bytes;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::parsing::confidence::{score_fields, ConfidenceWeights};
use crate::parsing::mime::{resolve_mime, ExtractionStrategy};
use crate::parsing::models::{
    uniform_provenance, FieldSource, ParseResponse, Provenance, ResumeField, ResumeRecord,
};
use crate::parsing::regex_fallback::regex_fallback;
use crate::parsing::relevancy::score_relevancy;
use crate::parsing::sections::parse_sections;
use crate::parsing::text_extractor::extract_text;
use crate::parsing::vision::{extract_with_vision, VisionExtractor};

/// Raw text shorter than this is replaced by the record itself for relevancy scoring.
const MIN_RAW_TEXT_FOR_RELEVANCY: usize = 100;
const SNIPPET_CHARS: usize = 500;

#[derive(Debug, Error)]
pub enum ParseError {
    /// The upload itself is unusable. Surfaces as a 4xx.
    #[error("Invalid upload: {0}")]
    Validation(String),

    /// The upload exceeds the configured body limit.
    #[error("Upload too large: {0}")]
    TooLarge(String),

    /// Anything else. Surfaces as a 5xx with a generic message.
    #[error("Resume parsing failed: {0}")]
    Unexpected(String),
}

/// One uploaded document plus the optional job description to score against.
#[derive(Debug, Clone)]
pub struct ResumeUpload {
    pub bytes: Bytes,
    /// Only used for extension sniffing.
    pub filename: String,
    /// Only used as a fallback MIME hint.
    pub content_type: Option<String>,
    pub job_description: Option<String>,
}

pub type TextExtractFn = fn(&[u8], &str) -> String;

#[derive(Clone)]
pub struct ResumeParser {
    vision: Option<Arc<dyn VisionExtractor>>,
    weights: ConfidenceWeights,
    text_extractor: TextExtractFn,
}

impl ResumeParser {
    /// `vision` is `None` when no vision credential is configured.
    pub fn new(vision: Option<Arc<dyn VisionExtractor>>, weights: ConfidenceWeights) -> Self {
        Self {
            vision,
            weights,
            text_extractor: extract_text,
        }
    }

    /// Replaces the document text extractor.
    #[cfg(test)]
    pub fn with_text_extractor(mut self, text_extractor: TextExtractFn) -> Self {
        self.text_extractor = text_extractor;
        self
    }

    pub fn vision_enabled(&self) -> bool {
        self.vision.is_some()
    }

    /// Parses `upload` into a complete response, or fails as a whole.
    pub async fn parse(&self, upload: ResumeUpload) -> Result<ParseResponse, ParseError> {
        let mime = resolve_mime(&upload.filename, upload.content_type.as_deref());
        let strategy = ExtractionStrategy::select(&mime, self.vision_enabled());
        info!(
            "Parsing '{}' ({} bytes, {mime}) with strategy {strategy}",
            upload.filename,
            upload.bytes.len()
        );

        let extraction = match (strategy, &self.vision) {
            (ExtractionStrategy::VisionFirst, Some(vision)) => {
                match extract_with_vision(vision.as_ref(), &upload.bytes, &mime).await {
                    Ok(record) => {
                        let text = self.extract_text(&upload).await?;
                        backfill_from_text(record, text)
                    }
                    Err(e) => {
                        warn!("Vision extraction failed, falling back to rule-based parsing: {e}");
                        self.rule_based(&upload).await?
                    }
                }
            }
            _ => self.rule_based(&upload).await?,
        };

        let Extraction {
            record,
            provenance,
            raw_text,
        } = extraction;

        let confidence_scores = score_fields(&record, &provenance, &self.weights);

        let relevancy_text = if raw_text.chars().count() > MIN_RAW_TEXT_FOR_RELEVANCY {
            raw_text
        } else {
            relevancy_surrogate(&record)
        };
        let relevancy_score = score_relevancy(
            &relevancy_text,
            upload.job_description.as_deref().unwrap_or_default(),
        );

        Ok(ParseResponse {
            extracted_data: record,
            confidence_scores,
            relevancy_score,
            raw_text_snippet: relevancy_text.chars().take(SNIPPET_CHARS).collect(),
        })
    }

    async fn rule_based(&self, upload: &ResumeUpload) -> Result<Extraction, ParseError> {
        let text = self.extract_text(upload).await?;
        let (record, source) = fallback_extract(&text);
        Ok(Extraction {
            record,
            provenance: uniform_provenance(source),
            raw_text: text,
        })
    }

    /// Runs the (synchronous, CPU-bound) extractor on the blocking pool.
    async fn extract_text(&self, upload: &ResumeUpload) -> Result<String, ParseError> {
        let bytes = upload.bytes.clone();
        let filename = upload.filename.clone();
        let extractor = self.text_extractor;
        tokio::task::spawn_blocking(move || extractor(&bytes, &filename))
            .await
            .map_err(|e| ParseError::Unexpected(format!("text extraction task failed: {e}")))
    }
}

struct Extraction {
    record: ResumeRecord,
    provenance: Provenance,
    raw_text: String,
}

/// Rule-based parse, or the regex fallback when the parser found nothing in non-blank text.
pub fn fallback_extract(text: &str) -> (ResumeRecord, FieldSource) {
    let record = parse_sections(text);
    if record.is_blank() && !text.trim().is_empty() {
        debug!("Section parser found nothing, using regex fallback");
        (regex_fallback(text), FieldSource::Regex)
    } else {
        (record, FieldSource::RuleBased)
    }
}

/// Fills skills/experience/education left empty by vision from a rule-based parse of `text`.
fn backfill_from_text(mut record: ResumeRecord, text: String) -> Extraction {
    let mut provenance = uniform_provenance(FieldSource::Vision);

    let missing: Vec<ResumeField> = ResumeField::BACKFILLABLE
        .into_iter()
        .filter(|f| record.is_field_empty(*f))
        .collect();

    if !missing.is_empty() && !text.trim().is_empty() {
        let parsed = parse_sections(&text);
        for field in missing {
            if parsed.is_field_empty(field) {
                continue;
            }
            match field {
                ResumeField::Skills => record.skills = parsed.skills.clone(),
                ResumeField::Experience => record.experience = parsed.experience.clone(),
                ResumeField::Education => record.education = parsed.education.clone(),
                _ => continue,
            }
            debug!("Backfilled {field:?} from rule-based parse");
            provenance.insert(field, FieldSource::Backfill);
        }
    }

    Extraction {
        record,
        provenance,
        raw_text: text,
    }
}

/// Plain-text rendering of a record, used for relevancy when raw text is too short.
fn relevancy_surrogate(record: &ResumeRecord) -> String {
    let mut parts: Vec<&str> = Vec::new();
    if !record.is_field_empty(ResumeField::Name) {
        parts.push(&record.name);
    }
    parts.extend([&record.email, &record.phone, &record.education].map(String::as_str));
    parts.extend(record.skills.iter().map(String::as_str));
    parts.extend(record.experience.iter().map(String::as_str));
    parts.extend(record.projects.iter().map(String::as_str));
    parts
        .into_iter()
        .filter(|p| !p.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
