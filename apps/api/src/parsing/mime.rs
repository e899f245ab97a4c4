use crate::parsing::text_extractor::extension;

pub const PDF_MIME: &str = "application/pdf";
pub const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
const OCTET_STREAM_MIME: &str = "application/octet-stream";

/// MIME types a multimodal model can read directly.
const VISION_MIMES: &[&str] = &[PDF_MIME, "image/jpeg", "image/png", "image/webp"];

pub fn is_vision_mime(mime: &str) -> bool {
    VISION_MIMES.contains(&mime)
}

fn mime_from_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "pdf" => Some(PDF_MIME),
        "docx" => Some(DOCX_MIME),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "webp" => Some("image/webp"),
        "txt" => Some("text/plain"),
        "md" => Some("text/markdown"),
        _ => None,
    }
}

/// MIME type of an upload: the filename extension wins, then the declared
/// content type, then PDF.
pub fn resolve_mime(filename: &str, declared: Option<&str>) -> String {
    if let Some(mime) = extension(filename).as_deref().and_then(mime_from_extension) {
        return mime.to_string();
    }

    declared
        .map(|d| {
            d.split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase()
        })
        .filter(|d| !d.is_empty() && d != OCTET_STREAM_MIME)
        .unwrap_or_else(|| PDF_MIME.to_string())
}

/// How a single parse request extracts its record. Chosen once, never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// Multimodal model first, rule-based parser for backfill or fallback.
    VisionFirst,
    RuleBasedOnly,
}

impl ExtractionStrategy {
    pub fn select(mime: &str, vision_available: bool) -> Self {
        if vision_available && is_vision_mime(mime) {
            ExtractionStrategy::VisionFirst
        } else {
            ExtractionStrategy::RuleBasedOnly
        }
    }
}

impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionStrategy::VisionFirst => write!(f, "vision_first"),
            ExtractionStrategy::RuleBasedOnly => write!(f, "rule_based_only"),
        }
    }
}
