// Resume parsing pipeline.
// Vision extraction first when available, rule-based section parsing behind it,
// a regex pass as the last resort. Each request is independent.

pub mod confidence;
pub mod handlers;
pub mod mime;
pub mod models;
pub mod orchestrator;
pub mod prompts;
pub mod regex_fallback;
pub mod relevancy;
pub mod sections;
pub mod text_extractor;
pub mod vision;

pub use orchestrator::{ParseError, ResumeParser, ResumeUpload};
