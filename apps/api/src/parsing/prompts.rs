// Prompt constants for vision resume extraction.

use crate::llm_client::prompts::{JSON_ONLY_SYSTEM, NO_INVENTION_INSTRUCTION};

pub fn vision_system_prompt() -> String {
    format!("You are an expert resume parser reading a rendered document. {JSON_ONLY_SYSTEM}")
}

pub fn vision_extraction_prompt() -> String {
    format!("{VISION_EXTRACTION_PROMPT}\n\n{NO_INVENTION_INSTRUCTION}")
}

const VISION_EXTRACTION_PROMPT: &str = r#"Extract the candidate's details from the attached resume.

Return a JSON object with EXACTLY these keys:
{
  "name": "string",
  "email": "string",
  "phone": "string",
  "education": "string (degrees and institutions, separated by '; ')",
  "skills": ["skill1", "skill2"],
  "experience": ["one entry per role or bullet"],
  "projects": ["one entry per project"]
}

RULES:
1. Keep the original wording and casing of skills; list each skill once.
2. Each experience entry should name the role and company when present.
3. Return ONLY the JSON object. No other text, no code fences."#;
