//! Keyword-overlap relevancy between a resume and a job description.
//!
//! Lexical only: the score is the share of job-description keywords that also
//! occur in the resume, amplified by 1.5 and capped at 100.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

static WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("valid word regex"));

const MIN_JD_CHARS: usize = 10;
const MIN_KEYWORD_CHARS: usize = 3;
const AMPLIFICATION: f64 = 1.5;

const STOP_WORDS: &[&str] = &[
    "and", "the", "to", "of", "in", "for", "with", "a", "an", "is", "on", "are", "will", "be",
    "that", "it", "as",
];

fn tokenize(text: &str) -> HashSet<String> {
    let lower = text.to_lowercase();
    WORD_RE
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Distinct job-description tokens that count as keywords.
pub fn jd_keywords(job_description: &str) -> HashSet<String> {
    tokenize(job_description)
        .into_iter()
        .filter(|w| w.chars().count() > MIN_KEYWORD_CHARS && !STOP_WORDS.contains(&w.as_str()))
        .collect()
}

/// Scores `resume_text` against `job_description`, 0 – 100.
pub fn score_relevancy(resume_text: &str, job_description: &str) -> u8 {
    if job_description.trim().chars().count() < MIN_JD_CHARS {
        return 0;
    }

    let keywords = jd_keywords(job_description);
    if keywords.is_empty() {
        return 0;
    }

    let resume_tokens = tokenize(resume_text);
    let matches = keywords.intersection(&resume_tokens).count();

    let raw_score = (matches as f64 / keywords.len() as f64) * 100.0;
    // truncation, not rounding
    (raw_score * AMPLIFICATION).min(100.0) as u8
}
