//! Last-resort extraction for text the section parser could make nothing of.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parsing::models::{ResumeRecord, DEFAULT_CANDIDATE_NAME};

/// Sentinel skill asking a human to review the record.
pub const MANUAL_REVIEW_SKILL: &str = "Manual Verification Needed";

static LOOSE_EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\w.\-]+@[\w.\-]+").expect("valid email regex"));

static LOOSE_PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\+\d{1,3}[\- ]?)?\d{10}").expect("valid phone regex"));

/// Single-pass name/email/phone extraction. Never fails.
pub fn regex_fallback(text: &str) -> ResumeRecord {
    let name = text
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .unwrap_or(DEFAULT_CANDIDATE_NAME)
        .to_string();

    ResumeRecord {
        name,
        email: LOOSE_EMAIL_RE
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        phone: LOOSE_PHONE_RE
            .find(text)
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        skills: vec![MANUAL_REVIEW_SKILL.to_string()],
        ..ResumeRecord::default()
    }
}
