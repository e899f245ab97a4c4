//! Canonical resume shapes shared by every extraction strategy.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

pub const DEFAULT_CANDIDATE_NAME: &str = "Candidate";

/// The structured candidate record returned by the parsing pipeline.
///
/// Every field is always serialized. A field that could not be extracted is an
/// empty string or an empty list, never omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub projects: Vec<String>,
}

impl Default for ResumeRecord {
    fn default() -> Self {
        Self {
            name: DEFAULT_CANDIDATE_NAME.to_string(),
            email: String::new(),
            phone: String::new(),
            education: String::new(),
            skills: Vec::new(),
            experience: Vec::new(),
            projects: Vec::new(),
        }
    }
}

impl ResumeRecord {
    /// True when `field` holds no usable value. The placeholder name counts as empty.
    pub fn is_field_empty(&self, field: ResumeField) -> bool {
        match field {
            ResumeField::Name => {
                self.name.trim().is_empty() || self.name.trim() == DEFAULT_CANDIDATE_NAME
            }
            ResumeField::Email => self.email.trim().is_empty(),
            ResumeField::Phone => self.phone.trim().is_empty(),
            ResumeField::Education => self.education.trim().is_empty(),
            ResumeField::Skills => self.skills.is_empty(),
            ResumeField::Experience => self.experience.is_empty(),
            ResumeField::Projects => self.projects.is_empty(),
        }
    }

    /// True when no field carries a usable value.
    pub fn is_blank(&self) -> bool {
        ResumeField::ALL.iter().all(|f| self.is_field_empty(*f))
    }
}

/// Drops case-insensitive duplicates, keeping the first spelling and order.
pub fn dedupe_case_insensitive<I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}

/// Field keys of [`ResumeRecord`], in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResumeField {
    Name,
    Email,
    Phone,
    Education,
    Skills,
    Experience,
    Projects,
}

impl ResumeField {
    pub const ALL: [ResumeField; 7] = [
        ResumeField::Name,
        ResumeField::Email,
        ResumeField::Phone,
        ResumeField::Education,
        ResumeField::Skills,
        ResumeField::Experience,
        ResumeField::Projects,
    ];

    /// Fields that may be backfilled from the rule-based parser after vision extraction.
    pub const BACKFILLABLE: [ResumeField; 3] = [
        ResumeField::Skills,
        ResumeField::Experience,
        ResumeField::Education,
    ];
}

/// Which extraction path produced a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSource {
    Vision,
    /// Filled from the rule-based parser into an otherwise vision-sourced record.
    Backfill,
    RuleBased,
    Regex,
}

/// Per-field provenance of a merged record.
pub type Provenance = BTreeMap<ResumeField, FieldSource>;

/// Builds a provenance map attributing every field to `source`.
pub fn uniform_provenance(source: FieldSource) -> Provenance {
    ResumeField::ALL.iter().map(|f| (*f, source)).collect()
}

/// Per-field extraction trust, 0 – 100. Always carries all seven keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfidenceMap(pub BTreeMap<ResumeField, u8>);

impl ConfidenceMap {
    pub fn get(&self, field: ResumeField) -> u8 {
        self.0.get(&field).copied().unwrap_or(0)
    }
}

/// Final result of a parse request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResponse {
    pub extracted_data: ResumeRecord,
    pub confidence_scores: ConfidenceMap,
    pub relevancy_score: u8,
    /// Diagnostic only: the leading text the relevancy score was computed from.
    pub raw_text_snippet: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record_serializes_every_field() {
        let value = serde_json::to_value(ResumeRecord::default()).unwrap();
        let obj = value.as_object().unwrap();
        for key in [
            "name",
            "email",
            "phone",
            "education",
            "skills",
            "experience",
            "projects",
        ] {
            assert!(obj.contains_key(key), "missing key {key}");
        }
        assert_eq!(obj["name"], "Candidate");
        assert_eq!(obj["skills"], serde_json::json!([]));
    }

    #[test]
    fn test_default_record_is_blank() {
        assert!(ResumeRecord::default().is_blank());
    }

    #[test]
    fn test_record_with_email_is_not_blank() {
        let record = ResumeRecord {
            email: "a@b.io".to_string(),
            ..Default::default()
        };
        assert!(!record.is_blank());
    }

    #[test]
    fn test_placeholder_name_counts_as_empty() {
        let record = ResumeRecord::default();
        assert!(record.is_field_empty(ResumeField::Name));
        let named = ResumeRecord {
            name: "Jane Doe".to_string(),
            ..Default::default()
        };
        assert!(!named.is_field_empty(ResumeField::Name));
    }

    #[test]
    fn test_dedupe_keeps_first_casing() {
        let items = ["Rust", "rust", "SQL", "RUST", "sql", "Go"]
            .into_iter()
            .map(String::from);
        assert_eq!(dedupe_case_insensitive(items), vec!["Rust", "SQL", "Go"]);
    }

    #[test]
    fn test_confidence_map_serializes_snake_case_keys() {
        let mut map = ConfidenceMap::default();
        map.0.insert(ResumeField::Experience, 60);
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"experience":60}"#);
    }
}
