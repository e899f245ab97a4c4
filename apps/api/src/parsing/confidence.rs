//! Per-field confidence scoring.
//!
//! A field's score follows from where its value came from. Empty fields score
//! 0 and an email without `@` is pinned to the invalid-email value.

use serde::{Deserialize, Serialize};

use crate::parsing::models::{ConfidenceMap, FieldSource, Provenance, ResumeField, ResumeRecord};

/// Per-source trust values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceWeights {
    pub vision: u8,
    /// Ceiling for rule-based values backfilled into a vision result.
    pub backfill_cap: u8,
    pub rule_based: u8,
    pub regex: u8,
    /// Forced score for a non-empty email without an `@`.
    pub invalid_email: u8,
}

impl Default for ConfidenceWeights {
    fn default() -> Self {
        Self {
            vision: 95,
            backfill_cap: 80,
            rule_based: 60,
            regex: 50,
            invalid_email: 40,
        }
    }
}

/// Scores every field of `record` from the path that produced it.
///
/// Precedence: empty → 0, malformed email → `invalid_email`, then by source.
/// Fields missing from `provenance` are treated as rule-based.
pub fn score_fields(
    record: &ResumeRecord,
    provenance: &Provenance,
    weights: &ConfidenceWeights,
) -> ConfidenceMap {
    let scores = ResumeField::ALL
        .iter()
        .map(|&field| {
            let score = if record.is_field_empty(field) {
                0
            } else if field == ResumeField::Email && !record.email.contains('@') {
                weights.invalid_email
            } else {
                let source = provenance
                    .get(&field)
                    .copied()
                    .unwrap_or(FieldSource::RuleBased);
                source_score(source, weights)
            };
            (field, score.min(100))
        })
        .collect();

    ConfidenceMap(scores)
}

fn source_score(source: FieldSource, weights: &ConfidenceWeights) -> u8 {
    match source {
        FieldSource::Vision => weights.vision,
        FieldSource::Backfill => weights.backfill_cap.min(weights.vision),
        FieldSource::RuleBased => weights.rule_based,
        FieldSource::Regex => weights.regex,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::models::uniform_provenance;

    fn populated_record() -> ResumeRecord {
        ResumeRecord {
            name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "+1 415-555-0100".to_string(),
            education: "BSc".to_string(),
            skills: vec!["Rust".to_string()],
            experience: vec!["Engineer at Acme Inc.".to_string()],
            projects: vec!["Parser".to_string()],
        }
    }

    #[test]
    fn test_empty_fields_score_zero() {
        let record = ResumeRecord {
            name: String::new(),
            ..Default::default()
        };
        let scores = score_fields(
            &record,
            &uniform_provenance(FieldSource::Vision),
            &ConfidenceWeights::default(),
        );
        for field in ResumeField::ALL {
            assert_eq!(scores.get(field), 0, "{field:?}");
        }
    }

    #[test]
    fn test_vision_fields_score_95() {
        let scores = score_fields(
            &populated_record(),
            &uniform_provenance(FieldSource::Vision),
            &ConfidenceWeights::default(),
        );
        for field in ResumeField::ALL {
            assert_eq!(scores.get(field), 95);
        }
    }

    #[test]
    fn test_backfilled_fields_capped_at_80() {
        let mut provenance = uniform_provenance(FieldSource::Vision);
        provenance.insert(ResumeField::Skills, FieldSource::Backfill);
        let scores = score_fields(
            &populated_record(),
            &provenance,
            &ConfidenceWeights::default(),
        );
        assert_eq!(scores.get(ResumeField::Skills), 80);
        assert_eq!(scores.get(ResumeField::Name), 95);
    }

    #[test]
    fn test_rule_based_and_regex_flat_values() {
        let weights = ConfidenceWeights::default();
        let record = populated_record();
        let rule = score_fields(
            &record,
            &uniform_provenance(FieldSource::RuleBased),
            &weights,
        );
        let regex = score_fields(&record, &uniform_provenance(FieldSource::Regex), &weights);
        for field in ResumeField::ALL {
            assert_eq!(rule.get(field), 60);
            assert_eq!(regex.get(field), 50);
        }
    }

    #[test]
    fn test_email_without_at_forced_to_40() {
        let record = ResumeRecord {
            email: "not-an-email".to_string(),
            ..populated_record()
        };
        for source in [FieldSource::Vision, FieldSource::RuleBased, FieldSource::Regex] {
            let scores = score_fields(
                &record,
                &uniform_provenance(source),
                &ConfidenceWeights::default(),
            );
            assert_eq!(scores.get(ResumeField::Email), 40);
        }
    }

    #[test]
    fn test_custom_weights_are_honoured() {
        let weights = ConfidenceWeights {
            rule_based: 55,
            ..Default::default()
        };
        let scores = score_fields(
            &populated_record(),
            &uniform_provenance(FieldSource::RuleBased),
            &weights,
        );
        assert_eq!(scores.get(ResumeField::Projects), 55);
    }

    #[test]
    fn test_map_always_has_all_keys() {
        let scores = score_fields(
            &ResumeRecord::default(),
            &Provenance::new(),
            &ConfidenceWeights::default(),
        );
        assert_eq!(scores.0.len(), 7);
    }
}
