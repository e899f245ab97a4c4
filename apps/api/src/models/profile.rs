use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// A saved candidate profile: the parsed record plus its scores.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub projects: Vec<String>,
    pub relevancy_score: i32,
    pub confidence_scores: Value,
    pub job_description: String,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/save-profile`. Every field is optional on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileSaveRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub education: String,
    pub skills: Vec<String>,
    pub experience: Vec<String>,
    pub projects: Vec<String>,
    pub relevancy_score: i32,
    pub confidence_scores: BTreeMap<String, i32>,
    pub job_description: String,
}

impl ProfileSaveRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !(0..=100).contains(&self.relevancy_score) {
            return Err(format!(
                "relevancy_score must be between 0 and 100, got {}",
                self.relevancy_score
            ));
        }
        if let Some((field, score)) = self
            .confidence_scores
            .iter()
            .find(|(_, score)| !(0..=100).contains(*score))
        {
            return Err(format!(
                "confidence score for '{field}' must be between 0 and 100, got {score}"
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileSaveResponse {
    pub success: bool,
    pub message: String,
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_deserializes_to_defaults() {
        let request: ProfileSaveRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.name, "");
        assert!(request.skills.is_empty());
        assert_eq!(request.relevancy_score, 0);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_parse_response_shape_is_accepted() {
        let request: ProfileSaveRequest = serde_json::from_str(
            r#"{
                "name": "Jane Doe",
                "skills": ["Python", "SQL"],
                "relevancy_score": 37,
                "confidence_scores": {"name": 60, "email": 0},
                "job_description": "Data engineer"
            }"#,
        )
        .unwrap();
        assert_eq!(request.skills, vec!["Python", "SQL"]);
        assert_eq!(request.confidence_scores["name"], 60);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_out_of_range_scores_rejected() {
        let request = ProfileSaveRequest {
            relevancy_score: 140,
            ..Default::default()
        };
        assert!(request.validate().unwrap_err().contains("relevancy_score"));

        let mut request = ProfileSaveRequest::default();
        request.confidence_scores.insert("email".to_string(), -5);
        assert!(request.validate().unwrap_err().contains("'email'"));
    }
}
