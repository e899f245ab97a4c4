//! Job description generation: a hiring brief goes in, a structured
//! ATS-friendly description comes back from the LLM.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::generation::prompts::{JOB_DESCRIPTION_PROMPT_TEMPLATE, JOB_DESCRIPTION_SYSTEM_TEMPLATE};
use crate::llm_client::prompts::render;
use crate::llm_client::{LlmClient, LlmError};

fn default_industry() -> String {
    "Technology".to_string()
}

fn default_experience_level() -> String {
    "Mid-Level".to_string()
}

fn default_culture() -> String {
    "Corporate".to_string()
}

/// Hiring brief, camelCase on the wire.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRequest {
    pub job_title: String,
    #[serde(default = "default_industry")]
    pub industry: String,
    #[serde(default = "default_experience_level")]
    pub experience_level: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default = "default_culture")]
    pub culture: String,
    #[serde(default)]
    pub special_requirements: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobDescriptionResponse {
    pub success: bool,
    pub description: String,
}

/// Returns `(system, user)` prompts for `request`.
pub fn build_prompts(request: &JobRequest) -> (String, String) {
    let special = request
        .special_requirements
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("None");

    let values = [
        ("title", request.job_title.trim()),
        ("industry", request.industry.trim()),
        ("level", request.experience_level.trim()),
        ("skills", request.skills.trim()),
        ("culture", request.culture.trim()),
        ("special_requirements", special),
    ];

    (
        render(JOB_DESCRIPTION_SYSTEM_TEMPLATE, &values),
        render(JOB_DESCRIPTION_PROMPT_TEMPLATE, &values),
    )
}

/// Generates the description text. Retries are handled by [`LlmClient::call`].
pub async fn generate_job_description(
    llm: &LlmClient,
    request: &JobRequest,
) -> Result<String, LlmError> {
    let (system, prompt) = build_prompts(request);
    info!(
        "Generating job description for '{}' ({})",
        request.job_title.trim(),
        request.experience_level
    );

    let response = llm.call(&prompt, &system).await?;
    let text = response.text().ok_or(LlmError::EmptyContent)?.trim();
    if text.is_empty() {
        return Err(LlmError::EmptyContent);
    }
    Ok(text.to_string())
}
