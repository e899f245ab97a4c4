//! Axum route handlers for job description generation.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::generation::job_description::{
    generate_job_description, JobDescriptionResponse, JobRequest,
};
use crate::state::AppState;

/// POST /api/generate-job
pub async fn handle_generate_job(
    State(state): State<AppState>,
    Json(request): Json<JobRequest>,
) -> Result<Json<JobDescriptionResponse>, AppError> {
    if request.job_title.trim().is_empty() {
        return Err(AppError::Validation("jobTitle cannot be empty".to_string()));
    }

    let llm = state.llm.as_ref().ok_or_else(|| {
        AppError::ServiceUnavailable("Job generation is not configured".to_string())
    })?;

    let description = generate_job_description(llm, &request)
        .await
        .map_err(|e| AppError::Llm(format!("Job description generation failed: {e}")))?;

    Ok(Json(JobDescriptionResponse {
        success: true,
        description,
    }))
}
