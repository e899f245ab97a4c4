use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::gap::analysis::{analyze_gap, GapAnalysisRequest, GapReport};
use crate::state::AppState;

/// POST /api/analyze-gap
///
/// Needs a job description or an explicit `required_skills` list.
pub async fn handle_analyze_gap(
    State(state): State<AppState>,
    Json(request): Json<GapAnalysisRequest>,
) -> Result<Json<GapReport>, AppError> {
    if request.has_no_requirements() {
        return Err(AppError::Validation(
            "job_description or required_skills must be provided".to_string(),
        ));
    }

    Ok(Json(analyze_gap(&request, state.taxonomy.as_ref())))
}
