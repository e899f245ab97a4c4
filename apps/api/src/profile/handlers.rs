use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::models::profile::{ProfileSaveRequest, ProfileSaveResponse};
use crate::profile::store::insert_profile;
use crate::state::AppState;

/// POST /api/save-profile
pub async fn handle_save_profile(
    State(state): State<AppState>,
    Json(request): Json<ProfileSaveRequest>,
) -> Result<Json<ProfileSaveResponse>, AppError> {
    request.validate().map_err(AppError::Validation)?;

    let db = state
        .db
        .as_ref()
        .ok_or_else(|| AppError::ServiceUnavailable("Database not connected".to_string()))?;

    let row = insert_profile(db, &request).await?;
    info!("Saved profile {} ({} skills)", row.id, row.skills.len());

    Ok(Json(ProfileSaveResponse {
        success: true,
        message: "Profile saved to database".to_string(),
        id: row.id,
        created_at: row.created_at,
    }))
}
