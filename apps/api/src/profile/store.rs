use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::profile::{ProfileRow, ProfileSaveRequest};

/// Inserts a profile into `resumes` and returns the stored row.
pub async fn insert_profile(
    pool: &PgPool,
    profile: &ProfileSaveRequest,
) -> Result<ProfileRow, sqlx::Error> {
    sqlx::query_as::<_, ProfileRow>(
        r#"
        INSERT INTO resumes (
            id, name, email, phone, education, skills, experience, projects,
            relevancy_score, confidence_scores, job_description
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&profile.name)
    .bind(&profile.email)
    .bind(&profile.phone)
    .bind(&profile.education)
    .bind(&profile.skills)
    .bind(&profile.experience)
    .bind(&profile.projects)
    .bind(profile.relevancy_score)
    .bind(Json(&profile.confidence_scores))
    .bind(&profile.job_description)
    .fetch_one(pool)
    .await
}
