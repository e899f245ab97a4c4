use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;

use crate::errors::AppError;
use crate::parsing::models::ParseResponse;
use crate::parsing::{ParseError, ResumeUpload};
use crate::state::AppState;

const FILE_FIELD: &str = "file";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// POST /api/parse-resume
///
/// Multipart form: `file` (required) and `job_description` (optional text).
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ParseResponse>, AppError> {
    let upload = read_upload(multipart).await?;
    let response = state.parser.parse(upload).await?;
    Ok(Json(response))
}

async fn read_upload(mut multipart: Multipart) -> Result<ResumeUpload, ParseError> {
    let mut file: Option<(Bytes, String, Option<String>)> = None;
    let mut job_description: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(invalid_body)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(invalid_body)?;
                file = Some((bytes, filename, content_type));
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                job_description = Some(field.text().await.map_err(invalid_body)?);
            }
            _ => {}
        }
    }

    let (bytes, filename, content_type) = file
        .ok_or_else(|| ParseError::Validation(format!("missing '{FILE_FIELD}' field")))?;

    Ok(ResumeUpload {
        bytes,
        filename,
        content_type,
        job_description,
    })
}

fn invalid_body(e: MultipartError) -> ParseError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ParseError::TooLarge(e.body_text())
    } else {
        ParseError::Validation(format!("unreadable multipart body: {}", e.body_text()))
    }
}
