//! Axum route handlers for the Users API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::llm_client::prompts::truncate_chars;
use crate::models::{Role, User};
use crate::state::AppState;
use crate::users::{attach_resume, get_user, register_user, ResumeUpload};

const RESUME_FIELD: &str = "resume";
const PREVIEW_CHARS: usize = 300;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct ResumeUploadResponse {
    pub user_id: String,
    pub resume_file_name: Option<String>,
    pub resume_chars: usize,
    pub preview: String,
}

impl From<&User> for ResumeUploadResponse {
    fn from(user: &User) -> Self {
        let text = user.resume().unwrap_or_default();
        Self {
            user_id: user.id.clone(),
            resume_file_name: user.resume_file_name.clone(),
            resume_chars: text.chars().count(),
            preview: truncate_chars(text, PREVIEW_CHARS).to_string(),
        }
    }
}

/// POST /api/v1/users
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = register_user(&state.store, &req.name, &req.email, req.role).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/:id
pub async fn handle_get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<User>, AppError> {
    Ok(Json(get_user(&state.store, &id).await?))
}

/// POST /api/v1/users/:id/resume
///
/// Multipart upload with the PDF in the `resume` field.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let mut upload = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or("resume.pdf").to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        upload = Some(ResumeUpload {
            file_name,
            content_type,
            data,
        });
        break;
    }

    let upload = upload.ok_or_else(|| {
        AppError::Validation(format!("multipart field '{RESUME_FIELD}' is required"))
    })?;

    let user = attach_resume(&state.store, state.extractor.as_ref(), &id, upload).await?;
    Ok(Json(ResumeUploadResponse::from(&user)))
}
