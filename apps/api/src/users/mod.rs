//! Candidate and employer profiles, including resume upload.

pub mod handlers;

use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{is_pdf, DocumentExtractor, ExtractionError};
use crate::models::{Role, User};
use crate::store::Store;

/// A file received from the upload form.
pub struct ResumeUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub data: Bytes,
}

pub async fn register_user(
    store: &Store,
    name: &str,
    email: &str,
    role: Role,
) -> Result<User, AppError> {
    let name = name.trim();
    let email = email.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name cannot be empty".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation(format!("'{email}' is not a valid email")));
    }

    let user = User {
        id: format!("{}_{}", role.as_str(), Uuid::new_v4().simple()),
        name: name.to_string(),
        email: email.to_string(),
        role,
        resume_text: None,
        resume_file_name: None,
        skills: None,
    };
    store.put(&user).await?;
    info!("Registered {} {}", role.as_str(), user.id);
    Ok(user)
}

pub async fn get_user(store: &Store, user_id: &str) -> Result<User, AppError> {
    store
        .find::<User>(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {user_id} not found")))
}

/// Extracts the uploaded resume and replaces the user's stored resume text.
/// The profile is left untouched if extraction fails.
pub async fn attach_resume(
    store: &Store,
    extractor: &dyn DocumentExtractor,
    user_id: &str,
    upload: ResumeUpload,
) -> Result<User, AppError> {
    let mut user = get_user(store, user_id).await?;

    if !is_pdf(upload.content_type.as_deref(), &upload.data) {
        return Err(ExtractionError::NotPdf.into());
    }

    let text = extractor.extract(upload.data).await?;

    user.resume_text = Some(text);
    user.resume_file_name = Some(upload.file_name);
    store.put(&user).await?;

    info!("Stored resume for user {}", user.id);
    Ok(user)
}
