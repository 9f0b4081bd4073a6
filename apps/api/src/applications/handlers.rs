//! Axum route handlers for the Applications API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::applications::{apply_to_job, candidate_applications, ranked_applicants};
use crate::errors::AppError;
use crate::models::Application;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub candidate_id: String,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub application: Application,
    /// False when scoring failed and the fallback result was recorded.
    pub analysis_available: bool,
}

/// POST /api/v1/jobs/:id/apply
///
/// Runs the match evaluation and records the application. Scoring failures
/// never fail the request.
pub async fn handle_apply(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
    Json(req): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplyResponse>), AppError> {
    let application =
        apply_to_job(&state.store, &state.evaluator, &job_id, &req.candidate_id).await?;
    let analysis_available = !application.match_result.is_fallback();
    Ok((
        StatusCode::CREATED,
        Json(ApplyResponse {
            application,
            analysis_available,
        }),
    ))
}

/// GET /api/v1/jobs/:id/applications
pub async fn handle_job_applications(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Vec<Application>>, AppError> {
    Ok(Json(ranked_applicants(&state.store, &job_id).await?))
}

/// GET /api/v1/users/:id/applications
pub async fn handle_candidate_applications(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
) -> Result<Json<Vec<Application>>, AppError> {
    Ok(Json(candidate_applications(&state.store, &candidate_id).await?))
}
