//! Axum route handlers for the Jobs API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::{get_job, list_employer_jobs, list_jobs, post_job, NewJob};
use crate::models::{Job, JobType};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct JobSearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub employer_id: String,
    pub title: String,
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default = "default_job_type")]
    pub job_type: JobType,
    #[serde(default)]
    pub salary_range: String,
    pub description: String,
    #[serde(default)]
    pub requirements: Vec<String>,
}

fn default_job_type() -> JobType {
    JobType::FullTime
}

impl From<CreateJobRequest> for NewJob {
    fn from(req: CreateJobRequest) -> Self {
        NewJob {
            title: req.title,
            company: req.company,
            location: req.location,
            job_type: req.job_type,
            salary_range: req.salary_range,
            description: req.description,
            requirements: req.requirements,
        }
    }
}

/// GET /api/v1/jobs?q=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobSearchQuery>,
) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(list_jobs(&state.store, params.q.as_deref()).await?))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let employer_id = req.employer_id.clone();
    let job = post_job(&state.store, &employer_id, req.into()).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(get_job(&state.store, &id).await?))
}

/// GET /api/v1/employers/:id/jobs
pub async fn handle_employer_jobs(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Vec<Job>>, AppError> {
    Ok(Json(list_employer_jobs(&state.store, &id).await?))
}
