//! Job postings: the public board and employer-owned listings.

pub mod handlers;
pub mod seed;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{Job, JobType, Role, User};
use crate::store::Store;

/// Fields an employer supplies when posting a job.
#[derive(Debug, Clone)]
pub struct NewJob {
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub salary_range: String,
    pub description: String,
    pub requirements: Vec<String>,
}

pub async fn post_job(store: &Store, employer_id: &str, new_job: NewJob) -> Result<Job, AppError> {
    let employer = store
        .find::<User>(employer_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {employer_id} not found")))?;
    if employer.role != Role::Employer {
        return Err(AppError::Forbidden(
            "Only employers can post jobs.".to_string(),
        ));
    }

    for (field, value) in [
        ("title", &new_job.title),
        ("company", &new_job.company),
        ("description", &new_job.description),
    ] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{field} cannot be empty")));
        }
    }

    let job = Job {
        id: format!("job_{}", Uuid::new_v4().simple()),
        employer_id: employer.id,
        employer_name: employer.name,
        title: new_job.title.trim().to_string(),
        company: new_job.company.trim().to_string(),
        location: new_job.location.trim().to_string(),
        job_type: new_job.job_type,
        salary_range: new_job.salary_range.trim().to_string(),
        description: new_job.description,
        requirements: new_job
            .requirements
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect(),
        posted_at: Utc::now(),
    };
    store.put(&job).await?;
    info!("Employer {} posted job {}", job.employer_id, job.id);
    Ok(job)
}

pub async fn get_job(store: &Store, job_id: &str) -> Result<Job, AppError> {
    store
        .find::<Job>(job_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Job {job_id} not found")))
}

/// Newest first, optionally filtered by title or company.
pub async fn list_jobs(store: &Store, query: Option<&str>) -> Result<Vec<Job>, AppError> {
    let query = query.map(str::trim).filter(|q| !q.is_empty());
    let mut jobs: Vec<Job> = store
        .get::<Job>()
        .await?
        .into_iter()
        .filter(|job| query.map_or(true, |q| job.matches_query(q)))
        .collect();
    jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
    Ok(jobs)
}

pub async fn list_employer_jobs(store: &Store, employer_id: &str) -> Result<Vec<Job>, AppError> {
    let mut jobs: Vec<Job> = store
        .get::<Job>()
        .await?
        .into_iter()
        .filter(|job| job.employer_id == employer_id)
        .collect();
    jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at));
    Ok(jobs)
}
