//! The apply action and the two views built on its results: employer
//! ranking and candidate status.

pub mod handlers;

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::jobs::get_job;
use crate::matching::MatchEvaluator;
use crate::models::{Application, ApplicationStatus, Role};
use crate::store::Store;
use crate::users::get_user;

/// Scores the candidate's resume against the job and records a new
/// application. Always succeeds once the preconditions hold; a failed
/// evaluation is recorded as the fallback result.
///
/// Repeated calls create independent applications.
pub async fn apply_to_job(
    store: &Store,
    evaluator: &MatchEvaluator,
    job_id: &str,
    candidate_id: &str,
) -> Result<Application, AppError> {
    let candidate = get_user(store, candidate_id).await?;
    let job = get_job(store, job_id).await?;
    if candidate.role == Role::Employer {
        return Err(AppError::Forbidden(
            "Employers cannot apply to jobs.".to_string(),
        ));
    }
    let resume = candidate.resume().ok_or_else(|| {
        AppError::Validation(
            "Please upload your resume in your dashboard before applying.".to_string(),
        )
    })?;

    let match_result = evaluator.evaluate(resume, &job.match_text()).await;

    let application = Application {
        id: format!("app_{}", Uuid::new_v4().simple()),
        job_id: job.id,
        candidate_id: candidate.id.clone(),
        candidate_name: candidate.name.clone(),
        applied_at: Utc::now(),
        status: ApplicationStatus::Pending,
        match_result,
    };
    store.put(&application).await?;

    info!(
        "Candidate {} applied to job {} (score {})",
        application.candidate_id, application.job_id, application.match_result.score
    );
    Ok(application)
}

/// Applicants for a job, best match first. Ties keep submission order.
pub async fn ranked_applicants(store: &Store, job_id: &str) -> Result<Vec<Application>, AppError> {
    get_job(store, job_id).await?;
    let mut applications: Vec<Application> = store
        .get::<Application>()
        .await?
        .into_iter()
        .filter(|a| a.job_id == job_id)
        .collect();
    applications.sort_by(|a, b| b.match_result.score.cmp(&a.match_result.score));
    Ok(applications)
}

/// A candidate's applications, most recent first.
pub async fn candidate_applications(
    store: &Store,
    candidate_id: &str,
) -> Result<Vec<Application>, AppError> {
    get_user(store, candidate_id).await?;
    let mut applications: Vec<Application> = store
        .get::<Application>()
        .await?
        .into_iter()
        .filter(|a| a.candidate_id == candidate_id)
        .collect();
    applications.reverse();
    Ok(applications)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::jobs::seed::seed_demo_data;
    use crate::llm_client::mock::ScriptedBackend;
    use crate::matching::MatchResult;
    use crate::models::User;

    async fn setup(backend: &ScriptedBackend) -> (Store, MatchEvaluator) {
        let store = Store::in_memory();
        seed_demo_data(&store).await.unwrap();
        let mut candidate = get_user(&store, "cand_1").await.unwrap();
        candidate.resume_text = Some("5 years React, TypeScript, AWS".to_string());
        store.put(&candidate).await.unwrap();
        (store, MatchEvaluator::new(Arc::new(backend.clone())))
    }

    async fn add_candidate(store: &Store, id: &str, resume: &str) {
        store
            .put(&User {
                id: id.to_string(),
                name: id.to_string(),
                email: format!("{id}@example.com"),
                role: Role::Candidate,
                resume_text: Some(resume.to_string()),
                resume_file_name: Some("cv.pdf".to_string()),
                skills: None,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_apply_embeds_evaluation_and_persists() {
        let backend = ScriptedBackend::new().reply(
            r#"{"matchScore": 85, "missingSkills": ["Bachelor's degree"], "analysis": "Strong technical match."}"#,
        );
        let (store, evaluator) = setup(&backend).await;

        let application = apply_to_job(&store, &evaluator, "job_1", "cand_1")
            .await
            .unwrap();

        assert_eq!(application.status, ApplicationStatus::Pending);
        assert_eq!(application.candidate_name, "John Doe");
        assert_eq!(application.match_result.score, 85);
        assert_eq!(
            store.find::<Application>(&application.id).await.unwrap(),
            Some(application)
        );

        let prompt = &backend.calls()[0].prompt;
        assert!(prompt.contains("5 years React, TypeScript, AWS"));
        assert!(prompt.contains("Tailwind CSS. 5+ years JavaScript, 3+ years React"));
    }

    #[tokio::test]
    async fn test_apply_succeeds_with_fallback_when_backend_fails() {
        let backend = ScriptedBackend::new().fail(500);
        let (store, evaluator) = setup(&backend).await;

        let application = apply_to_job(&store, &evaluator, "job_1", "cand_1")
            .await
            .unwrap();

        assert_eq!(application.match_result, MatchResult::fallback());
        assert_eq!(store.get::<Application>().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_employers_cannot_apply() {
        let backend = ScriptedBackend::new();
        let (store, evaluator) = setup(&backend).await;
        let err = apply_to_job(&store, &evaluator, "job_1", "emp_1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_apply_requires_resume() {
        let backend = ScriptedBackend::new();
        let (store, evaluator) = setup(&backend).await;
        let mut candidate = get_user(&store, "cand_1").await.unwrap();
        candidate.resume_text = None;
        store.put(&candidate).await.unwrap();

        let err = apply_to_job(&store, &evaluator, "job_1", "cand_1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_apply_to_unknown_job() {
        let backend = ScriptedBackend::new();
        let (store, evaluator) = setup(&backend).await;
        let err = apply_to_job(&store, &evaluator, "job_missing", "cand_1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_unknown_job_is_reported_before_missing_resume() {
        let backend = ScriptedBackend::new();
        let (store, evaluator) = setup(&backend).await;
        let mut candidate = get_user(&store, "cand_1").await.unwrap();
        candidate.resume_text = None;
        store.put(&candidate).await.unwrap();

        let err = apply_to_job(&store, &evaluator, "job_missing", "cand_1")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(backend.call_count(), 0);
    }

    #[tokio::test]
    async fn test_double_apply_creates_two_applications() {
        let backend = ScriptedBackend::new()
            .reply(r#"{"matchScore": 40}"#)
            .reply(r#"{"matchScore": 45}"#);
        let (store, evaluator) = setup(&backend).await;

        let first = apply_to_job(&store, &evaluator, "job_2", "cand_1")
            .await
            .unwrap();
        let second = apply_to_job(&store, &evaluator, "job_2", "cand_1")
            .await
            .unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(backend.call_count(), 2);
        assert_eq!(ranked_applicants(&store, "job_2").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_ranking_orders_by_score_descending() {
        let backend = ScriptedBackend::new()
            .reply(r#"{"matchScore": 30, "missingSkills": [], "analysis": "Weak."}"#)
            .reply(r#"{"matchScore": 90, "missingSkills": [], "analysis": "Great."}"#)
            .reply(r#"{"matchScore": 30, "missingSkills": [], "analysis": "Also weak."}"#);
        let (store, evaluator) = setup(&backend).await;
        add_candidate(&store, "cand_2", "Go, Kubernetes").await;
        add_candidate(&store, "cand_3", "Figma").await;

        apply_to_job(&store, &evaluator, "job_1", "cand_1").await.unwrap();
        apply_to_job(&store, &evaluator, "job_1", "cand_2").await.unwrap();
        apply_to_job(&store, &evaluator, "job_1", "cand_3").await.unwrap();

        let ranked = ranked_applicants(&store, "job_1").await.unwrap();
        let order: Vec<(&str, u32)> = ranked
            .iter()
            .map(|a| (a.candidate_id.as_str(), a.match_result.score))
            .collect();
        assert_eq!(order, vec![("cand_2", 90), ("cand_1", 30), ("cand_3", 30)]);
        assert!(ranked_applicants(&store, "job_3").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_candidate_view_is_most_recent_first() {
        let backend = ScriptedBackend::new()
            .reply(r#"{"matchScore": 10}"#)
            .reply(r#"{"matchScore": 20}"#);
        let (store, evaluator) = setup(&backend).await;

        apply_to_job(&store, &evaluator, "job_1", "cand_1").await.unwrap();
        apply_to_job(&store, &evaluator, "job_3", "cand_1").await.unwrap();

        let mine = candidate_applications(&store, "cand_1").await.unwrap();
        let jobs: Vec<&str> = mine.iter().map(|a| a.job_id.as_str()).collect();
        assert_eq!(jobs, vec!["job_3", "job_1"]);
        assert!(matches!(
            candidate_applications(&store, "cand_missing").await,
            Err(AppError::NotFound(_))
        ));
    }
}
