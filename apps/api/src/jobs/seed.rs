//! Demo data written on first start so the board is never empty.

use chrono::{Duration, Utc};
use tracing::info;

use crate::models::{Job, JobType, Role, User};
use crate::store::{Store, StoreError};

fn demo_users() -> Vec<User> {
    let user = |id: &str, name: &str, email: &str, role: Role| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role,
        resume_text: None,
        resume_file_name: None,
        skills: None,
    };
    vec![
        user("emp_1", "TechCorp Solutions", "hr@techcorp.example", Role::Employer),
        user("emp_2", "Creative Design Studio", "jobs@creative.example", Role::Employer),
        user("cand_1", "John Doe", "john@example.com", Role::Candidate),
    ]
}

fn demo_jobs() -> Vec<Job> {
    let now = Utc::now();
    let reqs = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    vec![
        Job {
            id: "job_1".to_string(),
            employer_id: "emp_1".to_string(),
            employer_name: "TechCorp Solutions".to_string(),
            title: "Senior React Developer".to_string(),
            company: "TechCorp Solutions".to_string(),
            location: "Remote".to_string(),
            job_type: JobType::FullTime,
            salary_range: "$120k - $150k".to_string(),
            description: "We are looking for a Senior React Developer to join our core product team. \
                You will be building scalable frontend applications using React, TypeScript, and Tailwind CSS."
                .to_string(),
            requirements: reqs(&[
                "5+ years JavaScript",
                "3+ years React",
                "TypeScript expertise",
                "Experience with AWS",
                "Bachelor degree in CS",
            ]),
            posted_at: now - Duration::days(2),
        },
        Job {
            id: "job_2".to_string(),
            employer_id: "emp_1".to_string(),
            employer_name: "TechCorp Solutions".to_string(),
            title: "Backend Engineer (Node.js)".to_string(),
            company: "TechCorp Solutions".to_string(),
            location: "New York, NY".to_string(),
            job_type: JobType::FullTime,
            salary_range: "$130k - $160k".to_string(),
            description: "Join our backend team to build high-performance APIs. \
                You will work with Node.js, Express, and PostgreSQL."
                .to_string(),
            requirements: reqs(&[
                "Node.js",
                "PostgreSQL",
                "Redis",
                "Docker",
                "Microservices architecture",
            ]),
            posted_at: now - Duration::days(5),
        },
        Job {
            id: "job_3".to_string(),
            employer_id: "emp_2".to_string(),
            employer_name: "Creative Design Studio".to_string(),
            title: "UI/UX Designer".to_string(),
            company: "Creative Design Studio".to_string(),
            location: "London, UK".to_string(),
            job_type: JobType::Contract,
            salary_range: "$80/hr".to_string(),
            description: "We need a creative designer to revamp our mobile app interface. \
                Experience with Figma is a must."
                .to_string(),
            requirements: reqs(&[
                "Figma",
                "Adobe Creative Suite",
                "Mobile App Design",
                "Prototyping",
            ]),
            posted_at: now - Duration::days(1),
        },
    ]
}

/// Seeds demo users and jobs into collections that have never been written.
pub async fn seed_demo_data(store: &Store) -> Result<(), StoreError> {
    if store.seed(&demo_users()).await? {
        info!("Seeded demo users");
    }
    if store.seed(&demo_jobs()).await? {
        info!("Seeded demo jobs");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::list_jobs;

    #[tokio::test]
    async fn test_seed_populates_board_newest_first() {
        let store = Store::in_memory();
        seed_demo_data(&store).await.unwrap();

        let jobs = list_jobs(&store, None).await.unwrap();
        let ids: Vec<&str> = jobs.iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["job_3", "job_1", "job_2"]);
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() {
        let store = Store::in_memory();
        seed_demo_data(&store).await.unwrap();
        seed_demo_data(&store).await.unwrap();
        assert_eq!(store.get::<Job>().await.unwrap().len(), 3);
        assert_eq!(store.get::<User>().await.unwrap().len(), 3);
    }

    #[test]
    fn test_demo_jobs_reference_demo_employers() {
        let employers: Vec<String> = demo_users()
            .into_iter()
            .filter(|u| u.role == Role::Employer)
            .map(|u| u.id)
            .collect();
        assert!(demo_jobs().iter().all(|j| employers.contains(&j.employer_id)));
    }
}
