use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub employer_id: String,
    pub employer_name: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub job_type: JobType,
    pub salary_range: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub posted_at: DateTime<Utc>,
}

impl Job {
    /// Description followed by the comma-joined requirement list; the text a
    /// resume is compared against.
    pub fn match_text(&self) -> String {
        format!("{} {}", self.description, self.requirements.join(", "))
    }

    /// Case-insensitive match on title or company.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query) || self.company.to_lowercase().contains(&query)
    }
}

impl Record for Job {
    const COLLECTION: &'static str = "jobs";

    fn id(&self) -> &str {
        &self.id
    }
}
