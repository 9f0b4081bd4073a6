use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::matching::MatchResult;
use crate::store::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    #[default]
    Pending,
    Reviewed,
    Rejected,
    Accepted,
}

/// A candidate's application to a job. The embedded match result is fixed at
/// creation and never recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: String,
    pub job_id: String,
    pub candidate_id: String,
    pub candidate_name: String,
    pub applied_at: DateTime<Utc>,
    pub status: ApplicationStatus,
    pub match_result: MatchResult,
}

impl Record for Application {
    const COLLECTION: &'static str = "applications";

    fn id(&self) -> &str {
        &self.id
    }
}
