//! Match Evaluator: scores a candidate's resume against a job via the LLM backend.
//!
//! `evaluate` never returns an error. Two degradation levels exist and must
//! stay distinct:
//! - total failure (transport, service or decode error) yields the fixed
//!   fallback result so the UI can tell a broken evaluation from a low score;
//! - a decodable payload with missing fields gets neutral per-field defaults.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, warn};

use crate::llm_client::prompts::truncate_chars;
use crate::llm_client::{strip_json_fences, LlmBackend, LlmError, PromptSpec, MODEL};
use crate::matching::prompts::{
    build_match_prompt, match_response_schema, match_system, MAX_JOB_CHARS, MAX_RESUME_CHARS,
};

pub const FALLBACK_SKILL: &str = "Error analyzing resume";
pub const FALLBACK_ANALYSIS: &str = "Service temporarily unavailable.";
pub const DEFAULT_ANALYSIS: &str = "Could not analyze.";

const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 100.0;

/// The two texts being compared. Truncation happens when the prompt is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchRequest {
    resume_text: String,
    job_text: String,
}

impl MatchRequest {
    pub fn new(resume_text: impl Into<String>, job_text: impl Into<String>) -> Self {
        Self {
            resume_text: resume_text.into(),
            job_text: job_text.into(),
        }
    }

    /// The part of the resume that is transmitted.
    pub fn resume_excerpt(&self) -> &str {
        truncate_chars(&self.resume_text, MAX_RESUME_CHARS)
    }

    /// The part of the job text that is transmitted.
    pub fn job_excerpt(&self) -> &str {
        truncate_chars(&self.job_text, MAX_JOB_CHARS)
    }

    pub fn prompt_spec(&self) -> PromptSpec {
        PromptSpec {
            model: MODEL.to_string(),
            system: Some(match_system()),
            prompt: build_match_prompt(self.resume_excerpt(), self.job_excerpt()),
            response_schema: match_response_schema(),
        }
    }
}

/// Validated outcome of one evaluation. Every field is always populated and
/// `score` is always within 0..=100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub score: u32,
    pub missing_skills: Vec<String>,
    pub analysis: String,
}

impl MatchResult {
    /// Sentinel returned when the backend call fails outright.
    pub fn fallback() -> Self {
        Self {
            score: 0,
            missing_skills: vec![FALLBACK_SKILL.to_string()],
            analysis: FALLBACK_ANALYSIS.to_string(),
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}

/// Wire shape of the backend's answer. Every field may be absent; a field of
/// the wrong type is a decode failure.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchPayload {
    match_score: Option<f64>,
    missing_skills: Option<Vec<String>>,
    analysis: Option<String>,
}

impl MatchPayload {
    fn into_result(self) -> MatchResult {
        let score = self.match_score.map(normalize_score).unwrap_or(0);

        let missing_skills = self
            .missing_skills
            .unwrap_or_default()
            .into_iter()
            .map(|skill| skill.trim().to_string())
            .filter(|skill| !skill.is_empty())
            .collect();

        let analysis = self
            .analysis
            .filter(|a| !a.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ANALYSIS.to_string());

        MatchResult {
            score,
            missing_skills,
            analysis,
        }
    }
}

/// Rounds to the nearest integer and clamps into 0..=100.
fn normalize_score(raw: f64) -> u32 {
    if !(MIN_SCORE..=MAX_SCORE).contains(&raw) {
        warn!("LLM returned out-of-range match score {raw}; clamping");
    }
    raw.round().clamp(MIN_SCORE, MAX_SCORE) as u32
}

/// A blank payload decodes as an empty object, so it gets per-field defaults.
fn decode_payload(raw: &str) -> Result<MatchPayload, LlmError> {
    let text = strip_json_fences(raw);
    if text.is_empty() {
        return Ok(MatchPayload::default());
    }
    serde_json::from_str(text).map_err(LlmError::Parse)
}

/// Stateless evaluator; cheap to clone, shares the backend.
#[derive(Clone)]
pub struct MatchEvaluator {
    backend: Arc<dyn LlmBackend>,
}

impl MatchEvaluator {
    pub fn new(backend: Arc<dyn LlmBackend>) -> Self {
        Self { backend }
    }

    /// Scores `resume_text` against `job_text`. Makes exactly one backend call
    /// and never caches.
    pub async fn evaluate(&self, resume_text: &str, job_text: &str) -> MatchResult {
        let request = MatchRequest::new(resume_text, job_text);
        match self.try_evaluate(&request).await {
            Ok(result) => {
                info!(
                    "Match evaluated: score={}, missing_skills={}",
                    result.score,
                    result.missing_skills.len()
                );
                result
            }
            Err(e) => {
                error!("Match analysis failed: {e}");
                MatchResult::fallback()
            }
        }
    }

    async fn try_evaluate(&self, request: &MatchRequest) -> Result<MatchResult, LlmError> {
        let spec = request.prompt_spec();
        debug!("Requesting match analysis ({} prompt chars)", spec.prompt.len());
        let raw = self.backend.generate(&spec).await?;
        let payload = decode_payload(&raw)?;
        Ok(payload.into_result())
    }
}
