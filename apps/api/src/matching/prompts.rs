// All LLM prompt constants for the Matching module.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::{json, Value};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;

/// Resume text is cut to this many characters before it is sent.
pub const MAX_RESUME_CHARS: usize = 10_000;
/// Job text is cut to this many characters before it is sent.
pub const MAX_JOB_CHARS: usize = 5_000;

/// System instruction for resume-to-job matching.
pub fn match_system() -> String {
    format!("Act as an expert Technical Recruiter. {JSON_ONLY_SYSTEM}")
}

/// Builds the matching prompt. Both inputs must already be truncated.
pub fn build_match_prompt(resume_text: &str, job_text: &str) -> String {
    format!(
        r#"Analyze the following Resume text against the Job Description.

Resume:
"{resume_text}"

Job Description:
"{job_text}"

Provide:
1. A match score from 0 to 100 based on skills, experience, and relevance.
2. A list of key missing skills/qualifications.
3. A brief 1-2 sentence summary explaining the score."#
    )
}

/// Output schema declared to the backend. All three fields are required.
pub fn match_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "matchScore": { "type": "NUMBER" },
            "missingSkills": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            },
            "analysis": { "type": "STRING" }
        },
        "required": ["matchScore", "missingSkills", "analysis"]
    })
}
