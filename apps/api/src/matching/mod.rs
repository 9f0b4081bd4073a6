//! Resume-to-job matching: prompt construction, schema enforcement and the
//! fallback policy around the LLM call.

pub mod evaluator;
pub mod prompts;

pub use evaluator::{MatchEvaluator, MatchResult};
