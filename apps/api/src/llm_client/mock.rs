//! Scripted `LlmBackend` for tests.
//!
//! Replies are consumed in order; every received `PromptSpec` is recorded so
//! tests can assert on what would have gone over the wire.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{LlmBackend, LlmError, PromptSpec};

#[derive(Clone, Default)]
pub struct ScriptedBackend {
    replies: Arc<Mutex<VecDeque<Result<String, LlmError>>>>,
    calls: Arc<Mutex<Vec<PromptSpec>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a raw text payload.
    pub fn reply(self, payload: impl Into<String>) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(payload.into()));
        self
    }

    /// Queues a service failure with the given HTTP status.
    pub fn fail(self, status: u16) -> Self {
        self.replies.lock().unwrap().push_back(Err(LlmError::Api {
            status,
            message: "scripted failure".to_string(),
        }));
        self
    }

    pub fn calls(&self) -> Vec<PromptSpec> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn generate(&self, spec: &PromptSpec) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(spec.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::Api {
                    status: 503,
                    message: "no scripted reply left".to_string(),
                })
            })
    }
}
