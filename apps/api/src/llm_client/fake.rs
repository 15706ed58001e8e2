//! Test double for `CompletionService`.
//!
//! Deterministic: the same prompt always yields the same completion. Records every
//! prompt it receives and can be told to fail, or to misbehave, on a given call.

use std::sync::Mutex;

use async_trait::async_trait;

use super::{CompletionService, LlmError};

#[derive(Default)]
pub struct FakeCompletion {
    prompts: Mutex<Vec<String>>,
    fail_on_call: Option<usize>,
    empty_on_call: Option<usize>,
    blank_on_call: Option<usize>,
    fixed_reply: Option<String>,
}

impl FakeCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fails the `n`th call (1-based) with a 503.
    pub fn failing_on(n: usize) -> Self {
        Self {
            fail_on_call: Some(n),
            ..Self::default()
        }
    }

    /// Reports empty content on the `n`th call (1-based).
    pub fn empty_on(n: usize) -> Self {
        Self {
            empty_on_call: Some(n),
            ..Self::default()
        }
    }

    /// Returns `Ok("")` on the `n`th call (1-based), leaving the emptiness check to the caller.
    pub fn blank_on(n: usize) -> Self {
        Self {
            blank_on_call: Some(n),
            ..Self::default()
        }
    }

    /// Returns `reply` for every prompt.
    pub fn replying_with(reply: &str) -> Self {
        Self {
            fixed_reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// The completion this fake returns for `prompt`.
    pub fn completion_for(prompt: &str) -> String {
        let checksum: u64 = prompt.bytes().map(u64::from).sum();
        format!("completion[{}:{checksum}]", prompt.len())
    }
}

#[async_trait]
impl CompletionService for FakeCompletion {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let call = {
            let mut prompts = self.prompts.lock().unwrap();
            prompts.push(prompt.to_string());
            prompts.len()
        };

        if self.fail_on_call == Some(call) {
            return Err(LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        if self.empty_on_call == Some(call) {
            return Err(LlmError::EmptyContent);
        }
        if self.blank_on_call == Some(call) {
            return Ok(String::new());
        }

        Ok(self
            .fixed_reply
            .clone()
            .unwrap_or_else(|| Self::completion_for(prompt)))
    }
}
