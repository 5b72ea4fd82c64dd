//! In-process backend for tests. Records every call and answers with
//! numbered canned text.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::llm::{GenerationBackend, GenerationError};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub prompt: String,
}

#[derive(Default)]
pub struct ScriptedBackend {
    calls: Mutex<Vec<RecordedCall>>,
    fail_on_call: Option<usize>,
    delay: Option<Duration>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the n-th call (0-based) with an API error
    pub fn failing_on(call: usize) -> Self {
        Self {
            fail_on_call: Some(call),
            ..Self::default()
        }
    }

    /// Sleep before every answer
    pub fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn answer(index: usize) -> String {
        format!("output {}", index + 1)
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, system: &str, prompt: &str) -> Result<String, GenerationError> {
        let index = {
            let mut calls = self.calls.lock().unwrap();
            calls.push(RecordedCall {
                system: system.to_string(),
                prompt: prompt.to_string(),
            });
            calls.len() - 1
        };

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.fail_on_call == Some(index) {
            return Err(GenerationError::Api {
                status: 500,
                body: "scripted failure".to_string(),
            });
        }

        Ok(Self::answer(index))
    }
}
