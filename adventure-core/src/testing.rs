//! Testing utilities for the adventure pipeline.
//!
//! `ScriptedInference` stands in for a real backend in deterministic tests:
//! it returns queued replies (or failures) in order and records every prompt
//! it was asked to complete, so tests can assert both outcomes and prompt
//! construction.

use crate::inference::{Inference, InferenceError};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// One recorded call to the scripted backend.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    /// The prompt the stage built.
    pub prompt: String,

    /// The system prompt the stage sent.
    pub system: String,
}

/// A backend that returns scripted completions.
///
/// Replies are consumed in queue order. Once the script is exhausted, calls
/// fail with a backend error rather than inventing text.
#[derive(Default)]
pub struct ScriptedInference {
    script: Mutex<VecDeque<Result<String, InferenceError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedInference {
    /// Create a backend with an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion.
    pub fn reply(self, text: impl Into<String>) -> Self {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(Ok(text.into()));
        self
    }

    /// Queue a failure.
    pub fn fail(self, error: InferenceError) -> Self {
        self.script
            .lock()
            .expect("script lock poisoned")
            .push_back(Err(error));
        self
    }

    /// All calls made so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock poisoned").clone()
    }

    /// How many completions were requested.
    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("calls lock poisoned").len()
    }
}

#[async_trait]
impl Inference for ScriptedInference {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, InferenceError> {
        self.calls
            .lock()
            .expect("calls lock poisoned")
            .push(RecordedCall {
                prompt: prompt.to_string(),
                system: system.to_string(),
            });

        self.script
            .lock()
            .expect("script lock poisoned")
            .pop_front()
            .unwrap_or_else(|| {
                Err(InferenceError::Backend(
                    "scripted backend has no more replies".to_string(),
                ))
            })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order() {
        let backend = ScriptedInference::new().reply("first").reply("second");

        assert_eq!(backend.complete("a", "s").await.unwrap(), "first");
        assert_eq!(backend.complete("b", "s").await.unwrap(), "second");
        assert_eq!(backend.call_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_script_fails() {
        let backend = ScriptedInference::new().reply("only");

        backend.complete("a", "s").await.unwrap();
        let result = backend.complete("b", "s").await;
        assert!(matches!(result, Err(InferenceError::Backend(_))));
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let backend = ScriptedInference::new().reply("ok");

        backend.complete("the prompt", "the system").await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt, "the prompt");
        assert_eq!(calls[0].system, "the system");
    }
}
