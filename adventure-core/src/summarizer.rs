//! History compaction stage.
//!
//! Folds the prior history, the player's action, and the just-generated
//! narrative into a fresh running summary that replaces the history. Runs
//! strictly after generation for the same turn: its contract takes the new
//! narrative as an input.

use crate::inference::{Inference, InferenceError};
use crate::roles::RoleConfig;
use std::sync::Arc;
use thiserror::Error;

/// Errors from the history compaction stage.
#[derive(Debug, Error)]
pub enum CompactionError {
    #[error("Inference failed during compaction: {0}")]
    Inference(#[from] InferenceError),

    #[error("Summarizer returned an empty response")]
    EmptyResponse,
}

/// The history compaction stage.
pub struct Summarizer {
    backend: Arc<dyn Inference>,
    role: RoleConfig,
}

impl Summarizer {
    /// Create a summarizer over the given backend.
    pub fn new(backend: Arc<dyn Inference>) -> Self {
        Self {
            backend,
            role: RoleConfig::summarizer(),
        }
    }

    /// Compact the story so far into an updated running summary.
    ///
    /// `narrative` must be the beat generated for this same turn. The
    /// returned summary replaces the history wholesale; "brief" is a soft
    /// contract carried by the prompt, so callers must not assume a hard
    /// length bound.
    pub async fn compact(
        &self,
        history: &str,
        player_action: &str,
        narrative: &str,
    ) -> Result<String, CompactionError> {
        let prompt = self.build_prompt(history, player_action, narrative);
        let system = self.role.system_prompt();

        tracing::debug!(backend = self.backend.name(), "compacting history");
        let summary = self.backend.complete(&prompt, &system).await?;

        if summary.trim().is_empty() {
            return Err(CompactionError::EmptyResponse);
        }

        Ok(summary)
    }

    fn build_prompt(&self, history: &str, player_action: &str, narrative: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str(
            "Summarize the provided game history, the latest narrative response, \
             and the player action.",
        );
        prompt.push_str(
            "\nFocus on the most important events, character interactions, and outcomes.",
        );
        prompt.push_str("\nThe summary should be brief.");
        prompt.push_str("\n\nFull game history: ");
        prompt.push_str(history);
        prompt.push_str("\nLatest narrative response: ");
        prompt.push_str(narrative);
        prompt.push_str("\nPlayer action: ");
        prompt.push_str(player_action);
        prompt.push_str("\n\nExpected output: ");
        prompt.push_str(self.role.expected_output);

        prompt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedInference;

    #[tokio::test]
    async fn test_compact_returns_summary_verbatim() {
        let backend = Arc::new(ScriptedInference::new().reply("The hero spots a tower."));
        let summarizer = Summarizer::new(backend);

        let summary = summarizer
            .compact("", "look north", "You see a crumbling tower.")
            .await
            .expect("compaction should succeed");

        assert_eq!(summary, "The hero spots a tower.");
    }

    #[tokio::test]
    async fn test_prompt_uses_new_narrative() {
        let backend = Arc::new(ScriptedInference::new().reply("Summary."));
        let summarizer = Summarizer::new(backend.clone());

        summarizer
            .compact(
                "The hero left the village.",
                "strike the guard",
                "You strike the guard.",
            )
            .await
            .expect("compaction should succeed");

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("The hero left the village."));
        assert!(calls[0].prompt.contains("strike the guard"));
        assert!(calls[0].prompt.contains("You strike the guard."));
        assert!(calls[0].system.contains("Narrative Summarizer"));
    }

    #[tokio::test]
    async fn test_empty_summary_is_an_error() {
        let backend = Arc::new(ScriptedInference::new().reply(""));
        let summarizer = Summarizer::new(backend);

        let result = summarizer.compact("history", "wait", "You wait.").await;
        assert!(matches!(result, Err(CompactionError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_backend_failure_is_surfaced() {
        let backend = Arc::new(
            ScriptedInference::new().fail(InferenceError::Backend("connection refused".to_string())),
        );
        let summarizer = Summarizer::new(backend);

        let result = summarizer.compact("history", "wait", "You wait.").await;
        assert!(matches!(result, Err(CompactionError::Inference(_))));
    }
}
