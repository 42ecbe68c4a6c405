//! Narrative generation stage.
//!
//! Given the compacted history, the previous story beat, and the player's
//! action, the narrator asks the inference backend for the next beat and
//! returns it verbatim. The 1-3 sentence constraint lives in the prompt;
//! nothing here validates or truncates the model's output.

use crate::inference::{Inference, InferenceError};
use crate::roles::RoleConfig;
use std::sync::Arc;
use thiserror::Error;

/// Errors from the narrative generation stage.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("Inference failed during narration: {0}")]
    Inference(#[from] InferenceError),

    #[error("Narrator returned an empty response")]
    EmptyResponse,
}

/// The narrative generation stage.
pub struct Narrator {
    backend: Arc<dyn Inference>,
    role: RoleConfig,
}

impl Narrator {
    /// Create a narrator over the given backend.
    pub fn new(backend: Arc<dyn Inference>) -> Self {
        Self {
            backend,
            role: RoleConfig::narrator(),
        }
    }

    /// Generate the next story beat.
    ///
    /// Returns the completion verbatim. An empty or whitespace-only
    /// completion is a `GenerationError::EmptyResponse` rather than silent
    /// empty text.
    pub async fn generate(
        &self,
        history: &str,
        previous_narrative: &str,
        player_action: &str,
    ) -> Result<String, GenerationError> {
        let prompt = self.build_prompt(history, previous_narrative, player_action);
        let system = self.role.system_prompt();

        tracing::debug!(backend = self.backend.name(), "generating narrative");
        let narrative = self.backend.complete(&prompt, &system).await?;

        if narrative.trim().is_empty() {
            return Err(GenerationError::EmptyResponse);
        }

        Ok(narrative)
    }

    fn build_prompt(&self, history: &str, previous_narrative: &str, player_action: &str) -> String {
        let mut prompt = String::new();

        prompt.push_str("Here is what all has happened thus far: ");
        prompt.push_str(history);
        prompt.push_str("\nHere is the latest narrative development: ");
        prompt.push_str(previous_narrative);
        prompt.push_str("\nGenerate a creative narrative response for the player's action: ");
        prompt.push_str(player_action);
        prompt.push_str("\nInclude NPC reactions, environmental details, and consequences.");
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
    async fn test_generate_returns_completion_verbatim() {
        let backend = Arc::new(ScriptedInference::new().reply("You see a crumbling tower."));
        let narrator = Narrator::new(backend);

        let narrative = narrator
            .generate("", "", "look north")
            .await
            .expect("generation should succeed");

        assert_eq!(narrative, "You see a crumbling tower.");
    }

    #[tokio::test]
    async fn test_prompt_contains_all_inputs() {
        let backend = Arc::new(ScriptedInference::new().reply("You trip over a root."));
        let narrator = Narrator::new(backend.clone());

        narrator
            .generate("The hero entered the forest.", "An owl hoots.", "run east")
            .await
            .expect("generation should succeed");

        let calls = backend.calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].prompt.contains("The hero entered the forest."));
        assert!(calls[0].prompt.contains("An owl hoots."));
        assert!(calls[0].prompt.contains("run east"));
        assert!(calls[0].system.contains("Game Master"));
    }

    #[tokio::test]
    async fn test_empty_completion_is_an_error() {
        let backend = Arc::new(ScriptedInference::new().reply("   \n"));
        let narrator = Narrator::new(backend);

        let result = narrator.generate("", "", "wait").await;
        assert!(matches!(result, Err(GenerationError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_backend_failure_is_surfaced() {
        let backend = Arc::new(
            ScriptedInference::new().fail(InferenceError::Backend("timed out".to_string())),
        );
        let narrator = Narrator::new(backend);

        let result = narrator.generate("", "", "look north").await;
        assert!(matches!(result, Err(GenerationError::Inference(_))));
    }
}
