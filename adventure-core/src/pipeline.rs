//! Turn orchestration.
//!
//! One turn is a strictly sequential two-step pipeline: generate the next
//! story beat, then fold it into the running history. Compaction consumes
//! the generator's output, so the order is a contract, not a choice.
//!
//! Failure policy: a generation failure aborts the turn (hard error, no
//! history update). A compaction failure is soft: the narrative is returned,
//! the input history is preserved byte-for-byte, and the failure rides along
//! as a diagnostic.

use crate::inference::Inference;
use crate::narrator::{GenerationError, Narrator};
use crate::summarizer::Summarizer;
use crate::turn::{TurnInput, TurnOutput};
use std::sync::Arc;
use thiserror::Error;

/// Hard errors that abort a turn.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("Narrative generation failed: {0}")]
    Generation(#[from] GenerationError),
}

/// The turn orchestrator.
///
/// Stateless across turns: every invocation is a function of its input and
/// the two stages. Independent turns may run concurrently; the stages share
/// one backend.
pub struct TurnPipeline {
    narrator: Narrator,
    summarizer: Summarizer,
}

impl TurnPipeline {
    /// Create a pipeline with both stages over a shared backend.
    pub fn new(backend: Arc<dyn Inference>) -> Self {
        Self {
            narrator: Narrator::new(backend.clone()),
            summarizer: Summarizer::new(backend),
        }
    }

    /// Create a pipeline from pre-built stages.
    pub fn with_stages(narrator: Narrator, summarizer: Summarizer) -> Self {
        Self {
            narrator,
            summarizer,
        }
    }

    /// Run one turn: generate, then compact.
    pub async fn run(&self, input: TurnInput) -> Result<TurnOutput, TurnError> {
        tracing::debug!(player_action = %input.player_action, "running turn");

        let narrative = self
            .narrator
            .generate(
                &input.history,
                &input.previous_narrative,
                &input.player_action,
            )
            .await?;

        match self
            .summarizer
            .compact(&input.history, &input.player_action, &narrative)
            .await
        {
            Ok(updated_history) => Ok(TurnOutput {
                narrative,
                updated_history,
                compaction_error: None,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "history compaction failed, keeping prior history");
                Ok(TurnOutput {
                    narrative,
                    updated_history: input.history,
                    compaction_error: Some(e),
                })
            }
        }
    }
}
