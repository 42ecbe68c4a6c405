//! Session - the history fold for interactive callers.
//!
//! The pipeline itself is stateless; something has to carry the running
//! history from one turn to the next. `Session` owns that fold for in-process
//! callers (the REPL): it threads `updated_history` back into the next
//! `TurnInput` and keeps a transcript of the exchanges. Remote callers of the
//! HTTP adapter do their own fold and don't need this type.

use crate::pipeline::{TurnError, TurnPipeline};
use crate::turn::{TurnInput, TurnOutput};

/// The opening scene seeding a fresh session's history.
pub const OPENING_SCENE: &str = "A chill wind howls through the desolate spires of Eldoria, \
a city now nothing more than a rain-slicked tomb. Above, the sky weeps a perpetual drizzle, \
mirroring the despair of its few remaining souls. Suddenly, a figure emerges from the gloom: \
Elara, the Whisperwind, her crimson cloak a lone splash of color against the gray. She stands \
before the city's gates, her hand on her dagger, her emerald eyes scanning for any sign of hope. \
From the city's depths, a guttural roar tears through the air. Lord Kaelen, the Shadowbinder, \
stalks forward, his obsidian armor a void of malevolent power. In his grasp, a helpless citizen \
struggles, a cruel trophy in Kaelen's dark parade. Elara tenses, her jaw set. This is a scene \
she knows well, but tonight is different. A new presence shimmers on the edge of her sight, a \
glimmer of light that defies the eternal gloom. The prophesied hero has arrived.";

/// An entry in the session transcript.
#[derive(Debug, Clone)]
pub struct TranscriptEntry {
    /// Player input.
    pub player_action: String,

    /// The narrative beat that answered it.
    pub narrative: String,

    /// Turn number, starting at 1.
    pub turn: usize,
}

/// An interactive adventure session.
pub struct Session {
    pipeline: TurnPipeline,
    history: String,
    transcript: Vec<TranscriptEntry>,
}

impl Session {
    /// Create a session seeded with the default opening scene.
    pub fn new(pipeline: TurnPipeline) -> Self {
        Self::with_opening(pipeline, OPENING_SCENE)
    }

    /// Create a session seeded with a custom opening.
    pub fn with_opening(pipeline: TurnPipeline, opening: impl Into<String>) -> Self {
        Self {
            pipeline,
            history: opening.into(),
            transcript: Vec::new(),
        }
    }

    /// Play one turn.
    ///
    /// On success the updated history is folded back into the session, even
    /// when compaction failed (the fold then carries the prior history
    /// forward unchanged, and the output's diagnostic says so). On a hard
    /// generation failure the session is untouched and the same action can
    /// be retried.
    pub async fn play(&mut self, player_action: &str) -> Result<TurnOutput, TurnError> {
        let previous_narrative = self
            .transcript
            .last()
            .map(|e| e.narrative.clone())
            .unwrap_or_default();

        let input = TurnInput::new(self.history.clone(), previous_narrative, player_action);
        let output = self.pipeline.run(input).await?;

        self.history = output.updated_history.clone();
        self.transcript.push(TranscriptEntry {
            player_action: player_action.to_string(),
            narrative: output.narrative.clone(),
            turn: self.transcript.len() + 1,
        });

        Ok(output)
    }

    /// The current running history.
    pub fn history(&self) -> &str {
        &self.history
    }

    /// The transcript of all exchanges.
    pub fn transcript(&self) -> &[TranscriptEntry] {
        &self.transcript
    }

    /// The last narrative beat, if any turn has completed.
    pub fn last_narrative(&self) -> Option<&str> {
        self.transcript.last().map(|e| e.narrative.as_str())
    }

    /// How many turns have completed.
    pub fn turn_count(&self) -> usize {
        self.transcript.len()
    }
}
