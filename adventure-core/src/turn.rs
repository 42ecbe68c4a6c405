//! Request and response contracts for one turn.

use crate::summarizer::CompactionError;

/// The request for one turn.
///
/// Constructed fresh per request and consumed by a single pipeline
/// invocation; the pipeline holds no cross-turn state.
#[derive(Debug, Clone)]
pub struct TurnInput {
    /// Compacted story-so-far. Must be the `updated_history` of the previous
    /// turn (or the opening scene for the first turn).
    pub history: String,

    /// The previous story beat shown to the player.
    pub previous_narrative: String,

    /// What the player chose to do.
    pub player_action: String,
}

impl TurnInput {
    /// Create a turn input.
    pub fn new(
        history: impl Into<String>,
        previous_narrative: impl Into<String>,
        player_action: impl Into<String>,
    ) -> Self {
        Self {
            history: history.into(),
            previous_narrative: previous_narrative.into(),
            player_action: player_action.into(),
        }
    }
}

/// The result of one turn.
#[derive(Debug)]
pub struct TurnOutput {
    /// The next story beat.
    pub narrative: String,

    /// The history to carry into the next turn. Equal to the input history
    /// when compaction failed.
    pub updated_history: String,

    /// Set when compaction failed and the turn completed with stale history.
    /// The narrative above is still valid.
    pub compaction_error: Option<CompactionError>,
}

impl TurnOutput {
    /// Whether this turn completed with stale history.
    pub fn is_degraded(&self) -> bool {
        self.compaction_error.is_some()
    }
}
