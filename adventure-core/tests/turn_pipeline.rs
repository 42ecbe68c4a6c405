//! End-to-end pipeline scenarios with a scripted backend.
//!
//! These mirror the documented turn contract: a successful turn produces a
//! narrative and a fresh history; a generation failure aborts the whole turn;
//! a compaction failure degrades it without corrupting history.

use adventure_core::{
    InferenceError, ScriptedInference, Session, TurnError, TurnInput, TurnPipeline,
};
use std::sync::Arc;

#[tokio::test]
async fn successful_turn_returns_both_outputs() {
    let backend = Arc::new(
        ScriptedInference::new()
            .reply("You see a crumbling tower.")
            .reply("The hero spots a tower."),
    );
    let pipeline = TurnPipeline::new(backend);

    let output = pipeline
        .run(TurnInput::new("", "", "look north"))
        .await
        .expect("turn should succeed");

    assert_eq!(output.narrative, "You see a crumbling tower.");
    assert_eq!(output.updated_history, "The hero spots a tower.");
    assert!(output.compaction_error.is_none());
    assert!(!output.narrative.is_empty());
    assert!(!output.updated_history.is_empty());
}

#[tokio::test]
async fn generation_timeout_aborts_turn_before_compaction() {
    let backend = Arc::new(
        ScriptedInference::new().fail(InferenceError::Backend("request timed out".to_string())),
    );
    let pipeline = TurnPipeline::new(backend.clone());

    let result = pipeline
        .run(TurnInput::new("some history", "", "open the door"))
        .await;

    let err = result.err().expect("turn should fail hard");
    assert!(matches!(err, TurnError::Generation(_)));

    // Exactly one inference call happened: compaction was never attempted.
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn compaction_error_returns_narrative_and_untouched_history() {
    let history = "The hero crossed the bridge at dawn.";
    let backend = Arc::new(
        ScriptedInference::new()
            .reply("You strike the guard.")
            .fail(InferenceError::Backend("model unloaded".to_string())),
    );
    let pipeline = TurnPipeline::new(backend);

    let output = pipeline
        .run(TurnInput::new(history, "", "strike the guard"))
        .await
        .expect("compaction failure must not fail the turn");

    assert_eq!(output.narrative, "You strike the guard.");
    assert_eq!(output.updated_history, history);
    assert!(output.compaction_error.is_some());
}

#[tokio::test]
async fn empty_generation_is_a_hard_failure() {
    let backend = Arc::new(ScriptedInference::new().reply("  "));
    let pipeline = TurnPipeline::new(backend.clone());

    let result = pipeline.run(TurnInput::new("", "", "shout")).await;

    assert!(matches!(result, Err(TurnError::Generation(_))));
    assert_eq!(backend.call_count(), 1);
}

#[tokio::test]
async fn empty_summary_degrades_but_keeps_narrative() {
    let backend = Arc::new(ScriptedInference::new().reply("You shout into the void.").reply("\n"));
    let pipeline = TurnPipeline::new(backend);

    let output = pipeline
        .run(TurnInput::new("old history", "", "shout"))
        .await
        .expect("empty summary is a soft failure");

    assert_eq!(output.narrative, "You shout into the void.");
    assert_eq!(output.updated_history, "old history");
    assert!(output.is_degraded());
}

#[tokio::test]
async fn history_fold_holds_over_many_turns() {
    let mut script = ScriptedInference::new();
    for i in 0..5 {
        script = script
            .reply(format!("Beat {i}."))
            .reply(format!("Summary after turn {i}."));
    }
    let mut session = Session::with_opening(TurnPipeline::new(Arc::new(script)), "Opening.");

    let mut expected_history = "Opening.".to_string();
    for i in 0..5 {
        let output = session.play(&format!("action {i}")).await.unwrap();

        // Each turn consumed exactly the previous turn's updated history.
        assert_ne!(output.updated_history, expected_history);
        expected_history = format!("Summary after turn {i}.");
        assert_eq!(output.updated_history, expected_history);
        assert_eq!(session.history(), expected_history);
    }

    assert_eq!(session.turn_count(), 5);
}

#[tokio::test]
async fn pipeline_is_reusable_after_failures() {
    let backend = Arc::new(
        ScriptedInference::new()
            .fail(InferenceError::Backend("first call dies".to_string()))
            .reply("You get up and dust yourself off.")
            .reply("The hero recovered."),
    );
    let pipeline = TurnPipeline::new(backend);

    let failed = pipeline.run(TurnInput::new("h", "", "stand up")).await;
    assert!(failed.is_err());

    let output = pipeline
        .run(TurnInput::new("h", "", "stand up"))
        .await
        .expect("fresh input should succeed after a failed turn");
    assert_eq!(output.narrative, "You get up and dust yourself off.");
    assert_eq!(output.updated_history, "The hero recovered.");
}
