//! Turn orchestration and history compaction for an AI-driven adventure.
//!
//! This crate provides:
//! - A two-stage turn pipeline: narrative generation, then history compaction
//! - Immutable role configuration for the two model personas
//! - A backend-agnostic inference seam with an Ollama implementation
//! - A session helper that folds history across turns for interactive use
//!
//! # Quick Start
//!
//! ```ignore
//! use adventure_core::{OllamaBackend, Session, TurnPipeline};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = Arc::new(OllamaBackend::from_env());
//!     let mut session = Session::new(TurnPipeline::new(backend));
//!
//!     let output = session.play("I look north").await?;
//!     println!("{}", output.narrative);
//!     println!("{}", session.history());
//!     Ok(())
//! }
//! ```

pub mod inference;
pub mod narrator;
pub mod pipeline;
pub mod roles;
pub mod session;
pub mod summarizer;
pub mod testing;
pub mod turn;

// Primary public API
pub use inference::{Inference, InferenceError, OllamaBackend};
pub use narrator::{GenerationError, Narrator};
pub use pipeline::{TurnError, TurnPipeline};
pub use roles::RoleConfig;
pub use session::{Session, TranscriptEntry, OPENING_SCENE};
pub use summarizer::{CompactionError, Summarizer};
pub use testing::{RecordedCall, ScriptedInference};
pub use turn::{TurnInput, TurnOutput};
