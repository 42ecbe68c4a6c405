//! Inference backend abstraction.
//!
//! Both pipeline stages talk to the text-completion backend through the
//! `Inference` trait, so the orchestrator never depends on a concrete
//! provider. `OllamaBackend` is the production implementation; tests use
//! `ScriptedInference` from the testing module.

use async_trait::async_trait;
use ollama::{Ollama, Request};
use thiserror::Error;

/// Errors from an inference backend.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Ollama API error: {0}")]
    Ollama(#[from] ollama::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// A text-completion backend.
///
/// Implementations must be safe for concurrent invocation: the pipeline
/// shares one backend between both stages and independent turns may run
/// in parallel.
#[async_trait]
pub trait Inference: Send + Sync {
    /// Complete `prompt` under the given system prompt and return the text.
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, InferenceError>;

    /// Get the backend name (used in logs).
    fn name(&self) -> &str;
}

/// Inference backend that delegates to an Ollama server.
#[derive(Clone)]
pub struct OllamaBackend {
    client: Ollama,
    temperature: Option<f32>,
    num_predict: Option<usize>,
}

impl OllamaBackend {
    /// Create a backend over an existing client.
    pub fn new(client: Ollama) -> Self {
        Self {
            client,
            temperature: Some(0.8),
            num_predict: None,
        }
    }

    /// Create a backend from the OLLAMA_HOST environment variable.
    pub fn from_env() -> Self {
        Self::new(Ollama::from_env())
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Cap the number of tokens generated per completion.
    pub fn with_num_predict(mut self, num_predict: usize) -> Self {
        self.num_predict = Some(num_predict);
        self
    }
}

#[async_trait]
impl Inference for OllamaBackend {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, InferenceError> {
        let mut request = Request::new(prompt).with_system(system);

        if let Some(temp) = self.temperature {
            request = request.with_temperature(temp);
        }

        if let Some(num_predict) = self.num_predict {
            request = request.with_num_predict(num_predict);
        }

        let response = self.client.complete(request).await?;
        Ok(response.response)
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_defaults() {
        let backend = OllamaBackend::new(Ollama::new("http://localhost:11434"));
        assert_eq!(backend.temperature, Some(0.8));
        assert!(backend.num_predict.is_none());
        assert_eq!(backend.name(), "ollama");
    }

    #[test]
    fn test_backend_builders() {
        let backend = OllamaBackend::new(Ollama::new("http://localhost:11434"))
            .with_temperature(0.3)
            .with_num_predict(128);

        assert_eq!(backend.temperature, Some(0.3));
        assert_eq!(backend.num_predict, Some(128));
    }
}
