//! Minimal Ollama API client.
//!
//! This crate provides a focused client for Ollama's generate API:
//! - Non-streaming text completions against a local or remote Ollama server
//! - System prompt and sampling options per request
//! - Typed errors for network, API, and parse failures

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_HOST: &str = "http://localhost:11434";
const DEFAULT_MODEL: &str = "llama3.2:3b";

/// Errors that can occur when using the Ollama client.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

/// Ollama API client.
#[derive(Clone)]
pub struct Ollama {
    client: reqwest::Client,
    base_url: String,
    model: String,
}

impl Ollama {
    /// Create a new client pointed at the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .connect_timeout(std::time::Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Create a client from the OLLAMA_HOST environment variable,
    /// falling back to `http://localhost:11434`.
    pub fn from_env() -> Self {
        let base_url = std::env::var("OLLAMA_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string());
        Self::new(base_url)
    }

    /// Set the default model for this client.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// The model used when a request does not name one.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send a completion request and return the full response.
    pub async fn complete(&self, request: Request) -> Result<Response, Error> {
        let api_request = self.build_api_request(&request);

        let response = self
            .client
            .post(format!("{}/api/generate", self.base_url))
            .json(&api_request)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                message: body,
            });
        }

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))?;

        Ok(parse_response(api_response))
    }

    fn build_api_request(&self, request: &Request) -> ApiRequest {
        let options = if request.temperature.is_some() || request.num_predict.is_some() {
            Some(ApiOptions {
                temperature: request.temperature,
                num_predict: request.num_predict,
            })
        } else {
            None
        };

        ApiRequest {
            model: request.model.clone().unwrap_or_else(|| self.model.clone()),
            prompt: request.prompt.clone(),
            system: request.system.clone(),
            options,
            stream: false,
        }
    }
}

// ============================================================================
// Public types
// ============================================================================

/// A completion request to send to Ollama.
#[derive(Debug, Clone)]
pub struct Request {
    pub model: Option<String>,
    pub prompt: String,
    pub system: Option<String>,
    pub temperature: Option<f32>,
    pub num_predict: Option<usize>,
}

impl Request {
    /// Create a new request with the given prompt.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            model: None,
            prompt: prompt.into(),
            system: None,
            temperature: None,
            num_predict: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_num_predict(mut self, num_predict: usize) -> Self {
        self.num_predict = Some(num_predict);
        self
    }
}

/// A completion response from Ollama.
#[derive(Debug, Clone)]
pub struct Response {
    pub model: String,
    pub response: String,
    pub done: bool,
    pub done_reason: Option<String>,
    pub usage: Usage,
}

impl Response {
    /// The completion text.
    pub fn text(&self) -> &str {
        &self.response
    }
}

/// Token usage information.
#[derive(Debug, Clone, Default)]
pub struct Usage {
    pub prompt_tokens: usize,
    pub completion_tokens: usize,
}

// ============================================================================
// Internal API types
// ============================================================================

#[derive(Debug, Serialize)]
struct ApiRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<ApiOptions>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ApiOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    num_predict: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    model: String,
    response: String,
    done: bool,
    #[serde(default)]
    done_reason: Option<String>,
    #[serde(default)]
    prompt_eval_count: Option<usize>,
    #[serde(default)]
    eval_count: Option<usize>,
}

fn parse_response(api_response: ApiResponse) -> Response {
    Response {
        model: api_response.model,
        response: api_response.response,
        done: api_response.done,
        done_reason: api_response.done_reason,
        usage: Usage {
            prompt_tokens: api_response.prompt_eval_count.unwrap_or(0),
            completion_tokens: api_response.eval_count.unwrap_or(0),
        },
    }
}
