//! Ollama-compatible generation backend.
//!
//! Every call is one non-streaming request. Failures come back as
//! [`BackendFailure`] so the caller can fall back explicitly.

use reqwest::Client;
use serde_json::json;
use thiserror::Error;
use tracing::debug;

use crate::config::BackendConfig;

/// Why a backend call produced no usable text.
#[derive(Debug, Error)]
pub enum BackendFailure {
    #[error("health check failed: {0}")]
    Unhealthy(String),

    #[error("backend returned status {0}")]
    Status(u16),

    #[error("backend returned empty output")]
    EmptyOutput,

    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for BackendFailure {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            BackendFailure::Timeout
        } else {
            BackendFailure::Transport(e.to_string())
        }
    }
}

/// Client for an Ollama server (`/api/tags`, `/api/generate`).
pub struct OllamaBackend {
    client: Client,
    config: BackendConfig,
}

impl OllamaBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Cheap liveness probe bounded by the health timeout.
    pub async fn health_check(&self) -> Result<(), BackendFailure> {
        let url = format!("{}/api/tags", self.config.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.config.health_timeout())
            .send()
            .await
            .map_err(|e| BackendFailure::Unhealthy(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(BackendFailure::Unhealthy(format!(
                "status {}",
                response.status()
            )))
        }
    }

    /// Re-check health, then generate a single non-streamed completion.
    pub async fn generate(&self, prompt: &str, system_prompt: &str) -> Result<String, BackendFailure> {
        self.health_check().await?;

        let full_prompt = if system_prompt.is_empty() {
            prompt.to_string()
        } else {
            format!("System: {}\n\nUser: {}\n\nAssistant:", system_prompt, prompt)
        };

        let body = json!({
            "model": self.config.model,
            "prompt": full_prompt,
            "stream": false,
            "options": {
                "temperature": self.config.temperature,
                "top_p": self.config.top_p,
                "num_predict": self.config.max_tokens,
            },
        });

        let url = format!("{}/api/generate", self.config.base_url);
        debug!(
            "Generating via {} with model {} ({} prompt chars)",
            url,
            self.config.model,
            full_prompt.chars().count()
        );

        let response = self
            .client
            .post(&url)
            .timeout(self.config.generate_timeout())
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(BackendFailure::Status(response.status().as_u16()));
        }

        let parsed: serde_json::Value = response.json().await?;
        let text = parsed["response"].as_str().unwrap_or_default().trim();
        if text.is_empty() {
            return Err(BackendFailure::EmptyOutput);
        }

        Ok(text.to_string())
    }
}
