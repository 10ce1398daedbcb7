//! Generation backend configuration and provider selection.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Stored backend configuration (persisted to backend-config.json).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    /// `auto`, `ollama` or `mock`.
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    #[serde(default = "default_top_p")]
    pub top_p: f64,
    /// Upper bound on generated tokens; keeps replies short and latency bounded.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_health_timeout")]
    pub health_timeout_secs: u64,
    #[serde(default = "default_generate_timeout")]
    pub generate_timeout_secs: u64,
}

fn default_provider() -> String {
    "auto".into()
}
fn default_base_url() -> String {
    DEFAULT_BASE_URL.into()
}
fn default_model() -> String {
    DEFAULT_MODEL.into()
}
fn default_temperature() -> f64 {
    0.7
}
fn default_top_p() -> f64 {
    0.9
}
fn default_max_tokens() -> u32 {
    200
}
fn default_health_timeout() -> u64 {
    2
}
fn default_generate_timeout() -> u64 {
    60
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            max_tokens: default_max_tokens(),
            health_timeout_secs: default_health_timeout(),
            generate_timeout_secs: default_generate_timeout(),
        }
    }
}

impl BackendConfig {
    /// Load config from file, then apply environment overrides.
    pub fn load(config_path: &Path) -> Self {
        let mut config: BackendConfig = std::fs::read_to_string(config_path)
            .ok()
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default();

        if let Ok(provider) = std::env::var("NURTURE_PROVIDER") {
            config.provider = provider;
        }
        if let Ok(host) = std::env::var("OLLAMA_HOST") {
            config.base_url = normalize_base_url(&host);
        }
        if let Ok(model) = std::env::var("NURTURE_MODEL") {
            config.model = model;
        }

        debug!(
            "Backend config: provider={}, url={}, model={}",
            config.provider, config.base_url, config.model
        );
        config
    }

    /// Config that never contacts a backend.
    pub fn mock() -> Self {
        Self {
            provider: "mock".into(),
            ..Self::default()
        }
    }

    /// Whether the deterministic generator was requested explicitly.
    pub fn is_mock(&self) -> bool {
        self.provider.eq_ignore_ascii_case("mock")
    }

    pub fn health_timeout(&self) -> Duration {
        Duration::from_secs(self.health_timeout_secs)
    }

    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }
}

/// `OLLAMA_HOST` is often given without a scheme (`0.0.0.0:11434`).
fn normalize_base_url(host: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BackendConfig::load(&dir.path().join("none.json"));
        assert_eq!(config.max_tokens, 200);
        assert!((config.temperature - 0.7).abs() < f64::EPSILON);
        assert_eq!(config.health_timeout(), Duration::from_secs(2));
        assert_eq!(config.generate_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: BackendConfig =
            serde_json::from_str(r#"{"provider": "mock", "model": "phi3"}"#).unwrap();
        assert!(config.is_mock());
        assert_eq!(config.model, "phi3");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!((config.top_p - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url("0.0.0.0:11434"), "http://0.0.0.0:11434");
        assert_eq!(normalize_base_url("https://llm.local/"), "https://llm.local");
    }
}
