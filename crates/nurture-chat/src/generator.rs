//! Response generation with backend selection and fallback.

use tracing::{info, warn};

use crate::backend::OllamaBackend;
use crate::config::BackendConfig;
use crate::language::detect_language;
use crate::mock;
use crate::types::{Generation, GenerationSource, LanguageTag};

/// The generation path chosen at construction.
pub enum Backend {
    /// A reachable Ollama-compatible server.
    Ollama(OllamaBackend),
    /// Rule-based replies only.
    Mock,
}

/// Builds language-aware prompts and returns text, falling back on any failure.
pub struct ResponseGenerator {
    backend: Backend,
}

impl ResponseGenerator {
    /// Probe the configured backend once and pick the generation path.
    pub async fn connect(config: BackendConfig) -> Self {
        if config.is_mock() {
            info!("Generation provider forced to mock");
            return Self::mock();
        }

        let backend = OllamaBackend::new(config);
        match backend.health_check().await {
            Ok(()) => {
                info!(
                    "Generation backend available at {} (model {})",
                    backend.config().base_url,
                    backend.config().model
                );
                Self::with_backend(Backend::Ollama(backend))
            }
            Err(e) => {
                warn!(
                    "Generation backend at {} unavailable ({}); using deterministic replies",
                    backend.config().base_url,
                    e
                );
                Self::mock()
            }
        }
    }

    /// Generator that never leaves the process.
    pub fn mock() -> Self {
        Self::with_backend(Backend::Mock)
    }

    /// Use a backend without probing it.
    pub fn with_backend(backend: Backend) -> Self {
        Self { backend }
    }

    /// Provider name reported to clients.
    pub fn provider(&self) -> &'static str {
        match self.backend {
            Backend::Ollama(_) => "ollama",
            Backend::Mock => "mock",
        }
    }

    pub fn is_backend_available(&self) -> bool {
        matches!(self.backend, Backend::Ollama(_))
    }

    pub fn model(&self) -> Option<&str> {
        match &self.backend {
            Backend::Ollama(b) => Some(b.config().model.as_str()),
            Backend::Mock => None,
        }
    }

    /// Generate reply text. Never fails.
    pub async fn generate(
        &self,
        prompt: &str,
        system_prompt: &str,
        context: &str,
        language: Option<LanguageTag>,
    ) -> String {
        self.generate_detailed(prompt, system_prompt, context, language)
            .await
            .text
    }

    /// Generate reply text along with the language used and the path taken.
    pub async fn generate_detailed(
        &self,
        prompt: &str,
        system_prompt: &str,
        context: &str,
        language: Option<LanguageTag>,
    ) -> Generation {
        let language = language.unwrap_or_else(|| detect_language(prompt));
        let system = localized_system_prompt(system_prompt, language);
        let full_prompt = with_context(prompt, context);

        let (text, source) = match &self.backend {
            Backend::Ollama(backend) => match backend.generate(&full_prompt, &system).await {
                Ok(text) => (text, GenerationSource::Backend),
                Err(e) => {
                    warn!("Backend generation failed ({}); using deterministic reply", e);
                    (mock::generate(&full_prompt, language), GenerationSource::Mock)
                }
            },
            Backend::Mock => (mock::generate(&full_prompt, language), GenerationSource::Mock),
        };

        Generation {
            text,
            language,
            source,
        }
    }
}

/// Append a reply-language instruction for non-default languages.
pub fn localized_system_prompt(system_prompt: &str, language: LanguageTag) -> String {
    if language.is_default() {
        return system_prompt.to_string();
    }
    let name = language.display_name();
    format!(
        "{}\n\nIMPORTANT: The user is communicating in {}. Please respond in the same language ({}) \
         to ensure they can understand your guidance. Be culturally sensitive and appropriate for \
         their language/culture.",
        system_prompt, name, name
    )
}

/// Prefix the prompt with a delimited block of earlier context.
pub fn with_context(prompt: &str, context: &str) -> String {
    if context.is_empty() {
        prompt.to_string()
    } else {
        format!(
            "CONTEXT (Previous pregnancy logs):\n{}\n\nCURRENT QUERY: {}",
            context, prompt
        )
    }
}
