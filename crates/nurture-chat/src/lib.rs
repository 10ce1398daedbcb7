//! Guidance generation with an external backend and a deterministic fallback.
//!
//! The backend (an Ollama-compatible server) is probed once at construction.
//! When it is unreachable, or fails on any individual call, the rule-based
//! generator in [`mock`] answers instead, so generation never fails.

pub mod backend;
pub mod config;
pub mod generator;
pub mod language;
pub mod mock;
pub mod types;

pub use backend::{BackendFailure, OllamaBackend};
pub use config::BackendConfig;
pub use generator::{Backend, ResponseGenerator};
pub use language::detect_language;
pub use types::*;
