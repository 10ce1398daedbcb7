//! Assistant runtime: wires generation, journal, triage and reminders.
//!
//! Each interaction is independent: detect or take the language, summarize
//! the user's journal, generate, and persist. Symptom triage runs alongside
//! and never waits on generation.

pub mod assistant;
pub mod prompts;
pub mod types;

pub use assistant::Assistant;
pub use types::*;
