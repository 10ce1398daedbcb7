//! Context summaries for prompting.

use crate::journal::JournalStore;
use crate::types::{field_text, LogEntry, Profile};
use nurture_core::Result;

/// Number of most recent entries rendered into a summary.
pub const SUMMARY_WINDOW: usize = 10;

/// Returned when a user has nothing on record yet.
pub const FIRST_ENTRY_SUMMARY: &str = "This is the user's first log entry.";

/// Reduces a journal to a compact text block for the generation prompt.
pub struct ContextSummarizer;

impl ContextSummarizer {
    /// Summarize a user's profile and recent journey.
    pub fn summarize(store: &JournalStore, user_id: &str) -> Result<String> {
        let record = store.load(user_id)?;
        Ok(Self::render(&record.user_profile, record.recent(SUMMARY_WINDOW)))
    }

    /// Render a profile and entries (already in chronological order).
    pub fn render(profile: &Profile, logs: &[LogEntry]) -> String {
        if logs.is_empty() {
            return FIRST_ENTRY_SUMMARY.to_string();
        }

        let mut summary = format!(
            "User Profile: {}\n\nRecent Pregnancy Journey:\n",
            render_profile(profile)
        );

        for entry in logs {
            let log = &entry.daily_log;
            summary.push_str(&format!(
                "Week {} ({}): Mood: {}, Energy: {}, Symptoms: [{}], Concerns: [{}]\n",
                entry.week,
                entry.date(),
                field_text(&log.mood).as_deref().unwrap_or("N/A"),
                field_text(&log.energy_level).as_deref().unwrap_or("N/A"),
                log.symptoms.join(", "),
                log.concerns.join(", "),
            ));
        }

        summary
    }
}

fn render_profile(profile: &Profile) -> String {
    let fields: Vec<String> = profile
        .iter()
        .map(|(key, value)| format!("{}: {}", key, render_value(value)))
        .collect();
    format!("{{{}}}", fields.join(", "))
}

/// Prompt rendering of a profile value: strings unquoted, arrays as `[a, b]`.
pub fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Array(items) => {
            let parts: Vec<String> = items.iter().map(render_value).collect();
            format!("[{}]", parts.join(", "))
        }
        other => other.to_string(),
    }
}
