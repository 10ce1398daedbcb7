//! Journal record types.

use chrono::{DateTime, Utc};
use nurture_core::de;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::summary::render_value;

/// Named user attributes (age, first_pregnancy, health_conditions, ...).
pub type Profile = serde_json::Map<String, serde_json::Value>;

/// One day's structured self-report.
///
/// Free-text fields keep whatever JSON the caller sent (`"energy_level": 3`
/// stays a number). Keys outside the known set are kept in `extra` so a
/// record read back from disk reproduces what the caller sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyLog {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub energy_level: Option<Value>,
    #[serde(deserialize_with = "de::string_list")]
    pub symptoms: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_hours: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_intake: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exercise: Option<Value>,
    #[serde(deserialize_with = "de::string_list")]
    pub concerns: Vec<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Prompt text for a free-text field. Missing, `null` and blank read as `None`.
pub fn field_text(value: &Option<Value>) -> Option<String> {
    match value {
        None | Some(Value::Null) => None,
        Some(v) => Some(render_value(v)).filter(|s| !s.trim().is_empty()),
    }
}

/// A timestamped daily log tied to a gestation week. Immutable once written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub week: u32,
    pub daily_log: DailyLog,
}

impl LogEntry {
    /// Calendar date of the entry (`YYYY-MM-DD`).
    pub fn date(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }
}

/// The persisted per-user document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalRecord {
    #[serde(deserialize_with = "de::object_or_empty")]
    pub user_profile: Profile,
    pub logs: Vec<LogEntry>,
}

impl JournalRecord {
    /// Overlay `update` onto the stored profile key by key.
    pub fn merge_profile(&mut self, update: &Profile) {
        for (key, value) in update {
            self.user_profile.insert(key.clone(), value.clone());
        }
    }

    /// The last `limit` entries, oldest first.
    pub fn recent(&self, limit: usize) -> &[LogEntry] {
        let start = self.logs.len().saturating_sub(limit);
        &self.logs[start..]
    }
}
