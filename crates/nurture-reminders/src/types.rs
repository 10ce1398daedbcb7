//! Reminder types.

use chrono::{DateTime, Utc};
use nurture_core::de;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reminder categories; each carries a fixed icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderCategory {
    Medication,
    Nutrition,
    Exercise,
    Monitoring,
    Appointment,
}

impl ReminderCategory {
    pub fn all() -> &'static [ReminderCategory] {
        &[
            Self::Medication,
            Self::Nutrition,
            Self::Exercise,
            Self::Monitoring,
            Self::Appointment,
        ]
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Medication => "💊",
            Self::Nutrition => "💧",
            Self::Exercise => "🧘‍♀️",
            Self::Monitoring => "👶",
            Self::Appointment => "👩‍⚕️",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// One daily action item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    pub text: String,
    pub category: ReminderCategory,
    pub icon: String,
    pub priority: Priority,
}

impl Reminder {
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        category: ReminderCategory,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            category,
            icon: category.icon().to_string(),
            priority,
        }
    }
}

/// A prior free-text entry used as reminder input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceLog {
    #[serde(deserialize_with = "de::text_or_empty")]
    pub transcript: String,
    #[serde(deserialize_with = "de::string_list")]
    pub symptoms: Vec<String>,
}

/// Profile fields that shape reminders. Accepts both the journal profile
/// keys and the shorter request keys.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReminderProfile {
    #[serde(
        alias = "health_conditions",
        alias = "healthConditions",
        deserialize_with = "de::string_list"
    )]
    pub conditions: Vec<String>,
    #[serde(
        alias = "week",
        alias = "pregnancyWeek",
        deserialize_with = "de::optional_week"
    )]
    pub pregnancy_week: Option<u32>,
    /// Free-form; clients send both numbers and strings.
    pub age: Option<Value>,
}

/// How a reminder set was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderSource {
    Backend,
    Fallback,
}

/// Output of one generation session.
#[derive(Debug, Clone, Serialize)]
pub struct ReminderSet {
    pub session_id: String,
    pub generated_at: DateTime<Utc>,
    pub reminders: Vec<Reminder>,
    pub based_on_symptoms: Vec<String>,
    pub based_on_conditions: Vec<String>,
    pub source: ReminderSource,
}
