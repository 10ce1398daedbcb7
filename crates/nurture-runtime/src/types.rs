//! Interaction request and response types.

use nurture_chat::LanguageTag;
use nurture_reminders::{ReminderProfile, VoiceLog};
use nurture_store::{DailyLog, LogEntry, Profile};
use nurture_triage::{EscalationResult, RiskVerdict};
use nurture_core::de;
use serde::{Deserialize, Deserializer, Serialize};

/// User id applied when a request carries none.
pub const ANONYMOUS_USER: &str = "anonymous";
/// Gestation week applied when a request carries none.
pub const DEFAULT_WEEK: u32 = 20;
/// Week shown by basic guidance when none is given.
pub const BASIC_GUIDANCE_WEEK: u32 = 22;

fn default_user_id() -> String {
    ANONYMOUS_USER.into()
}
fn default_week() -> u32 {
    DEFAULT_WEEK
}

/// `null`, blank or non-text ids read as [`ANONYMOUS_USER`].
fn user_id_or_anonymous<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(de::optional_text(deserializer)?.unwrap_or_else(default_user_id))
}

/// `null` or an unreadable week reads as [`DEFAULT_WEEK`].
fn week_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    Ok(de::optional_week(deserializer)?.unwrap_or(DEFAULT_WEEK))
}
fn default_probe_text() -> String {
    "Hello, I am 20 weeks pregnant".into()
}
fn probe_text_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(de::optional_text(deserializer)?.unwrap_or_else(default_probe_text))
}

#[derive(Debug, Clone, Deserialize)]
pub struct GuidanceRequest {
    #[serde(default = "default_user_id", deserialize_with = "user_id_or_anonymous")]
    pub user_id: String,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub language: Option<String>,
    #[serde(default = "default_week", deserialize_with = "week_or_default")]
    pub week: u32,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub daily_log: DailyLog,
    #[serde(default, deserialize_with = "de::object_or_empty")]
    pub user_profile: Profile,
}

#[derive(Debug, Clone, Serialize)]
pub struct GuidanceResponse {
    pub week: u32,
    pub guidance: String,
    pub source: String,
    pub personalized: bool,
    pub has_memory: bool,
    pub language: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct VoiceGuidanceRequest {
    #[serde(default = "default_user_id", deserialize_with = "user_id_or_anonymous")]
    pub user_id: String,
    #[serde(default, deserialize_with = "de::text_or_empty")]
    pub transcript: String,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub language: Option<String>,
    #[serde(default = "default_week", deserialize_with = "week_or_default")]
    pub week: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoiceGuidanceResponse {
    pub user_id: String,
    pub transcript: String,
    pub extracted_info: DailyLog,
    pub guidance: String,
    pub symptom_analysis: RiskVerdict,
    pub escalation: EscalationResult,
    pub language: String,
    pub has_memory: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    #[serde(default = "default_user_id", deserialize_with = "user_id_or_anonymous")]
    pub user_id: String,
    #[serde(default, deserialize_with = "de::text_or_empty")]
    pub message: String,
    #[serde(default, deserialize_with = "de::optional_text")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub guidance: String,
    pub source: String,
    pub has_memory: bool,
    pub language: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MonitorRequest {
    #[serde(deserialize_with = "de::string_list")]
    pub symptoms: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonitorResponse {
    pub check: RiskVerdict,
    pub escalation: EscalationResult,
}

#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub user_id: String,
    pub user_profile: Profile,
    /// Most recent entries, oldest first.
    pub logs: Vec<LogEntry>,
    /// All entries on record, not just those returned.
    pub total_logs: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct BasicGuidance {
    pub week: u32,
    pub guidance: String,
    pub source: String,
    pub note: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LanguageProbeRequest {
    #[serde(default = "default_probe_text", deserialize_with = "probe_text_or_default")]
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageProbe {
    pub input_text: String,
    pub detected_language: LanguageTag,
    pub response: String,
    pub supported_languages: Vec<LanguageTag>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReminderRequest {
    #[serde(default = "default_user_id", deserialize_with = "user_id_or_anonymous")]
    pub user_id: String,
    #[serde(default, deserialize_with = "de::null_as_default")]
    pub voice_logs: Vec<VoiceLog>,
    /// Falls back to the user's stored journal profile when absent.
    #[serde(default)]
    pub user_profile: Option<ReminderProfile>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssistantStatus {
    pub provider: String,
    pub backend_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub supported_languages: Vec<LanguageTag>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let req: GuidanceRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.user_id, ANONYMOUS_USER);
        assert_eq!(req.week, DEFAULT_WEEK);
        assert!(req.language.is_none());
        assert!(req.user_profile.is_empty());

        let chat: ChatRequest = serde_json::from_str(r#"{"message": "hi"}"#).unwrap();
        assert_eq!(chat.user_id, ANONYMOUS_USER);

        let probe: LanguageProbeRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(probe.text, "Hello, I am 20 weeks pregnant");
    }

    #[test]
    fn test_guidance_request_full() {
        let req: GuidanceRequest = serde_json::from_str(
            r#"{
                "user_id": "user123",
                "language": "hindi",
                "week": 24,
                "daily_log": {"mood": "anxious", "symptoms": ["back pain"], "sleep_hours": 6},
                "user_profile": {"age": 28, "first_pregnancy": true}
            }"#,
        )
        .unwrap();
        assert_eq!(req.week, 24);
        assert_eq!(req.daily_log.mood, Some(serde_json::json!("anxious")));
        assert_eq!(req.daily_log.sleep_hours, Some(serde_json::json!(6)));
        assert_eq!(req.user_profile["first_pregnancy"], serde_json::json!(true));
    }

    #[test]
    fn test_null_and_loose_fields_take_defaults() {
        let req: GuidanceRequest = serde_json::from_str(
            r#"{"user_id": null, "language": null, "week": null,
                "daily_log": null, "user_profile": null}"#,
        )
        .unwrap();
        assert_eq!(req.user_id, ANONYMOUS_USER);
        assert_eq!(req.week, DEFAULT_WEEK);
        assert!(req.language.is_none());
        assert_eq!(req.daily_log, DailyLog::default());
        assert!(req.user_profile.is_empty());

        let voice: VoiceGuidanceRequest =
            serde_json::from_str(r#"{"transcript": "I feel tired", "week": "28", "user_id": 7}"#)
                .unwrap();
        assert_eq!(voice.week, 28);
        assert_eq!(voice.user_id, "7");

        let voice: VoiceGuidanceRequest =
            serde_json::from_str(r#"{"transcript": null, "week": "soon"}"#).unwrap();
        assert_eq!(voice.transcript, "");
        assert_eq!(voice.week, DEFAULT_WEEK);

        let reminders: ReminderRequest =
            serde_json::from_str(r#"{"voice_logs": null, "user_profile": null}"#).unwrap();
        assert!(reminders.voice_logs.is_empty());
        assert!(reminders.user_profile.is_none());

        let monitor: MonitorRequest = serde_json::from_str(r#"{"symptoms": null}"#).unwrap();
        assert!(monitor.symptoms.is_empty());

        let probe: LanguageProbeRequest = serde_json::from_str(r#"{"text": null}"#).unwrap();
        assert_eq!(probe.text, "Hello, I am 20 weeks pregnant");
    }
}
