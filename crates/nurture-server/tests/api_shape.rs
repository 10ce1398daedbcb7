//! API shape tests: validates that assistant responses carry the field
//! names and types the Node backend and React frontend read.
//!
//! Responses are produced by a real `Assistant` over the deterministic
//! generator and a temporary journal directory, then serialized.

use nurture_chat::ResponseGenerator;
use nurture_runtime::*;
use nurture_store::{DailyLog, JournalStore};
use serde_json::Value;

fn assistant() -> (Assistant, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let store = JournalStore::open(dir.path()).unwrap();
    (Assistant::new(ResponseGenerator::mock(), store), dir)
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap()
}

/// Verify the guidance response:
/// { week, guidance, source, personalized, has_memory, language }
#[tokio::test]
async fn test_guidance_response_shape() {
    let (assistant, _dir) = assistant();
    let resp = assistant
        .guidance(GuidanceRequest {
            user_id: "shape".into(),
            language: None,
            week: 24,
            daily_log: DailyLog {
                mood: Some("anxious".into()),
                ..DailyLog::default()
            },
            user_profile: Default::default(),
        })
        .await
        .unwrap();
    let json = to_json(&resp);

    assert!(json["week"].is_number());
    assert!(json["guidance"].is_string());
    assert!(json["source"].as_str().unwrap().starts_with("AI-powered ("));
    assert_eq!(json["personalized"], true);
    assert!(json["has_memory"].is_boolean());
    assert_eq!(json["language"], "auto-detected");
}

/// Verify the voice guidance response carries the extracted log and triage.
#[tokio::test]
async fn test_voice_guidance_response_shape() {
    let (assistant, _dir) = assistant();
    let resp = assistant
        .voice_guidance(VoiceGuidanceRequest {
            user_id: "shape".into(),
            transcript: "I've been feeling nauseous and tired today".into(),
            language: Some("english".into()),
            week: 12,
        })
        .await
        .unwrap();
    let json = to_json(&resp);

    assert_eq!(json["user_id"], "shape");
    assert!(json["transcript"].is_string());
    assert!(json["extracted_info"]["symptoms"].is_array());
    assert!(json["extracted_info"]["concerns"].is_array());
    assert_eq!(json["extracted_info"]["mood"], "not specified");
    assert!(json["extracted_info"].get("sleep_hours").is_none());
    assert_eq!(json["symptom_analysis"]["status"], "normal");
    assert!(json["symptom_analysis"]["message"].is_string());
    assert_eq!(json["escalation"]["escalated"], false);
    assert_eq!(json["language"], "english");
    assert!(json["has_memory"].is_boolean());
}

/// Verify the chat reply: { guidance, source, has_memory, language, user_id }
#[tokio::test]
async fn test_chat_reply_shape() {
    let (assistant, _dir) = assistant();
    let reply = assistant
        .chat(ChatRequest {
            user_id: "shape".into(),
            message: "Is back pain normal?".into(),
            language: None,
        })
        .await
        .unwrap();
    let json = to_json(&reply);

    assert!(json["guidance"].is_string());
    assert!(json["source"].is_string());
    assert_eq!(json["has_memory"], false);
    assert_eq!(json["language"], "auto-detected");
    assert_eq!(json["user_id"], "shape");
}

/// Verify the history response and the stored entry layout.
#[tokio::test]
async fn test_history_shape() {
    let (assistant, _dir) = assistant();
    assistant
        .voice_guidance(VoiceGuidanceRequest {
            user_id: "shape".into(),
            transcript: "Mild headache".into(),
            language: None,
            week: 18,
        })
        .await
        .unwrap();
    let json = to_json(&assistant.history("shape").await.unwrap());

    assert_eq!(json["user_id"], "shape");
    assert!(json["user_profile"].is_object());
    assert_eq!(json["total_logs"], 1);
    let entry = &json["logs"][0];
    assert!(entry["timestamp"].is_string());
    assert_eq!(entry["week"], 18);
    assert!(entry["daily_log"].is_object());
}

/// Verify the reminder set matches what PersonalizedReminders renders:
/// reminders[{id, text, category, icon, priority}] plus provenance.
#[tokio::test]
async fn test_reminder_set_shape() {
    let (assistant, _dir) = assistant();
    let set = assistant
        .reminders(ReminderRequest {
            user_id: "shape".into(),
            voice_logs: Vec::new(),
            user_profile: None,
        })
        .await
        .unwrap();
    let json = to_json(&set);

    assert!(json["session_id"].is_string());
    assert!(json["generated_at"].is_string());
    assert!(json["based_on_symptoms"].is_array());
    assert!(json["based_on_conditions"].is_array());
    assert!(json["source"].is_string());

    let reminders = json["reminders"].as_array().unwrap();
    assert_eq!(reminders.len(), 5);
    for reminder in reminders {
        assert!(reminder["id"].is_string());
        assert!(reminder["text"].is_string());
        assert!(reminder["icon"].is_string());
        let category = reminder["category"].as_str().unwrap();
        assert!(["medication", "nutrition", "exercise", "monitoring", "appointment"]
            .contains(&category));
        let priority = reminder["priority"].as_str().unwrap();
        assert!(["high", "medium", "low"].contains(&priority));
    }
}

/// Verify monitor output: { check: {status, message, symptoms}, escalation }
#[test]
fn test_monitor_shape() {
    let (assistant, _dir) = assistant();
    let json = to_json(&assistant.monitor(MonitorRequest {
        symptoms: vec!["Blurred Vision".into()],
    }));

    assert_eq!(json["check"]["status"], "alert");
    assert_eq!(json["check"]["message"], "Potentially dangerous symptoms detected.");
    assert_eq!(json["check"]["symptoms"][0], "Blurred Vision");
    assert_eq!(json["escalation"]["escalated"], true);
    assert!(json["escalation"]["message"].is_string());
}

/// Verify the language probe and status listings use lowercase tags.
#[tokio::test]
async fn test_language_listing_shape() {
    let (assistant, _dir) = assistant();
    let probe = to_json(
        &assistant
            .detect_language(LanguageProbeRequest {
                text: "Hello, I am 20 weeks pregnant".into(),
            })
            .await,
    );
    assert_eq!(probe["detected_language"], "english");
    assert!(probe["supported_languages"]
        .as_array()
        .unwrap()
        .contains(&Value::from("hindi")));

    let status = to_json(&assistant.status());
    assert_eq!(status["provider"], "mock");
    assert!(status.get("model").is_none());
}
