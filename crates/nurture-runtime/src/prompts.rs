//! Prompt templates for guidance and chat.

use nurture_store::{field_text, render_value, DailyLog, LogEntry, Profile};
use serde_json::Value;

pub const GUIDANCE_SYSTEM_PROMPT: &str = "You are an empathetic pregnancy health assistant \
    providing personalized guidance. Use the context from previous logs to provide continuity \
    and track progress.";

pub const CHAT_SYSTEM_PROMPT: &str = "You are a caring and knowledgeable pregnancy health \
    assistant. Provide helpful, empathetic responses to pregnancy-related questions. Always \
    prioritize safety and recommend consulting healthcare providers for medical concerns. Keep \
    responses concise but informative.";

pub const PROBE_SYSTEM_PROMPT: &str = "You are a caring pregnancy health assistant.";

pub const CHAT_FALLBACK: &str = "I'm here to help with your pregnancy questions. While I can \
    provide general guidance, please consult your healthcare provider for personalized medical \
    advice.";

const NOT_SPECIFIED: &str = "not specified";

/// Entries from the chat window quoted as recent activity.
const RECENT_ACTIVITY_ENTRIES: usize = 2;

/// Daily-log guidance prompt. The journal summary travels separately as
/// generation context.
pub fn guidance_prompt(week: u32, daily_log: &DailyLog, profile: &Profile) -> String {
    let field = |key: &str, missing: &str| {
        profile
            .get(key)
            .filter(|v| !v.is_null())
            .map(render_value)
            .unwrap_or_else(|| missing.to_string())
    };

    format!(
        "A user at week {week} of pregnancy has shared their daily log.\n\n\
         User Profile:\n\
         - Age: {age}\n\
         - First pregnancy: {first}\n\
         - Health conditions: {conditions}\n\n\
         Today's Log (Week {week}):\n\
         - Mood: {mood}\n\
         - Energy level: {energy}\n\
         - Symptoms: {symptoms}\n\
         - Sleep hours: {sleep}\n\
         - Water intake: {water}\n\
         - Exercise: {exercise}\n\
         - Concerns: {concerns}\n\n\
         Please provide:\n\
         1. Personalized guidance considering their pregnancy journey history\n\
         2. Address any concerns and note any changes from previous weeks\n\
         3. Specific actionable advice for today/this week\n\
         4. When to contact their healthcare provider (if applicable)\n\
         5. Positive encouragement noting their progress\n\n\
         Keep the response caring, informative, and under 200 words.",
        week = week,
        age = field("age", NOT_SPECIFIED),
        first = field("first_pregnancy", NOT_SPECIFIED),
        conditions = field("health_conditions", "none specified"),
        mood = text_or(&daily_log.mood, NOT_SPECIFIED),
        energy = text_or(&daily_log.energy_level, NOT_SPECIFIED),
        symptoms = list_or(&daily_log.symptoms, "none reported"),
        sleep = text_or(&daily_log.sleep_hours, NOT_SPECIFIED),
        water = text_or(&daily_log.water_intake, NOT_SPECIFIED),
        exercise = text_or(&daily_log.exercise, NOT_SPECIFIED),
        concerns = list_or(&daily_log.concerns, "none specified"),
    )
}

/// Chat prompt: journal summary, recent activity from the last entries, then
/// the question.
pub fn chat_prompt(message: &str, summary: &str, recent_logs: &[LogEntry]) -> String {
    let mut context_info = String::new();
    if !summary.trim().is_empty() {
        context_info.push_str(&format!("User's pregnancy context: {}\n", summary.trim()));
    }

    if !recent_logs.is_empty() {
        context_info.push_str("Recent activity: ");
        let start = recent_logs.len().saturating_sub(RECENT_ACTIVITY_ENTRIES);
        for entry in &recent_logs[start..] {
            context_info.push_str(&format!(
                "Week {} - Mood: {}, Symptoms: {}. ",
                entry.week,
                text_or(&entry.daily_log.mood, NOT_SPECIFIED),
                list_or(&entry.daily_log.symptoms, "none"),
            ));
        }
        context_info.push('\n');
    }

    format!(
        "{}\nUser's question: {}\n\n\
         Please provide a helpful, empathetic response. If this seems like a medical concern, \
         recommend consulting a healthcare provider. Keep the response under 150 words.",
        context_info,
        message.trim()
    )
}

pub fn basic_guidance_text(week: u32) -> String {
    format!(
        "Week {}: Stay hydrated, take prenatal vitamins, and get adequate rest. Contact your \
         healthcare provider with any concerns.",
        week
    )
}

fn text_or(value: &Option<Value>, missing: &str) -> String {
    field_text(value)
        .map(|v| v.trim().to_string())
        .unwrap_or_else(|| missing.to_string())
}

fn list_or(items: &[String], missing: &str) -> String {
    if items.is_empty() {
        missing.to_string()
    } else {
        items.join(", ")
    }
}
