//! Reminder generation pipeline.

use chrono::Utc;
use nurture_chat::{GenerationSource, ResponseGenerator};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::types::*;

/// Reminders per session.
pub const REMINDER_COUNT: usize = 5;

const DEFAULT_WEEK: u32 = 20;
const MAX_EXCERPTS: usize = 3;
const EXCERPT_CHARS: usize = 200;

const SYSTEM_PROMPT: &str =
    "You are a pregnancy care assistant who writes short, practical daily reminders.";

/// Category → keywords, checked in order; first hit wins.
static CATEGORY_KEYWORDS: &[(ReminderCategory, &[&str])] = &[
    (ReminderCategory::Medication, &["iron", "vitamin", "supplement"]),
    (ReminderCategory::Nutrition, &["water", "drink", "eat"]),
    (ReminderCategory::Exercise, &["walk", "exercise"]),
    (ReminderCategory::Monitoring, &["check", "monitor"]),
    (ReminderCategory::Appointment, &["appointment", "visit", "doctor"]),
];

const ANEMIA_MARKERS: &[&str] = &["anemia", "anaemia", "fatigue", "dizziness"];
const DIABETES_MARKERS: &[&str] = &["diabetes", "glucose", "blood sugar"];
const CIRCULATION_MARKERS: &[&str] = &["diabetes", "hypertension"];

/// The fixed default list, ids `reminder_1..5`.
pub fn default_reminders() -> Vec<Reminder> {
    vec![
        Reminder::new(
            "reminder_1",
            "Take prenatal vitamins with breakfast",
            ReminderCategory::Medication,
            Priority::High,
        ),
        Reminder::new(
            "reminder_2",
            "Drink 8-10 glasses of water throughout the day",
            ReminderCategory::Nutrition,
            Priority::High,
        ),
        Reminder::new(
            "reminder_3",
            "20-minute gentle walk or prenatal yoga",
            ReminderCategory::Exercise,
            Priority::Medium,
        ),
        Reminder::new(
            "reminder_4",
            "Monitor baby movements and kick counts",
            ReminderCategory::Monitoring,
            Priority::Medium,
        ),
        Reminder::new(
            "reminder_5",
            "Schedule next prenatal checkup appointment",
            ReminderCategory::Appointment,
            Priority::Medium,
        ),
    ]
}

/// Turns voice logs and a profile into exactly [`REMINDER_COUNT`] reminders.
pub struct ReminderExtractor;

impl ReminderExtractor {
    /// Run one generation session. Never fails.
    pub async fn generate(
        generator: &ResponseGenerator,
        voice_logs: &[VoiceLog],
        profile: &ReminderProfile,
    ) -> ReminderSet {
        let symptoms = Self::aggregate_symptoms(voice_logs);
        let conditions = profile.conditions.clone();

        let prompt = Self::build_prompt(voice_logs, &symptoms, profile);
        debug!("Reminder prompt: {} chars", prompt.len());

        let generation = generator
            .generate_detailed(&prompt, SYSTEM_PROMPT, "", None)
            .await;

        let (reminders, source) = match generation.source {
            GenerationSource::Backend => {
                let lines = Self::parse_lines(&generation.text);
                if lines.is_empty() {
                    warn!("Backend reply had no usable reminder lines; using fallback set");
                    (
                        Self::fallback(&symptoms, &conditions),
                        ReminderSource::Fallback,
                    )
                } else {
                    let parsed = Self::from_lines(&lines, &symptoms, &conditions);
                    (Self::pad(parsed), ReminderSource::Backend)
                }
            }
            GenerationSource::Mock => {
                warn!("Generation backend unavailable; using symptom-aware reminder set");
                (
                    Self::fallback(&symptoms, &conditions),
                    ReminderSource::Fallback,
                )
            }
        };

        info!(
            "Generated {} reminders ({:?}) from {} voice logs",
            reminders.len(),
            source,
            voice_logs.len()
        );

        ReminderSet {
            session_id: uuid::Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            reminders,
            based_on_symptoms: symptoms,
            based_on_conditions: conditions,
            source,
        }
    }

    /// Symptoms across all logs, trimmed, deduplicated case-insensitively in
    /// first-seen order.
    pub fn aggregate_symptoms(voice_logs: &[VoiceLog]) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        let mut out = Vec::new();
        for symptom in voice_logs.iter().flat_map(|log| log.symptoms.iter()) {
            let trimmed = symptom.trim();
            if trimmed.is_empty() {
                continue;
            }
            let key = trimmed.to_lowercase();
            if !seen.contains(&key) {
                seen.push(key);
                out.push(trimmed.to_string());
            }
        }
        out
    }

    pub fn build_prompt(
        voice_logs: &[VoiceLog],
        symptoms: &[String],
        profile: &ReminderProfile,
    ) -> String {
        let week = profile.pregnancy_week.unwrap_or(DEFAULT_WEEK);
        let age = match &profile.age {
            Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
            Some(Value::Null) | None => "not specified".to_string(),
            Some(Value::String(_)) => "not specified".to_string(),
            Some(other) => other.to_string(),
        };

        let excerpts: Vec<String> = voice_logs
            .iter()
            .map(|log| log.transcript.trim())
            .filter(|t| !t.is_empty())
            .take(MAX_EXCERPTS)
            .map(|t| format!("- \"{}\"", t.chars().take(EXCERPT_CHARS).collect::<String>()))
            .collect();

        format!(
            "Based on this pregnancy information, write exactly {count} personalized daily reminders.\n\n\
             Pregnancy week: {week}\n\
             Age: {age}\n\
             Symptoms: {symptoms}\n\
             Health conditions: {conditions}\n\n\
             Recent voice logs:\n{excerpts}\n\n\
             Reply with exactly {count} lines, one actionable reminder per line, no numbering \
             and no other text.",
            count = REMINDER_COUNT,
            week = week,
            age = age,
            symptoms = join_or_none(symptoms),
            conditions = join_or_none(&profile.conditions),
            excerpts = if excerpts.is_empty() {
                "- none".to_string()
            } else {
                excerpts.join("\n")
            },
        )
    }

    /// Candidate reminder lines: decoration stripped, blanks and header lines
    /// dropped, capped at [`REMINDER_COUNT`].
    pub fn parse_lines(text: &str) -> Vec<String> {
        text.lines()
            .map(strip_decoration)
            .filter(|line| !line.is_empty() && !line.ends_with(':'))
            .take(REMINDER_COUNT)
            .map(str::to_string)
            .collect()
    }

    pub fn categorize(text: &str) -> ReminderCategory {
        let lower = text.to_lowercase();
        CATEGORY_KEYWORDS
            .iter()
            .find(|(_, keywords)| keywords.iter().any(|kw| lower.contains(kw)))
            .map(|(category, _)| *category)
            .unwrap_or(ReminderCategory::Medication)
    }

    pub fn priority(text: &str, symptoms: &[String], conditions: &[String]) -> Priority {
        let lower = text.to_lowercase();
        let iron_needed = lower.contains("iron") && mentions_any(symptoms, ANEMIA_MARKERS);
        let circulation = ["blood", "pressure", "sugar"]
            .iter()
            .any(|kw| lower.contains(kw))
            && mentions_any(conditions, CIRCULATION_MARKERS);
        if iron_needed || circulation {
            Priority::High
        } else {
            Priority::Medium
        }
    }

    fn from_lines(lines: &[String], symptoms: &[String], conditions: &[String]) -> Vec<Reminder> {
        lines
            .iter()
            .enumerate()
            .map(|(i, line)| {
                Reminder::new(
                    format!("reminder_{}", i + 1),
                    line.clone(),
                    Self::categorize(line),
                    Self::priority(line, symptoms, conditions),
                )
            })
            .collect()
    }

    /// Deterministic set keyed on anemia-like and diabetes-like signals.
    pub fn fallback(symptoms: &[String], conditions: &[String]) -> Vec<Reminder> {
        let mut reminders = Vec::new();

        if mentions_any(symptoms, ANEMIA_MARKERS) || mentions_any(conditions, ANEMIA_MARKERS) {
            reminders.push(Reminder::new(
                "reminder_iron",
                "Take iron supplement with a vitamin C-rich food",
                ReminderCategory::Medication,
                Priority::High,
            ));
        }
        if mentions_any(conditions, DIABETES_MARKERS) {
            reminders.push(Reminder::new(
                "reminder_glucose",
                "Check blood sugar levels as advised by your doctor",
                ReminderCategory::Monitoring,
                Priority::High,
            ));
        }

        Self::pad(reminders)
    }

    /// Fill up to [`REMINDER_COUNT`] from the defaults, skipping taken ids.
    fn pad(mut reminders: Vec<Reminder>) -> Vec<Reminder> {
        for default in default_reminders() {
            if reminders.len() >= REMINDER_COUNT {
                break;
            }
            if reminders.iter().all(|r| r.id != default.id) {
                reminders.push(default);
            }
        }
        reminders.truncate(REMINDER_COUNT);
        reminders
    }
}

fn strip_decoration(line: &str) -> &str {
    let mut s = line.trim();
    loop {
        let before = s.len();
        s = s
            .trim_start_matches(|c: char| matches!(c, '-' | '*' | '•'))
            .trim_start();
        let digits = s.len() - s.trim_start_matches(|c: char| c.is_ascii_digit()).len();
        if digits > 0 {
            let rest = &s[digits..];
            if let Some(r) = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
                s = r.trim_start();
            }
        }
        if s.len() == before {
            break;
        }
    }
    s.trim_end_matches('*').trim_end()
}

fn mentions_any(items: &[String], markers: &[&str]) -> bool {
    items.iter().any(|item| {
        let lower = item.to_lowercase();
        markers.iter().any(|m| lower.contains(m))
    })
}

fn join_or_none(items: &[String]) -> String {
    if items.is_empty() {
        "none reported".to_string()
    } else {
        items.join(", ")
    }
}
