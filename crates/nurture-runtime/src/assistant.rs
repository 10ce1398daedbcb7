//! Assistant: one method per interaction.

use std::sync::Arc;

use nurture_chat::{detect_language, Generation, LanguageTag, ResponseGenerator};
use nurture_core::{Error, Result};
use nurture_reminders::{ReminderExtractor, ReminderProfile, ReminderSet};
use nurture_store::{ContextSummarizer, DailyLog, JournalStore};
use nurture_triage::{find_mentioned_symptoms, EscalationPolicy, SymptomClassifier};
use tracing::{debug, info, warn};

use crate::prompts::{
    self, CHAT_FALLBACK, CHAT_SYSTEM_PROMPT, GUIDANCE_SYSTEM_PROMPT, PROBE_SYSTEM_PROMPT,
};
use crate::types::*;

/// Entries returned by [`Assistant::history`].
pub const HISTORY_LIMIT: usize = 10;
/// Entries consulted for chat context.
pub const CHAT_RECENT_LOGS: usize = 3;

const NOT_SPECIFIED: &str = "not specified";
const AUTO_DETECTED: &str = "auto-detected";

/// Interaction layer over generation, journal, triage and reminders.
pub struct Assistant {
    generator: Arc<ResponseGenerator>,
    store: Arc<JournalStore>,
    escalation: EscalationPolicy,
}

impl Assistant {
    pub fn new(generator: ResponseGenerator, store: JournalStore) -> Self {
        info!(
            "Assistant ready (provider: {}, journals: {})",
            generator.provider(),
            store.dir().display()
        );
        Self {
            generator: Arc::new(generator),
            store: Arc::new(store),
            escalation: EscalationPolicy::default(),
        }
    }

    /// Replace the escalation policy (e.g. to wire a real notifier).
    pub fn with_escalation(mut self, escalation: EscalationPolicy) -> Self {
        self.escalation = escalation;
        self
    }

    pub fn generator(&self) -> &ResponseGenerator {
        &self.generator
    }

    pub fn store(&self) -> &JournalStore {
        &self.store
    }

    // ---- guidance ----

    /// Record today's log, then generate guidance with the journal as context.
    pub async fn guidance(&self, req: GuidanceRequest) -> Result<GuidanceResponse> {
        let language = resolve_language(req.language.as_deref());

        let (user_id, week) = (req.user_id.clone(), req.week);
        let (daily_log, profile) = (req.daily_log.clone(), req.user_profile.clone());
        let (context, total_logs) = self
            .journal(move |store| {
                store.save_log(&user_id, week, daily_log, Some(&profile))?;
                let context = ContextSummarizer::summarize(store, &user_id)?;
                Ok((context, store.total_logs(&user_id)?))
            })
            .await?;

        let prompt = prompts::guidance_prompt(req.week, &req.daily_log, &req.user_profile);
        debug!(
            "Guidance prompt for {}: {} chars, context {} chars",
            req.user_id,
            prompt.len(),
            context.len()
        );
        let generation = self
            .generator
            .generate_detailed(&prompt, GUIDANCE_SYSTEM_PROMPT, &context, language)
            .await;

        Ok(GuidanceResponse {
            week: req.week,
            guidance: generation.text.clone(),
            source: self.source_label(),
            personalized: true,
            has_memory: total_logs > 1,
            language: language_label(language, &generation),
        })
    }

    /// Guidance from a free-text voice transcript. The transcript becomes a
    /// daily log; symptoms it mentions are triaged.
    pub async fn voice_guidance(&self, req: VoiceGuidanceRequest) -> Result<VoiceGuidanceResponse> {
        let transcript = req.transcript.trim();
        if transcript.is_empty() {
            return Err(Error::InvalidInput(
                "Transcript is required: please provide a voice transcript".into(),
            ));
        }
        let language = resolve_language(req.language.as_deref());

        let daily_log = daily_log_from_transcript(transcript);
        let (user_id, week, entry) = (req.user_id.clone(), req.week, daily_log.clone());
        let (context, total_logs) = self
            .journal(move |store| {
                let context = ContextSummarizer::summarize(store, &user_id)?;
                store.save_log(&user_id, week, entry, None)?;
                Ok((context, store.total_logs(&user_id)?))
            })
            .await?;

        let symptom_analysis = SymptomClassifier::classify(&daily_log.symptoms);
        let escalation = self.escalation.escalate(&symptom_analysis);

        let prompt = prompts::guidance_prompt(req.week, &daily_log, &Default::default());
        let generation = self
            .generator
            .generate_detailed(&prompt, GUIDANCE_SYSTEM_PROMPT, &context, language)
            .await;

        Ok(VoiceGuidanceResponse {
            user_id: req.user_id.clone(),
            transcript: transcript.to_string(),
            extracted_info: daily_log,
            guidance: generation.text.clone(),
            symptom_analysis,
            escalation,
            language: language_label(language, &generation),
            has_memory: total_logs > 1,
        })
    }

    pub fn basic_guidance(&self, week: Option<u32>) -> BasicGuidance {
        let week = week.unwrap_or(BASIC_GUIDANCE_WEEK);
        BasicGuidance {
            week,
            guidance: prompts::basic_guidance_text(week),
            source: "basic".into(),
            note: "For personalized guidance, use POST /api/guidance with daily logs".into(),
        }
    }

    // ---- chat ----

    pub async fn chat(&self, req: ChatRequest) -> Result<ChatReply> {
        let message = req.message.trim();
        if message.is_empty() {
            return Err(Error::InvalidInput(
                "Message is required: please provide a message to get assistance".into(),
            ));
        }
        let language = resolve_language(req.language.as_deref());

        let user_id = req.user_id.clone();
        let (summary, recent_logs) = self
            .journal(move |store| {
                Ok((
                    ContextSummarizer::summarize(store, &user_id)?,
                    store.get_recent_logs(&user_id, CHAT_RECENT_LOGS)?,
                ))
            })
            .await?;
        let prompt = prompts::chat_prompt(message, &summary, &recent_logs);

        let generation = self
            .generator
            .generate_detailed(&prompt, CHAT_SYSTEM_PROMPT, "", language)
            .await;
        let reply = generation.text.trim();

        Ok(ChatReply {
            guidance: if reply.is_empty() {
                CHAT_FALLBACK.to_string()
            } else {
                reply.to_string()
            },
            source: self.source_label(),
            has_memory: !recent_logs.is_empty(),
            language: language_label(language, &generation),
            user_id: req.user_id,
        })
    }

    // ---- triage ----

    pub fn monitor(&self, req: MonitorRequest) -> MonitorResponse {
        let check = SymptomClassifier::classify(&req.symptoms);
        let escalation = self.escalation.escalate(&check);
        MonitorResponse { check, escalation }
    }

    // ---- journal ----

    pub async fn history(&self, user_id: &str) -> Result<HistoryResponse> {
        let owned = user_id.to_string();
        let record = self.journal(move |store| store.load(&owned)).await?;
        Ok(HistoryResponse {
            user_id: user_id.to_string(),
            logs: record.recent(HISTORY_LIMIT).to_vec(),
            total_logs: record.logs.len(),
            user_profile: record.user_profile,
        })
    }

    // ---- reminders ----

    pub async fn reminders(&self, req: ReminderRequest) -> Result<ReminderSet> {
        let profile = match req.user_profile {
            Some(profile) => profile,
            None => self.stored_reminder_profile(&req.user_id).await?,
        };
        Ok(ReminderExtractor::generate(&self.generator, &req.voice_logs, &profile).await)
    }

    async fn stored_reminder_profile(&self, user_id: &str) -> Result<ReminderProfile> {
        let owned = user_id.to_string();
        let stored = self
            .journal(move |store| store.get_user_profile(&owned))
            .await?;
        Ok(
            serde_json::from_value(serde_json::Value::Object(stored)).unwrap_or_else(|e| {
                warn!("Stored profile for {} not usable for reminders: {}", user_id, e);
                ReminderProfile::default()
            }),
        )
    }

    // ---- language / status ----

    pub async fn detect_language(&self, req: LanguageProbeRequest) -> LanguageProbe {
        let detected = detect_language(&req.text);
        let response = self
            .generator
            .generate(&req.text, PROBE_SYSTEM_PROMPT, "", Some(detected))
            .await;
        LanguageProbe {
            input_text: req.text,
            detected_language: detected,
            response,
            supported_languages: LanguageTag::ALL.to_vec(),
        }
    }

    pub fn status(&self) -> AssistantStatus {
        AssistantStatus {
            provider: self.generator.provider().to_string(),
            backend_available: self.generator.is_backend_available(),
            model: self.generator.model().map(str::to_string),
            supported_languages: LanguageTag::ALL.to_vec(),
        }
    }

    fn source_label(&self) -> String {
        format!("AI-powered ({})", self.generator.provider())
    }

    /// Run journal file I/O on the blocking pool.
    async fn journal<T, F>(&self, work: F) -> Result<T>
    where
        F: FnOnce(&JournalStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || work(store.as_ref()))
            .await
            .map_err(|e| Error::Internal(format!("Journal task failed: {}", e)))?
    }
}

/// Parse an override; unknown names fall back to detection.
fn resolve_language(requested: Option<&str>) -> Option<LanguageTag> {
    let requested = requested.map(str::trim).filter(|s| !s.is_empty())?;
    match requested.parse() {
        Ok(tag) => Some(tag),
        Err(e) => {
            warn!("{}; detecting from input instead", e);
            None
        }
    }
}

fn language_label(requested: Option<LanguageTag>, generation: &Generation) -> String {
    match requested {
        Some(_) => generation.language.as_str().to_string(),
        None => AUTO_DETECTED.to_string(),
    }
}

/// Structured log for a transcript: the transcript is the concern, known
/// symptom phrases become symptoms.
fn daily_log_from_transcript(transcript: &str) -> DailyLog {
    DailyLog {
        mood: Some(NOT_SPECIFIED.into()),
        energy_level: Some(NOT_SPECIFIED.into()),
        symptoms: find_mentioned_symptoms(transcript),
        sleep_hours: None,
        water_intake: Some(NOT_SPECIFIED.into()),
        exercise: Some(NOT_SPECIFIED.into()),
        concerns: vec![transcript.to_string()],
        extra: Default::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nurture_chat::mock::{response_for, Topic};
    use nurture_store::Profile;
    use nurture_triage::{EscalationNotifier, RiskStatus, RiskVerdict};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn assistant() -> (Assistant, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = JournalStore::open(dir.path().join("journals")).unwrap();
        (Assistant::new(ResponseGenerator::mock(), store), dir)
    }

    fn guidance_request(user_id: &str, week: u32, language: Option<&str>) -> GuidanceRequest {
        let mut profile = Profile::new();
        profile.insert("age".into(), json!(28));
        profile.insert("health_conditions".into(), json!(["anemia"]));
        GuidanceRequest {
            user_id: user_id.into(),
            language: language.map(str::to_string),
            week,
            daily_log: DailyLog {
                mood: Some("tired".into()),
                symptoms: vec!["back pain".into()],
                ..DailyLog::default()
            },
            user_profile: profile,
        }
    }

    #[tokio::test]
    async fn test_guidance_persists_and_reports_memory() {
        let (assistant, _dir) = assistant();

        let first = assistant
            .guidance(guidance_request("u1", 24, None))
            .await
            .unwrap();
        assert_eq!(first.week, 24);
        assert_eq!(first.source, "AI-powered (mock)");
        assert!(first.personalized);
        assert!(!first.has_memory);
        assert_eq!(first.language, "auto-detected");
        assert_eq!(
            first.guidance,
            response_for(LanguageTag::English, Topic::SecondTrimester)
        );

        let second = assistant
            .guidance(guidance_request("u1", 25, None))
            .await
            .unwrap();
        assert!(second.has_memory);
        assert_eq!(assistant.store().total_logs("u1").unwrap(), 2);
    }

    #[tokio::test]
    async fn test_guidance_language_override() {
        let (assistant, _dir) = assistant();
        let resp = assistant
            .guidance(guidance_request("u2", 8, Some("Hindi")))
            .await
            .unwrap();
        assert_eq!(resp.language, "hindi");
        assert_eq!(
            resp.guidance,
            response_for(LanguageTag::Hindi, Topic::FirstTrimester)
        );

        // Unknown override: detection takes over.
        let resp = assistant
            .guidance(guidance_request("u2", 8, Some("klingon")))
            .await
            .unwrap();
        assert_eq!(resp.language, "auto-detected");
    }

    #[tokio::test]
    async fn test_voice_guidance_triages_transcript() {
        let (assistant, _dir) = assistant();
        let transcript = "There was heavy bleeding this morning and I feel dizzy";
        let resp = assistant
            .voice_guidance(VoiceGuidanceRequest {
                user_id: "v1".into(),
                transcript: format!("  {}  ", transcript),
                language: None,
                week: 30,
            })
            .await
            .unwrap();

        assert_eq!(resp.transcript, transcript);
        assert_eq!(resp.extracted_info.concerns, vec![transcript.to_string()]);
        assert_eq!(
            resp.extracted_info.symptoms,
            vec!["heavy bleeding".to_string(), "dizziness".to_string()]
        );
        assert_eq!(resp.symptom_analysis.status, RiskStatus::Alert);
        assert_eq!(resp.symptom_analysis.symptoms, vec!["heavy bleeding".to_string()]);
        assert!(resp.escalation.escalated);
        assert!(!resp.has_memory);
        assert!(!resp.guidance.is_empty());

        let stored = assistant.store().get_recent_logs("v1", 5).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].week, 30);
    }

    #[tokio::test]
    async fn test_blank_inputs_are_rejected() {
        let (assistant, _dir) = assistant();
        let err = assistant
            .voice_guidance(VoiceGuidanceRequest {
                user_id: "v".into(),
                transcript: "   ".into(),
                language: None,
                week: 20,
            })
            .await
            .unwrap_err();
        assert!(err.is_client_error());

        let err = assistant
            .chat(ChatRequest {
                user_id: "c".into(),
                message: "\n".into(),
                language: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert_eq!(assistant.store().total_logs("v").unwrap(), 0);
    }

    #[tokio::test]
    async fn test_chat_uses_memory_when_present() {
        let (assistant, _dir) = assistant();
        let reply = assistant
            .chat(ChatRequest {
                user_id: "c1".into(),
                message: "I feel anxious".into(),
                language: None,
            })
            .await
            .unwrap();
        assert!(!reply.has_memory);
        assert_eq!(reply.user_id, "c1");
        assert_eq!(reply.guidance, response_for(LanguageTag::English, Topic::Anxiety));

        assistant
            .guidance(guidance_request("c1", 30, None))
            .await
            .unwrap();
        let reply = assistant
            .chat(ChatRequest {
                user_id: "c1".into(),
                message: "Any tips?".into(),
                language: Some("english".into()),
            })
            .await
            .unwrap();
        assert!(reply.has_memory);
        assert_eq!(reply.language, "english");
        assert_eq!(
            reply.guidance,
            response_for(LanguageTag::English, Topic::ThirdTrimester)
        );
    }

    #[test]
    fn test_monitor() {
        let (assistant, _dir) = assistant();
        let resp = assistant.monitor(MonitorRequest {
            symptoms: vec!["severe abdominal pain".into(), "nausea".into()],
        });
        assert_eq!(resp.check.status, RiskStatus::Alert);
        assert_eq!(resp.check.symptoms, vec!["severe abdominal pain".to_string()]);
        assert!(resp.escalation.escalated);

        let resp = assistant.monitor(MonitorRequest::default());
        assert_eq!(resp.check.status, RiskStatus::Normal);
        assert!(!resp.escalation.escalated);
    }

    #[test]
    fn test_custom_notifier_is_wired() {
        struct Counter(AtomicUsize);
        impl EscalationNotifier for Counter {
            fn notify(&self, _verdict: &RiskVerdict) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let (assistant, _dir) = assistant();
        let counter = Arc::new(Counter(AtomicUsize::new(0)));
        let assistant = assistant.with_escalation(EscalationPolicy::new(counter.clone()));
        assistant.monitor(MonitorRequest {
            symptoms: vec!["high fever".into()],
        });
        assistant.monitor(MonitorRequest {
            symptoms: vec!["headache".into()],
        });
        assert_eq!(counter.0.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_history_caps_logs() {
        let (assistant, _dir) = assistant();
        for week in 1..=12 {
            assistant
                .guidance(guidance_request("h1", week, None))
                .await
                .unwrap();
        }
        let history = assistant.history("h1").await.unwrap();
        assert_eq!(history.user_id, "h1");
        assert_eq!(history.logs.len(), HISTORY_LIMIT);
        assert_eq!(history.logs[0].week, 3);
        assert_eq!(history.logs[9].week, 12);
        assert_eq!(history.total_logs, 12);
        assert_eq!(history.user_profile["age"], json!(28));

        let empty = assistant.history("nobody").await.unwrap();
        assert!(empty.logs.is_empty());
        assert!(empty.user_profile.is_empty());
    }

    #[test]
    fn test_basic_guidance() {
        let (assistant, _dir) = assistant();
        let basic = assistant.basic_guidance(None);
        assert_eq!(basic.week, 22);
        assert!(basic.guidance.starts_with("Week 22: Stay hydrated"));
        assert_eq!(basic.source, "basic");
        assert_eq!(assistant.basic_guidance(Some(9)).week, 9);
    }

    #[tokio::test]
    async fn test_detect_language_probe() {
        let (assistant, _dir) = assistant();
        let probe = assistant
            .detect_language(LanguageProbeRequest {
                text: "मुझे मतली हो रही है".into(),
            })
            .await;
        assert_eq!(probe.detected_language, LanguageTag::Hindi);
        assert_eq!(probe.response, response_for(LanguageTag::Hindi, Topic::Nausea));
        assert_eq!(probe.supported_languages.len(), LanguageTag::ALL.len());
    }

    #[tokio::test]
    async fn test_reminders_fall_back_to_stored_profile() {
        let (assistant, _dir) = assistant();
        assistant
            .guidance(guidance_request("r1", 20, None))
            .await
            .unwrap();

        let set = assistant
            .reminders(ReminderRequest {
                user_id: "r1".into(),
                voice_logs: Vec::new(),
                user_profile: None,
            })
            .await
            .unwrap();
        assert_eq!(set.reminders.len(), 5);
        assert_eq!(set.based_on_conditions, vec!["anemia".to_string()]);
        assert_eq!(set.reminders[0].id, "reminder_iron");

        let set = assistant
            .reminders(ReminderRequest {
                user_id: "r1".into(),
                voice_logs: Vec::new(),
                user_profile: Some(ReminderProfile::default()),
            })
            .await
            .unwrap();
        assert_eq!(set.reminders[0].id, "reminder_1");
    }

    #[test]
    fn test_status_reports_mock() {
        let (assistant, _dir) = assistant();
        let status = assistant.status();
        assert_eq!(status.provider, "mock");
        assert!(!status.backend_available);
        assert!(status.model.is_none());
    }
}
