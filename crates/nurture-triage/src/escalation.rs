//! Escalation policy and notification hook.

use std::sync::Arc;

use tracing::warn;

use crate::types::{EscalationResult, RiskVerdict};

pub const ESCALATED_MESSAGE: &str = "Emergency response initiated";
pub const NOT_ESCALATED_MESSAGE: &str = "No escalation needed";

/// Side channel fired for every alert (SMS, call, push).
///
/// Fire-and-forget: implementations must not block and cannot fail the
/// escalation.
pub trait EscalationNotifier: Send + Sync {
    fn notify(&self, verdict: &RiskVerdict);
}

/// Notifier that only records the alert in the log.
pub struct LogNotifier;

impl EscalationNotifier for LogNotifier {
    fn notify(&self, verdict: &RiskVerdict) {
        warn!(
            "Escalation triggered: contact healthcare provider or emergency service (symptoms: {})",
            verdict.symptoms.join(", ")
        );
    }
}

/// Maps a verdict to an escalation action.
pub struct EscalationPolicy {
    notifier: Arc<dyn EscalationNotifier>,
}

impl EscalationPolicy {
    pub fn new(notifier: Arc<dyn EscalationNotifier>) -> Self {
        Self { notifier }
    }

    pub fn escalate(&self, verdict: &RiskVerdict) -> EscalationResult {
        if verdict.is_alert() {
            self.notifier.notify(verdict);
            EscalationResult {
                escalated: true,
                message: ESCALATED_MESSAGE.to_string(),
            }
        } else {
            EscalationResult {
                escalated: false,
                message: NOT_ESCALATED_MESSAGE.to_string(),
            }
        }
    }
}

impl Default for EscalationPolicy {
    fn default() -> Self {
        Self::new(Arc::new(LogNotifier))
    }
}
