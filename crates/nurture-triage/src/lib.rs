//! Triage: symptom risk classification and escalation.
//!
//! Both steps are total functions: any symptom list (including an empty one)
//! yields a verdict, and every verdict maps to an escalation result. Alerts
//! also fire a notification hook.

pub mod escalation;
pub mod symptoms;
pub mod types;

pub use escalation::{EscalationNotifier, EscalationPolicy, LogNotifier};
pub use symptoms::{find_mentioned_symptoms, SymptomClassifier, HIGH_RISK_SYMPTOMS};
pub use types::*;
