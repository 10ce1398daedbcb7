//! Triage result types.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskStatus {
    Normal,
    Alert,
}

/// Outcome of classifying a symptom list.
///
/// For `Alert`, `symptoms` holds the triggering subset; for `Normal`, the
/// input as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskVerdict {
    pub status: RiskStatus,
    pub message: String,
    pub symptoms: Vec<String>,
}

impl RiskVerdict {
    pub fn is_alert(&self) -> bool {
        self.status == RiskStatus::Alert
    }
}

/// Action taken for a verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EscalationResult {
    pub escalated: bool,
    pub message: String,
}
