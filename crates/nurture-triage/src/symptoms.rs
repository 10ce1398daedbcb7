//! High-risk symptom classification.

use crate::types::{RiskStatus, RiskVerdict};

/// Symptoms that always warrant escalation. Lowercase.
pub const HIGH_RISK_SYMPTOMS: &[&str] = &[
    "heavy bleeding",
    "blurred vision",
    "severe abdominal pain",
    "high fever",
];

pub const ALERT_MESSAGE: &str = "Potentially dangerous symptoms detected.";
pub const NORMAL_MESSAGE: &str = "No risky symptoms detected.";

/// Phrase found in free text → symptom it reports. Longer phrases first so a
/// specific match is not shadowed by a generic one.
static MENTION_TABLE: &[(&str, &str)] = &[
    ("heavy bleeding", "heavy bleeding"),
    ("blurred vision", "blurred vision"),
    ("blurry vision", "blurred vision"),
    ("severe abdominal pain", "severe abdominal pain"),
    ("high fever", "high fever"),
    ("back pain", "back pain"),
    ("morning sickness", "nausea"),
    ("nauseous", "nausea"),
    ("nausea", "nausea"),
    ("vomiting", "vomiting"),
    ("headache", "headache"),
    ("tired", "fatigue"),
    ("fatigue", "fatigue"),
    ("dizzy", "dizziness"),
    ("dizziness", "dizziness"),
    ("swelling", "swelling"),
    ("swollen", "swelling"),
    ("cramps", "cramps"),
    ("heartburn", "heartburn"),
    ("constipation", "constipation"),
    ("insomnia", "insomnia"),
];

/// Maps reported symptoms to a risk verdict.
pub struct SymptomClassifier;

impl SymptomClassifier {
    /// Case-insensitive match of each symptom against [`HIGH_RISK_SYMPTOMS`].
    pub fn classify(symptoms: &[String]) -> RiskVerdict {
        let alerts: Vec<String> = symptoms
            .iter()
            .filter(|s| is_high_risk(s))
            .cloned()
            .collect();

        if alerts.is_empty() {
            RiskVerdict {
                status: RiskStatus::Normal,
                message: NORMAL_MESSAGE.to_string(),
                symptoms: symptoms.to_vec(),
            }
        } else {
            RiskVerdict {
                status: RiskStatus::Alert,
                message: ALERT_MESSAGE.to_string(),
                symptoms: alerts,
            }
        }
    }
}

fn is_high_risk(symptom: &str) -> bool {
    let normalized = symptom.trim().to_lowercase();
    HIGH_RISK_SYMPTOMS.contains(&normalized.as_str())
}

/// Symptoms mentioned in free text (e.g. a voice transcript), deduplicated in
/// table order.
pub fn find_mentioned_symptoms(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    let mut found: Vec<String> = Vec::new();
    for (phrase, symptom) in MENTION_TABLE {
        if lower.contains(phrase) && !found.iter().any(|f| f == symptom) {
            found.push(symptom.to_string());
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_alert_returns_matching_subset() {
        let input = strings(&["headache", "Heavy Bleeding", "nausea", "HIGH FEVER"]);
        let verdict = SymptomClassifier::classify(&input);
        assert_eq!(verdict.status, RiskStatus::Alert);
        assert_eq!(verdict.symptoms, strings(&["Heavy Bleeding", "HIGH FEVER"]));
        assert_eq!(verdict.message, ALERT_MESSAGE);
        // input untouched
        assert_eq!(input.len(), 4);
    }

    #[test]
    fn test_normal_returns_input_verbatim() {
        let input = strings(&["Back Pain", "nausea"]);
        let verdict = SymptomClassifier::classify(&input);
        assert_eq!(verdict.status, RiskStatus::Normal);
        assert_eq!(verdict.symptoms, input);
        assert_eq!(verdict.message, NORMAL_MESSAGE);
    }

    #[test]
    fn test_empty_list_is_normal() {
        let verdict = SymptomClassifier::classify(&[]);
        assert!(!verdict.is_alert());
        assert!(verdict.symptoms.is_empty());
    }

    #[test]
    fn test_every_high_risk_term_alerts() {
        for term in HIGH_RISK_SYMPTOMS {
            let verdict = SymptomClassifier::classify(&strings(&[&term.to_uppercase()]));
            assert!(verdict.is_alert(), "{} should alert", term);
        }
    }

    #[test]
    fn test_partial_phrase_does_not_alert() {
        let verdict = SymptomClassifier::classify(&strings(&["bleeding", "mild abdominal pain"]));
        assert!(!verdict.is_alert());
    }

    #[test]
    fn test_alert_iff_subset_non_empty() {
        let cases = [
            strings(&[]),
            strings(&["headache"]),
            strings(&["blurred vision"]),
            strings(&["cramps", " severe abdominal pain "]),
        ];
        for case in cases {
            let verdict = SymptomClassifier::classify(&case);
            let any_risky = case.iter().any(|s| is_high_risk(s));
            assert_eq!(verdict.is_alert(), any_risky);
        }
    }

    #[test]
    fn test_find_mentioned_symptoms() {
        let found = find_mentioned_symptoms(
            "I've been feeling nauseous and tired today, also some back pain. Still nauseous.",
        );
        assert_eq!(found, strings(&["back pain", "nausea", "fatigue"]));

        let risky = find_mentioned_symptoms("There was heavy bleeding this morning and blurry vision");
        assert_eq!(risky, strings(&["heavy bleeding", "blurred vision"]));
        assert!(SymptomClassifier::classify(&risky).is_alert());

        assert!(find_mentioned_symptoms("All good today").is_empty());
    }
}
