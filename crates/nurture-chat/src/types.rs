//! Generation types shared with the interaction layer.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Languages the assistant can detect and answer in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    #[default]
    English,
    Hindi,
    Spanish,
    French,
    German,
    Chinese,
    Arabic,
    Portuguese,
    Russian,
    Japanese,
    Korean,
}

impl LanguageTag {
    pub const ALL: [LanguageTag; 11] = [
        LanguageTag::English,
        LanguageTag::Hindi,
        LanguageTag::Spanish,
        LanguageTag::French,
        LanguageTag::German,
        LanguageTag::Chinese,
        LanguageTag::Arabic,
        LanguageTag::Portuguese,
        LanguageTag::Russian,
        LanguageTag::Japanese,
        LanguageTag::Korean,
    ];

    /// Lowercase identifier used on the wire (`"hindi"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::English => "english",
            Self::Hindi => "hindi",
            Self::Spanish => "spanish",
            Self::French => "french",
            Self::German => "german",
            Self::Chinese => "chinese",
            Self::Arabic => "arabic",
            Self::Portuguese => "portuguese",
            Self::Russian => "russian",
            Self::Japanese => "japanese",
            Self::Korean => "korean",
        }
    }

    /// ISO 639-1 code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hindi => "hi",
            Self::Spanish => "es",
            Self::French => "fr",
            Self::German => "de",
            Self::Chinese => "zh",
            Self::Arabic => "ar",
            Self::Portuguese => "pt",
            Self::Russian => "ru",
            Self::Japanese => "ja",
            Self::Korean => "ko",
        }
    }

    /// Name of the language in its own script, as shown to the backend.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Hindi => "हिंदी",
            Self::Spanish => "español",
            Self::French => "français",
            Self::German => "deutsch",
            Self::Chinese => "中文",
            Self::Arabic => "العربية",
            Self::Portuguese => "português",
            Self::Russian => "русский",
            Self::Japanese => "日本語",
            Self::Korean => "한국어",
        }
    }

    pub fn is_default(&self) -> bool {
        *self == LanguageTag::English
    }
}

impl std::fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageTag {
    type Err = String;

    /// Accepts the wire name or the ISO code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        LanguageTag::ALL
            .iter()
            .copied()
            .find(|tag| tag.as_str() == wanted || tag.code() == wanted)
            .ok_or_else(|| format!("Unsupported language: {}", s))
    }
}

/// Which path produced a piece of generated text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationSource {
    /// The external generation backend.
    Backend,
    /// The deterministic rule table.
    Mock,
}

/// Generated text plus how it was produced.
#[derive(Debug, Clone, Serialize)]
pub struct Generation {
    pub text: String,
    pub language: LanguageTag,
    pub source: GenerationSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_language() {
        assert_eq!("hindi".parse::<LanguageTag>().unwrap(), LanguageTag::Hindi);
        assert_eq!("KO".parse::<LanguageTag>().unwrap(), LanguageTag::Korean);
        assert_eq!(" Spanish ".parse::<LanguageTag>().unwrap(), LanguageTag::Spanish);
        assert!("klingon".parse::<LanguageTag>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&LanguageTag::Japanese).unwrap();
        assert_eq!(json, "\"japanese\"");
        assert_eq!(LanguageTag::default(), LanguageTag::English);
    }
}
