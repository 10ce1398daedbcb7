//! Script-based language detection.

use crate::types::LanguageTag;

/// Unicode blocks that identify one language.
pub struct ScriptRange {
    pub language: LanguageTag,
    pub blocks: &'static [(char, char)],
}

impl ScriptRange {
    pub fn contains(&self, c: char) -> bool {
        self.blocks.iter().any(|&(lo, hi)| lo <= c && c <= hi)
    }
}

/// Checked in order; the first range with any matching character wins.
pub static SCRIPT_RANGES: &[ScriptRange] = &[
    // Devanagari
    ScriptRange {
        language: LanguageTag::Hindi,
        blocks: &[('\u{0900}', '\u{097F}')],
    },
    ScriptRange {
        language: LanguageTag::Arabic,
        blocks: &[('\u{0600}', '\u{06FF}')],
    },
    // CJK Unified Ideographs
    ScriptRange {
        language: LanguageTag::Chinese,
        blocks: &[('\u{4E00}', '\u{9FFF}')],
    },
    // Hiragana, Katakana
    ScriptRange {
        language: LanguageTag::Japanese,
        blocks: &[('\u{3040}', '\u{309F}'), ('\u{30A0}', '\u{30FF}')],
    },
    // Hangul Syllables
    ScriptRange {
        language: LanguageTag::Korean,
        blocks: &[('\u{AC00}', '\u{D7AF}')],
    },
];

/// Classify text by script. Text with no specialised script is English.
pub fn detect_language(text: &str) -> LanguageTag {
    SCRIPT_RANGES
        .iter()
        .find(|range| text.chars().any(|c| range.contains(c)))
        .map(|range| range.language)
        .unwrap_or_default()
}
