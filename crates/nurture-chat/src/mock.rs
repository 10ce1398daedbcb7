//! Deterministic rule-based generator.
//!
//! Picks a canned reply from a (language, topic) table. Used when the backend
//! is unavailable and whenever a backend call fails. Pure; never fails.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::LanguageTag;

/// Reply topics, in the order they are tried after the week check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    FirstTrimester,
    SecondTrimester,
    ThirdTrimester,
    Anxiety,
    BackPain,
    Nausea,
    Default,
}

/// Keyword topics checked in order after the week check.
pub const KEYWORD_TOPICS: [Topic; 3] = [Topic::Anxiety, Topic::BackPain, Topic::Nausea];

/// Topic → language → lowercase keywords. Any language's keywords count.
pub static TOPIC_KEYWORDS: &[(Topic, LanguageTag, &[&str])] = &[
    (Topic::Anxiety, LanguageTag::English, &["anxious", "worried", "stressed"]),
    (Topic::Anxiety, LanguageTag::Hindi, &["चिंतित", "परेशान"]),
    (Topic::BackPain, LanguageTag::English, &["back pain"]),
    (Topic::BackPain, LanguageTag::Hindi, &["कमर दर्द", "पीठ दर्द"]),
    (Topic::Nausea, LanguageTag::English, &["nausea", "morning sickness"]),
    (Topic::Nausea, LanguageTag::Hindi, &["मतली", "उल्टी"]),
];

/// Canned replies. English covers every topic; other languages may be partial.
pub static RESPONSES: &[(LanguageTag, Topic, &str)] = &[
    (
        LanguageTag::English,
        Topic::FirstTrimester,
        "🌟 First trimester guidance: Take prenatal vitamins, rest when needed, and stay hydrated. Morning sickness is common - try eating small, frequent meals. Remember to schedule your first prenatal appointment!",
    ),
    (
        LanguageTag::English,
        Topic::SecondTrimester,
        "✨ Second trimester - the 'golden period'! Your energy should return. This is a great time for gentle exercise, preparing the nursery, and enjoying your pregnancy. You might start feeling baby movements soon!",
    ),
    (
        LanguageTag::English,
        Topic::ThirdTrimester,
        "🤱 Third trimester: Your baby is growing rapidly! Monitor baby movements, practice relaxation techniques, and prepare your hospital bag. Contact your healthcare provider if you notice decreased movement or unusual symptoms.",
    ),
    (
        LanguageTag::English,
        Topic::Anxiety,
        "It's completely normal to feel anxious during pregnancy. Try deep breathing exercises, gentle meditation, or prenatal yoga. Talk to your partner, friends, or a counselor. Remember, you're doing great!",
    ),
    (
        LanguageTag::English,
        Topic::BackPain,
        "For back pain during pregnancy: Try prenatal yoga, use a pregnancy pillow while sleeping, apply warm compresses, and consider a maternity support belt. Avoid heavy lifting and maintain good posture.",
    ),
    (
        LanguageTag::English,
        Topic::Nausea,
        "For nausea: Eat small, frequent meals throughout the day. Try ginger tea or ginger candy. Avoid strong smells and fatty foods. Stay hydrated and consider vitamin B6 supplements (consult your doctor first).",
    ),
    (
        LanguageTag::English,
        Topic::Default,
        "You're doing wonderfully on this pregnancy journey! Remember to take care of yourself, stay hydrated, take your prenatal vitamins, and don't hesitate to contact your healthcare provider with any concerns. Every pregnancy is unique - trust your body and your instincts. 💕",
    ),
    (
        LanguageTag::Hindi,
        Topic::FirstTrimester,
        "🌟 पहली तिमाही मार्गदर्शन: प्रसवपूर्व विटामिन लें, आराम करें और हाइड्रेटेड रहें। मॉर्निंग सिकनेस सामान्य है - छोटे, बार-बार भोजन लेने की कोशिश करें।",
    ),
    (
        LanguageTag::Hindi,
        Topic::SecondTrimester,
        "✨ दूसरी तिमाही - 'सुनहरा समय'! आपकी ऊर्जा वापस आनी चाहिए। यह हल्के व्यायाम, नर्सरी तैयार करने का अच्छा समय है।",
    ),
    (
        LanguageTag::Hindi,
        Topic::ThirdTrimester,
        "🤱 तीसरी तिमाही: आपका बच्चा तेजी से बढ़ रहा है! बच्चे की हरकतों पर ध्यान दें और अस्पताल का बैग तैयार करें।",
    ),
    (
        LanguageTag::Hindi,
        Topic::Anxiety,
        "गर्भावस्था में चिंता होना बिल्कुल सामान्य है। गहरी सांस लेने के व्यायाम, योग करें। याद रखें, आप बहुत अच्छा कर रही हैं!",
    ),
    (
        LanguageTag::Hindi,
        Topic::BackPain,
        "गर्भावस्था में कमर दर्द के लिए: प्रसवपूर्व योग करें, गर्भावस्था तकिया का उपयोग करें, गर्म सिकाई करें और अच्छी मुद्रा बनाए रखें।",
    ),
    (
        LanguageTag::Hindi,
        Topic::Nausea,
        "मतली के लिए: दिन भर में छोटे, बार-बार भोजन लें। अदरक की चाय या अदरक की कैंडी लें। तेज़ गंध और तैलीय भोजन से बचें।",
    ),
    (
        LanguageTag::Hindi,
        Topic::Default,
        "आप अपनी गर्भावस्था की यात्रा में बहुत अच्छा कर रही हैं! पानी पीती रहें, प्रसवपूर्व विटामिन लें और किसी भी चिंता के लिए डॉक्टर से संपर्क करें। 💕",
    ),
];

static WEEK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:week|सप्ताह)\s*([0-9]+)").expect("valid week regex"));

/// Produce the canned reply for a prompt.
pub fn generate(prompt: &str, language: LanguageTag) -> String {
    response_for(language, select_topic(prompt)).to_string()
}

/// Pick a topic for the prompt; first rule that matches wins.
pub fn select_topic(prompt: &str) -> Topic {
    let lower = prompt.to_lowercase();

    if let Some(week) = mentioned_week(&lower) {
        return trimester_for_week(week);
    }

    KEYWORD_TOPICS
        .iter()
        .copied()
        .find(|&topic| keywords_for(topic).any(|kw| lower.contains(kw)))
        .unwrap_or(Topic::Default)
}

/// The last `week N` mention with N at least 1. Composed prompts put earlier
/// context first and the current query last.
pub fn mentioned_week(lower: &str) -> Option<u32> {
    WEEK_RE
        .captures_iter(lower)
        .filter_map(|cap| cap[1].parse::<u32>().ok())
        .filter(|week| *week >= 1)
        .last()
}

pub fn trimester_for_week(week: u32) -> Topic {
    if week <= 12 {
        Topic::FirstTrimester
    } else if week <= 26 {
        Topic::SecondTrimester
    } else {
        Topic::ThirdTrimester
    }
}

/// Every keyword for a topic across languages.
pub fn keywords_for(topic: Topic) -> impl Iterator<Item = &'static str> {
    TOPIC_KEYWORDS
        .iter()
        .filter(move |(t, _, _)| *t == topic)
        .flat_map(|(_, _, kws)| kws.iter().copied())
}

/// Reply text for a language, falling back to English per topic.
pub fn response_for(language: LanguageTag, topic: Topic) -> &'static str {
    lookup(language, topic)
        .or_else(|| lookup(LanguageTag::English, topic))
        .unwrap_or_default()
}

fn lookup(language: LanguageTag, topic: Topic) -> Option<&'static str> {
    RESPONSES
        .iter()
        .find(|(l, t, _)| *l == language && *t == topic)
        .map(|(_, _, text)| *text)
}
