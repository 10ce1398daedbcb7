//! Reminder extraction: turns analysis text into exactly five daily reminders.
//!
//! The generation backend is asked for five lines; whatever it returns is
//! parsed, categorized and padded from a fixed default list. When the backend
//! is unavailable a symptom-aware deterministic set is used instead.

pub mod extractor;
pub mod types;

pub use extractor::{ReminderExtractor, REMINDER_COUNT};
pub use types::*;
