//! Nurture Store: per-user journal of daily logs plus a merged profile.
//!
//! Each user owns one JSON record on disk. Writes load the full record,
//! append, and replace the file atomically under a per-user lock.

pub mod journal;
pub mod summary;
pub mod types;

pub use journal::JournalStore;
pub use summary::{render_value, ContextSummarizer};
pub use types::*;
