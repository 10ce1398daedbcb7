//! File-per-user journal store.
//!
//! Every user maps to `user_<id>.json` inside the journal directory. The
//! record is read whole, appended to, and written back through a temp file
//! and rename, so readers never observe a partial document.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::types::*;
use nurture_core::{Error, Result};

/// Journal store with one JSON document per user.
pub struct JournalStore {
    dir: PathBuf,
    /// Write locks keyed by file stem, held only while a write is in flight.
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl JournalStore {
    /// Open (and create if needed) a journal directory.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir).map_err(|e| Error::Storage(e.to_string()))?;
        info!("Journal store opened at {}", dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            locks: DashMap::new(),
        })
    }

    /// Directory holding the journal records.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Append a daily log for `user_id` and merge `profile` into the stored one.
    ///
    /// Returns the entry that was written.
    pub fn save_log(
        &self,
        user_id: &str,
        week: u32,
        daily_log: DailyLog,
        profile: Option<&Profile>,
    ) -> Result<LogEntry> {
        let stem = file_stem(user_id);
        let lock = self.lock_for(&stem);
        let result = {
            let _guard = lock.lock();
            self.append(user_id, &stem, week, daily_log, profile)
        };
        drop(lock);
        self.release_lock(&stem);
        result
    }

    fn append(
        &self,
        user_id: &str,
        stem: &str,
        week: u32,
        daily_log: DailyLog,
        profile: Option<&Profile>,
    ) -> Result<LogEntry> {
        let path = self.stem_file(stem);
        let mut record = match read_record(&path)? {
            Some(record) => record,
            None => {
                info!("Creating journal for user {}", user_id);
                JournalRecord::default()
            }
        };

        // Timestamps never go backwards within one journal.
        let now = Utc::now();
        let timestamp = record
            .logs
            .last()
            .map_or(now, |last| last.timestamp.max(now));

        let entry = LogEntry {
            timestamp,
            week,
            daily_log,
        };
        record.logs.push(entry.clone());

        if let Some(profile) = profile {
            record.merge_profile(profile);
        }

        write_record(&path, &record)?;
        debug!(
            "Saved week {} log for user {} ({} entries)",
            week,
            user_id,
            record.logs.len()
        );

        Ok(entry)
    }

    /// The last `limit` entries for a user, oldest first. Empty for unknown users.
    pub fn get_recent_logs(&self, user_id: &str, limit: usize) -> Result<Vec<LogEntry>> {
        let record = self.load(user_id)?;
        Ok(record.recent(limit).to_vec())
    }

    /// Stored profile for a user, or an empty map.
    pub fn get_user_profile(&self, user_id: &str) -> Result<Profile> {
        Ok(self.load(user_id)?.user_profile)
    }

    /// Number of entries in a user's journal.
    pub fn total_logs(&self, user_id: &str) -> Result<usize> {
        Ok(self.load(user_id)?.logs.len())
    }

    /// Load a user's full record. Missing or unreadable records read as empty.
    pub fn load(&self, user_id: &str) -> Result<JournalRecord> {
        let path = self.user_file(user_id);
        match read_record(&path) {
            Ok(record) => Ok(record.unwrap_or_default()),
            Err(Error::Json(e)) => {
                warn!("Ignoring malformed journal {}: {}", path.display(), e);
                Ok(JournalRecord::default())
            }
            Err(e) => Err(e),
        }
    }

    fn lock_for(&self, stem: &str) -> Arc<Mutex<()>> {
        self.locks.entry(stem.to_string()).or_default().clone()
    }

    /// Drop the lock entry once no writer holds or awaits it.
    fn release_lock(&self, stem: &str) {
        self.locks
            .remove_if(stem, |_, lock| Arc::strong_count(lock) == 1);
    }

    fn user_file(&self, user_id: &str) -> PathBuf {
        self.stem_file(&file_stem(user_id))
    }

    fn stem_file(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("user_{}.json", stem))
    }
}

/// File-name-safe form of a user id.
///
/// Plain ids are used verbatim; anything else is hashed so it cannot name a
/// path outside the journal directory. The `~` prefix never occurs in a
/// plain id, so the two forms cannot collide.
fn file_stem(user_id: &str) -> String {
    let plain = !user_id.is_empty()
        && user_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if plain {
        user_id.to_string()
    } else {
        let digest = Sha256::digest(user_id.as_bytes());
        format!("~{}", hex::encode(digest))
    }
}

fn read_record(path: &Path) -> Result<Option<JournalRecord>> {
    let data = match std::fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    Ok(Some(serde_json::from_str(&data)?))
}

fn write_record(path: &Path, record: &JournalRecord) -> Result<()> {
    let json = serde_json::to_string_pretty(record)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path).map_err(|e| Error::Storage(format!("{}: {}", path.display(), e)))
}
