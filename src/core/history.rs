//! Append-only conversation history.
//!
//! The store is a single JSON document holding an ordered array of records.
//! It is loaded fully into memory before any read or write and rewritten
//! whole (pretty-printed) after every append. There is no cross-process
//! locking: two concurrent invocations against the same file race, and the
//! last full rewrite wins. That is an accepted limitation of the single-user,
//! single-process usage model, not something this module tries to fix.

use chrono::{Local, SecondsFormat};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::PathBuf;

use crate::core::error::Result;

/// One persisted prompt/response exchange.
///
/// Ids are assigned as `count_before_append + 1`: unique and strictly
/// increasing within one store, but not globally unique across concurrent
/// writers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    #[serde(rename = "conversation_id")]
    pub id: u32,
    pub prompt: String,
    pub response: String,
    /// RFC 3339, seconds precision, recorded at save time. Kept as a string
    /// so that load -> save -> load reproduces the file byte for byte.
    pub timestamp: String,
    /// Grouping label; empty means untagged and is omitted on disk.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tag: String,
}

/// Current instant in the on-disk timestamp format.
pub fn now_timestamp() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Keep the subsequence of records matching `tag`. An empty tag keeps
/// everything.
pub fn filter_by_tag(records: Vec<ConversationRecord>, tag: &str) -> Vec<ConversationRecord> {
    if tag.is_empty() {
        records
    } else {
        records.into_iter().filter(|r| r.tag == tag).collect()
    }
}

/// Storage behind a [`HistoryStore`]. Injectable so persistence strategy can
/// change without touching callers.
pub trait HistoryBackend {
    /// Returns an empty list when the backing resource does not exist yet.
    fn load(&self) -> Result<Vec<ConversationRecord>>;
    /// Replaces the backing resource with the full record list.
    fn save(&self, records: &[ConversationRecord]) -> Result<()>;
}

/// File-backed storage: one pretty-printed JSON document.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistoryBackend for FileBackend {
    fn load(&self) -> Result<Vec<ConversationRecord>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(&self.path)?;
        let records = serde_json::from_str(&contents)?;
        Ok(records)
    }

    fn save(&self, records: &[ConversationRecord]) -> Result<()> {
        let contents = serde_json::to_string_pretty(records)?;
        fs::write(&self.path, contents)?;
        Ok(())
    }
}

/// In-memory storage for tests and harnesses.
#[derive(Default)]
pub struct MemoryBackend {
    records: RefCell<Vec<ConversationRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HistoryBackend for MemoryBackend {
    fn load(&self) -> Result<Vec<ConversationRecord>> {
        Ok(self.records.borrow().clone())
    }

    fn save(&self, records: &[ConversationRecord]) -> Result<()> {
        *self.records.borrow_mut() = records.to_vec();
        Ok(())
    }
}

pub struct HistoryStore<B: HistoryBackend> {
    backend: B,
}

impl<B: HistoryBackend> HistoryStore<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn load(&self) -> Result<Vec<ConversationRecord>> {
        self.backend.load()
    }

    /// Appends one exchange and rewrites the backing resource.
    ///
    /// Reloads current state first so the id reflects whatever is on disk at
    /// append time. A write failure leaves it unknown whether history was
    /// updated; callers must report that to the user.
    pub fn append_and_save(&self, prompt: &str, response: &str, tag: &str) -> Result<ConversationRecord> {
        let mut records = self.backend.load()?;
        let record = ConversationRecord {
            id: records.len() as u32 + 1,
            prompt: prompt.to_string(),
            response: response.to_string(),
            timestamp: now_timestamp(),
            tag: tag.to_string(),
        };
        records.push(record.clone());
        self.backend.save(&records)?;
        Ok(record)
    }
}
