//! ChatLogStore trait for append-only per-sender logs.
//!
//! Defined in mimic-core so the gate can persist exchanges without depending on
//! a specific storage backend. The `LocalChatLogStore` adapter lives in
//! mimic-infra; `MemoryChatLogStore` here backs the tests.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Local;

use mimic_types::chat::{LogEntry, SenderIdentity};
use mimic_types::error::LogError;

/// Abstraction over chat log persistence.
///
/// Implementations must never truncate or reorder existing content. Appends to
/// the same identity from overlapping calls are not serialized here; callers
/// that need ordering take a per-sender lock (see `MessageGate`).
pub trait ChatLogStore: Send + Sync {
    /// Append one timestamped entry to `identity`'s log, creating it if absent.
    fn append(
        &self,
        identity: &SenderIdentity,
        label: &str,
        text: &str,
    ) -> impl std::future::Future<Output = Result<(), LogError>> + Send;

    /// Read the whole log. `Ok(None)` when no log exists yet.
    fn read(
        &self,
        identity: &SenderIdentity,
    ) -> impl std::future::Future<Output = Result<Option<String>, LogError>> + Send;
}

/// Build the entry for "now" on the local wall clock.
pub fn entry_now(label: &str, text: &str) -> LogEntry {
    LogEntry::new(Local::now().naive_local(), label, text)
}

/// In-memory chat log store.
#[derive(Debug, Default)]
pub struct MemoryChatLogStore {
    logs: Mutex<HashMap<SenderIdentity, String>>,
}

impl MemoryChatLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a log with raw content (test fixtures, imports).
    pub fn insert_raw(&self, identity: &SenderIdentity, content: &str) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.insert(identity.clone(), content.to_string());
        }
    }

    pub fn contains(&self, identity: &SenderIdentity) -> bool {
        self.logs
            .lock()
            .map(|logs| logs.contains_key(identity))
            .unwrap_or(false)
    }
}

impl ChatLogStore for MemoryChatLogStore {
    async fn append(
        &self,
        identity: &SenderIdentity,
        label: &str,
        text: &str,
    ) -> Result<(), LogError> {
        let line = entry_now(label, text).to_line();
        let mut logs = self
            .logs
            .lock()
            .map_err(|e| LogError::FileSystem(format!("log map poisoned: {e}")))?;
        logs.entry(identity.clone()).or_default().push_str(&line);
        Ok(())
    }

    async fn read(&self, identity: &SenderIdentity) -> Result<Option<String>, LogError> {
        let logs = self
            .logs
            .lock()
            .map_err(|e| LogError::FileSystem(format!("log map poisoned: {e}")))?;
        Ok(logs.get(identity).cloned())
    }
}
