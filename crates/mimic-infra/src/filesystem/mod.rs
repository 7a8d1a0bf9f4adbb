//! Filesystem adapters for Mimic.
//!
//! Chat logs live at `{data_dir}/{log_dir}/{identity}.txt`, one plain-text
//! file per sender, appended to and never rewritten.

use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use mimic_core::history::store::{ChatLogStore, entry_now};
use mimic_types::chat::SenderIdentity;
use mimic_types::config::StorageConfig;
use mimic_types::error::LogError;

/// Append-only chat log store backed by local text files.
#[derive(Debug, Clone)]
pub struct LocalChatLogStore {
    log_dir: PathBuf,
}

impl LocalChatLogStore {
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
        }
    }

    /// Resolve `storage.log_dir` against the data directory. Absolute paths
    /// are used as-is.
    pub fn from_config(data_dir: &Path, storage: &StorageConfig) -> Self {
        Self::new(data_dir.join(&storage.log_dir))
    }

    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }

    /// Path of the log file for `identity`.
    ///
    /// Identities that could escape the log directory are rejected.
    pub fn log_path(&self, identity: &SenderIdentity) -> Result<PathBuf, LogError> {
        if !identity.is_path_safe() {
            return Err(LogError::InvalidIdentity(identity.to_string()));
        }
        Ok(self.log_dir.join(format!("{}.txt", identity.as_str())))
    }
}

impl ChatLogStore for LocalChatLogStore {
    async fn append(
        &self,
        identity: &SenderIdentity,
        label: &str,
        text: &str,
    ) -> Result<(), LogError> {
        let path = self.log_path(identity)?;
        let line = entry_now(label, text).to_line();

        tokio::fs::create_dir_all(&self.log_dir)
            .await
            .map_err(|e| fs_error("create log directory", &self.log_dir, e))?;

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| fs_error("open", &path, e))?;

        file.write_all(line.as_bytes())
            .await
            .map_err(|e| fs_error("append to", &path, e))?;
        file.flush()
            .await
            .map_err(|e| fs_error("flush", &path, e))?;

        tracing::debug!(identity = %identity, label, bytes = line.len(), "chat log appended");
        Ok(())
    }

    async fn read(&self, identity: &SenderIdentity) -> Result<Option<String>, LogError> {
        let path = self.log_path(identity)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(fs_error("read", &path, e)),
        }
    }
}

fn fs_error(action: &str, path: &Path, err: std::io::Error) -> LogError {
    LogError::FileSystem(format!("failed to {action} {}: {err}", path.display()))
}

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `MIMIC_DATA_DIR` environment variable
/// 2. `~/.mimic`
/// 3. `.mimic` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("MIMIC_DATA_DIR") {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".mimic");
    }

    PathBuf::from(".mimic")
}
