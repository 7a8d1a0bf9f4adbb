//! Chat log domain types.
//!
//! A chat log is a flat, append-only text file per sender identity. Each entry
//! is rendered as one line:
//!
//! ```text
//! [19/10/26, 4:05:12 pm] User: hi
//! ```
//!
//! Bodies with embedded newlines are written as-is, so a single entry may span
//! several physical lines. Only the first carries a date stamp.

use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Timestamp layout used inside the leading brackets of every log line.
///
/// 12-hour clock with a lower-case meridiem. The `DD/MM/YY` prefix is what the
/// history windower parses back out.
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%y, %-I:%M:%S %P";

/// Opaque key identifying a conversation partner (e.g. `919652017834@c.us`).
///
/// Used both as the allow-list membership key and as the chat log filename stem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SenderIdentity(String);

impl SenderIdentity {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this identity can be used verbatim as a single path component.
    ///
    /// Rejects empty strings, `.`/`..`, path separators and NUL bytes.
    pub fn is_path_safe(&self) -> bool {
        let s = self.0.as_str();
        !s.is_empty() && s != "." && s != ".." && !s.contains(['/', '\\', '\0'])
    }
}

impl fmt::Display for SenderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SenderIdentity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for SenderIdentity {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Which side of the conversation wrote a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderLabel {
    /// The human on the other end of the chat.
    Owner,
    /// The bot persona replying on the account holder's behalf.
    Persona,
}

/// A single chat log entry before it is rendered to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: NaiveDateTime,
    /// Rendered label text (e.g. "User" or the persona name).
    pub label: String,
    pub body: String,
}

impl LogEntry {
    pub fn new(
        timestamp: NaiveDateTime,
        label: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            label: label.into(),
            body: body.into(),
        }
    }

    /// Render the entry as it is appended to the log, trailing newline included.
    pub fn to_line(&self) -> String {
        format!(
            "[{}] {}: {}\n",
            format_timestamp(&self.timestamp),
            self.label,
            self.body
        )
    }
}

/// Format a timestamp the way log lines carry it.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
