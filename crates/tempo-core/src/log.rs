//! The typed, append-only session log stream.
//!
//! Two producers feed the aggregator: the turn controller (local entries) and
//! the push channel (engine entries plus the one-shot welcome banner). Entries
//! are ordered by arrival at the aggregator, not by wall-clock timestamp; the
//! two sources may race and the timestamp is informational only.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// LogKind / LogEntry
// ---------------------------------------------------------------------------

/// Category of a session log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogKind {
    Welcome,
    Info,
    Engine,
    Error,
}

impl LogKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::Info => "info",
            Self::Engine => "engine",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One immutable entry in the session log stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub kind: LogKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    #[must_use]
    pub fn new(kind: LogKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

// ---------------------------------------------------------------------------
// LogAggregator
// ---------------------------------------------------------------------------

/// Merges the push channel and local request-triggered entries into one
/// ordered, append-only stream.
///
/// The welcome banner is a one-shot latch: it may be appended at most once per
/// session, regardless of how many times the push channel re-delivers it
/// (reconnects included). `clear` empties the stream but keeps the latch, so a
/// cleared session never replays the banner.
#[derive(Debug, Default)]
pub struct LogAggregator {
    entries: Vec<LogEntry>,
    welcome_seen: bool,
}

impl LogAggregator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the two-entry welcome banner, once per session.
    ///
    /// Subsequent calls are no-ops even with different content.
    pub fn record_welcome(&mut self, ascii: &str, description: &str) {
        if self.welcome_seen {
            return;
        }
        self.welcome_seen = true;
        self.entries.push(LogEntry::new(LogKind::Welcome, ascii));
        self.entries
            .push(LogEntry::new(LogKind::Welcome, description));
    }

    /// Append one engine-kind entry from the push channel.
    ///
    /// Empty and whitespace-only messages are silently dropped.
    pub fn record_pushed(&mut self, raw: &str) {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return;
        }
        self.entries.push(LogEntry::new(LogKind::Engine, trimmed));
    }

    /// Append one local entry from the turn controller or readiness probe.
    pub fn record_local(&mut self, kind: LogKind, message: impl Into<String>) {
        self.entries.push(LogEntry::new(kind, message));
    }

    /// Empty the stream. The welcome latch persists.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Read-only view of the whole stream, in arrival order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries appended at or after index `start`, for incremental rendering.
    #[must_use]
    pub fn entries_after(&self, start: usize) -> &[LogEntry] {
        &self.entries[start.min(self.entries.len())..]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
