//! Moderator event log: append-only record of every resolved event.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::step::Phase;

/// One immutable event in the moderator log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    /// Unique entry id.
    pub id: Uuid,
    /// Round the event belongs to.
    pub round: u32,
    /// Phase the event happened in.
    pub phase: Phase,
    /// Human-readable event text.
    pub message: String,
    /// When the event was recorded.
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Create a new entry with a fresh id.
    pub fn new(
        round: u32,
        phase: Phase,
        message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            round,
            phase,
            message: message.into(),
            timestamp,
        }
    }
}

/// The moderator's event log, newest entry first.
///
/// Entries are never mutated or removed; only a full session reset clears
/// the log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLog {
    entries: Vec<LogEntry>,
}

impl EventLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepend an entry (newest first).
    pub fn record(&mut self, entry: LogEntry) {
        self.entries.insert(0, entry);
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries grouped by round for display, oldest round first. Entries
    /// within a round keep the newest-first order.
    pub fn by_round(&self) -> BTreeMap<u32, Vec<&LogEntry>> {
        let mut grouped: BTreeMap<u32, Vec<&LogEntry>> = BTreeMap::new();
        for entry in &self.entries {
            grouped.entry(entry.round).or_default().push(entry);
        }
        grouped
    }

    /// Export the log as plain text.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Session Log\n===========\n\n");
        for (round, entries) in self.by_round() {
            out.push_str(&format!("Round {round}\n"));
            for entry in entries {
                out.push_str(&format!("  [{}] {}\n", entry.phase, entry.message));
            }
            out.push('\n');
        }
        out
    }

    /// Export the log as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Session Log\n\n");
        for (round, entries) in self.by_round() {
            out.push_str(&format!("## Round {round}\n\n"));
            for entry in entries {
                out.push_str(&format!("- **{}**: {}\n", entry.phase, entry.message));
            }
            out.push('\n');
        }
        out
    }
}
