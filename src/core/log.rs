//! Human-readable combat log.
//!
//! The log is diagnostic: it is not part of the engine's contract. Only the
//! most recent `window` entries are retained for display, in a persistent
//! vector so snapshots are cheap to hand to a presentation layer.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::side::Side;

/// One line of the combat log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub round: u32,
    /// Side the line is about, if any.
    pub side: Option<Side>,
    pub text: String,
}

/// Bounded, append-only log.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CombatLog {
    entries: Vector<LogEntry>,
    window: usize,
    total: u64,
}

impl CombatLog {
    /// Create an empty log keeping at most `window` entries.
    #[must_use]
    pub fn new(window: usize) -> Self {
        Self {
            entries: Vector::new(),
            window: window.max(1),
            total: 0,
        }
    }

    /// Append a line, dropping the oldest retained line past the window.
    pub fn push(&mut self, round: u32, side: Option<Side>, text: impl Into<String>) {
        let entry = LogEntry {
            round,
            side,
            text: text.into(),
        };
        tracing::debug!(round, side = ?entry.side, "{}", entry.text);

        self.entries.push_back(entry);
        while self.entries.len() > self.window {
            self.entries.pop_front();
        }
        self.total += 1;
    }

    /// Retained entries, oldest first.
    pub fn recent(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[must_use]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.back()
    }

    /// Number of lines ever written, including evicted ones.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
