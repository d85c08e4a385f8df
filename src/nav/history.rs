use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryEntry {
    pub path: String,
    pub timestamp: DateTime<Utc>,
}

/// Bounded log of recently visited, tenant-stripped paths. Oldest first.
#[derive(Debug, Clone)]
pub struct HistoryTracker {
    entries: VecDeque<HistoryEntry>,
    limit: usize,
}

impl Default for HistoryTracker {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

impl HistoryTracker {
    pub fn new(limit: usize) -> Self {
        let limit = limit.max(1);
        Self {
            entries: VecDeque::with_capacity(limit),
            limit,
        }
    }

    /// Returns false when `path` repeats the most recent entry and was dropped.
    pub fn record(&mut self, path: &str) -> bool {
        if self.entries.back().is_some_and(|last| last.path == path) {
            tracing::trace!("history: coalesced repeat visit to {}", path);
            return false;
        }

        self.entries.push_back(HistoryEntry {
            path: path.to_string(),
            timestamp: Utc::now(),
        });
        while self.entries.len() > self.limit {
            self.entries.pop_front();
        }
        true
    }

    /// Where the user was immediately before the current page.
    pub fn previous(&self) -> Option<&HistoryEntry> {
        let len = self.entries.len();
        if len < 2 {
            return None;
        }
        self.entries.get(len - 2)
    }

    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.back()
    }

    pub fn all(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}
