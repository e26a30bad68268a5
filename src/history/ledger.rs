use serde::Serialize;

use crate::models::HistoryEntry;

/// Fixed number of searches the ledger remembers.
pub const HISTORY_CAPACITY: usize = 10;

/// Most-recent-first list of past searches, never longer than its capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct HistoryLedger {
    entries: Vec<HistoryEntry>,
    #[serde(skip)]
    capacity: usize,
}

impl HistoryLedger {
    pub fn new() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: Vec::with_capacity(capacity), capacity }
    }

    /// Build from entries already in most-recent-first order, dropping the
    /// oldest ones past capacity.
    pub fn from_entries(mut entries: Vec<HistoryEntry>, capacity: usize) -> Self {
        entries.truncate(capacity);
        Self { entries, capacity }
    }

    /// Insert at the front, evicting the oldest entry if full.
    pub fn push_front(&mut self, entry: HistoryEntry) {
        self.entries.insert(0, entry);
        self.entries.truncate(self.capacity);
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn first(&self) -> Option<&HistoryEntry> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }
}

impl Default for HistoryLedger {
    fn default() -> Self {
        Self::new()
    }
}
