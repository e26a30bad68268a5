//! Self-healing history store.
//!
//! # Error Handling Strategy
//!
//! History is a convenience, never a reason for a search to fail:
//!
//! - **Corrupt state**: a persisted value that is missing, blank, not UTF-8,
//!   not JSON, not an array, or holds an invalid entry is treated as empty and
//!   immediately overwritten with `[]`.
//! - **Read failures**: any other storage error (permissions, a flaky disk)
//!   leaves the persisted value alone. The session starts with an empty ledger.
//! - **Write failures**: logged with `tracing::warn!` and swallowed. The
//!   in-memory ledger still reflects the change for the rest of the session.
//! - **Replay**: the only operation that reports an error, for an index past
//!   the end of the ledger.

use std::io;

use crate::error::{Result, SearchError, StorageError};
use crate::history::ledger::{HISTORY_CAPACITY, HistoryLedger};
use crate::history::storage::KeyValueStore;
use crate::models::{HistoryEntry, ReplayRequest};

/// Storage key the ledger lives under.
pub const HISTORY_KEY: &str = "search-history";

const EMPTY_LEDGER: &str = "[]";

/// Why persisted history could not be used.
enum ReadFailure {
    /// The value was read but is unusable. Safe to overwrite.
    Corrupt(String),
    /// The value could not be read at all.
    Unavailable(StorageError),
}

/// Owns the ledger and keeps its persisted copy in sync.
pub struct HistoryStore<S: KeyValueStore> {
    storage: S,
    ledger: HistoryLedger,
}

impl<S: KeyValueStore> HistoryStore<S> {
    /// Open the store and load whatever is persisted.
    pub fn open(storage: S) -> Self {
        let mut store = Self { storage, ledger: HistoryLedger::new() };
        store.load();
        store
    }

    /// Re-read persisted state, healing it if it is unusable.
    pub fn load(&mut self) -> HistoryLedger {
        self.ledger = match self.read_persisted() {
            Ok(Some(ledger)) => ledger,
            Ok(None) => {
                self.write_empty();
                HistoryLedger::new()
            }
            Err(ReadFailure::Corrupt(reason)) => {
                tracing::warn!(%reason, "discarding corrupt search history");
                self.write_empty();
                HistoryLedger::new()
            }
            Err(ReadFailure::Unavailable(e)) => {
                tracing::warn!(error = %e, "search history unreadable, leaving it in place");
                HistoryLedger::new()
            }
        };
        self.ledger.clone()
    }

    /// Record a search at the front of the ledger and persist.
    pub fn append(&mut self, entry: HistoryEntry) {
        self.ledger.push_front(entry);
        if let Err(e) = self.persist() {
            tracing::warn!(error = %e, "failed to persist search history");
        }
    }

    /// Drop every entry. Callers confirm with the user first.
    pub fn clear(&mut self) {
        self.ledger.clear();
        self.write_empty();
    }

    /// Look up the term and type of a past search.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::IndexOutOfRange`] if `index >= len`.
    pub fn replay(&self, index: usize) -> Result<ReplayRequest> {
        self.ledger
            .get(index)
            .map(ReplayRequest::from)
            .ok_or(SearchError::IndexOutOfRange { index, len: self.ledger.len() })
    }

    pub fn ledger(&self) -> &HistoryLedger {
        &self.ledger
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// `Ok(None)` for absent or blank state.
    fn read_persisted(&self) -> std::result::Result<Option<HistoryLedger>, ReadFailure> {
        let raw = match self.storage.get(HISTORY_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Ok(None),
            Err(StorageError::Io(e)) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(ReadFailure::Corrupt(format!("not valid UTF-8: {e}")));
            }
            Err(e) => return Err(ReadFailure::Unavailable(e)),
        };
        if raw.trim().is_empty() {
            return Ok(None);
        }

        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| ReadFailure::Corrupt(format!("not valid JSON: {e}")))?;
        if !value.is_array() {
            return Err(ReadFailure::Corrupt("persisted history is not an array".to_string()));
        }
        let entries: Vec<HistoryEntry> = serde_json::from_value(value)
            .map_err(|e| ReadFailure::Corrupt(format!("invalid history entry: {e}")))?;

        let over_capacity = entries.len() > HISTORY_CAPACITY;
        let ledger = HistoryLedger::from_entries(entries, HISTORY_CAPACITY);
        if over_capacity {
            tracing::debug!(kept = ledger.len(), "trimmed persisted history to capacity");
        }
        Ok(Some(ledger))
    }

    fn persist(&mut self) -> std::result::Result<(), StorageError> {
        let json = serde_json::to_string(&self.ledger)?;
        self.storage.set(HISTORY_KEY, &json)
    }

    fn write_empty(&mut self) {
        if let Err(e) = self.storage.set(HISTORY_KEY, EMPTY_LEDGER) {
            tracing::warn!(error = %e, "failed to reset search history");
        }
    }
}
